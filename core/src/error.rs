//! Error types, in the teacher's hand-rolled style: a plain `enum`, a
//! manual `Display` impl, and `impl std::error::Error` — no `thiserror`,
//! matching `phosphor-machines`' `RomLoadError`.
//!
//! spec.md §7 also names a `CombinatorArityError`, raised "at
//! table-construction time; fatal to startup" when a combinator is
//! invoked with an unsupported argument shape. That error has no
//! counterpart here: every shape spec.md's source language dispatches
//! on a runtime argument-presence switch is, in this port, its own
//! named Rust function (`ld8_imm`, `ld8_reg`, `ld8_mem_abs`, …, per
//! `ops`'s doc comments), so an unsupported shape is a compile error,
//! not a value a table-builder could construct and fail on at runtime.
//! The register-pair/index-family names table construction passes to
//! those functions (`ld16("h", "l")`, `generate_index_table(IndexReg::Ix)`)
//! are themselves fixed literals and a typed enum chosen by `tables`'
//! own match arms, never free-form input from outside this crate — so
//! there is no remaining runtime failure mode for a table-build-time
//! error type to report. See DESIGN.md.

use std::fmt;

/// Why `decode_block` stopped short, or could not take one more step of
/// the table-driven decode. Never fatal to the caller — carried in
/// `DecodeResult.fault` and returned alongside whatever instructions
/// decoded successfully first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeFault {
    pub pc: u16,
    pub kind: DecodeFaultKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFaultKind {
    /// The table slot reached (after all prefix lookups) had no `ast`:
    /// an opcode whose emitter is not yet implemented.
    Undecodable,
    /// An operand needed more bytes than the ROM slice had left.
    Truncated { need: u8, have: u8 },
}

impl fmt::Display for DecodeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DecodeFaultKind::Undecodable => {
                write!(f, "undecodable opcode at pc={:#06x}", self.pc)
            }
            DecodeFaultKind::Truncated { need, have } => write!(
                f,
                "truncated operand at pc={:#06x}: need {need} byte(s), have {have}",
                self.pc
            ),
        }
    }
}

impl std::error::Error for DecodeFault {}
