//! `decode_block` — the table-driven decoder loop. `rom` is the byte
//! window to decode, indexed from its own start (`rom[0]` is the byte
//! at `start_pc`); `start_pc` only feeds the *addresses* this function
//! reports and embeds in branch targets. Resolves the `CB`/`ED`/`DD`/`FD`
//! prefix chain down to a concrete [`crate::tables::Opcode`] entry at
//! each step, reads whatever operand bytes that entry calls for, and
//! invokes its emitter to collect IR — stopping at the first block
//! terminator or decode fault.

use crate::error::{DecodeFault, DecodeFaultKind};
use crate::ir::Node;
use crate::ops::{EmitCtx, IndexReg};
use crate::tables::{cb, ed, index, main, Control, OpcodeTable, OperandKind};

/// One decoded instruction: its address, the table's mnemonic (for
/// fixtures/debugging), and the IR statements its emitter produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub pc: u16,
    pub name: &'static str,
    pub ir: Vec<Node>,
}

/// Why a decode block stopped — the four shapes spec.md's external
/// interface names (`"ret"|"jp"|"halt"|"undecodable"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Ret,
    Jp,
    Halt,
    Undecodable,
}

/// The full result of one `decode_block` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    pub instructions: Vec<Instruction>,
    pub terminated_by: Terminator,
    pub end_pc: u16,
    /// The fault behind an `Undecodable` terminator. Always present when
    /// `terminated_by == Undecodable`, always absent otherwise.
    pub fault: Option<DecodeFault>,
}

pub fn decode_block(rom: &[u8], start_pc: u16) -> DecodeResult {
    let mut instructions = Vec::new();
    let base = start_pc as i64;
    let mut offset: usize = 0;

    loop {
        let current_offset = offset;
        let current_pc = wrap_pc(base + current_offset as i64);

        if current_offset >= rom.len() {
            let fault = DecodeFault { pc: current_pc, kind: DecodeFaultKind::Undecodable };
            return DecodeResult { instructions, terminated_by: Terminator::Undecodable, end_pc: current_pc, fault: Some(fault) };
        }

        let (table, op_index, prefix_len, preread_disp) = match select_entry(rom, current_offset, current_pc) {
            Ok(selection) => selection,
            Err(fault) => {
                return DecodeResult { instructions, terminated_by: Terminator::Undecodable, end_pc: fault.pc, fault: Some(fault) };
            }
        };

        let entry = &table[op_index as usize];

        if entry.control == Control::Undecodable {
            let fault = DecodeFault { pc: current_pc, kind: DecodeFaultKind::Undecodable };
            return DecodeResult { instructions, terminated_by: Terminator::Undecodable, end_pc: current_pc, fault: Some(fault) };
        }

        let operand_start = current_offset + prefix_len;
        let (value, target, operand_len) = if let Some(disp) = preread_disp {
            // DDCB/FDCB: the displacement was already consumed while
            // resolving the prefix chain, not a trailing operand byte.
            (disp, 0, 0)
        } else {
            match read_operand(rom, operand_start, current_pc, prefix_len, entry.operand) {
                Ok(parsed) => parsed,
                Err(fault) => {
                    return DecodeResult { instructions, terminated_by: Terminator::Undecodable, end_pc: fault.pc, fault: Some(fault) };
                }
            }
        };

        let ctx = EmitCtx { value, target, current_pc: current_pc as i32 };
        let ir = (entry.emit)(ctx);
        instructions.push(Instruction { pc: current_pc, name: entry.mnemonic, ir });

        offset = operand_start + operand_len;

        if entry.control.terminates_block() {
            let terminated_by = match entry.control {
                Control::Halt => Terminator::Halt,
                Control::RetUnconditional => Terminator::Ret,
                Control::JpUnconditional => Terminator::Jp,
                Control::Undecodable => unreachable!("handled above, before any instruction was appended"),
                _ => unreachable!("terminates_block() only returns true for the three arms above"),
            };
            let end_pc = wrap_pc(base + offset as i64);
            return DecodeResult { instructions, terminated_by, end_pc, fault: None };
        }
    }
}

fn wrap_pc(addr: i64) -> u16 {
    addr.rem_euclid(0x10000) as u16
}

/// Resolves the `CB`/`ED`/`DD`/`FD` prefix chain starting at `offset`
/// down to a concrete table and index into it. Returns the byte count
/// the prefix chain plus opcode byte(s) consumed, and — for the
/// `DDCB`/`FDCB` special case — the displacement byte that sits between
/// the `CB` marker and the real sub-opcode.
fn select_entry(
    rom: &[u8],
    offset: usize,
    fault_pc: u16,
) -> Result<(&'static OpcodeTable, u8, usize, Option<i32>), DecodeFault> {
    let mut cursor = offset;
    let mut active_index: Option<IndexReg> = None;

    // Two consecutive DD/FD prefixes: each consumes a byte, only the
    // last one applies (spec.md §4.4 edge-case policy).
    while cursor < rom.len() && matches!(rom[cursor], 0xDD | 0xFD) {
        active_index = Some(if rom[cursor] == 0xDD { IndexReg::Ix } else { IndexReg::Iy });
        cursor += 1;
    }

    let prefix_count = cursor - offset;

    let sub = *rom
        .get(cursor)
        .ok_or(DecodeFault { pc: fault_pc, kind: DecodeFaultKind::Truncated { need: 1, have: 0 } })?;

    if let Some(ixreg) = active_index {
        if sub == 0xCB {
            let disp = *rom
                .get(cursor + 1)
                .ok_or(DecodeFault { pc: fault_pc, kind: DecodeFaultKind::Truncated { need: 2, have: 1 } })?
                as i8 as i32;
            let cb_op = *rom
                .get(cursor + 2)
                .ok_or(DecodeFault { pc: fault_pc, kind: DecodeFaultKind::Truncated { need: 2, have: 2 } })?;
            let table = index_cb_table(ixreg);
            return Ok((table, cb_op, prefix_count + 3, Some(disp)));
        }
        let table = index_table(ixreg);
        return Ok((table, sub, prefix_count + 1, None));
    }

    match sub {
        0xCB => {
            let real = *rom
                .get(cursor + 1)
                .ok_or(DecodeFault { pc: fault_pc, kind: DecodeFaultKind::Truncated { need: 1, have: 0 } })?;
            Ok((&cb::OPCODE_TABLE_CB, real, 2, None))
        }
        0xED => {
            let real = *rom
                .get(cursor + 1)
                .ok_or(DecodeFault { pc: fault_pc, kind: DecodeFaultKind::Truncated { need: 1, have: 0 } })?;
            Ok((&ed::OPCODE_TABLE_ED, real, 2, None))
        }
        _ => Ok((&main::OPCODE_TABLE, sub, 1, None)),
    }
}

fn index_table(ixreg: IndexReg) -> &'static OpcodeTable {
    match ixreg {
        IndexReg::Ix => &index::INDEX_TABLE_IX,
        IndexReg::Iy => &index::INDEX_TABLE_IY,
    }
}

fn index_cb_table(ixreg: IndexReg) -> &'static OpcodeTable {
    match ixreg {
        IndexReg::Ix => &index::INDEX_CB_TABLE_IX,
        IndexReg::Iy => &index::INDEX_CB_TABLE_IY,
    }
}

/// Reads whatever operand bytes `kind` calls for, starting right after
/// the opcode byte(s) already consumed. Returns `(value, target,
/// bytes_consumed)`; `target` is only meaningful for `Rel8`, and is the
/// *absolute* branch address (wrapped to 16 bits), computed once here
/// rather than left for the emitter to derive.
fn read_operand(
    rom: &[u8],
    operand_start: usize,
    current_pc: u16,
    prefix_len: usize,
    kind: OperandKind,
) -> Result<(i32, i32, usize), DecodeFault> {
    let fault_pc = current_pc;
    match kind {
        OperandKind::None => Ok((0, 0, 0)),
        OperandKind::Imm8 => {
            let b = read_u8(rom, operand_start, fault_pc)?;
            Ok((b as i32, 0, 1))
        }
        OperandKind::Disp8 => {
            let b = read_u8(rom, operand_start, fault_pc)?;
            Ok((b as i8 as i32, 0, 1))
        }
        OperandKind::Imm16 => {
            let lo = read_u8(rom, operand_start, fault_pc)?;
            let hi = read_u8(rom, operand_start + 1, fault_pc)?;
            Ok((((hi as i32) << 8) | lo as i32, 0, 2))
        }
        OperandKind::Rel8 => {
            let b = read_u8(rom, operand_start, fault_pc)?;
            let disp = b as i8 as i32;
            let instruction_len = (prefix_len + 1) as i64;
            let target = wrap_pc(current_pc as i64 + instruction_len + disp as i64) as i32;
            Ok((disp, target, 1))
        }
    }
}

fn read_u8(rom: &[u8], idx: usize, fault_pc: u16) -> Result<u8, DecodeFault> {
    rom.get(idx).copied().ok_or(DecodeFault {
        pc: fault_pc,
        kind: DecodeFaultKind::Truncated { need: 1, have: (rom.len().saturating_sub(idx)) as u8 },
    })
}
