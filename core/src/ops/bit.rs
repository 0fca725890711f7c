//! The `CB`-prefixed bit-manipulation group: register/`(HL)`/`(IX+d)`/
//! `(IY+d)` rotate-and-shift (`RLC`/`RRC`/`RL`/`RR`/`SLA`/`SRA`/`SLL`/
//! `SRL`), `BIT b,r`, `RES b,r`, `SET b,r`. Entirely supplemented —
//! spec.md names `opcodeTableCB` as one of the three tables Testable
//! Property 1 requires fully populated, but its combinator table in
//! §4.2 does not enumerate CB's own builders.

use crate::ir::{assign, binary, call, expr_stmt, literal, reg, AssignOp, BinOp, Node};
use crate::ops::{emitter, index_addr, read_mem8, write_mem, EmitCtx, IndexReg, PendingEmitter};

/// The eight `CB` rotate/shift kinds, keyed the way the opcode byte's
/// bits 5-3 select them (`RLC=0 .. SRL=7`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftKind {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Sll,
    Srl,
}

impl ShiftKind {
    fn host_fn(self) -> &'static str {
        match self {
            ShiftKind::Rlc => "rlc8",
            ShiftKind::Rrc => "rrc8",
            ShiftKind::Rl => "rl8",
            ShiftKind::Rr => "rr8",
            ShiftKind::Sla => "sla8",
            ShiftKind::Sra => "sra8",
            ShiftKind::Sll => "sll8",
            ShiftKind::Srl => "srl8",
        }
    }
}

/// `<KIND> r` — `r = <kind>8(r)`. The host helper applies the shift and
/// sets S/Z/PV/H/N/C itself, the same `value in, value out, flags as a
/// side effect` convention `inc8`/`dec8` already use.
pub fn shift_reg(kind: ShiftKind, r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::Assign, reg(r), call(kind.host_fn(), [reg(r)])))])
}

/// `<KIND> (HL)` / indexed forms — read-modify-write through the same
/// host helper.
pub fn shift_mem(kind: ShiftKind, addr: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![expr_stmt(write_mem(addr.clone(), call(kind.host_fn(), [read_mem8(addr.clone())])))]
    })
}

/// `BIT b,r` — `bitTest(b, r)`, a single side-effecting call (sets Z
/// from the tested bit, H, clears N; S/PV are undocumented per-bit
/// copies the host helper is responsible for).
pub fn bit_reg(bit: u8, r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("bitTest", [literal(bit as i32), reg(r)]))])
}

/// `BIT b,(HL)` / indexed forms.
pub fn bit_mem(bit: u8, addr: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("bitTest", [literal(bit as i32), read_mem8(addr.clone())]))])
}

/// `RES b,r` — `r = r & ~(1 << b)`. Flags are unaffected by `RES`/`SET`
/// on real Z80 hardware, so this is plain bit arithmetic, not a host
/// call.
pub fn res_reg(bit: u8, r: &'static str) -> PendingEmitter {
    let mask = !(1i32 << bit) & 0xFF;
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::AndAssign, reg(r), literal(mask)))])
}

pub fn res_mem(bit: u8, addr: Node) -> PendingEmitter {
    let mask = !(1i32 << bit) & 0xFF;
    emitter(move |_ctx: EmitCtx| {
        vec![expr_stmt(write_mem(
            addr.clone(),
            binary(BinOp::And, read_mem8(addr.clone()), literal(mask)),
        ))]
    })
}

/// `SET b,r` — `r = r | (1 << b)`.
pub fn set_reg(bit: u8, r: &'static str) -> PendingEmitter {
    let mask = 1i32 << bit;
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::OrAssign, reg(r), literal(mask)))])
}

pub fn set_mem(bit: u8, addr: Node) -> PendingEmitter {
    let mask = 1i32 << bit;
    emitter(move |_ctx: EmitCtx| {
        vec![expr_stmt(write_mem(
            addr.clone(),
            binary(BinOp::Or, read_mem8(addr.clone()), literal(mask)),
        ))]
    })
}

/// The `DDCB`/`FDCB`-indexed counterparts: the displacement arrives as
/// `ctx.value`, read by `decode` before it consults this table's CB
/// byte, so the effective address has to be built at invocation time
/// rather than baked in at table-construction time like the plain `CB`
/// table's `(HL)` forms.
pub fn shift_indexed(kind: ShiftKind, ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| shift_mem(kind, index_addr(ixreg, ctx.value))(ctx))
}

pub fn bit_indexed(bit: u8, ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| bit_mem(bit, index_addr(ixreg, ctx.value))(ctx))
}

pub fn res_indexed(bit: u8, ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| res_mem(bit, index_addr(ixreg, ctx.value))(ctx))
}

pub fn set_indexed(bit: u8, ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| set_mem(bit, index_addr(ixreg, ctx.value))(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn res_bit0_masks_out_the_low_bit() {
        let emit = res_reg(0, "a");
        let ir = emit(EmitCtx::default());
        assert_eq!(ir, vec![expr_stmt(assign(AssignOp::AndAssign, reg("a"), literal(!1i32 & 0xFF)))]);
    }

    #[test]
    fn set_bit7_ors_in_the_high_bit() {
        let emit = set_reg(7, "a");
        let ir = emit(EmitCtx::default());
        assert_eq!(ir, vec![expr_stmt(assign(AssignOp::OrAssign, reg("a"), literal(0x80)))]);
    }

    #[test]
    fn shift_reg_routes_through_host_helper() {
        let emit = shift_reg(ShiftKind::Rlc, "b");
        let ir = emit(EmitCtx::default());
        assert_eq!(ir, vec![expr_stmt(assign(AssignOp::Assign, reg("b"), call("rlc8", [reg("b")])))]);
    }
}
