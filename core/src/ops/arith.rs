//! `INC8`/`DEC8`, `INC16`/`DEC16`, `ADD16`, and the accumulator ALU group
//! `ADD`/`SUB`/`AND`/`OR`/`XOR`/`ADC`/`SBC`/`CP`, plus their `(IX+d)`/
//! `(IY+d)`-indexed and `(HL)`-indirect counterparts.
//!
//! `ADC`/`SBC`/`CP` and the `(HL)`/`(IX+d)`/`(IY+d)`-indirect forms are
//! not in spec.md's combinator table — they are the supplemented
//! instruction classes from SPEC_FULL.md §4/§9, ported in the same
//! shape as the documented `ADD`/`SUB` combinators.

use crate::ir::{assign, binary, call, expr_stmt, literal, reg, AssignOp, BinOp, Node};
use crate::ops::{emitter, get_pair_call, index_addr, read_mem8, set_pair_call, szp_lookup, write_mem, EmitCtx, IndexReg, PendingEmitter};
use crate::flags::F_HALFCARRY;

/// `INC8(r)` — `r = inc8(r)`.
pub fn inc8(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::Assign, reg(r), call("inc8", [reg(r)])))])
}

/// `DEC8(r)` — `r = dec8(r)`.
pub fn dec8(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::Assign, reg(r), call("dec8", [reg(r)])))])
}

/// `INC (HL)`/`INC (IX+d)`/`INC (IY+d)` — supplemented indirect form:
/// read-modify-write through `inc8`, since there is no register to
/// assign into directly.
pub fn inc_mem(addr: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, crate::ir::ident("__tmp"), read_mem8(addr.clone()))),
            expr_stmt(write_mem(addr.clone(), call("inc8", [crate::ir::ident("__tmp")]))),
        ]
    })
}

/// `DEC (HL)`/`DEC (IX+d)`/`DEC (IY+d)` — supplemented indirect form.
pub fn dec_mem(addr: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, crate::ir::ident("__tmp"), read_mem8(addr.clone()))),
            expr_stmt(write_mem(addr.clone(), call("dec8", [crate::ir::ident("__tmp")]))),
        ]
    })
}

/// `INC_X(ixreg)`/`DEC_X(ixreg)` — indexed inc/dec on `(IX+d)`/`(IY+d)`.
pub fn inc_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| inc_mem(index_addr(ixreg, ctx.value))(ctx))
}

pub fn dec_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| dec_mem(index_addr(ixreg, ctx.value))(ctx))
}

/// `INC16(hi, lo)` — `inc<HI LO>()`.
pub fn inc16(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call(format!("inc{}{}", hi.to_uppercase(), lo.to_uppercase()), []))])
}

/// `DEC16(hi, lo)` — `dec<HI LO>()`.
pub fn dec16(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call(format!("dec{}{}", hi.to_uppercase(), lo.to_uppercase()), []))])
}

/// `ADD IX,rr`/`ADD IX,IX`/`ADD IX,SP` — `setIX(add16(getIX(), source))`.
/// `source` is whatever `get<PAIR>()`/`getIX()`/`sp` the right-hand side
/// resolves to; unlike the plain `rp` table `IX`'s own pair isn't
/// addressed through `get<HI LO>`, so this takes the source as a `Node`
/// instead of a `(hi, lo)` name pair.
pub fn add_index(ixreg: IndexReg, source: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![expr_stmt(ixreg.setter(call("add16", [ixreg.getter(), source.clone()])))]
    })
}

/// `ADD16(dh,dl,sh,sl)` — `set<DH DL>(add16(get<DH DL>(), get<SH SL>()))`.
pub fn add16(dh: &'static str, dl: &'static str, sh: &'static str, sl: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        let sum = call("add16", [get_pair_call(dh, dl), get_pair_call(sh, sl)]);
        vec![expr_stmt(set_pair_call(dh, dl, sum))]
    })
}

/// `ADC HL,rr`/`SBC HL,rr` — supplemented 16-bit carry ALU, same shape
/// as `ADD16` but routed through `adc16`/`sbc16` so the host can apply
/// full Z80 16-bit flag behavior (H/N/C/PV/S/Z), which plain `add16`
/// does not model.
pub fn adc16(dh: &'static str, dl: &'static str, sh: &'static str, sl: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        let sum = call("adc16", [get_pair_call(dh, dl), get_pair_call(sh, sl)]);
        vec![expr_stmt(set_pair_call(dh, dl, sum))]
    })
}

pub fn sbc16(dh: &'static str, dl: &'static str, sh: &'static str, sl: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        let diff = call("sbc16", [get_pair_call(dh, dl), get_pair_call(sh, sl)]);
        vec![expr_stmt(set_pair_call(dh, dl, diff))]
    })
}

/// `INC SP`/`DEC SP` — `sp` is a plain variable, not a register pair
/// behind `get<PAIR>`/`set<PAIR>`, so these two don't route through
/// `inc16`/`dec16`'s host-call convention.
pub fn inc_sp() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::AddAssign, crate::ir::ident("sp"), literal(1)))])
}

pub fn dec_sp() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::SubAssign, crate::ir::ident("sp"), literal(1)))])
}

/// `ADD HL,SP` — `setHL(add16(getHL(), sp))`.
pub fn add_hl_sp() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        let sum = call("add16", [get_pair_call("h", "l"), crate::ir::ident("sp")]);
        vec![expr_stmt(set_pair_call("h", "l", sum))]
    })
}

/// `ADC HL,SP` — supplemented, through `adc16`.
pub fn adc_hl_sp() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        let sum = call("adc16", [get_pair_call("h", "l"), crate::ir::ident("sp")]);
        vec![expr_stmt(set_pair_call("h", "l", sum))]
    })
}

/// `SBC HL,SP` — supplemented, through `sbc16`.
pub fn sbc_hl_sp() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        let diff = call("sbc16", [get_pair_call("h", "l"), crate::ir::ident("sp")]);
        vec![expr_stmt(set_pair_call("h", "l", diff))]
    })
}

/// `ADD(r)` — `add_a(r)`.
pub fn add_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("add_a", [reg(r)]))])
}

/// `ADD()` — imm8: `add_a(value)`.
pub fn add_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![expr_stmt(call("add_a", [literal(ctx.value)]))])
}

/// `ADD(hi, lo)` — `add_a(readMem(get<HI LO>()))`.
pub fn add_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("add_a", [read_mem8(get_pair_call(hi, lo))]))])
}

/// `ADD_X(ixreg)` — `add_a(readMem(getIX()+d))`.
pub fn add_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| vec![expr_stmt(call("add_a", [read_mem8(index_addr(ixreg, ctx.value))]))])
}

/// `ADD A,IXH`/`ADD A,IXL`/`ADD A,IYH`/`ADD A,IYL` — the undocumented
/// half-index-register ALU operand, built from an arbitrary `Node`
/// rather than a register name since `IXH`/`IXL` are host calls, not
/// `Register` nodes.
pub fn add_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("add_a", [val.clone()]))])
}

pub fn adc_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("adc_a", [val.clone()]))])
}

pub fn sub_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("sub_a", [val.clone()]))])
}

pub fn sbc_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("sbc_a", [val.clone()]))])
}

pub fn and_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| and_body(false, Some(val.clone())))
}

pub fn or_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| or_body(false, Some(val.clone())))
}

pub fn xor_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| xor_body(val.clone()))
}

pub fn cp_node(val: Node) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("cp_a", [val.clone()]))])
}

/// `SUB(r)` — `sub_a(r)`.
pub fn sub_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("sub_a", [reg(r)]))])
}

/// `SUB()` — imm8: `sub_a(value)`.
pub fn sub_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![expr_stmt(call("sub_a", [literal(ctx.value)]))])
}

pub fn sub_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("sub_a", [read_mem8(get_pair_call(hi, lo))]))])
}

/// `ADC(r)`/`ADC()`/`ADC(hi,lo)` — supplemented, same shapes as `ADD`
/// through `adc_a`.
pub fn adc_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("adc_a", [reg(r)]))])
}

pub fn adc_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![expr_stmt(call("adc_a", [literal(ctx.value)]))])
}

pub fn adc_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("adc_a", [read_mem8(get_pair_call(hi, lo))]))])
}

/// `SBC(r)`/`SBC()`/`SBC(hi,lo)` — supplemented, through `sbc_a`.
pub fn sbc_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("sbc_a", [reg(r)]))])
}

pub fn sbc_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![expr_stmt(call("sbc_a", [literal(ctx.value)]))])
}

pub fn sbc_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("sbc_a", [read_mem8(get_pair_call(hi, lo))]))])
}

/// `AND(r)` — `a &= r; f = SZP_TABLE[a] | F_HALFCARRY`, collapsed to
/// flag-only when `r == 'a'` (ANDing A with itself never changes `a`).
pub fn and_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| and_body(r == "a", Some(reg(r))))
}

/// `AND()` — imm8: `a &= value; f = SZP_TABLE[a] | F_HALFCARRY`.
pub fn and_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| and_body(false, Some(literal(ctx.value))))
}

pub fn and_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| and_body(false, Some(read_mem8(get_pair_call(hi, lo)))))
}

pub fn and_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| and_body(false, Some(read_mem8(index_addr(ixreg, ctx.value)))))
}

fn and_body(collapse: bool, operand: Option<Node>) -> Vec<Node> {
    let mut body = Vec::new();
    if !collapse {
        if let Some(val) = operand {
            body.push(expr_stmt(assign(AssignOp::AndAssign, reg("a"), val)));
        }
    }
    body.push(expr_stmt(assign(
        AssignOp::Assign,
        crate::ir::ident("f"),
        binary(BinOp::Or, szp_lookup(reg("a")), literal(F_HALFCARRY)),
    )));
    body
}

/// `OR(r)` — `a |= r; f = SZP_TABLE[a]`, collapsed to flag-only when
/// `r == 'a'`.
pub fn or_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| or_body(r == "a", Some(reg(r))))
}

pub fn or_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| or_body(false, Some(literal(ctx.value))))
}

pub fn or_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| or_body(false, Some(read_mem8(get_pair_call(hi, lo)))))
}

/// `OR_X(ixreg)` — `a |= readMem(getIX()+d); f = SZP_TABLE[a]`.
pub fn or_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| or_body(false, Some(read_mem8(index_addr(ixreg, ctx.value)))))
}

fn or_body(collapse: bool, operand: Option<Node>) -> Vec<Node> {
    let mut body = Vec::new();
    if !collapse {
        if let Some(val) = operand {
            body.push(expr_stmt(assign(AssignOp::OrAssign, reg("a"), val)));
        }
    }
    body.push(expr_stmt(assign(
        AssignOp::Assign,
        crate::ir::ident("f"),
        szp_lookup(reg("a")),
    )));
    body
}

/// `XOR(r)` — `a ^= r; f = SZP_TABLE[a]`; for `r == 'a'` this collapses
/// to the literal `a = 0; f = SZP_TABLE[0]` (the source already inlines
/// the literal here rather than emitting `a ^= a`).
pub fn xor_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        if r == "a" {
            vec![
                expr_stmt(assign(AssignOp::Assign, reg("a"), literal(0))),
                expr_stmt(assign(AssignOp::Assign, crate::ir::ident("f"), literal(crate::flags::SZP_TABLE[0] as i32))),
            ]
        } else {
            xor_body(reg(r))
        }
    })
}

/// `XOR()` — imm8: `a ^= value; f = SZP_TABLE[a]`.
pub fn xor_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| xor_body(literal(ctx.value)))
}

pub fn xor_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| xor_body(read_mem8(get_pair_call(hi, lo))))
}

fn xor_body(operand: Node) -> Vec<Node> {
    vec![
        expr_stmt(assign(AssignOp::XorAssign, reg("a"), operand)),
        expr_stmt(assign(AssignOp::Assign, crate::ir::ident("f"), szp_lookup(reg("a")))),
    ]
}

/// `CP(r)`/`CP()`/`CP(hi,lo)` — supplemented, compare-only ALU through
/// `cp_a` (flags only, `a` unchanged).
pub fn cp_reg(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("cp_a", [reg(r)]))])
}

pub fn cp_imm() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![expr_stmt(call("cp_a", [literal(ctx.value)]))])
}

pub fn cp_mem_pair(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("cp_a", [read_mem8(get_pair_call(hi, lo))]))])
}

/// `CP_X(ixreg)` — `cp_a(readMem(getIX()+d))`.
pub fn cp_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| vec![expr_stmt(call("cp_a", [read_mem8(index_addr(ixreg, ctx.value))]))])
}

/// `SUB(IX+d)`/`ADC(IX+d)`/`SBC(IX+d)`/`XOR(IX+d)` — the remaining
/// indexed-memory ALU forms, same shape as `ADD_X`/`CP_X`.
pub fn sub_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| vec![expr_stmt(call("sub_a", [read_mem8(index_addr(ixreg, ctx.value))]))])
}

pub fn adc_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| vec![expr_stmt(call("adc_a", [read_mem8(index_addr(ixreg, ctx.value))]))])
}

pub fn sbc_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| vec![expr_stmt(call("sbc_a", [read_mem8(index_addr(ixreg, ctx.value))]))])
}

pub fn xor_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| xor_body(read_mem8(index_addr(ixreg, ctx.value))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_a_collapses_to_literal_zero() {
        let emit = xor_reg("a");
        let ir = emit(EmitCtx::default());
        assert_eq!(
            ir,
            vec![
                expr_stmt(assign(AssignOp::Assign, reg("a"), literal(0))),
                expr_stmt(assign(AssignOp::Assign, crate::ir::ident("f"), literal(crate::flags::SZP_TABLE[0] as i32))),
            ]
        );
    }

    #[test]
    fn xor_b_uses_a_register() {
        let emit = xor_reg("b");
        let ir = emit(EmitCtx::default());
        assert_eq!(
            ir,
            vec![
                expr_stmt(assign(AssignOp::XorAssign, reg("a"), reg("b"))),
                expr_stmt(assign(AssignOp::Assign, crate::ir::ident("f"), szp_lookup(reg("a")))),
            ]
        );
    }

    #[test]
    fn and_a_collapses_to_flag_only() {
        let emit = and_reg("a");
        let ir = emit(EmitCtx::default());
        assert_eq!(ir.len(), 1);
    }

    #[test]
    fn or_b_sets_flag_without_halfcarry() {
        let emit = or_reg("b");
        let ir = emit(EmitCtx::default());
        assert_eq!(
            ir,
            vec![
                expr_stmt(assign(AssignOp::OrAssign, reg("a"), reg("b"))),
                expr_stmt(assign(AssignOp::Assign, crate::ir::ident("f"), szp_lookup(reg("a")))),
            ]
        );
    }
}
