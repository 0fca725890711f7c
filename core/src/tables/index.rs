//! `generate_index_table` — the `DD`/`FD` factory spec.md names
//! directly. Most opcodes behave exactly as their unprefixed
//! counterpart (the index prefix is simply ignored on real hardware);
//! this rebuilds the unprefixed entry for those and overrides only the
//! documented set of opcodes the prefix actually changes: anything that
//! names `HL`, `H`, `L`, or `(HL)` gets redirected to `IX`/`IY`,
//! `IXH`/`IYH`, `IXL`/`IYL`, or `(IX+d)`/`(IY+d)`.
//!
//! `generate_index_cb_table` is the analogous factory for `DDCB`/`FDCB`:
//! every slot operates on `(IX+d)`/`(IY+d)` regardless of the CB byte's
//! register field (the undocumented "also copy the result into a
//! register" behavior is not modeled — see DESIGN.md).

use crate::ir::assign;
use crate::ops::bit::{self, ShiftKind};
use crate::ops::{arith, load_store, IndexReg};
use crate::tables::{main, Control, Opcode, OpcodeTable, OperandKind};

fn plain_disp(mnemonic: &'static str, cycles: u8, emit: crate::ops::PendingEmitter) -> Opcode {
    Opcode { mnemonic, cycles, operand: OperandKind::Disp8, control: Control::Plain, emit }
}

fn plain_none(mnemonic: &'static str, cycles: u8, emit: crate::ops::PendingEmitter) -> Opcode {
    Opcode { mnemonic, cycles, operand: OperandKind::None, control: Control::Plain, emit }
}

fn r8name(idx: u8) -> Option<&'static str> {
    match idx & 0x07 {
        0 => Some("b"),
        1 => Some("c"),
        2 => Some("d"),
        3 => Some("e"),
        7 => Some("a"),
        _ => None, // 4 (H) / 5 (L) / 6 ((HL)) all redirect for the index table
    }
}

/// `decode` needs the four tables as `'static` data, not rebuilt per
/// call — `generate_index_table`/`generate_index_cb_table` take the
/// register family as a runtime argument, so unlike `OPCODE_TABLE`
/// there are two `LazyLock`s per factory, one per family, instead of
/// one.
pub static INDEX_TABLE_IX: std::sync::LazyLock<OpcodeTable> =
    std::sync::LazyLock::new(|| generate_index_table(IndexReg::Ix));
pub static INDEX_TABLE_IY: std::sync::LazyLock<OpcodeTable> =
    std::sync::LazyLock::new(|| generate_index_table(IndexReg::Iy));
pub static INDEX_CB_TABLE_IX: std::sync::LazyLock<OpcodeTable> =
    std::sync::LazyLock::new(|| generate_index_cb_table(IndexReg::Ix));
pub static INDEX_CB_TABLE_IY: std::sync::LazyLock<OpcodeTable> =
    std::sync::LazyLock::new(|| generate_index_cb_table(IndexReg::Iy));

pub fn generate_index_table(ixreg: IndexReg) -> OpcodeTable {
    std::array::from_fn(|i| build(i as u8, ixreg))
}

fn build(op: u8, ixreg: IndexReg) -> Opcode {
    match op {
        0x09 => plain_none("ADD IX,BC", 15, arith::add_index(ixreg, crate::ops::get_pair_call("b", "c"))),
        0x19 => plain_none("ADD IX,DE", 15, arith::add_index(ixreg, crate::ops::get_pair_call("d", "e"))),
        0x29 => plain_none("ADD IX,IX", 15, arith::add_index(ixreg, ixreg.getter())),
        0x39 => plain_none("ADD IX,SP", 15, arith::add_index(ixreg, crate::ir::ident("sp"))),

        0x21 => Opcode { mnemonic: "LD IX,nn", cycles: 14, operand: OperandKind::Imm16, control: Control::Plain, emit: ld_index_imm16(ixreg) },
        0x22 => Opcode { mnemonic: "LD (nn),IX", cycles: 20, operand: OperandKind::Imm16, control: Control::Plain, emit: ld_write_mem_abs_index(ixreg) },
        0x2A => Opcode { mnemonic: "LD IX,(nn)", cycles: 20, operand: OperandKind::Imm16, control: Control::Plain, emit: ld_index_imm16_ind(ixreg) },
        0x23 => plain_none("INC IX", 10, inc_index(ixreg)),
        0x2B => plain_none("DEC IX", 10, dec_index(ixreg)),

        0x24 => plain_none("INC IXH", 8, inc_half(ixreg, true)),
        0x25 => plain_none("DEC IXH", 8, dec_half(ixreg, true)),
        0x26 => Opcode { mnemonic: "LD IXH,n", cycles: 11, operand: OperandKind::Imm8, control: Control::Plain, emit: ld_half_imm(ixreg, true) },
        0x2C => plain_none("INC IXL", 8, inc_half(ixreg, false)),
        0x2D => plain_none("DEC IXL", 8, dec_half(ixreg, false)),
        0x2E => Opcode { mnemonic: "LD IXL,n", cycles: 11, operand: OperandKind::Imm8, control: Control::Plain, emit: ld_half_imm(ixreg, false) },

        0x34 => plain_disp("INC (IX+d)", 23, arith::inc_x(ixreg)),
        0x35 => plain_disp("DEC (IX+d)", 23, arith::dec_x(ixreg)),
        0x36 => crate::tables::unimplemented("LD (IX+d),n"),

        // Source quirk preserved verbatim (spec.md §9 Open Questions):
        // this slot is HALT in the unprefixed table, but the index-table
        // factory labels it "LD (IX+d),B" and builds it from the same
        // store-builder `ld_x` uses for genuine `LD (IX+d),r` — not from
        // `halt()`. Not "corrected" here; flagged for review only.
        0x76 => plain_disp("LD (IX+d),B", 19, load_store::ld_x("b", ixreg)),

        0x46 => plain_disp("LD B,(IX+d)", 19, load_store::ld8_d("b", ixreg)),
        0x4E => plain_disp("LD C,(IX+d)", 19, load_store::ld8_d("c", ixreg)),
        0x56 => plain_disp("LD D,(IX+d)", 19, load_store::ld8_d("d", ixreg)),
        0x5E => plain_disp("LD E,(IX+d)", 19, load_store::ld8_d("e", ixreg)),
        0x66 => plain_disp("LD H,(IX+d)", 19, load_store::ld8_d("h", ixreg)),
        0x6E => plain_disp("LD L,(IX+d)", 19, load_store::ld8_d("l", ixreg)),
        0x7E => plain_disp("LD A,(IX+d)", 19, load_store::ld8_d("a", ixreg)),

        0x70 => plain_disp("LD (IX+d),B", 19, load_store::ld_x("b", ixreg)),
        0x71 => plain_disp("LD (IX+d),C", 19, load_store::ld_x("c", ixreg)),
        0x72 => plain_disp("LD (IX+d),D", 19, load_store::ld_x("d", ixreg)),
        0x73 => plain_disp("LD (IX+d),E", 19, load_store::ld_x("e", ixreg)),
        0x74 => plain_disp("LD (IX+d),H", 19, load_store::ld_x("h", ixreg)),
        0x75 => plain_disp("LD (IX+d),L", 19, load_store::ld_x("l", ixreg)),
        0x77 => plain_disp("LD (IX+d),A", 19, load_store::ld_x("a", ixreg)),

        0x86 => plain_disp("ADD A,(IX+d)", 19, arith::add_x(ixreg)),
        0x8E => plain_disp("ADC A,(IX+d)", 19, arith::adc_x(ixreg)),
        0x96 => plain_disp("SUB (IX+d)", 19, arith::sub_x(ixreg)),
        0x9E => plain_disp("SBC A,(IX+d)", 19, arith::sbc_x(ixreg)),
        0xA6 => plain_disp("AND (IX+d)", 19, arith::and_x(ixreg)),
        0xAE => plain_disp("XOR (IX+d)", 19, arith::xor_x(ixreg)),
        0xB6 => plain_disp("OR (IX+d)", 19, arith::or_x(ixreg)),
        0xBE => plain_disp("CP (IX+d)", 19, arith::cp_x(ixreg)),

        0x44 | 0x4C | 0x54 | 0x5C | 0x7C => plain_none("LD r,IXH", 8, ld_reg_from_half(dst_of(op), ixreg, true)),
        0x45 | 0x4D | 0x55 | 0x5D | 0x7D => plain_none("LD r,IXL", 8, ld_reg_from_half(dst_of(op), ixreg, false)),

        0x60..=0x67 if op != 0x66 => plain_none("LD IXH,r", 8, ld_half_from_src(ixreg, true, op)),
        0x68..=0x6F if op != 0x6E => plain_none("LD IXL,r", 8, ld_half_from_src(ixreg, false, op)),

        0x84 => plain_none("ADD A,IXH", 8, arith::add_node(ixreg.half_hi())),
        0x85 => plain_none("ADD A,IXL", 8, arith::add_node(ixreg.half_lo())),
        0x8C => plain_none("ADC A,IXH", 8, arith::adc_node(ixreg.half_hi())),
        0x8D => plain_none("ADC A,IXL", 8, arith::adc_node(ixreg.half_lo())),
        0x94 => plain_none("SUB IXH", 8, arith::sub_node(ixreg.half_hi())),
        0x95 => plain_none("SUB IXL", 8, arith::sub_node(ixreg.half_lo())),
        0x9C => plain_none("SBC A,IXH", 8, arith::sbc_node(ixreg.half_hi())),
        0x9D => plain_none("SBC A,IXL", 8, arith::sbc_node(ixreg.half_lo())),
        0xA4 => plain_none("AND IXH", 8, arith::and_node(ixreg.half_hi())),
        0xA5 => plain_none("AND IXL", 8, arith::and_node(ixreg.half_lo())),
        0xAC => plain_none("XOR IXH", 8, arith::xor_node(ixreg.half_hi())),
        0xAD => plain_none("XOR IXL", 8, arith::xor_node(ixreg.half_lo())),
        0xB4 => plain_none("OR IXH", 8, arith::or_node(ixreg.half_hi())),
        0xB5 => plain_none("OR IXL", 8, arith::or_node(ixreg.half_lo())),
        0xBC => plain_none("CP IXH", 8, arith::cp_node(ixreg.half_hi())),
        0xBD => plain_none("CP IXL", 8, arith::cp_node(ixreg.half_lo())),

        0xE1 => Opcode { mnemonic: "POP IX", cycles: 14, operand: OperandKind::None, control: Control::Plain, emit: crate::ops::stack::pop_index(ixreg) },
        0xE5 => Opcode { mnemonic: "PUSH IX", cycles: 15, operand: OperandKind::None, control: Control::Plain, emit: crate::ops::stack::push_index(ixreg) },
        0xE3 => plain_none("EX (SP),IX", 23, load_store::ex_sp_x(ixreg)),
        0xE9 => Opcode { mnemonic: "JP (IX)", cycles: 8, operand: OperandKind::None, control: Control::JpUnconditional, emit: crate::ops::branch::jp_x(ixreg) },
        0xF9 => plain_none("LD SP,IX", 10, load_store::ld_sp_ix(ixreg)),

        _ => main::build(op),
    }
}

fn dst_of(op: u8) -> &'static str {
    r8name((op >> 3) & 0x07).expect("caller only passes bytes whose destination field is b/c/d/e/a")
}

fn ld_index_imm16(ixreg: IndexReg) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |ctx| vec![crate::ir::expr_stmt(ixreg.setter(crate::ir::literal(ctx.value)))])
}

fn ld_index_imm16_ind(ixreg: IndexReg) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |ctx| {
        vec![crate::ir::expr_stmt(ixreg.setter(crate::ops::read_mem16(crate::ir::literal(ctx.value))))]
    })
}

fn ld_write_mem_abs_index(ixreg: IndexReg) -> crate::ops::PendingEmitter {
    use crate::ir::{binary, literal, BinOp};
    crate::ops::emitter(move |ctx| {
        let addr = literal(ctx.value);
        let addr_plus_1 = binary(BinOp::Add, literal(ctx.value), literal(1));
        vec![
            crate::ir::expr_stmt(crate::ops::write_mem(addr, ixreg.half_lo())),
            crate::ir::expr_stmt(crate::ops::write_mem(addr_plus_1, ixreg.half_hi())),
        ]
    })
}

fn inc_index(ixreg: IndexReg) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |_ctx| vec![crate::ir::expr_stmt(ixreg.setter(crate::ir::call(format!("inc{}", ixreg.name()), [])))])
}

fn dec_index(ixreg: IndexReg) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |_ctx| vec![crate::ir::expr_stmt(ixreg.setter(crate::ir::call(format!("dec{}", ixreg.name()), [])))])
}

fn inc_half(ixreg: IndexReg, high: bool) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |_ctx| {
        let (getter, setter): (crate::ir::Node, fn(IndexReg, crate::ir::Node) -> crate::ir::Node) =
            if high { (ixreg.half_hi(), IndexReg::half_hi_setter) } else { (ixreg.half_lo(), IndexReg::half_lo_setter) };
        vec![crate::ir::expr_stmt(setter(ixreg, crate::ir::call("inc8", [getter])))]
    })
}

fn dec_half(ixreg: IndexReg, high: bool) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |_ctx| {
        let (getter, setter): (crate::ir::Node, fn(IndexReg, crate::ir::Node) -> crate::ir::Node) =
            if high { (ixreg.half_hi(), IndexReg::half_hi_setter) } else { (ixreg.half_lo(), IndexReg::half_lo_setter) };
        vec![crate::ir::expr_stmt(setter(ixreg, crate::ir::call("dec8", [getter])))]
    })
}

fn ld_half_imm(ixreg: IndexReg, high: bool) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |ctx| {
        let target = if high { ixreg.half_hi_setter(crate::ir::literal(ctx.value)) } else { ixreg.half_lo_setter(crate::ir::literal(ctx.value)) };
        vec![crate::ir::expr_stmt(target)]
    })
}

fn ld_reg_from_half(dst: &'static str, ixreg: IndexReg, high: bool) -> crate::ops::PendingEmitter {
    crate::ops::emitter(move |_ctx| {
        let src = if high { ixreg.half_hi() } else { ixreg.half_lo() };
        vec![crate::ir::expr_stmt(assign(crate::ir::AssignOp::Assign, crate::ir::reg(dst), src))]
    })
}

/// `LD IXH,r`/`LD IXL,r` for `op`'s low 3 bits, including the
/// `IXH,IXH`/`IXH,IXL`/`IXL,IXH`/`IXL,IXL` self-referencing forms.
fn ld_half_from_src(ixreg: IndexReg, high: bool, op: u8) -> crate::ops::PendingEmitter {
    let z = op & 0x07;
    crate::ops::emitter(move |_ctx| {
        let src = match z {
            0 => crate::ir::reg("b"),
            1 => crate::ir::reg("c"),
            2 => crate::ir::reg("d"),
            3 => crate::ir::reg("e"),
            4 => ixreg.half_hi(),
            5 => ixreg.half_lo(),
            7 => crate::ir::reg("a"),
            _ => unreachable!("z=6 is (HL)/(IX+d), handled by a separate table slot"),
        };
        let target = if high { ixreg.half_hi_setter(src) } else { ixreg.half_lo_setter(src) };
        vec![crate::ir::expr_stmt(target)]
    })
}

/// `generate_index_cb_table` — `DDCB`/`FDCB`: every slot works on
/// `(IX+d)`/`(IY+d)` via the displacement `decode` reads into
/// `EmitCtx.value` before consulting this table, regardless of the CB
/// byte's own register field.
pub fn generate_index_cb_table(ixreg: IndexReg) -> OpcodeTable {
    std::array::from_fn(|i| build_cb(i as u8, ixreg))
}

fn build_cb(op: u8, ixreg: IndexReg) -> Opcode {
    let group = (op >> 6) & 0x03;
    let mid = (op >> 3) & 0x07;
    match group {
        0 => {
            let kind = shift_kind(mid);
            plain_disp("shift (IX+d)", 23, bit::shift_indexed(kind, ixreg))
        }
        1 => plain_disp("BIT b,(IX+d)", 20, bit::bit_indexed(mid, ixreg)),
        2 => plain_disp("RES b,(IX+d)", 23, bit::res_indexed(mid, ixreg)),
        3 => plain_disp("SET b,(IX+d)", 23, bit::set_indexed(mid, ixreg)),
        _ => unreachable!(),
    }
}

fn shift_kind(idx: u8) -> ShiftKind {
    match idx & 0x07 {
        0 => ShiftKind::Rlc,
        1 => ShiftKind::Rrc,
        2 => ShiftKind::Rl,
        3 => ShiftKind::Rr,
        4 => ShiftKind::Sla,
        5 => ShiftKind::Sra,
        6 => ShiftKind::Sll,
        7 => ShiftKind::Srl,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_256_slots() {
        assert_eq!(generate_index_table(IndexReg::Ix).len(), 256);
        assert_eq!(generate_index_cb_table(IndexReg::Iy).len(), 256);
    }

    #[test]
    fn non_index_sensitive_bytes_delegate_to_the_main_table() {
        let table = generate_index_table(IndexReg::Ix);
        assert_eq!(table[0x00].mnemonic, "NOP");
        assert_eq!(table[0xC3].mnemonic, "JP nn");
    }

    #[test]
    fn inc_ix_overrides_the_hl_form() {
        let table = generate_index_table(IndexReg::Ix);
        assert_eq!(table[0x23].mnemonic, "INC IX");
        assert_eq!(table[0x23].operand, OperandKind::None);
    }

    #[test]
    fn opcode_0x76_preserves_the_source_quirk_instead_of_halt() {
        // Unprefixed 0x76 is HALT; the index-table factory's own slot is
        // documented (spec.md §9) as mislabeled "LD (IX+d),B" built from
        // the store combinator, not from `halt()`. Preserved verbatim.
        let table = generate_index_table(IndexReg::Ix);
        assert_eq!(table[0x76].mnemonic, "LD (IX+d),B");
        assert_eq!(table[0x76].operand, OperandKind::Disp8);
        assert_eq!(table[0x76].control, Control::Plain);
    }

    #[test]
    fn ld_ix_plus_d_n_is_left_unimplemented() {
        let table = generate_index_table(IndexReg::Iy);
        assert_eq!(table[0x36].mnemonic, "LD (IX+d),n");
        assert!(table[0x36].control.terminates_block());
    }

    #[test]
    fn indexed_cb_bit_uses_disp8_operand() {
        let table = generate_index_cb_table(IndexReg::Ix);
        assert_eq!(table[0x46].operand, OperandKind::Disp8); // BIT 0,(IX+d)
    }
}
