//! `OPCODE_TABLE` — the unprefixed opcode map. Built by bit-pattern
//! dispatch over the byte, the same `op if (op & MASK) == PATTERN`
//! idiom the teacher's `execute_instruction` uses, rather than 256
//! hand-written literal entries.

use std::sync::LazyLock;

use crate::ir::{literal, BinOp};
use crate::ops::{arith, branch, load_store, misc, stack};
use crate::tables::{undefined, Control, Opcode, OpcodeTable, OperandKind};

pub static OPCODE_TABLE: LazyLock<OpcodeTable> = LazyLock::new(|| std::array::from_fn(build));

fn r8name(idx: u8) -> Option<&'static str> {
    match idx & 0x07 {
        0 => Some("b"),
        1 => Some("c"),
        2 => Some("d"),
        3 => Some("e"),
        4 => Some("h"),
        5 => Some("l"),
        6 => None,
        7 => Some("a"),
        _ => unreachable!(),
    }
}

/// The three general-purpose pairs `rp` selects in `LD rp,nn`/`INC
/// rp`/`DEC rp`/`ADD HL,rp` for index 0..2; index 3 (`SP`) is handled at
/// each call site since `sp` isn't addressed through `get<PAIR>`.
fn rp_pair(idx: u8) -> (&'static str, &'static str) {
    match idx & 0x03 {
        0 => ("b", "c"),
        1 => ("d", "e"),
        2 => ("h", "l"),
        _ => unreachable!("SP has no get/set pair combinator"),
    }
}

fn rp2_pair(idx: u8) -> (&'static str, &'static str) {
    match idx & 0x03 {
        0 => ("b", "c"),
        1 => ("d", "e"),
        2 => ("h", "l"),
        3 => ("a", "f"),
        _ => unreachable!(),
    }
}

fn cc(idx: u8) -> (BinOp, i32) {
    use crate::flags::{F_CARRY, F_PARITY, F_SIGN, F_ZERO};
    match idx & 0x07 {
        0 => (BinOp::Eq, F_ZERO),   // NZ
        1 => (BinOp::Ne, F_ZERO),   // Z
        2 => (BinOp::Eq, F_CARRY),  // NC
        3 => (BinOp::Ne, F_CARRY),  // C
        4 => (BinOp::Eq, F_PARITY), // PO
        5 => (BinOp::Ne, F_PARITY), // PE
        6 => (BinOp::Eq, F_SIGN),   // P
        7 => (BinOp::Ne, F_SIGN),   // M
        _ => unreachable!(),
    }
}

/// `pub(crate)` so `tables::index`'s `DD`/`FD` factory can rebuild the
/// unprefixed behavior for every opcode the index register doesn't
/// change, instead of duplicating this dispatch.
pub(crate) fn build(op: u8) -> Opcode {
    match op {
        // --- bits0-2 == 000: NOP / EX AF,AF' / DJNZ / JR e / JR cc,e ---
        0x00 => Opcode { mnemonic: "NOP", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::noop() },
        0x08 => Opcode { mnemonic: "EX AF,AF'", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: load_store::ex_af() },
        0x10 => Opcode { mnemonic: "DJNZ e", cycles: 8, operand: OperandKind::Rel8, control: Control::Plain, emit: branch::djnz() },
        0x18 => Opcode { mnemonic: "JR e", cycles: 7, operand: OperandKind::Rel8, control: Control::Plain, emit: branch::jr(literal(1)) },
        0x20 | 0x28 | 0x30 | 0x38 => {
            let (test_op, mask) = cc((op >> 3) & 0x03);
            Opcode { mnemonic: "JR cc,e", cycles: 7, operand: OperandKind::Rel8, control: Control::Plain, emit: branch::jr(branch::cc_test(test_op, mask)) }
        }

        // --- bits0-2 == 111: RLCA/RRCA/RLA/RRA/DAA/CPL/SCF/CCF ---
        0x07 => Opcode { mnemonic: "RLCA", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::rlca() },
        0x0F => Opcode { mnemonic: "RRCA", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::rrca() },
        0x17 => Opcode { mnemonic: "RLA", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::rla() },
        0x1F => Opcode { mnemonic: "RRA", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::rra() },
        0x27 => Opcode { mnemonic: "DAA", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::daa() },
        0x2F => Opcode { mnemonic: "CPL", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::cpl() },
        0x37 => Opcode { mnemonic: "SCF", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::scf() },
        0x3F => Opcode { mnemonic: "CCF", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::ccf() },

        // --- indirect accumulator loads ---
        0x02 => Opcode { mnemonic: "LD (BC),A", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld_write_mem_reg("b", "c", "a") },
        0x12 => Opcode { mnemonic: "LD (DE),A", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld_write_mem_reg("d", "e", "a") },
        0x0A => Opcode { mnemonic: "LD A,(BC)", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld8_mem_pair("a", "b", "c") },
        0x1A => Opcode { mnemonic: "LD A,(DE)", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld8_mem_pair("a", "d", "e") },
        0x22 => Opcode { mnemonic: "LD (nn),HL", cycles: 16, operand: OperandKind::Imm16, control: Control::Plain, emit: load_store::ld_write_mem_abs_pair("h", "l") },
        0x2A => Opcode { mnemonic: "LD HL,(nn)", cycles: 16, operand: OperandKind::Imm16, control: Control::Plain, emit: load_store::ld16_imm16_ind("h", "l") },
        0x32 => Opcode { mnemonic: "LD (nn),A", cycles: 13, operand: OperandKind::Imm16, control: Control::Plain, emit: load_store::ld_write_mem_abs("a") },
        0x3A => Opcode { mnemonic: "LD A,(nn)", cycles: 13, operand: OperandKind::Imm16, control: Control::Plain, emit: load_store::ld8_imm16_ind("a") },

        // --- HALT, the one LD r,r' slot that isn't a load ---
        0x76 => Opcode { mnemonic: "HALT", cycles: 4, operand: OperandKind::None, control: Control::Halt, emit: misc::halt() },

        // --- single-purpose 0xC0-0xFF bytes outside the uniform cc/rp groups ---
        0xC9 => Opcode { mnemonic: "RET", cycles: 10, operand: OperandKind::None, control: Control::RetUnconditional, emit: branch::ret_unconditional() },
        0xD9 => Opcode { mnemonic: "EXX", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: load_store::exx() },
        0xE9 => Opcode { mnemonic: "JP (HL)", cycles: 4, operand: OperandKind::None, control: Control::JpUnconditional, emit: branch::jp_hl() },
        0xF9 => Opcode { mnemonic: "LD SP,HL", cycles: 6, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld_sp_hl() },
        0xC3 => Opcode { mnemonic: "JP nn", cycles: 10, operand: OperandKind::Imm16, control: Control::JpUnconditional, emit: branch::jp() },
        0xCB => undefined("CB prefix (unreachable via this table)", 0),
        0xD3 => Opcode { mnemonic: "OUT (n),A", cycles: 11, operand: OperandKind::Imm8, control: Control::Plain, emit: misc::out_n_a() },
        0xDB => Opcode { mnemonic: "IN A,(n)", cycles: 11, operand: OperandKind::Imm8, control: Control::Plain, emit: misc::in_a_n() },
        0xE3 => Opcode { mnemonic: "EX (SP),HL", cycles: 19, operand: OperandKind::None, control: Control::Plain, emit: load_store::ex_sp_hl() },
        0xEB => Opcode { mnemonic: "EX DE,HL", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: load_store::ex_de_hl() },
        0xF3 => Opcode { mnemonic: "DI", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::di() },
        0xFB => Opcode { mnemonic: "EI", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: misc::ei() },
        0xC1 | 0xD1 | 0xE1 | 0xF1 => {
            let (hi, lo) = rp2_pair(op >> 4);
            Opcode { mnemonic: "POP rr", cycles: 10, operand: OperandKind::None, control: Control::Plain, emit: stack::pop(hi, lo) }
        }
        0xC5 | 0xD5 | 0xE5 | 0xF5 => {
            let (hi, lo) = rp2_pair(op >> 4);
            Opcode { mnemonic: "PUSH rr", cycles: 11, operand: OperandKind::None, control: Control::Plain, emit: stack::push(hi, lo) }
        }
        0xCD => Opcode { mnemonic: "CALL nn", cycles: 17, operand: OperandKind::Imm16, control: Control::Plain, emit: branch::call_unconditional() },
        0xDD => undefined("DD prefix (unreachable via this table)", 0),
        0xED => undefined("ED prefix (unreachable via this table)", 0),
        0xFD => undefined("FD prefix (unreachable via this table)", 0),

        // --- uniform cc-indexed groups ---
        op if (op & 0xC7) == 0xC0 => {
            let (test_op, mask) = cc(op >> 3);
            Opcode { mnemonic: "RET cc", cycles: 5, operand: OperandKind::None, control: Control::RetConditional, emit: branch::ret_cc(test_op, mask) }
        }
        op if (op & 0xC7) == 0xC2 => {
            let (test_op, mask) = cc(op >> 3);
            Opcode { mnemonic: "JP cc,nn", cycles: 10, operand: OperandKind::Imm16, control: Control::JpConditional, emit: branch::jp_cc(test_op, mask) }
        }
        op if (op & 0xC7) == 0xC4 => {
            let (test_op, mask) = cc(op >> 3);
            Opcode { mnemonic: "CALL cc,nn", cycles: 10, operand: OperandKind::Imm16, control: Control::Plain, emit: branch::call_cc(test_op, mask) }
        }
        op if (op & 0xC7) == 0xC6 => {
            let aaa = (op >> 3) & 0x07;
            Opcode { mnemonic: "ALU A,n", cycles: 7, operand: OperandKind::Imm8, control: Control::Plain, emit: alu_imm(aaa) }
        }
        op if (op & 0xC7) == 0xC7 => {
            let addr = ((op >> 3) & 0x07) as i32 * 8;
            Opcode { mnemonic: "RST t", cycles: 11, operand: OperandKind::None, control: Control::Plain, emit: branch::rst(addr) }
        }

        // --- bits0-2 == 001/011: LD rp,nn / ADD HL,rp / INC rp / DEC rp ---
        op if (op & 0xCF) == 0x01 => {
            if op >> 4 == 3 {
                Opcode { mnemonic: "LD SP,nn", cycles: 10, operand: OperandKind::Imm16, control: Control::Plain, emit: load_store::ld_sp() }
            } else {
                let (hi, lo) = rp_pair(op >> 4);
                Opcode { mnemonic: "LD rr,nn", cycles: 10, operand: OperandKind::Imm16, control: Control::Plain, emit: load_store::ld16(hi, lo) }
            }
        }
        op if (op & 0xCF) == 0x09 => {
            if op >> 4 == 3 {
                Opcode { mnemonic: "ADD HL,SP", cycles: 11, operand: OperandKind::None, control: Control::Plain, emit: arith::add_hl_sp() }
            } else {
                let (sh, sl) = rp_pair(op >> 4);
                Opcode { mnemonic: "ADD HL,rr", cycles: 11, operand: OperandKind::None, control: Control::Plain, emit: arith::add16("h", "l", sh, sl) }
            }
        }
        op if (op & 0xCF) == 0x03 => {
            if op >> 4 == 3 {
                Opcode { mnemonic: "INC SP", cycles: 6, operand: OperandKind::None, control: Control::Plain, emit: arith::inc_sp() }
            } else {
                let (hi, lo) = rp_pair(op >> 4);
                Opcode { mnemonic: "INC rr", cycles: 6, operand: OperandKind::None, control: Control::Plain, emit: arith::inc16(hi, lo) }
            }
        }
        op if (op & 0xCF) == 0x0B => {
            if op >> 4 == 3 {
                Opcode { mnemonic: "DEC SP", cycles: 6, operand: OperandKind::None, control: Control::Plain, emit: arith::dec_sp() }
            } else {
                let (hi, lo) = rp_pair(op >> 4);
                Opcode { mnemonic: "DEC rr", cycles: 6, operand: OperandKind::None, control: Control::Plain, emit: arith::dec16(hi, lo) }
            }
        }

        // --- bits0-2 == 100/101/110: INC r / DEC r / LD r,n ---
        op if (op & 0xC7) == 0x04 => {
            let r = (op >> 3) & 0x07;
            match r8name(r) {
                Some(name) => Opcode { mnemonic: "INC r", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: arith::inc8(name) },
                None => Opcode { mnemonic: "INC (HL)", cycles: 11, operand: OperandKind::None, control: Control::Plain, emit: arith::inc_mem(crate::ops::get_pair_call("h", "l")) },
            }
        }
        op if (op & 0xC7) == 0x05 => {
            let r = (op >> 3) & 0x07;
            match r8name(r) {
                Some(name) => Opcode { mnemonic: "DEC r", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: arith::dec8(name) },
                None => Opcode { mnemonic: "DEC (HL)", cycles: 11, operand: OperandKind::None, control: Control::Plain, emit: arith::dec_mem(crate::ops::get_pair_call("h", "l")) },
            }
        }
        op if (op & 0xC7) == 0x06 => {
            let r = (op >> 3) & 0x07;
            match r8name(r) {
                Some(name) => Opcode { mnemonic: "LD r,n", cycles: 7, operand: OperandKind::Imm8, control: Control::Plain, emit: load_store::ld8_imm(name) },
                None => Opcode { mnemonic: "LD (HL),n", cycles: 10, operand: OperandKind::Imm8, control: Control::Plain, emit: load_store::ld_write_mem_imm8("h", "l") },
            }
        }

        // --- 0x40-0x7F: LD r,r' ---
        op if (op & 0xC0) == 0x40 => {
            let dst = (op >> 3) & 0x07;
            let src = op & 0x07;
            match (r8name(dst), r8name(src)) {
                (Some(d), Some(s)) => Opcode { mnemonic: "LD r,r'", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld8_reg(d, s) },
                (None, Some(s)) => Opcode { mnemonic: "LD (HL),r", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld_write_mem_reg("h", "l", s) },
                (Some(d), None) => Opcode { mnemonic: "LD r,(HL)", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: load_store::ld8_mem_pair(d, "h", "l") },
                (None, None) => unreachable!("0x76 (HALT) is matched earlier"),
            }
        }

        // --- 0x80-0xBF: ALU A,r ---
        op if (op & 0xC0) == 0x80 => {
            let aaa = (op >> 3) & 0x07;
            let r = op & 0x07;
            match r8name(r) {
                Some(name) => Opcode { mnemonic: "ALU A,r", cycles: 4, operand: OperandKind::None, control: Control::Plain, emit: alu_reg(aaa, name) },
                None => Opcode { mnemonic: "ALU A,(HL)", cycles: 7, operand: OperandKind::None, control: Control::Plain, emit: alu_mem(aaa) },
            }
        }

        _ => unreachable!("every unprefixed byte is covered by the patterns above"),
    }
}

fn alu_reg(aaa: u8, r: &'static str) -> crate::ops::PendingEmitter {
    match aaa & 0x07 {
        0 => arith::add_reg(r),
        1 => arith::adc_reg(r),
        2 => arith::sub_reg(r),
        3 => arith::sbc_reg(r),
        4 => arith::and_reg(r),
        5 => arith::xor_reg(r),
        6 => arith::or_reg(r),
        7 => arith::cp_reg(r),
        _ => unreachable!(),
    }
}

fn alu_mem(aaa: u8) -> crate::ops::PendingEmitter {
    match aaa & 0x07 {
        0 => arith::add_mem_pair("h", "l"),
        1 => arith::adc_mem_pair("h", "l"),
        2 => arith::sub_mem_pair("h", "l"),
        3 => arith::sbc_mem_pair("h", "l"),
        4 => arith::and_mem_pair("h", "l"),
        5 => arith::xor_mem_pair("h", "l"),
        6 => arith::or_mem_pair("h", "l"),
        7 => arith::cp_mem_pair("h", "l"),
        _ => unreachable!(),
    }
}

fn alu_imm(aaa: u8) -> crate::ops::PendingEmitter {
    match aaa & 0x07 {
        0 => arith::add_imm(),
        1 => arith::adc_imm(),
        2 => arith::sub_imm(),
        3 => arith::sbc_imm(),
        4 => arith::and_imm(),
        5 => arith::xor_imm(),
        6 => arith::or_imm(),
        7 => arith::cp_imm(),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_256_slots() {
        assert_eq!(OPCODE_TABLE.len(), 256);
    }

    #[test]
    fn nop_is_plain_and_cheap() {
        assert_eq!(OPCODE_TABLE[0x00].mnemonic, "NOP");
        assert_eq!(OPCODE_TABLE[0x00].cycles, 4);
        assert_eq!(OPCODE_TABLE[0x00].control, Control::Plain);
    }

    #[test]
    fn halt_terminates_the_block() {
        assert!(OPCODE_TABLE[0x76].control.terminates_block());
    }

    #[test]
    fn unconditional_jp_and_ret_terminate_but_call_does_not() {
        assert!(OPCODE_TABLE[0xC3].control.terminates_block());
        assert!(OPCODE_TABLE[0xC9].control.terminates_block());
        assert!(!OPCODE_TABLE[0xCD].control.terminates_block());
    }

    #[test]
    fn conditional_forms_never_terminate() {
        for op in [0xC0u8, 0xC2, 0xC4, 0xCA, 0xD2] {
            assert!(!OPCODE_TABLE[op as usize].control.terminates_block());
        }
    }

    #[test]
    fn ld_r_r_prime_covers_the_block_minus_halt() {
        assert_eq!(OPCODE_TABLE[0x41].mnemonic, "LD r,r'");
        assert_eq!(OPCODE_TABLE[0x70].mnemonic, "LD (HL),r");
        assert_eq!(OPCODE_TABLE[0x7E].mnemonic, "LD r,(HL)");
        assert_eq!(OPCODE_TABLE[0x76].mnemonic, "HALT");
    }
}
