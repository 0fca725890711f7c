//! `OPCODE_TABLE_CB` — the `CB`-prefixed bit-manipulation map. All 256
//! slots are real, documented Z80 behavior; there is no undefined
//! region to paper over here, unlike `ED`.

use std::sync::LazyLock;

use crate::ops::bit::{self, ShiftKind};
use crate::ops::get_pair_call;
use crate::tables::{Control, Opcode, OpcodeTable, OperandKind};

pub static OPCODE_TABLE_CB: LazyLock<OpcodeTable> = LazyLock::new(|| std::array::from_fn(build));

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

fn hl() -> crate::ir::Node {
    get_pair_call("h", "l")
}

fn build(op: u8) -> Opcode {
    let group = (op >> 6) & 0x03;
    let mid = (op >> 3) & 0x07;
    let r = op & 0x07;
    match group {
        0 => {
            let kind = shift_kind(mid);
            match r8name(r) {
                Some(name) => Opcode { mnemonic: "shift r", cycles: 8, operand: OperandKind::None, control: Control::Plain, emit: bit::shift_reg(kind, name) },
                None => Opcode { mnemonic: "shift (HL)", cycles: 15, operand: OperandKind::None, control: Control::Plain, emit: bit::shift_mem(kind, hl()) },
            }
        }
        1 => match r8name(r) {
            Some(name) => Opcode { mnemonic: "BIT b,r", cycles: 8, operand: OperandKind::None, control: Control::Plain, emit: bit::bit_reg(mid, name) },
            None => Opcode { mnemonic: "BIT b,(HL)", cycles: 12, operand: OperandKind::None, control: Control::Plain, emit: bit::bit_mem(mid, hl()) },
        },
        2 => match r8name(r) {
            Some(name) => Opcode { mnemonic: "RES b,r", cycles: 8, operand: OperandKind::None, control: Control::Plain, emit: bit::res_reg(mid, name) },
            None => Opcode { mnemonic: "RES b,(HL)", cycles: 15, operand: OperandKind::None, control: Control::Plain, emit: bit::res_mem(mid, hl()) },
        },
        3 => match r8name(r) {
            Some(name) => Opcode { mnemonic: "SET b,r", cycles: 8, operand: OperandKind::None, control: Control::Plain, emit: bit::set_reg(mid, name) },
            None => Opcode { mnemonic: "SET b,(HL)", cycles: 15, operand: OperandKind::None, control: Control::Plain, emit: bit::set_mem(mid, hl()) },
        },
        _ => unreachable!(),
    }
}
