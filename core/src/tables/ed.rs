//! `OPCODE_TABLE_ED` — the `ED`-prefixed map: the `0x40-0x7F` block of
//! 8-bit/16-bit singles (decoded by the textbook `y`/`z`/`p`/`q` field
//! split) plus the `0xA0-0xBB` block transfer/compare/I-O group. Every
//! other byte is a documented no-op on real Z80 hardware (an 8T `ED`
//! prefix followed by nothing) and is filled with [`undefined`].

use std::sync::LazyLock;

use crate::ops::{arith, block, ed, load_store};
use crate::tables::{undefined, Control, Opcode, OpcodeTable, OperandKind};

pub static OPCODE_TABLE_ED: LazyLock<OpcodeTable> = LazyLock::new(|| std::array::from_fn(build));

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

fn rp_pair(idx: u8) -> (&'static str, &'static str) {
    match idx & 0x03 {
        0 => ("b", "c"),
        1 => ("d", "e"),
        2 => ("h", "l"),
        _ => unreachable!("SP is handled at each z=2/z=3 call site"),
    }
}

fn im_mode(y: u8) -> u8 {
    match y & 0x07 {
        0 | 1 | 4 | 5 => 0,
        2 | 6 => 1,
        3 | 7 => 2,
        _ => unreachable!(),
    }
}

fn plain(mnemonic: &'static str, cycles: u8, emit: crate::ops::PendingEmitter) -> Opcode {
    Opcode { mnemonic, cycles, operand: OperandKind::None, control: Control::Plain, emit }
}

fn imm16(mnemonic: &'static str, cycles: u8, emit: crate::ops::PendingEmitter) -> Opcode {
    Opcode { mnemonic, cycles, operand: OperandKind::Imm16, control: Control::Plain, emit }
}

fn build(op: u8) -> Opcode {
    if (0x40..=0x7F).contains(&op) {
        let y = (op >> 3) & 0x07;
        let z = op & 0x07;
        match z {
            0 => match r8name(y) {
                Some(name) => plain("IN r,(C)", 12, ed::in_r_c(name)),
                None => plain("IN (C)", 12, ed::in_c_flags_only()),
            },
            1 => match r8name(y) {
                Some(name) => plain("OUT (C),r", 12, ed::out_c_r(name)),
                None => plain("OUT (C),0", 12, ed::out_c_zero()),
            },
            2 => {
                let p = y >> 1;
                let taken_from_carry = y & 1 == 0;
                if p == 3 {
                    if taken_from_carry {
                        plain("SBC HL,SP", 15, arith::sbc_hl_sp())
                    } else {
                        plain("ADC HL,SP", 15, arith::adc_hl_sp())
                    }
                } else {
                    let (sh, sl) = rp_pair(p);
                    if taken_from_carry {
                        plain("SBC HL,rr", 15, arith::sbc16("h", "l", sh, sl))
                    } else {
                        plain("ADC HL,rr", 15, arith::adc16("h", "l", sh, sl))
                    }
                }
            }
            3 => {
                let p = y >> 1;
                let store_to_memory = y & 1 == 0;
                if p == 3 {
                    if store_to_memory {
                        imm16("LD (nn),SP", 20, load_store::ld_write_mem_abs_sp())
                    } else {
                        imm16("LD SP,(nn)", 20, load_store::ld_sp_imm16_ind())
                    }
                } else {
                    let (hi, lo) = rp_pair(p);
                    if store_to_memory {
                        imm16("LD (nn),rr", 20, load_store::ld_write_mem_abs_pair(hi, lo))
                    } else {
                        imm16("LD rr,(nn)", 20, load_store::ld16_imm16_ind(hi, lo))
                    }
                }
            }
            4 => plain("NEG", 8, ed::neg()),
            5 => {
                if y & 1 == 0 {
                    Opcode { mnemonic: "RETN", cycles: 14, operand: OperandKind::None, control: Control::RetUnconditional, emit: ed::retn() }
                } else {
                    Opcode { mnemonic: "RETI", cycles: 14, operand: OperandKind::None, control: Control::RetUnconditional, emit: ed::reti() }
                }
            }
            6 => plain("IM n", 8, ed::im(im_mode(y))),
            7 => match y {
                0 => plain("LD I,A", 9, ed::ld_i_a()),
                1 => plain("LD R,A", 9, ed::ld_r_a()),
                2 => plain("LD A,I", 9, ed::ld_a_i()),
                3 => plain("LD A,R", 9, ed::ld_a_r()),
                4 => plain("RRD", 18, ed::rrd()),
                5 => plain("RLD", 18, ed::rld()),
                _ => undefined("NOP (ED, undocumented)", 8),
            },
            _ => unreachable!(),
        }
    } else {
        match op {
            0xA0 => plain("LDI", 16, block::block_transfer(1)),
            0xA8 => plain("LDD", 16, block::block_transfer(-1)),
            0xB0 => plain("LDIR", 21, block::block_transfer_repeat(1)),
            0xB8 => plain("LDDR", 21, block::block_transfer_repeat(-1)),
            0xA1 => plain("CPI", 16, block::block_compare(1)),
            0xA9 => plain("CPD", 16, block::block_compare(-1)),
            0xB1 => plain("CPIR", 21, block::block_compare_repeat(1)),
            0xB9 => plain("CPDR", 21, block::block_compare_repeat(-1)),
            0xA2 => plain("INI", 16, block::block_in(1)),
            0xAA => plain("IND", 16, block::block_in(-1)),
            0xB2 => plain("INIR", 21, block::block_in_repeat(1)),
            0xBA => plain("INDR", 21, block::block_in_repeat(-1)),
            0xA3 => plain("OUTI", 16, block::block_out(1)),
            0xAB => plain("OUTD", 16, block::block_out(-1)),
            0xB3 => plain("OTIR", 21, block::block_out_repeat(1)),
            0xBB => plain("OTDR", 21, block::block_out_repeat(-1)),
            _ => undefined("NOP (ED, undocumented)", 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_256_slots() {
        assert_eq!(OPCODE_TABLE_ED.len(), 256);
    }

    #[test]
    fn neg_and_its_undocumented_duplicates_agree() {
        assert_eq!(OPCODE_TABLE_ED[0x44].mnemonic, "NEG");
        assert_eq!(OPCODE_TABLE_ED[0x4C].mnemonic, "NEG");
        assert_eq!(OPCODE_TABLE_ED[0x54].mnemonic, "NEG");
    }

    #[test]
    fn block_group_is_fully_populated() {
        for op in [0xA0u8, 0xA1, 0xA2, 0xA3, 0xA8, 0xA9, 0xAA, 0xAB, 0xB0, 0xB1, 0xB2, 0xB3, 0xB8, 0xB9, 0xBA, 0xBB] {
            assert_ne!(OPCODE_TABLE_ED[op as usize].mnemonic, "NOP (ED, undocumented)");
        }
    }

    #[test]
    fn retn_and_reti_terminate_the_block() {
        assert!(OPCODE_TABLE_ED[0x45].control.terminates_block());
        assert!(OPCODE_TABLE_ED[0x4D].control.terminates_block());
    }

    #[test]
    fn undocumented_region_falls_back_to_noop() {
        assert_eq!(OPCODE_TABLE_ED[0x00].mnemonic, "NOP (ED, undocumented)");
        assert_eq!(OPCODE_TABLE_ED[0xFF].mnemonic, "NOP (ED, undocumented)");
    }
}
