//! NOP, HALT, undecodable/truncated faults, and the prefix-chain
//! mechanics that cut across every other opcode class — the decoder
//! driver's own contract (spec.md §4.4) rather than any one combinator.

mod common;

use smsz80_core::decode::{decode_block, Terminator};
use smsz80_core::error::DecodeFaultKind;
use smsz80_core::ir::Node;

#[test]
fn nop_decodes_to_empty_effect_then_hits_end_of_buffer() {
    // S1: rom = [0x00] at pc=0.
    let result = decode_block(&[0x00], 0);
    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.instructions[0].pc, 0);
    assert_eq!(result.instructions[0].name, "NOP");
    assert_eq!(result.instructions[0].ir, Vec::<Node>::new());
    assert_eq!(result.terminated_by, Terminator::Undecodable);
}

#[test]
fn halt_is_a_block_terminator() {
    let result = decode_block(&[0x76], 0);
    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.instructions[0].name, "HALT");
    assert_eq!(result.terminated_by, Terminator::Halt);
    assert_eq!(result.end_pc, 1);
}

#[test]
fn empty_rom_is_immediately_undecodable() {
    let result = decode_block(&[], 0x200);
    assert!(result.instructions.is_empty());
    assert_eq!(result.terminated_by, Terminator::Undecodable);
    assert_eq!(result.end_pc, 0x200);
}

#[test]
fn truncated_imm16_operand_reports_need_and_have() {
    let result = decode_block(&[0x01, 0x34], 0); // LD BC,nn missing the high byte
    assert!(result.instructions.is_empty());
    match result.fault {
        Some(fault) => assert_eq!(fault.kind, DecodeFaultKind::Truncated { need: 1, have: 0 }),
        None => panic!("expected a truncation fault"),
    }
}

#[test]
fn truncated_cb_prefix_with_no_sub_opcode_byte() {
    let result = decode_block(&[0xCB], 0);
    assert!(result.instructions.is_empty());
    assert_eq!(result.terminated_by, Terminator::Undecodable);
    assert!(matches!(result.fault.unwrap().kind, DecodeFaultKind::Truncated { .. }));
}

#[test]
fn decoding_is_pure_and_repeatable() {
    // Testable Property 3: two calls on the same input yield
    // structurally equal output.
    let rom = [0x3E, 0x05, 0x80, 0xC9]; // LD A,5 / ADD A,B / RET
    let a = decode_block(&rom, 0x10);
    let b = decode_block(&rom, 0x10);
    assert_eq!(a, b);
}

#[test]
fn multiple_plain_instructions_accumulate_before_a_terminator() {
    let rom = [0x00, 0x00, 0x00, 0xC9]; // NOP x3, RET
    let result = decode_block(&rom, 0);
    assert_eq!(result.instructions.len(), 4);
    assert_eq!(result.terminated_by, Terminator::Ret);
    assert_eq!(result.end_pc, 4);
}

#[test]
fn pc_reported_per_instruction_accounts_for_prior_instruction_lengths() {
    let rom = [0x3E, 0x05, 0x06, 0x02, 0xC9]; // LD A,5 / LD B,2 / RET
    let result = decode_block(&rom, 0x8000);
    assert_eq!(result.instructions[0].pc, 0x8000);
    assert_eq!(result.instructions[1].pc, 0x8002);
    assert_eq!(result.instructions[2].pc, 0x8004);
}
