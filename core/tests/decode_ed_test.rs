//! The `ED`-prefixed singleton group: `NEG`, `IM n`, `RETN`/`RETI`,
//! the `I`/`R` register moves, `RRD`/`RLD`, and `IN r,(C)`/`OUT (C),r`.

mod common;

use smsz80_core::decode::{decode_block, Terminator};
use smsz80_core::ir::{assign, ident, reg, AssignOp};

#[test]
fn neg_routes_through_the_host_negate_helper() {
    let result = decode_block(&[0xED, 0x44], 0);
    assert_eq!(result.instructions[0].name, "NEG");
    assert_eq!(
        result.instructions[0].ir,
        vec![smsz80_core::ir::expr_stmt(assign(AssignOp::Assign, reg("a"), smsz80_core::ir::call("neg", [reg("a")])))]
    );
}

#[test]
fn neg_has_three_undocumented_duplicate_slots_that_agree() {
    for op in [0x44u8, 0x4C, 0x54, 0x5C, 0x64, 0x6C, 0x74, 0x7C] {
        let result = decode_block(&[0xED, op], 0);
        assert_eq!(result.instructions[0].name, "NEG");
    }
}

#[test]
fn im_1_sets_the_interrupt_mode_literal() {
    let result = decode_block(&[0xED, 0x56], 0); // IM 1
    assert_eq!(
        result.instructions[0].ir,
        vec![smsz80_core::ir::expr_stmt(smsz80_core::ir::call("setIM", [smsz80_core::ir::literal(1)]))]
    );
}

#[test]
fn retn_terminates_the_block_and_restores_iff1() {
    let result = decode_block(&[0xED, 0x45], 0);
    assert_eq!(result.terminated_by, Terminator::Ret);
    assert!(result.instructions[0].ir.contains(&smsz80_core::ir::expr_stmt(smsz80_core::ir::call(
        "restoreIFF1FromIFF2",
        []
    ))));
}

#[test]
fn reti_also_terminates_the_block() {
    let result = decode_block(&[0xED, 0x4D], 0);
    assert_eq!(result.terminated_by, Terminator::Ret);
}

#[test]
fn ld_i_a_and_ld_a_i_move_the_interrupt_register() {
    let store = decode_block(&[0xED, 0x47], 0); // LD I,A
    assert_eq!(store.instructions[0].ir, vec![smsz80_core::ir::expr_stmt(assign(AssignOp::Assign, ident("i"), reg("a")))]);

    let load = decode_block(&[0xED, 0x57], 0); // LD A,I
    assert_eq!(load.instructions[0].name, "LD A,I");
    assert_eq!(load.instructions[0].ir.len(), 3);
}

#[test]
fn in_b_c_reads_the_port_into_a_register() {
    let result = decode_block(&[0xED, 0x40], 0); // IN B,(C)
    assert_eq!(result.instructions[0].name, "IN r,(C)");
    match &result.instructions[0].ir[0] {
        smsz80_core::ir::Node::ExprStmt(e) => match &**e {
            smsz80_core::ir::Node::Assign { left, .. } => assert_eq!(**left, reg("b")),
            _ => panic!("expected Assign"),
        },
        _ => panic!("expected ExprStmt"),
    }
}

#[test]
fn out_c_b_writes_the_register_to_the_port() {
    let result = decode_block(&[0xED, 0x41], 0); // OUT (C),B
    assert_eq!(
        result.instructions[0].ir,
        vec![smsz80_core::ir::expr_stmt(smsz80_core::ir::call("ioWrite", [reg("c"), reg("b")]))]
    );
}

#[test]
fn ld_nn_rr_and_ld_rr_nn_cover_the_16_bit_absolute_forms() {
    let store = decode_block(&[0xED, 0x43, 0x00, 0x40], 0); // LD (0x4000),BC
    assert_eq!(store.instructions[0].name, "LD (nn),rr");
    let load = decode_block(&[0xED, 0x4B, 0x00, 0x40], 0); // LD BC,(0x4000)
    assert_eq!(load.instructions[0].name, "LD rr,(nn)");
}

#[test]
fn undocumented_ed_region_falls_back_to_noop() {
    let result = decode_block(&[0xED, 0x00], 0);
    assert_eq!(result.instructions[0].name, "NOP (ED, undocumented)");
    assert_eq!(result.instructions[0].ir, Vec::new());
}
