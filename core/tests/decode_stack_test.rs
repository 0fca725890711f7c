//! `PUSH`/`POP` for the main register pairs, decoded end-to-end.

mod common;

use smsz80_core::decode::decode_block;
use smsz80_core::ir::{assign, call, expr_stmt, literal, AssignOp};

#[test]
fn push_bc_pushes_the_pair_getter() {
    let result = decode_block(&[0xC5], 0); // PUSH BC
    assert_eq!(result.instructions[0].name, "PUSH rr");
    assert_eq!(result.instructions[0].ir, vec![expr_stmt(call("push1", [call("getBC", [])]))]);
}

#[test]
fn pop_de_reads_word_then_advances_sp_by_two() {
    let result = decode_block(&[0xD1], 0); // POP DE
    assert_eq!(result.instructions[0].name, "POP rr");
    assert_eq!(
        result.instructions[0].ir,
        vec![
            expr_stmt(call("setDE", [call("readMemWord", [smsz80_core::ir::ident("sp")])])),
            expr_stmt(assign(AssignOp::AddAssign, smsz80_core::ir::ident("sp"), literal(2))),
        ]
    );
}

#[test]
fn push_af_uses_the_af_pair_not_the_alternate_register() {
    let result = decode_block(&[0xF5], 0); // PUSH AF
    assert_eq!(result.instructions[0].ir, vec![expr_stmt(call("push1", [call("getAF", [])]))]);
}

#[test]
fn push_then_pop_round_trips_through_the_same_pair_name() {
    let result = decode_block(&[0xE5, 0xE1], 0); // PUSH HL; POP HL
    match &result.instructions[0].ir[0] {
        smsz80_core::ir::Node::ExprStmt(e) => match &**e {
            smsz80_core::ir::Node::Call { args, .. } => assert_eq!(args[0], call("getHL", [])),
            _ => panic!("expected Call"),
        },
        _ => panic!("expected ExprStmt"),
    }
    match &result.instructions[1].ir[0] {
        smsz80_core::ir::Node::ExprStmt(e) => match &**e {
            smsz80_core::ir::Node::Call { callee, .. } => assert_eq!(callee, "setHL"),
            _ => panic!("expected Call"),
        },
        _ => panic!("expected ExprStmt"),
    }
}
