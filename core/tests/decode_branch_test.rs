//! `JR`/`DJNZ`/`RET`/`JP`/`CALL`/`RST` decoded end-to-end, including
//! Testable Property 5 (branch target arithmetic) and which forms the
//! decoder treats as block terminators.

mod common;

use common::le16;
use smsz80_core::decode::{decode_block, Terminator};
use smsz80_core::ir::Node;

#[test]
fn jr_minus_two_targets_its_own_instruction() {
    // S3: rom = [0x18, 0xFE] at pc=0x100 (JR -2) -> target == 0x100.
    let result = decode_block(&[0x18, 0xFE], 0x100);
    assert_eq!(result.instructions.len(), 1);
    match &result.instructions[0].ir[0] {
        Node::If { consequent, .. } => match &**consequent {
            Node::Block(stmts) => match &stmts[0] {
                Node::ExprStmt(e) => match &**e {
                    Node::Assign { right, .. } => assert_eq!(**right, smsz80_core::ir::literal(0x100)),
                    _ => panic!("expected Assign"),
                },
                _ => panic!("expected ExprStmt"),
            },
            _ => panic!("expected Block"),
        },
        _ => panic!("expected If"),
    }
}

#[test]
fn jp_nn_terminates_the_block_with_jp() {
    // S4: rom = [0xC3, 0x00, 0x20] at pc=0 -> terminated_by jp.
    let result = decode_block(&[0xC3, 0x00, 0x20], 0);
    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.terminated_by, Terminator::Jp);
    match &result.instructions[0].ir[..] {
        [pc_assign, ret] => {
            assert_eq!(*pc_assign, smsz80_core::ir::expr_stmt(smsz80_core::ir::assign(
                smsz80_core::ir::AssignOp::Assign,
                smsz80_core::ir::ident("pc"),
                smsz80_core::ir::literal(0x2000),
            )));
            assert_eq!(*ret, smsz80_core::ir::ret(None));
        }
        _ => panic!("expected two statements"),
    }
}

#[test]
fn jr_forward_displacement_lands_past_the_instruction() {
    let result = decode_block(&[0x18, 0x05], 0x200); // JR +5
    match &result.instructions[0].ir[0] {
        Node::If { consequent, .. } => match &**consequent {
            Node::Block(stmts) => match &stmts[0] {
                Node::ExprStmt(e) => match &**e {
                    Node::Assign { right, .. } => assert_eq!(**right, smsz80_core::ir::literal(0x207)),
                    _ => panic!("expected Assign"),
                },
                _ => panic!("expected ExprStmt"),
            },
            _ => panic!("expected Block"),
        },
        _ => panic!("expected If"),
    }
}

#[test]
fn djnz_wraps_around_the_sixteen_bit_address_space() {
    let result = decode_block(&[0x10, 0x7F], 0xFFF0); // DJNZ +127, wraps past 0xFFFF
    let expected_target = (0xFFF0u32 + 2 + 0x7F) as u16;
    match &result.instructions[0].ir[1] {
        Node::If { consequent, .. } => match &**consequent {
            Node::Block(stmts) => match &stmts[0] {
                Node::ExprStmt(e) => match &**e {
                    Node::Assign { right, .. } => {
                        assert_eq!(**right, smsz80_core::ir::literal(expected_target as i32))
                    }
                    _ => panic!("expected Assign"),
                },
                _ => panic!("expected ExprStmt"),
            },
            _ => panic!("expected Block"),
        },
        _ => panic!("expected If"),
    }
}

#[test]
fn ret_unconditional_terminates_but_ret_cc_does_not() {
    let unconditional = decode_block(&[0xC9], 0);
    assert_eq!(unconditional.terminated_by, Terminator::Ret);

    let conditional = decode_block(&[0xC0, 0x00], 0); // RET NZ; NOP
    assert_eq!(conditional.instructions.len(), 2);
    assert_ne!(conditional.terminated_by, Terminator::Ret);
}

#[test]
fn call_nn_does_not_terminate_the_block() {
    let bytes = le16(0x3000);
    let result = decode_block(&[0xCD, bytes[0], bytes[1], 0x00], 0); // CALL 0x3000; NOP
    assert_eq!(result.instructions.len(), 2);
}

#[test]
fn rst_pushes_current_pc_and_jumps_to_the_fixed_vector() {
    let result = decode_block(&[0x00, 0xEF], 0x100); // NOP; RST 0x28
    let ir = &result.instructions[1].ir;
    match &ir[0] {
        Node::ExprStmt(call) => match &**call {
            Node::Call { callee, args } => {
                assert_eq!(callee, "push1");
                assert_eq!(args[0], smsz80_core::ir::literal(0x101));
            }
            _ => panic!("expected Call"),
        },
        _ => panic!("expected ExprStmt"),
    }
}

#[test]
fn jp_hl_is_an_indirect_unconditional_jump() {
    let result = decode_block(&[0xE9], 0);
    assert_eq!(result.terminated_by, Terminator::Jp);
}
