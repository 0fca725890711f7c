//! The `DD`/`FD`-prefixed index-register forms and their `DDCB`/`FDCB`
//! indexed-bit counterparts, including Testable Property 4
//! (`IX`/`IY` shape equivalence) exercised end-to-end through
//! `decode_block` rather than directly on the generated tables.

mod common;

use smsz80_core::decode::decode_block;

#[test]
fn ld_ix_nn_resolves_through_the_dd_prefix() {
    // S5: rom = [0xDD, 0x21, 0xCD, 0xAB] (LD IX,0xABCD) at pc=0.
    let result = decode_block(&[0xDD, 0x21, 0xCD, 0xAB], 0);
    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.instructions[0].name, "LD IX,nn");
    assert_eq!(
        result.instructions[0].ir,
        vec![smsz80_core::ir::expr_stmt(smsz80_core::ir::call("setIX", [smsz80_core::ir::literal(0xABCD)]))]
    );
}

#[test]
fn ld_iy_nn_is_shaped_identically_with_iy_substituted() {
    let result = decode_block(&[0xFD, 0x21, 0xCD, 0xAB], 0);
    assert_eq!(result.instructions[0].name, "LD IY,nn");
    assert_eq!(
        result.instructions[0].ir,
        vec![smsz80_core::ir::expr_stmt(smsz80_core::ir::call("setIY", [smsz80_core::ir::literal(0xABCD)]))]
    );
}

#[test]
fn ld_b_ix_plus_d_reads_the_indexed_address() {
    let result = decode_block(&[0xDD, 0x46, 0x02], 0); // LD B,(IX+2)
    assert_eq!(result.instructions[0].name, "LD B,(IX+d)");
    assert_eq!(
        result.instructions[0].ir,
        vec![smsz80_core::ir::expr_stmt(smsz80_core::ir::assign(
            smsz80_core::ir::AssignOp::Assign,
            smsz80_core::ir::reg("b"),
            smsz80_core::ir::call(
                "readMem",
                [smsz80_core::ir::binary(
                    smsz80_core::ir::BinOp::Add,
                    smsz80_core::ir::call("getIX", []),
                    smsz80_core::ir::literal(2)
                )]
            )
        ))]
    );
}

#[test]
fn negative_displacement_subtracts_from_the_index_register() {
    let result = decode_block(&[0xDD, 0x46, 0xFE], 0); // LD B,(IX-2)
    match &result.instructions[0].ir[0] {
        smsz80_core::ir::Node::ExprStmt(e) => match &**e {
            smsz80_core::ir::Node::Assign { right, .. } => match right.as_ref() {
                smsz80_core::ir::Node::Call { args, .. } => match &args[0] {
                    smsz80_core::ir::Node::Binary { right, .. } => {
                        assert_eq!(**right, smsz80_core::ir::literal(-2))
                    }
                    _ => panic!("expected Binary"),
                },
                _ => panic!("expected Call"),
            },
            _ => panic!("expected Assign"),
        },
        _ => panic!("expected ExprStmt"),
    }
}

#[test]
fn double_dd_prefix_collapses_to_only_the_last_one_applying() {
    let result = decode_block(&[0xDD, 0xDD, 0x21, 0xCD, 0xAB], 0);
    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.instructions[0].name, "LD IX,nn");
    assert_eq!(result.end_pc, 5);
}

#[test]
fn dd_then_fd_prefix_resolves_as_the_final_fd() {
    let result = decode_block(&[0xDD, 0xFD, 0x21, 0xCD, 0xAB], 0);
    assert_eq!(result.instructions[0].name, "LD IY,nn");
}

#[test]
fn ddcb_form_reads_the_displacement_before_the_sub_opcode() {
    // BIT 0,(IX+2).
    let result = decode_block(&[0xDD, 0xCB, 0x02, 0x46], 0);
    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.instructions[0].name, "BIT b,(IX+d)");
    assert_eq!(result.end_pc, 4);
}

#[test]
fn opcode_0x76_preserves_the_source_quirk_across_the_decoder() {
    // Unprefixed 0x76 is HALT; the index table's slot is the documented
    // mislabeled store (spec.md §9) — decoded, not treated as a halt.
    let result = decode_block(&[0xDD, 0x76, 0x01], 0);
    assert_eq!(result.instructions[0].name, "LD (IX+d),B");
    assert_ne!(result.terminated_by, smsz80_core::decode::Terminator::Halt);
}

#[test]
fn unimplemented_ld_ix_plus_d_n_terminates_without_emitting() {
    let result = decode_block(&[0xDD, 0x36, 0x02, 0x10], 0);
    assert_eq!(result.instructions.len(), 0);
    assert_eq!(result.terminated_by, smsz80_core::decode::Terminator::Undecodable);
}

#[test]
fn non_index_sensitive_opcode_falls_through_to_the_main_table_unchanged() {
    let result = decode_block(&[0xDD, 0x00], 0); // DD prefix in front of a plain NOP
    assert_eq!(result.instructions[0].name, "NOP");
}

#[test]
fn jp_ix_is_an_indirect_unconditional_jump() {
    let result = decode_block(&[0xDD, 0xE9], 0);
    assert_eq!(result.terminated_by, smsz80_core::decode::Terminator::Jp);
}
