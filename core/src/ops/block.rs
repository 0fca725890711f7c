//! The `ED`-prefixed block group: `LDI`/`LDD`/`LDIR`/`LDDR` (transfer),
//! `CPI`/`CPD`/`CPIR`/`CPDR` (compare), `INI`/`IND`/`INIR`/`INDR` and
//! `OUTI`/`OUTD`/`OTIR`/`OTDR` (port block I/O). Entirely supplemented —
//! spec.md's combinator table stops at the singles `ed.rs` now covers;
//! these sixteen opcodes are the rest of the `ED` table Testable
//! Property 1 requires fully populated.

use crate::ir::{assign, binary, block, call, expr_stmt, ident, if_stmt, literal, reg, AssignOp, BinOp, Node};
use crate::ops::{emitter, get_pair_call, read_mem8, set_pair_call, write_mem, EmitCtx, PendingEmitter};

fn bc_not_zero() -> Node {
    binary(BinOp::Ne, get_pair_call("b", "c"), literal(0))
}

fn decrement_bc() -> Node {
    expr_stmt(set_pair_call("b", "c", binary(BinOp::Sub, get_pair_call("b", "c"), literal(1))))
}

/// `LDI`/`LDD` — `tmp = readMem(HL); writeMem(DE, tmp); HL/DE += delta;
/// BC -= 1; ldiFlags(tmp)`. `ldiFlags` carries the H=0/N=0/PV=(BC!=0)
/// update plus the undocumented bits-3/5 copy from `tmp + a`, the same
/// "value in, flags as a side effect" convention the rest of `ops` uses.
pub fn block_transfer(delta: i32) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, ident("__tmp"), read_mem8(get_pair_call("h", "l")))),
            expr_stmt(write_mem(get_pair_call("d", "e"), ident("__tmp"))),
            expr_stmt(set_pair_call("h", "l", binary(BinOp::Add, get_pair_call("h", "l"), literal(delta)))),
            expr_stmt(set_pair_call("d", "e", binary(BinOp::Add, get_pair_call("d", "e"), literal(delta)))),
            decrement_bc(),
            expr_stmt(call("ldiFlags", [ident("__tmp")])),
        ]
    })
}

/// `LDIR`/`LDDR` — `block_transfer`, then repeat in place while `BC !=
/// 0`: `pc = current_pc; tstates -= 5`.
pub fn block_transfer_repeat(delta: i32) -> PendingEmitter {
    let base = block_transfer(delta);
    emitter(move |ctx: EmitCtx| {
        let mut stmts = base(ctx);
        stmts.push(if_stmt(
            bc_not_zero(),
            block([
                expr_stmt(assign(AssignOp::Assign, ident("pc"), literal(ctx.current_pc))),
                expr_stmt(assign(AssignOp::SubAssign, ident("tstates"), literal(5))),
            ]),
            None,
        ));
        stmts
    })
}

/// `CPI`/`CPD` — `tmp = readMem(HL); HL += delta; BC -= 1; cpFlags(tmp)`.
/// `cpFlags` compares `tmp` against `a` and folds in `PV = (BC != 0)`.
pub fn block_compare(delta: i32) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, ident("__tmp"), read_mem8(get_pair_call("h", "l")))),
            expr_stmt(set_pair_call("h", "l", binary(BinOp::Add, get_pair_call("h", "l"), literal(delta)))),
            decrement_bc(),
            expr_stmt(call("cpFlags", [ident("__tmp")])),
        ]
    })
}

/// `CPIR`/`CPDR` — repeat while `BC != 0` and the comparison hasn't
/// matched (`Z` clear).
pub fn block_compare_repeat(delta: i32) -> PendingEmitter {
    let base = block_compare(delta);
    emitter(move |ctx: EmitCtx| {
        let mut stmts = base(ctx);
        let continue_test = binary(
            BinOp::And,
            bc_not_zero(),
            binary(BinOp::Eq, binary(BinOp::And, ident("f"), literal(crate::flags::F_ZERO)), literal(0)),
        );
        stmts.push(if_stmt(
            continue_test,
            block([
                expr_stmt(assign(AssignOp::Assign, ident("pc"), literal(ctx.current_pc))),
                expr_stmt(assign(AssignOp::SubAssign, ident("tstates"), literal(5))),
            ]),
            None,
        ));
        stmts
    })
}

/// `INI`/`IND` — `tmp = ioRead(c); writeMem(HL, tmp); HL += delta; b =
/// (b-1) & 0xFF; iniFlags(tmp)`.
pub fn block_in(delta: i32) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, ident("__tmp"), call("ioRead", [reg("c")]))),
            expr_stmt(write_mem(get_pair_call("h", "l"), ident("__tmp"))),
            expr_stmt(set_pair_call("h", "l", binary(BinOp::Add, get_pair_call("h", "l"), literal(delta)))),
            expr_stmt(assign(
                AssignOp::Assign,
                reg("b"),
                binary(BinOp::And, binary(BinOp::Sub, reg("b"), literal(1)), literal(0xFF)),
            )),
            expr_stmt(call("iniFlags", [ident("__tmp")])),
        ]
    })
}

/// `INIR`/`INDR` — repeat while `b != 0`.
pub fn block_in_repeat(delta: i32) -> PendingEmitter {
    let base = block_in(delta);
    emitter(move |ctx: EmitCtx| {
        let mut stmts = base(ctx);
        stmts.push(if_stmt(
            binary(BinOp::Ne, reg("b"), literal(0)),
            block([
                expr_stmt(assign(AssignOp::Assign, ident("pc"), literal(ctx.current_pc))),
                expr_stmt(assign(AssignOp::SubAssign, ident("tstates"), literal(5))),
            ]),
            None,
        ));
        stmts
    })
}

/// `OUTI`/`OUTD` — `tmp = readMem(HL); ioWrite(c, tmp); HL += delta; b =
/// (b-1) & 0xFF; outiFlags(tmp)`.
pub fn block_out(delta: i32) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, ident("__tmp"), read_mem8(get_pair_call("h", "l")))),
            expr_stmt(call("ioWrite", [reg("c"), ident("__tmp")])),
            expr_stmt(set_pair_call("h", "l", binary(BinOp::Add, get_pair_call("h", "l"), literal(delta)))),
            expr_stmt(assign(
                AssignOp::Assign,
                reg("b"),
                binary(BinOp::And, binary(BinOp::Sub, reg("b"), literal(1)), literal(0xFF)),
            )),
            expr_stmt(call("outiFlags", [ident("__tmp")])),
        ]
    })
}

/// `OTIR`/`OTDR` — repeat while `b != 0`.
pub fn block_out_repeat(delta: i32) -> PendingEmitter {
    let base = block_out(delta);
    emitter(move |ctx: EmitCtx| {
        let mut stmts = base(ctx);
        stmts.push(if_stmt(
            binary(BinOp::Ne, reg("b"), literal(0)),
            block([
                expr_stmt(assign(AssignOp::Assign, ident("pc"), literal(ctx.current_pc))),
                expr_stmt(assign(AssignOp::SubAssign, ident("tstates"), literal(5))),
            ]),
            None,
        ));
        stmts
    })
}
