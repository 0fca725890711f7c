//! `JR`, `DJNZ`, `RET`, `JP`, `CALL`, `RST`, and their conditional and
//! indexed-register (`JP (IX|IY)`) forms. These are the decoder's
//! terminator-producing combinators — see `crate::decode` for how
//! `terminated_by` is derived from the emitted shape rather than from
//! a flag threaded through here.

use crate::ir::{assign, binary, block, call, expr_stmt, if_stmt, literal, ret, AssignOp, BinOp, Node};
use crate::ops::{emitter, EmitCtx, IndexReg, PendingEmitter};

/// `(f & mask) op 0` — the flag test every conditional branch/call/ret
/// combinator builds, e.g. `cc_test(BinOp::Eq, F_ZERO)` for `Z` clear.
pub fn cc_test(op: BinOp, mask: i32) -> Node {
    binary(op, binary(BinOp::And, crate::ir::ident("f"), literal(mask)), literal(0))
}

fn tstates_adjust(delta: i32) -> Node {
    expr_stmt(assign(AssignOp::SubAssign, crate::ir::ident("tstates"), literal(delta)))
}

fn pc_assign(target: Node) -> Node {
    expr_stmt(assign(AssignOp::Assign, crate::ir::ident("pc"), target))
}

/// `JR(test_expr)` — `if (test) { pc = target; tstates -= 5 }`. Pass
/// `literal(1)` for the unconditional `JR e` (spec.md's S3 scenario:
/// the true-literal test); pass `cc_test(..)` for `JR cc,e`.
pub fn jr(test: Node) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| {
        vec![if_stmt(
            test.clone(),
            block([pc_assign(literal(ctx.target)), tstates_adjust(5)]),
            None,
        )]
    })
}

/// `DJNZ()` — `b = (b-1) & 0xFF; if (b != 0) { pc = target; tstates -= 5 }`.
pub fn djnz() -> PendingEmitter {
    emitter(|ctx: EmitCtx| {
        let decremented = binary(
            BinOp::And,
            binary(BinOp::Sub, crate::ir::reg("b"), literal(1)),
            literal(0xFF),
        );
        vec![
            expr_stmt(assign(AssignOp::Assign, crate::ir::reg("b"), decremented)),
            if_stmt(
                binary(BinOp::Ne, crate::ir::reg("b"), literal(0)),
                block([pc_assign(literal(ctx.target)), tstates_adjust(5)]),
                None,
            ),
        ]
    })
}

/// `RET()` — unconditional: `pc = readMemWord(sp); sp += 2; return`.
pub fn ret_unconditional() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        vec![
            pc_assign(call("readMemWord", [crate::ir::ident("sp")])),
            expr_stmt(assign(AssignOp::AddAssign, crate::ir::ident("sp"), literal(2))),
            ret(None),
        ]
    })
}

/// `RET(op, mask)` — conditional: `ret((f & mask) op 0)` as one call.
pub fn ret_cc(op: BinOp, mask: i32) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("ret", [cc_test(op, mask)]))])
}

/// `JP()` — unconditional: `pc = target; return`.
pub fn jp() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![pc_assign(literal(ctx.target)), ret(None)])
}

/// `JP(op, mask)` — conditional: `if ((f & mask) op 0) { pc = target; return }`.
pub fn jp_cc(op: BinOp, mask: i32) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| {
        vec![if_stmt(
            cc_test(op, mask),
            block([pc_assign(literal(ctx.target)), ret(None)]),
            None,
        )]
    })
}

/// `JP (HL)` — `pc = getHL(); return`.
pub fn jp_hl() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![pc_assign(call("getHL", [])), ret(None)])
}

/// `JP_X(ixreg)` — `JP (IX)`/`JP (IY)`: `pc = getIX(); return`.
pub fn jp_x(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![pc_assign(ixreg.getter()), ret(None)])
}

/// `CALL()` — unconditional: `push1(current_pc+2); pc = target; return`.
pub fn call_unconditional() -> PendingEmitter {
    emitter(|ctx: EmitCtx| {
        vec![
            expr_stmt(call("push1", [literal(ctx.current_pc + 2)])),
            pc_assign(literal(ctx.target)),
            ret(None),
        ]
    })
}

/// `CALL(op, mask)` — conditional: taken branch calls/jumps as above and
/// pays the extra 7 T-states a call only costs when it's actually taken
/// (17T taken vs 10T not taken), matching `jr`/`djnz`'s "extra cost on
/// the taken branch" convention.
pub fn call_cc(op: BinOp, mask: i32) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| {
        vec![if_stmt(
            cc_test(op, mask),
            block([
                expr_stmt(call("push1", [literal(ctx.current_pc + 2)])),
                pc_assign(literal(ctx.target)),
                tstates_adjust(7),
                ret(None),
            ]),
            None,
        )]
    })
}

/// `RST(addr)` — `push1(current_pc); pc = addr; return`. `addr` is one
/// of the eight fixed restart vectors baked into the opcode, not an
/// operand byte.
pub fn rst(addr: i32) -> PendingEmitter {
    emitter(move |ctx: EmitCtx| {
        vec![
            expr_stmt(call("push1", [literal(ctx.current_pc)])),
            pc_assign(literal(addr)),
            ret(None),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::F_ZERO;

    #[test]
    fn jp_is_unconditional_two_statements() {
        let emit = jp();
        let ir = emit(EmitCtx { value: 0, target: 0x2000, current_pc: 0 });
        assert_eq!(ir, vec![pc_assign(literal(0x2000)), ret(None)]);
    }

    #[test]
    fn jr_wraps_pc_write_in_if() {
        let emit = jr(literal(1));
        let ir = emit(EmitCtx { value: -2, target: 0x100, current_pc: 0x100 });
        assert_eq!(
            ir,
            vec![if_stmt(
                literal(1),
                block([pc_assign(literal(0x100)), tstates_adjust(5)]),
                None
            )]
        );
    }

    #[test]
    fn call_cc_taken_branch_adjusts_tstates() {
        let emit = call_cc(BinOp::Eq, F_ZERO);
        let ir = emit(EmitCtx { value: 0, target: 0x4000, current_pc: 0x10 });
        match &ir[0] {
            Node::If { consequent, alternate, .. } => {
                assert_eq!(
                    **consequent,
                    block([
                        expr_stmt(call("push1", [literal(0x12)])),
                        pc_assign(literal(0x4000)),
                        tstates_adjust(7),
                        ret(None),
                    ])
                );
                assert!(alternate.is_none());
            }
            _ => panic!("expected If"),
        }
    }
}
