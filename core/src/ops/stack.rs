//! `PUSH`/`POP` for the main register pairs and their `(IX|IY)`-indexed
//! counterparts. Both reuse the same host primitives the branch group
//! already needs: `PUSH rr` is exactly `push1(get<HI LO>())` — the same
//! `push1` helper `CALL`/`RST` use to push a return address — and `POP
//! rr` is the inverse of `LD16(hi,lo,'n','n')`'s `readMemWord` read.

use crate::ir::{assign, call, expr_stmt, literal, AssignOp};
use crate::ops::{emitter, get_pair_call, set_pair_call, EmitCtx, IndexReg, PendingEmitter};

/// `PUSH(hi, lo)` — `push1(get<HI LO>())`.
pub fn push(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("push1", [get_pair_call(hi, lo)]))])
}

/// `PUSH IX`/`PUSH IY` — `push1(getIX())`/`push1(getIY())`.
pub fn push_index(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("push1", [ixreg.getter()]))])
}

/// `POP(hi, lo)` — `set<HI LO>(readMemWord(sp)); sp += 2`.
pub fn pop(hi: &'static str, lo: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(set_pair_call(hi, lo, call("readMemWord", [crate::ir::ident("sp")]))),
            expr_stmt(assign(AssignOp::AddAssign, crate::ir::ident("sp"), literal(2))),
        ]
    })
}

/// `POP('i', X)` — `setIX(readMemWord(sp)); sp += 2`.
pub fn pop_index(ixreg: IndexReg) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(ixreg.setter(call("readMemWord", [crate::ir::ident("sp")]))),
            expr_stmt(assign(AssignOp::AddAssign, crate::ir::ident("sp"), literal(2))),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_bc_pushes_the_pair_getter() {
        let emit = push("b", "c");
        let ir = emit(EmitCtx::default());
        assert_eq!(ir, vec![expr_stmt(call("push1", [get_pair_call("b", "c")]))]);
    }

    #[test]
    fn pop_de_reads_word_then_advances_sp() {
        let emit = pop("d", "e");
        let ir = emit(EmitCtx::default());
        assert_eq!(ir.len(), 2);
    }
}
