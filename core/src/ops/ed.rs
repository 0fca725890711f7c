//! The `ED` singleton group that doesn't fit elsewhere: the
//! interrupt/refresh register moves (`LD I,A`/`LD R,A`/`LD A,I`/`LD
//! A,R`), `RRD`/`RLD`, `NEG`, `IM 0/1/2`, `RETN`/`RETI`, and the
//! register-addressed port pair `IN r,(C)`/`OUT (C),r`. `LD (nn),rr`/`LD
//! rr,(nn)` and `ADC HL,rr`/`SBC HL,rr` reuse `load_store`/`arith`
//! builders directly from `tables::ed` rather than being re-wrapped
//! here. Entirely supplemented.

use crate::flags::F_CARRY;
use crate::ir::{assign, binary, call, expr_stmt, ident, reg, ret, AssignOp, BinOp};
use crate::ops::{emitter, szp_lookup, EmitCtx, PendingEmitter};

/// `LD I,A` — `i = a`.
pub fn ld_i_a() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::Assign, ident("i"), reg("a")))])
}

/// `LD R,A` — `r = a`.
pub fn ld_r_a() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::Assign, ident("r"), reg("a")))])
}

/// `LD A,I` — `a = i; f = (f & C) | SZP_TABLE[i]`, `PV` additionally
/// reflecting `iff2`; the host's `ldAIFlags` owns that last part since
/// it isn't derivable from `i` alone.
pub fn ld_a_i() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, reg("a"), ident("i"))),
            expr_stmt(assign(
                AssignOp::Assign,
                ident("f"),
                binary(
                    BinOp::Or,
                    binary(BinOp::And, ident("f"), crate::ir::literal(F_CARRY)),
                    szp_lookup(ident("i")),
                ),
            )),
            expr_stmt(call("ldAIFlags", [])),
        ]
    })
}

/// `LD A,R` — `a = r; f = (f & C) | SZP_TABLE[r]`, same `PV`-from-`iff2`
/// caveat as `LD A,I`.
pub fn ld_a_r() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, reg("a"), ident("r"))),
            expr_stmt(assign(
                AssignOp::Assign,
                ident("f"),
                binary(
                    BinOp::Or,
                    binary(BinOp::And, ident("f"), crate::ir::literal(F_CARRY)),
                    szp_lookup(ident("r")),
                ),
            )),
            expr_stmt(call("ldARFlags", [])),
        ]
    })
}

/// `RRD` — `rrd()`, the 12-bit BCD-style rotate through `A` and
/// `(HL)` the host owns in full (it touches two bytes and every flag).
pub fn rrd() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("rrd", []))])
}

/// `RLD` — `rld()`.
pub fn rld() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("rld", []))])
}

/// `NEG` — `a = neg(a)`, the flag-setting convention `inc8`/`dec8`
/// already use.
pub fn neg() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(assign(AssignOp::Assign, reg("a"), call("neg", [reg("a")])))])
}

/// `IM 0`/`IM 1`/`IM 2` — `setIM(mode)`.
pub fn im(mode: u8) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("setIM", [crate::ir::literal(mode as i32)]))])
}

/// `RETN` — `pc = readMemWord(sp); sp += 2; restoreIFF1FromIFF2();
/// return`.
pub fn retn() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, ident("pc"), call("readMemWord", [ident("sp")]))),
            expr_stmt(assign(AssignOp::AddAssign, ident("sp"), crate::ir::literal(2))),
            expr_stmt(call("restoreIFF1FromIFF2", [])),
            ret(None),
        ]
    })
}

/// `RETI` — identical register effect to `RETN`; kept as a distinct
/// combinator because it's a distinct mnemonic an external debugger
/// would want to see, not an alias collapsed away at decode time.
pub fn reti() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, ident("pc"), call("readMemWord", [ident("sp")]))),
            expr_stmt(assign(AssignOp::AddAssign, ident("sp"), crate::ir::literal(2))),
            ret(None),
        ]
    })
}

/// `IN r,(C)` — `r = ioRead(c); f = (f & C) | SZP_TABLE[r]`.
pub fn in_r_c(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| {
        vec![
            expr_stmt(assign(AssignOp::Assign, reg(r), call("ioRead", [reg("c")]))),
            expr_stmt(assign(
                AssignOp::Assign,
                ident("f"),
                binary(BinOp::Or, binary(BinOp::And, ident("f"), crate::ir::literal(F_CARRY)), szp_lookup(reg(r))),
            )),
        ]
    })
}

/// `OUT (C),r` — `ioWrite(c, r)`.
pub fn out_c_r(r: &'static str) -> PendingEmitter {
    emitter(move |_ctx: EmitCtx| vec![expr_stmt(call("ioWrite", [reg("c"), reg(r)]))])
}

/// `IN (C)` (undocumented `z=0,y=6` slot) — reads the port and updates
/// flags exactly like `IN r,(C)`, but discards the value instead of
/// storing it in a register.
pub fn in_c_flags_only() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| {
        vec![expr_stmt(assign(
            AssignOp::Assign,
            ident("f"),
            binary(BinOp::Or, binary(BinOp::And, ident("f"), crate::ir::literal(F_CARRY)), szp_lookup(call("ioRead", [reg("c")]))),
        ))]
    })
}

/// `OUT (C),0` (undocumented `z=1,y=6` slot) — `ioWrite(c, 0)`.
pub fn out_c_zero() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("ioWrite", [reg("c"), crate::ir::literal(0)]))])
}
