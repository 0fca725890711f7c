//! `NOOP`, the accumulator rotate/misc-ALU singles (`RLA`/`RRA`, and the
//! supplemented `RLCA`/`RRCA`/`DAA`/`CPL`/`SCF`/`CCF`), `HALT`, `DI`/`EI`,
//! and the port I/O pair `IN A,(n)`/`OUT (n),A`.

use crate::ir::{call, expr_stmt};
use crate::ops::{emitter, EmitCtx, PendingEmitter};

/// `NOOP()` — empty effect. Used for genuine `NOP`, and for every
/// undocumented `CB`/`ED` sub-opcode the decoder treats as a no-op per
/// spec.md §4.4's edge-case policy.
pub fn noop() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![])
}

/// `RLA()` — `rla_a()`.
pub fn rla() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("rla_a", []))])
}

/// `RRA()` — `rra_a()`.
pub fn rra() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("rra_a", []))])
}

/// `RLCA` — supplemented, same shape as `RLA` through `rlca_a`.
pub fn rlca() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("rlca_a", []))])
}

/// `RRCA` — supplemented, through `rrca_a`.
pub fn rrca() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("rrca_a", []))])
}

/// `DAA` — supplemented, through `daa`.
pub fn daa() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("daa", []))])
}

/// `CPL` — supplemented, through `cpl`.
pub fn cpl() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("cpl", []))])
}

/// `SCF` — supplemented, through `scf`.
pub fn scf() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("scf", []))])
}

/// `CCF` — supplemented, through `ccf`.
pub fn ccf() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("ccf", []))])
}

/// `HALT` — supplemented. Non-goal §1 rules out modeling the CPU's
/// actual halt-and-loop-on-NOP bus behavior here; the IR just calls the
/// host's `halt()` so the surrounding runtime can decide what "halted"
/// means. `decode` treats this opcode as a block terminator by its
/// `Control` tag, independent of this emitter existing.
pub fn halt() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("halt", []))])
}

/// `DI` — supplemented, through `di`.
pub fn di() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("di", []))])
}

/// `EI` — supplemented, through `ei`.
pub fn ei() -> PendingEmitter {
    emitter(|_ctx: EmitCtx| vec![expr_stmt(call("ei", []))])
}

/// `IN A,(n)` — supplemented: `a = ioRead(value)`.
pub fn in_a_n() -> PendingEmitter {
    emitter(|ctx: EmitCtx| {
        vec![expr_stmt(crate::ir::assign(
            crate::ir::AssignOp::Assign,
            crate::ir::reg("a"),
            call("ioRead", [crate::ir::literal(ctx.value)]),
        ))]
    })
}

/// `OUT (n),A` — supplemented: `ioWrite(value, a)`.
pub fn out_n_a() -> PendingEmitter {
    emitter(|ctx: EmitCtx| vec![expr_stmt(call("ioWrite", [crate::ir::literal(ctx.value), crate::ir::reg("a")]))])
}
