//! Prelude module for wic
//!
//! Re-exports the types and operations an embedder or code generator
//! typically needs, so `use wic::prelude::*;` is enough to bind every
//! intrinsic.

pub use wic_error::{
    divide_by_zero_trap, raise, unreachable_trap, Error, ErrorCategory, Result, Trap, TrapCause,
    TrapResult,
};
pub use wic_logging::{CallTracer, LogLevel, LogOperation};
pub use wic_math::{
    f32_ceil, f32_floor, f32_max, f32_min, f32_nearest, f32_trunc, f64_ceil, f64_floor, f64_max,
    f64_min, f64_nearest, f64_trunc, i32_trunc_f32_s, i32_trunc_f32_u, i32_trunc_f64_s,
    i32_trunc_f64_u, i64_trunc_f32_s, i64_trunc_f32_u, i64_trunc_f64_s, i64_trunc_f64_u,
    FloatBits32, FloatBits64, WasmFloat,
};
pub use wic_runtime::{
    call_indirect, current_memory, grow_memory, validate_indirect_call, CalleeAddr,
    CalleeResolver, ExecutionBoundary, FuncType, IntrinsicContext, IntrinsicRegistry,
    IntrinsicsConfig, LinearMemory, Memory, Table, TableElement, ValueType, GROW_FAILED,
    MAX_PAGES, PAGE_SIZE,
};
