// WIC - wic-runtime
// Module: Intrinsic registry
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Name and type table a compiler binds intrinsic call sites against.
//!
//! Names are overloaded by type (`floatMin` exists for `f32` and `f64`), so
//! an intrinsic is identified by its name together with its [`FuncType`].

use alloc::vec::Vec;

use wic_error::{divide_by_zero_trap, unreachable_trap, Error, Result, TrapResult};
use wic_math as math;

use super::{indirect::indirect_call_index_out_of_bounds, INTRINSICS_MODULE};
use crate::types::{FuncType, ValueType};

/// Intrinsics that need an [`super::IntrinsicContext`], a table or a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextIntrinsic {
    /// `indirectCallSignatureMismatch`
    IndirectCallSignatureMismatch,
    /// `growMemory`
    GrowMemory,
    /// `currentMemory`
    CurrentMemory,
    /// `debugEnterFunction`
    DebugEnterFunction,
    /// `debugExitFunction`
    DebugExitFunction,
    /// `debugBreak`
    DebugBreak,
}

/// Typed entry point of an intrinsic.
#[derive(Debug, Clone, Copy)]
pub enum IntrinsicEntry {
    /// `(f32) -> f32`
    F32Unary(fn(f32) -> f32),
    /// `(f32, f32) -> f32`
    F32Binary(fn(f32, f32) -> f32),
    /// `(f64) -> f64`
    F64Unary(fn(f64) -> f64),
    /// `(f64, f64) -> f64`
    F64Binary(fn(f64, f64) -> f64),
    /// Trapping `f32 -> i32`
    F32ToI32(fn(f32) -> TrapResult<i32>),
    /// Trapping `f64 -> i32`
    F64ToI32(fn(f64) -> TrapResult<i32>),
    /// Trapping `f32 -> i64`
    F32ToI64(fn(f32) -> TrapResult<i64>),
    /// Trapping `f64 -> i64`
    F64ToI64(fn(f64) -> TrapResult<i64>),
    /// Trapping `f32 -> u32`
    F32ToU32(fn(f32) -> TrapResult<u32>),
    /// Trapping `f64 -> u32`
    F64ToU32(fn(f64) -> TrapResult<u32>),
    /// Trapping `f32 -> u64`
    F32ToU64(fn(f32) -> TrapResult<u64>),
    /// Trapping `f64 -> u64`
    F64ToU64(fn(f64) -> TrapResult<u64>),
    /// Unconditional trap point
    TrapPoint(fn() -> TrapResult<()>),
    /// Dispatched by the embedder through an intrinsic context
    Context(ContextIntrinsic),
}

/// One exported intrinsic.
#[derive(Debug, Clone)]
pub struct Intrinsic {
    /// Export name
    pub name:  &'static str,
    /// WebAssembly signature
    pub ty:    FuncType,
    /// Entry point
    pub entry: IntrinsicEntry,
}

/// The set of intrinsics exported under [`INTRINSICS_MODULE`].
#[derive(Debug, Clone, Default)]
pub struct IntrinsicRegistry {
    intrinsics: Vec<Intrinsic>,
}

fn sig<const P: usize, const R: usize>(params: [ValueType; P], results: [ValueType; R]) -> Result<FuncType> {
    FuncType::new(params, results)
}

impl IntrinsicRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { intrinsics: Vec::new() }
    }

    /// The module name intrinsics are exported under.
    #[must_use]
    pub const fn module_name(&self) -> &'static str {
        INTRINSICS_MODULE
    }

    /// Adds an intrinsic. A name may be registered once per type.
    pub fn register(&mut self, name: &'static str, ty: FuncType, entry: IntrinsicEntry) -> Result<()> {
        if self.lookup(name, &ty).is_some() {
            return Err(Error::validation_error("Intrinsic already registered for this type"));
        }
        self.intrinsics
            .try_reserve(1)
            .map_err(|_| Error::ALLOCATION_FAILED)?;
        self.intrinsics.push(Intrinsic { name, ty, entry });
        Ok(())
    }

    /// Finds the intrinsic exported as `name` with type `ty`.
    #[must_use]
    pub fn lookup(&self, name: &str, ty: &FuncType) -> Option<&Intrinsic> {
        self.intrinsics
            .iter()
            .find(|intrinsic| intrinsic.name == name && intrinsic.ty.matches(ty))
    }

    /// All overloads of `name`.
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Intrinsic> + 'a {
        self.intrinsics.iter().filter(move |intrinsic| intrinsic.name == name)
    }

    /// Every registered intrinsic in registration order.
    pub fn iter(&self) -> core::slice::Iter<'_, Intrinsic> {
        self.intrinsics.iter()
    }

    /// Number of registered intrinsics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intrinsics.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intrinsics.is_empty()
    }

    /// The full standard intrinsic set.
    pub fn standard() -> Result<Self> {
        use ContextIntrinsic as C;
        use IntrinsicEntry as E;
        use ValueType::{F32, F64, I32, I64};

        let mut registry = Self::new();

        let unary: [(&'static str, fn(f32) -> f32, fn(f64) -> f64); 4] = [
            ("floatCeil", math::f32_ceil, math::f64_ceil),
            ("floatFloor", math::f32_floor, math::f64_floor),
            ("floatTrunc", math::f32_trunc, math::f64_trunc),
            ("floatNearest", math::f32_nearest, math::f64_nearest),
        ];
        for (name, f32_op, f64_op) in unary {
            registry.register(name, sig([F32], [F32])?, E::F32Unary(f32_op))?;
            registry.register(name, sig([F64], [F64])?, E::F64Unary(f64_op))?;
        }

        let binary: [(&'static str, fn(f32, f32) -> f32, fn(f64, f64) -> f64); 2] = [
            ("floatMin", math::f32_min, math::f64_min),
            ("floatMax", math::f32_max, math::f64_max),
        ];
        for (name, f32_op, f64_op) in binary {
            registry.register(name, sig([F32, F32], [F32])?, E::F32Binary(f32_op))?;
            registry.register(name, sig([F64, F64], [F64])?, E::F64Binary(f64_op))?;
        }

        registry.register("floatToSignedInt", sig([F32], [I32])?, E::F32ToI32(math::i32_trunc_f32_s))?;
        registry.register("floatToSignedInt", sig([F64], [I32])?, E::F64ToI32(math::i32_trunc_f64_s))?;
        registry.register("floatToSignedInt", sig([F32], [I64])?, E::F32ToI64(math::i64_trunc_f32_s))?;
        registry.register("floatToSignedInt", sig([F64], [I64])?, E::F64ToI64(math::i64_trunc_f64_s))?;
        registry.register("floatToUnsignedInt", sig([F32], [I32])?, E::F32ToU32(math::i32_trunc_f32_u))?;
        registry.register("floatToUnsignedInt", sig([F64], [I32])?, E::F64ToU32(math::i32_trunc_f64_u))?;
        registry.register("floatToUnsignedInt", sig([F32], [I64])?, E::F32ToU64(math::i64_trunc_f32_u))?;
        registry.register("floatToUnsignedInt", sig([F64], [I64])?, E::F64ToU64(math::i64_trunc_f64_u))?;

        registry.register("divideByZeroTrap", sig([], [])?, E::TrapPoint(divide_by_zero_trap))?;
        registry.register("unreachableTrap", sig([], [])?, E::TrapPoint(unreachable_trap))?;
        registry.register(
            "indirectCallIndexOutOfBounds",
            sig([], [])?,
            E::TrapPoint(indirect_call_index_out_of_bounds::<()>),
        )?;

        // (table index, expected type, table)
        registry.register(
            "indirectCallSignatureMismatch",
            sig([I32, I64, I64], [])?,
            E::Context(C::IndirectCallSignatureMismatch),
        )?;
        // (delta pages, memory) -> previous pages
        registry.register("growMemory", sig([I32, I64], [I32])?, E::Context(C::GrowMemory))?;
        registry.register("currentMemory", sig([I64], [I32])?, E::Context(C::CurrentMemory))?;
        registry.register("debugEnterFunction", sig([I64], [])?, E::Context(C::DebugEnterFunction))?;
        registry.register("debugExitFunction", sig([I64], [])?, E::Context(C::DebugExitFunction))?;
        registry.register("debugBreak", sig([], [])?, E::Context(C::DebugBreak))?;

        Ok(registry)
    }
}

impl<'a> IntoIterator for &'a IntrinsicRegistry {
    type Item = &'a Intrinsic;
    type IntoIter = core::slice::Iter<'a, Intrinsic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
