// WIC - wic-runtime
// Module: Function and value types
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly value and function types as seen by the intrinsics.
//!
//! A [`FuncType`] is owned by the module that declares it and shared with
//! table elements through an `Arc`. Two function types match only when their
//! parameter and result sequences are identical.

use alloc::vec::Vec;
use core::fmt;

use wic_error::{codes, Error, ErrorCategory, Result};

/// Largest number of parameters or results a function type may declare.
pub const MAX_FUNC_TYPE_ARITY: usize = 1000;

/// A WebAssembly value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit IEEE-754 float
    F32,
    /// 64-bit IEEE-754 float
    F64,
    /// 128-bit vector
    V128,
    /// Function reference
    FuncRef,
    /// External reference
    ExternRef,
}

impl ValueType {
    /// Text-format name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::V128 => "v128",
            Self::FuncRef => "funcref",
            Self::ExternRef => "externref",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function signature: ordered parameter kinds and ordered result kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncType {
    params:  Vec<ValueType>,
    results: Vec<ValueType>,
}

impl FuncType {
    /// Creates a function type, rejecting signatures over
    /// [`MAX_FUNC_TYPE_ARITY`] parameters or results.
    pub fn new(
        params: impl IntoIterator<Item = ValueType>,
        results: impl IntoIterator<Item = ValueType>,
    ) -> Result<Self> {
        let params: Vec<_> = params.into_iter().collect();
        let results: Vec<_> = results.into_iter().collect();
        if params.len() > MAX_FUNC_TYPE_ARITY || results.len() > MAX_FUNC_TYPE_ARITY {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::SIGNATURE_TOO_LARGE,
                "Function type declares too many parameters or results",
            ));
        }
        Ok(Self { params, results })
    }

    /// Parameter kinds in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// Result kinds in declaration order.
    #[must_use]
    pub fn results(&self) -> &[ValueType] {
        &self.results
    }

    /// Exact sequence equality of parameters and results.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.params == other.params && self.results == other.results
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, kinds: &[ValueType]) -> fmt::Result {
    f.write_str("(")?;
    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{kind}")?;
    }
    f.write_str(")")
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.params)?;
        f.write_str(" -> ")?;
        write_list(f, &self.results)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_display() {
        let ty = FuncType::new([ValueType::I32, ValueType::I64], [ValueType::F32]).unwrap();
        assert_eq!(ty.to_string(), "(i32, i64) -> (f32)");
        assert_eq!(FuncType::default().to_string(), "() -> ()");
    }

    #[test]
    fn test_matches_is_exact() {
        let a = FuncType::new([ValueType::I32], [ValueType::I32]).unwrap();
        let b = FuncType::new([ValueType::I32], [ValueType::I32]).unwrap();
        let c = FuncType::new([ValueType::I32, ValueType::I32], [ValueType::I32]).unwrap();
        let d = FuncType::new([ValueType::I32], []).unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!a.matches(&d));
        assert!(FuncType::default().matches(&FuncType::new([], []).unwrap()));
    }

    #[test]
    fn test_arity_limit() {
        let too_many = core::iter::repeat(ValueType::I32).take(MAX_FUNC_TYPE_ARITY + 1);
        let err = FuncType::new(too_many, []).unwrap_err();
        assert_eq!(err.code, codes::SIGNATURE_TOO_LARGE);
        assert!(FuncType::new([], core::iter::repeat(ValueType::F64).take(MAX_FUNC_TYPE_ARITY)).is_ok());
    }
}
