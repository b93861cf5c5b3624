// WIC - wic-runtime
// Module: WIC Runtime
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Runtime side of the WebAssembly intrinsics core.
//!
//! This crate holds the data the intrinsics operate on and the intrinsics
//! that need it:
//!
//! - [`types`]: value kinds and function types
//! - [`table`]: indirect call tables and their elements
//! - [`memory`]: linear memories and the [`LinearMemory`] seam
//! - [`intrinsics`]: indirect call validation, memory growth, debug tracing
//!   and the registry of every exported intrinsic
//! - [`boundary`]: where traps stop unwinding
//! - [`config`]: settings of the context-bound intrinsics
//!
//! ```
//! use wic_runtime::{grow_memory, current_memory, Memory, GROW_FAILED};
//!
//! let mut memory = Memory::sparse(2)?;
//! assert_eq!(grow_memory(&mut memory, 65534), 2);
//! assert_eq!(current_memory(&memory), 65536);
//! assert_eq!(grow_memory(&mut memory, 1), GROW_FAILED);
//! # Ok::<(), wic_error::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod boundary;
pub mod config;
pub mod intrinsics;
pub mod memory;
pub mod table;
pub mod types;

pub use boundary::ExecutionBoundary;
pub use config::IntrinsicsConfig;
pub use intrinsics::{
    indirect::{
        call_indirect, indirect_call_index_out_of_bounds, indirect_call_signature_mismatch,
        validate_indirect_call, CalleeResolver, MismatchDiagnostics,
    },
    memory::{current_memory, grow_memory, grow_memory_within},
    registry::{ContextIntrinsic, Intrinsic, IntrinsicEntry, IntrinsicRegistry},
    IntrinsicContext, INTRINSICS_MODULE,
};
#[cfg(feature = "std")]
pub use memory::SharedMemory;
pub use memory::{
    HeapBacking, LinearMemory, Memory, MemoryBacking, SparseBacking, GROW_FAILED, MAX_PAGES,
    PAGE_SIZE,
};
pub use table::{CalleeAddr, Table, TableElement};
pub use types::{FuncType, ValueType};
