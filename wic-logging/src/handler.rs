//! Log handler for WIC.
//!
//! Embedders that want trace output outside of `tracing` (a test harness, a
//! host console) register a [`LogHandler`] with a [`crate::CallTracer`].

use alloc::boxed::Box;

use crate::operation::LogOperation;

/// Function type for handling log operations
pub type LogHandler = Box<dyn Fn(LogOperation) + Send + Sync>;
