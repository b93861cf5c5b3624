//! Log operation for WIC.
//!
//! A [`LogOperation`] is what a registered [`crate::LogHandler`] receives for
//! every line the call tracer produces.

use alloc::string::String;

use crate::level::LogLevel;

/// A single diagnostic line together with the call depth it was produced at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOperation {
    /// Log level
    pub level: LogLevel,
    /// Log message, already indented for `depth`
    pub message: String,
    /// Nesting depth of traced calls when the line was produced
    pub depth: usize,
}

impl LogOperation {
    /// Create a new log operation
    #[must_use]
    pub const fn new(level: LogLevel, message: String, depth: usize) -> Self {
        Self { level, message, depth }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_log_operation_creation() {
        let op = LogOperation::new(LogLevel::Info, "test message".to_string(), 3);
        assert_eq!(op.level, LogLevel::Info);
        assert_eq!(op.message, "test message");
        assert_eq!(op.depth, 3);
    }
}
