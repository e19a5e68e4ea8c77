//! Runtime error types for the rewriting engine
//!
//! This module defines [`RuntimeError`], the faults that stop the engine, and
//! [`EndOfInput`], the signal that the read channel ran dry.
//!
//! Most irregular input is not an error at all: a pattern that fails to match,
//! a close-group with nothing open, or a back-reference to a group that was
//! never captured are all handled structurally and the engine keeps going.
//! Only the conditions below halt execution.

use std::fmt;

/// The read channel is exhausted
///
/// Not a fault: the engine answers it by closing both streams and reporting
/// that the run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "End of input")
    }
}

/// Fatal errors raised while the engine runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A lookup reached past the length the chunked index was sized for
    IndexCapacityExceeded { offset: usize, capacity: usize },

    /// A node handle that should be live was found released
    DanglingNode { slot: u32, context: &'static str },

    /// Writing to the output or trace stream failed
    StreamWrite {
        stream: &'static str,
        message: String,
    },

    /// Engine configuration rejected before running
    InvalidConfig { message: String },
}

impl RuntimeError {
    /// Whether the error points at a sizing problem rather than a broken run
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RuntimeError::IndexCapacityExceeded { .. } | RuntimeError::InvalidConfig { .. }
        )
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::IndexCapacityExceeded { offset, capacity } => {
                write!(
                    f,
                    "Index capacity exceeded: offset {} is beyond the indexable length {}",
                    offset, capacity
                )
            }
            RuntimeError::DanglingNode { slot, context } => {
                write!(f, "Dangling node handle (slot {}) during {}", slot, context)
            }
            RuntimeError::StreamWrite { stream, message } => {
                write!(f, "Failed to write {} stream: {}", stream, message)
            }
            RuntimeError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
