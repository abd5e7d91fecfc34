// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Statistics Kernel Error Handling*
//!
//! Error types for statistics scans with structured error reporting.
//!
//! ## Error Categories
//! - **Empty input**: an extremum was requested over zero elements
//! - **Invalid input**: a raw pointer/length pair broke the boundary contract
//! - **Type errors**: a runtime-typed value did not match the requested type
//! - **Argument errors**: a scan configuration could not be honoured
//!
//! Predicates and run-length statistics are total over every input, so they
//! never produce an error outside of configuration and boundary checks.

use core::fmt;
use std::error::Error;

/// Error type for all statistics kernels.
///
/// Each variant includes a contextual message string naming the operation
/// and the offending values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// `max`/`min` over zero elements. There is no value to return, and a
    /// sentinel could be mistaken for real data.
    EmptyInput(String),

    /// Null pointer paired with a non-zero length at the raw boundary.
    InvalidInput(String),

    /// Runtime-typed value does not match the requested element type.
    UnsupportedType(String),

    /// Invalid arguments provided to a kernel, e.g. a zero chunk length.
    InvalidArguments(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::EmptyInput(msg) => write!(f, "Empty input: {}", msg),
            KernelError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            KernelError::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates the message used for `EmptyInput` errors so every element type
/// reports the same shape.
pub fn log_empty_input(fname: &str, type_name: &str) -> String {
    format!("{}_{} => no elements to reduce", fname, type_name)
}
