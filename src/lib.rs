// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

// At the time of writing this unlocks std::simd that the developers
// intend on stabilising but haven't yet. Only needed for the SIMD tier.
#![cfg_attr(feature = "simd", feature(portable_simd))]

// compile with RUSTFLAGS="-C target-cpu=native" cargo +nightly build --features simd

//! # **simd-stats** - *Single-Pass Structural Statistics for Primitive Arrays*
//!
//! Max, min, sortedness, constancy, run-length statistics and bit-pattern
//! histograms over dense arrays of the ten primitive numeric types, computed in one pass with optional SIMD and
//! thread-level parallelism. The results are exact and identical across every
//! execution strategy.

pub mod array;
pub mod config;
pub mod errors;
pub mod operators;
pub mod raw;
pub mod utils;

pub mod kernels {
    pub mod combine;
    pub mod stats;
}

pub mod traits {
    pub mod element;
}

pub use array::{PrimitiveSlice, Scalar, StatValue};
pub use config::{ScanConfig, ScanStrategy};
pub use errors::KernelError;
pub use kernels::stats::dispatch::*;
pub use kernels::stats::{ArrayStats, BitFrequencies, RunLengthStats};
pub use operators::StatOperator;
pub use traits::element::{Element, ElementType};
#[cfg(feature = "simd")]
pub use utils::to_aligned;
