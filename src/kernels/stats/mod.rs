// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistics Kernels Module** - *Single-Pass Structural Statistics*
//!
//! Cheap structural statistics over dense primitive arrays, used to decide how an
//! array should be encoded: all values equal favours constant encoding,
//! non-decreasing data favours delta encoding, few long runs favour run-length
//! encoding.
//!
//! ## Architecture
//!
//! The stats module follows a three-tier architecture:
//! - **Dispatch layer**: generic and per-type entry points, chunking strategy
//!   and the merge of chunk partials
//! - **SIMD kernels**: vectorised chunk scans using `std::simd` with build-time lane counts
//! - **Scalar kernels**: portable single-pass chunk scans, used for unaligned
//!   chunks and when the `simd` feature is off
//!
//! Both kernel tiers emit the partials from [`crate::kernels::combine`], so a
//! chunk may be scanned by either tier without changing the merged result.
//!
//! ## Operations
//! - **`max` / `min` / `min_max`**: NaN-skipping extrema, `EmptyInput` on empty arrays
//! - **`is_sorted` / `is_strict_sorted`**: non-decreasing / strictly increasing checks
//! - **`is_constant`**: all elements equal
//! - **`run_length_stats`**: run count and number of elements in runs of length >= 2
//! - **`bit_width_freq` / `trailing_zero_freq`**: histograms over the elements' bit
//!   patterns, the inputs to bit-packing and frame-of-reference decisions
//! - **`summarize`**: everything above in one call
//!
//! ## Floating point
//! Ordering follows IEEE comparisons and equality follows IEEE `==`: NaN is
//! neither ordered nor equal to anything, including itself, and `-0.0 == 0.0`.

pub mod dispatch;
#[cfg(feature = "simd")]
pub mod simd;
pub mod std;

/// Run-length statistics of an array.
///
/// A run is a maximal contiguous block of equal elements. `run_element_count`
/// counts the elements that belong to runs of length two or more, i.e. the
/// elements a run-length encoding would collapse.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunLengthStats {
    pub run_count: u64,
    pub run_element_count: u64,
}

/// Histogram bins for 64-bit elements: widths `0..=64`.
pub const MAX_FREQ_BINS: usize = 65;

/// Bit-pattern histograms of an array.
///
/// Elements are read as their raw bit pattern: two's complement for signed
/// integers, IEEE 754 bits for floats. `bit_width_freq()[w]` counts elements
/// whose highest set bit is bit `w - 1` (zero has width 0), and
/// `trailing_zero_freq()[z]` counts elements with exactly `z` trailing zero
/// bits (zero has all of them). Both slices have `bits + 1` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitFrequencies {
    bits: u32,
    bit_width: [u64; MAX_FREQ_BINS],
    trailing_zero: [u64; MAX_FREQ_BINS],
}

impl BitFrequencies {
    /// Empty histograms for `bits`-wide elements.
    #[inline]
    pub fn new(bits: u32) -> Self {
        debug_assert!((bits as usize) < MAX_FREQ_BINS);
        Self {
            bits,
            bit_width: [0; MAX_FREQ_BINS],
            trailing_zero: [0; MAX_FREQ_BINS],
        }
    }

    #[inline(always)]
    pub fn record(&mut self, bit_width: u32, trailing_zeros: u32) {
        self.bit_width[bit_width as usize] += 1;
        self.trailing_zero[trailing_zeros as usize] += 1;
    }

    /// Adds the counts of `other`, which must describe the same element width.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.bits, other.bits);
        for (a, b) in self.bit_width.iter_mut().zip(other.bit_width.iter()) {
            *a += b;
        }
        for (a, b) in self.trailing_zero.iter_mut().zip(other.trailing_zero.iter()) {
            *a += b;
        }
    }

    /// Element width in bits.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub fn bit_width_freq(&self) -> &[u64] {
        &self.bit_width[..=self.bits as usize]
    }

    #[inline]
    pub fn trailing_zero_freq(&self) -> &[u64] {
        &self.trailing_zero[..=self.bits as usize]
    }

    /// Number of elements recorded.
    #[inline]
    pub fn count(&self) -> u64 {
        self.bit_width.iter().sum()
    }

    /// Smallest width that holds every element, i.e. the bit-packing width.
    #[inline]
    pub fn max_bit_width(&self) -> u32 {
        self.bit_width_freq()
            .iter()
            .rposition(|&c| c > 0)
            .map_or(0, |w| w as u32)
    }
}

/// Every statistic of an array, from a single merged scan.
///
/// `min`/`max` are `None` only when the array is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayStats<T> {
    pub len: usize,
    pub min: Option<T>,
    pub max: Option<T>,
    pub is_sorted: bool,
    pub is_strict_sorted: bool,
    pub is_constant: bool,
    pub runs: RunLengthStats,
    pub bit_freq: BitFrequencies,
}

// Shared tests for SIMD and Std
