// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistics Dispatch Module** - *Public Entry Points and Chunked Execution*
//!
//! Generic entry points over [`Element`] plus the per-type instantiations
//! (`max_u8` .. `trailing_zero_freq_f64`).
//!
//! ## Execution
//! Every operation scans its input as a sequence of contiguous chunks and
//! folds the chunk partials left to right with the chunk combiner. The
//! [`ScanConfig`] strategy picks the partition:
//! - **Sequential**: one chunk, the whole array
//! - **Chunked**: fixed-size chunks merged on the calling thread, stopping
//!   early once a predicate is decided
//! - **Parallel**: fixed-size chunks scanned on the rayon pool and merged with
//!   its order-preserving `reduce` (requires `parallel` feature)
//!
//! Each chunk is scanned by the SIMD tier when it is 64-byte aligned and the
//! `simd` feature is enabled, otherwise by the scalar tier. All strategies and
//! both tiers produce the same result.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{ScanConfig, ScanStrategy};
use crate::errors::{log_empty_input, KernelError};
use crate::kernels::combine::{
    BitFreqPartial, ConstantPartial, MinMaxPartial, OrderPartial, Partial, RunPartial,
    SummaryPartial,
};
use crate::kernels::stats::{ArrayStats, BitFrequencies, RunLengthStats};
use crate::traits::element::Element;
use crate::utils::confirm_chunk_len;

// Execution

/// Scans `data` under the configured strategy and returns the merged partial.
pub fn scan_partial<P: Partial>(data: &[P::Elem], cfg: &ScanConfig) -> Result<P, KernelError> {
    let strategy = cfg.resolve(data.len());
    match strategy {
        ScanStrategy::Auto | ScanStrategy::Sequential => Ok(P::scan(data)),
        ScanStrategy::Chunked { chunk_len } => {
            confirm_chunk_len("scan chunked", chunk_len)?;
            debug!(
                "scan chunked: {} elements of {} in {} chunks of {}",
                data.len(),
                <P::Elem as Element>::TYPE,
                data.len().div_ceil(chunk_len),
                chunk_len
            );
            Ok(scan_chunked(data, chunk_len))
        }
        #[cfg(feature = "parallel")]
        ScanStrategy::Parallel { chunk_len } => {
            confirm_chunk_len("scan parallel", chunk_len)?;
            debug!(
                "scan parallel: {} elements of {} in {} chunks of {}",
                data.len(),
                <P::Elem as Element>::TYPE,
                data.len().div_ceil(chunk_len),
                chunk_len
            );
            Ok(scan_parallel(data, chunk_len))
        }
    }
}

/// Scans with the default configuration. Infallible: `Auto` never carries a
/// chunk length.
#[inline]
fn scan_auto<P: Partial>(data: &[P::Elem]) -> P {
    match ScanConfig::new().resolve(data.len()) {
        #[cfg(feature = "parallel")]
        ScanStrategy::Parallel { chunk_len } => scan_parallel(data, chunk_len),
        _ => P::scan(data),
    }
}

/// Sequential left-to-right fold over `chunk_len` chunks.
#[inline]
fn scan_chunked<P: Partial>(data: &[P::Elem], chunk_len: usize) -> P {
    let mut acc = P::empty();
    for chunk in data.chunks(chunk_len) {
        acc = acc.combine(P::scan(chunk));
        if acc.settled() {
            break;
        }
    }
    acc
}

#[cfg(feature = "parallel")]
#[inline]
fn scan_parallel<P: Partial>(data: &[P::Elem], chunk_len: usize) -> P {
    data.par_chunks(chunk_len)
        .map(P::scan)
        .reduce(P::empty, P::combine)
}

// Generic entry points

/// Largest non-NaN element. An all-NaN input returns its first element.
///
/// # Errors
/// `KernelError::EmptyInput` when `data` is empty.
#[inline]
pub fn max<T: Element>(data: &[T]) -> Result<T, KernelError> {
    scan_auto::<MinMaxPartial<T>>(data)
        .max_value()
        .ok_or_else(|| KernelError::EmptyInput(log_empty_input("max", T::TYPE.name())))
}

/// Smallest non-NaN element. An all-NaN input returns its first element.
///
/// # Errors
/// `KernelError::EmptyInput` when `data` is empty.
#[inline]
pub fn min<T: Element>(data: &[T]) -> Result<T, KernelError> {
    scan_auto::<MinMaxPartial<T>>(data)
        .min_value()
        .ok_or_else(|| KernelError::EmptyInput(log_empty_input("min", T::TYPE.name())))
}

/// `(min, max)` in a single pass.
#[inline]
pub fn min_max<T: Element>(data: &[T]) -> Result<(T, T), KernelError> {
    finish_min_max(scan_auto(data))
}

/// True when every adjacent pair satisfies `a <= b`.
#[inline]
pub fn is_sorted<T: Element>(data: &[T]) -> bool {
    scan_auto::<OrderPartial<T>>(data).sorted
}

/// True when every adjacent pair satisfies `a < b`.
#[inline]
pub fn is_strict_sorted<T: Element>(data: &[T]) -> bool {
    scan_auto::<OrderPartial<T>>(data).strict
}

/// True when every element equals the first. Empty and single-element
/// arrays are constant.
#[inline]
pub fn is_constant<T: Element>(data: &[T]) -> bool {
    scan_auto::<ConstantPartial<T>>(data).constant
}

/// Run count and number of elements in runs of length >= 2.
#[inline]
pub fn run_length_stats<T: Element>(data: &[T]) -> RunLengthStats {
    scan_auto::<RunPartial<T>>(data).stats()
}

/// Bit-width and trailing-zero histograms from one scan.
#[inline]
pub fn bit_frequencies<T: Element>(data: &[T]) -> BitFrequencies {
    scan_auto::<BitFreqPartial<T>>(data).freq
}

/// `result[w]` is the number of elements whose bit pattern is `w` bits wide.
/// Has one more entry than the element has bits.
#[inline]
pub fn bit_width_freq<T: Element>(data: &[T]) -> Vec<u64> {
    bit_frequencies(data).bit_width_freq().to_vec()
}

/// `result[z]` is the number of elements with exactly `z` trailing zero bits.
#[inline]
pub fn trailing_zero_freq<T: Element>(data: &[T]) -> Vec<u64> {
    bit_frequencies(data).trailing_zero_freq().to_vec()
}

/// All statistics from one merged scan.
#[inline]
pub fn summarize<T: Element>(data: &[T]) -> ArrayStats<T> {
    scan_auto::<SummaryPartial<T>>(data).finish()
}

// Configured entry points

pub fn max_with<T: Element>(data: &[T], cfg: &ScanConfig) -> Result<T, KernelError> {
    scan_partial::<MinMaxPartial<T>>(data, cfg)?
        .max_value()
        .ok_or_else(|| KernelError::EmptyInput(log_empty_input("max", T::TYPE.name())))
}

pub fn min_with<T: Element>(data: &[T], cfg: &ScanConfig) -> Result<T, KernelError> {
    scan_partial::<MinMaxPartial<T>>(data, cfg)?
        .min_value()
        .ok_or_else(|| KernelError::EmptyInput(log_empty_input("min", T::TYPE.name())))
}

pub fn min_max_with<T: Element>(data: &[T], cfg: &ScanConfig) -> Result<(T, T), KernelError> {
    finish_min_max(scan_partial(data, cfg)?)
}

pub fn is_sorted_with<T: Element>(data: &[T], cfg: &ScanConfig) -> Result<bool, KernelError> {
    Ok(scan_partial::<OrderPartial<T>>(data, cfg)?.sorted)
}

pub fn is_strict_sorted_with<T: Element>(
    data: &[T],
    cfg: &ScanConfig,
) -> Result<bool, KernelError> {
    Ok(scan_partial::<OrderPartial<T>>(data, cfg)?.strict)
}

pub fn is_constant_with<T: Element>(data: &[T], cfg: &ScanConfig) -> Result<bool, KernelError> {
    Ok(scan_partial::<ConstantPartial<T>>(data, cfg)?.constant)
}

pub fn run_length_stats_with<T: Element>(
    data: &[T],
    cfg: &ScanConfig,
) -> Result<RunLengthStats, KernelError> {
    Ok(scan_partial::<RunPartial<T>>(data, cfg)?.stats())
}

pub fn bit_frequencies_with<T: Element>(
    data: &[T],
    cfg: &ScanConfig,
) -> Result<BitFrequencies, KernelError> {
    Ok(scan_partial::<BitFreqPartial<T>>(data, cfg)?.freq)
}

pub fn bit_width_freq_with<T: Element>(
    data: &[T],
    cfg: &ScanConfig,
) -> Result<Vec<u64>, KernelError> {
    Ok(bit_frequencies_with(data, cfg)?.bit_width_freq().to_vec())
}

pub fn trailing_zero_freq_with<T: Element>(
    data: &[T],
    cfg: &ScanConfig,
) -> Result<Vec<u64>, KernelError> {
    Ok(bit_frequencies_with(data, cfg)?.trailing_zero_freq().to_vec())
}

pub fn summarize_with<T: Element>(
    data: &[T],
    cfg: &ScanConfig,
) -> Result<ArrayStats<T>, KernelError> {
    Ok(scan_partial::<SummaryPartial<T>>(data, cfg)?.finish())
}

#[inline]
fn finish_min_max<T: Element>(p: MinMaxPartial<T>) -> Result<(T, T), KernelError> {
    match (p.min_value(), p.max_value()) {
        (Some(lo), Some(hi)) => Ok((lo, hi)),
        _ => Err(KernelError::EmptyInput(log_empty_input(
            "min_max",
            T::TYPE.name(),
        ))),
    }
}

// Per-type entry points

/// Generates the typed entry points of one element type.
macro_rules! impl_typed_entry_points {
    (
        $ty:ty,
        $max:ident,
        $min:ident,
        $sorted:ident,
        $strict:ident,
        $constant:ident,
        $runs:ident,
        $bit_width:ident,
        $trailing_zero:ident
    ) => {
        #[doc = concat!("Largest non-NaN element of a `&[", stringify!($ty), "]`. Fails with `EmptyInput` when empty.")]
        #[inline]
        pub fn $max(data: &[$ty]) -> Result<$ty, KernelError> {
            max(data)
        }

        #[doc = concat!("Smallest non-NaN element of a `&[", stringify!($ty), "]`. Fails with `EmptyInput` when empty.")]
        #[inline]
        pub fn $min(data: &[$ty]) -> Result<$ty, KernelError> {
            min(data)
        }

        #[doc = concat!("Non-decreasing check over a `&[", stringify!($ty), "]`.")]
        #[inline]
        pub fn $sorted(data: &[$ty]) -> bool {
            is_sorted(data)
        }

        #[doc = concat!("Strictly increasing check over a `&[", stringify!($ty), "]`.")]
        #[inline]
        pub fn $strict(data: &[$ty]) -> bool {
            is_strict_sorted(data)
        }

        #[doc = concat!("All-equal check over a `&[", stringify!($ty), "]`.")]
        #[inline]
        pub fn $constant(data: &[$ty]) -> bool {
            is_constant(data)
        }

        #[doc = concat!("Run-length statistics of a `&[", stringify!($ty), "]`.")]
        #[inline]
        pub fn $runs(data: &[$ty]) -> RunLengthStats {
            run_length_stats(data)
        }

        #[doc = concat!("Bit-width histogram of a `&[", stringify!($ty), "]`.")]
        #[inline]
        pub fn $bit_width(data: &[$ty]) -> Vec<u64> {
            bit_width_freq(data)
        }

        #[doc = concat!("Trailing-zero histogram of a `&[", stringify!($ty), "]`.")]
        #[inline]
        pub fn $trailing_zero(data: &[$ty]) -> Vec<u64> {
            trailing_zero_freq(data)
        }
    };
}

impl_typed_entry_points!(
    u8,
    max_u8,
    min_u8,
    is_sorted_u8,
    is_strict_sorted_u8,
    is_constant_u8,
    run_length_stats_u8,
    bit_width_freq_u8,
    trailing_zero_freq_u8
);
impl_typed_entry_points!(
    u16,
    max_u16,
    min_u16,
    is_sorted_u16,
    is_strict_sorted_u16,
    is_constant_u16,
    run_length_stats_u16,
    bit_width_freq_u16,
    trailing_zero_freq_u16
);
impl_typed_entry_points!(
    u32,
    max_u32,
    min_u32,
    is_sorted_u32,
    is_strict_sorted_u32,
    is_constant_u32,
    run_length_stats_u32,
    bit_width_freq_u32,
    trailing_zero_freq_u32
);
impl_typed_entry_points!(
    u64,
    max_u64,
    min_u64,
    is_sorted_u64,
    is_strict_sorted_u64,
    is_constant_u64,
    run_length_stats_u64,
    bit_width_freq_u64,
    trailing_zero_freq_u64
);
impl_typed_entry_points!(
    i8,
    max_i8,
    min_i8,
    is_sorted_i8,
    is_strict_sorted_i8,
    is_constant_i8,
    run_length_stats_i8,
    bit_width_freq_i8,
    trailing_zero_freq_i8
);
impl_typed_entry_points!(
    i16,
    max_i16,
    min_i16,
    is_sorted_i16,
    is_strict_sorted_i16,
    is_constant_i16,
    run_length_stats_i16,
    bit_width_freq_i16,
    trailing_zero_freq_i16
);
impl_typed_entry_points!(
    i32,
    max_i32,
    min_i32,
    is_sorted_i32,
    is_strict_sorted_i32,
    is_constant_i32,
    run_length_stats_i32,
    bit_width_freq_i32,
    trailing_zero_freq_i32
);
impl_typed_entry_points!(
    i64,
    max_i64,
    min_i64,
    is_sorted_i64,
    is_strict_sorted_i64,
    is_constant_i64,
    run_length_stats_i64,
    bit_width_freq_i64,
    trailing_zero_freq_i64
);
impl_typed_entry_points!(
    f32,
    max_f32,
    min_f32,
    is_sorted_f32,
    is_strict_sorted_f32,
    is_constant_f32,
    run_length_stats_f32,
    bit_width_freq_f32,
    trailing_zero_freq_f32
);
impl_typed_entry_points!(
    f64,
    max_f64,
    min_f64,
    is_sorted_f64,
    is_strict_sorted_f64,
    is_constant_f64,
    run_length_stats_f64,
    bit_width_freq_f64,
    trailing_zero_freq_f64
);
