// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Raw Boundary** - *Pointer and Length Entry Points*
//!
//! Entry points for callers that hold a raw buffer rather than a slice, such as
//! a foreign-function shim. Each function validates the pointer/length pair,
//! builds a borrowed slice and forwards to the safe entry point.
//!
//! ## Contract
//! - `len == 0` is the empty array; `ptr` is not read and may be null or dangling.
//! - A null `ptr` with `len > 0` is rejected with `KernelError::InvalidInput`.
//! - Otherwise `ptr` must be aligned for `T` and valid for reads of `len`
//!   elements for the duration of the call, and the memory must not be
//!   mutated concurrently.

use core::slice;

use log::warn;

use crate::errors::KernelError;
use crate::kernels::stats::dispatch::{
    bit_frequencies, is_constant, is_sorted, is_strict_sorted, max, min, run_length_stats,
    summarize,
};
use crate::kernels::stats::{ArrayStats, BitFrequencies, RunLengthStats};
use crate::traits::element::Element;
use crate::utils::confirm_raw_parts;

/// Borrows `len` elements at `ptr` after checking the boundary contract.
///
/// # Safety
/// See the module contract.
#[inline]
unsafe fn view<'a, T: Element>(
    op: &str,
    ptr: *const T,
    len: usize,
) -> Result<&'a [T], KernelError> {
    if len == 0 {
        return Ok(&[]);
    }
    if let Err(e) = confirm_raw_parts(op, ptr, len) {
        warn!("{}_{}: rejected raw input: {}", op, T::TYPE, e);
        return Err(e);
    }
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Every statistic over a raw buffer.
///
/// # Safety
/// See the module contract.
pub unsafe fn summarize_raw<T: Element>(
    ptr: *const T,
    len: usize,
) -> Result<ArrayStats<T>, KernelError> {
    Ok(summarize(unsafe { view("summarize", ptr, len)? }))
}

/// Bit-width and trailing-zero histograms of a raw buffer.
///
/// # Safety
/// See the module contract.
pub unsafe fn bit_frequencies_raw<T: Element>(
    ptr: *const T,
    len: usize,
) -> Result<BitFrequencies, KernelError> {
    Ok(bit_frequencies(unsafe { view("bit_frequencies", ptr, len)? }))
}

/// Generates the raw entry points of one element type.
macro_rules! impl_raw_entry_points {
    ($ty:ty, $max:ident, $min:ident, $sorted:ident, $strict:ident, $constant:ident, $runs:ident) => {
        #[doc = concat!("Largest non-NaN element of a raw `", stringify!($ty), "` buffer.")]
        ///
        /// # Safety
        /// See the module contract.
        pub unsafe fn $max(ptr: *const $ty, len: usize) -> Result<$ty, KernelError> {
            max(unsafe { view("max", ptr, len)? })
        }

        #[doc = concat!("Smallest non-NaN element of a raw `", stringify!($ty), "` buffer.")]
        ///
        /// # Safety
        /// See the module contract.
        pub unsafe fn $min(ptr: *const $ty, len: usize) -> Result<$ty, KernelError> {
            min(unsafe { view("min", ptr, len)? })
        }

        #[doc = concat!("Non-decreasing check over a raw `", stringify!($ty), "` buffer.")]
        ///
        /// # Safety
        /// See the module contract.
        pub unsafe fn $sorted(ptr: *const $ty, len: usize) -> Result<bool, KernelError> {
            Ok(is_sorted(unsafe { view("is_sorted", ptr, len)? }))
        }

        #[doc = concat!("Strictly increasing check over a raw `", stringify!($ty), "` buffer.")]
        ///
        /// # Safety
        /// See the module contract.
        pub unsafe fn $strict(ptr: *const $ty, len: usize) -> Result<bool, KernelError> {
            Ok(is_strict_sorted(unsafe { view("is_strict_sorted", ptr, len)? }))
        }

        #[doc = concat!("All-equal check over a raw `", stringify!($ty), "` buffer.")]
        ///
        /// # Safety
        /// See the module contract.
        pub unsafe fn $constant(ptr: *const $ty, len: usize) -> Result<bool, KernelError> {
            Ok(is_constant(unsafe { view("is_constant", ptr, len)? }))
        }

        #[doc = concat!("Run-length statistics of a raw `", stringify!($ty), "` buffer.")]
        ///
        /// # Safety
        /// See the module contract.
        pub unsafe fn $runs(ptr: *const $ty, len: usize) -> Result<RunLengthStats, KernelError> {
            Ok(run_length_stats(unsafe { view("run_length_stats", ptr, len)? }))
        }
    };
}

impl_raw_entry_points!(u8, max_u8_raw, min_u8_raw, is_sorted_u8_raw, is_strict_sorted_u8_raw, is_constant_u8_raw, run_length_stats_u8_raw);
impl_raw_entry_points!(u16, max_u16_raw, min_u16_raw, is_sorted_u16_raw, is_strict_sorted_u16_raw, is_constant_u16_raw, run_length_stats_u16_raw);
impl_raw_entry_points!(u32, max_u32_raw, min_u32_raw, is_sorted_u32_raw, is_strict_sorted_u32_raw, is_constant_u32_raw, run_length_stats_u32_raw);
impl_raw_entry_points!(u64, max_u64_raw, min_u64_raw, is_sorted_u64_raw, is_strict_sorted_u64_raw, is_constant_u64_raw, run_length_stats_u64_raw);
impl_raw_entry_points!(i8, max_i8_raw, min_i8_raw, is_sorted_i8_raw, is_strict_sorted_i8_raw, is_constant_i8_raw, run_length_stats_i8_raw);
impl_raw_entry_points!(i16, max_i16_raw, min_i16_raw, is_sorted_i16_raw, is_strict_sorted_i16_raw, is_constant_i16_raw, run_length_stats_i16_raw);
impl_raw_entry_points!(i32, max_i32_raw, min_i32_raw, is_sorted_i32_raw, is_strict_sorted_i32_raw, is_constant_i32_raw, run_length_stats_i32_raw);
impl_raw_entry_points!(i64, max_i64_raw, min_i64_raw, is_sorted_i64_raw, is_strict_sorted_i64_raw, is_constant_i64_raw, run_length_stats_i64_raw);
impl_raw_entry_points!(f32, max_f32_raw, min_f32_raw, is_sorted_f32_raw, is_strict_sorted_f32_raw, is_constant_f32_raw, run_length_stats_f32_raw);
impl_raw_entry_points!(f64, max_f64_raw, min_f64_raw, is_sorted_f64_raw, is_strict_sorted_f64_raw, is_constant_f64_raw, run_length_stats_f64_raw);

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    #[test]
    fn test_raw_matches_slice_entry_points() {
        let data = [4i32, 4, 9, -2];
        unsafe {
            assert_eq!(max_i32_raw(data.as_ptr(), data.len()), Ok(9));
            assert_eq!(min_i32_raw(data.as_ptr(), data.len()), Ok(-2));
            assert_eq!(is_sorted_i32_raw(data.as_ptr(), data.len()), Ok(false));
            assert_eq!(is_strict_sorted_i32_raw(data.as_ptr(), 2), Ok(false));
            assert_eq!(is_constant_i32_raw(data.as_ptr(), 2), Ok(true));
            assert_eq!(
                run_length_stats_i32_raw(data.as_ptr(), data.len()),
                Ok(RunLengthStats { run_count: 3, run_element_count: 2 })
            );
        }
    }

    #[test]
    fn test_raw_zero_len_is_empty_array() {
        unsafe {
            assert!(matches!(max_u8_raw(ptr::null(), 0), Err(KernelError::EmptyInput(_))));
            assert!(matches!(min_f64_raw(ptr::null(), 0), Err(KernelError::EmptyInput(_))));
            assert_eq!(is_sorted_u16_raw(ptr::null(), 0), Ok(true));
            assert_eq!(is_constant_f32_raw(ptr::NonNull::dangling().as_ptr(), 0), Ok(true));
            assert_eq!(run_length_stats_i64_raw(ptr::null(), 0), Ok(RunLengthStats::default()));
        }
    }

    #[test]
    fn test_raw_null_with_len_is_rejected() {
        unsafe {
            assert!(matches!(max_u32_raw(ptr::null(), 4), Err(KernelError::InvalidInput(_))));
            assert!(matches!(is_sorted_i8_raw(ptr::null(), 1), Err(KernelError::InvalidInput(_))));
            assert!(matches!(
                run_length_stats_f64_raw(ptr::null(), 10),
                Err(KernelError::InvalidInput(_))
            ));
            assert!(matches!(
                summarize_raw::<u64>(ptr::null(), 2),
                Err(KernelError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_summarize_raw() {
        let data = [1.0f32, 1.0, 2.0];
        let s = unsafe { summarize_raw(data.as_ptr(), data.len()) }.unwrap();
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.max, Some(2.0));
        assert!(s.is_sorted);
        assert_eq!(s.runs, RunLengthStats { run_count: 2, run_element_count: 2 });
        assert_eq!(s.bit_freq.count(), 3);
    }

    #[test]
    fn test_bit_frequencies_raw() {
        let data = [0u16, 6, 6];
        let f = unsafe { bit_frequencies_raw(data.as_ptr(), data.len()) }.unwrap();
        assert_eq!(f.bit_width_freq()[3], 2);
        assert_eq!(f.trailing_zero_freq()[16], 1);
        let empty = unsafe { bit_frequencies_raw::<i32>(ptr::null(), 0) }.unwrap();
        assert_eq!(empty.bit_width_freq(), &[0u64; 33][..]);
        assert!(matches!(
            unsafe { bit_frequencies_raw::<f64>(ptr::null(), 5) },
            Err(KernelError::InvalidInput(_))
        ));
    }
}
