// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Alignment and Argument Checks*
//!
//! Small helpers shared by the dispatch layer and the raw boundary.

#[cfg(feature = "simd")]
use minarrow::Vec64;

use crate::config::SIMD_ALIGNMENT;
use crate::errors::KernelError;

/// SIMD Alignment check. Returns true if the slice is properly
/// 64-byte aligned for SIMD operations, false otherwise.
#[inline(always)]
pub fn is_simd_aligned<T>(slice: &[T]) -> bool {
    if slice.is_empty() {
        true
    } else {
        (slice.as_ptr() as usize) % SIMD_ALIGNMENT == 0
    }
}

/// Copies `data` into a 64-byte aligned `Vec64`, so every full chunk of it
/// takes the SIMD path.
#[cfg(feature = "simd")]
#[inline]
pub fn to_aligned<T: Copy>(data: &[T]) -> Vec64<T> {
    let mut out = Vec64::with_capacity(data.len());
    out.extend_from_slice(data);
    out
}

/// Validates a chunk length for chunked and parallel scans.
///
/// # Returns
/// `Ok(())` for any non-zero length, otherwise `KernelError::InvalidArguments`
/// naming the operation.
#[inline(always)]
pub fn confirm_chunk_len(label: &str, chunk_len: usize) -> Result<(), KernelError> {
    if chunk_len == 0 {
        return Err(KernelError::InvalidArguments(format!(
            "{}: chunk_len must be greater than zero",
            label
        )));
    }
    Ok(())
}

/// Validates that a raw pointer can back `len` elements.
///
/// A null pointer is only accepted together with `len == 0`.
#[inline(always)]
pub fn confirm_raw_parts<T>(label: &str, ptr: *const T, len: usize) -> Result<(), KernelError> {
    if len == 0 {
        return Ok(());
    }
    if ptr.is_null() {
        return Err(KernelError::InvalidInput(format!(
            "{}: null pointer with length {}",
            label, len
        )));
    }
    if !ptr.is_aligned() {
        return Err(KernelError::InvalidInput(format!(
            "{}: pointer {:p} is not aligned for its element type",
            label, ptr
        )));
    }
    Ok(())
}
