// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistics Scalar Kernels** - *Portable Single-Pass Chunk Scans*
//!
//! Scalar implementations of every statistics scan. Each kernel walks its chunk
//! once, left to right, and returns the chunk's partial from
//! [`crate::kernels::combine`]. These are the reference semantics the SIMD
//! tier is tested against.

use crate::kernels::combine::{
    saved_len, BitFreqPartial, ConstantPartial, MinMaxPartial, OrderPartial, RunPartial,
};
use crate::traits::element::Element;

/// NaN-skipping min and max of a chunk.
#[inline]
pub fn min_max_std<T: Element>(data: &[T]) -> MinMaxPartial<T> {
    let mut acc = MinMaxPartial::new();
    for &x in data {
        acc.push(x);
    }
    acc
}

/// Sorted and strictly sorted flags of a chunk.
///
/// Stops at the first pair that is not `<=`; at that point both flags are final.
#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn order_std<T: Element>(data: &[T]) -> OrderPartial<T> {
    let (Some(&first), Some(&last)) = (data.first(), data.last()) else {
        return OrderPartial::new();
    };
    let mut strict = true;
    for pair in data.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        // NaN fails both comparisons.
        if !(a <= b) {
            return OrderPartial::unsorted(first, last);
        }
        strict &= a < b;
    }
    OrderPartial {
        ends: Some((first, last)),
        sorted: true,
        strict,
    }
}

/// Constant flag of a chunk: every element `==` the first.
#[inline]
pub fn constant_std<T: Element>(data: &[T]) -> ConstantPartial<T> {
    let Some((&first, rest)) = data.split_first() else {
        return ConstantPartial::new();
    };
    ConstantPartial {
        first: Some(first),
        constant: rest.iter().all(|&x| x == first),
    }
}

/// Run counters plus leading and trailing run of a chunk.
#[inline]
pub fn runs_std<T: Element>(data: &[T]) -> RunPartial<T> {
    let Some((&first, rest)) = data.split_first() else {
        return RunPartial::new();
    };
    let mut run_count = 1u64;
    let mut run_element_count = 0u64;
    let mut head_len = None;
    let mut prev = first;
    let mut cur_len = 1u64;

    for &x in rest {
        if x == prev {
            cur_len += 1;
        } else {
            head_len.get_or_insert(cur_len);
            run_element_count += saved_len(cur_len);
            run_count += 1;
            cur_len = 1;
        }
        prev = x;
    }
    run_element_count += saved_len(cur_len);

    RunPartial {
        len: data.len() as u64,
        run_count,
        run_element_count,
        head: Some((first, head_len.unwrap_or(cur_len))),
        tail: Some((prev, cur_len)),
    }
}

/// Bit-width and trailing-zero histograms of a chunk.
#[inline]
pub fn bit_freq_std<T: Element>(data: &[T]) -> BitFreqPartial<T> {
    let mut acc = BitFreqPartial::new();
    for &x in data {
        acc.push(x);
    }
    acc
}
