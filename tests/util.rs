#![allow(unused)]

//! Shared helpers: naive reference implementations and proptest strategies.

use proptest::prelude::*;
use simd_stats::{Element, RunLengthStats};

/// Equal under `==`, or both NaN.
pub fn same_value<T: Element>(a: T, b: T) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

pub fn assert_same_value<T: Element>(got: T, expect: T) {
    assert!(same_value(got, expect), "got {:?}, expected {:?}", got, expect);
}

/// Largest non-NaN element, first element if every element is NaN.
pub fn ref_max<T: Element>(data: &[T]) -> Option<T> {
    let mut best: Option<T> = None;
    for &x in data.iter().filter(|x| !x.is_nan()) {
        if best.map_or(true, |b| x > b) {
            best = Some(x);
        }
    }
    best.or_else(|| data.first().copied())
}

pub fn ref_min<T: Element>(data: &[T]) -> Option<T> {
    let mut best: Option<T> = None;
    for &x in data.iter().filter(|x| !x.is_nan()) {
        if best.map_or(true, |b| x < b) {
            best = Some(x);
        }
    }
    best.or_else(|| data.first().copied())
}

pub fn ref_is_sorted<T: Element>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

pub fn ref_is_strict_sorted<T: Element>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] < w[1])
}

pub fn ref_is_constant<T: Element>(data: &[T]) -> bool {
    data.iter().all(|&x| x == data[0])
}

/// Groups the array into runs and counts them directly.
pub fn ref_runs<T: Element>(data: &[T]) -> RunLengthStats {
    let mut lens: Vec<u64> = Vec::new();
    for (i, &x) in data.iter().enumerate() {
        if i > 0 && x == data[i - 1] {
            *lens.last_mut().unwrap() += 1;
        } else {
            lens.push(1);
        }
    }
    RunLengthStats {
        run_count: lens.len() as u64,
        run_element_count: lens.iter().filter(|&&l| l >= 2).sum(),
    }
}

/// The element's bit pattern zero-extended to 64 bits, plus its width.
pub trait RawBits: Element {
    const WIDTH: u32;
    fn raw_bits(self) -> u64;
}

macro_rules! impl_raw_bits {
    ($($ty:ty => $uty:ty, $width:expr);*) => {$(
        impl RawBits for $ty {
            const WIDTH: u32 = $width;
            fn raw_bits(self) -> u64 {
                self as $uty as u64
            }
        }
    )*};
}

impl_raw_bits!(
    u8 => u8, 8; u16 => u16, 16; u32 => u32, 32; u64 => u64, 64;
    i8 => u8, 8; i16 => u16, 16; i32 => u32, 32; i64 => u64, 64
);

impl RawBits for f32 {
    const WIDTH: u32 = 32;
    fn raw_bits(self) -> u64 {
        self.to_bits() as u64
    }
}

impl RawBits for f64 {
    const WIDTH: u32 = 64;
    fn raw_bits(self) -> u64 {
        self.to_bits()
    }
}

/// Counts bit widths by testing each bit from the top.
pub fn ref_bit_width_freq<T: RawBits>(data: &[T]) -> Vec<u64> {
    let mut freq = vec![0u64; T::WIDTH as usize + 1];
    for &x in data {
        let bits = x.raw_bits();
        let width = (0..T::WIDTH).rev().find(|&b| bits >> b & 1 == 1).map_or(0, |b| b + 1);
        freq[width as usize] += 1;
    }
    freq
}

pub fn ref_trailing_zero_freq<T: RawBits>(data: &[T]) -> Vec<u64> {
    let mut freq = vec![0u64; T::WIDTH as usize + 1];
    for &x in data {
        let bits = x.raw_bits();
        let tz = (0..T::WIDTH).find(|&b| bits >> b & 1 == 1).unwrap_or(T::WIDTH);
        freq[tz as usize] += 1;
    }
    freq
}

/// Splits `data` at the given cut points, clamped and sorted.
pub fn split_at_cuts<'a, T>(data: &'a [T], cuts: &[usize]) -> Vec<&'a [T]> {
    let mut cuts: Vec<usize> = cuts.iter().map(|&c| c.min(data.len())).collect();
    cuts.sort_unstable();
    let mut parts = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for c in cuts {
        parts.push(&data[start..c]);
        start = c;
    }
    parts.push(&data[start..]);
    parts
}

/// Small-domain values so runs and ties are frequent.
pub fn small_ints<T: TryFrom<i64> + core::fmt::Debug>(lo: i64, hi: i64) -> impl Strategy<Value = T> {
    (lo..hi).prop_map(|v| match T::try_from(v) {
        Ok(x) => x,
        Err(_) => unreachable!("value in range"),
    })
}

/// Floats drawn from a few values, NaN and both zeros included.
pub fn small_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        6 => (0i32..4).prop_map(|v| v as f64),
        1 => Just(f64::NAN),
        1 => Just(-0.0f64),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

pub fn small_f32() -> impl Strategy<Value = f32> {
    small_f64().prop_map(|v| v as f32)
}

/// Sorted input, so the sortedness paths past the first pair are exercised.
pub fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort_unstable();
    v
}

/// Sorted by IEEE total order: NaN last, `-0.0` before `+0.0`.
pub fn sorted_f64(mut v: Vec<f64>) -> Vec<f64> {
    v.sort_unstable_by(f64::total_cmp);
    v
}
