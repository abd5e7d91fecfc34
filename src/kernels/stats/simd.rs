// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistics SIMD Kernels** - *Vectorised Chunk Scans*
//!
//! SIMD-accelerated implementations of every statistics scan using portable
//! vectorisation with `std::simd`. Lane counts are fixed at build time per
//! element width (`W8`..`W64`), and each kernel finishes with a scalar tail
//! for lengths that are not a multiple of the lane count.
//!
//! Kernels are only entered for 64-byte aligned chunks; the element type's
//! scan hook falls back to the scalar tier otherwise. Results are identical
//! to the scalar tier, including the sign of a zero max/min.
//!
//! ## Adjacent-pair kernels
//! Sortedness and run detection compare each element with its successor. A
//! block loads `data[i..i + N]` and `data[i + 1..i + N + 1]` and compares them
//! lane-wise, so lane `j` of the resulting mask describes the pair
//! `(i + j, i + j + 1)`.
//!
//! For runs, the "not equal" mask is packed into a `u64` with one bit per
//! pair. A set bit is a run boundary, and an element is a single-element run
//! exactly when the pairs on both of its sides are boundaries, which reduces
//! to `popcount(word & (word << 1))` plus a carry bit between blocks.
//!
//! ## Bit-pattern histograms
//! Elements are reinterpreted as unsigned lanes of the same width, and
//! `leading_zeros` / `trailing_zeros` are taken lane-wise. Only the final
//! histogram increment is scalar.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use core::simd::{
    Simd,
    cmp::{SimdOrd, SimdPartialEq, SimdPartialOrd},
    num::{SimdFloat, SimdUint},
};

use crate::kernels::combine::{
    BitFreqPartial, ConstantPartial, MinMaxPartial, OrderPartial, RunPartial,
};
use crate::kernels::stats::BitFrequencies;
use crate::traits::element::Element;

/// Boundary bookkeeping for the run kernels.
///
/// Pair `p` is the adjacency `(p, p + 1)`; it is a *break* when the two
/// elements differ.
#[derive(Debug, Default)]
struct BreakScan {
    breaks: u64,
    interior_singletons: u64,
    prev_break: bool,
    first_break: Option<usize>,
    last_break: Option<usize>,
}

impl BreakScan {
    /// Folds `lanes` consecutive pairs starting at pair `base`; bit `j` of
    /// `word` is pair `base + j`.
    #[inline(always)]
    fn push_word(&mut self, base: usize, word: u64, lanes: usize) {
        if word == 0 {
            self.prev_break = false;
            return;
        }
        self.breaks += word.count_ones() as u64;
        self.interior_singletons += (word & (word << 1)).count_ones() as u64;
        if self.prev_break && word & 1 == 1 {
            self.interior_singletons += 1;
        }
        self.prev_break = (word >> (lanes - 1)) & 1 == 1;
        if self.first_break.is_none() {
            self.first_break = Some(base + word.trailing_zeros() as usize);
        }
        self.last_break = Some(base + 63 - word.leading_zeros() as usize);
    }

    #[inline(always)]
    fn push_pair(&mut self, pair: usize, is_break: bool) {
        if is_break {
            self.breaks += 1;
            if self.prev_break {
                self.interior_singletons += 1;
            }
            self.first_break.get_or_insert(pair);
            self.last_break = Some(pair);
        }
        self.prev_break = is_break;
    }

    /// Converts the pair statistics of a chunk of `len >= 1` elements into
    /// its run partial.
    fn finish<T>(self, first: T, last: T, len: usize) -> RunPartial<T> {
        let n = len as u64;
        let singletons = if len == 1 {
            1
        } else {
            let head_single = self.first_break == Some(0);
            let tail_single = self.last_break == Some(len - 2);
            self.interior_singletons + head_single as u64 + tail_single as u64
        };
        RunPartial {
            len: n,
            run_count: self.breaks + 1,
            run_element_count: n - singletons,
            head: Some((first, self.first_break.map_or(n, |p| p as u64 + 1))),
            tail: Some((last, self.last_break.map_or(n, |p| (len - 1 - p) as u64))),
        }
    }
}

/// Implements SIMD min/max partials for integer slices.
macro_rules! impl_min_max_int_simd {
    ($fn_name:ident, $ty:ty, $LANES:expr) => {
        #[doc = concat!("Min/max partial of a `", stringify!($ty), "` chunk using ", stringify!($LANES), " lanes.")]
        #[inline(always)]
        pub fn $fn_name(data: &[$ty]) -> MinMaxPartial<$ty> {
            const N: usize = $LANES;
            type V = Simd<$ty, N>;

            let Some(&x0) = data.first() else {
                return MinMaxPartial::new();
            };
            let len = data.len();
            let mut min_v = V::splat(x0);
            let mut max_v = V::splat(x0);
            let mut i = 0;
            while i + N <= len {
                let v = V::from_slice(&data[i..i + N]);
                min_v = min_v.simd_min(v);
                max_v = max_v.simd_max(v);
                i += N;
            }

            let (mut min_s, mut max_s) = (x0, x0);
            for &x in min_v.as_array() {
                min_s = min_s.min(x);
            }
            for &x in max_v.as_array() {
                max_s = max_s.max(x);
            }
            for &x in &data[i..] {
                min_s = min_s.min(x);
                max_s = max_s.max(x);
            }
            MinMaxPartial {
                first: Some(x0),
                min: Some(min_s),
                max: Some(max_s),
            }
        }
    };
}

/// Implements SIMD min/max partials for float slices, skipping NaN.
macro_rules! impl_min_max_float_simd {
    ($fn_name:ident, $ty:ty, $LANES:expr) => {
        #[doc = concat!("NaN-skipping min/max partial of a `", stringify!($ty), "` chunk using ", stringify!($LANES), " lanes.")]
        #[inline(always)]
        pub fn $fn_name(data: &[$ty]) -> MinMaxPartial<$ty> {
            const N: usize = $LANES;
            type V = Simd<$ty, N>;

            let Some(&x0) = data.first() else {
                return MinMaxPartial::new();
            };
            // Seed with the first non-NaN value; NaN lanes are then replaced
            // by the identity of each reduction and can never win.
            let Some(start) = data.iter().position(|x| !x.is_nan()) else {
                return MinMaxPartial {
                    first: Some(x0),
                    min: None,
                    max: None,
                };
            };
            let len = data.len();
            let seed = data[start];
            let lo = V::splat(<$ty as Element>::HIGHEST);
            let hi = V::splat(<$ty as Element>::LOWEST);
            let mut min_v = V::splat(seed);
            let mut max_v = V::splat(seed);
            let mut i = start + 1;
            while i + N <= len {
                let v = V::from_slice(&data[i..i + N]);
                let valid = !v.is_nan();
                min_v = min_v.simd_min(valid.select(v, lo));
                max_v = max_v.simd_max(valid.select(v, hi));
                i += N;
            }

            let (mut min_s, mut max_s) = (seed, seed);
            for &x in min_v.as_array() {
                if x < min_s {
                    min_s = x;
                }
            }
            for &x in max_v.as_array() {
                if x > max_s {
                    max_s = x;
                }
            }
            for &x in &data[i..] {
                if x < min_s {
                    min_s = x;
                }
                if x > max_s {
                    max_s = x;
                }
            }
            // Lanes are not visited in element order, so a zero extremum takes
            // the sign of the first zero in the chunk.
            if min_s == 0.0 || max_s == 0.0 {
                let zero = data[start..].iter().copied().find(|&x| x == 0.0);
                if min_s == 0.0 {
                    min_s = zero.unwrap_or(min_s);
                }
                if max_s == 0.0 {
                    max_s = zero.unwrap_or(max_s);
                }
            }
            MinMaxPartial {
                first: Some(x0),
                min: Some(min_s),
                max: Some(max_s),
            }
        }
    };
}

/// Implements SIMD sortedness partials.
macro_rules! impl_order_simd {
    ($fn_name:ident, $ty:ty, $LANES:expr) => {
        #[doc = concat!("Sorted/strict partial of a `", stringify!($ty), "` chunk using ", stringify!($LANES), " lanes.")]
        #[inline(always)]
        #[allow(clippy::neg_cmp_op_on_partial_ord)]
        pub fn $fn_name(data: &[$ty]) -> OrderPartial<$ty> {
            const N: usize = $LANES;
            type V = Simd<$ty, N>;

            let (Some(&first), Some(&last)) = (data.first(), data.last()) else {
                return OrderPartial::new();
            };
            let len = data.len();
            let mut strict = true;
            let mut i = 0;
            while i + N < len {
                let a = V::from_slice(&data[i..i + N]);
                let b = V::from_slice(&data[i + 1..i + N + 1]);
                if !a.simd_le(b).all() {
                    return OrderPartial::unsorted(first, last);
                }
                strict &= a.simd_lt(b).all();
                i += N;
            }
            for j in i..len - 1 {
                let (a, b) = (data[j], data[j + 1]);
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
    };
}

/// Implements SIMD constancy partials.
macro_rules! impl_constant_simd {
    ($fn_name:ident, $ty:ty, $LANES:expr) => {
        #[doc = concat!("Constant partial of a `", stringify!($ty), "` chunk using ", stringify!($LANES), " lanes.")]
        #[inline(always)]
        pub fn $fn_name(data: &[$ty]) -> ConstantPartial<$ty> {
            const N: usize = $LANES;
            type V = Simd<$ty, N>;

            let Some(&first) = data.first() else {
                return ConstantPartial::new();
            };
            let len = data.len();
            let target = V::splat(first);
            // Start at 1: a lone NaN is constant, but NaN != NaN.
            let mut i = 1;
            while i + N <= len {
                if !V::from_slice(&data[i..i + N]).simd_eq(target).all() {
                    return ConstantPartial {
                        first: Some(first),
                        constant: false,
                    };
                }
                i += N;
            }
            ConstantPartial {
                first: Some(first),
                constant: data[i..].iter().all(|&x| x == first),
            }
        }
    };
}

/// Implements SIMD run-length partials.
macro_rules! impl_runs_simd {
    ($fn_name:ident, $ty:ty, $LANES:expr) => {
        #[doc = concat!("Run-length partial of a `", stringify!($ty), "` chunk using ", stringify!($LANES), " lanes.")]
        #[inline(always)]
        pub fn $fn_name(data: &[$ty]) -> RunPartial<$ty> {
            const N: usize = $LANES;
            type V = Simd<$ty, N>;

            let (Some(&first), Some(&last)) = (data.first(), data.last()) else {
                return RunPartial::new();
            };
            let len = data.len();
            let mut scan = BreakScan::default();
            let mut i = 0;
            while i + N < len {
                let a = V::from_slice(&data[i..i + N]);
                let b = V::from_slice(&data[i + 1..i + N + 1]);
                scan.push_word(i, a.simd_ne(b).to_bitmask(), N);
                i += N;
            }
            for j in i..len - 1 {
                scan.push_pair(j, data[j] != data[j + 1]);
            }
            scan.finish(first, last, len)
        }
    };
}

/// Implements SIMD bit-width and trailing-zero histograms. `$bits` maps the
/// loaded vector `$v` to unsigned lanes of the same width.
macro_rules! impl_bit_freq_simd {
    ($fn_name:ident, $ty:ty, $LANES:expr, |$v:ident| $bits:expr) => {
        #[doc = concat!("Bit-pattern histograms of a `", stringify!($ty), "` chunk using ", stringify!($LANES), " lanes.")]
        #[inline(always)]
        pub fn $fn_name(data: &[$ty]) -> BitFreqPartial<$ty> {
            const N: usize = $LANES;
            type V = Simd<$ty, N>;

            let width = <$ty as Element>::TYPE.width_bits();
            let mut freq = BitFrequencies::new(width);
            let len = data.len();
            let mut i = 0;
            while i + N <= len {
                let $v = V::from_slice(&data[i..i + N]);
                let bits = $bits;
                let lz = bits.leading_zeros();
                let tz = bits.trailing_zeros();
                for (&l, &t) in lz.as_array().iter().zip(tz.as_array().iter()) {
                    freq.record(width - l as u32, t as u32);
                }
                i += N;
            }
            for &x in &data[i..] {
                freq.record(Element::bit_width(x), Element::trailing_zero_count(x));
            }
            BitFreqPartial::from_freq(freq)
        }
    };
}

impl_min_max_int_simd!(min_max_u8_simd, u8, W8);
impl_min_max_int_simd!(min_max_u16_simd, u16, W16);
impl_min_max_int_simd!(min_max_u32_simd, u32, W32);
impl_min_max_int_simd!(min_max_u64_simd, u64, W64);
impl_min_max_int_simd!(min_max_i8_simd, i8, W8);
impl_min_max_int_simd!(min_max_i16_simd, i16, W16);
impl_min_max_int_simd!(min_max_i32_simd, i32, W32);
impl_min_max_int_simd!(min_max_i64_simd, i64, W64);
impl_min_max_float_simd!(min_max_f32_simd, f32, W32);
impl_min_max_float_simd!(min_max_f64_simd, f64, W64);

impl_order_simd!(order_u8_simd, u8, W8);
impl_order_simd!(order_u16_simd, u16, W16);
impl_order_simd!(order_u32_simd, u32, W32);
impl_order_simd!(order_u64_simd, u64, W64);
impl_order_simd!(order_i8_simd, i8, W8);
impl_order_simd!(order_i16_simd, i16, W16);
impl_order_simd!(order_i32_simd, i32, W32);
impl_order_simd!(order_i64_simd, i64, W64);
impl_order_simd!(order_f32_simd, f32, W32);
impl_order_simd!(order_f64_simd, f64, W64);

impl_constant_simd!(constant_u8_simd, u8, W8);
impl_constant_simd!(constant_u16_simd, u16, W16);
impl_constant_simd!(constant_u32_simd, u32, W32);
impl_constant_simd!(constant_u64_simd, u64, W64);
impl_constant_simd!(constant_i8_simd, i8, W8);
impl_constant_simd!(constant_i16_simd, i16, W16);
impl_constant_simd!(constant_i32_simd, i32, W32);
impl_constant_simd!(constant_i64_simd, i64, W64);
impl_constant_simd!(constant_f32_simd, f32, W32);
impl_constant_simd!(constant_f64_simd, f64, W64);

impl_runs_simd!(runs_u8_simd, u8, W8);
impl_runs_simd!(runs_u16_simd, u16, W16);
impl_runs_simd!(runs_u32_simd, u32, W32);
impl_runs_simd!(runs_u64_simd, u64, W64);
impl_runs_simd!(runs_i8_simd, i8, W8);
impl_runs_simd!(runs_i16_simd, i16, W16);
impl_runs_simd!(runs_i32_simd, i32, W32);
impl_runs_simd!(runs_i64_simd, i64, W64);
impl_runs_simd!(runs_f32_simd, f32, W32);
impl_runs_simd!(runs_f64_simd, f64, W64);
impl_bit_freq_simd!(bit_freq_u8_simd, u8, W8, |v| v);
impl_bit_freq_simd!(bit_freq_u16_simd, u16, W16, |v| v);
impl_bit_freq_simd!(bit_freq_u32_simd, u32, W32, |v| v);
impl_bit_freq_simd!(bit_freq_u64_simd, u64, W64, |v| v);
impl_bit_freq_simd!(bit_freq_i8_simd, i8, W8, |v| v.cast::<u8>());
impl_bit_freq_simd!(bit_freq_i16_simd, i16, W16, |v| v.cast::<u16>());
impl_bit_freq_simd!(bit_freq_i32_simd, i32, W32, |v| v.cast::<u32>());
impl_bit_freq_simd!(bit_freq_i64_simd, i64, W64, |v| v.cast::<u64>());
impl_bit_freq_simd!(bit_freq_f32_simd, f32, W32, |v| v.to_bits());
impl_bit_freq_simd!(bit_freq_f64_simd, f64, W64, |v| v.to_bits());
