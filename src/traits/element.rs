// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Element Trait** - *Type Model for the Ten Primitive Element Types*
//!
//! Every statistics kernel is written once, generically over [`Element`], and
//! instantiated for `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`,
//! `f32` and `f64`.
//!
//! - **Ordering** is `PartialOrd`: signed/unsigned integer order, and IEEE
//!   comparisons for floats where NaN is neither less than nor greater than
//!   anything.
//! - **Equality** is `PartialEq`: for floats NaN != NaN and `-0.0 == 0.0`.
//! - **Scan hooks** route each chunk to the SIMD tier when the `simd` feature
//!   is enabled and the chunk is 64-byte aligned, otherwise to the scalar tier.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use core::fmt;

use log::trace;
use num_traits::Float;

use crate::kernels::combine::{
    BitFreqPartial, ConstantPartial, MinMaxPartial, OrderPartial, RunPartial,
};
#[cfg(feature = "simd")]
use crate::utils::is_simd_aligned;

/// Runtime tag for the element type of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ElementType {
    /// All supported element types, unsigned, signed, then floating point.
    pub const ALL: [ElementType; 10] = [
        ElementType::U8,
        ElementType::U16,
        ElementType::U32,
        ElementType::U64,
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::I64,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Short type name, also used as the per-type entry point suffix.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::U8 => "u8",
            ElementType::U16 => "u16",
            ElementType::U32 => "u32",
            ElementType::U64 => "u64",
            ElementType::I8 => "i8",
            ElementType::I16 => "i16",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }

    /// Size of one element in bytes.
    pub fn width_bytes(self) -> usize {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::U16 | ElementType::I16 => 2,
            ElementType::U32 | ElementType::I32 | ElementType::F32 => 4,
            ElementType::U64 | ElementType::I64 | ElementType::F64 => 8,
        }
    }

    /// Size of one element in bits, the number of bins minus one in its
    /// bit-pattern histograms.
    pub fn width_bits(self) -> u32 {
        self.width_bytes() as u32 * 8
    }

    /// SIMD lane count used for this element width on the build target.
    pub fn lanes(self) -> usize {
        match self.width_bytes() {
            1 => W8,
            2 => W16,
            4 => W32,
            _ => W64,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive element type the statistics kernels can scan.
///
/// Sealed: implemented for exactly the ten primitive numeric types.
pub trait Element:
    Copy + PartialOrd + fmt::Debug + Send + Sync + sealed::Sealed + 'static
{
    /// Runtime tag of the type.
    const TYPE: ElementType;

    /// Least value in the type's order; identity for `max`.
    const LOWEST: Self;

    /// Greatest value in the type's order; identity for `min`.
    const HIGHEST: Self;

    /// True for float NaN; always false for integers.
    fn is_nan(self) -> bool;

    /// Position of the highest set bit plus one, over the raw bit pattern.
    /// Zero has width 0; anything with the sign bit set has full width.
    fn bit_width(self) -> u32;

    /// Trailing zero bits of the raw bit pattern. Zero (and `+0.0`) has the
    /// full type width.
    fn trailing_zero_count(self) -> u32;

    /// Min/max partial of one chunk.
    fn scan_min_max(chunk: &[Self]) -> MinMaxPartial<Self>;

    /// Sortedness partial of one chunk.
    fn scan_order(chunk: &[Self]) -> OrderPartial<Self>;

    /// Constancy partial of one chunk.
    fn scan_constant(chunk: &[Self]) -> ConstantPartial<Self>;

    /// Run-length partial of one chunk.
    fn scan_runs(chunk: &[Self]) -> RunPartial<Self>;

    /// Bit-pattern histogram partial of one chunk.
    fn scan_bit_freq(chunk: &[Self]) -> BitFreqPartial<Self>;
}

/// Routes one chunk to the SIMD kernel when it is aligned, else to the scalar kernel.
macro_rules! route_chunk {
    ($label:literal, $chunk:ident, $simd:ident, $std:ident) => {{
        #[cfg(feature = "simd")]
        {
            if is_simd_aligned($chunk) {
                trace!(
                    "{}_{}: simd path, {} elements, {} lanes",
                    $label,
                    Self::TYPE,
                    $chunk.len(),
                    Self::TYPE.lanes()
                );
                return crate::kernels::stats::simd::$simd($chunk);
            }
        }
        trace!(
            "{}_{}: scalar path, {} elements",
            $label,
            Self::TYPE,
            $chunk.len()
        );
        crate::kernels::stats::std::$std($chunk)
    }};
}

/// Generates the scan hooks of one element type.
macro_rules! scan_hooks {
    ($min_max:ident, $order:ident, $constant:ident, $runs:ident, $bit_freq:ident) => {
        #[inline]
        fn scan_min_max(chunk: &[Self]) -> MinMaxPartial<Self> {
            route_chunk!("min_max", chunk, $min_max, min_max_std)
        }

        #[inline]
        fn scan_order(chunk: &[Self]) -> OrderPartial<Self> {
            route_chunk!("order", chunk, $order, order_std)
        }

        #[inline]
        fn scan_constant(chunk: &[Self]) -> ConstantPartial<Self> {
            route_chunk!("constant", chunk, $constant, constant_std)
        }

        #[inline]
        fn scan_runs(chunk: &[Self]) -> RunPartial<Self> {
            route_chunk!("runs", chunk, $runs, runs_std)
        }

        #[inline]
        fn scan_bit_freq(chunk: &[Self]) -> BitFreqPartial<Self> {
            route_chunk!("bit_freq", chunk, $bit_freq, bit_freq_std)
        }
    };
}

macro_rules! impl_element_int {
    ($ty:ty, $tag:ident, $min_max:ident, $order:ident, $constant:ident, $runs:ident, $bit_freq:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ElementType = ElementType::$tag;
            const LOWEST: Self = <$ty>::MIN;
            const HIGHEST: Self = <$ty>::MAX;

            #[inline(always)]
            fn is_nan(self) -> bool {
                false
            }

            #[inline(always)]
            fn bit_width(self) -> u32 {
                <$ty>::BITS - self.leading_zeros()
            }

            #[inline(always)]
            fn trailing_zero_count(self) -> u32 {
                self.trailing_zeros()
            }

            scan_hooks!($min_max, $order, $constant, $runs, $bit_freq);
        }
    };
}

macro_rules! impl_element_float {
    ($ty:ty, $tag:ident, $min_max:ident, $order:ident, $constant:ident, $runs:ident, $bit_freq:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ElementType = ElementType::$tag;
            const LOWEST: Self = <$ty>::NEG_INFINITY;
            const HIGHEST: Self = <$ty>::INFINITY;

            #[inline(always)]
            fn is_nan(self) -> bool {
                Float::is_nan(self)
            }

            #[inline(always)]
            fn bit_width(self) -> u32 {
                Self::TYPE.width_bits() - self.to_bits().leading_zeros()
            }

            #[inline(always)]
            fn trailing_zero_count(self) -> u32 {
                self.to_bits().trailing_zeros()
            }

            scan_hooks!($min_max, $order, $constant, $runs, $bit_freq);
        }
    };
}

impl_element_int!(
    u8,
    U8,
    min_max_u8_simd,
    order_u8_simd,
    constant_u8_simd,
    runs_u8_simd,
    bit_freq_u8_simd
);
impl_element_int!(
    u16,
    U16,
    min_max_u16_simd,
    order_u16_simd,
    constant_u16_simd,
    runs_u16_simd,
    bit_freq_u16_simd
);
impl_element_int!(
    u32,
    U32,
    min_max_u32_simd,
    order_u32_simd,
    constant_u32_simd,
    runs_u32_simd,
    bit_freq_u32_simd
);
impl_element_int!(
    u64,
    U64,
    min_max_u64_simd,
    order_u64_simd,
    constant_u64_simd,
    runs_u64_simd,
    bit_freq_u64_simd
);
impl_element_int!(
    i8,
    I8,
    min_max_i8_simd,
    order_i8_simd,
    constant_i8_simd,
    runs_i8_simd,
    bit_freq_i8_simd
);
impl_element_int!(
    i16,
    I16,
    min_max_i16_simd,
    order_i16_simd,
    constant_i16_simd,
    runs_i16_simd,
    bit_freq_i16_simd
);
impl_element_int!(
    i32,
    I32,
    min_max_i32_simd,
    order_i32_simd,
    constant_i32_simd,
    runs_i32_simd,
    bit_freq_i32_simd
);
impl_element_int!(
    i64,
    I64,
    min_max_i64_simd,
    order_i64_simd,
    constant_i64_simd,
    runs_i64_simd,
    bit_freq_i64_simd
);
impl_element_float!(
    f32,
    F32,
    min_max_f32_simd,
    order_f32_simd,
    constant_f32_simd,
    runs_f32_simd,
    bit_freq_f32_simd
);
impl_element_float!(
    f64,
    F64,
    min_max_f64_simd,
    order_f64_simd,
    constant_f64_simd,
    runs_f64_simd,
    bit_freq_f64_simd
);
