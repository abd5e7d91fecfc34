// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Runtime-Typed Arrays** - *Statistics over Arrays of Unknown Element Type*
//!
//! [`PrimitiveSlice`] wraps a borrowed slice of any of the ten element types so
//! callers holding type-erased column data can request a [`StatOperator`]
//! without matching on the element type themselves.

use core::fmt;

use crate::errors::KernelError;
use crate::kernels::stats::dispatch::{
    bit_width_freq, is_constant, is_sorted, is_strict_sorted, max, min, run_length_stats,
    summarize, trailing_zero_freq,
};
use crate::kernels::stats::{ArrayStats, RunLengthStats};
use crate::operators::StatOperator;
use crate::traits::element::ElementType;

/// A borrowed primitive array tagged with its element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveSlice<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    U64(&'a [u64]),
    I8(&'a [i8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

/// A single element value of any supported type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

/// Result of a runtime-dispatched statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Scalar(Scalar),
    Bool(bool),
    Runs(RunLengthStats),
    /// A histogram, one count per bin.
    Freq(Vec<u64>),
}

/// Expands `$body` once per variant with `$data` bound to the typed slice.
macro_rules! with_slice {
    ($slice:expr, $data:ident => $body:expr) => {
        match $slice {
            PrimitiveSlice::U8($data) => $body,
            PrimitiveSlice::U16($data) => $body,
            PrimitiveSlice::U32($data) => $body,
            PrimitiveSlice::U64($data) => $body,
            PrimitiveSlice::I8($data) => $body,
            PrimitiveSlice::I16($data) => $body,
            PrimitiveSlice::I32($data) => $body,
            PrimitiveSlice::I64($data) => $body,
            PrimitiveSlice::F32($data) => $body,
            PrimitiveSlice::F64($data) => $body,
        }
    };
}

impl<'a> PrimitiveSlice<'a> {
    pub fn element_type(&self) -> ElementType {
        match self {
            PrimitiveSlice::U8(_) => ElementType::U8,
            PrimitiveSlice::U16(_) => ElementType::U16,
            PrimitiveSlice::U32(_) => ElementType::U32,
            PrimitiveSlice::U64(_) => ElementType::U64,
            PrimitiveSlice::I8(_) => ElementType::I8,
            PrimitiveSlice::I16(_) => ElementType::I16,
            PrimitiveSlice::I32(_) => ElementType::I32,
            PrimitiveSlice::I64(_) => ElementType::I64,
            PrimitiveSlice::F32(_) => ElementType::F32,
            PrimitiveSlice::F64(_) => ElementType::F64,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_slice!(*self, d => d.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes `op` over the wrapped array.
    ///
    /// # Errors
    /// `KernelError::EmptyInput` for `Max`/`Min` over an empty array.
    pub fn scan(&self, op: StatOperator) -> Result<StatValue, KernelError> {
        Ok(match op {
            StatOperator::Max => StatValue::Scalar(with_slice!(*self, d => Scalar::from(max(d)?))),
            StatOperator::Min => StatValue::Scalar(with_slice!(*self, d => Scalar::from(min(d)?))),
            StatOperator::IsSorted => StatValue::Bool(with_slice!(*self, d => is_sorted(d))),
            StatOperator::IsStrictSorted => {
                StatValue::Bool(with_slice!(*self, d => is_strict_sorted(d)))
            }
            StatOperator::IsConstant => StatValue::Bool(with_slice!(*self, d => is_constant(d))),
            StatOperator::RunLengthStats => {
                StatValue::Runs(with_slice!(*self, d => run_length_stats(d)))
            }
            StatOperator::BitWidthFreq => StatValue::Freq(with_slice!(*self, d => bit_width_freq(d))),
            StatOperator::TrailingZeroFreq => {
                StatValue::Freq(with_slice!(*self, d => trailing_zero_freq(d)))
            }
        })
    }

    /// All statistics at once, with `min`/`max` widened to [`Scalar`].
    pub fn summarize(&self) -> ArrayStats<Scalar> {
        with_slice!(*self, d => {
            let s = summarize(d);
            ArrayStats {
                len: s.len,
                min: s.min.map(Scalar::from),
                max: s.max.map(Scalar::from),
                is_sorted: s.is_sorted,
                is_strict_sorted: s.is_strict_sorted,
                is_constant: s.is_constant,
                runs: s.runs,
                bit_freq: s.bit_freq,
            }
        })
    }
}

impl Scalar {
    pub fn element_type(&self) -> ElementType {
        match self {
            Scalar::U8(_) => ElementType::U8,
            Scalar::U16(_) => ElementType::U16,
            Scalar::U32(_) => ElementType::U32,
            Scalar::U64(_) => ElementType::U64,
            Scalar::I8(_) => ElementType::I8,
            Scalar::I16(_) => ElementType::I16,
            Scalar::I32(_) => ElementType::I32,
            Scalar::I64(_) => ElementType::I64,
            Scalar::F32(_) => ElementType::F32,
            Scalar::F64(_) => ElementType::F64,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
        }
    }
}

impl StatValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StatValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            StatValue::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_runs(&self) -> Option<RunLengthStats> {
        match self {
            StatValue::Runs(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_freq(&self) -> Option<&[u64]> {
        match self {
            StatValue::Freq(f) => Some(f.as_slice()),
            _ => None,
        }
    }
}

/// Conversions between the typed and runtime-typed representations.
macro_rules! impl_conversions {
    ($ty:ty, $variant:ident) => {
        impl<'a> From<&'a [$ty]> for PrimitiveSlice<'a> {
            #[inline]
            fn from(data: &'a [$ty]) -> Self {
                PrimitiveSlice::$variant(data)
            }
        }

        impl From<$ty> for Scalar {
            #[inline]
            fn from(v: $ty) -> Self {
                Scalar::$variant(v)
            }
        }

        impl TryFrom<Scalar> for $ty {
            type Error = KernelError;

            fn try_from(s: Scalar) -> Result<Self, Self::Error> {
                match s {
                    Scalar::$variant(v) => Ok(v),
                    other => Err(KernelError::UnsupportedType(format!(
                        "expected {} scalar, got {}",
                        stringify!($ty),
                        other.element_type()
                    ))),
                }
            }
        }
    };
}

impl_conversions!(u8, U8);
impl_conversions!(u16, U16);
impl_conversions!(u32, U32);
impl_conversions!(u64, U64);
impl_conversions!(i8, I8);
impl_conversions!(i16, I16);
impl_conversions!(i32, I32);
impl_conversions!(i64, I64);
impl_conversions!(f32, F32);
impl_conversions!(f64, F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_and_len() {
        let data = [1i16, 2, 3];
        let s = PrimitiveSlice::from(&data[..]);
        assert_eq!(s.element_type(), ElementType::I16);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert!(PrimitiveSlice::F32(&[]).is_empty());
    }

    #[test]
    fn test_scan_each_operator() {
        let data = [1u32, 1, 4, 9];
        let s = PrimitiveSlice::U32(&data);
        assert_eq!(s.scan(StatOperator::Max), Ok(StatValue::Scalar(Scalar::U32(9))));
        assert_eq!(s.scan(StatOperator::Min), Ok(StatValue::Scalar(Scalar::U32(1))));
        assert_eq!(s.scan(StatOperator::IsSorted), Ok(StatValue::Bool(true)));
        assert_eq!(s.scan(StatOperator::IsStrictSorted), Ok(StatValue::Bool(false)));
        assert_eq!(s.scan(StatOperator::IsConstant), Ok(StatValue::Bool(false)));
        assert_eq!(
            s.scan(StatOperator::RunLengthStats),
            Ok(StatValue::Runs(RunLengthStats { run_count: 3, run_element_count: 2 }))
        );
        let bw = s.scan(StatOperator::BitWidthFreq).unwrap();
        assert_eq!(bw.as_freq().map(|f| f.len()), Some(33));
        assert_eq!(bw.as_freq().map(|f| (f[1], f[3], f[4])), Some((2, 1, 1)));
        let tz = s.scan(StatOperator::TrailingZeroFreq).unwrap();
        assert_eq!(tz.as_freq().map(|f| (f[0], f[2])), Some((3, 1)));
        assert_eq!(tz.as_bool(), None);
    }

    #[test]
    fn test_scan_empty() {
        let s = PrimitiveSlice::F64(&[]);
        assert!(matches!(s.scan(StatOperator::Max), Err(KernelError::EmptyInput(_))));
        assert!(matches!(s.scan(StatOperator::Min), Err(KernelError::EmptyInput(_))));
        for op in [StatOperator::IsSorted, StatOperator::IsStrictSorted, StatOperator::IsConstant] {
            assert_eq!(s.scan(op).unwrap().as_bool(), Some(true));
        }
        assert_eq!(
            s.scan(StatOperator::RunLengthStats).unwrap().as_runs(),
            Some(RunLengthStats::default())
        );
        assert_eq!(
            s.scan(StatOperator::BitWidthFreq),
            Ok(StatValue::Freq(vec![0; 65]))
        );
    }

    #[test]
    fn test_every_operator_on_every_type() {
        let u: [u64; 3] = [2, 2, 3];
        let slices = [
            PrimitiveSlice::U8(&[2, 2, 3]),
            PrimitiveSlice::U16(&[2, 2, 3]),
            PrimitiveSlice::U32(&[2, 2, 3]),
            PrimitiveSlice::U64(&u),
            PrimitiveSlice::I8(&[2, 2, 3]),
            PrimitiveSlice::I16(&[2, 2, 3]),
            PrimitiveSlice::I32(&[2, 2, 3]),
            PrimitiveSlice::I64(&[2, 2, 3]),
            PrimitiveSlice::F32(&[2.0, 2.0, 3.0]),
            PrimitiveSlice::F64(&[2.0, 2.0, 3.0]),
        ];
        for (s, ty) in slices.iter().zip(ElementType::ALL) {
            assert_eq!(s.element_type(), ty);
            for op in StatOperator::ALL {
                assert!(s.scan(op).is_ok(), "{} failed on {}", op.name(), ty);
            }
            let max = s.scan(StatOperator::Max).unwrap().as_scalar().unwrap();
            assert_eq!(max.element_type(), ty);
            assert_eq!(max.to_string(), "3");
        }
    }

    #[test]
    fn test_summarize_widens() {
        let s = PrimitiveSlice::I8(&[-1, 5]).summarize();
        assert_eq!(s.min, Some(Scalar::I8(-1)));
        assert_eq!(s.max, Some(Scalar::I8(5)));
        assert!(s.is_strict_sorted);
        assert_eq!(s.bit_freq.bits(), 8);
        assert_eq!(s.bit_freq.bit_width_freq()[8], 1);
        assert_eq!(s.bit_freq.bit_width_freq()[3], 1);
    }

    #[test]
    fn test_scalar_try_from() {
        assert_eq!(u16::try_from(Scalar::U16(7)), Ok(7));
        let err = i32::try_from(Scalar::F32(1.0)).unwrap_err();
        assert_eq!(
            err,
            KernelError::UnsupportedType("expected i32 scalar, got f32".into())
        );
    }
}
