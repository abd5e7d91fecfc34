// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Chunk Combiner** - *Mergeable Partial Results for Statistics Scans*
//!
//! Every statistic is computed through an intermediate *partial* that carries
//! enough boundary state to be merged with the partial of the adjacent chunk.
//! Scanning any contiguous, order-preserving partition of an array and folding
//! the partials left to right gives exactly the whole-array partial, which is
//! what allows SIMD blocks, fixed-size chunks and worker threads to be used
//! interchangeably.
//!
//! ## Partials
//! - **`MinMaxPartial`**: NaN-skipping extrema plus the first element seen
//! - **`OrderPartial`**: first/last element and the sorted / strictly sorted flags
//! - **`ConstantPartial`**: first element and the constant flag
//! - **`RunPartial`**: run counters plus value and length of the leading and trailing runs
//! - **`BitFreqPartial`**: bit-width and trailing-zero histograms, merged by adding counts
//! - **`SummaryPartial`**: all of the above, merged component-wise
//!
//! `combine` is associative but not commutative: `self` is always the chunk
//! that precedes `rhs` in the array.

use core::marker::PhantomData;

use crate::kernels::stats::{ArrayStats, BitFrequencies, RunLengthStats};
use crate::traits::element::Element;

/// Shortest run whose elements count towards `run_element_count`.
pub const MIN_SAVED_RUN: u64 = 2;

/// Contribution of a run of `len` elements to `run_element_count`.
#[inline(always)]
pub fn saved_len(len: u64) -> u64 {
    if len >= MIN_SAVED_RUN { len } else { 0 }
}

/// Partial result of a statistics scan over one chunk.
pub trait Partial: Sized + Send {
    /// Element type the partial is computed over.
    type Elem: Element;

    /// Identity: the partial of an empty chunk.
    fn empty() -> Self;

    /// Scans one chunk. Routed through the element's SIMD or scalar kernel.
    fn scan(chunk: &[Self::Elem]) -> Self;

    /// Merges `self` (left chunk) with `rhs` (the chunk that immediately follows).
    fn combine(self, rhs: Self) -> Self;

    /// True once no further input can change the final result.
    #[inline(always)]
    fn settled(&self) -> bool {
        false
    }
}

/// Folds partials of consecutive chunks, left to right.
#[inline]
pub fn fold_partials<P, I>(parts: I) -> P
where
    P: Partial,
    I: IntoIterator<Item = P>,
{
    parts.into_iter().fold(P::empty(), P::combine)
}

// --- Extrema --------------------------------------------------------------

/// Running extrema for a chunk.
///
/// `min`/`max` ignore NaN; `first` remembers the first element seen so that
/// an all-NaN input still reduces to a value of its own type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxPartial<T> {
    pub first: Option<T>,
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Element> MinMaxPartial<T> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            first: None,
            min: None,
            max: None,
        }
    }

    /// Folds one element into the running extrema. Ties keep the current value.
    #[inline(always)]
    pub fn push(&mut self, x: T) {
        if self.first.is_none() {
            self.first = Some(x);
        }
        if x.is_nan() {
            return;
        }
        self.min = Some(match self.min {
            Some(m) if !(x < m) => m,
            _ => x,
        });
        self.max = Some(match self.max {
            Some(m) if !(x > m) => m,
            _ => x,
        });
    }

    /// Minimum of the non-NaN elements, or the first element if all are NaN.
    /// `None` only for an empty input.
    #[inline]
    pub fn min_value(&self) -> Option<T> {
        self.min.or(self.first)
    }

    /// Maximum of the non-NaN elements, or the first element if all are NaN.
    /// `None` only for an empty input.
    #[inline]
    pub fn max_value(&self) -> Option<T> {
        self.max.or(self.first)
    }
}

impl<T: Element> Default for MinMaxPartial<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Left operand wins ties so chunked results match the sequential scan.
#[inline(always)]
fn pick<T: Copy>(lhs: Option<T>, rhs: Option<T>, rhs_wins: impl Fn(T, T) -> bool) -> Option<T> {
    match (lhs, rhs) {
        (Some(l), Some(r)) => Some(if rhs_wins(l, r) { r } else { l }),
        (l, None) => l,
        (None, r) => r,
    }
}

impl<T: Element> Partial for MinMaxPartial<T> {
    type Elem = T;

    #[inline(always)]
    fn empty() -> Self {
        Self::new()
    }

    #[inline]
    fn scan(chunk: &[T]) -> Self {
        T::scan_min_max(chunk)
    }

    #[inline]
    fn combine(self, rhs: Self) -> Self {
        Self {
            first: self.first.or(rhs.first),
            min: pick(self.min, rhs.min, |l, r| r < l),
            max: pick(self.max, rhs.max, |l, r| r > l),
        }
    }
}

// --- Ordering -------------------------------------------------------------

/// Sortedness of a chunk.
///
/// `ends` holds the first and last element; `strict` implies `sorted`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderPartial<T> {
    pub ends: Option<(T, T)>,
    pub sorted: bool,
    pub strict: bool,
}

impl<T: Element> OrderPartial<T> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            ends: None,
            sorted: true,
            strict: true,
        }
    }

    /// Partial for a chunk with a known adjacency violation.
    #[inline(always)]
    pub fn unsorted(first: T, last: T) -> Self {
        Self {
            ends: Some((first, last)),
            sorted: false,
            strict: false,
        }
    }
}

impl<T: Element> Default for OrderPartial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Partial for OrderPartial<T> {
    type Elem = T;

    #[inline(always)]
    fn empty() -> Self {
        Self::new()
    }

    #[inline]
    fn scan(chunk: &[T]) -> Self {
        T::scan_order(chunk)
    }

    /// The only new adjacency introduced by the merge is `(lhs.last, rhs.first)`.
    #[inline]
    fn combine(self, rhs: Self) -> Self {
        match (self.ends, rhs.ends) {
            (None, _) => rhs,
            (_, None) => self,
            (Some((first, l_last)), Some((r_first, last))) => Self {
                ends: Some((first, last)),
                sorted: self.sorted && rhs.sorted && l_last <= r_first,
                strict: self.strict && rhs.strict && l_last < r_first,
            },
        }
    }

    #[inline(always)]
    fn settled(&self) -> bool {
        !self.sorted
    }
}

// --- Constancy ------------------------------------------------------------

/// Constancy of a chunk: every element equals `first`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantPartial<T> {
    pub first: Option<T>,
    pub constant: bool,
}

impl<T: Element> ConstantPartial<T> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            first: None,
            constant: true,
        }
    }
}

impl<T: Element> Default for ConstantPartial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Partial for ConstantPartial<T> {
    type Elem = T;

    #[inline(always)]
    fn empty() -> Self {
        Self::new()
    }

    #[inline]
    fn scan(chunk: &[T]) -> Self {
        T::scan_constant(chunk)
    }

    #[inline]
    fn combine(self, rhs: Self) -> Self {
        match (self.first, rhs.first) {
            (None, _) => rhs,
            (_, None) => self,
            (Some(l), Some(r)) => Self {
                first: Some(l),
                constant: self.constant && rhs.constant && l == r,
            },
        }
    }

    #[inline(always)]
    fn settled(&self) -> bool {
        !self.constant
    }
}

// --- Runs -----------------------------------------------------------------

/// Run-length accounting for a chunk.
///
/// Besides the public counters it keeps the value and length of the leading
/// (`head`) and trailing (`tail`) runs. When the last element of one chunk
/// equals the first element of the next, those two runs are one run split by
/// the chunk boundary and must be re-counted as such.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunPartial<T> {
    pub len: u64,
    pub run_count: u64,
    pub run_element_count: u64,
    pub head: Option<(T, u64)>,
    pub tail: Option<(T, u64)>,
}

impl<T: Element> RunPartial<T> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            len: 0,
            run_count: 0,
            run_element_count: 0,
            head: None,
            tail: None,
        }
    }

    /// Public counters of the partial.
    #[inline]
    pub fn stats(&self) -> RunLengthStats {
        RunLengthStats {
            run_count: self.run_count,
            run_element_count: self.run_element_count,
        }
    }
}

impl<T: Element> Default for RunPartial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Partial for RunPartial<T> {
    type Elem = T;

    #[inline(always)]
    fn empty() -> Self {
        Self::new()
    }

    #[inline]
    fn scan(chunk: &[T]) -> Self {
        T::scan_runs(chunk)
    }

    fn combine(self, rhs: Self) -> Self {
        let (Some((l_val, l_len)), Some((r_val, r_len))) = (self.tail, rhs.head) else {
            return if self.len == 0 { rhs } else { self };
        };
        let len = self.len + rhs.len;

        if l_val != r_val {
            return Self {
                len,
                run_count: self.run_count + rhs.run_count,
                run_element_count: self.run_element_count + rhs.run_element_count,
                head: self.head,
                tail: rhs.tail,
            };
        }

        // The boundary runs fuse: drop their separate contributions and
        // count the joined run once.
        let joined = l_len + r_len;
        let run_element_count = (self.run_element_count - saved_len(l_len))
            + (rhs.run_element_count - saved_len(r_len))
            + saved_len(joined);

        let head = if self.run_count == 1 {
            self.head.map(|(v, _)| (v, joined))
        } else {
            self.head
        };
        let tail = if rhs.run_count == 1 {
            rhs.tail.map(|(v, _)| (v, joined))
        } else {
            rhs.tail
        };

        Self {
            len,
            run_count: self.run_count + rhs.run_count - 1,
            run_element_count,
            head,
            tail,
        }
    }
}

// --- Bit patterns ---------------------------------------------------------

/// Bit-pattern histograms of a chunk, sized for the element width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitFreqPartial<T> {
    pub freq: BitFrequencies,
    _elem: PhantomData<T>,
}

impl<T: Element> BitFreqPartial<T> {
    #[inline(always)]
    pub fn new() -> Self {
        Self::from_freq(BitFrequencies::new(T::TYPE.width_bits()))
    }

    #[inline(always)]
    pub fn from_freq(freq: BitFrequencies) -> Self {
        Self {
            freq,
            _elem: PhantomData,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, x: T) {
        self.freq.record(x.bit_width(), x.trailing_zero_count());
    }
}

impl<T: Element> Default for BitFreqPartial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Partial for BitFreqPartial<T> {
    type Elem = T;

    #[inline(always)]
    fn empty() -> Self {
        Self::new()
    }

    #[inline]
    fn scan(chunk: &[T]) -> Self {
        T::scan_bit_freq(chunk)
    }

    #[inline]
    fn combine(mut self, rhs: Self) -> Self {
        self.freq.merge(&rhs.freq);
        self
    }
}

// --- Everything at once ---------------------------------------------------

/// All statistics of a chunk, merged component-wise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryPartial<T> {
    pub min_max: MinMaxPartial<T>,
    pub order: OrderPartial<T>,
    pub constant: ConstantPartial<T>,
    pub runs: RunPartial<T>,
    pub bit_freq: BitFreqPartial<T>,
}

impl<T: Element> SummaryPartial<T> {
    /// Converts the merged partial into the public statistics record.
    pub fn finish(self) -> ArrayStats<T> {
        ArrayStats {
            len: self.runs.len as usize,
            min: self.min_max.min_value(),
            max: self.min_max.max_value(),
            is_sorted: self.order.sorted,
            is_strict_sorted: self.order.strict,
            is_constant: self.constant.constant,
            runs: self.runs.stats(),
            bit_freq: self.bit_freq.freq,
        }
    }
}

impl<T: Element> Partial for SummaryPartial<T> {
    type Elem = T;

    fn empty() -> Self {
        Self {
            min_max: MinMaxPartial::new(),
            order: OrderPartial::new(),
            constant: ConstantPartial::new(),
            runs: RunPartial::new(),
            bit_freq: BitFreqPartial::new(),
        }
    }

    fn scan(chunk: &[T]) -> Self {
        Self {
            min_max: T::scan_min_max(chunk),
            order: T::scan_order(chunk),
            constant: T::scan_constant(chunk),
            runs: T::scan_runs(chunk),
            bit_freq: T::scan_bit_freq(chunk),
        }
    }

    fn combine(self, rhs: Self) -> Self {
        Self {
            min_max: self.min_max.combine(rhs.min_max),
            order: self.order.combine(rhs.order),
            constant: self.constant.combine(rhs.constant),
            runs: self.runs.combine(rhs.runs),
            bit_freq: self.bit_freq.combine(rhs.bit_freq),
        }
    }
}
