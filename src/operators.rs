// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Contains the statistics operators for matching and routing purposes

/// Statistics that can be requested from a runtime-typed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatOperator {
    /// Largest non-NaN element.
    ///
    /// Fails with `EmptyInput` on an empty array.
    Max,
    /// Smallest non-NaN element.
    ///
    /// Fails with `EmptyInput` on an empty array.
    Min,
    /// Every adjacent pair satisfies `a <= b`.
    IsSorted,
    /// Every adjacent pair satisfies `a < b`.
    IsStrictSorted,
    /// Every element equals the first.
    IsConstant,
    /// Run count and number of elements in runs of length >= 2.
    RunLengthStats,
    /// Histogram of element bit widths, `bits + 1` bins.
    BitWidthFreq,
    /// Histogram of trailing zero bits, `bits + 1` bins.
    TrailingZeroFreq,
}

impl StatOperator {
    pub const ALL: [StatOperator; 8] = [
        StatOperator::Max,
        StatOperator::Min,
        StatOperator::IsSorted,
        StatOperator::IsStrictSorted,
        StatOperator::IsConstant,
        StatOperator::RunLengthStats,
        StatOperator::BitWidthFreq,
        StatOperator::TrailingZeroFreq,
    ];

    /// Entry point name prefix, e.g. `is_sorted` for `is_sorted_u8`.
    pub fn name(self) -> &'static str {
        match self {
            StatOperator::Max => "max",
            StatOperator::Min => "min",
            StatOperator::IsSorted => "is_sorted",
            StatOperator::IsStrictSorted => "is_strict_sorted",
            StatOperator::IsConstant => "is_constant",
            StatOperator::RunLengthStats => "run_length_stats",
            StatOperator::BitWidthFreq => "bit_width_freq",
            StatOperator::TrailingZeroFreq => "trailing_zero_freq",
        }
    }
}
