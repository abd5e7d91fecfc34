// Property tests for the chunk combiner: any ordered split of an array,
// scanned piecewise and merged, must give the whole-array result.

mod util;

use proptest::prelude::*;
use simd_stats::kernels::combine::{
    fold_partials, BitFreqPartial, ConstantPartial, MinMaxPartial, OrderPartial, Partial,
    RunPartial, SummaryPartial,
};
use simd_stats::{
    bit_width_freq_with, is_constant_with, is_sorted_with, is_strict_sorted_with, max_with,
    min_with, run_length_stats_with, trailing_zero_freq_with, Element, ScanConfig,
};
use util::*;

fn same_opt<T: Element>(a: Option<T>, b: Option<T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_value(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn merged<P: Partial>(parts: &[&[P::Elem]]) -> P {
    fold_partials(parts.iter().map(|p| P::scan(p)))
}

fn check_split<T: RawBits>(data: &[T], cuts: &[usize]) {
    let parts = split_at_cuts(data, cuts);

    let mm: MinMaxPartial<T> = merged(&parts);
    assert!(same_opt(mm.max_value(), ref_max(data)), "max over {:?}", parts);
    assert!(same_opt(mm.min_value(), ref_min(data)), "min over {:?}", parts);
    // Debug output tells -0.0 from 0.0: ties keep the first zero.
    assert_eq!(format!("{:?}", mm.max_value()), format!("{:?}", ref_max(data)));
    assert_eq!(format!("{:?}", mm.min_value()), format!("{:?}", ref_min(data)));

    let order: OrderPartial<T> = merged(&parts);
    assert_eq!(order.sorted, ref_is_sorted(data), "sorted over {:?}", parts);
    assert_eq!(order.strict, ref_is_strict_sorted(data), "strict over {:?}", parts);

    let constant: ConstantPartial<T> = merged(&parts);
    assert_eq!(constant.constant, ref_is_constant(data), "constant over {:?}", parts);

    let runs: RunPartial<T> = merged(&parts);
    assert_eq!(runs.stats(), ref_runs(data), "runs over {:?}", parts);
    assert_eq!(runs.len, data.len() as u64);

    let freq: BitFreqPartial<T> = merged(&parts);
    assert_eq!(freq.freq.bit_width_freq(), &ref_bit_width_freq(data)[..], "widths over {:?}", parts);
    assert_eq!(
        freq.freq.trailing_zero_freq(),
        &ref_trailing_zero_freq(data)[..],
        "trailing zeros over {:?}",
        parts
    );

    let whole = SummaryPartial::scan(data).finish();
    let split = merged::<SummaryPartial<T>>(&parts).finish();
    assert_eq!(format!("{:?}", whole.runs), format!("{:?}", split.runs));
    assert_eq!(whole.is_sorted, split.is_sorted);
    assert_eq!(whole.is_constant, split.is_constant);
    assert!(same_opt(whole.max, split.max));
    assert_eq!(whole.bit_freq, split.bit_freq);
}

fn check_chunked<T: RawBits>(data: &[T], chunk_len: usize) {
    let cfg = ScanConfig::new().chunked(chunk_len);
    match (max_with(data, &cfg), ref_max(data)) {
        (Ok(got), Some(expect)) => assert_same_value(got, expect),
        (Err(_), None) => {}
        (got, expect) => panic!("max: got {:?}, expected {:?}", got, expect),
    }
    match (min_with(data, &cfg), ref_min(data)) {
        (Ok(got), Some(expect)) => assert_same_value(got, expect),
        (Err(_), None) => {}
        (got, expect) => panic!("min: got {:?}, expected {:?}", got, expect),
    }
    assert_eq!(is_sorted_with(data, &cfg), Ok(ref_is_sorted(data)));
    assert_eq!(is_strict_sorted_with(data, &cfg), Ok(ref_is_strict_sorted(data)));
    assert_eq!(is_constant_with(data, &cfg), Ok(ref_is_constant(data)));
    assert_eq!(run_length_stats_with(data, &cfg), Ok(ref_runs(data)));
    assert_eq!(bit_width_freq_with(data, &cfg), Ok(ref_bit_width_freq(data)));
    assert_eq!(trailing_zero_freq_with(data, &cfg), Ok(ref_trailing_zero_freq(data)));
}

macro_rules! combine_props {
    ($mod_name:ident, $ty:ty, $elem:expr) => {
        mod $mod_name {
            use super::*;

            proptest! {
                #[test]
                fn test_any_split_matches_whole(
                    data in prop::collection::vec($elem, 0..300),
                    cuts in prop::collection::vec(0usize..300, 0..6),
                ) {
                    check_split::<$ty>(&data, &cuts);
                }

                #[test]
                fn test_chunked_matches_reference(
                    data in prop::collection::vec($elem, 0..300),
                    chunk_len in 1usize..40,
                ) {
                    check_chunked::<$ty>(&data, chunk_len);
                }
            }
        }
    };
}

combine_props!(combine_u8, u8, small_ints::<u8>(0, 4));
combine_props!(combine_u16, u16, small_ints::<u16>(0, 4));
combine_props!(combine_u32, u32, small_ints::<u32>(0, 4));
combine_props!(combine_u64, u64, small_ints::<u64>(0, 4));
combine_props!(combine_i8, i8, small_ints::<i8>(-2, 2));
combine_props!(combine_i16, i16, small_ints::<i16>(-2, 2));
combine_props!(combine_i32, i32, small_ints::<i32>(-2, 2));
combine_props!(combine_i64, i64, small_ints::<i64>(-2, 2));
combine_props!(combine_f32, f32, small_f32());
combine_props!(combine_f64, f64, small_f64());

proptest! {
    #[test]
    fn test_sorted_split_stays_sorted(
        data in prop::collection::vec(small_ints::<i32>(-50, 50), 0..300),
        cuts in prop::collection::vec(0usize..300, 0..6),
    ) {
        let data = sorted(data);
        check_split(&data, &cuts);
        prop_assert!(merged::<OrderPartial<i32>>(&split_at_cuts(&data, &cuts)).sorted);
    }

    #[test]
    fn test_sorted_floats_split(
        data in prop::collection::vec(small_f64(), 0..300),
        cuts in prop::collection::vec(0usize..300, 0..6),
    ) {
        check_split(&sorted_f64(data), &cuts);
    }
}

// Aligned buffers send every full chunk through the SIMD tier.
#[cfg(feature = "simd")]
mod aligned {
    use super::*;
    use minarrow::Vec64;

    macro_rules! aligned_props {
        ($name:ident, $ty:ty, $elem:expr) => {
            mod $name {
                use super::*;

                proptest! {
                    #[test]
                    fn test_aligned_split(
                        data in prop::collection::vec($elem, 0..600),
                        cuts in prop::collection::vec(0usize..600, 0..4),
                    ) {
                        let data = Vec64::from_slice(&data);
                        check_split::<$ty>(&data, &cuts);
                    }

                    #[test]
                    fn test_aligned_chunked(
                        data in prop::collection::vec($elem, 0..600),
                    ) {
                        let data = Vec64::from_slice(&data);
                        check_chunked::<$ty>(&data, 64);
                    }
                }
            }
        };
    }

    aligned_props!(aligned_u8, u8, small_ints::<u8>(0, 3));
    aligned_props!(aligned_u16, u16, small_ints::<u16>(0, 3));
    aligned_props!(aligned_u32, u32, small_ints::<u32>(0, 3));
    aligned_props!(aligned_u64, u64, small_ints::<u64>(0, 3));
    aligned_props!(aligned_i8, i8, small_ints::<i8>(-2, 2));
    aligned_props!(aligned_i16, i16, small_ints::<i16>(-2, 2));
    aligned_props!(aligned_i32, i32, small_ints::<i32>(-2, 2));
    aligned_props!(aligned_i64, i64, small_ints::<i64>(-2, 2));
    aligned_props!(aligned_f32, f32, small_f32());
    aligned_props!(aligned_f64, f64, small_f64());

    proptest! {
        #[test]
        fn test_aligned_i32_sorted(
            data in prop::collection::vec(small_ints::<i32>(-20, 20), 0..400),
        ) {
            let data = Vec64::from_slice(&sorted(data));
            check_chunked::<i32>(&data, 64);
            check_split::<i32>(&data, &[]);
        }
    }
}
