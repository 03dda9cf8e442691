//! Property-based tests for numstat-core
//!
//! Exercises the parser and the statistics functions with generated lists.

use numstat_core::{mean, median, mode, parse, parse_with, MedianOrder, ParseError, ParseMode};
use proptest::prelude::*;

// ============================================================
// Strategies
// ============================================================

/// Finite values that survive a `to_string` / parse round trip exactly
fn finite_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64),
        (-1.0e6f64..1.0e6),
    ]
}

fn value_list() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(finite_value(), 1..50)
}

/// Small integers so that repeats (and mode ties) are common
fn repetitive_list() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0i32..5).prop_map(f64::from), 1..40)
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // Parser
    // ============================================================

    #[test]
    fn parse_preserves_order_and_count(values in value_list()) {
        let nums = parse(Some(&join(&values))).unwrap();
        prop_assert_eq!(nums.into_vec(), values);
    }

    #[test]
    fn strict_and_lenient_agree_on_clean_input(values in value_list()) {
        let raw = join(&values);
        let lenient = parse_with(Some(&raw), ParseMode::Lenient).unwrap();
        let strict = parse_with(Some(&raw), ParseMode::Strict).unwrap();
        prop_assert_eq!(lenient, strict);
    }

    #[test]
    fn extra_commas_are_ignored(values in value_list(), pad in 1usize..4) {
        let commas = ",".repeat(pad);
        let raw = format!("{}{}{}", commas, join(&values).replace(',', &format!(",{}", commas)), commas);
        let nums = parse(Some(&raw)).unwrap();
        prop_assert_eq!(nums.len(), values.len());
    }

    #[test]
    fn parse_never_panics(raw in ".{0,64}") {
        match parse(Some(&raw)) {
            Ok(nums) => prop_assert!(!nums.is_empty()),
            Err(ParseError::Missing) => prop_assert!(raw.split(',').all(str::is_empty)),
            Err(ParseError::NotANumber(segment)) => {
                prop_assert!(!segment.is_empty());
                prop_assert!(raw.split(',').any(|s| s == segment));
            }
        }
    }

    #[test]
    fn alphabetic_segments_are_rejected(word in "[a-zA-Z]{1,10}") {
        prop_assume!(!word.starts_with("Infinity"));
        let err = parse(Some(&format!("1,{}", word))).unwrap_err();
        prop_assert_eq!(err.to_string(), format!("{} is not a number", word));
        prop_assert_eq!(err.status(), 400);
    }

    // ============================================================
    // Statistics
    // ============================================================

    #[test]
    fn mean_lies_between_min_and_max(values in value_list()) {
        let m = mean(&values).unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        // allow for rounding in the running sum
        let slack = 1e-6 * (1.0 + max.abs().max(min.abs()));
        prop_assert!(m >= min - slack && m <= max + slack, "mean {} outside [{}, {}]", m, min, max);
    }

    #[test]
    fn numeric_median_ignores_input_order(mut values in value_list()) {
        let before = median(&values, MedianOrder::Numeric);
        values.reverse();
        prop_assert_eq!(median(&values, MedianOrder::Numeric), before);
    }

    #[test]
    fn median_of_odd_list_is_a_member(values in value_list(), order in prop_oneof![
        Just(MedianOrder::Numeric),
        Just(MedianOrder::Lexicographic),
    ]) {
        prop_assume!(values.len() % 2 == 1);
        let m = median(&values, order).unwrap();
        prop_assert!(values.contains(&m));
    }

    #[test]
    fn mode_is_a_most_frequent_member(values in repetitive_list()) {
        let m = mode(&values).unwrap();
        let count_of = |x: f64| values.iter().filter(|&&v| v == x).count();
        let top = values.iter().map(|&v| count_of(v)).max().unwrap();
        prop_assert_eq!(count_of(m), top);
    }

    #[test]
    fn mode_tie_goes_to_earliest(values in repetitive_list()) {
        let m = mode(&values).unwrap();
        let count_of = |x: f64| values.iter().filter(|&&v| v == x).count();
        let top = count_of(m);
        let first_top = values.iter().find(|&&v| count_of(v) == top).copied();
        prop_assert_eq!(first_top, Some(m));
    }
}
