//! Descriptive statistics over number lists.
//!
//! The slice functions return `None` for empty input. [`NumberList`] is never
//! empty, so its methods return plain values.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::parse::NumberList;

/// Sort order applied before picking the median
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MedianOrder {
    /// Ascending by value
    #[default]
    Numeric,
    /// Ascending by each value's decimal string, so `10` sorts before `2`.
    /// Kept for compatibility with clients built against that behavior.
    Lexicographic,
}

impl fmt::Display for MedianOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedianOrder::Numeric => write!(f, "numeric"),
            MedianOrder::Lexicographic => write!(f, "lexicographic"),
        }
    }
}

impl FromStr for MedianOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" => Ok(MedianOrder::Numeric),
            "lexicographic" | "string" => Ok(MedianOrder::Lexicographic),
            other => Err(format!(
                "Invalid median order '{}'. Must be 'numeric' or 'lexicographic'",
                other
            )),
        }
    }
}

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// use numstat_core::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Median of `values` after sorting a copy with `order`.
///
/// Odd lengths take the middle element; even lengths average the two middle
/// elements.
///
/// # Examples
///
/// ```
/// use numstat_core::{median, MedianOrder};
///
/// let data = [1.0, 2.0, 10.0];
/// assert_eq!(median(&data, MedianOrder::Numeric), Some(2.0));
/// // "1" < "10" < "2"
/// assert_eq!(median(&data, MedianOrder::Lexicographic), Some(10.0));
/// ```
pub fn median(values: &[f64], order: MedianOrder) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sorted = sorted(values, order);
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Most frequent value. Ties go to the value seen first.
///
/// Values are compared numerically, so `0` and `-0` count as one value.
///
/// # Examples
///
/// ```
/// use numstat_core::mode;
///
/// assert_eq!(mode(&[1.0, 2.0, 2.0, 1.0]), Some(1.0));
/// assert_eq!(mode(&[]), None);
/// ```
pub fn mode(values: &[f64]) -> Option<f64> {
    // (value, count) in first-seen order, plus an index keyed by value bits
    let mut tallies: Vec<(f64, usize)> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for &value in values {
        match index.entry(value_key(value)) {
            Entry::Occupied(slot) => tallies[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(tallies.len());
                tallies.push((value, 1));
            }
        }
    }

    let mut best: Option<(f64, usize)> = None;
    for (value, count) in tallies {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

fn value_key(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

fn sorted(values: &[f64], order: MedianOrder) -> Vec<f64> {
    let mut sorted = values.to_vec();
    match order {
        MedianOrder::Numeric => sorted.sort_by(|a, b| a.total_cmp(b)),
        MedianOrder::Lexicographic => sorted.sort_by_cached_key(|v| decimal_string(*v)),
    }
    sorted
}

/// Shortest round-trip decimal rendering, with exponent notation outside
/// `[1e-6, 1e21)` and `Infinity` for infinities. This is the ordering key for
/// [`MedianOrder::Lexicographic`].
fn decimal_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    // `{:e}` renders 1e21 as "1e21"; positive exponents carry an explicit sign
    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// Mean, median and mode of one list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
}

impl Summary {
    pub fn of(nums: &NumberList, order: MedianOrder) -> Self {
        Summary {
            mean: nums.mean(),
            median: nums.median(order),
            mode: nums.mode(),
        }
    }
}

impl NumberList {
    pub fn mean(&self) -> f64 {
        mean(self).unwrap_or(f64::NAN)
    }

    pub fn median(&self, order: MedianOrder) -> f64 {
        median(self, order).unwrap_or(f64::NAN)
    }

    pub fn mode(&self) -> f64 {
        mode(self).unwrap_or(f64::NAN)
    }

    pub fn summary(&self, order: MedianOrder) -> Summary {
        Summary::of(self, order)
    }
}
