//! Parsing of comma-separated number lists.
//!
//! Segments are split on `,`; empty segments (from `1,,2`, a leading comma or
//! a trailing comma) are dropped. Each remaining segment is read with
//! leading-numeric-prefix semantics by default, so `"3abc"` reads as `3` and
//! `"1e5x"` as `100000`. [`ParseMode::Strict`] rejects the trailing text instead.

use std::ops::Deref;

use thiserror::Error;

/// Why a raw `nums` value could not be turned into a [`NumberList`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input absent, or nothing but commas
    #[error("nums must be present as query parameter")]
    Missing,

    /// A segment with no numeric prefix (or trailing text in strict mode)
    #[error("{0} is not a number")]
    NotANumber(String),
}

impl ParseError {
    /// HTTP status code carried by this error.
    pub fn status(&self) -> u16 {
        match self {
            ParseError::Missing | ParseError::NotANumber(_) => 400,
        }
    }
}

/// How strictly each segment must look like a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Longest numeric prefix wins; trailing characters are ignored
    #[default]
    Lenient,
    /// The whole segment (up to surrounding whitespace) must be numeric
    Strict,
}

/// Ordered, non-empty list of numbers parsed from a request
#[derive(Debug, Clone, PartialEq)]
pub struct NumberList(Vec<f64>);

impl NumberList {
    /// Wrap `values`, returning `None` when the list is empty.
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self(values))
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for NumberList {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Parse `raw` leniently. See [`parse_with`].
///
/// # Examples
///
/// ```
/// use numstat_core::{parse, ParseError};
///
/// assert_eq!(&*parse(Some("1,,2")).unwrap(), &[1.0, 2.0]);
/// assert_eq!(parse(None), Err(ParseError::Missing));
/// ```
pub fn parse(raw: Option<&str>) -> Result<NumberList, ParseError> {
    parse_with(raw, ParseMode::Lenient)
}

/// Split `raw` on commas and parse every non-empty segment.
///
/// Fails with [`ParseError::Missing`] when `raw` is absent or holds no
/// segments, and with [`ParseError::NotANumber`] naming the first segment
/// that does not parse. Values keep their input order.
pub fn parse_with(raw: Option<&str>, mode: ParseMode) -> Result<NumberList, ParseError> {
    let raw = raw.ok_or(ParseError::Missing)?;

    let values = raw
        .split(',')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            parse_segment(segment, mode).ok_or_else(|| ParseError::NotANumber(segment.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    NumberList::new(values).ok_or(ParseError::Missing)
}

fn parse_segment(segment: &str, mode: ParseMode) -> Option<f64> {
    let trimmed = segment.trim_start_matches(is_space);
    let (value, rest) = numeric_prefix(trimmed)?;

    match mode {
        ParseMode::Lenient => Some(value),
        ParseMode::Strict => rest.trim_end_matches(is_space).is_empty().then_some(value),
    }
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Longest prefix of `s` that reads as a decimal float, plus the unread rest.
///
/// Accepts an optional sign followed by `Infinity` or by a mantissa with at
/// least one digit, then an optional exponent. An exponent marker without
/// digits is left unread.
fn numeric_prefix(s: &str) -> Option<(f64, &str)> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let value = if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, &s[end + "Infinity".len()..]));
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
