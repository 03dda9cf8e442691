//! Core logic for the numstat service
//!
//! Parses comma-separated number lists and computes descriptive statistics
//! over them. Nothing in here knows about HTTP; the server crate maps
//! [`ParseError`] onto its error envelope.
//!
//! # Examples
//!
//! ```
//! use numstat_core::{parse, MedianOrder};
//!
//! let nums = parse(Some("1,2,2,10")).unwrap();
//! assert_eq!(nums.mean(), 3.75);
//! assert_eq!(nums.median(MedianOrder::Numeric), 2.0);
//! assert_eq!(nums.mode(), 2.0);
//! ```

pub mod parse;
pub mod stats;

pub use parse::{parse, parse_with, NumberList, ParseError, ParseMode};
pub use stats::{mean, median, mode, MedianOrder, Summary};
