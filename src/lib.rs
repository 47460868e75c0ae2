#![no_std]
#![doc = include_str!("../README.md")]
//!
//! # Quick Start
//!
//! ```rust
//! // Validate a range, then pull from it one value at a time.
//! let mut iter = int_sequence::range(10, 3).unwrap();
//! while iter.advance() {
//!     println!("{}", iter.current());
//! }
//!
//! // Or materialize a run of values into a buffer in one call.
//! let mut buf = [0u16; 20];
//! int_sequence::fill(&mut buf, 100);
//! assert_eq!(buf[19], 119);
//! ```
//!
//! # Element Types
//!
//! Ranges work over `i8`, `i16`, `i32`, `i64`, `isize`, `u8`, `u16`, `u32`,
//! `u64`, and `usize`. Counts are `i64`; the `i32` entry point [`range`]
//! takes an `i32` count.
//!
//! ```rust
//! use int_sequence::{range_of, OutOfBoundsParam};
//!
//! let values: Vec<i8> = range_of(-2i8, 4).unwrap().collect();
//! assert_eq!(values, [-2, -1, 0, 1]);
//!
//! let err = range_of(120i8, 9).unwrap_err();
//! assert_eq!(err.param(), OutOfBoundsParam::StartAndCount);
//! ```
//!
//! # Features
//!
//! - `std` (default): detect AVX2 at runtime and enable the `std` features
//!   of `thiserror` and `tracing`. The crate itself is always `no_std`;
//!   without this feature the fill only uses the instruction sets enabled at
//!   compile time.

#[cfg(feature = "std")]
extern crate std;

mod bounds;
mod element;
mod fill;
mod iter;
mod simd;

pub use bounds::{distance, IntRange, OutOfBoundsParam, RangeOutOfBounds};
pub use element::RangeInt;
pub use fill::{fill, fill_scalar, fill_with, vector_width, Backend};
pub use iter::{RangeIter, State};

use num_traits::AsPrimitive;

/// Returns an iterator over the `count` consecutive `i32` values starting at
/// `start`.
///
/// # Errors
/// Fails if `count < 0` or if `start + count - 1` exceeds `i32::MAX`.
///
/// # Examples
/// ```
/// let values: Vec<i32> = int_sequence::range(i32::MAX - 1, 2).unwrap().collect();
/// assert_eq!(values, [i32::MAX - 1, i32::MAX]);
///
/// assert!(int_sequence::range(i32::MAX - 1, 3).is_err());
/// assert!(int_sequence::range(0, -1).is_err());
/// ```
pub fn range(start: i32, count: i32) -> Result<RangeIter<i32>, RangeOutOfBounds> {
    IntRange::new_i32(start, count).map(|range| range.iter())
}

/// Returns an iterator over the `count` consecutive values of `T` starting
/// at `start`.
///
/// # Errors
/// Fails if `count < 0` or if `start + count - 1` does not fit in `T`.
pub fn range_of<T: RangeInt>(start: T, count: i64) -> Result<RangeIter<T>, RangeOutOfBounds>
where
    i64: AsPrimitive<T>,
{
    IntRange::new(start, count).map(|range| range.iter())
}

#[cfg(test)]
#[path = "tests/bounds_tests.rs"]
mod bounds_tests;

#[cfg(test)]
#[path = "tests/iter_tests.rs"]
mod iter_tests;

#[cfg(test)]
#[path = "tests/fill_tests.rs"]
mod fill_tests;
