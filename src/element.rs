use core::fmt;
use core::hash::Hash;

use num_traits::{AsPrimitive, PrimInt, WrappingAdd, WrappingSub};

/// Sealed trait module to prevent external implementations.
///
/// The sealed trait also carries the per-type vector kernels (see `simd.rs`),
/// so they stay out of the public API.
pub(crate) mod private {
    use crate::fill::Backend;

    pub trait Sealed: Copy {
        /// Fills the longest prefix of `dest` the given backend can write in
        /// whole registers, returning the number of elements written and the
        /// next value to write.
        ///
        /// Safe for any `backend`: one the CPU does not support writes nothing.
        fn fill_prefix(dest: &mut [Self], value: Self, backend: Backend) -> (usize, Self);
    }
}

/// Trait for integer types that can be the elements of an [`IntRange`].
///
/// This trait is sealed and only implemented for `i8`, `i16`, `i32`, `i64`,
/// `isize`, `u8`, `u16`, `u32`, `u64`, and `usize`.
///
/// Element counts are measured in `i64`, the fixed-width signed counter type.
/// Conversions between the element type and the counter are truncating in
/// both directions (`AsPrimitive`), which is why range construction re-checks
/// every computed bound.
///
/// [`IntRange`]: crate::IntRange
pub trait RangeInt:
    private::Sealed
    + PrimInt
    + WrappingAdd
    + WrappingSub
    + Hash
    + fmt::Debug
    + fmt::Display
    + AsPrimitive<i64>
    + Send
    + Sync
    + 'static
where
    i64: AsPrimitive<Self>,
{
}

macro_rules! impl_range_int {
    ($($ty:ty),* $(,)?) => {
        $(impl RangeInt for $ty {})*
    };
}

impl_range_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
