use core::any::type_name;
use core::fmt;

use num_traits::AsPrimitive;
use thiserror::Error;

use crate::element::RangeInt;
use crate::iter::RangeIter;

/// The constructor argument a [`RangeOutOfBounds`] error blames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutOfBoundsParam {
    /// The count was negative.
    Count,
    /// The count is valid on its own, but the last element would not fit in
    /// the element type when counting up from the start.
    StartAndCount,
}

impl fmt::Display for OutOfBoundsParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutOfBoundsParam::Count => f.write_str("count"),
            OutOfBoundsParam::StartAndCount => f.write_str("start + count"),
        }
    }
}

/// Range construction failed: the requested sequence is not representable.
///
/// This is the only error in the crate. Once an [`IntRange`] exists,
/// iterating or filling it cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("`{param}` is out of range (count = {count}, element type `{element}`)")]
pub struct RangeOutOfBounds {
    param: OutOfBoundsParam,
    count: i64,
    element: &'static str,
}

impl RangeOutOfBounds {
    fn new<T>(param: OutOfBoundsParam, count: i64) -> Self {
        let element = type_name::<T>();
        tracing::debug!(%param, count, element, "rejected integer range");
        Self {
            param,
            count,
            element,
        }
    }

    /// Returns which argument was out of range.
    pub fn param(&self) -> OutOfBoundsParam {
        self.param
    }

    /// Returns the requested element count.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Returns the name of the element type.
    pub fn element(&self) -> &'static str {
        self.element
    }
}

/// Number of steps from `from` up to `to`, measured in the `i64` counter.
///
/// The element difference is computed in `T` and truncated into the counter.
/// When that truncation comes out negative (a signed `T` whose difference
/// wrapped, e.g. `i8` from `-100` to `100`), the distance is recomputed as
/// the difference of the two endpoints, each truncated on its own.
///
/// Exact whenever `from <= to` and the true distance is at most `i64::MAX`.
/// A distance beyond that comes out negative or otherwise wrong, which is
/// enough for [`IntRange::new`] to reject it since valid counts fit in `i64`.
///
/// # Examples
/// ```
/// use int_sequence::distance;
///
/// assert_eq!(distance(-100i8, 100i8), 200);
/// assert_eq!(distance(u64::MAX - 3, u64::MAX), 3);
/// ```
pub fn distance<T: RangeInt>(from: T, to: T) -> i64
where
    i64: AsPrimitive<T>,
{
    let naive: i64 = to.wrapping_sub(&from).as_();
    if naive >= 0 {
        return naive;
    }
    let to: i64 = to.as_();
    let from: i64 = from.as_();
    to.wrapping_sub(from)
}

/// A validated run of consecutive integers `start, start + 1, ...` of length
/// `count`.
///
/// The descriptor is immutable and `Copy`. It stores the exclusive end
/// sentinel `start + count` computed with wrapping arithmetic, so a range
/// whose last element is `T::MAX` has `end() == T::MIN`.
///
/// # Examples
/// ```
/// use int_sequence::IntRange;
///
/// let range = IntRange::new(250u8, 6).unwrap();
/// assert_eq!(range.last(), Some(255));
/// assert_eq!(range.end(), 0);
/// assert_eq!(range.iter().collect::<Vec<_>>(), [250, 251, 252, 253, 254, 255]);
///
/// assert!(IntRange::new(250u8, 7).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange<T: RangeInt>
where
    i64: AsPrimitive<T>,
{
    start: T,
    count: i64,
    end: T,
}

impl IntRange<i32> {
    /// Validates a range of `i32` the way a 32-bit API would: `count` is an
    /// `i32` and the last element is computed in 64 bits.
    ///
    /// # Errors
    /// - [`OutOfBoundsParam::Count`] if `count < 0`
    /// - [`OutOfBoundsParam::StartAndCount`] if `start + count - 1 > i32::MAX`
    ///
    /// # Examples
    /// ```
    /// use int_sequence::IntRange;
    ///
    /// assert!(IntRange::new_i32(i32::MAX - 1, 2).is_ok());
    /// assert!(IntRange::new_i32(i32::MAX - 1, 3).is_err());
    /// ```
    pub fn new_i32(start: i32, count: i32) -> Result<Self, RangeOutOfBounds> {
        if count < 0 {
            return Err(RangeOutOfBounds::new::<i32>(
                OutOfBoundsParam::Count,
                i64::from(count),
            ));
        }
        let last = i64::from(start) + i64::from(count) - 1;
        if last > i64::from(i32::MAX) {
            return Err(RangeOutOfBounds::new::<i32>(
                OutOfBoundsParam::StartAndCount,
                i64::from(count),
            ));
        }
        Ok(Self {
            start,
            count: i64::from(count),
            end: start.wrapping_add(count),
        })
    }
}

impl<T: RangeInt> IntRange<T>
where
    i64: AsPrimitive<T>,
{
    /// Validates the range of `count` consecutive values starting at `start`.
    ///
    /// `count == 0` is valid and yields an empty range.
    ///
    /// # Errors
    /// - [`OutOfBoundsParam::Count`] if `count < 0`
    /// - [`OutOfBoundsParam::StartAndCount`] if `start + (count - 1)` does not
    ///   fit in `T`
    pub fn new(start: T, count: i64) -> Result<Self, RangeOutOfBounds> {
        if count < 0 {
            return Err(RangeOutOfBounds::new::<T>(OutOfBoundsParam::Count, count));
        }
        if count == 0 {
            return Ok(Self {
                start,
                count,
                end: start,
            });
        }

        // `count - 1` is truncated into T; the distance check below catches
        // any loss from that truncation that did not also wrap `last`.
        let span: T = (count - 1).as_();
        let last = start.wrapping_add(&span);
        if start > last || distance(start, last) != count - 1 {
            return Err(RangeOutOfBounds::new::<T>(
                OutOfBoundsParam::StartAndCount,
                count,
            ));
        }

        Ok(Self {
            start,
            count,
            end: last.wrapping_add(&T::one()),
        })
    }

    /// Returns the first element of the range.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Returns the number of elements.
    #[inline]
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Returns the exclusive end sentinel, `start + count` wrapped in `T`.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Returns the last element, or `None` for an empty range.
    #[inline]
    pub fn last(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.end.wrapping_sub(&T::one()))
        }
    }

    /// Returns `true` if the range has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if `value` is one of the range's elements.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        match self.last() {
            Some(last) => self.start <= value && value <= last,
            None => false,
        }
    }

    /// Returns a fresh iterator over the range.
    ///
    /// The iterator of an empty range starts out exhausted.
    #[inline]
    pub fn iter(&self) -> RangeIter<T> {
        RangeIter::new(*self)
    }

    /// Writes the range into the front of `dest` and returns how many
    /// elements were written: `count`, or `dest.len()` if that is smaller.
    ///
    /// # Examples
    /// ```
    /// use int_sequence::IntRange;
    ///
    /// let range = IntRange::new(-2i16, 4).unwrap();
    /// let mut buf = [0i16; 6];
    /// assert_eq!(range.fill(&mut buf), 4);
    /// assert_eq!(buf, [-2, -1, 0, 1, 0, 0]);
    /// ```
    pub fn fill(&self, dest: &mut [T]) -> usize {
        let n = usize::try_from(self.count).map_or(dest.len(), |count| count.min(dest.len()));
        crate::fill::fill(&mut dest[..n], self.start);
        n
    }
}

impl<T: RangeInt> fmt::Debug for IntRange<T>
where
    i64: AsPrimitive<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntRange")
            .field("start", &self.start)
            .field("count", &self.count)
            .field("end", &self.end)
            .finish()
    }
}

impl<T: RangeInt> IntoIterator for IntRange<T>
where
    i64: AsPrimitive<T>,
{
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: RangeInt> IntoIterator for &IntRange<T>
where
    i64: AsPrimitive<T>,
{
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
