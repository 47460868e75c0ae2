use core::iter::FusedIterator;

use num_traits::AsPrimitive;

use crate::bounds::{distance, IntRange};
use crate::element::RangeInt;

/// Where a [`RangeIter`] is in its enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Nothing produced yet; the next advance yields the start.
    Ready,
    /// `current` holds the last produced element.
    Active,
    /// Exhausted or disposed. Every further advance reports no element.
    Done,
}

/// A restartable pull iterator over an [`IntRange`].
///
/// Drive it with [`advance`](Self::advance) and [`current`](Self::current),
/// or as an ordinary [`Iterator`].
///
/// `Clone` does not copy the position: the clone starts over at the
/// beginning of the same range, and the two advance independently.
///
/// `ExactSizeIterator` is only implemented on 64-bit targets; elsewhere an
/// `i64` count can exceed `usize`.
///
/// # Examples
/// ```
/// let mut iter = int_sequence::range(7, 3).unwrap();
///
/// assert!(iter.advance());
/// assert_eq!(iter.current(), 7);
///
/// let restarted = iter.clone();
/// assert_eq!(iter.collect::<Vec<_>>(), [8, 9]);
/// assert_eq!(restarted.collect::<Vec<_>>(), [7, 8, 9]);
/// ```
#[derive(Debug)]
pub struct RangeIter<T: RangeInt>
where
    i64: AsPrimitive<T>,
{
    range: IntRange<T>,
    current: T,
    state: State,
}

impl<T: RangeInt> RangeIter<T>
where
    i64: AsPrimitive<T>,
{
    pub(crate) fn new(range: IntRange<T>) -> Self {
        let state = if range.is_empty() {
            State::Done
        } else {
            State::Ready
        };
        Self {
            range,
            current: range.start(),
            state,
        }
    }

    /// Returns the range being enumerated.
    #[inline]
    pub fn range(&self) -> &IntRange<T> {
        &self.range
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the last produced element.
    ///
    /// Before the first successful [`advance`](Self::advance) this is stale.
    /// After exhaustion it holds the range's end sentinel; after
    /// [`dispose`](Self::dispose) it keeps whatever it held.
    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    /// Moves to the next element. Returns `false` once the range is
    /// exhausted, and on every call after that.
    pub fn advance(&mut self) -> bool {
        match self.state {
            State::Ready => {
                self.current = self.range.start();
                self.state = State::Active;
                true
            }
            State::Active => {
                self.current = self.current.wrapping_add(&T::one());
                if self.current == self.range.end() {
                    self.state = State::Done;
                    false
                } else {
                    true
                }
            }
            State::Done => false,
        }
    }

    /// Ends the enumeration early. Idempotent; `current` is left alone.
    #[inline]
    pub fn dispose(&mut self) {
        self.state = State::Done;
    }

    fn remaining(&self) -> i64 {
        match self.state {
            State::Ready => self.range.count(),
            State::Active => self.range.count() - 1 - distance(self.range.start(), self.current),
            State::Done => 0,
        }
    }
}

impl<T: RangeInt> Clone for RangeIter<T>
where
    i64: AsPrimitive<T>,
{
    fn clone(&self) -> Self {
        self.range.iter()
    }
}

impl<T: RangeInt> Iterator for RangeIter<T>
where
    i64: AsPrimitive<T>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.advance() {
            Some(self.current)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<T: RangeInt> FusedIterator for RangeIter<T> where i64: AsPrimitive<T> {}

// Counts are at most `i64::MAX`, so `size_hint` is always exact here.
#[cfg(target_pointer_width = "64")]
impl<T: RangeInt> ExactSizeIterator for RangeIter<T> where i64: AsPrimitive<T> {}
