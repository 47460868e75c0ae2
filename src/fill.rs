use core::mem::size_of;
use core::sync::atomic::{AtomicU8, Ordering};

use num_traits::AsPrimitive;

use crate::element::RangeInt;

/// Instruction set used by [`fill_with`].
///
/// All backends produce identical output; they differ only in how many
/// elements are written per step (see [`vector_width`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// One element per step. Always available.
    Scalar,
    /// 128-bit registers. Baseline on x86_64.
    Sse2,
    /// 256-bit registers. Detected at runtime with the `std` feature,
    /// otherwise only when the crate is compiled with `target-feature=+avx2`.
    Avx2,
}

/// Cached result of [`Backend::detect`].
/// 0 = unchecked, 1 = scalar, 2 = SSE2, 3 = AVX2
static DETECTED: AtomicU8 = AtomicU8::new(0);

impl Backend {
    /// Every backend, narrowest first.
    pub const ALL: [Backend; 3] = [Backend::Scalar, Backend::Sse2, Backend::Avx2];

    /// Returns the widest backend the current CPU supports.
    ///
    /// Detection runs once; later calls read the cached answer.
    pub fn detect() -> Self {
        match DETECTED.load(Ordering::Relaxed) {
            1 => return Backend::Scalar,
            2 => return Backend::Sse2,
            3 => return Backend::Avx2,
            _ => {}
        }

        let detected = if Backend::Avx2.is_available() {
            Backend::Avx2
        } else if Backend::Sse2.is_available() {
            Backend::Sse2
        } else {
            Backend::Scalar
        };
        tracing::debug!(backend = ?detected, "detected fill backend");

        let code = match detected {
            Backend::Scalar => 1,
            Backend::Sse2 => 2,
            Backend::Avx2 => 3,
        };
        DETECTED.store(code, Ordering::Relaxed);
        detected
    }

    /// Returns `true` if this backend can run on the current CPU.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Sse2 => cfg!(all(target_arch = "x86_64", target_feature = "sse2")),
            Backend::Avx2 => avx2_available(),
        }
    }

    /// Returns this backend if it is available, [`Backend::Scalar`] otherwise.
    #[inline]
    pub fn resolve(self) -> Self {
        if self.is_available() {
            self
        } else {
            Backend::Scalar
        }
    }
}

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn avx2_available() -> bool {
    std::is_x86_feature_detected!("avx2")
}

#[cfg(not(all(target_arch = "x86_64", feature = "std")))]
fn avx2_available() -> bool {
    cfg!(all(target_arch = "x86_64", target_feature = "avx2"))
}

/// Returns the number of lanes `backend` processes per step for `T`.
///
/// An unavailable backend reports the scalar width of 1, matching what
/// [`fill_with`] actually runs.
///
/// # Examples
/// ```
/// use int_sequence::{vector_width, Backend};
///
/// assert_eq!(vector_width::<u64>(Backend::Scalar), 1);
/// if Backend::Sse2.is_available() {
///     assert_eq!(vector_width::<u8>(Backend::Sse2), 16);
///     assert_eq!(vector_width::<u64>(Backend::Sse2), 2);
/// }
/// ```
pub fn vector_width<T: RangeInt>(backend: Backend) -> usize
where
    i64: AsPrimitive<T>,
{
    match backend.resolve() {
        Backend::Scalar => 1,
        Backend::Sse2 => 16 / size_of::<T>(),
        Backend::Avx2 => 32 / size_of::<T>(),
    }
}

/// Writes `value, value + 1, ..., value + (dest.len() - 1)` into `dest`.
///
/// Arithmetic wraps in `T`, so a buffer longer than the values left above
/// `value` continues from `T::MIN`. Uses the widest available backend.
///
/// # Examples
/// ```
/// let mut buf = [0u32; 10];
/// int_sequence::fill(&mut buf, 5);
/// assert_eq!(buf, [5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
/// ```
#[inline]
pub fn fill<T: RangeInt>(dest: &mut [T], value: T)
where
    i64: AsPrimitive<T>,
{
    fill_with(dest, value, Backend::detect());
}

/// Same as [`fill`], on a caller-chosen backend.
///
/// A backend the CPU does not support silently falls back to
/// [`Backend::Scalar`].
pub fn fill_with<T: RangeInt>(dest: &mut [T], value: T, backend: Backend)
where
    i64: AsPrimitive<T>,
{
    let (written, next) = T::fill_prefix(dest, value, backend.resolve());
    fill_scalar(&mut dest[written..], next);
}

/// Scalar reference fill. Also finishes the tail of the vector backends.
#[inline]
pub fn fill_scalar<T: RangeInt>(dest: &mut [T], value: T)
where
    i64: AsPrimitive<T>,
{
    let mut next = value;
    for slot in dest {
        *slot = next;
        next = next.wrapping_add(&T::one());
    }
}
