//! Vector kernels for the incrementing fill.
//!
//! Each kernel writes `value, value + 1, ...` in whole registers and stops
//! before a store could run past the end of the buffer. The caller finishes
//! the remainder with the scalar loop, starting at the value returned here.
//! On targets other than x86_64 every backend writes nothing.

use crate::element::private::Sealed;
use crate::fill::Backend;

/// Generates one register-width kernel.
///
/// The first register is a broadcast of `value` plus the per-lane offsets
/// `0, 1, ..., LANES - 1`; every step stores it unaligned and adds a
/// broadcast of `LANES`.
#[cfg(target_arch = "x86_64")]
macro_rules! vector_kernel {
    (
        #[$feature:meta]
        fn $name:ident($ty:ty as $arg:ty; $bytes:literal, $reg:ty)
        { $loadu:ident, $storeu:ident, $set1:ident, $add:ident }
    ) => {
        #[$feature]
        unsafe fn $name(dest: &mut [$ty], value: $ty) -> (usize, $ty) {
            use core::arch::x86_64::*;

            const LANES: usize = $bytes / core::mem::size_of::<$ty>();

            let len = dest.len();
            if len < LANES {
                return (0, value);
            }

            let offsets: [$ty; LANES] = core::array::from_fn(|i| i as $ty);

            unsafe {
                let mut current = $add($set1(value as $arg), $loadu(offsets.as_ptr().cast::<$reg>()));
                let increment = $set1(LANES as $arg);
                let ptr = dest.as_mut_ptr();
                let mut pos = 0;
                loop {
                    // SAFETY: pos + LANES <= len, checked on entry and at the loop guard
                    $storeu(ptr.add(pos).cast::<$reg>(), current);
                    current = $add(current, increment);
                    pos += LANES;
                    if pos > len - LANES {
                        break;
                    }
                }

                // Lane 0 of the advanced register is the next value to write.
                let mut lanes = [0 as $ty; LANES];
                $storeu(lanes.as_mut_ptr().cast::<$reg>(), current);
                (pos, lanes[0])
            }
        }
    };
}

macro_rules! impl_sealed {
    ($($ty:ty as $arg:ty => [$set1_128:ident, $add_128:ident, $set1_256:ident, $add_256:ident]),* $(,)?) => {
        $(
            impl Sealed for $ty {
                #[inline]
                fn fill_prefix(dest: &mut [Self], value: Self, backend: Backend) -> (usize, Self) {
                    #[cfg(target_arch = "x86_64")]
                    {
                        vector_kernel! {
                            #[target_feature(enable = "sse2")]
                            fn sse2($ty as $arg; 16, __m128i)
                            { _mm_loadu_si128, _mm_storeu_si128, $set1_128, $add_128 }
                        }
                        vector_kernel! {
                            #[target_feature(enable = "avx2")]
                            fn avx2($ty as $arg; 32, __m256i)
                            { _mm256_loadu_si256, _mm256_storeu_si256, $set1_256, $add_256 }
                        }

                        // SAFETY: `resolve` downgrades any backend the CPU lacks to scalar,
                        // so a kernel only runs when its target feature is present.
                        match backend.resolve() {
                            Backend::Avx2 => return unsafe { avx2(dest, value) },
                            Backend::Sse2 => return unsafe { sse2(dest, value) },
                            Backend::Scalar => {}
                        }
                    }
                    #[cfg(not(target_arch = "x86_64"))]
                    let _ = (&dest, backend);

                    (0, value)
                }
            }
        )*
    };
}

impl_sealed! {
    i8 as i8 => [_mm_set1_epi8, _mm_add_epi8, _mm256_set1_epi8, _mm256_add_epi8],
    u8 as i8 => [_mm_set1_epi8, _mm_add_epi8, _mm256_set1_epi8, _mm256_add_epi8],
    i16 as i16 => [_mm_set1_epi16, _mm_add_epi16, _mm256_set1_epi16, _mm256_add_epi16],
    u16 as i16 => [_mm_set1_epi16, _mm_add_epi16, _mm256_set1_epi16, _mm256_add_epi16],
    i32 as i32 => [_mm_set1_epi32, _mm_add_epi32, _mm256_set1_epi32, _mm256_add_epi32],
    u32 as i32 => [_mm_set1_epi32, _mm_add_epi32, _mm256_set1_epi32, _mm256_add_epi32],
    i64 as i64 => [_mm_set1_epi64x, _mm_add_epi64, _mm256_set1_epi64x, _mm256_add_epi64],
    u64 as i64 => [_mm_set1_epi64x, _mm_add_epi64, _mm256_set1_epi64x, _mm256_add_epi64],
    isize as i64 => [_mm_set1_epi64x, _mm_add_epi64, _mm256_set1_epi64x, _mm256_add_epi64],
    usize as i64 => [_mm_set1_epi64x, _mm_add_epi64, _mm256_set1_epi64x, _mm256_add_epi64],
}
