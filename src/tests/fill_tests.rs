extern crate alloc;
extern crate std;

use crate::{fill, fill_scalar, fill_with, vector_width, Backend, IntRange, RangeInt};
use alloc::vec;
use alloc::vec::Vec;
use num_traits::AsPrimitive;

/// Trivial reference: `value + i` one element at a time.
fn reference<T: RangeInt>(len: usize, value: T) -> Vec<T>
where
    i64: AsPrimitive<T>,
{
    let mut out = Vec::with_capacity(len);
    let mut next = value;
    for _ in 0..len {
        out.push(next);
        next = next.wrapping_add(&T::one());
    }
    out
}

/// The buffer lengths around each vector width that exercise the tail.
fn interesting_lengths(width: usize) -> [usize; 7] {
    [0, 1, width - 1, width, width + 1, 3 * width, 3 * width + 2]
}

fn check_backends<T: RangeInt>(starts: &[T])
where
    i64: AsPrimitive<T>,
{
    for backend in Backend::ALL {
        let width = vector_width::<T>(backend);
        for len in interesting_lengths(width.max(2)) {
            for &value in starts {
                let mut buf = vec![T::zero(); len];
                fill_with(&mut buf, value, backend);
                assert_eq!(
                    buf,
                    reference(len, value),
                    "{:?} len {} value {}",
                    backend,
                    len,
                    value
                );
            }
        }
    }
}

// =============================================================================
// Backend Selection Tests
// =============================================================================

#[test]
fn test_scalar_always_available() {
    assert!(Backend::Scalar.is_available());
    assert_eq!(Backend::Scalar.resolve(), Backend::Scalar);
    assert_eq!(vector_width::<u8>(Backend::Scalar), 1);
}

#[test]
fn test_detect_is_available_and_stable() {
    let detected = Backend::detect();
    assert!(detected.is_available());
    assert_eq!(Backend::detect(), detected);
}

#[test]
fn test_unavailable_backend_resolves_to_scalar() {
    for backend in Backend::ALL {
        if !backend.is_available() {
            assert_eq!(backend.resolve(), Backend::Scalar);
            assert_eq!(vector_width::<u32>(backend), 1);
        }
    }
}

#[test]
#[cfg(target_arch = "x86_64")]
fn test_vector_widths_x86_64() {
    assert!(Backend::Sse2.is_available());
    assert_eq!(vector_width::<i8>(Backend::Sse2), 16);
    assert_eq!(vector_width::<u16>(Backend::Sse2), 8);
    assert_eq!(vector_width::<i32>(Backend::Sse2), 4);
    assert_eq!(vector_width::<u64>(Backend::Sse2), 2);
    assert_eq!(vector_width::<usize>(Backend::Sse2), 2);
    if Backend::Avx2.is_available() {
        assert_eq!(vector_width::<u8>(Backend::Avx2), 32);
        assert_eq!(vector_width::<i64>(Backend::Avx2), 4);
    }
}

/// Calls the per-type kernel entry directly, bypassing `fill_with`, the way
/// any generic code bounded on `RangeInt` can.
fn kernel_then_scalar<T: RangeInt>(len: usize, value: T, backend: Backend) -> (usize, Vec<T>)
where
    i64: AsPrimitive<T>,
{
    let mut buf = vec![T::zero(); len];
    let (written, next) = T::fill_prefix(&mut buf, value, backend);
    fill_scalar(&mut buf[written..], next);
    (written, buf)
}

#[test]
fn test_kernel_entry_checks_backend() {
    for backend in Backend::ALL {
        for len in [0, 1, 15, 16, 17, 64, 100] {
            let (written, buf) = kernel_then_scalar(len, 7u8, backend);
            assert_eq!(buf, reference(len, 7u8), "{:?} len {}", backend, len);
            assert!(written <= len);
            assert_eq!(written % vector_width::<u8>(backend), 0);
            if !backend.is_available() {
                assert_eq!(written, 0, "{:?} ran without CPU support", backend);
            }

            let (written, buf) = kernel_then_scalar(len, u64::MAX - 3, backend);
            assert_eq!(buf, reference(len, u64::MAX - 3), "{:?} len {}", backend, len);
            if !backend.is_available() {
                assert_eq!(written, 0, "{:?} ran without CPU support", backend);
            }
        }
    }
}

// =============================================================================
// Fill Output Tests
// =============================================================================

#[test]
fn test_fill_basic() {
    let mut buf = [0i32; 11];
    fill(&mut buf, -5);
    assert_eq!(buf, [-5, -4, -3, -2, -1, 0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_fill_empty() {
    let mut buf: [u64; 0] = [];
    fill(&mut buf, 7);
    fill_scalar(&mut buf, 7);
}

#[test]
fn test_fill_wraps() {
    let mut buf = [0u8; 40];
    fill(&mut buf, 250);
    assert_eq!(&buf[..7], &[250, 251, 252, 253, 254, 255, 0]);
    assert_eq!(buf[39], 33);

    let mut buf = [0i8; 5];
    fill(&mut buf, i8::MAX - 1);
    assert_eq!(buf, [126, 127, -128, -127, -126]);
}

#[test]
fn test_backends_match_reference_i8() {
    check_backends::<i8>(&[0, -1, i8::MIN, i8::MAX - 3, 100]);
}

#[test]
fn test_backends_match_reference_u8() {
    check_backends::<u8>(&[0, 1, u8::MAX, 240, 128]);
}

#[test]
fn test_backends_match_reference_i16() {
    check_backends::<i16>(&[0, -7, i16::MIN, i16::MAX - 5]);
}

#[test]
fn test_backends_match_reference_u16() {
    check_backends::<u16>(&[0, 9, u16::MAX - 2]);
}

#[test]
fn test_backends_match_reference_i32() {
    check_backends::<i32>(&[0, -3, i32::MIN, i32::MAX - 10, 123_456]);
}

#[test]
fn test_backends_match_reference_u32() {
    check_backends::<u32>(&[0, u32::MAX, u32::MAX - 4, 1 << 31]);
}

#[test]
fn test_backends_match_reference_i64() {
    check_backends::<i64>(&[0, -1, i64::MIN, i64::MAX - 2]);
}

#[test]
fn test_backends_match_reference_u64() {
    check_backends::<u64>(&[0, u64::MAX, u64::MAX - 1, 1 << 40]);
}

#[test]
fn test_backends_match_reference_pointer_sized() {
    check_backends::<isize>(&[0, -2, isize::MIN, isize::MAX]);
    check_backends::<usize>(&[0, 3, usize::MAX - 1]);
}

#[test]
fn test_fill_leaves_nothing_stale() {
    // Any lane a vector store skipped would keep the sentinel
    for backend in Backend::ALL {
        for len in 0..70 {
            let mut buf = vec![u16::MAX; len];
            fill_with(&mut buf, 0, backend);
            assert!(buf.iter().all(|&v| v != u16::MAX), "{:?} len {}", backend, len);
        }
    }
}

#[test]
fn test_fill_subslice_only() {
    // Writes stay inside the slice handed in
    let mut buf = [9u32; 20];
    fill(&mut buf[3..16], 0);
    assert_eq!(&buf[..3], &[9, 9, 9]);
    assert_eq!(&buf[3..16], &reference(13, 0u32)[..]);
    assert_eq!(&buf[16..], &[9, 9, 9, 9]);
}

// =============================================================================
// Range Fill Tests
// =============================================================================

#[test]
fn test_range_fill_prefix() {
    let range = IntRange::new(1000u32, 5).unwrap();
    let mut buf = [0u32; 8];
    assert_eq!(range.fill(&mut buf), 5);
    assert_eq!(buf, [1000, 1001, 1002, 1003, 1004, 0, 0, 0]);
}

#[test]
fn test_range_fill_short_buffer() {
    let range = IntRange::new(0i64, 100).unwrap();
    let mut buf = [0i64; 3];
    assert_eq!(range.fill(&mut buf), 3);
    assert_eq!(buf, [0, 1, 2]);
}

#[test]
fn test_range_fill_matches_iteration() {
    let range = IntRange::new(u16::MAX - 99, 100).unwrap();
    let mut buf = vec![0u16; 100];
    range.fill(&mut buf);
    let iterated: Vec<u16> = range.iter().collect();
    assert_eq!(buf, iterated);
}

// =============================================================================
// Property-Based Tests
// =============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fill_matches_reference_u8(value in any::<u8>(), len in 0usize..300) {
            for backend in Backend::ALL {
                let mut buf = vec![0u8; len];
                fill_with(&mut buf, value, backend);
                prop_assert_eq!(&buf, &reference(len, value));
            }
        }

        #[test]
        fn fill_matches_reference_i16(value in any::<i16>(), len in 0usize..200) {
            for backend in Backend::ALL {
                let mut buf = vec![0i16; len];
                fill_with(&mut buf, value, backend);
                prop_assert_eq!(&buf, &reference(len, value));
            }
        }

        #[test]
        fn fill_matches_reference_i32(value in any::<i32>(), len in 0usize..200) {
            for backend in Backend::ALL {
                let mut buf = vec![0i32; len];
                fill_with(&mut buf, value, backend);
                prop_assert_eq!(&buf, &reference(len, value));
            }
        }

        #[test]
        fn fill_matches_reference_u64(value in any::<u64>(), len in 0usize..100) {
            for backend in Backend::ALL {
                let mut buf = vec![0u64; len];
                fill_with(&mut buf, value, backend);
                prop_assert_eq!(&buf, &reference(len, value));
            }
        }

        #[test]
        fn range_fill_matches_iter(start in any::<i32>(), count in 0i64..500) {
            if let Ok(range) = IntRange::new(start, count) {
                let mut buf = vec![0i32; count as usize];
                prop_assert_eq!(range.fill(&mut buf), count as usize);
                let iterated: Vec<i32> = range.iter().collect();
                prop_assert_eq!(buf, iterated);
            }
        }
    }
}
