//! The two Fibonacci implementations under test.
//!
//! Both follow F(0) = 0, F(1) = 1, F(n) = F(n - 1) + F(n - 2), and treat any
//! `n <= 0` as 0. Results are `i64` and wrap on overflow in every build
//! profile, so `fib_iterative(1000)` is the same value in debug and release.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest index whose Fibonacci number fits in an `i64`.
pub const MAX_EXACT_I64_INDEX: i32 = 92;

/// Which of the two algorithms a benchmark exercises.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkKind {
    Recursive,
    Iterative,
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchmarkKind::Recursive => write!(f, "Recursive"),
            BenchmarkKind::Iterative => write!(f, "Iterative"),
        }
    }
}

/// Naive double recursion, exponential in `n`.
///
/// Deliberately left without memoization: the call overhead is the load
/// being measured.
pub fn fib_recursive(n: i32) -> i64 {
    match n {
        n if n <= 0 => 0,
        1 => 1,
        _ => fib_recursive(n - 1).wrapping_add(fib_recursive(n - 2)),
    }
}

/// Linear loop over two accumulators.
///
/// No overflow checks; past [`MAX_EXACT_I64_INDEX`] the result is the true
/// value reduced modulo 2^64 and read back as signed.
pub fn fib_iterative(n: i32) -> i64 {
    match n {
        n if n <= 0 => 0,
        1 => 1,
        _ => {
            let mut prev = 0i64;
            let mut curr = 1i64;
            for _ in 2..=n {
                let next = prev.wrapping_add(curr);
                prev = curr;
                curr = next;
            }
            curr
        }
    }
}

/// Same loop as [`fib_iterative`], returning `None` once F(n) leaves `i64`.
pub fn fib_iterative_checked(n: i32) -> Option<i64> {
    match n {
        n if n <= 0 => Some(0),
        1 => Some(1),
        _ => {
            let mut prev = 0i64;
            let mut curr = 1i64;
            for _ in 2..=n {
                let next = prev.checked_add(curr)?;
                prev = curr;
                curr = next;
            }
            Some(curr)
        }
    }
}

/// Whether F(n) is too large for an `i64`, i.e. whether the plain
/// implementations return a wrapped value.
#[inline]
pub fn overflows_i64(n: i32) -> bool {
    n > MAX_EXACT_I64_INDEX
}

pub fn fib(kind: BenchmarkKind, n: i32) -> i64 {
    match kind {
        BenchmarkKind::Recursive => fib_recursive(n),
        BenchmarkKind::Iterative => fib_iterative(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: [i64; 21] = [
        0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181, 6765,
    ];

    #[test]
    fn test_base_cases() {
        for n in 0..=1 {
            assert_eq!(fib_recursive(n), n as i64);
            assert_eq!(fib_iterative(n), n as i64);
        }
    }

    #[test]
    fn test_negative_index_is_zero() {
        for n in [-1, -2, -35, i32::MIN] {
            assert_eq!(fib_recursive(n), 0);
            assert_eq!(fib_iterative(n), 0);
            assert_eq!(fib_iterative_checked(n), Some(0));
        }
    }

    #[test]
    fn test_matches_reference_sequence() {
        for (n, expected) in REFERENCE.iter().enumerate() {
            assert_eq!(fib_recursive(n as i32), *expected, "recursive F({n})");
            assert_eq!(fib_iterative(n as i32), *expected, "iterative F({n})");
        }
    }

    #[test]
    fn test_implementations_agree() {
        for n in 2..=30 {
            assert_eq!(fib_recursive(n), fib_iterative(n), "F({n})");
        }
    }

    #[test]
    fn test_idempotent() {
        for n in [0, 1, 10, 25] {
            assert_eq!(fib_recursive(n), fib_recursive(n));
            assert_eq!(fib_iterative(n), fib_iterative(n));
        }
        assert_eq!(fib_iterative(1000), fib_iterative(1000));
    }

    #[test]
    fn test_monotonic_until_overflow() {
        for n in 0..MAX_EXACT_I64_INDEX {
            assert!(fib_iterative(n + 1) >= fib_iterative(n), "F({})", n + 1);
        }
    }

    #[test]
    fn test_recursive_35() {
        assert_eq!(fib_recursive(35), 9_227_465);
    }

    #[test]
    fn test_iterative_1000_wraps() {
        assert_eq!(fib_iterative(1000), 817_770_325_994_397_771);
    }

    #[test]
    fn test_checked_boundary() {
        assert_eq!(fib_iterative_checked(92), Some(7_540_113_804_746_346_429));
        assert_eq!(fib_iterative_checked(93), None);
        assert_eq!(fib_iterative_checked(1000), None);
        assert!(!overflows_i64(92));
        assert!(overflows_i64(93));
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(fib(BenchmarkKind::Recursive, 20), 6765);
        assert_eq!(fib(BenchmarkKind::Iterative, 20), 6765);
    }
}
