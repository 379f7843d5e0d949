// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Two-branch result container for fallible fetch operations.
//!
//! Every fallible operation in the fetch pipeline returns a value instead of
//! propagating an error type upward. [`Either`] holds exactly one of a
//! failure or a success payload, and [`Either::fold`] is the sanctioned way
//! to extract a value, forcing callers to handle both branches.

use std::fmt;

use crate::failure::Failure;

/// Result of a fetch operation: a [`Failure`] on the left or a payload on
/// the right.
pub type FetchResult<T> = Either<Failure, T>;

/// A value that is exactly one of two branches.
///
/// By convention the left branch carries a failure and the right branch
/// carries a success payload. The two branches never convert implicitly;
/// consumers branch through [`Either::fold`] or match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<L, R> {
    /// The failure branch.
    Left(L),
    /// The success branch.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Construct the left (failure) branch.
    #[must_use]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Construct the right (success) branch.
    #[must_use]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Whether this value holds the left branch.
    #[must_use]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Whether this value holds the right branch.
    #[must_use]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Consume the value, invoking exactly one of the two closures.
    ///
    /// This is total: every branch is handled, and only the closure for the
    /// held branch runs.
    pub fn fold<T, FL, FR>(self, on_left: FL, on_right: FR) -> T
    where
        FL: FnOnce(L) -> T,
        FR: FnOnce(R) -> T,
    {
        match self {
            Either::Left(left) => on_left(left),
            Either::Right(right) => on_right(right),
        }
    }

    /// Map the right branch, leaving the left branch untouched.
    #[must_use]
    pub fn map<T, F>(self, f: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Either::Left(left) => Either::Left(left),
            Either::Right(right) => Either::Right(f(right)),
        }
    }

    /// Extract the left value, panicking if the right branch is held.
    ///
    /// Accessing the wrong branch is a contract violation, not a recoverable
    /// failure, so this aborts loudly rather than returning a domain error.
    #[must_use]
    pub fn expect_left(self, msg: &str) -> L
    where
        R: fmt::Debug,
    {
        match self {
            Either::Left(left) => left,
            Either::Right(right) => panic!("{msg}: {right:?}"),
        }
    }

    /// Extract the right value, panicking if the left branch is held.
    ///
    /// Accessing the wrong branch is a contract violation, not a recoverable
    /// failure, so this aborts loudly rather than returning a domain error.
    #[must_use]
    pub fn expect_right(self, msg: &str) -> R
    where
        L: fmt::Debug,
    {
        match self {
            Either::Left(left) => panic!("{msg}: {left:?}"),
            Either::Right(right) => right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branches_are_exclusive() {
        let left: Either<&str, u32> = Either::left("boom");
        assert!(left.is_left());
        assert!(!left.is_right());

        let right: Either<&str, u32> = Either::right(7);
        assert!(right.is_right());
        assert!(!right.is_left());
    }

    #[test]
    fn test_fold_invokes_exactly_one_branch() {
        let mut left_calls = 0;
        let mut right_calls = 0;

        let value: Either<&str, u32> = Either::right(7);
        let folded = value.fold(
            |_| {
                left_calls += 1;
                0
            },
            |v| {
                right_calls += 1;
                v
            },
        );

        assert_eq!(folded, 7);
        assert_eq!(left_calls, 0);
        assert_eq!(right_calls, 1);
    }

    #[test]
    fn test_map_leaves_left_untouched() {
        let left: Either<&str, u32> = Either::left("boom");
        assert_eq!(left.map(|v| v * 2), Either::left("boom"));

        let right: Either<&str, u32> = Either::right(21);
        assert_eq!(right.map(|v| v * 2), Either::right(42));
    }

    #[test]
    fn test_structural_equality() {
        let a: Either<&str, u32> = Either::right(7);
        let b: Either<&str, u32> = Either::right(7);
        let c: Either<&str, u32> = Either::left("boom");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[should_panic(expected = "expected a success value")]
    fn test_expect_right_panics_on_left() {
        let left: Either<&str, u32> = Either::left("boom");
        let _ = left.expect_right("expected a success value");
    }

    #[test]
    #[should_panic(expected = "expected a failure value")]
    fn test_expect_left_panics_on_right() {
        let right: Either<&str, u32> = Either::right(7);
        let _ = right.expect_left("expected a failure value");
    }
}
