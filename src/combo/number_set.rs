// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! NumberSet type for representing sets of lottery numbers as bitsets.
//!
//! A NumberSet is a compact representation of a set of numbers in `0..=255`,
//! where bit i represents the presence of number i. The full-space scan uses
//! it to compute intersection sizes with a handful of AND + popcount
//! operations instead of merging sorted tuples.
//!
//! # Examples
//!
//! ```
//! use lotto_coverage::combo::NumberSet;
//!
//! let draw = NumberSet::from_numbers(&[6, 9, 13, 21, 24, 38]);
//! let candidate = NumberSet::from_numbers(&[1, 6, 9, 13, 40, 49]);
//!
//! assert_eq!(draw.intersection(&candidate).len(), 3);
//! assert!(draw.contains(38));
//! assert!(!draw.contains(49));
//! ```

use std::fmt;

/// Number of u64 words needed to hold every `u8` value.
const WORDS: usize = 4;

/// A set of numbers represented as a bitset.
///
/// Uses four u64 words (256 bits) so any `u8` value can be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumberSet([u64; WORDS]);

impl NumberSet {
    /// Create an empty number set.
    pub const fn empty() -> Self {
        Self([0; WORDS])
    }

    /// Create a number set from a slice of numbers.
    pub fn from_numbers(numbers: &[u8]) -> Self {
        let mut set = Self::empty();
        for &number in numbers {
            set.insert(number);
        }
        set
    }

    /// Check if the set contains a specific number.
    #[inline]
    pub fn contains(&self, number: u8) -> bool {
        let word_idx = (number / 64) as usize;
        let bit_idx = number % 64;
        (self.0[word_idx] >> bit_idx) & 1 != 0
    }

    /// Insert a number into the set.
    #[inline]
    pub fn insert(&mut self, number: u8) {
        let word_idx = (number / 64) as usize;
        let bit_idx = number % 64;
        self.0[word_idx] |= 1u64 << bit_idx;
    }

    /// Remove a number from the set.
    pub fn remove(&mut self, number: u8) {
        let word_idx = (number / 64) as usize;
        let bit_idx = number % 64;
        self.0[word_idx] &= !(1u64 << bit_idx);
    }

    /// Get the number of elements in the set (population count).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Size of the intersection without materializing it.
    #[inline]
    pub fn intersection_len(&self, other: &Self) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Compute the intersection of two number sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = [0u64; WORDS];
        for i in 0..WORDS {
            result[i] = self.0[i] & other.0[i];
        }
        Self(result)
    }

    /// Compute the union of two number sets.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = [0u64; WORDS];
        for i in 0..WORDS {
            result[i] = self.0[i] | other.0[i];
        }
        Self(result)
    }

    /// Iterate over the numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&n| self.contains(n))
    }
}

impl fmt::Display for NumberSet {
    /// Format a number set as "{1 2 3}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, number) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", number)?;
        }
        write!(f, "}}")
    }
}

impl From<&[u8]> for NumberSet {
    fn from(numbers: &[u8]) -> Self {
        Self::from_numbers(numbers)
    }
}
