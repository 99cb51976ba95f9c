// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The Combination type: a strictly increasing tuple of lottery numbers.
//!
//! A Combination is used both as a candidate (member of the universe) and as a
//! historical draw. It is immutable once constructed; every constructor checks
//! the invariant (strictly ascending, values in `[1, n]`).

use super::NumberSet;
use crate::codec::text;
use crate::error::{Error, Result};
use std::fmt;

/// Ordered, strictly increasing sequence of numbers drawn from `[1, n]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combination(Box<[u8]>);

impl Combination {
    /// Create a combination from numbers that are already sorted.
    ///
    /// Fails if the numbers are not strictly ascending or any number lies
    /// outside `[1, max_number]`.
    pub fn new(numbers: Vec<u8>, max_number: u8) -> Result<Self> {
        let out_of_range = numbers.iter().copied().find(|&v| v == 0 || v > max_number);
        if let Some(bad) = out_of_range {
            return Err(Error::InvalidCombination {
                reason: format!("{} is outside 1..={}", bad, max_number),
                numbers,
            });
        }
        if numbers.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidCombination {
                numbers,
                reason: "numbers must be strictly ascending".to_string(),
            });
        }
        Ok(Self(numbers.into_boxed_slice()))
    }

    /// Create a combination from numbers in any order.
    ///
    /// Duplicates are still rejected.
    pub fn from_unsorted(mut numbers: Vec<u8>, max_number: u8) -> Result<Self> {
        numbers.sort_unstable();
        Self::new(numbers, max_number)
    }

    /// Parse the padded text form, e.g. `" 1,  2,  3"`.
    pub fn from_text(line: &str, max_number: u8) -> Result<Self> {
        Self::new(text::parse_numbers(line)?, max_number)
    }

    /// Build without validation; callers guarantee the invariant.
    pub(crate) fn from_sorted_unchecked(numbers: &[u8]) -> Self {
        debug_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        Self(numbers.into())
    }

    /// The numbers in ascending order.
    pub fn numbers(&self) -> &[u8] {
        &self.0
    }

    /// Number of elements (k).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check membership of a single number.
    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }

    /// Bitset view of the numbers.
    pub fn to_number_set(&self) -> NumberSet {
        NumberSet::from_numbers(&self.0)
    }

    /// Count of shared numbers, by merging the two sorted tuples.
    pub fn intersection_len(&self, other: &Combination) -> usize {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// `k - |intersection|` between two combinations of equal length.
    ///
    /// Zero means the combinations are identical.
    pub fn distance(&self, other: &Combination) -> Result<usize> {
        if self.len() != other.len() {
            return Err(Error::validation(format!(
                "distance needs equal lengths, got {} and {}",
                self.len(),
                other.len()
            )));
        }
        Ok(self.len() - self.intersection_len(other))
    }

    /// Padded text form, e.g. `" 6,  9, 13"`.
    pub fn to_text(&self) -> String {
        text::render(&self.0)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl AsRef<[u8]> for Combination {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_sorted() {
        let combo = Combination::new(vec![1, 2, 3, 4, 5, 6], 49).unwrap();
        assert_eq!(combo.numbers(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(combo.len(), 6);
    }

    #[test]
    fn test_new_rejects_unsorted_and_duplicates() {
        assert!(Combination::new(vec![2, 1], 49).is_err());
        assert!(Combination::new(vec![1, 1], 49).is_err());
        assert!(Combination::from_unsorted(vec![5, 5, 1], 49).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Combination::new(vec![0, 1], 49).is_err());
        assert!(Combination::new(vec![1, 50], 49).is_err());
        assert!(Combination::new(vec![1, 49], 49).is_ok());
    }

    #[test]
    fn test_from_unsorted_sorts() {
        let combo = Combination::from_unsorted(vec![38, 6, 24, 9, 21, 13], 49).unwrap();
        assert_eq!(combo.numbers(), &[6, 9, 13, 21, 24, 38]);
    }

    #[test]
    fn test_empty_combination() {
        let combo = Combination::new(Vec::new(), 49).unwrap();
        assert!(combo.is_empty());
        assert_eq!(combo.distance(&combo).unwrap(), 0);
    }

    #[test]
    fn test_distance() {
        let a = Combination::new(vec![1, 2, 3, 4, 5, 6], 49).unwrap();
        let b = Combination::new(vec![4, 5, 6, 7, 8, 9], 49).unwrap();
        let c = Combination::new(vec![10, 11, 12, 13, 14, 15], 49).unwrap();
        assert_eq!(a.distance(&a).unwrap(), 0);
        assert_eq!(a.distance(&b).unwrap(), 3);
        assert_eq!(b.distance(&a).unwrap(), 3);
        assert_eq!(a.distance(&c).unwrap(), 6);
    }

    #[test]
    fn test_distance_length_mismatch() {
        let a = Combination::new(vec![1, 2, 3], 49).unwrap();
        let b = Combination::new(vec![1, 2], 49).unwrap();
        assert!(a.distance(&b).is_err());
    }

    #[test]
    fn test_intersection_matches_bitset() {
        let a = Combination::new(vec![3, 9, 27, 40, 45, 49], 49).unwrap();
        let b = Combination::new(vec![1, 9, 27, 30, 45, 48], 49).unwrap();
        assert_eq!(a.intersection_len(&b), 3);
        assert_eq!(
            a.to_number_set().intersection_len(&b.to_number_set()),
            a.intersection_len(&b)
        );
    }

    #[test]
    fn test_display_padded() {
        let combo = Combination::new(vec![6, 9, 13, 21, 24, 38], 49).unwrap();
        assert_eq!(combo.to_string(), " 6,  9, 13, 21, 24, 38");
    }
}
