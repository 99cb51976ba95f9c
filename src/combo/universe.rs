// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The universe of all k-subsets of `{1..n}` in lexicographic order.
//!
//! The universe is never materialized. It can be walked lazily (full
//! traversal), converted between rank and combination through the
//! combinatorial number system, or walked from an arbitrary rank so that the
//! engine can split the space into rank ranges for parallel workers.
//!
//! # Ranking
//!
//! For an ascending combination `c_1 < ... < c_k` over `[1, n]`, map each
//! element to `d_i = n - c_i`. The `d_i` are strictly decreasing and
//! `R = sum C(d_i, k - i + 1)` is their combinatorial-number-system value,
//! which orders combinations in *reverse* lexicographic order. Hence
//!
//! ```text
//! rank(c) = C(n, k) - 1 - sum_{i=1..k} C(n - c_i, k - i + 1)
//! ```
//!
//! Ranking is O(k). Unranking inverts the sum greedily with a binary search
//! per position, O(k log n).
//!
//! # Examples
//!
//! ```
//! use lotto_coverage::combo::Universe;
//!
//! let universe = Universe::new(5, 3).unwrap();
//! assert_eq!(universe.size(), 10);
//!
//! let first: Vec<Vec<u8>> = universe
//!     .enumerate()
//!     .take(3)
//!     .map(|c| c.numbers().to_vec())
//!     .collect();
//! assert_eq!(first, vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 2, 5]]);
//!
//! let combo = universe.unrank(9).unwrap();
//! assert_eq!(combo.numbers(), &[3, 4, 5]);
//! assert_eq!(universe.rank(combo.numbers()).unwrap(), 9);
//! ```

use super::binomial::{checked_choose, BinomialTable};
use super::Combination;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Largest supported `n`; every number must fit in one codec byte.
pub const MAX_NUMBER: usize = u8::MAX as usize;

/// The implicit set of all C(n, k) combinations.
#[derive(Debug, Clone)]
pub struct Universe {
    n: usize,
    k: usize,
    size: u64,
    table: Arc<BinomialTable>,
}

impl Universe {
    /// Create the universe of k-subsets of `{1..n}`.
    ///
    /// `k > n` is accepted and yields an empty universe. `n` above
    /// [`MAX_NUMBER`] and universes whose size overflows `u64` are rejected.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        if n > MAX_NUMBER {
            return Err(Error::validation(format!(
                "n must be at most {}, got {}",
                MAX_NUMBER, n
            )));
        }
        let size = checked_choose(n as u64, k as u64).ok_or_else(|| {
            Error::validation(format!("C({}, {}) does not fit in 64 bits", n, k))
        })?;
        Ok(Self {
            n,
            k,
            size,
            table: Arc::new(BinomialTable::new(n, k)),
        })
    }

    /// Create a universe from signed arguments, rejecting negatives.
    pub fn from_signed(n: i64, k: i64) -> Result<Self> {
        if n < 0 || k < 0 {
            return Err(Error::validation(format!(
                "invalid argument: n and k must be non-negative (n={}, k={})",
                n, k
            )));
        }
        Self::new(n as usize, k as usize)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// C(n, k).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Largest number in the universe, as a byte.
    pub fn max_number(&self) -> u8 {
        self.n as u8
    }

    /// Lazily enumerate every combination in ascending lexicographic order.
    ///
    /// Each call returns a fresh iterator; the universe holds no cursor.
    pub fn enumerate(&self) -> Combinations {
        Combinations {
            cursor: if self.size == 0 {
                None
            } else {
                Some(Cursor::first(self.n, self.k))
            },
            remaining: self.size,
        }
    }

    /// Lazily enumerate from `start` (inclusive) to the end.
    pub fn enumerate_from(&self, start: u64) -> Result<Combinations> {
        if start == self.size {
            return Ok(Combinations {
                cursor: None,
                remaining: 0,
            });
        }
        Ok(Combinations {
            cursor: Some(self.cursor_at(start)?),
            remaining: self.size - start,
        })
    }

    /// Position a walking cursor at `rank`.
    pub fn cursor_at(&self, rank: u64) -> Result<Cursor> {
        let numbers = self.unrank_numbers(rank)?;
        Ok(Cursor {
            numbers,
            n: self.n,
            rank,
        })
    }

    /// Rank of a combination in canonical order.
    pub fn rank(&self, numbers: &[u8]) -> Result<u64> {
        self.check_shape(numbers)?;
        let k = self.k;
        let mut sum = 0u64;
        for (i, &c) in numbers.iter().enumerate() {
            sum += self.table.get(self.n - c as usize, k - i);
        }
        Ok(self.size - 1 - sum)
    }

    /// Combination at `rank` in canonical order.
    pub fn unrank(&self, rank: u64) -> Result<Combination> {
        let numbers = self.unrank_numbers(rank)?;
        Ok(Combination::from_sorted_unchecked(&numbers))
    }

    fn unrank_numbers(&self, rank: u64) -> Result<Vec<u8>> {
        if rank >= self.size {
            return Err(Error::RankOutOfRange {
                rank,
                size: self.size,
            });
        }
        let (n, k) = (self.n, self.k);
        let mut residual = self.size - 1 - rank;
        let mut numbers = Vec::with_capacity(k);
        // Exclusive upper bound for the next d.
        let mut bound = n;
        for i in 0..k {
            let j = k - i;
            // Largest d in [j-1, bound) with C(d, j) <= residual.
            let (mut lo, mut hi) = (j - 1, bound - 1);
            while lo < hi {
                let mid = lo + (hi - lo + 1) / 2;
                if self.table.get(mid, j) <= residual {
                    lo = mid;
                } else {
                    hi = mid - 1;
                }
            }
            residual -= self.table.get(lo, j);
            numbers.push((n - lo) as u8);
            bound = lo;
        }
        Ok(numbers)
    }

    fn check_shape(&self, numbers: &[u8]) -> Result<()> {
        if numbers.len() != self.k {
            return Err(Error::validation(format!(
                "expected {} numbers, got {}",
                self.k,
                numbers.len()
            )));
        }
        let invalid = numbers.iter().any(|&v| v == 0 || v as usize > self.n)
            || numbers.windows(2).any(|w| w[0] >= w[1]);
        if invalid {
            return Err(Error::InvalidCombination {
                numbers: numbers.to_vec(),
                reason: format!("not an ascending {}-subset of 1..={}", self.k, self.n),
            });
        }
        Ok(())
    }
}

/// In-place walker over consecutive combinations.
///
/// Used by the scan loops to avoid an allocation per candidate.
#[derive(Debug, Clone)]
pub struct Cursor {
    numbers: Vec<u8>,
    n: usize,
    rank: u64,
}

impl Cursor {
    fn first(n: usize, k: usize) -> Self {
        Self {
            numbers: (1..=k as u8).collect(),
            n,
            rank: 0,
        }
    }

    /// The combination under the cursor.
    #[inline]
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// Rank of the combination under the cursor.
    #[inline]
    pub fn rank(&self) -> u64 {
        self.rank
    }

    /// Step to the lexicographic successor; false at the last combination.
    #[inline]
    pub fn advance(&mut self) -> bool {
        let k = self.numbers.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            let limit = (self.n - (k - 1 - i)) as u8;
            if self.numbers[i] < limit {
                self.numbers[i] += 1;
                for j in i + 1..k {
                    self.numbers[j] = self.numbers[j - 1] + 1;
                }
                self.rank += 1;
                return true;
            }
        }
        false
    }
}

/// Lazy iterator over a universe (or a suffix of it).
#[derive(Debug, Clone)]
pub struct Combinations {
    cursor: Option<Cursor>,
    remaining: u64,
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        let combo = Combination::from_sorted_unchecked(cursor.numbers());
        self.remaining -= 1;
        if !cursor.advance() {
            self.cursor = None;
        }
        Some(combo)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
