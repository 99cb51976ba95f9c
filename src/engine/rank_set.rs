// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! RankSet: a dense bitset over the ranks of a universe.
//!
//! Bit r is set when the combination of rank r has been marked (eliminated
//! or covered). Words are `AtomicU64` so that parallel scan workers can merge
//! their batches without a lock:
//! - `fetch_or` makes every insertion linearizable and reports whether the
//!   bit was new, so duplicate insertions are never double counted
//! - the set only grows; there is no removal
//!
//! Relaxed ordering is sufficient: readers that need to observe a draw's
//! insertions run after the rayon join that ends the draw, which already
//! establishes the happens-before edge.

use std::sync::atomic::{AtomicU64, Ordering};

/// Grow-only set of ranks in `0..capacity`.
#[derive(Debug)]
pub struct RankSet {
    words: Vec<AtomicU64>,
    capacity: u64,
    len: AtomicU64,
}

impl RankSet {
    /// Create an empty set able to hold ranks `0..capacity`.
    pub fn new(capacity: u64) -> Self {
        let word_count = capacity.div_ceil(64) as usize;
        Self {
            words: (0..word_count).map(|_| AtomicU64::new(0)).collect(),
            capacity,
            len: AtomicU64::new(0),
        }
    }

    /// Exclusive upper bound on ranks.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Check if the set contains a rank.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= capacity`.
    #[inline]
    pub fn contains(&self, rank: u64) -> bool {
        assert!(
            rank < self.capacity,
            "rank out of range: {} >= {}",
            rank,
            self.capacity
        );
        let word = self.words[(rank / 64) as usize].load(Ordering::Relaxed);
        (word >> (rank % 64)) & 1 != 0
    }

    /// Insert a rank; returns true if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= capacity`.
    #[inline]
    pub fn insert(&self, rank: u64) -> bool {
        assert!(
            rank < self.capacity,
            "rank out of range: {} >= {}",
            rank,
            self.capacity
        );
        let mask = 1u64 << (rank % 64);
        let previous = self.words[(rank / 64) as usize].fetch_or(mask, Ordering::Relaxed);
        let fresh = previous & mask == 0;
        if fresh {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    /// Insert a batch of ranks; returns how many were new.
    pub fn insert_batch(&self, ranks: &[u64]) -> u64 {
        ranks.iter().filter(|&&rank| self.insert(rank)).count() as u64
    }

    /// Number of ranks in the set.
    pub fn len(&self) -> u64 {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over set ranks in ascending order, skipping empty words.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(index, word)| {
                let mut bits = word.load(Ordering::Relaxed);
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let bit = bits.trailing_zeros() as u64;
                    bits &= bits - 1;
                    Some(index as u64 * 64 + bit)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_insert_contains() {
        let set = RankSet::new(200);
        assert!(set.is_empty());
        assert!(set.insert(0));
        assert!(set.insert(199));
        assert!(!set.insert(0));
        assert!(set.contains(199));
        assert!(!set.contains(100));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_batch_counts_only_new() {
        let set = RankSet::new(1000);
        assert_eq!(set.insert_batch(&[1, 2, 3, 3]), 3);
        assert_eq!(set.insert_batch(&[3, 4]), 1);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_iter_ascending() {
        let set = RankSet::new(300);
        for rank in [257, 3, 64, 63] {
            set.insert(rank);
        }
        let ranks: Vec<u64> = set.iter().collect();
        assert_eq!(ranks, vec![3, 63, 64, 257]);
    }

    #[test]
    fn test_concurrent_inserts_are_counted_once() {
        let set = RankSet::new(10_000);
        (0..8u64).into_par_iter().for_each(|worker| {
            for rank in 0..10_000u64 {
                if rank % 2 == 0 || rank % 8 == worker {
                    set.insert(rank);
                }
            }
        });
        assert_eq!(set.len(), set.iter().count() as u64);
        assert_eq!(set.len(), 10_000);
    }

    #[test]
    #[should_panic(expected = "rank out of range")]
    fn test_out_of_range_panics() {
        let set = RankSet::new(10);
        set.contains(10);
    }
}
