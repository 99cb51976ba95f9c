// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Binomial coefficients.
//!
//! The enumerator needs C(i, j) for every `i <= n`, `j <= k` when ranking and
//! unranking, so they are precomputed once per universe into a Pascal table.
//! Entries that do not fit in a `u64` saturate; such entries are never
//! consulted for a universe whose own size fits.

/// Compute C(n, k) exactly, returning `None` on `u64` overflow.
///
/// Uses the recurrence C(n, i+1) = C(n, i) * (n - i) / (i + 1), which keeps
/// every intermediate value an integer.
pub fn checked_choose(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > u64::MAX as u128 {
            return None;
        }
    }
    Some(result as u64)
}

/// Compute C(n, k), saturating at `u64::MAX`.
pub fn choose(n: u64, k: u64) -> u64 {
    checked_choose(n, k).unwrap_or(u64::MAX)
}

/// Pascal table of C(i, j) for `0 <= i <= n`, `0 <= j <= k`.
#[derive(Debug, Clone)]
pub struct BinomialTable {
    width: usize,
    values: Vec<u64>,
}

impl BinomialTable {
    /// Build the table for rows `0..=n` and columns `0..=k`.
    pub fn new(n: usize, k: usize) -> Self {
        let width = k + 1;
        let mut values = vec![0u64; (n + 1) * width];
        for i in 0..=n {
            values[i * width] = 1;
            for j in 1..=k.min(i) {
                let above_left = values[(i - 1) * width + j - 1];
                let above = values[(i - 1) * width + j];
                values[i * width + j] = above_left.saturating_add(above);
            }
        }
        Self { width, values }
    }

    /// C(i, j); zero when `j > i`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        debug_assert!(j < self.width, "column {} outside table", j);
        self.values[i * self.width + j]
    }
}
