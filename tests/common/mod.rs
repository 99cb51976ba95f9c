// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use lotto_coverage::Combination;
use proptest::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small draw history in the canonical line format.
pub const HISTORY: &str = "\
# Lotto 6/49 history
251018:  3, 11, 17, 25, 40, 44 / 21
251022: 38, 24, 21, 13,  9,  6 / 17

251025:  6,  9, 13, 21, 24, 38 /  5
";

/// Build a combination, panicking on invalid input.
pub fn combo(numbers: &[u8], max_number: u8) -> Combination {
    Combination::new(numbers.to_vec(), max_number).unwrap()
}

/// Write `contents` to `name` inside a fresh temporary directory.
///
/// The directory is returned so that it outlives the test body.
pub fn write_temp(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    (dir, path)
}

/// Brute-force count of k-subsets of `1..=n` sharing exactly `shared`
/// numbers with `draw`.
pub fn brute_force_shared(n: u8, k: usize, draw: &[u8], shared: usize) -> u64 {
    let mut count = 0;
    let mut stack: Vec<u8> = Vec::with_capacity(k);
    fn walk(n: u8, k: usize, next: u8, stack: &mut Vec<u8>, draw: &[u8], shared: usize, count: &mut u64) {
        if stack.len() == k {
            if stack.iter().filter(|v| draw.contains(v)).count() == shared {
                *count += 1;
            }
            return;
        }
        for v in next..=n {
            stack.push(v);
            walk(n, k, v + 1, stack, draw, shared, count);
            stack.pop();
        }
    }
    walk(n, k, 1, &mut stack, draw, shared, &mut count);
    count
}

/// Strategy for a strictly ascending `k`-subset of `1..=n`.
pub fn arb_combination(n: u8, k: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::sample::subsequence((1..=n).collect::<Vec<u8>>(), k)
}
