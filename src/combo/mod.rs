// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Combinatorial primitives.
//!
//! This module contains the value types and the enumerator everything else
//! is built on:
//! - Combination: strictly ascending k-tuple over `[1, n]`
//! - NumberSet: bitset of numbers for popcount intersections
//! - Universe: lazy, rankable enumeration of all C(n, k) combinations
//! - binomial: exact and tabulated binomial coefficients

pub mod binomial;
pub mod combination;
pub mod number_set;
pub mod universe;

// Re-export for convenience
pub use binomial::{checked_choose, choose};
pub use combination::Combination;
pub use number_set::NumberSet;
pub use universe::{Combinations, Cursor, Universe, MAX_NUMBER};
