// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Complement of a finalized set.
//!
//! [`Remaining`] walks the universe with a cursor and yields every unmarked
//! combination in canonical order. Nothing is materialized, so taking a short
//! sample only costs the walk up to the last sampled item.

use crate::combo::{Combination, Cursor, Universe};
use crate::engine::{Finalized, SetKind};
use crate::error::{Error, Result};

/// Lazy iterator over unmarked combinations.
pub struct Remaining<'a> {
    finalized: &'a Finalized,
    cursor: Option<Cursor>,
}

impl<'a> Remaining<'a> {
    pub fn new(finalized: &'a Finalized) -> Self {
        Self {
            finalized,
            cursor: finalized.universe().cursor_at(0).ok(),
        }
    }
}

impl Iterator for Remaining<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cursor = self.cursor.as_mut()?;
            let hit = if self.finalized.contains_rank(cursor.rank()) {
                None
            } else {
                Some(Combination::from_sorted_unchecked(cursor.numbers()))
            };
            if !cursor.advance() {
                self.cursor = None;
            }
            if hit.is_some() {
                return hit;
            }
        }
    }
}

/// First `limit` remaining combinations.
pub fn sample(finalized: &Finalized, limit: usize) -> Vec<Combination> {
    Remaining::new(finalized).take(limit).collect()
}

/// Number of `m`-subsets of `candidate` that are not covered.
///
/// `m` is the coverage universe's k. Fails on an elimination set or when
/// the candidate numbers fall outside the coverage universe.
pub fn undrawn_count(coverage: &Finalized, candidate: &[u8]) -> Result<usize> {
    if coverage.kind() != SetKind::Coverage {
        return Err(Error::validation(
            "undrawn sub-combinations need a coverage set",
        ));
    }
    let m = coverage.universe().k();
    let positions = Universe::new(candidate.len(), m)?;
    let mut sub = Vec::with_capacity(m);
    let mut undrawn = 0;
    for picked in positions.enumerate() {
        sub.clear();
        sub.extend(picked.numbers().iter().map(|&p| candidate[p as usize - 1]));
        if !coverage.is_marked(&sub)? {
            undrawn += 1;
        }
    }
    Ok(undrawn)
}

/// Up to `limit` combinations of `plays`, in canonical order, with at least
/// `min_undrawn` sub-combinations not covered.
///
/// Stops walking `plays` as soon as `limit` candidates are found.
pub fn candidates_with_undrawn(
    coverage: &Finalized,
    plays: &Universe,
    min_undrawn: usize,
    limit: usize,
) -> Result<Vec<(Combination, usize)>> {
    let mut found = Vec::with_capacity(limit.min(1024));
    if limit == 0 {
        return Ok(found);
    }
    for candidate in plays.enumerate() {
        let undrawn = undrawn_count(coverage, candidate.numbers())?;
        if undrawn >= min_undrawn {
            found.push((candidate, undrawn));
            if found.len() == limit {
                break;
            }
        }
    }
    Ok(found)
}
