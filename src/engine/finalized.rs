// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Read-only result of a pass.
//!
//! Engines turn into a [`Finalized`] by consuming themselves, so once a run
//! is finalized no further marking is possible; a new run needs a new engine.

use super::rank_set::RankSet;
use super::statistics::{Counters, PassStatistics, SetKind, Statistics};
use crate::combo::{Combination, Universe};
use crate::error::Result;

/// A finalized elimination or coverage set over its universe.
#[derive(Debug)]
pub struct Finalized {
    kind: SetKind,
    universe: Universe,
    set: RankSet,
    counters: Statistics,
}

impl Finalized {
    pub(crate) fn new(
        kind: SetKind,
        universe: Universe,
        set: RankSet,
        counters: Statistics,
    ) -> Self {
        Self {
            kind,
            universe,
            set,
            counters,
        }
    }

    pub fn kind(&self) -> SetKind {
        self.kind
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Work counters accumulated during the pass.
    pub fn counters(&self) -> &Statistics {
        &self.counters
    }

    /// Eliminated or covered count.
    pub fn marked(&self) -> u64 {
        self.set.len()
    }

    /// Size of the complement.
    pub fn remaining_count(&self) -> u64 {
        self.universe.size() - self.set.len()
    }

    /// Whether a combination of this universe is marked.
    pub fn is_marked(&self, numbers: &[u8]) -> Result<bool> {
        Ok(self.set.contains(self.universe.rank(numbers)?))
    }

    /// Marked combinations in canonical order.
    pub fn marked_combinations(&self) -> impl Iterator<Item = Combination> + '_ {
        self.set
            .iter()
            .filter_map(move |rank| self.universe.unrank(rank).ok())
    }

    /// Whether the combination at `rank` is marked; false past the universe.
    pub fn contains_rank(&self, rank: u64) -> bool {
        rank < self.universe.size() && self.set.contains(rank)
    }

    /// Summary figures for reporting.
    pub fn statistics(&self) -> PassStatistics {
        let universe_size = self.universe.size();
        let marked = self.marked();
        PassStatistics {
            kind: self.kind,
            n: self.universe.n(),
            k: self.universe.k(),
            universe_size,
            marked,
            remaining: universe_size - marked,
            percent_marked: if universe_size == 0 {
                0.0
            } else {
                marked as f64 * 100.0 / universe_size as f64
            },
            draws_processed: self.counters.get(Counters::DrawsProcessed) as usize,
            sub_combinations_seen: match self.kind {
                SetKind::Coverage => Some(self.counters.get(Counters::SubCombinationsSeen)),
                SetKind::Elimination => None,
            },
        }
    }
}
