// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sub-combination coverage.
//!
//! Every draw of `play` numbers contributes its C(play, m) sub-combinations
//! of size `m` to a coverage set over the m-of-n universe. The
//! sub-combinations are produced by enumerating the positions universe
//! C(play, m) and picking the draw's numbers at those positions, which keeps
//! them ascending.

use super::cancel::CancelToken;
use super::finalized::Finalized;
use super::progress::ProgressSink;
use super::rank_set::RankSet;
use super::statistics::{Counters, SetKind, Statistics};
use crate::combo::{Combination, Universe};
use crate::config::Game;
use crate::error::{Error, Result};

/// Accumulating coverage state.
#[derive(Debug)]
pub struct CoverageEngine {
    game: Game,
    universe: Universe,
    positions: Universe,
    covered: RankSet,
    counters: Statistics,
}

impl CoverageEngine {
    /// Coverage of `sub_size`-subsets of the game's number range.
    pub fn new(game: Game, sub_size: usize) -> Result<Self> {
        let universe = game.sub_universe(sub_size)?;
        let positions = Universe::new(game.play, sub_size)?;
        Ok(Self {
            game,
            covered: RankSet::new(universe.size()),
            universe,
            positions,
            counters: Statistics::new(),
        })
    }

    /// The m-of-n universe being covered.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Covered so far.
    pub fn covered(&self) -> u64 {
        self.covered.len()
    }

    pub fn draws_processed(&self) -> usize {
        self.counters.get(Counters::DrawsProcessed) as usize
    }

    /// Add every sub-combination of `draw`; returns how many were new.
    pub fn cover(&mut self, draw: &Combination) -> Result<u64> {
        let numbers = draw.numbers();
        let max = self.game.max_number;
        if numbers.len() != self.game.play || numbers.iter().any(|&v| v > max) {
            return Err(Error::InvalidCombination {
                numbers: numbers.to_vec(),
                reason: format!("expected {} numbers in 1..={}", self.game.play, max),
            });
        }
        let mut ranks = Vec::with_capacity(self.positions.size() as usize);
        let mut sub = Vec::with_capacity(self.universe.k());
        for picked in self.positions.enumerate() {
            sub.clear();
            sub.extend(picked.numbers().iter().map(|&p| numbers[p as usize - 1]));
            ranks.push(self.universe.rank(&sub)?);
        }
        let newly = self.covered.insert_batch(&ranks);
        self.counters
            .add(Counters::SubCombinationsSeen, ranks.len() as u64);
        self.counters.increment_counter(Counters::BatchesMerged);
        self.counters.increment_counter(Counters::DrawsProcessed);
        Ok(newly)
    }

    /// Cover each draw in order, reporting progress.
    ///
    /// Cancellation is checked before each draw.
    pub fn cover_draws(
        &mut self,
        draws: &[Combination],
        sink: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<u64> {
        let universe_size = self.universe.size();
        super::drive(draws, universe_size, sink, |draw| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled {
                    draws_completed: self.draws_processed(),
                });
            }
            let newly = self.cover(draw)?;
            Ok((newly, self.covered.len()))
        })
    }

    /// Stop accumulating; the result is read-only.
    pub fn finalize(self) -> Finalized {
        log::info!(
            "Coverage finalized: {} of {} covered after {} draws",
            self.covered.len(),
            self.universe.size(),
            self.draws_processed()
        );
        Finalized::new(
            SetKind::Coverage,
            self.universe,
            self.covered,
            self.counters,
        )
    }
}
