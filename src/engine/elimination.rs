// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Full-space elimination.
//!
//! For each draw the whole universe is scanned once. The rank space is cut
//! into chunks of `chunk_size` ranks which rayon workers walk with an in-place
//! [`Cursor`](crate::combo::Cursor); matching ranks are collected in a local
//! batch and merged into the shared [`RankSet`] whenever the batch reaches
//! `batch_size`, and once more at the end of the chunk.
//!
//! A candidate is eliminated when it shares exactly `k - distance` numbers
//! with the draw. Candidates eliminated by earlier draws are skipped without
//! computing their distance.

use super::cancel::CancelToken;
use super::finalized::Finalized;
use super::progress::ProgressSink;
use super::rank_set::RankSet;
use super::statistics::{Counters, SetKind, Statistics};
use crate::combo::{Combination, NumberSet, Universe};
use crate::config::ScanConfig;
use crate::error::{Error, Result};
use rayon::prelude::*;

/// Per-chunk work figures, summed across workers.
#[derive(Debug, Default, Clone, Copy)]
struct ScanTally {
    scanned: u64,
    skipped: u64,
    newly_marked: u64,
    batches: u64,
}

impl ScanTally {
    fn merge(self, other: ScanTally) -> ScanTally {
        ScanTally {
            scanned: self.scanned + other.scanned,
            skipped: self.skipped + other.skipped,
            newly_marked: self.newly_marked + other.newly_marked,
            batches: self.batches + other.batches,
        }
    }
}

/// Accumulating elimination state.
///
/// Call [`eliminate`](Self::eliminate) once per draw, then
/// [`finalize`](Self::finalize) to obtain the read-only result.
pub struct EliminationEngine {
    universe: Universe,
    eliminated: RankSet,
    config: ScanConfig,
    counters: Statistics,
    pool: Option<rayon::ThreadPool>,
}

impl EliminationEngine {
    pub fn new(universe: Universe, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| Error::validation(format!("cannot build thread pool: {}", e)))?,
            ),
            None => None,
        };
        Ok(Self {
            eliminated: RankSet::new(universe.size()),
            universe,
            config,
            counters: Statistics::new(),
            pool,
        })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Eliminated so far.
    pub fn eliminated(&self) -> u64 {
        self.eliminated.len()
    }

    pub fn draws_processed(&self) -> usize {
        self.counters.get(Counters::DrawsProcessed) as usize
    }

    /// Whether a combination has been eliminated so far.
    pub fn is_eliminated(&self, numbers: &[u8]) -> Result<bool> {
        Ok(self.eliminated.contains(self.universe.rank(numbers)?))
    }

    /// Distances run from 0 (the draw itself) to k (disjoint from the draw).
    pub fn check_distance(&self, distance: usize) -> Result<()> {
        let k = self.universe.k();
        if distance > k {
            return Err(Error::validation(format!(
                "distance must be in 0..={}, got {}",
                k, distance
            )));
        }
        Ok(())
    }

    /// Eliminate every candidate at exactly `distance` from `draw`.
    ///
    /// Returns how many combinations were newly eliminated. On cancellation
    /// the draw is not counted as processed; batches already merged stay in
    /// the set.
    pub fn eliminate(
        &mut self,
        draw: &Combination,
        distance: usize,
        cancel: &CancelToken,
    ) -> Result<u64> {
        self.check_distance(distance)?;
        let k = self.universe.k();
        // Rejects draws of the wrong length or out of range.
        self.universe.rank(draw.numbers())?;

        let target = draw.to_number_set();
        let shared = k - distance;
        let this = &*self;
        let tally = match &this.pool {
            Some(pool) => pool.install(|| this.scan(&target, shared, cancel)),
            None => this.scan(&target, shared, cancel),
        }?;

        self.counters.add(Counters::CandidatesScanned, tally.scanned);
        self.counters.add(Counters::CandidatesSkipped, tally.skipped);
        self.counters.add(Counters::BatchesMerged, tally.batches);
        self.counters.increment_counter(Counters::DrawsProcessed);
        log::debug!(
            "draw {} at distance {}: {} new, {} scanned, {} skipped, {} batches",
            draw,
            distance,
            tally.newly_marked,
            tally.scanned,
            tally.skipped,
            tally.batches
        );
        Ok(tally.newly_marked)
    }

    /// Eliminate at `distance` for each draw in order, reporting progress.
    ///
    /// Returns the total newly eliminated. A bad distance is rejected even
    /// when `draws` is empty.
    pub fn eliminate_draws(
        &mut self,
        draws: &[Combination],
        distance: usize,
        sink: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<u64> {
        self.check_distance(distance)?;
        let universe_size = self.universe.size();
        super::drive(draws, universe_size, sink, |draw| {
            let newly = self.eliminate(draw, distance, cancel)?;
            Ok((newly, self.eliminated.len()))
        })
    }

    /// Stop accumulating; the result is read-only.
    pub fn finalize(self) -> Finalized {
        log::info!(
            "Elimination finalized: {} of {} eliminated after {} draws",
            self.eliminated.len(),
            self.universe.size(),
            self.draws_processed()
        );
        Finalized::new(
            SetKind::Elimination,
            self.universe,
            self.eliminated,
            self.counters,
        )
    }

    fn scan(&self, target: &NumberSet, shared: usize, cancel: &CancelToken) -> Result<ScanTally> {
        let size = self.universe.size();
        let chunk = self.config.chunk_size;
        let chunks = size.div_ceil(chunk);
        (0..chunks)
            .into_par_iter()
            .map(|index| {
                let start = index * chunk;
                let end = (start + chunk).min(size);
                self.scan_chunk(start, end, target, shared, cancel)
            })
            .try_reduce(ScanTally::default, |a, b| Ok(a.merge(b)))
    }

    fn scan_chunk(
        &self,
        start: u64,
        end: u64,
        target: &NumberSet,
        shared: usize,
        cancel: &CancelToken,
    ) -> Result<ScanTally> {
        self.check_cancelled(cancel)?;
        let batch_size = self.config.batch_size;
        let mut tally = ScanTally::default();
        let mut batch = Vec::with_capacity(batch_size.min((end - start) as usize));
        let mut cursor = self.universe.cursor_at(start)?;
        loop {
            let rank = cursor.rank();
            if self.eliminated.contains(rank) {
                tally.skipped += 1;
            } else {
                tally.scanned += 1;
                let common = cursor
                    .numbers()
                    .iter()
                    .filter(|&&v| target.contains(v))
                    .count();
                if common == shared {
                    batch.push(rank);
                    if batch.len() >= batch_size {
                        self.flush(&mut batch, &mut tally);
                        self.check_cancelled(cancel)?;
                    }
                }
            }
            if rank + 1 >= end || !cursor.advance() {
                break;
            }
        }
        self.flush(&mut batch, &mut tally);
        Ok(tally)
    }

    fn flush(&self, batch: &mut Vec<u64>, tally: &mut ScanTally) {
        if batch.is_empty() {
            return;
        }
        tally.newly_marked += self.eliminated.insert_batch(batch);
        tally.batches += 1;
        batch.clear();
    }

    fn check_cancelled(&self, cancel: &CancelToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled {
                draws_completed: self.draws_processed(),
            });
        }
        Ok(())
    }
}
