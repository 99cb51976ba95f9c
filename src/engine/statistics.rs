// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Work counters are kept by the engines while accumulating; the summary
//! ([`PassStatistics`]) is produced from a finalized set.

use serde::Serialize;
use std::fmt;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(Debug, EnumCountMacro, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Draws fully applied to the set.
    DrawsProcessed,
    /// Candidates whose distance was computed.
    CandidatesScanned,
    /// Candidates skipped because they were already marked.
    CandidatesSkipped,
    /// Batches merged into the shared set.
    BatchesMerged,
    /// Sub-combinations generated from draws, duplicates included.
    SubCombinationsSeen,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Add to the specified counter.
    pub(crate) fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

/// What the marked set means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    /// Combinations at the target distance from some draw.
    Elimination,
    /// Sub-combinations observed inside some draw.
    Coverage,
}

/// Summary of a finalized pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassStatistics {
    pub kind: SetKind,
    /// n of the universe.
    pub n: usize,
    /// k of the universe.
    pub k: usize,
    /// C(n, k).
    pub universe_size: u64,
    /// Eliminated or covered combinations.
    pub marked: u64,
    pub remaining: u64,
    pub percent_marked: f64,
    pub draws_processed: usize,
    /// Coverage only: draws x C(play, k), duplicates included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_combinations_seen: Option<u64>,
}

impl PassStatistics {
    /// Sub-combinations that were drawn more than once (coverage only).
    pub fn overlap(&self) -> Option<u64> {
        self.sub_combinations_seen
            .map(|seen| seen.saturating_sub(self.marked))
    }

    /// Overlap as a percentage of everything seen (coverage only).
    pub fn overlap_percent(&self) -> Option<f64> {
        let seen = self.sub_combinations_seen?;
        let overlap = self.overlap()?;
        Some(if seen == 0 {
            0.0
        } else {
            overlap as f64 * 100.0 / seen as f64
        })
    }
}

impl fmt::Display for PassStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (title, verb) = match self.kind {
            SetKind::Elimination => ("ELIMINATION STATISTICS", "Eliminated"),
            SetKind::Coverage => ("COVERAGE STATISTICS", "Covered"),
        };
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "{} ({}-of-{})", title, self.k, self.n)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total possible:      {}", self.universe_size)?;
        writeln!(
            f,
            "{:<21}{} ({:.2}%)",
            format!("{}:", verb),
            self.marked,
            self.percent_marked
        )?;
        writeln!(f, "Remaining:           {}", self.remaining)?;
        writeln!(f, "Draws processed:     {}", self.draws_processed)?;
        if let (Some(seen), Some(overlap), Some(percent)) = (
            self.sub_combinations_seen,
            self.overlap(),
            self.overlap_percent(),
        ) {
            writeln!(f, "Max possible:        {}", seen)?;
            writeln!(f, "Overlap:             {} ({:.1}%)", overlap, percent)?;
        }
        write!(f, "{}", rule)
    }
}
