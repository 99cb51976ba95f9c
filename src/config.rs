// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Game presets and scan tuning.
//!
//! Everything here is validated before any processing begins; an invalid
//! `max_play` or an impossible `k`/`n` pairing is a validation error.

use crate::combo::Universe;
use crate::error::{Error, Result};
use serde::Serialize;

/// Default number of ranks a worker collects before flushing into the set.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Default number of ranks in one parallel work unit.
pub const DEFAULT_CHUNK_SIZE: u64 = 1 << 16;

/// Default number of draws between progress summaries.
pub const DEFAULT_PROGRESS_EVERY: usize = 10;

/// A lottery game: how many numbers are played out of which range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Game {
    /// Highest playable number (n).
    pub max_number: u8,
    /// Numbers per play (k); also the binary record width.
    pub play: usize,
}

impl Game {
    /// 6 numbers out of 1..=49.
    pub const SIX_49: Game = Game {
        max_number: 49,
        play: 6,
    };

    /// 7 numbers out of 1..=47.
    pub const SEVEN_47: Game = Game {
        max_number: 47,
        play: 7,
    };

    /// Preset for a `max_play` command-line value.
    pub fn from_max_play(max_play: i64) -> Result<Self> {
        match max_play {
            6 => Ok(Self::SIX_49),
            7 => Ok(Self::SEVEN_47),
            other => Err(Error::validation(format!(
                "max_play must be 6 or 7, got {}",
                other
            ))),
        }
    }

    /// Custom game, checked for a usable universe.
    pub fn custom(max_number: u8, play: usize) -> Result<Self> {
        if play > max_number as usize {
            return Err(Error::validation(format!(
                "cannot play {} numbers out of {}",
                play, max_number
            )));
        }
        Ok(Self { max_number, play })
    }

    /// Universe of all plays.
    pub fn universe(&self) -> Result<Universe> {
        Universe::new(self.max_number as usize, self.play)
    }

    /// Universe of all `size`-subsets of the game's number range.
    pub fn sub_universe(&self, size: usize) -> Result<Universe> {
        if size > self.play {
            return Err(Error::validation(format!(
                "sub-combination size {} exceeds play size {}",
                size, self.play
            )));
        }
        Universe::new(self.max_number as usize, size)
    }
}

/// Tuning for the full-space scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanConfig {
    /// Ranks collected per worker before a merge into the shared set.
    pub batch_size: usize,
    /// Ranks per parallel work unit; cancellation is checked between units.
    pub chunk_size: u64,
    /// Worker threads; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Draws between progress summaries.
    pub progress_every: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: None,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::validation("batch size must be positive"));
        }
        if self.chunk_size == 0 {
            return Err(Error::validation("chunk size must be positive"));
        }
        if self.threads == Some(0) {
            return Err(Error::validation("thread count must be positive"));
        }
        Ok(())
    }
}
