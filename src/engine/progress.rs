// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Progress reporting.
//!
//! Engines call a [`ProgressSink`] after every draw. Sinks only observe; they
//! cannot influence what gets marked.

use crate::combo::Combination;

/// Snapshot after one draw has been applied.
#[derive(Debug, Clone, Copy)]
pub struct DrawProgress<'a> {
    /// 1-based position of the draw in this pass.
    pub index: usize,
    /// Draws in this pass.
    pub total: usize,
    pub draw: &'a Combination,
    /// Combinations newly marked by this draw.
    pub newly_marked: u64,
    /// Marked so far.
    pub marked: u64,
    pub universe_size: u64,
}

impl DrawProgress<'_> {
    pub fn remaining(&self) -> u64 {
        self.universe_size - self.marked
    }

    pub fn percent_marked(&self) -> f64 {
        if self.universe_size == 0 {
            0.0
        } else {
            self.marked as f64 * 100.0 / self.universe_size as f64
        }
    }
}

/// Receives progress callbacks.
pub trait ProgressSink {
    fn draw_done(&mut self, progress: &DrawProgress<'_>);
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn draw_done(&mut self, _progress: &DrawProgress<'_>) {}
}

/// Logs a line per draw and a percentage every `every` draws.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    every: usize,
    per_draw: bool,
}

impl LogProgress {
    /// Per-draw lines plus a summary every `every` draws.
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            per_draw: true,
        }
    }

    /// Only the periodic summary (for cheap passes over many draws).
    pub fn periodic(every: usize) -> Self {
        Self {
            every: every.max(1),
            per_draw: false,
        }
    }
}

impl ProgressSink for LogProgress {
    fn draw_done(&mut self, p: &DrawProgress<'_>) {
        if self.per_draw {
            log::info!(
                "Draw {:4}: {} | Marked: {} | Remaining: {}",
                p.index,
                p.draw,
                p.newly_marked,
                p.remaining()
            );
        }
        if p.index % self.every == 0 || p.index == p.total {
            log::info!(
                "Processed {}/{} draws | {:.2}% marked | {} remaining",
                p.index,
                p.total,
                p.percent_marked(),
                p.remaining()
            );
        }
    }
}

/// Records every callback; handy for tests and callers that post-process.
#[derive(Debug, Default, Clone)]
pub struct CollectProgress {
    /// `(index, newly_marked, marked)` per draw.
    pub events: Vec<(usize, u64, u64)>,
}

impl ProgressSink for CollectProgress {
    fn draw_done(&mut self, p: &DrawProgress<'_>) {
        self.events.push((p.index, p.newly_marked, p.marked));
    }
}
