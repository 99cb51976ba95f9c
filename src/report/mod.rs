// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reporting and export of finalized sets.
//!
//! - [`remaining`]: the lazy complement, bounded samples and undrawn counts
//! - [`writer`]: text and binary combination writers
//! - [`filter`]: streaming list, pack and trim conversions
//!
//! [`RunSummary`] gathers everything the operator sees at the end of a run.

pub mod filter;
pub mod remaining;
pub mod writer;

pub use filter::{filter_file, filter_records, trim_file, FilterStats, RecordSource};
pub use remaining::{candidates_with_undrawn, sample, undrawn_count, Remaining};
pub use writer::{export_remaining, write_all, CombinationWriter, TextHeader};

use crate::draws::{LoadReport, WarningKind};
use crate::engine::PassStatistics;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use strum::IntoEnumIterator;

/// Pass statistics plus the loader's skipped-line figures.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub pass: PassStatistics,
    pub draws_loaded: usize,
    pub lines_skipped: usize,
    /// Non-zero skipped-line counts by kind.
    pub skipped_by_kind: BTreeMap<&'static str, usize>,
    /// Draws dropped because a number was outside `[1, n]`.
    pub out_of_range: usize,
    /// Records written by an export, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<u64>,
}

impl RunSummary {
    pub fn new(pass: PassStatistics, load: &LoadReport) -> Self {
        let skipped_by_kind = WarningKind::iter()
            .filter(|&kind| load.counts.get(kind) > 0)
            .map(|kind| (kind.into(), load.counts.get(kind)))
            .collect();
        Self {
            pass,
            draws_loaded: load.draws.len(),
            lines_skipped: load.counts.total(),
            skipped_by_kind,
            out_of_range: load.out_of_range(),
            exported: None,
        }
    }

    pub fn with_exported(mut self, exported: u64) -> Self {
        self.exported = Some(exported);
        self
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.pass)?;
        writeln!(f, "Draws loaded:        {}", self.draws_loaded)?;
        write!(f, "Lines skipped:       {}", self.lines_skipped)?;
        for (kind, count) in &self.skipped_by_kind {
            write!(f, "\n  {:<18}{}", kind, count)?;
        }
        if self.out_of_range > 0 {
            write!(f, "\nDropped (range):     {}", self.out_of_range)?;
        }
        if let Some(exported) = self.exported {
            write!(f, "\nExported:            {}", exported)?;
        }
        Ok(())
    }
}
