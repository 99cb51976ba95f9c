// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Warnings for skipped draw lines.
//!
//! A malformed line never aborts a load. It becomes a [`SkippedLine`] that
//! records where it was, what it said and why it was rejected, and bumps the
//! per-kind counter reported in the final summary.

use std::fmt;
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumDiscriminants, EnumIter, IntoStaticStr};

/// Why a line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(WarningKind))]
#[strum_discriminants(derive(EnumCountMacro, EnumIter, IntoStaticStr, Hash))]
pub enum LineWarning {
    /// The line does not have exactly one `:` between date and numbers.
    MissingDelimiter,

    /// The date is not six digits or not a calendar day.
    BadDate { text: String },

    /// The number list has the wrong count.
    FieldCount { expected: usize, found: usize },

    /// A token is not a pure non-negative integer.
    NonNumeric { token: String },

    /// No `/ bonus` part, and the loader is not permissive.
    MissingBonus,

    /// A number lies outside the playable range; the draw is dropped.
    OutOfRange { number: u32, max: u8 },

    /// The same number appears twice in one draw.
    DuplicateNumber { number: u8 },

    /// The line is not valid UTF-8.
    InvalidUtf8,
}

impl LineWarning {
    pub fn kind(&self) -> WarningKind {
        WarningKind::from(self)
    }
}

impl fmt::Display for LineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWarning::MissingDelimiter => {
                write!(f, "expected exactly one ':' between date and numbers")
            }
            LineWarning::BadDate { text } => write!(f, "invalid YYMMDD date {:?}", text),
            LineWarning::FieldCount { expected, found } => {
                write!(f, "expected {} numbers, found {}", expected, found)
            }
            LineWarning::NonNumeric { token } => write!(f, "non-numeric token {:?}", token),
            LineWarning::MissingBonus => write!(f, "missing '/ bonus' part"),
            LineWarning::OutOfRange { number, max } => {
                write!(f, "number {} outside 1..={}", number, max)
            }
            LineWarning::DuplicateNumber { number } => {
                write!(f, "number {} appears more than once", number)
            }
            LineWarning::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

/// A line the loader skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    pub content: String,
    pub warning: LineWarning,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} in {:?}",
            self.line_no, self.warning, self.content
        )
    }
}

/// Count of skipped lines per warning kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningCounts {
    counts: [usize; WarningKind::COUNT],
}

impl WarningCounts {
    pub fn new() -> Self {
        WarningCounts::default()
    }

    pub(crate) fn record(&mut self, kind: WarningKind) {
        self.counts[kind as usize] += 1;
    }

    /// Count for one kind.
    pub fn get(&self, kind: WarningKind) -> usize {
        self.counts[kind as usize]
    }

    /// Total skipped lines.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
