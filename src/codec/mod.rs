// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Record codecs for combination files.
//!
//! Two representations are supported, selected by an explicit [`Format`]
//! tag supplied by the caller:
//! - text: padded numbers joined by `", "`, one record per line
//! - binary: one offset byte per number, fixed-width records

pub mod binary;
pub mod text;

use std::fmt;

/// Representation of a combination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Binary,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Binary => write!(f, "binary"),
        }
    }
}
