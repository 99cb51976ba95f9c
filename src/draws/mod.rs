// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Historical draws: records, the text loader and the JSON export.

pub mod json;
pub mod loader;
pub mod record;
pub mod warning;

pub use json::{DrawEntry, DrawsDocument};
pub use loader::{parse_date, DrawLoader, LineFormat, LoadReport};
pub use record::{sort_chronologically, DrawRecord};
pub use warning::{LineWarning, SkippedLine, WarningCounts, WarningKind};
