// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! JSON export of the draw history for the external viewer.
//!
//! ```json
//! {
//!   "draws": [
//!     { "date": "2025-10-25", "numbers": [6, 9, 13, 21, 24, 38],
//!       "bonus": 5, "holes": 5, "odd": 3 }
//!   ],
//!   "generated": []
//! }
//! ```

use super::record::DrawRecord;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One draw as the viewer expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEntry {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub numbers: Vec<u8>,
    pub bonus: u8,
    pub holes: usize,
    pub odd: usize,
}

impl From<&DrawRecord> for DrawEntry {
    fn from(record: &DrawRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            numbers: record.numbers.numbers().to_vec(),
            bonus: record.bonus,
            holes: record.holes(),
            odd: record.odd_count(),
        }
    }
}

/// Top-level JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawsDocument {
    /// Ascending by date.
    pub draws: Vec<DrawEntry>,
    /// Reserved for externally generated candidate combinations.
    pub generated: Vec<Vec<u8>>,
}

impl DrawsDocument {
    /// Build the document, stable sorting the draws by date.
    pub fn from_draws(draws: &[DrawRecord]) -> Self {
        let mut ordered: Vec<&DrawRecord> = draws.iter().collect();
        ordered.sort_by_key(|draw| draw.date);
        Self {
            draws: ordered.into_iter().map(DrawEntry::from).collect(),
            generated: Vec::new(),
        }
    }

    /// Serialize as pretty JSON to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Serialize as pretty JSON to a file.
    pub fn write_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            if e.is_io() {
                Error::io(path, e.into())
            } else {
                Error::Json(e)
            }
        })?;
        writer.flush().map_err(|e| Error::io(path, e))?;
        log::info!("Wrote {} draws to {}", self.draws.len(), path.display());
        Ok(())
    }
}
