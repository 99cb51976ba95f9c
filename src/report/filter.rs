// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Streaming conversion and trimming of combination files.
//!
//! Records are read one at a time in the caller's [`Format`], optionally
//! dropped when they contain an excluded number, and written in the output
//! format. The file format is always supplied explicitly; it is never
//! guessed from the file name.

use super::writer::{with_path, CombinationWriter, TextHeader};
use crate::codec::binary::RecordReader;
use crate::codec::{text, Format};
use crate::combo::{Combination, NumberSet};
use crate::config::Game;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Record counts for one filtering pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Records read, malformed ones included.
    pub read: u64,
    pub kept: u64,
    /// Records dropped for containing an excluded number.
    pub removed: u64,
    /// Records that were not valid combinations of the game.
    pub malformed: u64,
}

/// Reads records of either format, yielding raw numbers.
pub enum RecordSource<R: BufRead> {
    Text { reader: R, line: String },
    Binary(RecordReader<R>),
}

impl<R: BufRead> RecordSource<R> {
    pub fn new(reader: R, format: Format, width: usize) -> Self {
        match format {
            Format::Text => RecordSource::Text {
                reader,
                line: String::new(),
            },
            Format::Binary => RecordSource::Binary(RecordReader::new(reader, width)),
        }
    }

    /// Next record; text comments and blank lines are skipped.
    ///
    /// The inner result is `Err` for a text record that does not parse.
    pub fn next_record(&mut self) -> Result<Option<Result<Vec<u8>>>> {
        match self {
            RecordSource::Text { reader, line } => loop {
                line.clear();
                if reader.read_line(line)? == 0 {
                    return Ok(None);
                }
                if text::is_comment(line) {
                    continue;
                }
                return Ok(Some(text::parse_numbers(line)));
            },
            RecordSource::Binary(records) => Ok(records.read_record()?.map(Ok)),
        }
    }
}

/// Copy records from `source` to `writer`, dropping any that contain a
/// number in `exclude`.
pub fn filter_records<R, W>(
    source: &mut RecordSource<R>,
    writer: &mut CombinationWriter<W>,
    game: Game,
    exclude: &NumberSet,
) -> Result<FilterStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = FilterStats::default();
    while let Some(record) = source.next_record()? {
        stats.read += 1;
        let combo = record.and_then(|numbers| {
            if numbers.len() != game.play {
                return Err(Error::InvalidCombination {
                    reason: format!("expected {} numbers", game.play),
                    numbers,
                });
            }
            Combination::new(numbers, game.max_number)
        });
        let combo = match combo {
            Ok(combo) => combo,
            Err(e) => {
                log::warn!("Skipping record {}: {}", stats.read, e);
                stats.malformed += 1;
                continue;
            }
        };
        if combo.numbers().iter().any(|&v| exclude.contains(v)) {
            stats.removed += 1;
            continue;
        }
        writer.write(combo.numbers())?;
        stats.kept += 1;
    }
    Ok(stats)
}

/// Read `input` in `input_format`, write `output` in `output_format`.
///
/// Used for listing (binary to text), packing (text to binary) and trimming
/// (same format, non-empty `exclude`). A text output gets `header` if given.
pub fn filter_file(
    input: &Path,
    input_format: Format,
    output: &Path,
    output_format: Format,
    game: Game,
    exclude: &NumberSet,
    header: Option<&TextHeader>,
) -> Result<FilterStats> {
    ensure_distinct(input, output)?;
    let file = File::open(input).map_err(|e| Error::io(input, e))?;
    let mut source = RecordSource::new(BufReader::new(file), input_format, game.play);
    let mut writer = CombinationWriter::create(output, output_format, game.play, header)?;
    let stats = filter_records(&mut source, &mut writer, game, exclude)?;
    writer.finish().map_err(|e| with_path(e, output))?;
    log::info!(
        "{} ({}) -> {} ({}): {} read, {} kept, {} removed, {} malformed",
        input.display(),
        input_format,
        output.display(),
        output_format,
        stats.read,
        stats.kept,
        stats.removed,
        stats.malformed
    );
    Ok(stats)
}

/// Reject an output that names the input file under any spelling.
///
/// Creating the output truncates it, so this runs before anything is opened.
/// An output that does not exist yet cannot alias the input.
fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let input = fs::canonicalize(input).map_err(|e| Error::io(input, e))?;
    match fs::canonicalize(output) {
        Ok(output) if output == input => Err(Error::validation(format!(
            "output {} is the input file",
            output.display()
        ))),
        _ => Ok(()),
    }
}

/// Remove every record containing a number of `exclude`, keeping the format.
pub fn trim_file(
    input: &Path,
    output: &Path,
    format: Format,
    game: Game,
    exclude: &[u8],
) -> Result<FilterStats> {
    if let Some(&bad) = exclude
        .iter()
        .find(|&&v| v == 0 || v > game.max_number)
    {
        return Err(Error::validation(format!(
            "excluded number {} is outside 1..={}",
            bad, game.max_number
        )));
    }
    let exclude = NumberSet::from_numbers(exclude);
    log::info!("Trimming records containing any of {}", exclude);
    filter_file(input, format, output, format, game, &exclude, None)
}
