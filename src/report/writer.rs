// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Writers for combination files.
//!
//! Text files may start with `#` comment lines; binary files never carry a
//! header. Both are written record by record.

use super::remaining::Remaining;
use crate::codec::binary::RecordWriter;
use crate::codec::{text, Format};
use crate::combo::Combination;
use crate::engine::{Finalized, SetKind};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Comment lines written before text records.
#[derive(Debug, Clone, Default)]
pub struct TextHeader {
    lines: Vec<String>,
}

impl TextHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line; the leading `# ` is supplied.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Title, total and a local timestamp.
    pub fn standard(title: &str, total: u64) -> Self {
        Self::new()
            .line(title)
            .line(format!("Total: {}", total))
            .line(format!(
                "Generated: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Streams combinations to a writer in either format.
pub struct CombinationWriter<W: Write> {
    sink: Sink<W>,
}

enum Sink<W: Write> {
    Text { inner: W, written: u64 },
    Binary(RecordWriter<W>),
}

impl<W: Write> CombinationWriter<W> {
    /// Text writer; the header, if any, is written immediately.
    pub fn text(mut inner: W, header: Option<&TextHeader>) -> Result<Self> {
        if let Some(header) = header {
            for line in header.lines() {
                writeln!(inner, "# {}", line)?;
            }
        }
        Ok(Self {
            sink: Sink::Text { inner, written: 0 },
        })
    }

    /// Binary writer of `width`-number records.
    pub fn binary(inner: W, width: usize) -> Self {
        Self {
            sink: Sink::Binary(RecordWriter::new(inner, width)),
        }
    }

    pub fn write(&mut self, numbers: &[u8]) -> Result<()> {
        match &mut self.sink {
            Sink::Text { inner, written } => {
                writeln!(inner, "{}", text::render(numbers))?;
                *written += 1;
                Ok(())
            }
            Sink::Binary(writer) => writer.write_record(numbers),
        }
    }

    pub fn written(&self) -> u64 {
        match &self.sink {
            Sink::Text { written, .. } => *written,
            Sink::Binary(writer) => writer.written(),
        }
    }

    /// Flush and return the record count.
    pub fn finish(self) -> Result<u64> {
        let written = self.written();
        match self.sink {
            Sink::Text { mut inner, .. } => inner.flush()?,
            Sink::Binary(writer) => {
                writer.finish()?;
            }
        }
        Ok(written)
    }
}

impl CombinationWriter<BufWriter<File>> {
    /// Create `path` and write in `format`.
    pub fn create(
        path: &Path,
        format: Format,
        width: usize,
        header: Option<&TextHeader>,
    ) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let inner = BufWriter::new(file);
        match format {
            Format::Text => Self::text(inner, header),
            Format::Binary => Ok(Self::binary(inner, width)),
        }
    }
}

/// Write every combination of an iterator; returns the count.
pub fn write_all<W, I>(writer: &mut CombinationWriter<W>, combos: I) -> Result<u64>
where
    W: Write,
    I: IntoIterator<Item = Combination>,
{
    let before = writer.written();
    for combo in combos {
        writer.write(combo.numbers())?;
    }
    Ok(writer.written() - before)
}

/// Export the remaining combinations of a finalized set to `path`.
pub fn export_remaining(finalized: &Finalized, path: &Path, format: Format) -> Result<u64> {
    let universe = finalized.universe();
    let title = match finalized.kind() {
        SetKind::Elimination => format!(
            "Remaining {}-of-{} combinations after elimination",
            universe.k(),
            universe.n()
        ),
        SetKind::Coverage => format!(
            "Undrawn {}-of-{} sub-combinations",
            universe.k(),
            universe.n()
        ),
    };
    let header = TextHeader::standard(&title, finalized.remaining_count());
    let mut writer = CombinationWriter::create(path, format, universe.k(), Some(&header))?;
    write_all(&mut writer, Remaining::new(finalized)).map_err(|e| with_path(e, path))?;
    let written = writer.finish().map_err(|e| with_path(e, path))?;
    log::info!(
        "Wrote {} remaining combinations to {} ({})",
        written,
        path.display(),
        format
    );
    Ok(written)
}

/// Attach `path` to bare stream errors.
pub(crate) fn with_path(error: Error, path: &Path) -> Error {
    match error {
        Error::Stream(source) => Error::io(path, source),
        other => other,
    }
}
