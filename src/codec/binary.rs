// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Packed binary records.
//!
//! Each number is stored as one byte, shifted by a fixed offset so that the
//! bytes of small numbers stay out of the control-character range when the
//! file is inspected. A record is exactly `width` bytes with no separator and
//! no terminator; files have neither header nor footer.
//!
//! A trailing partial record is truncation, not corruption: the reader stops
//! silently at the last complete record.

use crate::error::Result;
use std::io::{self, ErrorKind, Read, Write};

const OFFSET: u8 = 32;

/// Encode one number as a byte.
#[inline]
pub fn encode_number(value: u8) -> u8 {
    value.wrapping_add(OFFSET)
}

/// Decode one byte back to its number.
#[inline]
pub fn decode_number(byte: u8) -> u8 {
    byte.wrapping_sub(OFFSET)
}

/// Encode a record.
pub fn encode(numbers: &[u8]) -> Vec<u8> {
    numbers.iter().map(|&n| encode_number(n)).collect()
}

/// Decode a record.
pub fn decode(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| decode_number(b)).collect()
}

/// Streaming reader of fixed-width records.
pub struct RecordReader<R> {
    inner: R,
    width: usize,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R, width: usize) -> Self {
        Self {
            inner,
            width,
            done: width == 0,
        }
    }

    /// Read the next complete record, `None` at end of data or truncation.
    pub fn read_record(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }
        let mut buf = vec![0u8; self.width];
        let mut filled = 0;
        while filled < self.width {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    if filled > 0 {
                        log::debug!(
                            "Ignoring truncated trailing record ({} of {} bytes)",
                            filled,
                            self.width
                        );
                    }
                    self.done = true;
                    return Ok(None);
                }
                Ok(read) => filled += read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(decode(&buf)))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Streaming writer of fixed-width records.
pub struct RecordWriter<W: Write> {
    inner: W,
    width: usize,
    written: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, width: usize) -> Self {
        Self {
            inner,
            width,
            written: 0,
        }
    }

    /// Write one record; its length must equal the writer's width.
    pub fn write_record(&mut self, numbers: &[u8]) -> Result<()> {
        if numbers.len() != self.width {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "record has {} numbers, expected {}",
                    numbers.len(),
                    self.width
                ),
            )
            .into());
        }
        self.inner.write_all(&encode(numbers))?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_bytes() {
        assert_eq!(encode(&[1, 2, 3, 4, 5, 6]), vec![33, 34, 35, 36, 37, 38]);
        assert_eq!(decode(&[33, 34, 35, 36, 37, 38]), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_wraps_modulo_256() {
        assert_eq!(encode_number(250), 26);
        assert_eq!(decode_number(26), 250);
        assert_eq!(decode_number(0), 224);
    }

    #[test]
    fn test_reader_stops_at_truncation() {
        let mut bytes = encode(&[1, 2, 3, 4, 5, 6]);
        bytes.extend(encode(&[7, 8, 9, 10, 11, 12]));
        bytes.extend(encode(&[13, 14, 15]));
        let records: Vec<Vec<u8>> = RecordReader::new(&bytes[..], 6)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records, vec![vec![1, 2, 3, 4, 5, 6], vec![7, 8, 9, 10, 11, 12]]);
    }

    #[test]
    fn test_reader_empty_input() {
        let mut reader = RecordReader::new(&[][..], 7);
        assert!(reader.read_record().unwrap().is_none());
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn test_writer_counts_and_checks_width() {
        let mut writer = RecordWriter::new(Vec::new(), 3);
        writer.write_record(&[1, 2, 3]).unwrap();
        assert!(writer.write_record(&[1, 2]).is_err());
        assert_eq!(writer.written(), 1);
        assert_eq!(writer.finish().unwrap(), vec![33, 34, 35]);
    }
}
