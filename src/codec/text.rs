// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Human-readable text records.
//!
//! Numbers are rendered two-digit padded and joined by `", "`:
//! `" 6,  9, 13, 21, 24, 38,  5"`. Parsing trims surrounding whitespace and
//! ignores spacing around each comma; any token that is not a run of ASCII
//! digits is rejected.

use crate::error::{Error, Result};
use std::fmt::Write;

/// Render numbers as a padded, comma separated record.
pub fn render(numbers: &[u8]) -> String {
    let mut line = String::with_capacity(numbers.len() * 4);
    for (i, number) in numbers.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        // Writing to a String cannot fail.
        let _ = write!(line, "{:2}", number);
    }
    line
}

/// Parse a padded, comma separated record into its numbers.
///
/// An all-whitespace record parses to no numbers.
pub fn parse_numbers(record: &str) -> Result<Vec<u8>> {
    let trimmed = record.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|token| parse_token(record, token))
        .collect()
}

fn parse_token(record: &str, token: &str) -> Result<u8> {
    let token = token.trim();
    let reject = || Error::TextParse {
        record: record.to_string(),
        token: token.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject());
    }
    token.parse::<u8>().map_err(|_| reject())
}

/// True for lines a text combination file treats as comments.
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
