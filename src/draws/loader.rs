// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Loader for the historical draw text format.
//!
//! Accepted line shapes:
//!
//! ```text
//! # comment
//! 251025:  6,  9, 13, 21, 24, 38 /  5        canonical
//! 251025: ,  6,  9, 13, 21, 24, 38,   5      comma-everywhere (permissive only)
//! ```
//!
//! The two-digit year maps to the 2000s below 50 and to the 1900s otherwise.
//! Numbers may appear in any order; the loader sorts each draw. The draw
//! sequence itself keeps file order; use
//! [`sort_chronologically`](super::sort_chronologically) when needed.

use super::record::DrawRecord;
use super::warning::{LineWarning, SkippedLine, WarningCounts, WarningKind};
use crate::combo::Combination;
use crate::codec::text;
use crate::config::Game;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Which line shapes the loader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// Only `YYMMDD: n1, .., nk / bonus`.
    #[default]
    Strict,
    /// Also the comma-everywhere variant with the bonus as the last number.
    Permissive,
}

/// Result of loading a draw file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Draws in the order they were read.
    pub draws: Vec<DrawRecord>,
    /// Every rejected line, in order.
    pub skipped: Vec<SkippedLine>,
    /// Per-kind counts of `skipped`.
    pub counts: WarningCounts,
    /// Physical lines read, comments included.
    pub lines_read: usize,
}

impl LoadReport {
    /// Draws dropped by the range policy.
    pub fn out_of_range(&self) -> usize {
        self.counts.get(WarningKind::OutOfRange)
    }
}

/// Parses draw lines for one game.
#[derive(Debug, Clone)]
pub struct DrawLoader {
    game: Game,
    format: LineFormat,
}

impl DrawLoader {
    pub fn new(game: Game, format: LineFormat) -> Self {
        Self { game, format }
    }

    pub fn game(&self) -> Game {
        self.game
    }

    /// Load a draw file. Fails only if the file cannot be opened or read.
    pub fn load_path(&self, path: &Path) -> Result<LoadReport> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let report = self
            .load_reader(BufReader::new(file))
            .map_err(|e| match e {
                Error::Stream(source) => Error::io(path, source),
                other => other,
            })?;
        log::info!(
            "Loaded {} draws from {} ({} lines skipped)",
            report.draws.len(),
            path.display(),
            report.counts.total()
        );
        Ok(report)
    }

    /// Load draws from any buffered reader.
    pub fn load_reader<R: BufRead>(&self, mut reader: R) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            report.lines_read += 1;
            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let parsed = match std::str::from_utf8(raw) {
                Ok(line) => self.parse_line(line),
                Err(_) => Err(LineWarning::InvalidUtf8),
            };
            match parsed {
                Ok(Some(draw)) => report.draws.push(draw),
                Ok(None) => {}
                Err(warning) => {
                    let skipped = SkippedLine {
                        line_no: report.lines_read,
                        content: String::from_utf8_lossy(raw).trim_end().to_string(),
                        warning,
                    };
                    log::warn!("Skipping {}", skipped);
                    report.counts.record(skipped.warning.kind());
                    report.skipped.push(skipped);
                }
            }
        }
        Ok(report)
    }

    /// Parse one line: `Ok(None)` for comments and blank lines.
    pub fn parse_line(&self, line: &str) -> std::result::Result<Option<DrawRecord>, LineWarning> {
        if text::is_comment(line) {
            return Ok(None);
        }
        let mut parts = line.split(':');
        let (date_part, numbers_part) = match (parts.next(), parts.next(), parts.next()) {
            (Some(date), Some(numbers), None) => (date, numbers),
            _ => return Err(LineWarning::MissingDelimiter),
        };
        let date = parse_date(date_part.trim())?;
        let (numbers, bonus) = match numbers_part.split_once('/') {
            Some((numbers, bonus)) => {
                let numbers = self.parse_list(numbers)?;
                (numbers, parse_bonus(bonus)?)
            }
            None if self.format == LineFormat::Permissive => {
                let mut numbers = self.parse_list(numbers_part)?;
                if numbers.len() != self.game.play + 1 {
                    return Err(LineWarning::FieldCount {
                        expected: self.game.play + 1,
                        found: numbers.len(),
                    });
                }
                match numbers.pop() {
                    Some(bonus) => (numbers, bonus),
                    None => return Err(LineWarning::MissingBonus),
                }
            }
            None => return Err(LineWarning::MissingBonus),
        };
        if numbers_part.contains('/') && numbers.len() != self.game.play {
            return Err(LineWarning::FieldCount {
                expected: self.game.play,
                found: numbers.len(),
            });
        }

        let max = self.game.max_number;
        for &number in numbers.iter().chain(std::iter::once(&bonus)) {
            if number == 0 || number > max as u32 {
                return Err(LineWarning::OutOfRange { number, max });
            }
        }
        let mut numbers: Vec<u8> = numbers.into_iter().map(|n| n as u8).collect();
        numbers.sort_unstable();
        if let Some(w) = numbers.windows(2).find(|w| w[0] == w[1]) {
            return Err(LineWarning::DuplicateNumber { number: w[0] });
        }
        let combination = Combination::from_sorted_unchecked(&numbers);
        Ok(Some(DrawRecord::new(date, combination, bonus as u8)))
    }

    /// Split a comma separated list into integers.
    ///
    /// Permissive mode also splits on whitespace and drops empty tokens.
    fn parse_list(&self, list: &str) -> std::result::Result<Vec<u32>, LineWarning> {
        let tokens: Vec<&str> = match self.format {
            LineFormat::Strict => list.split(',').map(str::trim).collect(),
            LineFormat::Permissive => list
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect(),
        };
        tokens.into_iter().map(parse_integer).collect()
    }
}

fn parse_integer(token: &str) -> std::result::Result<u32, LineWarning> {
    let non_numeric = || LineWarning::NonNumeric {
        token: token.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    // Over-long digit runs are out of range rather than non-numeric.
    Ok(token.parse::<u32>().unwrap_or(u32::MAX))
}

fn parse_bonus(part: &str) -> std::result::Result<u32, LineWarning> {
    let token = part.trim();
    if token.is_empty() {
        return Err(LineWarning::MissingBonus);
    }
    parse_integer(token)
}

/// Parse `YYMMDD`; years below 50 are 20YY, others 19YY.
pub fn parse_date(text: &str) -> std::result::Result<NaiveDate, LineWarning> {
    let bad = || LineWarning::BadDate {
        text: text.to_string(),
    };
    if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let field = |range: std::ops::Range<usize>| text[range].parse::<u32>().map_err(|_| bad());
    let yy = field(0..2)? as i32;
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, field(2..4)?, field(4..6)?).ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> DrawLoader {
        DrawLoader::new(Game::SIX_49, LineFormat::Strict)
    }

    fn permissive() -> DrawLoader {
        DrawLoader::new(Game::SIX_49, LineFormat::Permissive)
    }

    #[test]
    fn test_canonical_line() {
        let draw = strict()
            .parse_line("251025:  6,  9, 13, 21, 24, 38 /  5")
            .unwrap()
            .unwrap();
        assert_eq!(draw.date, NaiveDate::from_ymd_opt(2025, 10, 25).unwrap());
        assert_eq!(draw.numbers.numbers(), &[6, 9, 13, 21, 24, 38]);
        assert_eq!(draw.bonus, 5);
        assert_eq!(draw.holes(), 5);
        assert_eq!(draw.odd_count(), 3);
    }

    #[test]
    fn test_unsorted_numbers_are_sorted() {
        let draw = strict()
            .parse_line("990101: 38, 6, 24, 9, 21, 13 / 1")
            .unwrap()
            .unwrap();
        assert_eq!(draw.date, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
        assert_eq!(draw.numbers.numbers(), &[6, 9, 13, 21, 24, 38]);
    }

    #[test]
    fn test_comments_and_blanks() {
        assert_eq!(strict().parse_line("# header").unwrap(), None);
        assert_eq!(strict().parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_comma_variant_needs_permissive() {
        let line = "251025: ,  6,  9, 13, 21, 24, 38,   5";
        assert_eq!(strict().parse_line(line), Err(LineWarning::MissingBonus));
        let draw = permissive().parse_line(line).unwrap().unwrap();
        assert_eq!(draw.numbers.numbers(), &[6, 9, 13, 21, 24, 38]);
        assert_eq!(draw.bonus, 5);
    }

    #[test]
    fn test_permissive_still_accepts_canonical() {
        let draw = permissive()
            .parse_line("251025:  6,  9, 13, 21, 24, 38 /  5")
            .unwrap()
            .unwrap();
        assert_eq!(draw.bonus, 5);
    }

    #[test]
    fn test_malformed_lines() {
        let loader = strict();
        assert_eq!(
            loader.parse_line("251025  6, 9 / 5"),
            Err(LineWarning::MissingDelimiter)
        );
        assert!(matches!(
            loader.parse_line("25102:  1, 2, 3, 4, 5, 6 / 7"),
            Err(LineWarning::BadDate { .. })
        ));
        assert!(matches!(
            loader.parse_line("251345:  1, 2, 3, 4, 5, 6 / 7"),
            Err(LineWarning::BadDate { .. })
        ));
        assert_eq!(
            loader.parse_line("251025:  1, 2, 3, 4, 5 / 7"),
            Err(LineWarning::FieldCount {
                expected: 6,
                found: 5
            })
        );
        assert!(matches!(
            loader.parse_line("251025:  1, 2, x, 4, 5, 6 / 7"),
            Err(LineWarning::NonNumeric { .. })
        ));
        assert_eq!(
            loader.parse_line("251025:  1, 2, 3, 4, 5, 6 / "),
            Err(LineWarning::MissingBonus)
        );
    }

    #[test]
    fn test_range_policy_drops_draw() {
        assert_eq!(
            strict().parse_line("251025:  1, 2, 3, 4, 5, 50 / 7"),
            Err(LineWarning::OutOfRange { number: 50, max: 49 })
        );
        assert_eq!(
            strict().parse_line("251025:  0, 2, 3, 4, 5, 6 / 7"),
            Err(LineWarning::OutOfRange { number: 0, max: 49 })
        );
        assert_eq!(
            strict().parse_line("251025:  1, 2, 3, 4, 5, 999 / 7"),
            Err(LineWarning::OutOfRange { number: 999, max: 49 })
        );
    }

    #[test]
    fn test_duplicate_numbers() {
        assert_eq!(
            strict().parse_line("251025:  1, 2, 3, 4, 6, 6 / 7"),
            Err(LineWarning::DuplicateNumber { number: 6 })
        );
    }

    #[test]
    fn test_load_reader_collects_warnings() {
        let input = "\
# Lottery Draw History
251025:  6,  9, 13, 21, 24, 38 /  5
251022:  1,  2,  3 /  4
bogus line
251018:  3, 10, 17, 30, 41, 49 / 22
";
        let report = strict().load_reader(input.as_bytes()).unwrap();
        assert_eq!(report.lines_read, 5);
        assert_eq!(report.draws.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line_no, 3);
        assert_eq!(report.skipped[1].line_no, 4);
        assert_eq!(report.counts.get(WarningKind::FieldCount), 1);
        assert_eq!(report.counts.get(WarningKind::MissingDelimiter), 1);
        // file order preserved
        assert!(report.draws[0].date > report.draws[1].date);
    }

    #[test]
    fn test_seven_number_game() {
        let loader = DrawLoader::new(Game::SEVEN_47, LineFormat::Strict);
        let draw = loader
            .parse_line("240102:  1,  5, 12, 18, 29, 42, 47 /  7")
            .unwrap()
            .unwrap();
        assert_eq!(draw.numbers.len(), 7);
        assert!(matches!(
            loader.parse_line("240102:  1,  5, 12, 18, 29, 42, 48 /  7"),
            Err(LineWarning::OutOfRange { number: 48, max: 47 })
        ));
    }

    #[test]
    fn test_parse_date_century() {
        assert_eq!(
            parse_date("490101").unwrap(),
            NaiveDate::from_ymd_opt(2049, 1, 1).unwrap()
        );
        assert_eq!(
            parse_date("500101").unwrap(),
            NaiveDate::from_ymd_opt(1950, 1, 1).unwrap()
        );
    }
}
