// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Draw loading from files, and the JSON export built on it.

mod common;

use chrono::NaiveDate;
use common::{write_temp, HISTORY};
use lotto_coverage::draws::{sort_chronologically, DrawsDocument, WarningKind};
use lotto_coverage::{DrawLoader, Error, Game, LineFormat};

#[test]
fn test_scenario_single_line() {
    let (_dir, path) = write_temp("draw.txt", b"251025:  6,  9, 13, 21, 24, 38 /  5\n");
    let report = DrawLoader::new(Game::SIX_49, LineFormat::Strict)
        .load_path(&path)
        .unwrap();
    assert_eq!(report.draws.len(), 1);
    let draw = &report.draws[0];
    assert_eq!(draw.numbers.numbers(), &[6, 9, 13, 21, 24, 38]);
    assert_eq!(draw.date, NaiveDate::from_ymd_opt(2025, 10, 25).unwrap());
    assert_eq!(draw.bonus, 5);
    assert_eq!(draw.holes(), 5);
    assert_eq!(draw.odd_count(), 3);
}

#[test]
fn test_history_keeps_file_order_and_sorts_numbers() {
    let (_dir, path) = write_temp("history.txt", HISTORY.as_bytes());
    let report = DrawLoader::new(Game::SIX_49, LineFormat::Strict)
        .load_path(&path)
        .unwrap();
    assert_eq!(report.draws.len(), 3);
    assert_eq!(report.counts.total(), 0);
    assert_eq!(report.lines_read, 5);
    assert_eq!(report.draws[1].numbers.numbers(), &[6, 9, 13, 21, 24, 38]);
    assert_eq!(report.draws[1].bonus, 17);
}

#[test]
fn test_bad_lines_are_skipped_and_counted() {
    let contents = "\
251025:  6,  9, 13, 21, 24, 38 /  5
2510:  6,  9, 13, 21, 24, 38 /  5
251026:  6,  9, 13, 21, 24 /  5
251027:  6,  9, 1x, 21, 24, 38 /  5
251028:  6,  9, 13, 21, 24, 50 /  5
251029:  6,  9, 13, 21, 24, 24 /  5
251030   6,  9, 13, 21, 24, 38 /  5
251101:  1,  2,  3,  4,  5,  6 /  7
";
    let (_dir, path) = write_temp("mixed.txt", contents.as_bytes());
    let report = DrawLoader::new(Game::SIX_49, LineFormat::Strict)
        .load_path(&path)
        .unwrap();
    assert_eq!(report.draws.len(), 2);
    assert_eq!(report.skipped.len(), 6);
    assert_eq!(report.counts.total(), 6);
    assert_eq!(report.counts.get(WarningKind::BadDate), 1);
    assert_eq!(report.counts.get(WarningKind::FieldCount), 1);
    assert_eq!(report.counts.get(WarningKind::NonNumeric), 1);
    assert_eq!(report.counts.get(WarningKind::OutOfRange), 1);
    assert_eq!(report.counts.get(WarningKind::DuplicateNumber), 1);
    assert_eq!(report.counts.get(WarningKind::MissingDelimiter), 1);
    assert_eq!(report.out_of_range(), 1);
    assert_eq!(report.skipped[0].line_no, 2);
}

#[test]
fn test_permissive_comma_everywhere_variant() {
    let contents = "251025: ,  6,  9, 13, 21, 24, 38,   5\n";
    let (_dir, path) = write_temp("commas.txt", contents.as_bytes());

    let strict = DrawLoader::new(Game::SIX_49, LineFormat::Strict)
        .load_path(&path)
        .unwrap();
    assert!(strict.draws.is_empty());
    assert_eq!(strict.counts.total(), 1);

    let permissive = DrawLoader::new(Game::SIX_49, LineFormat::Permissive)
        .load_path(&path)
        .unwrap();
    assert_eq!(permissive.draws.len(), 1);
    assert_eq!(permissive.draws[0].bonus, 5);
    assert_eq!(
        permissive.draws[0].numbers.numbers(),
        &[6, 9, 13, 21, 24, 38]
    );
}

#[test]
fn test_missing_file_is_fatal_io() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let result = DrawLoader::new(Game::SIX_49, LineFormat::Strict).load_path(&missing);
    match result {
        Err(Error::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {:?}", other.map(|r| r.draws.len())),
    }
}

#[test]
fn test_json_export_sorted_by_date() {
    let contents = "\
251025:  6,  9, 13, 21, 24, 38 /  5
991231:  1,  2,  3,  4,  5,  6 /  7
250101: 40, 41, 42, 43, 44, 45 / 46
";
    let (dir, path) = write_temp("history.txt", contents.as_bytes());
    let mut report = DrawLoader::new(Game::SIX_49, LineFormat::Strict)
        .load_path(&path)
        .unwrap();

    let output = dir.path().join("history.json");
    DrawsDocument::from_draws(&report.draws)
        .write_path(&output)
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let dates: Vec<&str> = json["draws"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["1999-12-31", "2025-01-01", "2025-10-25"]);
    assert_eq!(json["draws"][2]["holes"], 5);
    assert_eq!(json["draws"][2]["odd"], 3);
    assert_eq!(json["generated"], serde_json::json!([]));

    // The loader itself never reorders.
    assert_eq!(report.draws[0].bonus, 5);
    sort_chronologically(&mut report.draws);
    assert_eq!(report.draws[0].bonus, 7);
}

#[test]
fn test_invalid_utf8_line_is_skipped_not_fatal() {
    let mut contents = b"251025:  6,  9, 13, 21, 24, 38 /  5\n".to_vec();
    contents.extend(b"251026:  1,  2, \xFF,  4,  5,  6 /  7\n");
    contents.extend(b"251027:  1,  2,  3,  4,  5,  6 /  7\r\n");
    let (_dir, path) = write_temp("binary-junk.txt", &contents);
    let report = DrawLoader::new(Game::SIX_49, LineFormat::Strict)
        .load_path(&path)
        .unwrap();
    assert_eq!(report.lines_read, 3);
    assert_eq!(report.draws.len(), 2);
    assert_eq!(report.counts.get(WarningKind::InvalidUtf8), 1);
    assert_eq!(report.skipped[0].line_no, 2);
    assert_eq!(report.draws[1].bonus, 7);
}
