// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Historical draw records.

use crate::combo::Combination;
use chrono::NaiveDate;
use std::fmt;

/// Consecutive sorted numbers further apart than this count as a hole.
const HOLE_GAP: u8 = 2;

/// One historical draw: the combination, its date and the bonus number.
///
/// The bonus is carried for export only and never takes part in distance
/// or coverage computations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub date: NaiveDate,
    pub numbers: Combination,
    pub bonus: u8,
}

impl DrawRecord {
    pub fn new(date: NaiveDate, numbers: Combination, bonus: u8) -> Self {
        Self {
            date,
            numbers,
            bonus,
        }
    }

    /// Count of gaps wider than two between consecutive sorted numbers.
    ///
    /// Unrelated to [`Combination::distance`].
    pub fn holes(&self) -> usize {
        self.numbers
            .numbers()
            .windows(2)
            .filter(|w| w[1] - w[0] > HOLE_GAP)
            .count()
    }

    /// Count of odd numbers in the combination.
    pub fn odd_count(&self) -> usize {
        self.numbers.numbers().iter().filter(|&&n| n % 2 == 1).count()
    }
}

impl fmt::Display for DrawRecord {
    /// Format as the canonical history line, `YYMMDD:  n1, .. / bonus`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:  {} / {:2}",
            self.date.format("%y%m%d"),
            self.numbers,
            self.bonus
        )
    }
}

/// Stable sort by date; draws on the same day keep their input order.
pub fn sort_chronologically(draws: &mut [DrawRecord]) {
    draws.sort_by_key(|draw| draw.date);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(date: (i32, u32, u32), numbers: &[u8], bonus: u8) -> DrawRecord {
        DrawRecord::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            Combination::from_unsorted(numbers.to_vec(), 49).unwrap(),
            bonus,
        )
    }

    #[test]
    fn test_holes_and_odd() {
        let record = draw((2025, 10, 25), &[6, 9, 13, 21, 24, 38], 5);
        assert_eq!(record.holes(), 5);
        assert_eq!(record.odd_count(), 3);

        let tight = draw((2025, 10, 25), &[1, 2, 4, 6, 8, 10], 5);
        assert_eq!(tight.holes(), 0);
        assert_eq!(tight.odd_count(), 1);
    }

    #[test]
    fn test_display_round_trips_history_format() {
        let record = draw((2025, 10, 25), &[6, 9, 13, 21, 24, 38], 5);
        assert_eq!(record.to_string(), "251025:   6,  9, 13, 21, 24, 38 /  5");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut draws = vec![
            draw((2024, 1, 2), &[1, 2, 3, 4, 5, 6], 7),
            draw((2023, 5, 5), &[7, 8, 9, 10, 11, 12], 1),
            draw((2024, 1, 2), &[13, 14, 15, 16, 17, 18], 2),
        ];
        sort_chronologically(&mut draws);
        assert_eq!(draws[0].bonus, 1);
        assert_eq!(draws[1].bonus, 7);
        assert_eq!(draws[2].bonus, 2);
    }
}
