// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Distance and coverage engine.
//!
//! Two accumulating engines share the same life cycle:
//!
//! 1. create with a universe (and scan tuning)
//! 2. apply draws one at a time; the marked set only grows
//! 3. `finalize(self)` consumes the engine and returns a [`Finalized`]
//!
//! [`EliminationEngine`] scans the full k-of-n universe for every draw and
//! marks candidates at a target distance. [`CoverageEngine`] marks the
//! m-subsets contained in each draw. Both store marks in a [`RankSet`]
//! indexed by the universe's lexicographic rank.
//!
//! # Example
//!
//! ```
//! use lotto_coverage::combo::{Combination, Universe};
//! use lotto_coverage::config::ScanConfig;
//! use lotto_coverage::engine::{CancelToken, EliminationEngine};
//!
//! let universe = Universe::new(10, 3).unwrap();
//! let mut engine = EliminationEngine::new(universe, ScanConfig::default()).unwrap();
//! let draw = Combination::new(vec![1, 2, 3], 10).unwrap();
//! // Everything sharing exactly one number with the draw: 3 * C(7, 2).
//! let newly = engine.eliminate(&draw, 2, &CancelToken::new()).unwrap();
//! assert_eq!(newly, 63);
//!
//! let finalized = engine.finalize();
//! assert_eq!(finalized.remaining_count(), 120 - 63);
//! ```

pub mod cancel;
pub mod coverage;
pub mod elimination;
pub mod finalized;
pub mod progress;
pub mod rank_set;
pub mod statistics;

pub use cancel::CancelToken;
pub use coverage::CoverageEngine;
pub use elimination::EliminationEngine;
pub use finalized::Finalized;
pub use progress::{CollectProgress, DrawProgress, LogProgress, NoProgress, ProgressSink};
pub use rank_set::RankSet;
pub use statistics::{Counters, PassStatistics, SetKind, Statistics};

use crate::combo::Combination;
use crate::error::Result;

/// Apply `step` to each draw and notify `sink` after each one.
///
/// `step` returns `(newly_marked, marked)`. Stops at the first error.
pub(crate) fn drive<F>(
    draws: &[Combination],
    universe_size: u64,
    sink: &mut dyn ProgressSink,
    mut step: F,
) -> Result<u64>
where
    F: FnMut(&Combination) -> Result<(u64, u64)>,
{
    let total = draws.len();
    let mut newly_total = 0;
    for (i, draw) in draws.iter().enumerate() {
        let (newly_marked, marked) = step(draw)?;
        newly_total += newly_marked;
        sink.draw_done(&DrawProgress {
            index: i + 1,
            total,
            draw,
            newly_marked,
            marked,
            universe_size,
        });
    }
    Ok(newly_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::Universe;
    use crate::config::ScanConfig;

    #[test]
    fn test_progress_is_reported_per_draw() {
        let universe = Universe::new(8, 3).unwrap();
        let mut engine = EliminationEngine::new(universe, ScanConfig::default()).unwrap();
        let draws = vec![
            Combination::new(vec![1, 2, 3], 8).unwrap(),
            Combination::new(vec![1, 2, 3], 8).unwrap(),
            Combination::new(vec![4, 5, 6], 8).unwrap(),
        ];
        let mut sink = CollectProgress::default();
        let total = engine
            .eliminate_draws(&draws, 0, &mut sink, &CancelToken::new())
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(sink.events, vec![(1, 1, 1), (2, 0, 1), (3, 1, 2)]);
    }

    #[test]
    fn test_progress_does_not_change_results() {
        let draws = vec![
            Combination::new(vec![1, 3, 5, 7], 9).unwrap(),
            Combination::new(vec![2, 3, 8, 9], 9).unwrap(),
        ];
        let run = |sink: &mut dyn ProgressSink| {
            let universe = Universe::new(9, 4).unwrap();
            let mut engine = EliminationEngine::new(universe, ScanConfig::default()).unwrap();
            engine
                .eliminate_draws(&draws, 2, sink, &CancelToken::new())
                .unwrap();
            engine.finalize().statistics()
        };
        assert_eq!(run(&mut NoProgress), run(&mut LogProgress::new(1)));
    }
}
