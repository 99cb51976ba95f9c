// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Laws of the combination enumerator: counts, order, rank and unrank.

mod common;

use common::arb_combination;
use lotto_coverage::combo::{choose, Universe};
use lotto_coverage::Combination;
use proptest::prelude::*;

#[test]
fn test_counts_order_and_ranks_for_small_universes() {
    for n in 0..=9usize {
        for k in 0..=n {
            let universe = Universe::new(n, k).unwrap();
            let all: Vec<Combination> = universe.enumerate().collect();
            assert_eq!(all.len() as u64, choose(n as u64, k as u64), "C({n}, {k})");
            for pair in all.windows(2) {
                assert!(pair[0].numbers() < pair[1].numbers(), "order in C({n}, {k})");
            }
            for (rank, combo) in all.iter().enumerate() {
                assert!(combo.numbers().windows(2).all(|w| w[0] < w[1]));
                assert_eq!(universe.rank(combo.numbers()).unwrap(), rank as u64);
                assert_eq!(&universe.unrank(rank as u64).unwrap(), combo);
            }
        }
    }
}

#[test]
fn test_enumeration_is_lazy() {
    let universe = Universe::new(49, 6).unwrap();
    let first: Vec<Combination> = universe.enumerate().take(2).collect();
    assert_eq!(first[0].numbers(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(first[1].numbers(), &[1, 2, 3, 4, 5, 7]);
    let last = universe.enumerate_from(universe.size() - 1).unwrap().next();
    assert_eq!(last.unwrap().numbers(), &[44, 45, 46, 47, 48, 49]);
}

#[test]
fn test_distance_laws_on_draw() {
    let a = Combination::new(vec![6, 9, 13, 21, 24, 38], 49).unwrap();
    let b = Combination::new(vec![1, 9, 13, 22, 24, 49], 49).unwrap();
    assert_eq!(a.distance(&a).unwrap(), 0);
    assert_eq!(a.distance(&b).unwrap(), 3);
    assert_eq!(b.distance(&a).unwrap(), 3);
}

proptest! {
    #[test]
    fn prop_rank_unrank_inverse_49_6(numbers in arb_combination(49, 6)) {
        let universe = Universe::new(49, 6).unwrap();
        let rank = universe.rank(&numbers).unwrap();
        prop_assert!(rank < universe.size());
        let combo = universe.unrank(rank).unwrap();
        prop_assert_eq!(combo.numbers(), &numbers[..]);
    }

    #[test]
    fn prop_unrank_rank_inverse(rank in 0u64..13_983_816) {
        let universe = Universe::new(49, 6).unwrap();
        let combo = universe.unrank(rank).unwrap();
        prop_assert_eq!(universe.rank(combo.numbers()).unwrap(), rank);
    }

    #[test]
    fn prop_cursor_matches_unrank(start in 0u64..211_000, steps in 0u64..500) {
        let universe = Universe::new(49, 4).unwrap();
        let mut cursor = universe.cursor_at(start).unwrap();
        for _ in 0..steps {
            prop_assert!(cursor.advance());
        }
        let expected = universe.unrank(start + steps).unwrap();
        prop_assert_eq!(cursor.numbers(), expected.numbers());
    }

    #[test]
    fn prop_distance_symmetric_and_bounded(
        a in arb_combination(49, 6),
        b in arb_combination(49, 6),
    ) {
        let a = Combination::new(a, 49).unwrap();
        let b = Combination::new(b, 49).unwrap();
        let d = a.distance(&b).unwrap();
        prop_assert_eq!(d, b.distance(&a).unwrap());
        prop_assert!(d <= 6);
        prop_assert_eq!(d, 6 - a.to_number_set().intersection_len(&b.to_number_set()));
    }
}
