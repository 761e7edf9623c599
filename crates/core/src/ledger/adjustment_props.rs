//! Property-based tests for row adjustment allocation.
//!
//! - Aggregate exactness: the affected rows move by exactly the delta
//! - Direction: only rows with room toward zero move, except the newest row
//! - Debt stays non-positive when the payment is smaller than the debt

use std::collections::HashSet;

use proptest::prelude::*;

use super::adjustment::allocate_delta;

/// Strategy to generate stored rows with ascending ids.
fn rows_strategy(amounts: impl Strategy<Value = i64>) -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec(amounts, 1..12).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| (i64::try_from(i).unwrap() + 1, amount))
            .collect()
    })
}

fn apply(rows: &[(i64, i64)], delta: i64) -> Vec<(i64, i64)> {
    let adjustments = allocate_delta(rows, delta);
    rows.iter()
        .map(|&(id, amount)| {
            let change: i64 = adjustments
                .iter()
                .filter(|a| a.row_id == id)
                .map(|a| a.delta)
                .sum();
            (id, amount + change)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The sum of all per-row deltas equals the requested delta.
    #[test]
    fn prop_aggregate_moves_by_exactly_delta(
        rows in rows_strategy(-10_000i64..10_000),
        delta in -50_000i64..50_000,
    ) {
        let adjustments = allocate_delta(&rows, delta);
        let total: i64 = adjustments.iter().map(|a| a.delta).sum();
        prop_assert_eq!(total, delta);
    }

    /// Every adjusted row exists and appears once.
    #[test]
    fn prop_adjusted_rows_are_known_and_unique(
        rows in rows_strategy(-10_000i64..10_000),
        delta in -50_000i64..50_000,
    ) {
        let known: HashSet<i64> = rows.iter().map(|(id, _)| *id).collect();
        let adjustments = allocate_delta(&rows, delta);
        let mut seen = HashSet::new();
        for a in &adjustments {
            prop_assert!(known.contains(&a.row_id));
            prop_assert!(seen.insert(a.row_id), "row {} adjusted twice", a.row_id);
            prop_assert!(a.delta != 0);
            prop_assert_eq!(a.delta.signum(), delta.signum());
        }
    }

    /// Decrementing non-negative rows by at most their total never drives one negative.
    #[test]
    fn prop_covered_decrement_keeps_rows_non_negative(
        rows in rows_strategy(0i64..10_000),
        fraction in 0u32..=100,
    ) {
        let total: i64 = rows.iter().map(|(_, a)| a).sum();
        let delta = -(total * i64::from(fraction) / 100);
        for (_, amount) in apply(&rows, delta) {
            prop_assert!(amount >= 0);
        }
    }

    /// Paying part of a debt leaves every debt row at or below zero.
    #[test]
    fn prop_partial_payment_keeps_debt_non_positive(
        rows in rows_strategy(-10_000i64..=0),
        fraction in 0u32..=100,
    ) {
        let owed: i64 = -rows.iter().map(|(_, a)| a).sum::<i64>();
        let delta = owed * i64::from(fraction) / 100;
        let after = apply(&rows, delta);
        for (_, amount) in &after {
            prop_assert!(*amount <= 0);
        }
        let remaining: i64 = after.iter().map(|(_, a)| a).sum();
        prop_assert_eq!(remaining, -owed + delta);
    }
}
