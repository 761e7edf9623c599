//! Account balance calculations.
//!
//! The spendable balance is derived from the ledger with a fixed formula:
//!
//! ```text
//! balance = Σ amount where kind = deposit  −  Σ amount where kind ≠ deposit
//! ```
//!
//! `repayment` and `debt_payment` rows are stored negative, so subtracting
//! them adds their magnitude back. The formula is kept exactly as the
//! storage layer evaluates it; see `EntryKind::balance_sign`.

use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;

/// Running balance information for a ledger entry.
///
/// - `position`: 1-based index of the entry in storage order
/// - `previous_balance`: balance before this entry
/// - `current_balance`: balance after this entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position of the entry (monotonically increasing).
    pub position: u64,
    /// Balance before this entry.
    pub previous_balance: i64,
    /// Balance after this entry.
    pub current_balance: i64,
}

impl RunningBalance {
    /// Creates a running balance for the first entry on an account.
    #[must_use]
    pub fn first_entry(balance_change: i64) -> Self {
        Self {
            position: 1,
            previous_balance: 0,
            current_balance: balance_change,
        }
    }

    /// Creates a running balance based on the previous entry.
    #[must_use]
    pub fn next_entry(previous: &Self, balance_change: i64) -> Self {
        Self {
            position: previous.position + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + balance_change,
        }
    }
}

/// A ledger entry paired with the balance it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The ledger entry.
    pub entry: LedgerEntry,
    /// Balance before and after the entry.
    pub running: RunningBalance,
}

/// Builds an account statement from entries in storage order.
///
/// Amounts are read as currently stored, so rows adjusted in place by a
/// settlement show their adjusted value.
#[must_use]
pub fn statement(entries: Vec<LedgerEntry>) -> Vec<StatementLine> {
    let mut lines: Vec<StatementLine> = Vec::with_capacity(entries.len());

    for entry in entries {
        let change = entry.balance_contribution();
        let running = match lines.last() {
            Some(prev) => RunningBalance::next_entry(&prev.running, change),
            None => RunningBalance::first_entry(change),
        };
        lines.push(StatementLine { entry, running });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryKind;
    use chrono::Utc;
    use ledgerbank_shared::types::AccountId;
    use proptest::prelude::*;

    fn entry(id: i64, kind: EntryKind, amount: i64) -> LedgerEntry {
        LedgerEntry {
            id,
            account_id: AccountId::from_uuid(uuid::Uuid::nil()),
            kind,
            amount,
            created_at: Utc::now(),
        }
    }

    /// Balance after the last line of a statement over `(kind, amount)` rows.
    fn closing_balance<I>(rows: I) -> i64
    where
        I: IntoIterator<Item = (EntryKind, i64)>,
    {
        let entries = rows
            .into_iter()
            .zip(1..)
            .map(|((kind, amount), id)| entry(id, kind, amount))
            .collect();
        statement(entries)
            .last()
            .map_or(0, |line| line.running.current_balance)
    }

    #[test]
    fn test_empty_ledger_has_zero_balance() {
        assert_eq!(closing_balance(Vec::<(EntryKind, i64)>::new()), 0);
    }

    #[test]
    fn test_deposit_then_withdraw() {
        let balance = closing_balance([(EntryKind::Deposit, 100), (EntryKind::Withdraw, 30)]);
        assert_eq!(balance, 70);
    }

    #[test]
    fn test_negative_repayment_is_added_back() {
        // deposit 300 decremented to 100 by a repayment of 200 stored as -200
        let balance = closing_balance([(EntryKind::Deposit, 100), (EntryKind::Repayment, -200)]);
        assert_eq!(balance, 300);
    }

    #[test]
    fn test_outstanding_debt_raises_balance() {
        let balance = closing_balance([(EntryKind::Deposit, 50), (EntryKind::Debt, -20)]);
        assert_eq!(balance, 70);
    }

    #[test]
    fn test_statement_running_balance() {
        let lines = statement(vec![
            entry(1, EntryKind::Deposit, 100),
            entry(2, EntryKind::Withdraw, 40),
            entry(3, EntryKind::Deposit, 15),
        ]);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].running, RunningBalance::first_entry(100));
        assert_eq!(lines[1].running.previous_balance, 100);
        assert_eq!(lines[1].running.current_balance, 60);
        assert_eq!(lines[2].running.position, 3);
        assert_eq!(lines[2].running.current_balance, 75);
    }

    #[test]
    fn test_statement_of_empty_ledger() {
        assert!(statement(Vec::new()).is_empty());
    }

    fn kind_strategy() -> impl Strategy<Value = EntryKind> {
        prop_oneof![
            Just(EntryKind::Deposit),
            Just(EntryKind::Withdraw),
            Just(EntryKind::Repayment),
            Just(EntryKind::Debt),
            Just(EntryKind::DebtPayment),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Deposits alone sum to the balance.
        #[test]
        fn prop_deposits_only_sum(amounts in prop::collection::vec(1i64..1_000_000, 0..20)) {
            let expected: i64 = amounts.iter().sum();
            let balance = closing_balance(amounts.into_iter().map(|a| (EntryKind::Deposit, a)));
            prop_assert_eq!(balance, expected);
        }

        /// The last statement line always ends on the aggregate balance.
        #[test]
        fn prop_statement_ends_on_balance(
            rows in prop::collection::vec((kind_strategy(), -100_000i64..100_000), 1..30),
        ) {
            let entries: Vec<LedgerEntry> = rows
                .iter()
                .enumerate()
                .map(|(i, (kind, amount))| entry(i64::try_from(i).unwrap() + 1, *kind, *amount))
                .collect();
            let lines = statement(entries);
            let last = lines.last().unwrap();
            let expected: i64 = rows.iter().map(|(kind, amount)| kind.balance_sign() * amount).sum();
            prop_assert_eq!(last.running.current_balance, expected);
        }

        /// previous_balance[N] = current_balance[N-1].
        #[test]
        fn prop_running_chain(c1 in -10_000i64..10_000, c2 in -10_000i64..10_000) {
            let rb1 = RunningBalance::first_entry(c1);
            let rb2 = RunningBalance::next_entry(&rb1, c2);
            prop_assert_eq!(rb2.previous_balance, rb1.current_balance);
            prop_assert_eq!(rb2.current_balance, c1 + c2);
        }
    }
}
