//! Ledger entry domain types.

use chrono::{DateTime, Utc};
use ledgerbank_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// Kind of monetary event recorded in the ledger.
///
/// Stored amounts keep the sign the producing operation gave them:
/// `deposit` and `withdraw` are positive, `repayment` and `debt_payment`
/// are negative, `debt` is negative while outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Cash paid into the account.
    Deposit,
    /// Cash taken out of the account.
    Withdraw,
    /// Loan repayment funded from deposits.
    Repayment,
    /// Amount owed, cleared opportunistically by later deposits.
    Debt,
    /// Settlement of outstanding debt.
    DebtPayment,
}

impl EntryKind {
    /// Every entry kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Deposit,
        Self::Withdraw,
        Self::Repayment,
        Self::Debt,
        Self::DebtPayment,
    ];

    /// Returns the persisted name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Repayment => "repayment",
            Self::Debt => "debt",
            Self::DebtPayment => "debt_payment",
        }
    }

    /// Sign applied to the stored amount when computing the balance.
    ///
    /// Deposits count as stored; every other kind is subtracted as stored.
    #[must_use]
    pub const fn balance_sign(self) -> i64 {
        match self {
            Self::Deposit => 1,
            Self::Withdraw | Self::Repayment | Self::Debt | Self::DebtPayment => -1,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown entry kind: {s}"))
    }
}

/// A ledger entry as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Storage-assigned, monotonically increasing identifier.
    pub id: i64,
    /// The account the event belongs to.
    pub account_id: AccountId,
    /// What kind of event this is.
    pub kind: EntryKind,
    /// Signed amount in minor currency units.
    pub amount: i64,
    /// When the entry was appended.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Returns this entry's contribution to the account balance.
    #[must_use]
    pub fn balance_contribution(&self) -> i64 {
        self.kind.balance_sign() * self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in EntryKind::ALL {
            assert_eq!(EntryKind::from_str(kind.as_str()).unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(EntryKind::from_str("transfer").is_err());
        assert!(EntryKind::from_str("Deposit").is_err());
    }

    #[test]
    fn test_only_deposits_count_positively() {
        assert_eq!(EntryKind::Deposit.balance_sign(), 1);
        for kind in &EntryKind::ALL[1..] {
            assert_eq!(kind.balance_sign(), -1);
        }
    }

    #[test]
    fn test_serde_names_match_persisted_names() {
        let json = serde_json_name(EntryKind::DebtPayment);
        assert_eq!(json, "debt_payment");
    }

    fn serde_json_name(kind: EntryKind) -> String {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        let de: StrDeserializer<'_, Error> = kind.as_str().into_deserializer();
        let parsed = EntryKind::deserialize(de).unwrap();
        parsed.as_str().to_string()
    }
}
