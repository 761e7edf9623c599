//! In-place adjustment of existing ledger rows.
//!
//! Two settlements rewrite stored amounts instead of only appending:
//! a repayment decrements `deposit` rows and a partial debt payment
//! increments `debt` rows. The same arithmetic decrements loan principal.
//! Every such change goes through [`allocate_delta`] so the aggregate of
//! the affected rows moves by exactly the requested delta, and each
//! resulting per-row change is recorded with an [`AdjustmentReason`].

use serde::{Deserialize, Serialize};

/// Why a stored amount was adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Deposit rows decremented by a loan repayment.
    Repayment,
    /// Debt rows incremented by a partial debt payment.
    DebtPayment,
    /// Debt rows brought to zero and removed by a full debt payment.
    DebtCleared,
}

impl AdjustmentReason {
    /// Returns the persisted name of the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repayment => "repayment",
            Self::DebtPayment => "debt_payment",
            Self::DebtCleared => "debt_cleared",
        }
    }
}

impl std::fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdjustmentReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repayment" => Ok(Self::Repayment),
            "debt_payment" => Ok(Self::DebtPayment),
            "debt_cleared" => Ok(Self::DebtCleared),
            _ => Err(format!("Unknown adjustment reason: {s}")),
        }
    }
}

/// A change to apply to one stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAdjustment {
    /// Storage identifier of the row.
    pub row_id: i64,
    /// Signed amount to add to the stored value.
    pub delta: i64,
}

/// Spreads `delta` over `rows` so that their sum moves by exactly `delta`.
///
/// `rows` are `(row_id, stored_amount)` pairs, oldest first. Each row is
/// moved toward zero, in the direction of `delta`, by as much as the
/// remaining delta allows. Whatever cannot be absorbed that way lands on
/// the newest row, which may then cross zero.
///
/// With a single row the result is `[(row, delta)]`, i.e. plain
/// `amount += delta`. Returns an empty vector when `delta` is zero or
/// there are no rows.
#[must_use]
pub fn allocate_delta(rows: &[(i64, i64)], delta: i64) -> Vec<RowAdjustment> {
    let Some(&(newest_id, _)) = rows.last() else {
        return Vec::new();
    };
    if delta == 0 {
        return Vec::new();
    }

    let direction = delta.signum();
    let mut remaining = delta.abs();
    let mut adjustments = Vec::new();

    for &(row_id, amount) in rows {
        if remaining == 0 {
            break;
        }
        // Distance this row can travel toward zero in `direction`.
        let capacity = (-direction * amount).max(0);
        let step = capacity.min(remaining);
        if step > 0 {
            adjustments.push(RowAdjustment {
                row_id,
                delta: direction * step,
            });
            remaining -= step;
        }
    }

    if remaining > 0 {
        match adjustments.last_mut() {
            Some(last) if last.row_id == newest_id => last.delta += direction * remaining,
            _ => adjustments.push(RowAdjustment {
                row_id: newest_id,
                delta: direction * remaining,
            }),
        }
    }

    adjustments
}
