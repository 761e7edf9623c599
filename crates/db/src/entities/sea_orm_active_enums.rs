//! String-backed enums stored in text columns.
//!
//! Each mirrors a domain enum from `ledgerbank-core` and converts both ways.

use ledgerbank_core::ledger::{AdjustmentReason, EntryKind};
use ledgerbank_core::loan::LoanStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted `transactions.type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EntryType {
    #[sea_orm(string_value = "deposit")]
    Deposit,
    #[sea_orm(string_value = "withdraw")]
    Withdraw,
    #[sea_orm(string_value = "repayment")]
    Repayment,
    #[sea_orm(string_value = "debt")]
    Debt,
    #[sea_orm(string_value = "debt_payment")]
    DebtPayment,
}

/// Persisted `loans.status` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum LoanStatusType {
    #[sea_orm(string_value = "pending")]
    Pending,
}

/// Persisted `entry_adjustments.reason` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AdjustmentReasonType {
    #[sea_orm(string_value = "repayment")]
    Repayment,
    #[sea_orm(string_value = "debt_payment")]
    DebtPayment,
    #[sea_orm(string_value = "debt_cleared")]
    DebtCleared,
}

impl From<EntryKind> for EntryType {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Deposit => Self::Deposit,
            EntryKind::Withdraw => Self::Withdraw,
            EntryKind::Repayment => Self::Repayment,
            EntryKind::Debt => Self::Debt,
            EntryKind::DebtPayment => Self::DebtPayment,
        }
    }
}

impl From<EntryType> for EntryKind {
    fn from(kind: EntryType) -> Self {
        match kind {
            EntryType::Deposit => Self::Deposit,
            EntryType::Withdraw => Self::Withdraw,
            EntryType::Repayment => Self::Repayment,
            EntryType::Debt => Self::Debt,
            EntryType::DebtPayment => Self::DebtPayment,
        }
    }
}

impl From<LoanStatus> for LoanStatusType {
    fn from(status: LoanStatus) -> Self {
        match status {
            LoanStatus::Pending => Self::Pending,
        }
    }
}

impl From<LoanStatusType> for LoanStatus {
    fn from(status: LoanStatusType) -> Self {
        match status {
            LoanStatusType::Pending => Self::Pending,
        }
    }
}

impl From<AdjustmentReason> for AdjustmentReasonType {
    fn from(reason: AdjustmentReason) -> Self {
        match reason {
            AdjustmentReason::Repayment => Self::Repayment,
            AdjustmentReason::DebtPayment => Self::DebtPayment,
            AdjustmentReason::DebtCleared => Self::DebtCleared,
        }
    }
}

impl From<AdjustmentReasonType> for AdjustmentReason {
    fn from(reason: AdjustmentReasonType) -> Self {
        match reason {
            AdjustmentReasonType::Repayment => Self::Repayment,
            AdjustmentReasonType::DebtPayment => Self::DebtPayment,
            AdjustmentReasonType::DebtCleared => Self::DebtCleared,
        }
    }
}
