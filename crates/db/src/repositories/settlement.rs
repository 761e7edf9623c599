//! Settlement coordinator.
//!
//! Runs every multi-step mutation inside one serializable transaction.
//! Precondition reads happen inside that transaction, so a concurrent
//! settlement either sees the committed result or aborts with a
//! serialization failure, surfaced as `ConcurrentModification`.
//! Dropping the transaction on any early return rolls it back.

use ledgerbank_core::BankingError;
use ledgerbank_core::error::ensure_positive;
use ledgerbank_core::ledger::{AdjustmentReason, EntryKind};
use ledgerbank_core::settlement::{
    DebtDeduction, check_withdrawal, plan_debt_deduction, plan_repayment,
};
use ledgerbank_shared::types::AccountId;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, IsolationLevel,
    TransactionTrait,
};
use tracing::{debug, info};

use super::{ledger, loan};
use crate::error::banking_error;

/// Result of a processed deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositReceipt {
    /// Id of the appended `deposit` entry.
    pub entry_id: i64,
    /// Balance after the deposit and any debt deduction.
    pub balance: i64,
    /// Amount of the `debt_payment` entry, if the deposit settled debt.
    pub debt_payment: Option<i64>,
}

/// Result of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    /// Id of the appended `withdraw` entry.
    pub entry_id: i64,
    /// Balance after the withdrawal.
    pub balance: i64,
}

/// Result of a loan repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepaymentReceipt {
    /// Id of the appended `repayment` entry.
    pub entry_id: i64,
    /// Outstanding principal after the repayment.
    pub outstanding: i64,
}

/// Failure inside a settlement transaction.
#[derive(Debug, thiserror::Error)]
enum SettlementError {
    /// A domain rule refused the operation.
    #[error(transparent)]
    Rejected(#[from] BankingError),

    /// Storage failed.
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<SettlementError> for BankingError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Rejected(e) => e,
            SettlementError::Database(e) => banking_error(e),
        }
    }
}

/// Orchestrates deposits, withdrawals, repayments, and debt settlement.
#[derive(Debug, Clone)]
pub struct SettlementCoordinator {
    db: DatabaseConnection,
}

impl SettlementCoordinator {
    /// Creates a new settlement coordinator.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await
    }

    /// Appends a deposit and settles outstanding debt against it.
    ///
    /// Both steps commit together or not at all.
    pub async fn process_deposit(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<DepositReceipt, BankingError> {
        ensure_positive(amount)?;
        let receipt = self.try_process_deposit(account_id, amount).await?;

        info!(
            account_id = %account_id,
            amount,
            debt_payment = ?receipt.debt_payment,
            "Deposit processed"
        );
        Ok(receipt)
    }

    async fn try_process_deposit(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<DepositReceipt, SettlementError> {
        let txn = self.begin().await?;

        let entry_id = ledger::append_entry(&txn, account_id, EntryKind::Deposit, amount).await?;
        let deduction = auto_deduct(&txn, account_id).await?;
        let balance = ledger::compute_balance(&txn, account_id).await?;

        txn.commit().await?;

        Ok(DepositReceipt {
            entry_id,
            balance,
            debt_payment: deduction.map(|d| match d {
                DebtDeduction::Full { payment } | DebtDeduction::Partial { payment, .. } => payment,
            }),
        })
    }

    /// Withdraws `amount` if the computed balance covers it.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<WithdrawalReceipt, BankingError> {
        ensure_positive(amount)?;
        let receipt = self.try_withdraw(account_id, amount).await?;

        info!(account_id = %account_id, amount, balance = receipt.balance, "Withdrawal processed");
        Ok(receipt)
    }

    async fn try_withdraw(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<WithdrawalReceipt, SettlementError> {
        let txn = self.begin().await?;

        let balance = ledger::compute_balance(&txn, account_id).await?;
        check_withdrawal(amount, balance)?;
        let entry_id = ledger::append_entry(&txn, account_id, EntryKind::Withdraw, amount).await?;

        txn.commit().await?;

        Ok(WithdrawalReceipt {
            entry_id,
            balance: balance - amount,
        })
    }

    /// Repays `amount` of loan principal from deposits.
    ///
    /// Appends a negative `repayment` entry, decrements deposit rows, and
    /// decrements pending loans, all in one transaction.
    pub async fn repay_loan(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<RepaymentReceipt, BankingError> {
        ensure_positive(amount)?;
        let receipt = self.try_repay_loan(account_id, amount).await?;

        info!(
            account_id = %account_id,
            amount,
            outstanding = receipt.outstanding,
            "Loan repayment processed"
        );
        Ok(receipt)
    }

    async fn try_repay_loan(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<RepaymentReceipt, SettlementError> {
        let txn = self.begin().await?;

        let deposit_balance =
            ledger::aggregate_by_kind(&txn, account_id, EntryKind::Deposit).await?;
        let loan_balance = loan::outstanding_balance(&txn, account_id).await?;
        let plan = plan_repayment(amount, deposit_balance, loan_balance)?;

        let entry_id =
            ledger::append_entry(&txn, account_id, EntryKind::Repayment, plan.repayment_entry)
                .await?;
        ledger::adjust_entries_by_kind(
            &txn,
            account_id,
            EntryKind::Deposit,
            plan.deposit_delta,
            AdjustmentReason::Repayment,
        )
        .await?;
        loan::decrement_outstanding(&txn, account_id, plan.loan_delta).await?;
        let outstanding = loan::outstanding_balance(&txn, account_id).await?;

        txn.commit().await?;

        Ok(RepaymentReceipt {
            entry_id,
            outstanding,
        })
    }

    /// Settles outstanding debt against deposits in its own transaction.
    ///
    /// Deposits already run this step; it is exposed for callers that
    /// record debt after depositing.
    pub async fn auto_deduct_loan(
        &self,
        account_id: AccountId,
    ) -> Result<Option<DebtDeduction>, BankingError> {
        let txn = self.begin().await.map_err(banking_error)?;
        let deduction = auto_deduct(&txn, account_id)
            .await
            .map_err(banking_error)?;
        txn.commit().await.map_err(banking_error)?;
        Ok(deduction)
    }

    /// Records an amount owed by the account as a negative `debt` entry.
    pub async fn record_debt(
        &self,
        account_id: AccountId,
        amount: i64,
    ) -> Result<i64, BankingError> {
        ensure_positive(amount)?;
        let entry_id = ledger::append_entry(&self.db, account_id, EntryKind::Debt, -amount)
            .await
            .map_err(banking_error)?;

        info!(account_id = %account_id, amount, "Debt recorded");
        Ok(entry_id)
    }
}

/// Reconciles outstanding `debt` rows against the deposit aggregate.
async fn auto_deduct<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
) -> Result<Option<DebtDeduction>, DbErr> {
    let deposit_balance = ledger::aggregate_by_kind(conn, account_id, EntryKind::Deposit).await?;
    let outstanding_debt = ledger::aggregate_by_kind(conn, account_id, EntryKind::Debt).await?;

    let Some(deduction) = plan_debt_deduction(deposit_balance, outstanding_debt) else {
        return Ok(None);
    };

    match deduction {
        DebtDeduction::Full { payment } => {
            ledger::append_entry(conn, account_id, EntryKind::DebtPayment, payment).await?;
            let cleared = ledger::delete_entries_by_kind(
                conn,
                account_id,
                EntryKind::Debt,
                AdjustmentReason::DebtCleared,
            )
            .await?;
            debug!(account_id = %account_id, payment, cleared, "Debt fully settled");
        }
        DebtDeduction::Partial {
            payment,
            debt_delta,
        } => {
            ledger::append_entry(conn, account_id, EntryKind::DebtPayment, payment).await?;
            ledger::adjust_entries_by_kind(
                conn,
                account_id,
                EntryKind::Debt,
                debt_delta,
                AdjustmentReason::DebtPayment,
            )
            .await?;
            debug!(account_id = %account_id, payment, debt_delta, "Debt partially settled");
        }
    }

    Ok(Some(deduction))
}
