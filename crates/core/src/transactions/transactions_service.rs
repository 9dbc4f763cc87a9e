use log::debug;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionStatus, TransactionType, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{LedgerError, Result};
use crate::wallets::{BalanceEffect, WalletRepositoryTrait};

/// Service applying the deposit/withdrawal settlement rules.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            wallet_repository,
        }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    /// Creates a transaction for `user_id`.
    ///
    /// The record is persisted whatever its status; only a `done` status
    /// moves the wallet balance. A withdrawal must be covered by the current
    /// balance even while still pending.
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let wallet = self
            .wallet_repository
            .get_for_user(&new_transaction.wallet_id, user_id)?;
        new_transaction.validate()?;

        if new_transaction.transaction_type == TransactionType::Withdrawal
            && new_transaction.amount > wallet.balance
        {
            return Err(LedgerError::InsufficientFunds {
                wallet_id: wallet.id,
                requested: new_transaction.amount,
                available: wallet.balance,
            }
            .into());
        }

        let effect = settlement_effect(
            new_transaction.status,
            new_transaction.transaction_type,
            new_transaction.amount,
            false,
        );
        debug!(
            "Creating {} {} transaction of {} on wallet {}",
            new_transaction.status,
            new_transaction.transaction_type,
            new_transaction.amount,
            wallet.id
        );
        self.repository.create(user_id, new_transaction, effect).await
    }

    /// Applies a partial update to a transaction.
    ///
    /// Only a status change into `done` moves the balance, and it settles the
    /// stored type and amount. Funds are not re-checked here: the approval
    /// flow settles what was promised, even into a negative balance. A
    /// `done -> declined` change does not reverse the earlier settlement.
    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let existing = self.repository.get_by_id(transaction_id)?;
        update.validate()?;

        let effect = match update.status {
            Some(new_status) if new_status != existing.status => settlement_effect(
                new_status,
                existing.transaction_type,
                existing.amount,
                true,
            ),
            _ => BalanceEffect::None,
        };
        self.repository.update(transaction_id, update, effect).await
    }

    /// Deletes a transaction by ID.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        self.repository.delete(transaction_id).await?;
        Ok(())
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(transaction_id)
    }

    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.repository.list()
    }

    fn list_transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_for_user(user_id)
    }
}

/// Balance effect of a transaction reaching `status`.
///
/// `forced` marks the late-approval path, where the withdrawal debit skips
/// the funds check.
fn settlement_effect(
    status: TransactionStatus,
    transaction_type: TransactionType,
    amount: Decimal,
    forced: bool,
) -> BalanceEffect {
    if status != TransactionStatus::Done {
        return BalanceEffect::None;
    }
    match transaction_type {
        TransactionType::Deposit => BalanceEffect::Credit(amount),
        TransactionType::Withdrawal if forced => BalanceEffect::ForcedDebit(amount),
        TransactionType::Withdrawal => BalanceEffect::Debit(amount),
    }
}
