//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::errors::Result;
use crate::wallets::BalanceEffect;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Inserts the transaction and applies `effect` to the funding wallet in
    /// one storage transaction. A `Debit` effect re-checks funds inside that
    /// transaction.
    async fn create(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
        effect: BalanceEffect,
    ) -> Result<Transaction>;

    /// Applies a partial update and `effect` in one storage transaction.
    async fn update(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
        effect: BalanceEffect,
    ) -> Result<Transaction>;

    /// Deletes a transaction record. The wallet balance is left as is.
    async fn delete(&self, transaction_id: &str) -> Result<usize>;

    /// Retrieves a transaction by ID.
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists all transactions, newest first.
    fn list(&self) -> Result<Vec<Transaction>>;

    /// Lists the transactions of `user_id`, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Creates a transaction for `user_id` with the settlement rules applied.
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    /// Applies a partial update; a status transition to `done` settles the
    /// stored amount against the wallet.
    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Deletes a transaction without compensating the balance.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    fn list_transactions(&self) -> Result<Vec<Transaction>>;

    fn list_transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
}
