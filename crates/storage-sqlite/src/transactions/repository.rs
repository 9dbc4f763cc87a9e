use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use coinvest_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};
use coinvest_core::wallets::BalanceEffect;
use coinvest_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::wallets::apply_balance_effect;

/// Repository for managing transaction data in the database
pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    /// Applies the balance effect and inserts the transaction row in one
    /// write transaction. The effect runs first so a failed debit never
    /// leaves a ledger row behind.
    async fn create(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
        effect: BalanceEffect,
    ) -> Result<Transaction> {
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn| {
                apply_balance_effect(conn, &new_transaction.wallet_id, &effect)?;

                let transaction_db = TransactionDB {
                    id: new_transaction
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id: user_id_owned,
                    wallet_id: new_transaction.wallet_id,
                    transaction_type: new_transaction.transaction_type.as_str().to_string(),
                    wallet_address: new_transaction.wallet_address,
                    amount: new_transaction.amount.to_string(),
                    status: new_transaction.status.as_str().to_string(),
                    created_at: chrono::Utc::now().naive_utc(),
                };

                diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(transaction_db.into())
            })
            .await
    }

    async fn update(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
        effect: BalanceEffect,
    ) -> Result<Transaction> {
        let transaction_id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut transaction_db = transactions::table
                    .select(TransactionDB::as_select())
                    .find(&transaction_id_owned)
                    .first::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;

                apply_balance_effect(conn, &transaction_db.wallet_id, &effect)?;

                if let Some(status) = update.status {
                    transaction_db.status = status.as_str().to_string();
                }
                if let Some(transaction_type) = update.transaction_type {
                    transaction_db.transaction_type = transaction_type.as_str().to_string();
                }
                if let Some(wallet_address) = update.wallet_address {
                    transaction_db.wallet_address = Some(wallet_address);
                }
                if let Some(amount) = update.amount {
                    transaction_db.amount = amount.to_string();
                }

                diesel::update(transactions::table.find(&transaction_db.id))
                    .set(&transaction_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(transaction_db.into())
            })
            .await
    }

    async fn delete(&self, transaction_id: &str) -> Result<usize> {
        let transaction_id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected_rows =
                    diesel::delete(transactions::table.find(transaction_id_owned))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                Ok(affected_rows)
            })
            .await
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let transaction_db = transactions::table
            .select(TransactionDB::as_select())
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(transaction_db.into())
    }

    fn list(&self) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let results = transactions::table
            .select(TransactionDB::as_select())
            .order(transactions::created_at.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Transaction::from).collect())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let results = transactions::table
            .select(TransactionDB::as_select())
            .filter(transactions::user_id.eq(user_id))
            .order(transactions::created_at.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Transaction::from).collect())
    }
}
