//! Database models for ledger transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinvest_core::transactions::{Transaction, TransactionStatus, TransactionType};

use crate::wallets::parse_decimal_string_tolerant;

/// Database model for transactions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub wallet_id: String,
    pub transaction_type: String,
    pub wallet_address: Option<String>,
    pub amount: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

// Conversion to domain models
impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let transaction_type = db.transaction_type.parse().unwrap_or_else(|e| {
            log::error!(
                "Unknown transaction type '{}' on transaction {}: {}",
                db.transaction_type,
                db.id,
                e
            );
            TransactionType::Deposit
        });
        let status: TransactionStatus = db.status.parse().unwrap_or_else(|e| {
            log::error!(
                "Unknown transaction status '{}' on transaction {}: {}",
                db.status,
                db.id,
                e
            );
            TransactionStatus::Pending
        });
        let amount = parse_decimal_string_tolerant(&db.amount, "amount");
        Self {
            id: db.id,
            user_id: db.user_id,
            wallet_id: db.wallet_id,
            transaction_type,
            wallet_address: db.wallet_address,
            amount,
            status,
            created_at: db.created_at,
        }
    }
}
