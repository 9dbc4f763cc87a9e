use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use coinvest_core::errors::{Error, LedgerError, Result};
use coinvest_core::wallets::{BalanceEffect, Wallet, WalletRepositoryTrait};

use super::model::{parse_decimal_string_tolerant, WalletDB};
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::wallets;

/// Applies a balance effect to a wallet row on the given connection.
///
/// Runs inside the caller's write transaction so the balance change and the
/// ledger row it belongs to commit or roll back together. `Debit` re-checks
/// funds against the current row; `ForcedDebit` does not and may leave the
/// balance negative.
pub(crate) fn apply_balance_effect(
    conn: &mut SqliteConnection,
    wallet_id: &str,
    effect: &BalanceEffect,
) -> Result<()> {
    if effect.is_noop() {
        return Ok(());
    }

    let wallet_db = wallets::table
        .select(WalletDB::as_select())
        .find(wallet_id)
        .first::<WalletDB>(conn)
        .map_err(StorageError::from)?;

    let balance = parse_decimal_string_tolerant(&wallet_db.balance, "balance");

    let next_balance = match effect {
        BalanceEffect::None => balance,
        BalanceEffect::Credit(amount) => balance + amount,
        BalanceEffect::Debit(amount) => {
            if *amount > balance {
                return Err(Error::Ledger(LedgerError::InsufficientFunds {
                    wallet_id: wallet_db.id,
                    requested: *amount,
                    available: balance,
                }));
            }
            balance - amount
        }
        BalanceEffect::ForcedDebit(amount) => balance - amount,
    };

    diesel::update(wallets::table.find(&wallet_db.id))
        .set(wallets::balance.eq(next_balance.to_string()))
        .execute(conn)
        .map_err(StorageError::from)?;

    Ok(())
}

/// Repository for reading wallet data.
///
/// There are deliberately no balance writes here; balances move only through
/// [`apply_balance_effect`] inside the transaction and subscription flows.
pub struct WalletRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl WalletRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        WalletRepository { pool }
    }
}

impl WalletRepositoryTrait for WalletRepository {
    fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
        let mut conn = get_connection(&self.pool)?;

        let wallet_db = wallets::table
            .select(WalletDB::as_select())
            .find(wallet_id)
            .first::<WalletDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(wallet_db.into())
    }

    fn get_for_user(&self, wallet_id: &str, user_id: &str) -> Result<Wallet> {
        let mut conn = get_connection(&self.pool)?;

        let wallet_db = wallets::table
            .select(WalletDB::as_select())
            .filter(wallets::id.eq(wallet_id))
            .filter(wallets::user_id.eq(user_id))
            .first::<WalletDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(wallet_db.into())
    }

    fn list(&self) -> Result<Vec<Wallet>> {
        let mut conn = get_connection(&self.pool)?;

        let results = wallets::table
            .select(WalletDB::as_select())
            .order(wallets::title.asc())
            .load::<WalletDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Wallet::from).collect())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Wallet>> {
        let mut conn = get_connection(&self.pool)?;

        let results = wallets::table
            .select(WalletDB::as_select())
            .filter(wallets::user_id.eq(user_id))
            .order(wallets::title.asc())
            .load::<WalletDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Wallet::from).collect())
    }
}
