//! Database models for wallets.

use diesel::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use coinvest_core::wallets::Wallet;

/// Helper function to parse a string into a Decimal,
/// with a fallback for scientific notation by parsing as f64 first.
pub(crate) fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

/// Database model for wallets
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
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WalletDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub wallet_address: String,
    pub balance: String,
}

// Conversion to domain models
impl From<WalletDB> for Wallet {
    fn from(db: WalletDB) -> Self {
        let balance = parse_decimal_string_tolerant(&db.balance, "balance");
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            wallet_address: db.wallet_address,
            balance,
        }
    }
}

impl From<Wallet> for WalletDB {
    fn from(domain: Wallet) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            wallet_address: domain.wallet_address,
            balance: domain.balance.to_string(),
        }
    }
}
