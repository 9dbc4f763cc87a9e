//! Database models for investment subscriptions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinvest_core::constants::ACCRUAL_DATE_FORMAT;
use coinvest_core::subscriptions::Subscription;

use crate::users::UserDB;
use crate::wallets::{parse_decimal_string_tolerant, WalletDB};

/// Database model for investment subscriptions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(belongs_to(WalletDB, foreign_key = wallet_id))]
#[diesel(table_name = crate::schema::investment_subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDB {
    pub id: String,
    pub user_id: String,
    pub wallet_id: String,
    pub plan_id: String,
    pub amount: String,
    pub total_return: String,
    pub subscribed_at: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub last_accrued_on: Option<String>,
    pub settled_at: Option<NaiveDateTime>,
}

impl SubscriptionDB {
    /// Last accrual day parsed back from its stored form, or `None` when the
    /// subscription has never accrued.
    pub fn parsed_last_accrued_on(&self) -> Option<NaiveDate> {
        self.last_accrued_on.as_deref().and_then(|s| {
            NaiveDate::parse_from_str(s, ACCRUAL_DATE_FORMAT)
                .map_err(|e| {
                    log::error!(
                        "Failed to parse last_accrued_on '{}' on subscription {}: {}",
                        s,
                        self.id,
                        e
                    );
                })
                .ok()
        })
    }
}

// Conversion to domain models
impl From<SubscriptionDB> for Subscription {
    fn from(db: SubscriptionDB) -> Self {
        let amount = parse_decimal_string_tolerant(&db.amount, "amount");
        let total_return = parse_decimal_string_tolerant(&db.total_return, "total_return");
        let last_accrued_on = db.parsed_last_accrued_on();
        Self {
            id: db.id,
            user_id: db.user_id,
            wallet_id: db.wallet_id,
            plan_id: db.plan_id,
            amount,
            total_return,
            subscribed_at: db.subscribed_at,
            end_date: db.end_date,
            last_accrued_on,
            settled_at: db.settled_at,
        }
    }
}
