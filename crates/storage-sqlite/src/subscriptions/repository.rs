use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use coinvest_core::constants::ACCRUAL_DATE_FORMAT;
use coinvest_core::subscriptions::{
    NewSubscription, OpenSubscription, Subscription, SubscriptionRepositoryTrait,
};
use coinvest_core::wallets::BalanceEffect;
use coinvest_core::Result;

use super::model::SubscriptionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::plans::InvestmentPlanDB;
use crate::schema::{investment_plans, investment_subscriptions};
use crate::wallets::{apply_balance_effect, parse_decimal_string_tolerant};

/// Repository for managing subscription data in the database
pub struct SubscriptionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SubscriptionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SubscriptionRepository { pool, writer }
    }
}

#[async_trait]
impl SubscriptionRepositoryTrait for SubscriptionRepository {
    /// Debits the principal and inserts the subscription row in one write
    /// transaction. The debit re-checks funds against the current balance,
    /// so a concurrent spend between the service precheck and this job still
    /// rolls the whole origination back.
    async fn originate(&self, new_subscription: NewSubscription) -> Result<Subscription> {
        self.writer
            .exec(move |conn| {
                apply_balance_effect(
                    conn,
                    &new_subscription.wallet_id,
                    &BalanceEffect::Debit(new_subscription.amount),
                )?;

                let subscription_db = SubscriptionDB {
                    id: new_subscription
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id: new_subscription.user_id,
                    wallet_id: new_subscription.wallet_id,
                    plan_id: new_subscription.plan_id,
                    amount: new_subscription.amount.to_string(),
                    total_return: Decimal::ZERO.to_string(),
                    subscribed_at: new_subscription.subscribed_at,
                    end_date: new_subscription.end_date,
                    last_accrued_on: None,
                    settled_at: None,
                };

                diesel::insert_into(investment_subscriptions::table)
                    .values(&subscription_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(subscription_db.into())
            })
            .await
    }

    /// Adds `amount` to the accumulated return and stamps `on`, in one write
    /// transaction. The stamp check runs against the stored row, so two
    /// cycles racing over the same day leave a single accrual.
    async fn apply_accrual(
        &self,
        subscription_id: &str,
        amount: Decimal,
        on: NaiveDate,
    ) -> Result<bool> {
        let subscription_id_owned = subscription_id.to_string();
        self.writer
            .exec(move |conn| {
                let subscription_db = investment_subscriptions::table
                    .select(SubscriptionDB::as_select())
                    .find(&subscription_id_owned)
                    .first::<SubscriptionDB>(conn)
                    .map_err(StorageError::from)?;

                if let Some(prev) = subscription_db.parsed_last_accrued_on() {
                    if prev >= on {
                        return Ok(false);
                    }
                }

                let total_return =
                    parse_decimal_string_tolerant(&subscription_db.total_return, "total_return")
                        + amount;

                diesel::update(investment_subscriptions::table.find(&subscription_db.id))
                    .set((
                        investment_subscriptions::total_return.eq(total_return.to_string()),
                        investment_subscriptions::last_accrued_on
                            .eq(Some(on.format(ACCRUAL_DATE_FORMAT).to_string())),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(true)
            })
            .await
    }

    /// Credits the accumulated return back to the funding wallet and stamps
    /// `settled_at`, in one write transaction. Settling an already settled
    /// subscription is a no-op returning `None`.
    async fn settle(&self, subscription_id: &str, at: NaiveDateTime) -> Result<Option<Decimal>> {
        let subscription_id_owned = subscription_id.to_string();
        self.writer
            .exec(move |conn| {
                let subscription_db = investment_subscriptions::table
                    .select(SubscriptionDB::as_select())
                    .find(&subscription_id_owned)
                    .first::<SubscriptionDB>(conn)
                    .map_err(StorageError::from)?;

                if subscription_db.settled_at.is_some() {
                    return Ok(None);
                }

                let total_return =
                    parse_decimal_string_tolerant(&subscription_db.total_return, "total_return");

                apply_balance_effect(
                    conn,
                    &subscription_db.wallet_id,
                    &BalanceEffect::Credit(total_return),
                )?;

                diesel::update(investment_subscriptions::table.find(&subscription_db.id))
                    .set(investment_subscriptions::settled_at.eq(Some(at)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Some(total_return))
            })
            .await
    }

    fn get_by_id(&self, subscription_id: &str) -> Result<Subscription> {
        let mut conn = get_connection(&self.pool)?;

        let subscription_db = investment_subscriptions::table
            .select(SubscriptionDB::as_select())
            .find(subscription_id)
            .first::<SubscriptionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(subscription_db.into())
    }

    fn list(&self) -> Result<Vec<Subscription>> {
        let mut conn = get_connection(&self.pool)?;

        let results = investment_subscriptions::table
            .select(SubscriptionDB::as_select())
            .order(investment_subscriptions::subscribed_at.desc())
            .load::<SubscriptionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Subscription::from).collect())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Subscription>> {
        let mut conn = get_connection(&self.pool)?;

        let results = investment_subscriptions::table
            .select(SubscriptionDB::as_select())
            .filter(investment_subscriptions::user_id.eq(user_id))
            .order(investment_subscriptions::subscribed_at.desc())
            .load::<SubscriptionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Subscription::from).collect())
    }

    fn list_open(&self) -> Result<Vec<OpenSubscription>> {
        let mut conn = get_connection(&self.pool)?;

        let results = investment_subscriptions::table
            .inner_join(investment_plans::table)
            .filter(investment_subscriptions::settled_at.is_null())
            .select((SubscriptionDB::as_select(), InvestmentPlanDB::as_select()))
            .load::<(SubscriptionDB, InvestmentPlanDB)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results
            .into_iter()
            .map(|(subscription_db, plan_db)| OpenSubscription {
                subscription: subscription_db.into(),
                plan: plan_db.into(),
            })
            .collect())
    }
}
