//! Subscription repository and service traits.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::subscriptions_model::{
    AccrualCycleSummary, NewSubscription, OpenSubscription, Subscription, SubscriptionRequest,
};
use crate::errors::Result;

/// Trait defining the contract for Subscription repository operations.
#[async_trait]
pub trait SubscriptionRepositoryTrait: Send + Sync {
    /// Debits the funding wallet by the principal and inserts the
    /// subscription in one storage transaction; the debit re-checks funds
    /// inside that transaction.
    async fn originate(&self, new_subscription: NewSubscription) -> Result<Subscription>;

    /// Adds `amount` to the accumulated return and stamps `on` as the last
    /// accrual day, atomically.
    ///
    /// Returns `false` when the subscription is already stamped with `on` or
    /// a later day, leaving the row untouched.
    async fn apply_accrual(
        &self,
        subscription_id: &str,
        amount: Decimal,
        on: NaiveDate,
    ) -> Result<bool>;

    /// Credits the accumulated return to the funding wallet and stamps
    /// `settled_at`, atomically.
    ///
    /// Returns the credited amount, or `None` when the subscription was
    /// already settled.
    async fn settle(&self, subscription_id: &str, at: NaiveDateTime) -> Result<Option<Decimal>>;

    /// Retrieves a subscription by ID.
    fn get_by_id(&self, subscription_id: &str) -> Result<Subscription>;

    /// Lists all subscriptions, newest first.
    fn list(&self) -> Result<Vec<Subscription>>;

    /// Lists the subscriptions of `user_id`, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Subscription>>;

    /// Unsettled subscriptions joined with their plans.
    fn list_open(&self) -> Result<Vec<OpenSubscription>>;
}

/// Trait defining the contract for Subscription service operations.
#[async_trait]
pub trait SubscriptionServiceTrait: Send + Sync {
    /// Originates a subscription for `user_id` after bounds and funds checks.
    async fn subscribe(&self, user_id: &str, request: SubscriptionRequest)
        -> Result<Subscription>;

    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription>;

    fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    fn list_subscriptions_for_user(&self, user_id: &str) -> Result<Vec<Subscription>>;
}

/// Trait for the accrual engine driven by the periodic trigger.
#[async_trait]
pub trait AccrualServiceTrait: Send + Sync {
    /// Runs one accrual pass over all open subscriptions.
    async fn run_cycle(&self) -> Result<AccrualCycleSummary>;
}
