use chrono::{Duration, Utc};
use log::debug;
use std::sync::Arc;

use super::subscriptions_constants::SUBSCRIPTION_TERM_DAYS;
use super::subscriptions_model::{NewSubscription, Subscription, SubscriptionRequest};
use super::subscriptions_traits::{SubscriptionRepositoryTrait, SubscriptionServiceTrait};
use crate::errors::{LedgerError, Result};
use crate::plans::InvestmentPlanRepositoryTrait;
use crate::wallets::{self, WalletRepositoryTrait};

/// Service originating investment subscriptions.
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
    plan_repository: Arc<dyn InvestmentPlanRepositoryTrait>,
}

impl SubscriptionService {
    /// Creates a new SubscriptionService instance
    pub fn new(
        repository: Arc<dyn SubscriptionRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
        plan_repository: Arc<dyn InvestmentPlanRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            wallet_repository,
            plan_repository,
        }
    }
}

#[async_trait::async_trait]
impl SubscriptionServiceTrait for SubscriptionService {
    /// Originates a subscription.
    ///
    /// The amount must sit inside the plan's bounds (inclusive) and be
    /// covered by the wallet balance. The wallet debit and the subscription
    /// insert happen in one storage transaction, so a concurrent spend
    /// cannot overdraw the wallet.
    async fn subscribe(
        &self,
        user_id: &str,
        request: SubscriptionRequest,
    ) -> Result<Subscription> {
        let wallet = self
            .wallet_repository
            .get_for_user(&request.wallet_id, user_id)?;
        let plan = self.plan_repository.get_by_id(&request.investment_plan_id)?;
        wallets::validate_amount(request.amount)?;

        if request.amount < plan.minimum_amount || request.amount > plan.maximum_amount {
            return Err(LedgerError::AmountOutOfRange {
                requested: request.amount,
                minimum: plan.minimum_amount,
                maximum: plan.maximum_amount,
            }
            .into());
        }
        if request.amount > wallet.balance {
            return Err(LedgerError::InsufficientFunds {
                wallet_id: wallet.id,
                requested: request.amount,
                available: wallet.balance,
            }
            .into());
        }

        let now = Utc::now().naive_utc();
        let new_subscription = NewSubscription {
            id: None,
            user_id: user_id.to_string(),
            wallet_id: request.wallet_id,
            plan_id: plan.id,
            amount: request.amount,
            subscribed_at: now,
            end_date: now + Duration::days(SUBSCRIPTION_TERM_DAYS),
        };
        debug!(
            "Originating {} subscription of {} for user {}",
            plan.tier, request.amount, user_id
        );
        self.repository.originate(new_subscription).await
    }

    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        self.repository.get_by_id(subscription_id)
    }

    fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.repository.list()
    }

    fn list_subscriptions_for_user(&self, user_id: &str) -> Result<Vec<Subscription>> {
        self.repository.list_for_user(user_id)
    }
}
