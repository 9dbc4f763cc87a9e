//! Subscription domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MONEY_SCALE;
use crate::plans::InvestmentPlan;

/// Domain model for a running or settled investment subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub wallet_id: String,
    pub plan_id: String,
    /// Principal debited from the wallet at origination.
    pub amount: Decimal,
    /// Return accumulated so far; credited back to the wallet at maturity.
    pub total_return: Decimal,
    pub subscribed_at: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Day of the most recent accrual; guards against accruing twice a day.
    pub last_accrued_on: Option<NaiveDate>,
    /// Set once the matured return has been credited back.
    pub settled_at: Option<NaiveDateTime>,
}

impl Subscription {
    /// Whole days elapsed since origination.
    pub fn days_since_start(&self, now: NaiveDateTime) -> i64 {
        (now - self.subscribed_at).num_days()
    }

    /// Return earned per accrual day: principal times rate percent,
    /// money-rounded.
    pub fn daily_return(&self, daily_return_rate: Decimal) -> Decimal {
        (self.amount * daily_return_rate / Decimal::ONE_HUNDRED).round_dp(MONEY_SCALE)
    }
}

/// Subscription joined with its plan, as consumed by the accrual engine.
#[derive(Debug, Clone)]
pub struct OpenSubscription {
    pub subscription: Subscription,
    pub plan: InvestmentPlan,
}

/// Input model for originating a subscription. Built by the service, which
/// resolves the wallet and plan and stamps the term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub wallet_id: String,
    pub plan_id: String,
    pub amount: Decimal,
    pub subscribed_at: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// What an API caller asks for when subscribing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub wallet_id: String,
    pub investment_plan_id: String,
    pub amount: Decimal,
}

/// Per-subscription outcome of one accrual pass.
#[derive(Debug, Clone, PartialEq)]
pub enum AccrualOutcome {
    /// Daily return added to the accumulated total.
    Accrued(Decimal),
    /// Already stamped for today; nothing to do.
    AlreadyAccrued,
    /// Term ended; accumulated return credited to the wallet.
    Matured(Decimal),
    /// Another pass settled it first.
    AlreadySettled,
}

/// Totals for one accrual cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualCycleSummary {
    pub processed: usize,
    pub accrued: usize,
    pub matured: usize,
    pub failed: usize,
}
