use chrono::NaiveDateTime;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;

use super::subscriptions_model::{AccrualCycleSummary, AccrualOutcome, OpenSubscription};
use super::subscriptions_traits::{AccrualServiceTrait, SubscriptionRepositoryTrait};
use crate::errors::Result;

/// Walks the open subscriptions once per trigger tick: accrues the daily
/// return while inside the plan's window, settles the accumulated return
/// back to the wallet at maturity.
pub struct AccrualService {
    repository: Arc<dyn SubscriptionRepositoryTrait>,
}

impl AccrualService {
    /// Creates a new AccrualService instance
    pub fn new(repository: Arc<dyn SubscriptionRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Accrues or settles a single subscription against `now`.
    async fn advance(&self, open: &OpenSubscription, now: NaiveDateTime) -> Result<AccrualOutcome> {
        let subscription = &open.subscription;
        let days = subscription.days_since_start(now);

        if days <= i64::from(open.plan.duration_days) {
            let amount = subscription.daily_return(open.plan.daily_return_rate);
            if self
                .repository
                .apply_accrual(&subscription.id, amount, now.date())
                .await?
            {
                Ok(AccrualOutcome::Accrued(amount))
            } else {
                Ok(AccrualOutcome::AlreadyAccrued)
            }
        } else {
            match self.repository.settle(&subscription.id, now).await? {
                Some(credited) => Ok(AccrualOutcome::Matured(credited)),
                None => Ok(AccrualOutcome::AlreadySettled),
            }
        }
    }
}

#[async_trait::async_trait]
impl AccrualServiceTrait for AccrualService {
    /// One pass over all open subscriptions, sharing a single `now`.
    ///
    /// A failure on one subscription is logged and counted; the pass
    /// continues with the rest.
    async fn run_cycle(&self) -> Result<AccrualCycleSummary> {
        let now = Utc::now().naive_utc();
        let open = self.repository.list_open()?;
        let mut summary = AccrualCycleSummary {
            processed: open.len(),
            ..Default::default()
        };

        for item in &open {
            match self.advance(item, now).await {
                Ok(AccrualOutcome::Accrued(amount)) => {
                    summary.accrued += 1;
                    debug!("Accrued {} on subscription {}", amount, item.subscription.id);
                }
                Ok(AccrualOutcome::Matured(credited)) => {
                    summary.matured += 1;
                    debug!(
                        "Settled subscription {} with return {}",
                        item.subscription.id, credited
                    );
                }
                Ok(AccrualOutcome::AlreadyAccrued) | Ok(AccrualOutcome::AlreadySettled) => {}
                Err(e) => {
                    summary.failed += 1;
                    warn!(
                        "Accrual failed for subscription {}: {}",
                        item.subscription.id, e
                    );
                }
            }
        }
        Ok(summary)
    }
}
