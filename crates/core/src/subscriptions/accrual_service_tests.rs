#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::plans::{InvestmentPlan, PlanTier};
    use crate::subscriptions::subscriptions_model::*;
    use crate::subscriptions::{AccrualService, AccrualServiceTrait, SubscriptionRepositoryTrait};
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    // --- Mock SubscriptionRepository backed by in-memory rows ---
    #[derive(Clone, Default)]
    struct MockSubscriptionRepository {
        rows: Arc<Mutex<Vec<OpenSubscription>>>,
        fail_ids: Arc<Mutex<HashSet<String>>>,
        credited: Arc<Mutex<Vec<(String, Decimal)>>>,
    }

    impl MockSubscriptionRepository {
        fn add(&self, open: OpenSubscription) {
            self.rows.lock().unwrap().push(open);
        }

        fn fail_on(&self, subscription_id: &str) {
            self.fail_ids
                .lock()
                .unwrap()
                .insert(subscription_id.to_string());
        }

        fn row(&self, subscription_id: &str) -> Subscription {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.subscription.id == subscription_id)
                .map(|o| o.subscription.clone())
                .unwrap()
        }
    }

    #[async_trait]
    impl SubscriptionRepositoryTrait for MockSubscriptionRepository {
        async fn originate(&self, _new_subscription: NewSubscription) -> Result<Subscription> {
            unimplemented!()
        }

        async fn apply_accrual(
            &self,
            subscription_id: &str,
            amount: Decimal,
            on: NaiveDate,
        ) -> Result<bool> {
            if self.fail_ids.lock().unwrap().contains(subscription_id) {
                return Err(Error::Unexpected("storage exploded".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let open = rows
                .iter_mut()
                .find(|o| o.subscription.id == subscription_id)
                .unwrap();
            if matches!(open.subscription.last_accrued_on, Some(prev) if prev >= on) {
                return Ok(false);
            }
            open.subscription.total_return += amount;
            open.subscription.last_accrued_on = Some(on);
            Ok(true)
        }

        async fn settle(
            &self,
            subscription_id: &str,
            at: NaiveDateTime,
        ) -> Result<Option<Decimal>> {
            if self.fail_ids.lock().unwrap().contains(subscription_id) {
                return Err(Error::Unexpected("storage exploded".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let open = rows
                .iter_mut()
                .find(|o| o.subscription.id == subscription_id)
                .unwrap();
            if open.subscription.settled_at.is_some() {
                return Ok(None);
            }
            open.subscription.settled_at = Some(at);
            let credited = open.subscription.total_return;
            self.credited
                .lock()
                .unwrap()
                .push((subscription_id.to_string(), credited));
            Ok(Some(credited))
        }

        fn get_by_id(&self, _subscription_id: &str) -> Result<Subscription> {
            unimplemented!()
        }

        fn list(&self) -> Result<Vec<Subscription>> {
            unimplemented!()
        }

        fn list_for_user(&self, _user_id: &str) -> Result<Vec<Subscription>> {
            unimplemented!()
        }

        fn list_open(&self) -> Result<Vec<OpenSubscription>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.subscription.settled_at.is_none())
                .cloned()
                .collect())
        }
    }

    fn plan(daily_return_rate: Decimal, duration_days: i32) -> InvestmentPlan {
        InvestmentPlan {
            id: "plan-1".to_string(),
            tier: PlanTier::Standard,
            daily_return_rate,
            duration_days,
            minimum_amount: dec!(100),
            maximum_amount: dec!(100000),
        }
    }

    fn open_subscription(id: &str, amount: Decimal, days_ago: i64, plan: InvestmentPlan) -> OpenSubscription {
        let subscribed_at = Utc::now().naive_utc() - Duration::days(days_ago);
        OpenSubscription {
            subscription: Subscription {
                id: id.to_string(),
                user_id: "user-1".to_string(),
                wallet_id: "wallet-1".to_string(),
                plan_id: plan.id.clone(),
                amount,
                total_return: Decimal::ZERO,
                subscribed_at,
                end_date: subscribed_at + Duration::days(30),
                last_accrued_on: None,
                settled_at: None,
            },
            plan,
        }
    }

    #[tokio::test]
    async fn daily_return_is_principal_times_rate_percent() {
        let repository = Arc::new(MockSubscriptionRepository::default());
        repository.add(open_subscription("sub-1", dec!(1000), 1, plan(dec!(10), 30)));
        let service = AccrualService::new(repository.clone());

        let summary = service.run_cycle().await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.accrued, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(repository.row("sub-1").total_return, dec!(100.00));
    }

    #[tokio::test]
    async fn accrual_amount_is_money_rounded() {
        let repository = Arc::new(MockSubscriptionRepository::default());
        repository.add(open_subscription("sub-1", dec!(333.33), 1, plan(dec!(10), 30)));
        let service = AccrualService::new(repository.clone());

        service.run_cycle().await.unwrap();
        assert_eq!(repository.row("sub-1").total_return, dec!(33.33));
    }

    #[tokio::test]
    async fn second_cycle_on_the_same_day_accrues_nothing() {
        let repository = Arc::new(MockSubscriptionRepository::default());
        repository.add(open_subscription("sub-1", dec!(1000), 1, plan(dec!(10), 30)));
        let service = AccrualService::new(repository.clone());

        service.run_cycle().await.unwrap();
        let summary = service.run_cycle().await.unwrap();
        assert_eq!(summary.accrued, 0);
        assert_eq!(repository.row("sub-1").total_return, dec!(100.00));
    }

    #[tokio::test]
    async fn freshly_originated_subscription_accrues_on_day_zero() {
        let repository = Arc::new(MockSubscriptionRepository::default());
        repository.add(open_subscription("sub-1", dec!(1000), 0, plan(dec!(10), 30)));
        let service = AccrualService::new(repository.clone());

        let summary = service.run_cycle().await.unwrap();
        assert_eq!(summary.accrued, 1);
    }

    #[tokio::test]
    async fn matured_subscription_settles_exactly_once() {
        let repository = Arc::new(MockSubscriptionRepository::default());
        let mut open = open_subscription("sub-1", dec!(1000), 31, plan(dec!(10), 30));
        open.subscription.total_return = dec!(3000);
        repository.add(open);
        let service = AccrualService::new(repository.clone());

        let summary = service.run_cycle().await.unwrap();
        assert_eq!(summary.matured, 1);
        {
            let credited = repository.credited.lock().unwrap();
            assert_eq!(*credited, vec![("sub-1".to_string(), dec!(3000))]);
        }
        assert!(repository.row("sub-1").settled_at.is_some());

        // A settled subscription no longer shows up in the open set.
        let summary = service.run_cycle().await.unwrap();
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.matured, 0);
        assert_eq!(repository.credited.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failure_on_one_subscription_does_not_stop_the_cycle() {
        let repository = Arc::new(MockSubscriptionRepository::default());
        repository.add(open_subscription("sub-bad", dec!(1000), 1, plan(dec!(10), 30)));
        repository.add(open_subscription("sub-good", dec!(500), 1, plan(dec!(10), 30)));
        repository.fail_on("sub-bad");
        let service = AccrualService::new(repository.clone());

        let summary = service.run_cycle().await.unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.accrued, 1);
        assert_eq!(repository.row("sub-good").total_return, dec!(50.00));
    }
}
