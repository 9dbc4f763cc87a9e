//! Subscriptions module - origination, daily accrual, and settlement.

mod accrual_service;
mod subscriptions_constants;
mod subscriptions_model;
mod subscriptions_service;
mod subscriptions_traits;

#[cfg(test)]
mod accrual_service_tests;


// Re-export the public interface
pub use accrual_service::AccrualService;
pub use subscriptions_constants::*;
pub use subscriptions_model::{
    AccrualCycleSummary, AccrualOutcome, NewSubscription, OpenSubscription, Subscription,
    SubscriptionRequest,
};
pub use subscriptions_service::SubscriptionService;
pub use subscriptions_traits::{
    AccrualServiceTrait, SubscriptionRepositoryTrait, SubscriptionServiceTrait,
};
