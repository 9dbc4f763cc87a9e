//! Subscription constants.

/// Fixed payout term: a subscription's end date is always this many days
/// after it is taken out, independent of the plan's accrual window.
pub const SUBSCRIPTION_TERM_DAYS: i64 = 30;
