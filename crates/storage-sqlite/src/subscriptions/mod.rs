//! SQLite storage implementation for investment subscriptions.

mod model;
mod repository;

pub use model::SubscriptionDB;
pub use repository::SubscriptionRepository;
