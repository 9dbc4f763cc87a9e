//! Coinvest Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the Coinvest platform:
//! users and their wallets, deposit/withdrawal transactions, investment
//! plans, and fixed-term subscriptions with daily return accrual.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod plans;
pub mod subscriptions;
pub mod transactions;
pub mod users;
pub mod wallets;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
