//! Transactions module - deposits, withdrawals, and their settlement rules.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_service_tests;

// Re-export the public interface
pub use transactions_model::{
    NewTransaction, Transaction, TransactionStatus, TransactionType, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
