//! SQLite storage implementation for wallets.

mod model;
mod repository;

pub(crate) use model::parse_decimal_string_tolerant;
pub(crate) use repository::apply_balance_effect;

pub use model::WalletDB;
pub use repository::WalletRepository;
