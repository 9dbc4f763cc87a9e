//! Wallet repository and service traits.
//!
//! There is deliberately no balance mutation on these traits: balances move
//! only inside the atomic storage operations of the transaction, subscription
//! origination, and settlement flows.

use rust_decimal::Decimal;

use super::wallets_model::Wallet;
use crate::errors::Result;

/// Trait defining the contract for Wallet repository operations.
pub trait WalletRepositoryTrait: Send + Sync {
    /// Retrieves a wallet by its ID.
    fn get_by_id(&self, wallet_id: &str) -> Result<Wallet>;

    /// Resolves a wallet only when it belongs to `user_id`.
    ///
    /// A wallet that exists but belongs to someone else reads as not found.
    fn get_for_user(&self, wallet_id: &str, user_id: &str) -> Result<Wallet>;

    /// Lists all wallets across users.
    fn list(&self) -> Result<Vec<Wallet>>;

    /// Lists the wallets owned by `user_id`.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Wallet>>;
}

/// Trait defining the contract for Wallet service operations.
pub trait WalletServiceTrait: Send + Sync {
    fn get_wallet(&self, wallet_id: &str) -> Result<Wallet>;

    fn get_wallet_for_user(&self, wallet_id: &str, user_id: &str) -> Result<Wallet>;

    fn list_wallets(&self) -> Result<Vec<Wallet>>;

    fn list_wallets_for_user(&self, user_id: &str) -> Result<Vec<Wallet>>;

    /// Sum of the user's wallet balances.
    fn total_balance_for_user(&self, user_id: &str) -> Result<Decimal>;
}
