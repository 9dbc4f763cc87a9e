use std::sync::Arc;

use rust_decimal::Decimal;

use super::wallets_model::Wallet;
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::errors::Result;

/// Service for reading wallets and balances.
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
}

impl WalletService {
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl WalletServiceTrait for WalletService {
    fn get_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        self.repository.get_by_id(wallet_id)
    }

    fn get_wallet_for_user(&self, wallet_id: &str, user_id: &str) -> Result<Wallet> {
        self.repository.get_for_user(wallet_id, user_id)
    }

    fn list_wallets(&self) -> Result<Vec<Wallet>> {
        self.repository.list()
    }

    fn list_wallets_for_user(&self, user_id: &str) -> Result<Vec<Wallet>> {
        self.repository.list_for_user(user_id)
    }

    fn total_balance_for_user(&self, user_id: &str) -> Result<Decimal> {
        let wallets = self.repository.list_for_user(user_id)?;
        Ok(wallets.iter().map(|w| w.balance).sum())
    }
}
