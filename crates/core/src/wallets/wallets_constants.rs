//! Starter wallet seeds.

use super::wallets_model::WalletSeed;

pub const USDT_WALLET_TITLE: &str = "USDT(TRC20)";
pub const USDT_WALLET_ADDRESS: &str = "TTPJrqtrR5SipGs6dTkHd7hDRvpXp863id";

pub const BNB_WALLET_TITLE: &str = "BNB";
pub const BNB_WALLET_ADDRESS: &str = "0x26D096A992E08133c2fb13ec071D32e951853D45";

/// The wallets provisioned for every new user, in creation order.
pub fn default_wallet_seeds() -> Vec<WalletSeed> {
    vec![
        WalletSeed {
            title: USDT_WALLET_TITLE.to_string(),
            wallet_address: USDT_WALLET_ADDRESS.to_string(),
        },
        WalletSeed {
            title: BNB_WALLET_TITLE.to_string(),
            wallet_address: BNB_WALLET_ADDRESS.to_string(),
        },
    ]
}
