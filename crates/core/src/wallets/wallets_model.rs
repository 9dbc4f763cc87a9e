//! Wallet domain models and the balance-change contract.

use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MONEY_SCALE;
use crate::errors::LedgerError;

/// Domain model representing a user's wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// Opaque display string; nothing on-chain is derived from it.
    pub wallet_address: String,
    pub balance: Decimal,
}

/// Title/address pair used when provisioning wallets for a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSeed {
    pub title: String,
    pub wallet_address: String,
}

/// Balance change applied atomically together with a ledger write.
///
/// `Debit` fails inside the storage transaction when the wallet lacks funds.
/// `ForcedDebit` applies regardless and may drive the balance negative; the
/// operator approval flow uses it to settle a withdrawal at its originally
/// promised amount.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceEffect {
    None,
    Credit(Decimal),
    Debit(Decimal),
    ForcedDebit(Decimal),
}

impl BalanceEffect {
    /// True when applying the effect leaves the balance untouched.
    pub fn is_noop(&self) -> bool {
        match self {
            BalanceEffect::None => true,
            BalanceEffect::Credit(amount)
            | BalanceEffect::Debit(amount)
            | BalanceEffect::ForcedDebit(amount) => amount.is_zero(),
        }
    }
}

/// Validates a monetary amount: strictly positive, at most [`MONEY_SCALE`]
/// decimal places.
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be greater than zero, got {amount}"
        )));
    }
    if amount.scale() > MONEY_SCALE {
        return Err(LedgerError::InvalidAmount(format!(
            "amount supports at most {MONEY_SCALE} decimal places, got {amount}"
        )));
    }
    Ok(())
}
