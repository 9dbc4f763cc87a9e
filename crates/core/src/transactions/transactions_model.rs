//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, wallets, Error, Result};

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type: {other}"
            )))),
        }
    }
}

/// Review state of a transaction. New entries start `Pending` until an
/// operator settles or declines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Done,
    Declined,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Done => "done",
            TransactionStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "done" => Ok(TransactionStatus::Done),
            "declined" => Ok(TransactionStatus::Declined),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction status: {other}"
            )))),
        }
    }
}

/// Domain model representing a deposit into or withdrawal from a wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub wallet_id: String,
    pub transaction_type: TransactionType,
    /// Counterparty address supplied by the user; informational only.
    pub wallet_address: Option<String>,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wallet_id: String,
    pub transaction_type: TransactionType,
    pub wallet_address: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl NewTransaction {
    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        if self.wallet_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "wallet_id".to_string(),
            )));
        }
        wallets::validate_amount(self.amount)?;
        Ok(())
    }
}

/// Partial update for an existing transaction.
///
/// Settlement on a status change uses the stored type and amount, never the
/// values patched in the same request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub status: Option<TransactionStatus>,
    pub transaction_type: Option<TransactionType>,
    pub wallet_address: Option<String>,
    pub amount: Option<Decimal>,
}

impl TransactionUpdate {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            wallets::validate_amount(amount)?;
        }
        Ok(())
    }
}
