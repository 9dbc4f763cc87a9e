//! Investment plan domain models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::plans_constants::{DEFAULT_DAILY_RETURN_RATE, DEFAULT_DURATION_DAYS};
use crate::{errors::ValidationError, wallets, Error, Result};

/// Marketing tier of an investment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Basic,
    Standard,
    Regular,
    Premium,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Basic => "basic",
            PlanTier::Standard => "standard",
            PlanTier::Regular => "regular",
            PlanTier::Premium => "premium",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(PlanTier::Basic),
            "standard" => Ok(PlanTier::Standard),
            "regular" => Ok(PlanTier::Regular),
            "premium" => Ok(PlanTier::Premium),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown plan tier: {other}"
            )))),
        }
    }
}

/// Domain model for a fixed-term investment product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlan {
    pub id: String,
    pub tier: PlanTier,
    /// Percent of principal credited per accrual day.
    pub daily_return_rate: Decimal,
    /// Length of the accrual window in days.
    pub duration_days: i32,
    /// Inclusive lower bound for subscription amounts.
    pub minimum_amount: Decimal,
    /// Inclusive upper bound for subscription amounts.
    pub maximum_amount: Decimal,
}

/// Input model for creating an investment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestmentPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tier: PlanTier,
    #[serde(default = "default_daily_return_rate")]
    pub daily_return_rate: Decimal,
    #[serde(default = "default_duration_days")]
    pub duration_days: i32,
    pub minimum_amount: Decimal,
    pub maximum_amount: Decimal,
}

fn default_daily_return_rate() -> Decimal {
    DEFAULT_DAILY_RETURN_RATE
}

fn default_duration_days() -> i32 {
    DEFAULT_DURATION_DAYS
}

impl NewInvestmentPlan {
    /// Validates the new plan data.
    pub fn validate(&self) -> Result<()> {
        if self.daily_return_rate <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Daily return rate must be positive".to_string(),
            )));
        }
        if self.duration_days <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Duration must be at least one day".to_string(),
            )));
        }
        wallets::validate_amount(self.minimum_amount)?;
        wallets::validate_amount(self.maximum_amount)?;
        if self.maximum_amount < self.minimum_amount {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Maximum amount cannot be below minimum amount".to_string(),
            )));
        }
        Ok(())
    }
}
