//! Database models for investment plans.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinvest_core::plans::{InvestmentPlan, NewInvestmentPlan, PlanTier};

use crate::wallets::parse_decimal_string_tolerant;

/// Database model for investment plans
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investment_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlanDB {
    pub id: String,
    pub tier: String,
    pub daily_return_rate: String,
    pub duration_days: i32,
    pub minimum_amount: String,
    pub maximum_amount: String,
}

// Conversion to domain models
impl From<InvestmentPlanDB> for InvestmentPlan {
    fn from(db: InvestmentPlanDB) -> Self {
        let tier = db.tier.parse().unwrap_or_else(|e| {
            log::error!("Unknown plan tier '{}' on plan {}: {}", db.tier, db.id, e);
            PlanTier::Basic
        });
        let daily_return_rate =
            parse_decimal_string_tolerant(&db.daily_return_rate, "daily_return_rate");
        let minimum_amount = parse_decimal_string_tolerant(&db.minimum_amount, "minimum_amount");
        let maximum_amount = parse_decimal_string_tolerant(&db.maximum_amount, "maximum_amount");
        Self {
            id: db.id,
            tier,
            daily_return_rate,
            duration_days: db.duration_days,
            minimum_amount,
            maximum_amount,
        }
    }
}

impl From<NewInvestmentPlan> for InvestmentPlanDB {
    fn from(domain: NewInvestmentPlan) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            tier: domain.tier.as_str().to_string(),
            daily_return_rate: domain.daily_return_rate.to_string(),
            duration_days: domain.duration_days,
            minimum_amount: domain.minimum_amount.to_string(),
            maximum_amount: domain.maximum_amount.to_string(),
        }
    }
}
