//! Investment plan repository and service traits.

use async_trait::async_trait;

use super::plans_model::{InvestmentPlan, NewInvestmentPlan};
use crate::errors::Result;

/// Trait defining the contract for InvestmentPlan repository operations.
#[async_trait]
pub trait InvestmentPlanRepositoryTrait: Send + Sync {
    /// Creates a new plan.
    async fn create(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan>;

    /// Retrieves a plan by ID.
    fn get_by_id(&self, plan_id: &str) -> Result<InvestmentPlan>;

    /// Lists all plans.
    fn list(&self) -> Result<Vec<InvestmentPlan>>;
}

/// Trait defining the contract for InvestmentPlan service operations.
#[async_trait]
pub trait InvestmentPlanServiceTrait: Send + Sync {
    /// Creates a new plan with business validation.
    async fn create_plan(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan>;

    fn get_plan(&self, plan_id: &str) -> Result<InvestmentPlan>;

    fn list_plans(&self) -> Result<Vec<InvestmentPlan>>;
}
