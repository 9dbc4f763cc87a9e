use std::sync::Arc;

use super::plans_model::{InvestmentPlan, NewInvestmentPlan};
use super::plans_traits::{InvestmentPlanRepositoryTrait, InvestmentPlanServiceTrait};
use crate::errors::Result;

/// Service for managing investment plans.
pub struct InvestmentPlanService {
    repository: Arc<dyn InvestmentPlanRepositoryTrait>,
}

impl InvestmentPlanService {
    /// Creates a new InvestmentPlanService instance
    pub fn new(repository: Arc<dyn InvestmentPlanRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl InvestmentPlanServiceTrait for InvestmentPlanService {
    async fn create_plan(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan> {
        new_plan.validate()?;
        self.repository.create(new_plan).await
    }

    fn get_plan(&self, plan_id: &str) -> Result<InvestmentPlan> {
        self.repository.get_by_id(plan_id)
    }

    fn list_plans(&self) -> Result<Vec<InvestmentPlan>> {
        self.repository.list()
    }
}
