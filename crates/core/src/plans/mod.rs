//! Investment plans module - domain models, services, and traits.

mod plans_constants;
mod plans_model;
mod plans_service;
mod plans_traits;


// Re-export the public interface
pub use plans_constants::*;
pub use plans_model::{InvestmentPlan, NewInvestmentPlan, PlanTier};
pub use plans_service::InvestmentPlanService;
pub use plans_traits::{InvestmentPlanRepositoryTrait, InvestmentPlanServiceTrait};
