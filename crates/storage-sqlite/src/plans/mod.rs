//! SQLite storage implementation for investment plans.

mod model;
mod repository;

pub use model::InvestmentPlanDB;
pub use repository::InvestmentPlanRepository;
