use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use coinvest_core::plans::{InvestmentPlan, InvestmentPlanRepositoryTrait, NewInvestmentPlan};
use coinvest_core::Result;

use super::model::InvestmentPlanDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investment_plans;
use crate::schema::investment_plans::dsl::*;

/// Repository for managing investment plan data in the database
pub struct InvestmentPlanRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InvestmentPlanRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        InvestmentPlanRepository { pool, writer }
    }
}

#[async_trait]
impl InvestmentPlanRepositoryTrait for InvestmentPlanRepository {
    async fn create(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan> {
        self.writer
            .exec(move |conn| {
                let mut plan_db: InvestmentPlanDB = new_plan.into();
                if plan_db.id.is_empty() {
                    plan_db.id = Uuid::new_v4().to_string();
                }

                diesel::insert_into(investment_plans::table)
                    .values(&plan_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(plan_db.into())
            })
            .await
    }

    fn get_by_id(&self, plan_id: &str) -> Result<InvestmentPlan> {
        let mut conn = get_connection(&self.pool)?;

        let plan_db = investment_plans
            .select(InvestmentPlanDB::as_select())
            .find(plan_id)
            .first::<InvestmentPlanDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(plan_db.into())
    }

    fn list(&self) -> Result<Vec<InvestmentPlan>> {
        let mut conn = get_connection(&self.pool)?;

        let results = investment_plans
            .select(InvestmentPlanDB::as_select())
            .load::<InvestmentPlanDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(InvestmentPlan::from).collect())
    }
}
