use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use coinvest_core::plans::NewInvestmentPlan;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::InvestmentPlanResponse;

// Plan routes are unauthenticated: the catalogue is the public face of the
// platform and is shown to visitors before they sign up.

async fn list_plans(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<InvestmentPlanResponse>>> {
    let plans = state.plan_service.list_plans()?;
    Ok(Json(plans.into_iter().map(Into::into).collect()))
}

async fn get_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<InvestmentPlanResponse>> {
    let plan = state.plan_service.get_plan(&id)?;
    Ok(Json(plan.into()))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(new_plan): Json<NewInvestmentPlan>,
) -> ApiResult<(StatusCode, Json<InvestmentPlanResponse>)> {
    let plan = state.plan_service.create_plan(new_plan).await?;
    Ok((StatusCode::CREATED, Json(plan.into())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investment", get(list_plans).post(create_plan))
        .route("/investment/{id}", get(get_plan))
}
