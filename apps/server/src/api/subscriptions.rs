use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use coinvest_core::plans::PlanTier;
use coinvest_core::subscriptions::SubscriptionRequest;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::SubscriptionResponse;

async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let (subscriptions, wallets) = if auth_user.is_operator() {
        (
            state.subscription_service.list_subscriptions()?,
            state.wallet_service.list_wallets()?,
        )
    } else {
        (
            state
                .subscription_service
                .list_subscriptions_for_user(&auth_user.user_id)?,
            state.wallet_service.list_wallets_for_user(&auth_user.user_id)?,
        )
    };
    let wallet_titles: HashMap<String, String> = wallets
        .into_iter()
        .map(|w| (w.id, w.title))
        .collect();
    let plan_tiers: HashMap<String, PlanTier> = state
        .plan_service
        .list_plans()?
        .into_iter()
        .map(|p| (p.id, p.tier))
        .collect();
    let responses = subscriptions
        .into_iter()
        .map(|s| {
            let wallet_title = wallet_titles.get(&s.wallet_id).cloned();
            let plan_tier = plan_tiers.get(&s.plan_id).copied();
            SubscriptionResponse::from_subscription(s, wallet_title, plan_tier)
        })
        .collect();
    Ok(Json(responses))
}

async fn get_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<SubscriptionResponse>> {
    let subscription = state.subscription_service.get_subscription(&id)?;
    if !auth_user.can_access(&subscription.user_id) {
        return Err(ApiError::Forbidden(
            "You may only view your own subscriptions".to_string(),
        ));
    }
    let wallet = state.wallet_service.get_wallet(&subscription.wallet_id)?;
    let plan = state.plan_service.get_plan(&subscription.plan_id)?;
    Ok(Json(SubscriptionResponse::from_subscription(
        subscription,
        Some(wallet.title),
        Some(plan.tier),
    )))
}

async fn subscribe(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Json(request): Json<SubscriptionRequest>,
) -> ApiResult<(StatusCode, Json<SubscriptionResponse>)> {
    let subscription = state
        .subscription_service
        .subscribe(&auth_user.user_id, request)
        .await?;
    let wallet = state.wallet_service.get_wallet(&subscription.wallet_id)?;
    let plan = state.plan_service.get_plan(&subscription.plan_id)?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from_subscription(
            subscription,
            Some(wallet.title),
            Some(plan.tier),
        )),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investment_sub", get(list_subscriptions).post(subscribe))
        .route("/investment_sub/{id}", get(get_subscription))
}
