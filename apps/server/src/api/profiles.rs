use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use coinvest_core::plans::PlanTier;
use coinvest_core::users::Profile;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{ProfileDashboard, SubscriptionResponse, TransactionResponse};

/// Assembles the full dashboard payload for one profile: the owning user,
/// their wallets, enriched transactions and subscriptions, and the balance
/// total across wallets.
fn build_dashboard(state: &AppState, profile: Profile) -> ApiResult<ProfileDashboard> {
    let user = state.user_service.get_user(&profile.user_id)?;
    let wallets = state.wallet_service.list_wallets_for_user(&profile.user_id)?;
    let transactions = state
        .transaction_service
        .list_transactions_for_user(&profile.user_id)?;
    let subscriptions = state
        .subscription_service
        .list_subscriptions_for_user(&profile.user_id)?;
    let total_wallet_balance = state.wallet_service.total_balance_for_user(&profile.user_id)?;

    let wallet_titles: HashMap<String, String> = wallets
        .iter()
        .map(|w| (w.id.clone(), w.title.clone()))
        .collect();
    let plan_tiers: HashMap<String, PlanTier> = state
        .plan_service
        .list_plans()?
        .into_iter()
        .map(|p| (p.id, p.tier))
        .collect();
    let user_name = user.full_name.clone();

    let transactions = transactions
        .into_iter()
        .map(|t| {
            let wallet_title = wallet_titles.get(&t.wallet_id).cloned();
            TransactionResponse::from_transaction(t, wallet_title, user_name.clone())
        })
        .collect();
    let investments = subscriptions
        .into_iter()
        .map(|s| {
            let wallet_title = wallet_titles.get(&s.wallet_id).cloned();
            let plan_tier = plan_tiers.get(&s.plan_id).copied();
            SubscriptionResponse::from_subscription(s, wallet_title, plan_tier)
        })
        .collect();

    Ok(ProfileDashboard {
        id: profile.id,
        user: user.into(),
        wallets: wallets.into_iter().map(Into::into).collect(),
        transactions,
        investments,
        total_wallet_balance,
    })
}

async fn list_profiles(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<ProfileDashboard>>> {
    let profiles = if auth_user.is_operator() {
        state.user_service.list_profiles()?
    } else {
        vec![state.user_service.get_profile_for_user(&auth_user.user_id)?]
    };
    let mut dashboards = Vec::with_capacity(profiles.len());
    for profile in profiles {
        dashboards.push(build_dashboard(&state, profile)?);
    }
    Ok(Json(dashboards))
}

async fn get_profile(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<ProfileDashboard>> {
    let profile = state.user_service.get_profile(&id)?;
    if !auth_user.can_access(&profile.user_id) {
        return Err(ApiError::Forbidden(
            "You may only view your own profile".to_string(),
        ));
    }
    Ok(Json(build_dashboard(&state, profile)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user_profile", get(list_profiles))
        .route("/user_profile/{id}", get(get_profile))
}
