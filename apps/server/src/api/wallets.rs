use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::WalletResponse;

async fn list_wallets(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<WalletResponse>>> {
    let wallets = if auth_user.is_operator() {
        state.wallet_service.list_wallets()?
    } else {
        state.wallet_service.list_wallets_for_user(&auth_user.user_id)?
    };
    Ok(Json(wallets.into_iter().map(Into::into).collect()))
}

async fn get_wallet(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<WalletResponse>> {
    // Non-operators resolve through the ownership-scoped lookup, so a
    // foreign wallet id reads as absent rather than forbidden.
    let wallet = if auth_user.is_operator() {
        state.wallet_service.get_wallet(&id)?
    } else {
        state
            .wallet_service
            .get_wallet_for_user(&id, &auth_user.user_id)?
    };
    Ok(Json(wallet.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallets", get(list_wallets))
        .route("/wallets/{id}", get(get_wallet))
}
