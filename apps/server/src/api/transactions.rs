use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use coinvest_core::transactions::{NewTransaction, Transaction, TransactionUpdate};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::TransactionResponse;

fn enrich(state: &AppState, transaction: Transaction) -> ApiResult<TransactionResponse> {
    let wallet = state.wallet_service.get_wallet(&transaction.wallet_id)?;
    let user = state.user_service.get_user(&transaction.user_id)?;
    Ok(TransactionResponse::from_transaction(
        transaction,
        Some(wallet.title),
        user.full_name,
    ))
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let (transactions, wallets, users) = if auth_user.is_operator() {
        (
            state.transaction_service.list_transactions()?,
            state.wallet_service.list_wallets()?,
            state.user_service.list_users()?,
        )
    } else {
        (
            state
                .transaction_service
                .list_transactions_for_user(&auth_user.user_id)?,
            state.wallet_service.list_wallets_for_user(&auth_user.user_id)?,
            vec![state.user_service.get_user(&auth_user.user_id)?],
        )
    };
    let wallet_titles: HashMap<String, String> = wallets
        .into_iter()
        .map(|w| (w.id, w.title))
        .collect();
    let user_names: HashMap<String, Option<String>> = users
        .into_iter()
        .map(|u| (u.id, u.full_name))
        .collect();
    let responses = transactions
        .into_iter()
        .map(|t| {
            let wallet_title = wallet_titles.get(&t.wallet_id).cloned();
            let user_name = user_names.get(&t.user_id).cloned().flatten();
            TransactionResponse::from_transaction(t, wallet_title, user_name)
        })
        .collect();
    Ok(Json(responses))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&auth_user.user_id, new_transaction)
        .await?;
    let response = enrich(&state, transaction)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<Json<TransactionResponse>> {
    let transaction = state.transaction_service.get_transaction(&id)?;
    if !auth_user.can_access(&transaction.user_id) {
        return Err(ApiError::Forbidden(
            "You may only view your own transactions".to_string(),
        ));
    }
    Ok(Json(enrich(&state, transaction)?))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Json(update): Json<TransactionUpdate>,
) -> ApiResult<Json<TransactionResponse>> {
    let existing = state.transaction_service.get_transaction(&id)?;
    if !auth_user.can_access(&existing.user_id) {
        return Err(ApiError::Forbidden(
            "You may only modify your own transactions".to_string(),
        ));
    }
    let transaction = state.transaction_service.update_transaction(&id, update).await?;
    Ok(Json(enrich(&state, transaction)?))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<StatusCode> {
    let existing = state.transaction_service.get_transaction(&id)?;
    if !auth_user.can_access(&existing.user_id) {
        return Err(ApiError::Forbidden(
            "You may only delete your own transactions".to_string(),
        ));
    }
    state.transaction_service.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transaction",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transaction/{id}",
            get(get_transaction)
                .put(update_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
}
