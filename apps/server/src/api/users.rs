use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use coinvest_core::users::UserUpdate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{UserResponse, UserUpdateRequest};

async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth_user: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users()?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    _auth_user: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&id)?;
    Ok(Json(user.into()))
}

async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Json(payload): Json<UserUpdateRequest>,
) -> ApiResult<Json<UserResponse>> {
    if !auth_user.can_access(&id) {
        return Err(ApiError::Forbidden(
            "You may only modify your own account".to_string(),
        ));
    }
    let mut update = UserUpdate {
        email: payload.email,
        password_hash: None,
        full_name: payload.full_name,
        profile_picture: payload.profile_picture,
        is_active: payload.is_active,
        is_staff: payload.is_staff,
        is_superuser: payload.is_superuser,
    };
    if !auth_user.is_operator() {
        // Activation and privilege flags are operator-only. A self-update
        // must not escalate its own account.
        update.is_active = None;
        update.is_staff = None;
        update.is_superuser = None;
    }
    if let Some(password) = payload.password.as_deref().filter(|p| !p.trim().is_empty()) {
        update.password_hash = Some(state.auth.hash_password(password)?);
    }
    let user = state.user_service.update_user(&id, update).await?;
    Ok(Json(user.into()))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> ApiResult<StatusCode> {
    if !auth_user.can_access(&id) {
        return Err(ApiError::Forbidden(
            "You may only delete your own account".to_string(),
        ));
    }
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(list_users)).route(
        "/users/{id}",
        get(get_user)
            .put(update_user)
            .patch(update_user)
            .delete(delete_user),
    )
}
