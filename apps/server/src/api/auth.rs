use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use coinvest_core::errors::{DatabaseError, Error};
use coinvest_core::users::NewUser;

use crate::auth::AuthError;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{
    RefreshRequest, RefreshResponse, SigninRequest, SigninResponse, SignupRequest, UserResponse,
};

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if payload.password.trim().is_empty() {
        return Err(ApiError::BadRequest("Password must not be empty".to_string()));
    }
    let password_hash = state.auth.hash_password(&payload.password)?;
    let new_user = NewUser {
        id: None,
        email: payload.email,
        password_hash,
        full_name: payload.full_name,
        is_staff: false,
        is_superuser: false,
    };
    let user = state.user_service.register_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn signin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    let user = match state.user_service.get_user_by_email(payload.email.trim()) {
        Ok(user) => user,
        // An unknown email reads the same as a bad password to the caller.
        Err(Error::Database(DatabaseError::NotFound(_))) => {
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };
    state.auth.verify_password(&payload.password, &user.password_hash)?;
    if !user.is_active {
        return Err(AuthError::InvalidCredentials.into());
    }
    let access_token = state.auth.issue_access_token(&user)?;
    let refresh_token = state.auth.issue_refresh_token(&user)?;
    Ok(Json(SigninResponse {
        access_token,
        refresh_token,
        user_id: user.id,
        is_superuser: user.is_superuser,
        profile_picture: user.profile_picture,
    }))
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = state.auth.decode_refresh_token(&payload.refresh_token)?;
    // Re-resolve the user so deactivated or deleted accounts stop refreshing
    // and flag changes reach the new access token.
    let user = match state.user_service.get_user(&claims.sub) {
        Ok(user) => user,
        Err(Error::Database(DatabaseError::NotFound(_))) => {
            return Err(AuthError::Unauthorized.into());
        }
        Err(e) => return Err(e.into()),
    };
    if !user.is_active {
        return Err(AuthError::Unauthorized.into());
    }
    let access_token = state.auth.issue_access_token(&user)?;
    Ok(Json(RefreshResponse { access_token }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/token/refresh", post(refresh))
}
