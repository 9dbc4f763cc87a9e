use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::{routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

pub mod auth;
pub mod plans;
pub mod profiles;
pub mod subscriptions;
pub mod transactions;
pub mod users;
pub mod wallets;

const REQUEST_TIMEOUT_SECS: u64 = 30;

async fn endpoints() -> Json<Vec<&'static str>> {
    Json(vec![
        "/api/v1/signup",
        "/api/v1/signin",
        "/api/v1/token/refresh",
        "/api/v1/users",
        "/api/v1/users/{id}",
        "/api/v1/user_profile",
        "/api/v1/user_profile/{id}",
        "/api/v1/wallets",
        "/api/v1/wallets/{id}",
        "/api/v1/investment",
        "/api/v1/investment/{id}",
        "/api/v1/investment_sub",
        "/api/v1/investment_sub/{id}",
        "/api/v1/transaction",
        "/api/v1/transaction/{id}",
    ])
}

fn cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!("Ignoring unparseable CV_CORS_ORIGIN {:?}", origin);
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/", get(endpoints))
        .merge(auth::router())
        .merge(users::router())
        .merge(profiles::router())
        .merge(wallets::router())
        .merge(plans::router())
        .merge(subscriptions::router())
        .merge(transactions::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
}
