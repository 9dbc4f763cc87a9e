use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use rand::{rngs::OsRng, RngCore};
use tempfile::TempDir;
use tower::ServiceExt;

use coinvest_server::{api::app_router, build_state, config::Config};

async fn build_test_router() -> (axum::Router, TempDir) {
    let data_dir = tempfile::tempdir().unwrap();
    std::env::set_var("CV_DATA_DIR", data_dir.path());

    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);
    let secret: String = secret_bytes.iter().map(|b| format!("{b:02x}")).collect();
    std::env::set_var("CV_SECRET_KEY", secret);

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), data_dir)
}

fn cleanup_env() {
    for key in ["CV_DATA_DIR", "CV_SECRET_KEY"] {
        std::env::remove_var(key);
    }
}

#[tokio::test]
async fn signup_signin_and_refresh_flow() {
    let (app, _data_dir) = build_test_router().await;

    // Unauthorized request should fail
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Sign up a new account
    let signup_body = serde_json::json!({
        "email": "ada@example.com",
        "password": "super-secret",
        "fullName": "Ada Lovelace",
    });
    let signup_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(signup_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(signup_response.status(), 201);
    let signup_bytes = to_bytes(signup_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let signup_json: serde_json::Value = serde_json::from_slice(&signup_bytes).unwrap();
    assert_eq!(signup_json["email"], "ada@example.com");
    assert_eq!(signup_json["isSuperuser"], false);
    // The stored hash must never serialize into a response.
    assert!(signup_json.get("passwordHash").is_none());

    // Wrong password is rejected without detail
    let bad_signin = serde_json::json!({
        "email": "ada@example.com",
        "password": "wrong",
    });
    let bad_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/signin")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bad_signin.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad_response.status(), 401);

    // Sign in with the right password
    let signin_body = serde_json::json!({
        "email": "ada@example.com",
        "password": "super-secret",
    });
    let signin_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/signin")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(signin_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(signin_response.status(), 200);
    let signin_bytes = to_bytes(signin_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let signin_json: serde_json::Value = serde_json::from_slice(&signin_bytes).unwrap();
    let access_token = signin_json["accessToken"].as_str().unwrap();
    let refresh_token = signin_json["refreshToken"].as_str().unwrap();
    assert_eq!(signin_json["userId"], signup_json["id"]);
    assert_eq!(signin_json["isSuperuser"], false);

    // Access with the token succeeds
    let authed_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(authed_response.status(), 200);

    // A refresh token is not an access token
    let confused_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .header(header::AUTHORIZATION, format!("Bearer {refresh_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(confused_response.status(), 401);

    // Refresh mints a fresh access token
    let refresh_body = serde_json::json!({ "refreshToken": refresh_token });
    let refresh_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/token/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(refresh_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(refresh_response.status(), 200);
    let refresh_bytes = to_bytes(refresh_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let refresh_json: serde_json::Value = serde_json::from_slice(&refresh_bytes).unwrap();
    let refreshed_access = refresh_json["accessToken"].as_str().unwrap();

    let refreshed_response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .header(header::AUTHORIZATION, format!("Bearer {refreshed_access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(refreshed_response.status(), 200);

    cleanup_env();
}
