#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use waymark_api::auth::jwt::JwtConfig;
use waymark_api::config::{LogFormat, ServerConfig};
use waymark_api::router::build_app_router;
use waymark_api::state::AppState;

pub const TEST_PASSWORD: &str = "hunter22";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            expiry_days: 30,
        },
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Send one request through the app.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Register `username` through the API and return its token.
pub async fn register(app: Router, username: &str) -> String {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("register should return a token")
        .to_string()
}

/// Create a landmark and return its id.
pub async fn create_landmark(app: Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "location": { "latitude": "41.0082", "longitude": "28.9784" },
        "category": "historical",
    });
    let response = post_json_auth(app, "/api/landmarks", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"]
        .as_i64()
        .expect("landmark id")
}

/// Create a plan over `landmark_ids` and return its id.
pub async fn create_plan(app: Router, token: &str, name: &str, landmark_ids: &[i64]) -> i64 {
    let landmarks: Vec<Value> = landmark_ids
        .iter()
        .map(|id| serde_json::json!({ "landmark_id": id.to_string(), "notes": "" }))
        .collect();
    let body = serde_json::json!({ "name": name, "landmarks": landmarks });
    let response = post_json_auth(app, "/api/visitplans", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("plan id")
}
