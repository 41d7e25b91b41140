//! HTTP-level integration tests for the `/api/auth` endpoints.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_auth, post_json, register, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_token_and_sets_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "ayse", "email": "ayse@test.com", "password": TEST_PASSWORD });

    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("register must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["username"], "ayse");
    assert_eq!(json["user"]["email"], "ayse@test.com");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "ayse", "email": "ayse@test.com", "password": "abc" });

    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "ayse").await;

    let body = json!({ "username": "other", "email": "ayse@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "Email is already registered");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_correct_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "ayse").await;

    let body = json!({ "email": "ayse@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_some());
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["username"], "ayse");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "ayse").await;

    let body = json!({ "email": "ayse@test.com", "password": "not-the-password" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Incorrect email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_unknown_email_looks_like_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "nobody@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Incorrect email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_without_password_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/auth/login", json!({ "email": "a@test.com" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Please provide email and password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_rejects_a_forged_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Unauthorized access");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_accepts_the_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/me")
        .header(COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["username"], "ayse");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_expires_the_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/auth/logout").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Logged out successfully");
}
