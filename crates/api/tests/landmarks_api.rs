//! HTTP-level integration tests for `/api/landmarks`, including the cascade
//! from a deleted landmark to the plans that reference it.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_landmark, create_plan, delete_auth, get, get_auth, post_json_auth,
    put_json_auth, register,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn landmarks_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/landmarks").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let body = json!({
        "name": "  Galata Tower ",
        "location": { "latitude": "41.0256", "longitude": "28.9741" },
    });
    let response = post_json_auth(app, "/api/landmarks", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Galata Tower");
    assert_eq!(json["location"]["latitude"], "41.0256");
    assert_eq!(json["description"], "");
    assert_eq!(json["category"], "other");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_name_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let body = json!({ "location": { "latitude": "1", "longitude": "2" } });
    let response = post_json_auth(app, "/api/landmarks", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_out_of_range_latitude(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let body = json!({
        "name": "Nowhere",
        "location": { "latitude": "91", "longitude": "0" },
    });
    let response = post_json_auth(app, "/api/landmarks", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_users_landmark_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register(app.clone(), "owner").await;
    let intruder = register(app.clone(), "intruder").await;
    let id = create_landmark(app.clone(), &owner, "Private spot").await;

    let uri = format!("/api/landmarks/{id}");
    let response = get_auth(app.clone(), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_name_and_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    create_landmark(app.clone(), &token, "Blue Mosque").await;
    create_landmark(app.clone(), &token, "Basilica Cistern").await;

    let response = get_auth(app.clone(), "/api/landmarks?name=mosque", &token).await;
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blue Mosque"]);

    let response = get_auth(app.clone(), "/api/landmarks?category=natural", &token).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    let response = get_auth(app, "/api/landmarks?category=volcanic", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_only_supplied_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let id = create_landmark(app.clone(), &token, "Old name").await;

    let uri = format!("/api/landmarks/{id}");
    let body = json!({ "description": "Now with notes", "location": { "longitude": "29.0" } });
    let response = put_json_auth(app, &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Old name");
    assert_eq!(json["description"], "Now with notes");
    assert_eq!(json["location"]["latitude"], "41.0082");
    assert_eq!(json["location"]["longitude"], "29.0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_referencing_plans(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let doomed = create_landmark(app.clone(), &token, "Doomed").await;
    let kept = create_landmark(app.clone(), &token, "Kept").await;

    create_plan(app.clone(), &token, "Both", &[kept, doomed]).await;
    create_plan(app.clone(), &token, "Only doomed", &[doomed]).await;
    let survivor = create_plan(app.clone(), &token, "Only kept", &[kept]).await;

    let uri = format!("/api/landmarks/{doomed}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Landmark deleted");
    assert_eq!(json["deleted_plans"], 2);

    let response = get_auth(app.clone(), "/api/visitplans", &token).await;
    let plans = body_json(response).await;
    let ids: Vec<i64> = plans
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![survivor]);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unreferenced_landmark_reports_zero_plans(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let id = create_landmark(app.clone(), &token, "Lonely").await;

    let response = delete_auth(app, &format!("/api/landmarks/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted_plans"], 0);
}
