//! HTTP-level integration tests for `/api/visitplans`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_landmark, create_plan, delete_auth, get_auth, post_json_auth,
    put_json_auth, register,
};
use serde_json::json;
use sqlx::PgPool;
use waymark_db::repositories::LandmarkRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_keeps_entry_order_and_notes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let first = create_landmark(app.clone(), &token, "First").await;
    let second = create_landmark(app.clone(), &token, "Second").await;

    let body = json!({
        "name": "Old town walk",
        "planned_date": "2024-06-01",
        "landmarks": [
            { "landmark_id": second, "notes": "start here" },
            { "landmark_id": first.to_string() },
        ],
        "overall_notes": "bring water",
    });
    let response = post_json_auth(app, "/api/visitplans", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Old town walk");
    assert_eq!(json["overall_notes"], "bring water");
    assert_eq!(json["landmarks"][0]["landmark_id"], second);
    assert_eq!(json["landmarks"][0]["notes"], "start here");
    assert_eq!(json["landmarks"][0]["landmark"]["name"], "Second");
    assert_eq!(json["landmarks"][1]["landmark_id"], first);
    assert_eq!(json["landmarks"][1]["notes"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_landmarks_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let body = json!({ "name": "Empty", "landmarks": [] });
    let response = post_json_auth(app, "/api/visitplans", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Please provide a name and at least one landmark"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_landmark_fails_whole_plan(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let real = create_landmark(app.clone(), &token, "Real").await;

    let body = json!({
        "name": "Half real",
        "landmarks": [{ "landmark_id": real }, { "landmark_id": "X" }],
    });
    let response = post_json_auth(app.clone(), "/api/visitplans", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains('X'));

    let response = get_auth(app, "/api/visitplans", &token).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn plan_cannot_use_another_users_landmark(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register(app.clone(), "owner").await;
    let other = register(app.clone(), "other").await;
    let foreign = create_landmark(app.clone(), &owner, "Not yours").await;

    let body = json!({ "name": "Sneaky", "landmarks": [{ "landmark_id": foreign }] });
    let response = post_json_auth(app, "/api/visitplans", &other, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_entries(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let a = create_landmark(app.clone(), &token, "A").await;
    let b = create_landmark(app.clone(), &token, "B").await;
    let id = create_plan(app.clone(), &token, "Plan", &[a]).await;

    let uri = format!("/api/visitplans/{id}");
    let body = json!({
        "name": "Renamed",
        "landmarks": [{ "landmark_id": b, "notes": "only b" }],
    });
    let response = put_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["landmarks"].as_array().unwrap().len(), 1);
    assert_eq!(json["landmarks"][0]["landmark_id"], b);

    let body = json!({ "overall_notes": "no entry change" });
    let response = put_json_auth(app, &uri, &token, body).await;
    let json = body_json(response).await;
    assert_eq!(json["landmarks"][0]["notes"], "only b");
    assert_eq!(json["overall_notes"], "no entry change");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_plan_then_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let a = create_landmark(app.clone(), &token, "A").await;
    let id = create_plan(app.clone(), &token, "Plan", &[a]).await;

    let uri = format!("/api/visitplans/{id}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Visit plan deleted");

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn plans_left_behind_by_a_raw_landmark_delete_are_cleaned_up(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register(app.clone(), "ayse").await;
    let gone = create_landmark(app.clone(), &token, "Gone").await;
    let kept = create_landmark(app.clone(), &token, "Kept").await;
    let edited = create_plan(app.clone(), &token, "Edited", &[gone, kept]).await;
    let untouched = create_plan(app.clone(), &token, "Untouched", &[gone, kept]).await;

    let me = body_json(get_auth(app.clone(), "/api/auth/me", &token).await).await;
    let user_id = me["user"]["id"].as_i64().unwrap();

    // Straight to the table, so no cascade runs.
    assert!(LandmarkRepo::delete(&pool, user_id, gone).await.unwrap());

    // An update without `landmarks` drops the dangling entry and keeps the plan.
    let uri = format!("/api/visitplans/{edited}");
    let response = put_json_auth(app.clone(), &uri, &token, json!({ "name": "Edited again" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["landmarks"].as_array().unwrap().len(), 1);
    assert_eq!(json["landmarks"][0]["landmark_id"], kept);

    // Listing removes the plan that still points at the deleted landmark.
    let response = get_auth(app.clone(), "/api/visitplans", &token).await;
    let plans = body_json(response).await;
    let ids: Vec<i64> = plans
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![edited]);

    let response = get_auth(app, &format!("/api/visitplans/{untouched}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
