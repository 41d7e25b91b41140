//! HTTP-level integration tests for `/api/visited`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_landmark, delete_auth, get_auth, post_json_auth, put_json_auth, register,
};
use serde_json::json;
use sqlx::PgPool;

async fn log_visit(app: axum::Router, token: &str, body: serde_json::Value) -> axum::response::Response {
    post_json_auth(app, "/api/visited", token, body).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visit_defaults_visitor_and_rating(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let landmark = create_landmark(app.clone(), &token, "Hagia Sophia").await;

    let body = json!({ "landmark_id": landmark.to_string(), "visited_date": "2024-05-17" });
    let response = log_visit(app, &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["visitor_name"], "ayse");
    assert_eq!(json["rating"], 0);
    assert_eq!(json["landmark"]["name"], "Hagia Sophia");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visit_to_unknown_landmark_names_the_reference(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let body = json!({ "landmark_id": "X", "visited_date": "2024-05-17" });
    let response = log_visit(app, &token, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains('X'), "message should name the id: {message}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visit_without_date_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let landmark = create_landmark(app.clone(), &token, "Hagia Sophia").await;

    let response = log_visit(app, &token, json!({ "landmark_id": landmark })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Visit date is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_bounds_are_enforced(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let landmark = create_landmark(app.clone(), &token, "Hagia Sophia").await;

    for (rating, expected) in [
        (0, StatusCode::CREATED),
        (5, StatusCode::CREATED),
        (6, StatusCode::BAD_REQUEST),
        (-1, StatusCode::BAD_REQUEST),
    ] {
        let body = json!({
            "landmark_id": landmark,
            "visited_date": "2024-05-17",
            "rating": rating,
        });
        let response = log_visit(app.clone(), &token, body).await;
        assert_eq!(response.status(), expected, "rating {rating}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_day_and_rating(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let landmark = create_landmark(app.clone(), &token, "Hagia Sophia").await;

    for (date, rating) in [("2024-05-17T09:30:00Z", 4), ("2024-05-18", 2)] {
        let body = json!({ "landmark_id": landmark, "visited_date": date, "rating": rating });
        assert_eq!(log_visit(app.clone(), &token, body).await.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), "/api/visited?date=2024-05-17", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["rating"], 4);

    let response = get_auth(app.clone(), "/api/visited?rating=2", &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get_auth(app, "/api/visited", &token).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["rating"], 2, "most recent visit comes first");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_day_filter_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;

    let response = get_auth(app, "/api/visited?date=%2B262142-12-31", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visits_of_deleted_landmark_are_pruned_on_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let doomed = create_landmark(app.clone(), &token, "Doomed").await;
    let kept = create_landmark(app.clone(), &token, "Kept").await;

    let body = json!({ "landmark_id": doomed, "visited_date": "2024-05-17" });
    let response = log_visit(app.clone(), &token, body).await;
    let doomed_visit = body_json(response).await["id"].as_i64().unwrap();
    let body = json!({ "landmark_id": kept, "visited_date": "2024-05-17" });
    assert_eq!(log_visit(app.clone(), &token, body).await.status(), StatusCode::CREATED);

    let response = delete_auth(app.clone(), &format!("/api/landmarks/{doomed}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Still stored until the next listing.
    let uri = format!("/api/visited/{doomed_visit}");
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["landmark"].is_null());

    let response = get_auth(app.clone(), "/api/visited", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["landmark_id"], kept);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_visit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ayse").await;
    let landmark = create_landmark(app.clone(), &token, "Hagia Sophia").await;

    let body = json!({ "landmark_id": landmark, "visited_date": "2024-05-17", "rating": 3 });
    let id = body_json(log_visit(app.clone(), &token, body).await).await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/visited/{id}");

    let body = json!({ "rating": 0, "visitor_name": "  ", "notes": "crowded" });
    let response = put_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["rating"], 0);
    assert_eq!(json["visitor_name"], "ayse");
    assert_eq!(json["notes"], "crowded");

    let response = get_auth(app.clone(), &format!("/api/visited/landmark/{landmark}"), &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Visit record deleted");

    let response = get_auth(app, &format!("/api/visited/detail/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
