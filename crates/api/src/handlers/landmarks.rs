//! Handlers for the `/landmarks` resource.
//!
//! All endpoints require authentication and only ever see the caller's rows.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use waymark_core::error::CoreError;
use waymark_core::landmark::{
    resolve_category, validate_category, validate_coordinate, validate_landmark_name, Axis,
};
use waymark_core::search::non_blank;
use waymark_core::types::DbId;
use waymark_db::models::landmark::{CreateLandmark, Landmark, LandmarkFilter, UpdateLandmark};
use waymark_db::repositories::LandmarkRepo;
use waymark_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::middleware::auth::AuthUser;
use crate::response::LandmarkDeletedResponse;
use crate::state::AppState;

const ENTITY: &str = "Landmark";

/// GET /api/landmarks
///
/// List the caller's landmarks, most recent first. Optional filters: `name`
/// and `description` (case-insensitive substring), `category` (exact).
pub async fn list_landmarks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<LandmarkFilter>,
) -> AppResult<Json<Vec<Landmark>>> {
    if let Some(category) = non_blank(filter.category.as_deref()) {
        validate_category(category)?;
    }

    let landmarks = LandmarkRepo::list(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(landmarks))
}

/// GET /api/landmarks/{id}
pub async fn get_landmark(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<Landmark>> {
    let landmark = LandmarkRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;
    Ok(Json(landmark))
}

/// POST /api/landmarks
///
/// Create a landmark. `name` and both coordinates are required; coordinates
/// must parse as decimals within ±90 / ±180.
pub async fn create_landmark(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateLandmark>,
) -> AppResult<impl IntoResponse> {
    validate_landmark_name(&input.name)?;
    validate_coordinate(&input.location.latitude, Axis::Latitude)?;
    validate_coordinate(&input.location.longitude, Axis::Longitude)?;

    let input = CreateLandmark {
        name: input.name.trim().to_string(),
        category: Some(resolve_category(input.category.as_deref())?),
        ..input
    };

    let landmark = LandmarkRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        landmark_id = landmark.id,
        category = %landmark.category,
        "Landmark created",
    );

    Ok((StatusCode::CREATED, Json(landmark)))
}

/// PUT /api/landmarks/{id}
///
/// Partial update: only supplied fields change.
pub async fn update_landmark(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
    JsonBody(input): JsonBody<UpdateLandmark>,
) -> AppResult<Json<Landmark>> {
    if let Some(name) = input.name.as_deref() {
        validate_landmark_name(name)?;
    }
    if let Some(latitude) = input.latitude() {
        validate_coordinate(latitude, Axis::Latitude)?;
    }
    if let Some(longitude) = input.longitude() {
        validate_coordinate(longitude, Axis::Longitude)?;
    }
    if let Some(category) = input.category.as_deref() {
        validate_category(category)?;
    }

    let input = UpdateLandmark {
        name: input.name.as_deref().map(|n| n.trim().to_string()),
        ..input
    };

    let landmark = LandmarkRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;

    tracing::info!(user_id = auth.user_id, landmark_id = id, "Landmark updated");

    Ok(Json(landmark))
}

/// DELETE /api/landmarks/{id}
///
/// Delete a landmark together with every plan of the caller that references
/// it. Visit records of the landmark are left to be pruned on the next visit
/// listing.
pub async fn delete_landmark(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<LandmarkDeletedResponse>> {
    let report = state.integrity().delete_landmark(auth.user_id, id).await?;

    Ok(Json(LandmarkDeletedResponse {
        message: "Landmark deleted",
        deleted_plans: report.deleted_plans,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the caller's landmarks among `ids`, keyed by id. Dangling ids are
/// simply absent from the map.
pub(crate) async fn landmark_index(
    pool: &DbPool,
    user_id: DbId,
    ids: &[DbId],
) -> AppResult<HashMap<DbId, Landmark>> {
    let landmarks = LandmarkRepo::find_many(pool, user_id, ids).await?;
    Ok(landmarks.into_iter().map(|l| (l.id, l)).collect())
}
