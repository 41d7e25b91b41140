//! Handlers for the `/visited` resource (visit records).
//!
//! All endpoints require authentication and only ever see the caller's rows.
//! Responses embed the visited landmark as `landmark` (null if it is gone).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use waymark_core::error::CoreError;
use waymark_core::search::non_blank;
use waymark_core::types::{DbId, LandmarkRef};
use waymark_core::visit::{
    day_window, parse_visit_date, resolve_rating, resolve_visitor_name, validate_rating,
};
use waymark_db::models::visited::{
    CreateVisit, UpdateVisit, VisitFilter, VisitWithLandmark, VisitedLandmark,
};
use waymark_db::repositories::VisitedRepo;
use waymark_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::handlers::landmarks::landmark_index;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Visit record";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/visited`.
#[derive(Debug, Deserialize)]
pub struct CreateVisitRequest {
    pub landmark_id: Option<LandmarkRef>,
    pub visited_date: Option<String>,
    pub visitor_name: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
}

/// Request body for `PUT /api/visited/{id}`. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateVisitRequest {
    pub visited_date: Option<String>,
    pub visitor_name: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
}

/// Query parameters for `GET /api/visited`.
#[derive(Debug, Default, Deserialize)]
pub struct VisitListParams {
    /// Exact UTC day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Case-insensitive substring of the visitor name.
    pub visitor: Option<String>,
    /// Exact rating.
    pub rating: Option<String>,
}

impl VisitListParams {
    fn into_filter(self) -> AppResult<VisitFilter> {
        let day = non_blank(self.date.as_deref()).map(day_window).transpose()?;

        let rating = non_blank(self.rating.as_deref())
            .map(|r| {
                r.parse::<i32>().map_err(|_| {
                    CoreError::Validation(format!("Rating filter '{r}' is not a number"))
                })
            })
            .transpose()?;

        Ok(VisitFilter {
            day,
            visitor: self.visitor,
            rating,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/visited
///
/// List the caller's visit records, most recent visit first. Optional
/// filters: `date`, `visitor`, `rating`.
///
/// Not read-only: records whose landmark no longer exists are left out of
/// the response and deleted.
pub async fn list_visits(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VisitListParams>,
) -> AppResult<Json<Vec<VisitWithLandmark>>> {
    let filter = params.into_filter()?;

    let visits = VisitedRepo::list(&state.pool, auth.user_id, &filter).await?;
    let visits = state.integrity().prune_dangling(auth.user_id, visits).await?;

    Ok(Json(with_landmarks(&state.pool, auth.user_id, visits).await?))
}

/// GET /api/visited/landmark/{id}
///
/// All of the caller's visits to one landmark, most recent first.
pub async fn list_visits_for_landmark(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(landmark_id): IdPath<DbId>,
) -> AppResult<Json<Vec<VisitWithLandmark>>> {
    let visits = VisitedRepo::list_for_landmark(&state.pool, auth.user_id, landmark_id).await?;
    Ok(Json(with_landmarks(&state.pool, auth.user_id, visits).await?))
}

/// GET /api/visited/{id} and GET /api/visited/detail/{id}
pub async fn get_visit(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<VisitWithLandmark>> {
    let visit = VisitedRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;

    Ok(Json(with_landmark(&state.pool, auth.user_id, visit).await?))
}

/// POST /api/visited
///
/// Log a visit to one of the caller's landmarks. The landmark must exist;
/// an unknown id is reported by name with 404.
pub async fn create_visit(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateVisitRequest>,
) -> AppResult<impl IntoResponse> {
    let landmark_ref = input.landmark_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Landmark ID is required".into()))
    })?;
    let resolved = state
        .integrity()
        .require_live_landmarks(auth.user_id, std::slice::from_ref(&landmark_ref))
        .await?;
    let landmark_id = resolved[0];

    let visited_date = non_blank(input.visited_date.as_deref())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Visit date is required".into())))?;

    let create = CreateVisit {
        landmark_id,
        visited_date: parse_visit_date(visited_date)?,
        visitor_name: resolve_visitor_name(input.visitor_name.as_deref(), &auth.user.username),
        notes: input.notes.unwrap_or_default(),
        rating: resolve_rating(input.rating)?,
    };

    let visit = VisitedRepo::create(&state.pool, auth.user_id, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        visit_id = visit.id,
        landmark_id,
        rating = visit.rating,
        "Visit recorded",
    );

    let visit = with_landmark(&state.pool, auth.user_id, visit).await?;
    Ok((StatusCode::CREATED, Json(visit)))
}

/// PUT /api/visited/{id}
///
/// Partial update of `visited_date`, `visitor_name`, `notes`, `rating`.
/// A blank visitor name is ignored.
pub async fn update_visit(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
    JsonBody(input): JsonBody<UpdateVisitRequest>,
) -> AppResult<Json<VisitWithLandmark>> {
    let update = UpdateVisit {
        visited_date: non_blank(input.visited_date.as_deref())
            .map(parse_visit_date)
            .transpose()?,
        visitor_name: non_blank(input.visitor_name.as_deref()).map(str::to_string),
        notes: input.notes,
        rating: input.rating.map(validate_rating).transpose()?,
    };

    let visit = VisitedRepo::update(&state.pool, auth.user_id, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;

    tracing::info!(user_id = auth.user_id, visit_id = id, "Visit updated");

    Ok(Json(with_landmark(&state.pool, auth.user_id, visit).await?))
}

/// DELETE /api/visited/{id}
pub async fn delete_visit(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !VisitedRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY }));
    }

    tracing::info!(user_id = auth.user_id, visit_id = id, "Visit deleted");

    Ok(Json(MessageResponse::new("Visit record deleted")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn with_landmarks(
    pool: &DbPool,
    user_id: DbId,
    visits: Vec<VisitedLandmark>,
) -> AppResult<Vec<VisitWithLandmark>> {
    let ids: Vec<DbId> = visits.iter().map(|v| v.landmark_id).collect();
    let index = landmark_index(pool, user_id, &ids).await?;

    Ok(visits
        .into_iter()
        .map(|visit| VisitWithLandmark {
            landmark: index.get(&visit.landmark_id).cloned(),
            visit,
        })
        .collect())
}

async fn with_landmark(
    pool: &DbPool,
    user_id: DbId,
    visit: VisitedLandmark,
) -> AppResult<VisitWithLandmark> {
    let mut one = with_landmarks(pool, user_id, vec![visit]).await?;
    one.pop()
        .ok_or_else(|| AppError::InternalError("visit lost while resolving landmark".into()))
}
