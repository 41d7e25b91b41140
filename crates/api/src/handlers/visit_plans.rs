//! Handlers for the `/visitplans` resource.
//!
//! On the wire a plan's ordered entries are called `landmarks`, each
//! `{ landmark_id, notes }`; responses add the resolved `landmark`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use waymark_core::error::CoreError;
use waymark_core::plan::{validate_new_plan, validate_plan_name, zip_entries, PlanEntryInput};
use waymark_core::types::{DbId, LandmarkRef};
use waymark_core::visit::parse_visit_date;
use waymark_db::models::visit_plan::{
    CreateVisitPlan, PlanEntryDetail, UpdateVisitPlan, VisitPlanDetail, VisitPlanWithEntries,
};
use waymark_db::repositories::VisitPlanRepo;
use waymark_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::handlers::landmarks::landmark_index;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Visit plan";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/visitplans`.
#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub name: Option<String>,
    pub planned_date: Option<String>,
    pub landmarks: Option<Vec<PlanEntryInput>>,
    pub overall_notes: Option<String>,
}

/// Request body for `PUT /api/visitplans/{id}`. All fields are optional; a
/// non-empty `landmarks` list replaces the plan's entries.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub planned_date: Option<String>,
    pub landmarks: Option<Vec<PlanEntryInput>>,
    pub overall_notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/visitplans
///
/// List the caller's plans, most recently created first.
///
/// Not read-only: a plan with any entry pointing at a deleted landmark is
/// left out of the response and deleted.
pub async fn list_plans(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VisitPlanDetail>>> {
    let plans = VisitPlanRepo::list(&state.pool, auth.user_id).await?;
    let plans = state.integrity().prune_dangling(auth.user_id, plans).await?;

    Ok(Json(with_landmarks(&state.pool, auth.user_id, plans).await?))
}

/// GET /api/visitplans/{id}
pub async fn get_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<VisitPlanDetail>> {
    let plan = VisitPlanRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;

    Ok(Json(with_landmark(&state.pool, auth.user_id, plan).await?))
}

/// POST /api/visitplans
///
/// Create a plan. Needs a name and at least one entry; every entry must name
/// one of the caller's landmarks or the whole request fails with 404.
pub async fn create_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePlanRequest>,
) -> AppResult<impl IntoResponse> {
    validate_new_plan(input.name.as_deref(), input.landmarks.as_deref())?;
    let name = input.name.unwrap_or_default();
    let inputs = input.landmarks.unwrap_or_default();

    let entries = resolve_entries(&state, auth.user_id, &inputs).await?;

    let create = CreateVisitPlan {
        name: name.trim().to_string(),
        planned_date: input
            .planned_date
            .as_deref()
            .map(parse_visit_date)
            .transpose()?,
        overall_notes: input.overall_notes,
        entries,
    };

    let plan = VisitPlanRepo::create(&state.pool, auth.user_id, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        plan_id = plan.plan.id,
        entries = plan.entries.len(),
        "Visit plan created",
    );

    let plan = with_landmark(&state.pool, auth.user_id, plan).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// PUT /api/visitplans/{id}
///
/// Partial update. A non-empty `landmarks` list is validated strictly and
/// replaces the entries; otherwise the existing entries are re-checked and
/// any pointing at deleted landmarks are dropped.
pub async fn update_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
    JsonBody(input): JsonBody<UpdatePlanRequest>,
) -> AppResult<Json<VisitPlanDetail>> {
    let existing = VisitPlanRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;

    if let Some(name) = input.name.as_deref() {
        validate_plan_name(name)?;
    }

    let entries = match input.landmarks.as_deref() {
        Some(inputs) if !inputs.is_empty() => resolve_entries(&state, auth.user_id, inputs).await?,
        _ => {
            state
                .integrity()
                .prune_plan_entries(auth.user_id, existing.entries)
                .await?
        }
    };

    let update = UpdateVisitPlan {
        name: input.name.as_deref().map(|n| n.trim().to_string()),
        planned_date: input
            .planned_date
            .as_deref()
            .map(parse_visit_date)
            .transpose()?,
        overall_notes: input.overall_notes,
        entries: Some(entries),
    };

    let plan = VisitPlanRepo::update(&state.pool, auth.user_id, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY }))?;

    tracing::info!(
        user_id = auth.user_id,
        plan_id = id,
        entries = plan.entries.len(),
        "Visit plan updated",
    );

    Ok(Json(with_landmark(&state.pool, auth.user_id, plan).await?))
}

/// DELETE /api/visitplans/{id}
pub async fn delete_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !VisitPlanRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY }));
    }

    tracing::info!(user_id = auth.user_id, plan_id = id, "Visit plan deleted");

    Ok(Json(MessageResponse::new("Visit plan deleted")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strictly resolve client-supplied entries, keeping their notes and order.
async fn resolve_entries(
    state: &AppState,
    user_id: DbId,
    inputs: &[PlanEntryInput],
) -> AppResult<Vec<waymark_core::plan::PlanEntry>> {
    let refs: Vec<LandmarkRef> = inputs.iter().map(|e| e.landmark_id.clone()).collect();
    let ids = state.integrity().require_live_landmarks(user_id, &refs).await?;
    Ok(zip_entries(inputs, &ids))
}

async fn with_landmarks(
    pool: &DbPool,
    user_id: DbId,
    plans: Vec<VisitPlanWithEntries>,
) -> AppResult<Vec<VisitPlanDetail>> {
    let ids: Vec<DbId> = plans
        .iter()
        .flat_map(|p| p.entries.iter().map(|e| e.landmark_id))
        .collect();
    let index = landmark_index(pool, user_id, &ids).await?;

    Ok(plans
        .into_iter()
        .map(|p| VisitPlanDetail {
            landmarks: p
                .entries
                .into_iter()
                .map(|e| PlanEntryDetail {
                    landmark: index.get(&e.landmark_id).cloned(),
                    landmark_id: e.landmark_id,
                    notes: e.notes,
                })
                .collect(),
            plan: p.plan,
        })
        .collect())
}

async fn with_landmark(
    pool: &DbPool,
    user_id: DbId,
    plan: VisitPlanWithEntries,
) -> AppResult<VisitPlanDetail> {
    let mut one = with_landmarks(pool, user_id, vec![plan]).await?;
    one.pop()
        .ok_or_else(|| AppError::InternalError("plan lost while resolving landmarks".into()))
}
