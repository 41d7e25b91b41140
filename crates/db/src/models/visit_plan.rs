//! Visit plan model and DTOs.
//!
//! A plan row lives in `visit_plans`; its ordered entries live in
//! `visit_plan_entries` keyed by `(plan_id, position)`.

use serde::Serialize;
use sqlx::FromRow;
use waymark_core::integrity::{DependentKind, LandmarkDependent};
use waymark_core::plan::PlanEntry;
use waymark_core::types::{DbId, Timestamp};

use super::landmark::Landmark;

/// A row from the `visit_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisitPlan {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub planned_date: Timestamp,
    pub overall_notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `visit_plan_entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanEntryRow {
    pub plan_id: DbId,
    pub position: i32,
    pub landmark_id: DbId,
    pub notes: String,
}

impl From<PlanEntryRow> for PlanEntry {
    fn from(row: PlanEntryRow) -> Self {
        PlanEntry::new(row.landmark_id, row.notes)
    }
}

/// A plan together with its entries in order.
#[derive(Debug, Clone, Serialize)]
pub struct VisitPlanWithEntries {
    #[serde(flatten)]
    pub plan: VisitPlan,
    pub entries: Vec<PlanEntry>,
}

impl LandmarkDependent for VisitPlanWithEntries {
    const KIND: DependentKind = DependentKind::Plan;

    fn dependent_id(&self) -> DbId {
        self.plan.id
    }

    fn landmark_ids(&self) -> Vec<DbId> {
        self.entries.iter().map(|e| e.landmark_id).collect()
    }
}

/// One plan entry with its landmark resolved for responses.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntryDetail {
    pub landmark_id: DbId,
    pub notes: String,
    pub landmark: Option<Landmark>,
}

/// A plan with resolved entries, as returned by the API. Entries go out
/// under `landmarks`.
#[derive(Debug, Clone, Serialize)]
pub struct VisitPlanDetail {
    #[serde(flatten)]
    pub plan: VisitPlan,
    pub landmarks: Vec<PlanEntryDetail>,
}

/// Insert values for a plan. Entries are already validated.
#[derive(Debug, Clone)]
pub struct CreateVisitPlan {
    pub name: String,
    /// Defaults to now when absent.
    pub planned_date: Option<Timestamp>,
    pub overall_notes: Option<String>,
    pub entries: Vec<PlanEntry>,
}

/// Partial update of a plan. `entries: Some(..)` replaces the whole list.
#[derive(Debug, Clone, Default)]
pub struct UpdateVisitPlan {
    pub name: Option<String>,
    pub planned_date: Option<Timestamp>,
    pub overall_notes: Option<String>,
    pub entries: Option<Vec<PlanEntry>>,
}
