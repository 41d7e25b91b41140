//! Visit record model and DTOs for the `visited_landmarks` table.

use serde::Serialize;
use sqlx::FromRow;
use waymark_core::integrity::{DependentKind, LandmarkDependent};
use waymark_core::types::{DbId, Timestamp};

use super::landmark::Landmark;

/// A row from the `visited_landmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisitedLandmark {
    pub id: DbId,
    pub user_id: DbId,
    pub landmark_id: DbId,
    pub visited_date: Timestamp,
    pub visitor_name: String,
    pub notes: String,
    pub rating: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LandmarkDependent for VisitedLandmark {
    const KIND: DependentKind = DependentKind::Visit;

    fn dependent_id(&self) -> DbId {
        self.id
    }

    fn landmark_ids(&self) -> Vec<DbId> {
        vec![self.landmark_id]
    }
}

/// Visit record with its landmark resolved for responses.
///
/// `landmark` is `null` when the reference dangles.
#[derive(Debug, Clone, Serialize)]
pub struct VisitWithLandmark {
    #[serde(flatten)]
    pub visit: VisitedLandmark,
    pub landmark: Option<Landmark>,
}

/// Insert values for a visit record, already validated and defaulted.
#[derive(Debug, Clone)]
pub struct CreateVisit {
    pub landmark_id: DbId,
    pub visited_date: Timestamp,
    pub visitor_name: String,
    pub notes: String,
    pub rating: i32,
}

/// Partial update of a visit record. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateVisit {
    pub visited_date: Option<Timestamp>,
    pub visitor_name: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
}

/// Resolved filters for the visit list.
#[derive(Debug, Clone, Default)]
pub struct VisitFilter {
    /// Half-open `[start, end)` window on `visited_date`.
    pub day: Option<(Timestamp, Timestamp)>,
    /// Case-insensitive substring of the visitor name.
    pub visitor: Option<String>,
    /// Exact rating.
    pub rating: Option<i32>,
}
