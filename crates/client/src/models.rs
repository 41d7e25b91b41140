//! Wire types as the server sends and accepts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Id = i64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Body of a successful register or login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MeResponse {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Coordinates as decimal strings, the way they are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

impl Location {
    /// Location of a map click, rounded to six decimals.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: format!("{latitude:.6}"),
            longitude: format!("{longitude:.6}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Landmark {
    pub id: Id,
    pub name: String,
    pub location: Location,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLandmark {
    pub name: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial landmark update; `None` fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LandmarkChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Query for `GET /api/landmarks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LandmarkQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LandmarkDeleted {
    pub message: String,
    pub deleted_plans: u64,
}

/// A visit record; `landmark` is `None` once the landmark is gone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Visit {
    pub id: Id,
    pub landmark_id: Id,
    pub visited_date: DateTime<Utc>,
    pub visitor_name: String,
    pub notes: String,
    pub rating: i32,
    pub landmark: Option<Landmark>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewVisit {
    pub landmark_id: Id,
    /// `YYYY-MM-DD` or RFC 3339.
    pub visited_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VisitChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

/// Query for `GET /api/visited`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanEntry {
    pub landmark_id: Id,
    pub notes: String,
    pub landmark: Option<Landmark>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisitPlan {
    pub id: Id,
    pub name: String,
    pub planned_date: DateTime<Utc>,
    pub overall_notes: String,
    pub landmarks: Vec<PlanEntry>,
    pub created_at: DateTime<Utc>,
}

/// One entry of a plan being saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntryDraft {
    pub landmark_id: Id,
    pub notes: String,
}

/// Body for creating a plan, or replacing one's fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_date: Option<String>,
    pub landmarks: Vec<PlanEntryDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_notes: Option<String>,
}
