//! Landmark entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waymark_core::types::{DbId, Timestamp};

/// Coordinates as decimal strings, nested under `location` on the wire and
/// stored as two columns.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

/// A row from the `landmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Landmark {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    #[sqlx(flatten)]
    pub location: Location,
    pub description: String,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new landmark.
///
/// `description` defaults to an empty string and `category` to `other`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLandmark {
    pub name: String,
    pub location: Location,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Partial coordinate update. Either half may be sent alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationPatch {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// DTO for updating a landmark. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLandmark {
    pub name: Option<String>,
    pub location: Option<LocationPatch>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateLandmark {
    pub fn latitude(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.latitude.as_deref())
    }

    pub fn longitude(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.longitude.as_deref())
    }
}

/// Query-string filters for the landmark list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LandmarkFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}
