use serde::{Deserialize, Deserializer, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A landmark reference exactly as the client sent it.
///
/// Clients may send ids as JSON numbers or strings. The raw text is kept so
/// that a reference which does not resolve can be named verbatim in the
/// error returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LandmarkRef(String);

impl LandmarkRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The reference as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the reference into a row id. Returns `None` for anything that
    /// cannot possibly name a stored landmark.
    pub fn resolve(&self) -> Option<DbId> {
        self.0.trim().parse::<DbId>().ok().filter(|id| *id > 0)
    }
}

impl From<DbId> for LandmarkRef {
    fn from(id: DbId) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for LandmarkRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}
