//! Visit search by name.
//!
//! A name is first tried as a landmark name. If any of the caller's
//! landmarks match, the visit list is narrowed to those landmarks here on
//! the client. Otherwise the name is passed to the server as a visitor
//! filter.

use std::collections::HashSet;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{Id, Landmark, LandmarkQuery, Visit, VisitQuery};

/// How a visit search will be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitSearch {
    /// Fetch with `query`, then keep visits of these landmarks.
    ByLandmarks { landmark_ids: Vec<Id>, query: VisitQuery },
    /// Let the server filter.
    Server(VisitQuery),
}

/// Decide how to answer a search for `name` (and optional exact `date`),
/// given the landmarks whose name matched.
pub fn plan_visit_search(name: Option<&str>, date: Option<&str>, matching: &[Landmark]) -> VisitSearch {
    let name = non_blank(name);
    let date = non_blank(date).map(str::to_string);

    match name {
        Some(_) if !matching.is_empty() => VisitSearch::ByLandmarks {
            landmark_ids: matching.iter().map(|l| l.id).collect(),
            query: VisitQuery {
                date,
                ..Default::default()
            },
        },
        _ => VisitSearch::Server(VisitQuery {
            date,
            visitor: name.map(str::to_string),
            rating: None,
        }),
    }
}

/// Keep the visits whose landmark is one of `landmark_ids`.
pub fn filter_by_landmarks(visits: Vec<Visit>, landmark_ids: &[Id]) -> Vec<Visit> {
    let wanted: HashSet<Id> = landmark_ids.iter().copied().collect();
    visits
        .into_iter()
        .filter(|v| wanted.contains(&v.landmark_id))
        .collect()
}

/// Run a visit search against the server.
pub async fn search_visits(
    api: &ApiClient,
    name: Option<&str>,
    date: Option<&str>,
) -> Result<Vec<Visit>, ClientError> {
    let matching = match non_blank(name) {
        Some(name) => {
            let query = LandmarkQuery {
                name: Some(name.to_string()),
                ..Default::default()
            };
            api.list_landmarks(&query).await?
        }
        None => Vec::new(),
    };

    match plan_visit_search(name, date, &matching) {
        VisitSearch::ByLandmarks {
            landmark_ids,
            query,
        } => {
            tracing::debug!(landmarks = landmark_ids.len(), "Visit search matched landmark names");
            let visits = api.list_visits(&query).await?;
            Ok(filter_by_landmarks(visits, &landmark_ids))
        }
        VisitSearch::Server(query) => api.list_visits(&query).await,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
