//! Text the UI shows for records.

use chrono::{DateTime, Utc};

use crate::models::{Landmark, Location, VisitPlan};

const MAX_STARS: i32 = 5;

/// Five stars, `rating` of them filled. Out-of-range ratings are clamped.
pub fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, MAX_STARS);
    (0..MAX_STARS)
        .map(|i| if i < filled { '★' } else { '☆' })
        .collect()
}

pub fn coordinate_label(location: &Location) -> String {
    format!("Lat: {}, Lng: {}", location.latitude, location.longitude)
}

/// Popup text for a landmark's map marker: the name, then the description
/// on its own line when there is one.
pub fn marker_popup(landmark: &Landmark) -> String {
    if landmark.description.trim().is_empty() {
        landmark.name.clone()
    } else {
        format!("{}\n{}", landmark.name, landmark.description)
    }
}

pub fn visitor_label(visitor_name: &str) -> String {
    format!("Visitor: {visitor_name}")
}

pub fn date_label(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn plan_summary(plan: &VisitPlan) -> String {
    format!("Places: {}", plan.landmarks.len())
}

/// Notice shown after a landmark delete, mentioning cascaded plans if any.
pub fn cascade_notice(deleted_plans: u64) -> String {
    if deleted_plans == 0 {
        "Landmark Deleted Successfully!".to_string()
    } else {
        format!("Landmark Deleted Successfully! {deleted_plans} visiting plans are also deleted.")
    }
}
