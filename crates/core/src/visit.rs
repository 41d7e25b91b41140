//! Visit record rules: rating range, visit dates, visitor names.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Lowest accepted rating. `0` means "not rated".
pub const MIN_RATING: i32 = 0;
/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;
/// Rating stored when the client omits one.
pub const DEFAULT_RATING: i32 = 0;

/// Date format accepted for calendar-day values (`2024-05-17`).
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Years a visit date may fall in. Four-digit years only.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Validate that a rating lies in `[MIN_RATING, MAX_RATING]`.
///
/// Out-of-range values are rejected rather than clamped.
pub fn validate_rating(rating: i32) -> Result<i32, CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// Resolve an optional rating, applying the default when absent.
pub fn resolve_rating(rating: Option<i32>) -> Result<i32, CoreError> {
    validate_rating(rating.unwrap_or(DEFAULT_RATING))
}

/// Parse a visit date sent by a client.
///
/// Accepts either a calendar day (`2024-05-17`, interpreted as midnight UTC)
/// or a full RFC 3339 timestamp.
pub fn parse_visit_date(raw: &str) -> Result<Timestamp, CoreError> {
    let trimmed = raw.trim();
    let parsed = match NaiveDate::parse_from_str(trimmed, DAY_FORMAT) {
        Ok(day) => Some(start_of_day(day)),
        Err(_) => DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
    };
    parsed
        .filter(|ts| YEAR_RANGE.contains(&ts.year()))
        .ok_or_else(|| invalid_date(raw))
}

/// Half-open `[start, end)` window covering the UTC calendar day of `raw`.
///
/// Used by the exact-day filter on visit listings.
pub fn day_window(raw: &str) -> Result<(Timestamp, Timestamp), CoreError> {
    let start = start_of_day(parse_visit_date(raw)?.date_naive());
    let end = start
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| invalid_date(raw))?;
    Ok((start, end))
}

/// Pick the visitor name to store: the supplied one when non-blank, else the
/// caller's username.
pub fn resolve_visitor_name(supplied: Option<&str>, fallback: &str) -> String {
    supplied
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn invalid_date(raw: &str) -> CoreError {
    CoreError::Validation(format!("Invalid date '{raw}'. Expected YYYY-MM-DD"))
}

fn start_of_day(day: NaiveDate) -> Timestamp {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
