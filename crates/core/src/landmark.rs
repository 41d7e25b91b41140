//! Landmark categories, coordinate rules, and field validation.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_HISTORICAL: &str = "historical";
pub const CATEGORY_NATURAL: &str = "natural";
pub const CATEGORY_CULTURAL: &str = "cultural";
pub const CATEGORY_OTHER: &str = "other";

/// All valid landmark categories.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_HISTORICAL,
    CATEGORY_NATURAL,
    CATEGORY_CULTURAL,
    CATEGORY_OTHER,
];

/// Category assigned when the client omits one.
pub const DEFAULT_CATEGORY: &str = CATEGORY_OTHER;

/// Maximum length of a landmark name in characters.
pub const MAX_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// Which half of a coordinate pair is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn bound(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a category string is one of the known categories.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

/// Resolve an optional category to a validated value, defaulting to `other`.
pub fn resolve_category(category: Option<&str>) -> Result<String, CoreError> {
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => {
            validate_category(c)?;
            Ok(c.to_string())
        }
        None => Ok(DEFAULT_CATEGORY.to_string()),
    }
}

/// Validate a landmark name: required, non-blank, bounded length.
pub fn validate_landmark_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Landmark name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Landmark name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate one coordinate given as a decimal string.
///
/// Coordinates are stored as the strings the client sent, so the only
/// requirement is that they parse and fall inside the axis range.
pub fn validate_coordinate(value: &str, axis: Axis) -> Result<(), CoreError> {
    let label = axis.label();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("Location {label} is required")));
    }
    let parsed: f64 = trimmed.parse().map_err(|_| {
        CoreError::Validation(format!("Location {label} '{value}' is not a decimal number"))
    })?;
    if !parsed.is_finite() || parsed.abs() > axis.bound() {
        return Err(CoreError::Validation(format!(
            "Location {label} must be between -{bound} and {bound}",
            bound = axis.bound()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
