//! Visit plan entries and plan-level validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, LandmarkRef};

/// Message returned when a plan is created without a name or without entries.
pub const MSG_PLAN_INCOMPLETE: &str = "Please provide a name and at least one landmark";

/// One entry of a plan as sent by a client: an unresolved landmark reference
/// plus optional per-landmark notes.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanEntryInput {
    pub landmark_id: LandmarkRef,
    pub notes: Option<String>,
}

/// One resolved, ordered entry of a stored plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub landmark_id: DbId,
    pub notes: String,
}

impl PlanEntry {
    pub fn new(landmark_id: DbId, notes: impl Into<String>) -> Self {
        Self {
            landmark_id,
            notes: notes.into(),
        }
    }
}

/// Pair already-validated landmark ids back up with the notes of the inputs
/// they were resolved from, preserving order.
pub fn zip_entries(inputs: &[PlanEntryInput], resolved: &[DbId]) -> Vec<PlanEntry> {
    inputs
        .iter()
        .zip(resolved)
        .map(|(input, id)| PlanEntry::new(*id, input.notes.clone().unwrap_or_default()))
        .collect()
}

/// Validate the shape of a new plan: a non-blank name and at least one entry.
pub fn validate_new_plan(name: Option<&str>, entries: Option<&[PlanEntryInput]>) -> Result<(), CoreError> {
    let has_name = name.is_some_and(|n| !n.trim().is_empty());
    let has_entries = entries.is_some_and(|e| !e.is_empty());
    if has_name && has_entries {
        Ok(())
    } else {
        Err(CoreError::Validation(MSG_PLAN_INCOMPLETE.into()))
    }
}

/// Validate a replacement plan name on update.
pub fn validate_plan_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Plan name cannot be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(raw: &str, notes: Option<&str>) -> PlanEntryInput {
        PlanEntryInput {
            landmark_id: LandmarkRef::new(raw),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn new_plan_requires_name_and_entries() {
        let entries = vec![input("1", None)];
        assert!(validate_new_plan(Some("Weekend"), Some(&entries)).is_ok());
        assert!(validate_new_plan(None, Some(&entries)).is_err());
        assert!(validate_new_plan(Some("  "), Some(&entries)).is_err());
        assert!(validate_new_plan(Some("Weekend"), Some(&[])).is_err());
        assert!(validate_new_plan(Some("Weekend"), None).is_err());
    }

    #[test]
    fn incomplete_plan_message() {
        let err = validate_new_plan(None, None).unwrap_err();
        assert_eq!(err.to_string(), MSG_PLAN_INCOMPLETE);
    }

    #[test]
    fn zip_keeps_order_and_defaults_notes() {
        let inputs = vec![input("7", Some("sunrise")), input("3", None)];
        let entries = zip_entries(&inputs, &[7, 3]);
        assert_eq!(
            entries,
            vec![PlanEntry::new(7, "sunrise"), PlanEntry::new(3, "")]
        );
    }

    #[test]
    fn empty_plan_name_rejected_on_update() {
        assert!(validate_plan_name("").is_err());
        assert!(validate_plan_name("Old town").is_ok());
    }
}
