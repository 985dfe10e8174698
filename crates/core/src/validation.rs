//! Field-invariant validation shared by the API and persistence layers.
//!
//! Every function here runs before any persistence call, so a
//! [`CoreError::Validation`] never leaves partial writes behind.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Stakeholder share must lie in the inclusive [0, 100] range.
///
/// Per-row bound only; the sum across a project's stakeholders is not
/// constrained.
pub fn validate_percentage(percentage: f64) -> Result<(), CoreError> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(CoreError::Validation(
            "Percentage must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

/// A date range is valid when both ends are present and ordered, or
/// when either end is absent.
pub fn validate_date_range(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CoreError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }
    }
    Ok(())
}

/// Task assignment is exclusive: a task goes to a team or to a user,
/// never both. Unassigned tasks are allowed.
pub fn validate_task_assignment(
    team_id: Option<DbId>,
    user_id: Option<DbId>,
) -> Result<(), CoreError> {
    if team_id.is_some() && user_id.is_some() {
        return Err(CoreError::Validation(
            "A task can be assigned to a team or to a user, not both".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[test]
    fn test_percentage_bounds() {
        assert!(validate_percentage(0.0).is_ok());
        assert!(validate_percentage(100.0).is_ok());
        assert!(validate_percentage(42.5).is_ok());
        assert!(validate_percentage(-1.0).is_err());
        assert!(validate_percentage(101.0).is_err());
        assert!(validate_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_date_range() {
        let now = Utc::now();
        let later = now + Duration::days(7);

        assert!(validate_date_range(Some(now), Some(later)).is_ok());
        assert!(validate_date_range(Some(now), Some(now)).is_ok());
        assert!(validate_date_range(Some(later), Some(now)).is_err());
        assert!(validate_date_range(None, Some(now)).is_ok());
        assert!(validate_date_range(Some(now), None).is_ok());
        assert!(validate_date_range(None, None).is_ok());
    }

    #[test]
    fn test_task_assignment_exclusive() {
        let team = Some(Uuid::new_v4());
        let user = Some(Uuid::new_v4());

        assert!(validate_task_assignment(team, None).is_ok());
        assert!(validate_task_assignment(None, user).is_ok());
        assert!(validate_task_assignment(None, None).is_ok());
        assert!(validate_task_assignment(team, user).is_err());
    }
}
