//! Request validation applied at the handler boundary, after deserialization.

use crate::error::AppError;

/// Checks a deserialized request body before it reaches a repository.
/// Required-field presence is already enforced by the input types.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Fails when `value` is outside `min..=max`.
pub fn check_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::Validation(format!(
            "{} deve estar entre {} e {}",
            field, min, max
        )));
    }
    Ok(())
}

/// Same as [`check_range`], skipped when the field was not supplied.
pub fn check_optional_range(field: &str, value: Option<i32>, min: i32, max: i32) -> Result<(), AppError> {
    match value {
        Some(v) => check_range(field, v, min, max),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(check_range("hour", 0, 0, 23).is_ok());
        assert!(check_range("hour", 23, 0, 23).is_ok());
        let err = check_range("hour", 24, 0, 23).unwrap_err();
        assert_eq!(err.to_string(), "hour deve estar entre 0 e 23");
        assert!(check_range("minute", -1, 0, 59).is_err());
    }

    #[test]
    fn absent_optional_passes() {
        assert!(check_optional_range("minute", None, 0, 59).is_ok());
        assert!(check_optional_range("minute", Some(60), 0, 59).is_err());
    }
}
