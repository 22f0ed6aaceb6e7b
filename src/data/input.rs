//! Validation of user-typed entry fields.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Both day and distance must be filled in")]
    MissingField,

    #[error("Day must be a whole number")]
    InvalidDay,

    #[error("Distance must be a number")]
    InvalidDistance,

    #[error("Distance cannot be negative")]
    NegativeDistance,
}

/// Parse the day and distance fields of the entry form.
///
/// Distance accepts either comma or period as decimal separator.
pub fn parse_entry(day_text: &str, distance_text: &str) -> Result<(i64, f64), ValidationError> {
    let day_text = day_text.trim();
    let distance_text = distance_text.trim();
    if day_text.is_empty() || distance_text.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let day = day_text
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidDay)?;

    let distance = distance_text
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidDistance)?;
    if !distance.is_finite() {
        return Err(ValidationError::InvalidDistance);
    }
    if distance < 0.0 {
        return Err(ValidationError::NegativeDistance);
    }

    Ok((day, distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entry() {
        assert_eq!(parse_entry(" 12 ", "5.5"), Ok((12, 5.5)));
        assert_eq!(parse_entry("3", "4,75"), Ok((3, 4.75)));
        assert_eq!(parse_entry("-2", "0"), Ok((-2, 0.0)));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(parse_entry("", "5"), Err(ValidationError::MissingField));
        assert_eq!(parse_entry("1", "   "), Err(ValidationError::MissingField));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(parse_entry("1.5", "5"), Err(ValidationError::InvalidDay));
        assert_eq!(parse_entry("mon", "5"), Err(ValidationError::InvalidDay));
        assert_eq!(parse_entry("1", "far"), Err(ValidationError::InvalidDistance));
        assert_eq!(parse_entry("1", "inf"), Err(ValidationError::InvalidDistance));
        assert_eq!(parse_entry("1", "-3"), Err(ValidationError::NegativeDistance));
    }
}
