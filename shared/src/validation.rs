use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::MAX_LABEL_LENGTH;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap());

pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::new("empty_label"));
    }
    if label.chars().count() > MAX_LABEL_LENGTH {
        return Err(ValidationError::new("label_too_long"));
    }
    Ok(())
}

pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() {
        return Err(ValidationError::new("non_finite_weight"));
    }
    if weight < 0.0 {
        return Err(ValidationError::new("negative_weight"));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR.is_match(color) {
        return Err(ValidationError::new("invalid_color"));
    }
    Ok(())
}
