use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::constants::{JITTER_FRACTION, MAX_EXTRA_ROTATIONS, MIN_EXTRA_ROTATIONS, SPIN_DURATION_MS};
use crate::error::WheelError;

/// Tunables for a single wheel instance. Every field falls back to its constant when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_spin_ranges"))]
pub struct WheelConfig {
    #[validate(range(min = 1))]
    pub spin_duration_ms: u32,
    #[validate(range(min = 1))]
    pub min_extra_rotations: u32,
    pub max_extra_rotations: u32,
    #[validate(range(min = 0.0))]
    pub jitter_fraction: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            min_extra_rotations: MIN_EXTRA_ROTATIONS,
            max_extra_rotations: MAX_EXTRA_ROTATIONS,
            jitter_fraction: JITTER_FRACTION,
        }
    }
}

fn validate_spin_ranges(config: &WheelConfig) -> Result<(), ValidationError> {
    if config.min_extra_rotations > config.max_extra_rotations {
        return Err(ValidationError::new("rotation_range_inverted"));
    }
    // A landing must stay inside its own segment
    if config.jitter_fraction.is_nan() || config.jitter_fraction >= 0.5 {
        return Err(ValidationError::new("jitter_too_wide"));
    }
    Ok(())
}

impl WheelConfig {
    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        let config: WheelConfig =
            serde_json::from_str(json).map_err(|e| WheelError::InvalidConfig(e.to_string()))?;
        config.checked()
    }

    /// Returns the config unchanged if every constraint holds.
    pub fn checked(self) -> Result<Self, WheelError> {
        self.validate()
            .map_err(|e| WheelError::InvalidConfig(e.to_string()))?;
        Ok(self)
    }

    pub fn spin_duration_ms_f64(&self) -> f64 {
        self.spin_duration_ms as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = WheelConfig::default();
        assert_eq!(config.spin_duration_ms, 4500);
        assert_eq!(config.min_extra_rotations, 5);
        assert_eq!(config.max_extra_rotations, 7);
        assert!(config.checked().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WheelConfig::from_json(r#"{ "spin_duration_ms": 3000 }"#).unwrap();
        assert_eq!(config.spin_duration_ms, 3000);
        assert_eq!(config.min_extra_rotations, MIN_EXTRA_ROTATIONS);
        assert_eq!(config.jitter_fraction, JITTER_FRACTION);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = vec![
            r#"{ "min_extra_rotations": 0 }"#,
            r#"{ "min_extra_rotations": 8, "max_extra_rotations": 6 }"#,
            r#"{ "jitter_fraction": 0.5 }"#,
            r#"{ "jitter_fraction": -0.1 }"#,
            r#"{ "spin_duration_ms": 0 }"#,
            r#"{ "spin_duration_ms": "fast" }"#,
        ];

        for json in cases {
            let err = WheelConfig::from_json(json).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "accepted {}", json);
        }
    }
}
