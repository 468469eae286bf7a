//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};

use super::mechanism::MechanismConfig;
use super::validation::validate_mechanism;

/// Load a mechanism configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails the
/// deferred-validation checks.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MechanismConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        ConfigError::IoError(msg)
    })?;

    parse_config(&content)
}

/// Parse a mechanism configuration from a TOML string.
///
/// Omitted tables and fields fall back to the builder defaults.
pub fn parse_config(content: &str) -> Result<MechanismConfig> {
    let config: MechanismConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        ConfigError::ParseError(msg)
    })?;

    validate_mechanism(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[motor]
neutral_brake = true
stator_current_limit = 60.0

[feedback]
kp = 4.0
continuous = true
"#;

        let config = parse_config(toml).unwrap();
        assert!(config.motor.neutral_brake);
        assert_eq!(config.motor.stator_current_limit, 60.0);
        // Untouched fields keep builder defaults
        assert_eq!(config.motor.supply_current_limit, 40.0);
        assert_eq!(config.feedback.kp, 4.0);
        assert!(config.feedback.continuous);
        assert_eq!(config.absolute_encoder.sensor_to_mech_ratio, 1.0);
    }

    #[test]
    fn test_parse_empty_config_is_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, MechanismConfig::builder().build());
    }

    #[test]
    fn test_invalid_ratio_rejected_on_load() {
        let toml = r#"
[motor]
motor_to_mech_ratio = 0.0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(ConfigError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(
            parse_config("[motor\nbroken"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
