//! Configuration validation.
//!
//! Snapshots are never validated at construction time; these checks run when
//! a config is applied to hardware, and on file load.

use crate::error::{ConfigError, Result};

use super::controlled::ControlledMotorConfig;
use super::encoder::AbsoluteEncoderConfig;
use super::mechanism::MechanismConfig;
use super::motor::MotorConfig;

/// Validate a motor config.
///
/// Current limits must be non-negative and the gear ratio nonzero.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.motor_to_mech_ratio == 0.0 {
        return Err(ConfigError::InvalidRatio {
            field: "motor_to_mech_ratio",
            value: config.motor_to_mech_ratio,
        });
    }

    non_negative("stator_current_limit", config.stator_current_limit)?;
    non_negative("supply_current_limit", config.supply_current_limit)?;

    Ok(())
}

/// Validate a controlled motor (or position controller) config.
pub fn validate_controlled_motor(config: &ControlledMotorConfig) -> Result<()> {
    if config.motor_to_mech_ratio == 0.0 {
        return Err(ConfigError::InvalidRatio {
            field: "motor_to_mech_ratio",
            value: config.motor_to_mech_ratio,
        });
    }

    non_negative("stator_current_limit", config.stator_current_limit)?;
    non_negative("supply_current_limit", config.supply_current_limit)?;
    non_negative("max_velocity", config.max_velocity)?;
    non_negative("max_acceleration", config.max_acceleration)?;

    if config.pos_tolerance < 0.0 {
        return Err(ConfigError::NegativeTolerance {
            field: "pos_tolerance",
            value: config.pos_tolerance,
        });
    }
    if config.vel_tolerance < 0.0 {
        return Err(ConfigError::NegativeTolerance {
            field: "vel_tolerance",
            value: config.vel_tolerance,
        });
    }

    Ok(())
}

/// Validate an absolute encoder config.
pub fn validate_absolute_encoder(config: &AbsoluteEncoderConfig) -> Result<()> {
    if config.sensor_to_mech_ratio == 0.0 {
        return Err(ConfigError::InvalidRatio {
            field: "sensor_to_mech_ratio",
            value: config.sensor_to_mech_ratio,
        });
    }

    Ok(())
}

/// Validate a mechanism config and every subordinate snapshot.
pub fn validate_mechanism(config: &MechanismConfig) -> Result<()> {
    validate_motor(&config.motor)?;
    validate_absolute_encoder(&config.absolute_encoder)?;

    non_negative("max_velocity", config.motion_profile.max_velocity)?;
    non_negative("max_acceleration", config.motion_profile.max_acceleration)?;

    if config.feedback.tolerance < 0.0 {
        return Err(ConfigError::NegativeTolerance {
            field: "tolerance",
            value: config.feedback.tolerance,
        });
    }
    if config.feedback.rate_tolerance < 0.0 {
        return Err(ConfigError::NegativeTolerance {
            field: "rate_tolerance",
            value: config.feedback.rate_tolerance,
        });
    }

    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value < 0.0 {
        Err(ConfigError::NegativeLimit { field, value })
    } else {
        Ok(())
    }
}
