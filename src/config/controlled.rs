//! Controlled motor configuration.
//!
//! The full parameter set for a closed-loop motor controller: electrical
//! limits, feedback and feedforward gains, and motion-profile limits in one
//! flat snapshot, matching the native configuration surface of smart motor
//! controllers that hold all of these in a single device config.

use serde::Deserialize;

/// Immutable snapshot of every tunable parameter for a controlled motor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlledMotorConfig {
    /// True means the motor brakes when given no voltage.
    pub neutral_brake: bool,

    /// True means positive voltage rotates the motor counter-clockwise.
    pub ccw_positive: bool,

    /// Ratio of motor rotations to mechanism rotations.
    pub motor_to_mech_ratio: f64,

    /// Stator current limit in amps.
    pub stator_current_limit: f64,

    /// Supply current limit in amps.
    pub supply_current_limit: f64,

    /// Maximum velocity in rotations per second.
    pub max_velocity: f64,

    /// Maximum acceleration in rotations per second per second.
    pub max_acceleration: f64,

    /// Proportional gain.
    pub kp: f64,

    /// Integral gain.
    pub ki: f64,

    /// Derivative gain.
    pub kd: f64,

    /// Voltage to overcome static friction.
    pub ks: f64,

    /// Voltage to overcome gravity.
    pub kg: f64,

    /// Voltage per unit velocity.
    pub kv: f64,

    /// Voltage per unit acceleration.
    pub ka: f64,

    /// True enables continuous (wraparound) position input.
    pub continuous: bool,

    /// Position tolerance in rotations.
    pub pos_tolerance: f64,

    /// Velocity tolerance in rotations per second.
    pub vel_tolerance: f64,
}

/// Position controller configuration.
///
/// Position controllers take the same parameter set as any controlled motor,
/// so they share one snapshot type.
pub type PositionControllerConfig = ControlledMotorConfig;

impl ControlledMotorConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> ControlledMotorBuilder {
        ControlledMotorBuilder::defaults()
    }
}

impl Default for ControlledMotorConfig {
    fn default() -> Self {
        ControlledMotorBuilder::defaults().build()
    }
}

/// Mutable accumulator producing [`ControlledMotorConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct ControlledMotorBuilder {
    config: ControlledMotorConfig,
}

impl ControlledMotorBuilder {
    /// Returns a builder with default values.
    pub fn defaults() -> Self {
        Self {
            config: ControlledMotorConfig {
                neutral_brake: false,
                ccw_positive: true,
                motor_to_mech_ratio: 1.0,
                stator_current_limit: 80.0,
                supply_current_limit: 40.0,
                max_velocity: 1.0,
                max_acceleration: 1.0,
                kp: 0.0,
                ki: 0.0,
                kd: 0.0,
                ks: 0.0,
                kg: 0.0,
                kv: 0.0,
                ka: 0.0,
                continuous: true,
                pos_tolerance: 0.1,
                vel_tolerance: 0.1,
            },
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &ControlledMotorConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Set neutral brake.
    pub fn neutral_brake(mut self, neutral_brake: bool) -> Self {
        self.config.neutral_brake = neutral_brake;
        self
    }

    /// Set ccw positive.
    pub fn ccw_positive(mut self, ccw_positive: bool) -> Self {
        self.config.ccw_positive = ccw_positive;
        self
    }

    /// Set motor to mechanism ratio.
    pub fn motor_to_mech_ratio(mut self, motor_to_mech_ratio: f64) -> Self {
        self.config.motor_to_mech_ratio = motor_to_mech_ratio;
        self
    }

    /// Set stator current limit.
    pub fn stator_current_limit(mut self, stator_current_limit: f64) -> Self {
        self.config.stator_current_limit = stator_current_limit;
        self
    }

    /// Set supply current limit.
    pub fn supply_current_limit(mut self, supply_current_limit: f64) -> Self {
        self.config.supply_current_limit = supply_current_limit;
        self
    }

    /// Set max velocity.
    pub fn max_velocity(mut self, max_velocity: f64) -> Self {
        self.config.max_velocity = max_velocity;
        self
    }

    /// Set max acceleration.
    pub fn max_acceleration(mut self, max_acceleration: f64) -> Self {
        self.config.max_acceleration = max_acceleration;
        self
    }

    /// Set proportional gain.
    pub fn kp(mut self, kp: f64) -> Self {
        self.config.kp = kp;
        self
    }

    /// Set integral gain.
    pub fn ki(mut self, ki: f64) -> Self {
        self.config.ki = ki;
        self
    }

    /// Set derivative gain.
    pub fn kd(mut self, kd: f64) -> Self {
        self.config.kd = kd;
        self
    }

    /// Set static friction voltage.
    pub fn ks(mut self, ks: f64) -> Self {
        self.config.ks = ks;
        self
    }

    /// Set gravity voltage.
    pub fn kg(mut self, kg: f64) -> Self {
        self.config.kg = kg;
        self
    }

    /// Set velocity voltage.
    pub fn kv(mut self, kv: f64) -> Self {
        self.config.kv = kv;
        self
    }

    /// Set acceleration voltage.
    pub fn ka(mut self, ka: f64) -> Self {
        self.config.ka = ka;
        self
    }

    /// Set continuous input.
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.config.continuous = continuous;
        self
    }

    /// Set position tolerance.
    pub fn pos_tolerance(mut self, pos_tolerance: f64) -> Self {
        self.config.pos_tolerance = pos_tolerance;
        self
    }

    /// Set velocity tolerance.
    pub fn vel_tolerance(mut self, vel_tolerance: f64) -> Self {
        self.config.vel_tolerance = vel_tolerance;
        self
    }

    /// Produce a new, independent snapshot.
    ///
    /// Pure and repeatable: the builder stays usable afterwards.
    pub fn build(&self) -> ControlledMotorConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = ControlledMotorConfig::default();
        assert!(!config.neutral_brake);
        assert!(config.ccw_positive);
        assert_eq!(config.stator_current_limit, 80.0);
        assert_eq!(config.supply_current_limit, 40.0);
        assert_eq!(config.max_velocity, 1.0);
        assert_eq!(config.kp, 0.0);
        assert!(config.continuous);
        assert_eq!(config.pos_tolerance, 0.1);
        assert_eq!(config.vel_tolerance, 0.1);
    }

    #[test]
    fn test_edit_round_trip() {
        let config = ControlledMotorConfig::builder()
            .kp(4.0)
            .continuous(false)
            .max_velocity(5.5)
            .build();

        assert_eq!(ControlledMotorBuilder::edit(&config).build(), config);
    }

    #[test]
    fn test_single_field_edit_preserves_others() {
        let base = ControlledMotorConfig::builder().kp(2.0).ks(0.3).build();
        let edited = ControlledMotorBuilder::edit(&base).kd(0.05).build();

        assert_eq!(edited.kp, 2.0);
        assert_eq!(edited.ks, 0.3);
        assert_eq!(edited.kd, 0.05);
        assert_eq!(base.kd, 0.0);
    }

    #[test]
    fn test_last_setter_wins() {
        let config = ControlledMotorConfig::builder().kp(1.0).kp(3.0).build();
        assert_eq!(config.kp, 3.0);
    }
}
