//! Motor electrical configuration.

use serde::Deserialize;

/// Immutable snapshot of motor electrical parameters.
///
/// Updating a config always means building a new snapshot through
/// [`MotorBuilder`]; a constructed snapshot never changes. Validation against
/// hardware capability is deferred to application time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
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
}

impl MotorConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> MotorBuilder {
        MotorBuilder::defaults()
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        MotorBuilder::defaults().build()
    }
}

/// Mutable accumulator producing [`MotorConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct MotorBuilder {
    neutral_brake: bool,
    ccw_positive: bool,
    motor_to_mech_ratio: f64,
    stator_current_limit: f64,
    supply_current_limit: f64,
}

impl MotorBuilder {
    /// Returns a builder with default values.
    pub fn defaults() -> Self {
        Self {
            neutral_brake: false,
            ccw_positive: true,
            motor_to_mech_ratio: 1.0,
            stator_current_limit: 80.0,
            supply_current_limit: 40.0,
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &MotorConfig) -> Self {
        Self {
            neutral_brake: config.neutral_brake,
            ccw_positive: config.ccw_positive,
            motor_to_mech_ratio: config.motor_to_mech_ratio,
            stator_current_limit: config.stator_current_limit,
            supply_current_limit: config.supply_current_limit,
        }
    }

    /// Set neutral brake.
    pub fn neutral_brake(mut self, neutral_brake: bool) -> Self {
        self.neutral_brake = neutral_brake;
        self
    }

    /// Set ccw positive.
    pub fn ccw_positive(mut self, ccw_positive: bool) -> Self {
        self.ccw_positive = ccw_positive;
        self
    }

    /// Set motor to mechanism ratio.
    pub fn motor_to_mech_ratio(mut self, motor_to_mech_ratio: f64) -> Self {
        self.motor_to_mech_ratio = motor_to_mech_ratio;
        self
    }

    /// Set stator current limit.
    pub fn stator_current_limit(mut self, stator_current_limit: f64) -> Self {
        self.stator_current_limit = stator_current_limit;
        self
    }

    /// Set supply current limit.
    pub fn supply_current_limit(mut self, supply_current_limit: f64) -> Self {
        self.supply_current_limit = supply_current_limit;
        self
    }

    /// Produce a new, independent snapshot.
    ///
    /// Pure and repeatable: the builder stays usable afterwards.
    pub fn build(&self) -> MotorConfig {
        MotorConfig {
            neutral_brake: self.neutral_brake,
            ccw_positive: self.ccw_positive,
            motor_to_mech_ratio: self.motor_to_mech_ratio,
            stator_current_limit: self.stator_current_limit,
            supply_current_limit: self.supply_current_limit,
        }
    }
}
