//! Feedback controller configuration.

use serde::Deserialize;

use crate::control::FeedbackController;

/// Signed range, in rotations, over which continuous position error wraps.
pub const CONTINUOUS_RANGE: (f64, f64) = (-0.5, 0.5);

/// Immutable snapshot of feedback (PID) parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Proportional gain.
    pub kp: f64,

    /// Integral gain.
    pub ki: f64,

    /// Derivative gain.
    pub kd: f64,

    /// True enables continuous (wraparound) position input.
    pub continuous: bool,

    /// Position tolerance in rotations.
    pub tolerance: f64,

    /// Velocity tolerance in rotations per second.
    pub rate_tolerance: f64,
}

impl FeedbackConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> FeedbackBuilder {
        FeedbackBuilder::defaults()
    }

    /// Position error from `measurement` to `setpoint`.
    ///
    /// With `continuous` enabled the error wraps over [`CONTINUOUS_RANGE`]
    /// rotations, half-open at the top, so 0.49 -> -0.49 yields an error of
    /// 0.02, not -0.98.
    pub fn wrapped_error(&self, measurement: f64, setpoint: f64) -> f64 {
        let error = setpoint - measurement;
        if self.continuous {
            error - libm::floor(error - CONTINUOUS_RANGE.0)
        } else {
            error
        }
    }

    /// Creates a new software feedback controller using this config.
    pub fn create_controller(&self) -> FeedbackController {
        FeedbackController::from_config(self)
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        FeedbackBuilder::defaults().build()
    }
}

/// Mutable accumulator producing [`FeedbackConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct FeedbackBuilder {
    kp: f64,
    ki: f64,
    kd: f64,
    continuous: bool,
    tolerance: f64,
    rate_tolerance: f64,
}

impl FeedbackBuilder {
    /// Returns a builder with default values.
    pub fn defaults() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            continuous: false,
            tolerance: 0.0,
            rate_tolerance: 0.0,
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &FeedbackConfig) -> Self {
        Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            continuous: config.continuous,
            tolerance: config.tolerance,
            rate_tolerance: config.rate_tolerance,
        }
    }

    /// Set proportional gain.
    pub fn kp(mut self, kp: f64) -> Self {
        self.kp = kp;
        self
    }

    /// Set integral gain.
    pub fn ki(mut self, ki: f64) -> Self {
        self.ki = ki;
        self
    }

    /// Set derivative gain.
    pub fn kd(mut self, kd: f64) -> Self {
        self.kd = kd;
        self
    }

    /// Set continuous input.
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// Set position tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set velocity tolerance.
    pub fn rate_tolerance(mut self, rate_tolerance: f64) -> Self {
        self.rate_tolerance = rate_tolerance;
        self
    }

    /// Produce a new, independent snapshot.
    pub fn build(&self) -> FeedbackConfig {
        FeedbackConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            continuous: self.continuous,
            tolerance: self.tolerance,
            rate_tolerance: self.rate_tolerance,
        }
    }
}
