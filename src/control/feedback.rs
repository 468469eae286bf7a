//! Software feedback (PID) controller.
//!
//! Used by simulated device variants and by mechanisms whose hardware has no
//! onboard closed-loop slot. Works in `no_std` and does not allocate.

use crate::config::FeedbackConfig;

/// PID controller with optional continuous (wraparound) position input.
#[derive(Debug, Clone)]
pub struct FeedbackController {
    config: FeedbackConfig,

    /// Integrator state.
    integral: f64,
    /// Last position error (for derivative term).
    prev_error: f64,
    /// Last velocity error (for tolerance checks).
    prev_rate_error: f64,

    first_update: bool,
}

impl FeedbackController {
    /// Create a controller from a feedback config snapshot.
    pub fn from_config(config: &FeedbackConfig) -> Self {
        Self {
            config: config.clone(),
            integral: 0.0,
            prev_error: 0.0,
            prev_rate_error: 0.0,
            first_update: true,
        }
    }

    /// Reset integrator and derivative history.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.prev_rate_error = 0.0;
        self.first_update = true;
    }

    /// Update the controller.
    ///
    /// `setpoint` and `measurement` are positions in rotations; `dt` is the
    /// control period in seconds (e.g. 0.02 for a 50 Hz loop). Returns the
    /// output voltage. Position error wraps over [-0.5, 0.5) rotations when
    /// the config enables continuous input.
    pub fn update(&mut self, setpoint: f64, measurement: f64, dt: f64) -> f64 {
        let error = self.config.wrapped_error(measurement, setpoint);

        let p = self.config.kp * error;

        self.integral += error * dt * self.config.ki;
        let i = self.integral;

        let d = if self.first_update {
            self.first_update = false;
            0.0
        } else {
            self.config.kd * (error - self.prev_error) / dt
        };

        self.prev_rate_error = (error - self.prev_error) / dt;
        self.prev_error = error;

        p + i + d
    }

    /// True once the last update was within both tolerances.
    pub fn at_setpoint(&self) -> bool {
        !self.first_update
            && libm::fabs(self.prev_error) <= self.config.tolerance
            && libm::fabs(self.prev_rate_error) <= self.config.rate_tolerance
    }

    /// The config snapshot this controller was built from.
    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedbackBuilder;

    const DT: f64 = 0.02;

    #[test]
    fn test_proportional_only() {
        let config = FeedbackBuilder::defaults().kp(2.0).build();
        let mut controller = FeedbackController::from_config(&config);

        let out = controller.update(1.0, 0.25, DT);
        assert!((out - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_takes_short_path() {
        let config = FeedbackBuilder::defaults().kp(1.0).continuous(true).build();
        let mut controller = FeedbackController::from_config(&config);

        // 0.49 -> -0.49 should command the short way across the wrap
        let out = controller.update(-0.49, 0.49, DT);
        assert!((out - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_integral_accumulates() {
        let config = FeedbackBuilder::defaults().ki(1.0).build();
        let mut controller = FeedbackController::from_config(&config);

        let first = controller.update(1.0, 0.0, DT);
        let second = controller.update(1.0, 0.0, DT);
        assert!(second > first);
    }

    #[test]
    fn test_at_setpoint_respects_tolerances() {
        let config = FeedbackBuilder::defaults()
            .kp(1.0)
            .tolerance(0.05)
            .rate_tolerance(10.0)
            .build();
        let mut controller = FeedbackController::from_config(&config);

        controller.update(1.0, 0.0, DT);
        assert!(!controller.at_setpoint());

        controller.update(1.0, 0.99, DT);
        // error 0.01 within tolerance, but rate of error change is large
        controller.update(1.0, 0.99, DT);
        assert!(controller.at_setpoint());
    }

    #[test]
    fn test_reset_clears_history() {
        let config = FeedbackBuilder::defaults().ki(1.0).build();
        let mut controller = FeedbackController::from_config(&config);

        controller.update(1.0, 0.0, DT);
        controller.reset();

        let after_reset = controller.update(1.0, 0.0, DT);
        let mut fresh = FeedbackController::from_config(&config);
        assert_eq!(after_reset, fresh.update(1.0, 0.0, DT));
    }
}
