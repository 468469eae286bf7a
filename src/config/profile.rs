//! Motion profile configuration.
//!
//! A motion profile is an opaque pair of limits at this layer; trajectory
//! generation happens elsewhere.

use serde::Deserialize;

use crate::control::SlewRateLimiter;

/// Immutable snapshot of motion profile limits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionProfileConfig {
    /// Maximum velocity of the profile in rotations per second.
    pub max_velocity: f64,

    /// Maximum acceleration of the profile in rotations per second per second.
    pub max_acceleration: f64,
}

impl MotionProfileConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> MotionProfileBuilder {
        MotionProfileBuilder::defaults()
    }

    /// Acceleration that ramps from rest to `max_speed` in `ramp_seconds`.
    pub fn acceleration_from_ramp(max_speed: f64, ramp_seconds: f64) -> f64 {
        max_speed / ramp_seconds
    }

    /// Clamp a velocity command to the profile's velocity limit.
    pub fn clamp_velocity(&self, velocity: f64) -> f64 {
        velocity.clamp(-self.max_velocity, self.max_velocity)
    }

    /// Creates a new acceleration (slew rate) limiter using this config.
    pub fn create_rate_limiter(&self) -> SlewRateLimiter {
        SlewRateLimiter::new(self.max_acceleration)
    }
}

impl Default for MotionProfileConfig {
    fn default() -> Self {
        MotionProfileBuilder::defaults().build()
    }
}

/// Mutable accumulator producing [`MotionProfileConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct MotionProfileBuilder {
    max_velocity: f64,
    max_acceleration: f64,
}

impl MotionProfileBuilder {
    /// Returns a builder with default values.
    pub fn defaults() -> Self {
        Self {
            max_velocity: 0.0,
            max_acceleration: 0.0,
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &MotionProfileConfig) -> Self {
        Self {
            max_velocity: config.max_velocity,
            max_acceleration: config.max_acceleration,
        }
    }

    /// Set max velocity.
    pub fn max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set max acceleration.
    pub fn max_acceleration(mut self, max_acceleration: f64) -> Self {
        self.max_acceleration = max_acceleration;
        self
    }

    /// Produce a new, independent snapshot.
    pub fn build(&self) -> MotionProfileConfig {
        MotionProfileConfig {
            max_velocity: self.max_velocity,
            max_acceleration: self.max_acceleration,
        }
    }
}
