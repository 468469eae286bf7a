//! Feedforward controller configuration.

use serde::Deserialize;

/// Immutable snapshot of feedforward gains.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedforwardConfig {
    /// Voltage to overcome static friction.
    pub ks: f64,

    /// Voltage to overcome gravity.
    pub kg: f64,

    /// Voltage per unit velocity.
    pub kv: f64,

    /// Voltage per unit acceleration.
    pub ka: f64,
}

impl FeedforwardConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> FeedforwardBuilder {
        FeedforwardBuilder::defaults()
    }

    /// Feedforward voltage for a velocity and acceleration setpoint.
    ///
    /// The static term follows the sign of the velocity setpoint and drops
    /// out entirely at zero velocity.
    pub fn calculate(&self, vel_rotations_per_sec: f64, acc_rotations_per_sec_per_sec: f64) -> f64 {
        let static_volts = if vel_rotations_per_sec == 0.0 {
            0.0
        } else {
            libm::copysign(self.ks, vel_rotations_per_sec)
        };

        static_volts
            + self.kg
            + self.kv * vel_rotations_per_sec
            + self.ka * acc_rotations_per_sec_per_sec
    }
}

impl Default for FeedforwardConfig {
    fn default() -> Self {
        FeedforwardBuilder::defaults().build()
    }
}

/// Mutable accumulator producing [`FeedforwardConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct FeedforwardBuilder {
    ks: f64,
    kg: f64,
    kv: f64,
    ka: f64,
}

impl FeedforwardBuilder {
    /// Returns a builder with default values.
    pub fn defaults() -> Self {
        Self {
            ks: 0.0,
            kg: 0.0,
            kv: 0.0,
            ka: 0.0,
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &FeedforwardConfig) -> Self {
        Self {
            ks: config.ks,
            kg: config.kg,
            kv: config.kv,
            ka: config.ka,
        }
    }

    /// Set static friction voltage.
    pub fn ks(mut self, ks: f64) -> Self {
        self.ks = ks;
        self
    }

    /// Set gravity voltage.
    pub fn kg(mut self, kg: f64) -> Self {
        self.kg = kg;
        self
    }

    /// Set velocity voltage.
    pub fn kv(mut self, kv: f64) -> Self {
        self.kv = kv;
        self
    }

    /// Set acceleration voltage.
    pub fn ka(mut self, ka: f64) -> Self {
        self.ka = ka;
        self
    }

    /// Produce a new, independent snapshot.
    pub fn build(&self) -> FeedforwardConfig {
        FeedforwardConfig {
            ks: self.ks,
            kg: self.kg,
            kv: self.kv,
            ka: self.ka,
        }
    }
}
