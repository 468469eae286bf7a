//! Mechanism configuration.
//!
//! A mechanism config aggregates one snapshot of each subordinate kind. The
//! relationship is aggregation, not inheritance: subsystems pull out the parts
//! their devices need.

use serde::Deserialize;

use super::encoder::{AbsoluteEncoderBuilder, AbsoluteEncoderConfig};
use super::feedback::{FeedbackBuilder, FeedbackConfig};
use super::feedforward::{FeedforwardBuilder, FeedforwardConfig};
use super::motor::{MotorBuilder, MotorConfig};
use super::profile::{MotionProfileBuilder, MotionProfileConfig};

/// Immutable aggregate of every snapshot kind describing one mechanism.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MechanismConfig {
    /// Absolute encoder config.
    pub absolute_encoder: AbsoluteEncoderConfig,

    /// Feedback controller config.
    pub feedback: FeedbackConfig,

    /// Feedforward controller config.
    pub feedforward: FeedforwardConfig,

    /// Motion profile config.
    pub motion_profile: MotionProfileConfig,

    /// Motor config.
    pub motor: MotorConfig,
}

impl MechanismConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> MechanismBuilder {
        MechanismBuilder::defaults()
    }
}

/// Mutable accumulator producing [`MechanismConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct MechanismBuilder {
    absolute_encoder: AbsoluteEncoderConfig,
    feedback: FeedbackConfig,
    feedforward: FeedforwardConfig,
    motion_profile: MotionProfileConfig,
    motor: MotorConfig,
}

impl MechanismBuilder {
    /// Returns a builder with each subordinate kind at its defaults.
    pub fn defaults() -> Self {
        Self {
            absolute_encoder: AbsoluteEncoderBuilder::defaults().build(),
            feedback: FeedbackBuilder::defaults().build(),
            feedforward: FeedforwardBuilder::defaults().build(),
            motion_profile: MotionProfileBuilder::defaults().build(),
            motor: MotorBuilder::defaults().build(),
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &MechanismConfig) -> Self {
        Self {
            absolute_encoder: config.absolute_encoder.clone(),
            feedback: config.feedback.clone(),
            feedforward: config.feedforward.clone(),
            motion_profile: config.motion_profile.clone(),
            motor: config.motor.clone(),
        }
    }

    /// Set the absolute encoder config.
    pub fn absolute_encoder(mut self, absolute_encoder: AbsoluteEncoderConfig) -> Self {
        self.absolute_encoder = absolute_encoder;
        self
    }

    /// Set the feedback controller config.
    pub fn feedback(mut self, feedback: FeedbackConfig) -> Self {
        self.feedback = feedback;
        self
    }

    /// Set the feedforward controller config.
    pub fn feedforward(mut self, feedforward: FeedforwardConfig) -> Self {
        self.feedforward = feedforward;
        self
    }

    /// Set the motion profile config.
    pub fn motion_profile(mut self, motion_profile: MotionProfileConfig) -> Self {
        self.motion_profile = motion_profile;
        self
    }

    /// Set the motor config.
    pub fn motor(mut self, motor: MotorConfig) -> Self {
        self.motor = motor;
        self
    }

    /// Produce a new, independent snapshot.
    pub fn build(&self) -> MechanismConfig {
        MechanismConfig {
            absolute_encoder: self.absolute_encoder.clone(),
            feedback: self.feedback.clone(),
            feedforward: self.feedforward.clone(),
            motion_profile: self.motion_profile.clone(),
            motor: self.motor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compose_subordinate_defaults() {
        let config = MechanismConfig::builder().build();
        assert_eq!(config.motor, MotorConfig::default());
        assert_eq!(config.feedback, FeedbackConfig::default());
    }

    #[test]
    fn test_edit_round_trip() {
        let config = MechanismConfig::builder()
            .motor(MotorConfig::builder().neutral_brake(true).build())
            .feedback(FeedbackConfig::builder().kp(1.5).build())
            .build();

        assert_eq!(MechanismBuilder::edit(&config).build(), config);
    }

    #[test]
    fn test_subordinate_swap_leaves_rest() {
        let base = MechanismConfig::builder().build();
        let edited = MechanismBuilder::edit(&base)
            .feedforward(FeedforwardConfig::builder().kv(2.0).build())
            .build();

        assert_eq!(edited.motor, base.motor);
        assert_eq!(edited.feedforward.kv, 2.0);
    }
}
