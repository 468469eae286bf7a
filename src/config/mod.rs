//! Configuration snapshots and builders.
//!
//! One immutable snapshot type per device kind, each paired with a builder
//! that starts from documented defaults (`defaults()`) or an existing snapshot
//! (`edit()`). Setters validate nothing; validation is deferred to
//! application time.

mod controlled;
mod encoder;
mod feedback;
mod feedforward;
#[cfg(feature = "std")]
mod loader;
mod mechanism;
mod motor;
mod profile;
mod validation;

pub use controlled::{ControlledMotorBuilder, ControlledMotorConfig, PositionControllerConfig};
pub use encoder::{AbsoluteEncoderBuilder, AbsoluteEncoderConfig};
pub use feedback::{FeedbackBuilder, FeedbackConfig, CONTINUOUS_RANGE};
pub use feedforward::{FeedforwardBuilder, FeedforwardConfig};
pub use mechanism::{MechanismBuilder, MechanismConfig};
pub use motor::{MotorBuilder, MotorConfig};
pub use profile::{MotionProfileBuilder, MotionProfileConfig};
pub use validation::{
    validate_absolute_encoder, validate_controlled_motor, validate_mechanism, validate_motor,
};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
