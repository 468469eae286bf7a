//! # actuator-hal
//!
//! Configuration-driven hardware abstraction for closed-loop actuator control.
//!
//! ## Features
//!
//! - **Configuration-driven**: Every behavioral parameter lives in an
//!   immutable config snapshot built by a chained builder (or loaded from
//!   TOML)
//! - **Whole-config reapply**: Changing any single parameter re-applies the
//!   entire configuration to the physical device, atomically from the
//!   caller's point of view
//! - **Uniform capability surface**: Motors and encoders are held behind
//!   traits; devices that cannot provide a signal degrade to an inert
//!   default plus one diagnostic instead of panicking
//! - **no_std compatible**: Core library works without standard library
//! - **Simulation built in**: Backendless device variants and an in-memory
//!   backend for tests and bring-up
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use actuator_hal::{CanAddress, CanMotor, ControlledMotorConfig, MotorDevice, NullSink};
//!
//! let config = ControlledMotorConfig::builder()
//!     .kp(4.0)
//!     .stator_current_limit(60.0)
//!     .build();
//!
//! // Binds the backend, applies the config, lands Ready or Faulted.
//! let mut motor = CanMotor::new(CanAddress::new(3), config, backend, NullSink);
//!
//! // Per-field setter: edit the snapshot, re-apply the whole config.
//! motor.set_kp(6.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod applier;
pub mod backend;
pub mod can;
pub mod config;
pub mod control;
pub mod device;
pub mod diagnostics;
pub mod error;

// Re-exports for ergonomic API
pub use applier::{ConfigApplier, NativeConfig, APPLY_ATTEMPTS};
pub use backend::{Command, HardwareBackend, SignalId, SimBackend};
pub use can::CanAddress;
pub use config::{
    AbsoluteEncoderConfig, ControlledMotorConfig, FeedbackConfig, FeedforwardConfig,
    MechanismConfig, MotionProfileConfig, MotorConfig, PositionControllerConfig,
};
pub use control::{FeedbackController, SlewRateLimiter};
pub use device::{
    AbsoluteEncoded, CanAbsoluteEncoder, CanMotor, Capability, DeviceState, MotorDevice,
    PositionControlled, SimMotor, SoftPositionController, SteerMotor,
};
pub use diagnostics::{DiagnosticSink, NullSink, RecordingSink};
pub use error::{ConfigError, Result};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
