//! Error types for actuator-hal.
//!
//! Only the configuration loading and validation path returns errors. The
//! device layer never propagates errors across its public contract: apply
//! outcomes are booleans and failures are reported to the diagnostic sink.

use core::fmt;

/// Result type alias using the library's error type.
pub type Result<T> = core::result::Result<T, ConfigError>;

/// Configuration parsing and validation errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Ratio must be nonzero (motor-to-mechanism or sensor-to-mechanism)
    InvalidRatio {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },
    /// Current limit, velocity, or acceleration must be non-negative
    NegativeLimit {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },
    /// Tolerance must be non-negative
    NegativeTolerance {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidRatio { field, value } => {
                write!(f, "Invalid ratio {}: {}. Must be nonzero", field, value)
            }
            ConfigError::NegativeLimit { field, value } => {
                write!(f, "Invalid limit {}: {}. Must be >= 0", field, value)
            }
            ConfigError::NegativeTolerance { field, value } => {
                write!(f, "Invalid tolerance {}: {}. Must be >= 0", field, value)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
