//! Absolute encoder configuration.

use serde::Deserialize;

/// Immutable snapshot of absolute encoder calibration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AbsoluteEncoderConfig {
    /// True means positive rotation reads counter-clockwise.
    pub ccw_positive: bool,

    /// Ratio of sensor rotations to mechanism rotations.
    pub sensor_to_mech_ratio: f64,

    /// Magnet offset of the encoder in rotations.
    pub offset_rotations: f64,
}

impl AbsoluteEncoderConfig {
    /// Returns a builder seeded with default values.
    pub fn builder() -> AbsoluteEncoderBuilder {
        AbsoluteEncoderBuilder::defaults()
    }
}

impl Default for AbsoluteEncoderConfig {
    fn default() -> Self {
        AbsoluteEncoderBuilder::defaults().build()
    }
}

/// Mutable accumulator producing [`AbsoluteEncoderConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct AbsoluteEncoderBuilder {
    ccw_positive: bool,
    sensor_to_mech_ratio: f64,
    offset_rotations: f64,
}

impl AbsoluteEncoderBuilder {
    /// Returns a builder with default values.
    pub fn defaults() -> Self {
        Self {
            ccw_positive: true,
            sensor_to_mech_ratio: 1.0,
            offset_rotations: 0.0,
        }
    }

    /// Returns a builder with values copied from the input config.
    pub fn edit(config: &AbsoluteEncoderConfig) -> Self {
        Self {
            ccw_positive: config.ccw_positive,
            sensor_to_mech_ratio: config.sensor_to_mech_ratio,
            offset_rotations: config.offset_rotations,
        }
    }

    /// Set ccw positive.
    pub fn ccw_positive(mut self, ccw_positive: bool) -> Self {
        self.ccw_positive = ccw_positive;
        self
    }

    /// Set sensor to mechanism ratio.
    pub fn sensor_to_mech_ratio(mut self, sensor_to_mech_ratio: f64) -> Self {
        self.sensor_to_mech_ratio = sensor_to_mech_ratio;
        self
    }

    /// Set encoder offset in rotations.
    pub fn offset_rotations(mut self, offset_rotations: f64) -> Self {
        self.offset_rotations = offset_rotations;
        self
    }

    /// Produce a new, independent snapshot.
    pub fn build(&self) -> AbsoluteEncoderConfig {
        AbsoluteEncoderConfig {
            ccw_positive: self.ccw_positive,
            sensor_to_mech_ratio: self.sensor_to_mech_ratio,
            offset_rotations: self.offset_rotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = AbsoluteEncoderConfig::default();
        assert!(config.ccw_positive);
        assert_eq!(config.sensor_to_mech_ratio, 1.0);
        assert_eq!(config.offset_rotations, 0.0);
    }

    #[test]
    fn test_edit_round_trip() {
        let config = AbsoluteEncoderConfig::builder()
            .ccw_positive(false)
            .offset_rotations(0.25)
            .build();

        assert_eq!(AbsoluteEncoderBuilder::edit(&config).build(), config);
    }
}
