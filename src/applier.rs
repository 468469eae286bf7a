//! Translation from config snapshots to backend-native configuration, and
//! the bounded-retry push that gets it onto hardware.
//!
//! Snapshots stay vendor-neutral; [`NativeConfig`] is the lowered form a
//! [`HardwareBackend`] understands. [`ConfigApplier::apply`] owns the
//! deferred validation and retry policy so device variants do not repeat it.

use core::fmt::Write as _;

use crate::backend::HardwareBackend;
use crate::can::CanAddress;
use crate::config::{
    AbsoluteEncoderConfig, ControlledMotorConfig, MotorConfig, validate_absolute_encoder,
    validate_controlled_motor, validate_motor,
};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;

/// Number of times a configuration push is attempted before giving up.
pub const APPLY_ATTEMPTS: usize = 3;

/// Backend-native configuration image.
///
/// Produced from a snapshot by one of the translation constructors, then
/// pushed verbatim by [`HardwareBackend::apply_native_config`]. Fields a
/// snapshot kind does not cover keep their zero defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeConfig {
    /// Gain slot proportional term.
    pub kp: f64,
    /// Gain slot integral term.
    pub ki: f64,
    /// Gain slot derivative term.
    pub kd: f64,
    /// Static friction feedforward.
    pub ks: f64,
    /// Gravity feedforward.
    pub kg: f64,
    /// Velocity feedforward.
    pub kv: f64,
    /// Acceleration feedforward.
    pub ka: f64,

    /// Stator current limit in amps.
    pub stator_current_limit: f64,
    /// Stator limit enable. Always on once a limit value exists.
    pub stator_limit_enabled: bool,
    /// Supply current limit in amps.
    pub supply_current_limit: f64,
    /// Supply limit enable. Always on once a limit value exists.
    pub supply_limit_enabled: bool,

    /// Positive-output direction as seen by the hardware.
    pub clockwise_positive: bool,
    /// Hold position when no output is commanded.
    pub brake_neutral: bool,
    /// Rotor or sensor rotations per mechanism rotation.
    pub ratio: f64,
    /// Treat position as wrapping over one rotation.
    pub continuous_wrap: bool,

    /// Motion profile cruise velocity in rotations per second.
    pub max_velocity: f64,
    /// Motion profile acceleration in rotations per second per second.
    pub max_acceleration: f64,

    /// Absolute sensor zero offset in rotations.
    pub offset_rotations: f64,
}

impl NativeConfig {
    /// Lower a plain motor snapshot.
    pub fn from_motor(config: &MotorConfig) -> Self {
        Self {
            stator_current_limit: config.stator_current_limit,
            stator_limit_enabled: true,
            supply_current_limit: config.supply_current_limit,
            supply_limit_enabled: true,
            clockwise_positive: !config.ccw_positive,
            brake_neutral: config.neutral_brake,
            ratio: config.motor_to_mech_ratio,
            ..Self::default()
        }
    }

    /// Lower a controlled motor snapshot: motor fields plus gains, profile
    /// limits, and continuous wrap.
    pub fn from_controlled_motor(config: &ControlledMotorConfig) -> Self {
        Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            ks: config.ks,
            kg: config.kg,
            kv: config.kv,
            ka: config.ka,
            stator_current_limit: config.stator_current_limit,
            stator_limit_enabled: true,
            supply_current_limit: config.supply_current_limit,
            supply_limit_enabled: true,
            clockwise_positive: !config.ccw_positive,
            brake_neutral: config.neutral_brake,
            ratio: config.motor_to_mech_ratio,
            continuous_wrap: config.continuous,
            max_velocity: config.max_velocity,
            max_acceleration: config.max_acceleration,
            ..Self::default()
        }
    }

    /// Lower an absolute encoder snapshot.
    pub fn from_absolute_encoder(config: &AbsoluteEncoderConfig) -> Self {
        Self {
            clockwise_positive: !config.ccw_positive,
            ratio: config.sensor_to_mech_ratio,
            offset_rotations: config.offset_rotations,
            ..Self::default()
        }
    }
}

/// Pushes validated configuration to hardware with bounded retries.
pub struct ConfigApplier;

impl ConfigApplier {
    /// Validate, then push `native` to `backend` up to [`APPLY_ATTEMPTS`]
    /// times.
    ///
    /// `validation` is the outcome of the snapshot-level deferred checks,
    /// produced by the caller before lowering. On any failure, exactly one
    /// diagnostic naming the device id and bus is reported and `false` is
    /// returned. Never panics.
    pub fn apply<B, S>(
        backend: &mut B,
        address: &CanAddress,
        native: &NativeConfig,
        validation: Result<()>,
        sink: &S,
    ) -> bool
    where
        B: HardwareBackend,
        S: DiagnosticSink,
    {
        if validation.is_err() {
            Self::report_failure(address, "rejected by validation", sink);
            return false;
        }

        if Self::attempt(backend, native) {
            return true;
        }

        Self::report_failure(address, "rejected by device", sink);
        false
    }

    /// Push `native` until the backend accepts or attempts run out.
    fn attempt<B: HardwareBackend>(backend: &mut B, native: &NativeConfig) -> bool {
        for _ in 0..APPLY_ATTEMPTS {
            if backend.apply_native_config(native) {
                return true;
            }
        }
        false
    }

    fn report_failure<S: DiagnosticSink>(address: &CanAddress, reason: &str, sink: &S) {
        let mut message = heapless::String::<96>::new();
        // Formatting into a bounded string can only fail by truncation,
        // which is acceptable for a diagnostic line.
        let _ = write!(
            message,
            "config apply failed for device {} on bus '{}': {}",
            address.id, address.bus, reason
        );
        sink.report(&message, false);
    }
}

/// Convenience wrappers pairing each snapshot kind with its deferred checks.
impl ConfigApplier {
    /// Validate and push a plain motor snapshot.
    pub fn apply_motor<B, S>(
        backend: &mut B,
        address: &CanAddress,
        config: &MotorConfig,
        sink: &S,
    ) -> bool
    where
        B: HardwareBackend,
        S: DiagnosticSink,
    {
        let native = NativeConfig::from_motor(config);
        Self::apply(backend, address, &native, validate_motor(config), sink)
    }

    /// Validate and push a controlled motor snapshot.
    pub fn apply_controlled_motor<B, S>(
        backend: &mut B,
        address: &CanAddress,
        config: &ControlledMotorConfig,
        sink: &S,
    ) -> bool
    where
        B: HardwareBackend,
        S: DiagnosticSink,
    {
        let native = NativeConfig::from_controlled_motor(config);
        Self::apply(
            backend,
            address,
            &native,
            validate_controlled_motor(config),
            sink,
        )
    }

    /// Validate and push an absolute encoder snapshot.
    pub fn apply_absolute_encoder<B, S>(
        backend: &mut B,
        address: &CanAddress,
        config: &AbsoluteEncoderConfig,
        sink: &S,
    ) -> bool
    where
        B: HardwareBackend,
        S: DiagnosticSink,
    {
        let native = NativeConfig::from_absolute_encoder(config);
        Self::apply(
            backend,
            address,
            &native,
            validate_absolute_encoder(config),
            sink,
        )
    }
}
