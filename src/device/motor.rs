//! Motor capability trait and motor device variants.

use crate::applier::NativeConfig;
use crate::backend::{Command, HardwareBackend, SignalId};
use crate::can::CanAddress;
use crate::config::{validate_controlled_motor, ControlledMotorBuilder, ControlledMotorConfig};
use crate::device::{report_unsupported, Capability, DeviceCore, DeviceState};
use crate::diagnostics::DiagnosticSink;

/// Uniform surface of a configurable motor.
///
/// Every behavioral parameter lives in the [`ControlledMotorConfig`]
/// snapshot; mutating any single parameter goes through
/// [`reconfigure`](MotorDevice::reconfigure), which re-applies the whole
/// configuration. Signal accessors and fused-input setters have inert
/// defaults so callers can hold any motor behind this trait: a variant that
/// cannot provide a value reports one warning and returns 0.0.
pub trait MotorDevice {
    /// The sink failures and warnings are reported to.
    fn diagnostics(&self) -> &dyn DiagnosticSink;

    /// Current lifecycle state.
    fn state(&self) -> DeviceState;

    /// The active configuration snapshot.
    fn config(&self) -> &ControlledMotorConfig;

    /// Replace the stored snapshot without applying it.
    fn set_config(&mut self, config: ControlledMotorConfig);

    /// Apply the stored snapshot to hardware. Returns acceptance.
    fn configure(&mut self) -> bool;

    /// Whether this device can honor a capability.
    fn supports(&self, capability: Capability) -> bool;

    /// Mechanism position in rotations.
    fn pos_rotations(&mut self) -> f64 {
        report_unsupported(self.diagnostics(), Capability::Position);
        0.0
    }

    /// Mechanism velocity in rotations per second.
    fn vel_rotations_per_sec(&mut self) -> f64 {
        report_unsupported(self.diagnostics(), Capability::Velocity);
        0.0
    }

    /// Mechanism acceleration in rotations per second per second.
    fn acc_rotations_per_sec_per_sec(&mut self) -> f64 {
        report_unsupported(self.diagnostics(), Capability::Acceleration);
        0.0
    }

    /// Applied motor voltage.
    fn voltage(&mut self) -> f64 {
        report_unsupported(self.diagnostics(), Capability::Voltage);
        0.0
    }

    /// Stator current in amps.
    fn stator_current(&mut self) -> f64 {
        report_unsupported(self.diagnostics(), Capability::StatorCurrent);
        0.0
    }

    /// Supply current in amps.
    fn supply_current(&mut self) -> f64 {
        report_unsupported(self.diagnostics(), Capability::SupplyCurrent);
        0.0
    }

    /// Push a fused external position measurement.
    fn set_input_pos_rotations(&mut self, _pos_rotations: f64) {
        report_unsupported(self.diagnostics(), Capability::ExternalPositionInput);
    }

    /// Push a fused external velocity measurement.
    fn set_input_vel_rotations_per_sec(&mut self, _vel_rotations_per_sec: f64) {
        report_unsupported(self.diagnostics(), Capability::ExternalVelocityInput);
    }

    /// Push a fused external acceleration measurement.
    fn set_input_acc_rotations_per_sec_per_sec(&mut self, _acc: f64) {
        report_unsupported(self.diagnostics(), Capability::ExternalAccelerationInput);
    }

    /// Per-loop housekeeping. Default no-op.
    fn periodic(&mut self) {}

    /// Replace the snapshot and re-apply it. The stored snapshot changes
    /// even when the apply is rejected.
    fn reconfigure(&mut self, config: ControlledMotorConfig) -> bool {
        self.set_config(config);
        self.configure()
    }

    /// Change only the neutral behavior, re-applying the configuration.
    fn set_neutral_brake(&mut self, neutral_brake: bool) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .neutral_brake(neutral_brake)
            .build();
        self.reconfigure(next)
    }

    /// Change only the positive direction, re-applying the configuration.
    fn set_ccw_positive(&mut self, ccw_positive: bool) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .ccw_positive(ccw_positive)
            .build();
        self.reconfigure(next)
    }

    /// Change only the gear ratio, re-applying the configuration.
    fn set_motor_to_mech_ratio(&mut self, ratio: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .motor_to_mech_ratio(ratio)
            .build();
        self.reconfigure(next)
    }

    /// Change only the stator current limit, re-applying the configuration.
    fn set_stator_current_limit(&mut self, amps: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .stator_current_limit(amps)
            .build();
        self.reconfigure(next)
    }

    /// Change only the supply current limit, re-applying the configuration.
    fn set_supply_current_limit(&mut self, amps: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .supply_current_limit(amps)
            .build();
        self.reconfigure(next)
    }

    /// Change only the profile cruise velocity, re-applying the
    /// configuration.
    fn set_max_velocity(&mut self, rotations_per_sec: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .max_velocity(rotations_per_sec)
            .build();
        self.reconfigure(next)
    }

    /// Change only the profile acceleration, re-applying the configuration.
    fn set_max_acceleration(&mut self, rotations_per_sec_per_sec: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .max_acceleration(rotations_per_sec_per_sec)
            .build();
        self.reconfigure(next)
    }

    /// Change only the proportional gain, re-applying the configuration.
    fn set_kp(&mut self, kp: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).kp(kp).build();
        self.reconfigure(next)
    }

    /// Change only the integral gain, re-applying the configuration.
    fn set_ki(&mut self, ki: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).ki(ki).build();
        self.reconfigure(next)
    }

    /// Change only the derivative gain, re-applying the configuration.
    fn set_kd(&mut self, kd: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).kd(kd).build();
        self.reconfigure(next)
    }

    /// Change only the static feedforward, re-applying the configuration.
    fn set_ks(&mut self, ks: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).ks(ks).build();
        self.reconfigure(next)
    }

    /// Change only the gravity feedforward, re-applying the configuration.
    fn set_kg(&mut self, kg: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).kg(kg).build();
        self.reconfigure(next)
    }

    /// Change only the velocity feedforward, re-applying the configuration.
    fn set_kv(&mut self, kv: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).kv(kv).build();
        self.reconfigure(next)
    }

    /// Change only the acceleration feedforward, re-applying the
    /// configuration.
    fn set_ka(&mut self, ka: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config()).ka(ka).build();
        self.reconfigure(next)
    }

    /// Change only continuous position wrap, re-applying the configuration.
    fn set_continuous(&mut self, continuous: bool) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .continuous(continuous)
            .build();
        self.reconfigure(next)
    }

    /// Change only the position tolerance, re-applying the configuration.
    fn set_pos_tolerance(&mut self, rotations: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .pos_tolerance(rotations)
            .build();
        self.reconfigure(next)
    }

    /// Change only the velocity tolerance, re-applying the configuration.
    fn set_vel_tolerance(&mut self, rotations_per_sec: f64) -> bool {
        let next = ControlledMotorBuilder::edit(self.config())
            .vel_tolerance(rotations_per_sec)
            .build();
        self.reconfigure(next)
    }
}

/// Full-featured CAN motor controller.
///
/// All six signals read from hardware; fused external inputs are not
/// accepted and degrade to the default warning policy.
#[derive(Debug)]
pub struct CanMotor<B, S> {
    core: DeviceCore<B, S>,
    config: ControlledMotorConfig,
}

impl<B: HardwareBackend, S: DiagnosticSink> CanMotor<B, S> {
    /// Bind a CAN address and self-configure. Construction always returns a
    /// usable device; an apply failure lands it in `Faulted` with a
    /// diagnostic instead of failing construction.
    pub fn new(address: CanAddress, config: ControlledMotorConfig, backend: B, sink: S) -> Self {
        let mut motor = Self {
            core: DeviceCore::new(address, backend, sink),
            config,
        };
        motor.configure();
        motor
    }

    /// The device's bus address.
    pub fn address(&self) -> &CanAddress {
        self.core.address()
    }

    /// Read access to the backend, mainly for simulated backends in tests.
    pub fn backend(&self) -> &B {
        self.core.backend()
    }

    /// Command an open-loop output voltage.
    pub fn set_voltage(&mut self, volts: f64) {
        self.core.command(&Command::Voltage(volts));
    }
}

impl<B: HardwareBackend, S: DiagnosticSink> MotorDevice for CanMotor<B, S> {
    fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.core.sink()
    }

    fn state(&self) -> DeviceState {
        self.core.state()
    }

    fn config(&self) -> &ControlledMotorConfig {
        &self.config
    }

    fn set_config(&mut self, config: ControlledMotorConfig) {
        self.config = config;
    }

    fn configure(&mut self) -> bool {
        let native = NativeConfig::from_controlled_motor(&self.config);
        self.core
            .apply(&native, validate_controlled_motor(&self.config))
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::Position
                | Capability::Velocity
                | Capability::Acceleration
                | Capability::Voltage
                | Capability::StatorCurrent
                | Capability::SupplyCurrent
        )
    }

    fn pos_rotations(&mut self) -> f64 {
        self.core.read(SignalId::Position)
    }

    fn vel_rotations_per_sec(&mut self) -> f64 {
        self.core.read(SignalId::Velocity)
    }

    fn acc_rotations_per_sec_per_sec(&mut self) -> f64 {
        self.core.read(SignalId::Acceleration)
    }

    fn voltage(&mut self) -> f64 {
        self.core.read(SignalId::Voltage)
    }

    fn stator_current(&mut self) -> f64 {
        self.core.read(SignalId::StatorCurrent)
    }

    fn supply_current(&mut self) -> f64 {
        self.core.read(SignalId::SupplyCurrent)
    }
}

/// Simulated motor with no hardware behind it.
///
/// Accepts every capability. Signal values come from fused external inputs
/// or default to zero, so swapping a [`CanMotor`] for a `SimMotor` behind
/// [`MotorDevice`] needs no caller changes.
#[derive(Debug)]
pub struct SimMotor<S> {
    sink: S,
    state: DeviceState,
    config: ControlledMotorConfig,
    pos: f64,
    vel: f64,
    acc: f64,
    volts: f64,
}

impl<S: DiagnosticSink> SimMotor<S> {
    /// Create a simulated motor and self-configure (validation only).
    pub fn new(config: ControlledMotorConfig, sink: S) -> Self {
        let mut motor = Self {
            sink,
            state: DeviceState::Uninitialized,
            config,
            pos: 0.0,
            vel: 0.0,
            acc: 0.0,
            volts: 0.0,
        };
        motor.configure();
        motor
    }

    /// Command an open-loop output voltage.
    pub fn set_voltage(&mut self, volts: f64) {
        self.volts = volts;
    }
}

impl<S: DiagnosticSink> MotorDevice for SimMotor<S> {
    fn diagnostics(&self) -> &dyn DiagnosticSink {
        &self.sink
    }

    fn state(&self) -> DeviceState {
        self.state
    }

    fn config(&self) -> &ControlledMotorConfig {
        &self.config
    }

    fn set_config(&mut self, config: ControlledMotorConfig) {
        self.config = config;
    }

    fn configure(&mut self) -> bool {
        self.state = DeviceState::Configuring;
        let accepted = validate_controlled_motor(&self.config).is_ok();
        self.state = if accepted {
            DeviceState::Ready
        } else {
            DeviceState::Faulted
        };
        accepted
    }

    fn supports(&self, _capability: Capability) -> bool {
        true
    }

    fn pos_rotations(&mut self) -> f64 {
        self.pos
    }

    fn vel_rotations_per_sec(&mut self) -> f64 {
        self.vel
    }

    fn acc_rotations_per_sec_per_sec(&mut self) -> f64 {
        self.acc
    }

    fn voltage(&mut self) -> f64 {
        self.volts
    }

    fn stator_current(&mut self) -> f64 {
        0.0
    }

    fn supply_current(&mut self) -> f64 {
        0.0
    }

    fn set_input_pos_rotations(&mut self, pos_rotations: f64) {
        self.pos = pos_rotations;
    }

    fn set_input_vel_rotations_per_sec(&mut self, vel_rotations_per_sec: f64) {
        self.vel = vel_rotations_per_sec;
    }

    fn set_input_acc_rotations_per_sec_per_sec(&mut self, acc: f64) {
        self.acc = acc;
    }
}
