//! Position-controlled motor trait and variants.

use crate::applier::NativeConfig;
use crate::backend::{Command, HardwareBackend, SignalId};
use crate::can::CanAddress;
use crate::config::{
    validate_controlled_motor, ControlledMotorConfig, FeedbackBuilder, FeedforwardBuilder,
    MotionProfileBuilder, PositionControllerConfig,
};
use crate::control::FeedbackController;
use crate::device::{Capability, DeviceCore, DeviceState, MotorDevice, CONTROL_PERIOD};
use crate::diagnostics::DiagnosticSink;

/// A motor that tracks position setpoints.
///
/// Both operations are mandatory: a device without closed-loop position
/// control has no business implementing this trait.
pub trait PositionControlled: MotorDevice {
    /// Command a position setpoint with a velocity reference.
    fn set_setpoint(&mut self, pos_rotations: f64, vel_rotations_per_sec: f64);

    /// Overwrite the device's notion of its current position.
    fn set_pos(&mut self, pos_rotations: f64);
}

/// CAN motor controller with onboard closed-loop position control.
///
/// Setpoints go to the hardware's gain slot; a fused external position
/// measurement may be pushed in and is then served by `pos_rotations`
/// instead of the onboard sensor.
#[derive(Debug)]
pub struct SteerMotor<B, S> {
    core: DeviceCore<B, S>,
    config: PositionControllerConfig,
    fused_pos: Option<f64>,
}

impl<B: HardwareBackend, S: DiagnosticSink> SteerMotor<B, S> {
    /// Bind a CAN address and self-configure.
    pub fn new(address: CanAddress, config: PositionControllerConfig, backend: B, sink: S) -> Self {
        let mut motor = Self {
            core: DeviceCore::new(address, backend, sink),
            config,
            fused_pos: None,
        };
        motor.configure();
        motor
    }

    /// Read access to the backend, mainly for simulated backends in tests.
    pub fn backend(&self) -> &B {
        self.core.backend()
    }
}

impl<B: HardwareBackend, S: DiagnosticSink> MotorDevice for SteerMotor<B, S> {
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
                | Capability::ExternalPositionInput
        )
    }

    fn pos_rotations(&mut self) -> f64 {
        match self.fused_pos {
            Some(pos) => pos,
            None => self.core.read(SignalId::Position),
        }
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

    fn set_input_pos_rotations(&mut self, pos_rotations: f64) {
        self.fused_pos = Some(pos_rotations);
    }
}

impl<B: HardwareBackend, S: DiagnosticSink> PositionControlled for SteerMotor<B, S> {
    fn set_setpoint(&mut self, pos_rotations: f64, vel_rotations_per_sec: f64) {
        self.core.command(&Command::Setpoint {
            pos_rotations,
            vel_rotations_per_sec,
        });
    }

    fn set_pos(&mut self, pos_rotations: f64) {
        self.core.command(&Command::RezeroSensor(pos_rotations));
    }
}

/// Simulated position controller running the software control stack.
///
/// Builds a [`FeedbackController`], a feedforward model, and a velocity
/// clamp from the snapshot's gains and limits, and integrates them in
/// `periodic()` at [`CONTROL_PERIOD`]. The measured position comes from the
/// fused external input (or `set_pos`).
#[derive(Debug)]
pub struct SoftPositionController<S> {
    sink: S,
    state: DeviceState,
    config: PositionControllerConfig,
    controller: FeedbackController,
    measured_pos: f64,
    measured_vel: f64,
    setpoint_pos: f64,
    setpoint_vel: f64,
    output_volts: f64,
}

impl<S: DiagnosticSink> SoftPositionController<S> {
    /// Create a software position controller and self-configure.
    pub fn new(config: PositionControllerConfig, sink: S) -> Self {
        let controller = Self::build_controller(&config);
        let mut device = Self {
            sink,
            state: DeviceState::Uninitialized,
            config,
            controller,
            measured_pos: 0.0,
            measured_vel: 0.0,
            setpoint_pos: 0.0,
            setpoint_vel: 0.0,
            output_volts: 0.0,
        };
        device.configure();
        device
    }

    /// Output voltage computed by the last `periodic()`.
    pub fn output_volts(&self) -> f64 {
        self.output_volts
    }

    /// True once position and velocity errors are within the snapshot's
    /// tolerances.
    pub fn at_setpoint(&self) -> bool {
        self.controller.at_setpoint()
    }

    fn build_controller(config: &PositionControllerConfig) -> FeedbackController {
        FeedbackBuilder::defaults()
            .kp(config.kp)
            .ki(config.ki)
            .kd(config.kd)
            .continuous(config.continuous)
            .tolerance(config.pos_tolerance)
            .rate_tolerance(config.vel_tolerance)
            .build()
            .create_controller()
    }
}

impl<S: DiagnosticSink> MotorDevice for SoftPositionController<S> {
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
        if accepted {
            self.controller = Self::build_controller(&self.config);
            self.state = DeviceState::Ready;
        } else {
            self.state = DeviceState::Faulted;
        }
        accepted
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::Position
                | Capability::Velocity
                | Capability::Voltage
                | Capability::ExternalPositionInput
                | Capability::ExternalVelocityInput
        )
    }

    fn pos_rotations(&mut self) -> f64 {
        self.measured_pos
    }

    fn vel_rotations_per_sec(&mut self) -> f64 {
        self.measured_vel
    }

    fn voltage(&mut self) -> f64 {
        self.output_volts
    }

    fn set_input_pos_rotations(&mut self, pos_rotations: f64) {
        self.measured_pos = pos_rotations;
    }

    fn set_input_vel_rotations_per_sec(&mut self, vel_rotations_per_sec: f64) {
        self.measured_vel = vel_rotations_per_sec;
    }

    fn periodic(&mut self) {
        if !self.state.is_ready() {
            return;
        }
        let profile = MotionProfileBuilder::defaults()
            .max_velocity(self.config.max_velocity)
            .max_acceleration(self.config.max_acceleration)
            .build();
        let feedforward = FeedforwardBuilder::defaults()
            .ks(self.config.ks)
            .kg(self.config.kg)
            .kv(self.config.kv)
            .ka(self.config.ka)
            .build();

        let vel_ref = profile.clamp_velocity(self.setpoint_vel);
        let fb = self
            .controller
            .update(self.setpoint_pos, self.measured_pos, CONTROL_PERIOD);
        self.output_volts = fb + feedforward.calculate(vel_ref, 0.0);
    }
}

impl<S: DiagnosticSink> PositionControlled for SoftPositionController<S> {
    fn set_setpoint(&mut self, pos_rotations: f64, vel_rotations_per_sec: f64) {
        self.setpoint_pos = pos_rotations;
        self.setpoint_vel = vel_rotations_per_sec;
    }

    fn set_pos(&mut self, pos_rotations: f64) {
        self.measured_pos = pos_rotations;
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimBackend;
    use crate::config::ControlledMotorBuilder;
    use crate::diagnostics::{NullSink, RecordingSink};

    #[test]
    fn test_steer_motor_forwards_setpoints() {
        let mut motor = SteerMotor::new(
            CanAddress::new(9),
            ControlledMotorBuilder::defaults().build(),
            SimBackend::accepting(),
            NullSink,
        );

        motor.set_setpoint(0.25, 1.0);
        assert_eq!(
            motor.backend().last_command(),
            Some(&Command::Setpoint {
                pos_rotations: 0.25,
                vel_rotations_per_sec: 1.0
            })
        );

        motor.set_pos(0.0);
        assert_eq!(
            motor.backend().last_command(),
            Some(&Command::RezeroSensor(0.0))
        );
    }

    #[test]
    fn test_steer_motor_prefers_fused_position() {
        let mut backend = SimBackend::accepting();
        backend.set_signal(SignalId::Position, 0.1);
        let mut motor = SteerMotor::new(
            CanAddress::new(9),
            ControlledMotorBuilder::defaults().build(),
            backend,
            NullSink,
        );

        assert_eq!(motor.pos_rotations(), 0.1);
        motor.set_input_pos_rotations(0.4);
        assert_eq!(motor.pos_rotations(), 0.4);
    }

    #[test]
    fn test_soft_controller_drives_toward_setpoint() {
        let config = ControlledMotorBuilder::defaults()
            .kp(8.0)
            .max_velocity(4.0)
            .build();
        let mut device = SoftPositionController::new(config, NullSink);

        device.set_input_pos_rotations(0.0);
        device.set_setpoint(0.5, 0.0);
        device.periodic();

        assert!(device.output_volts() > 0.0);
    }

    #[test]
    fn test_soft_controller_wraps_continuous_error() {
        // continuous defaults to true; from 0.49 the short way to -0.49 is
        // +0.02 rotations, so the output must be a small positive voltage.
        let config = ControlledMotorBuilder::defaults().kp(1.0).build();
        let mut device = SoftPositionController::new(config, NullSink);

        device.set_input_pos_rotations(0.49);
        device.set_setpoint(-0.49, 0.0);
        device.periodic();

        assert!((device.output_volts() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_soft_controller_reports_unsupported_current() {
        let sink = RecordingSink::new();
        let mut device =
            SoftPositionController::new(ControlledMotorBuilder::defaults().build(), sink);

        assert!(!device.supports(Capability::StatorCurrent));
        assert_eq!(device.stator_current(), 0.0);
        assert_eq!(device.sink.len(), 1);
    }
}
