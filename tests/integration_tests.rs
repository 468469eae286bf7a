//! Integration tests for actuator-hal.
//!
//! These exercise the full path from config snapshot (or TOML) through the
//! applier into the device state machine, using the in-memory backend and
//! the recording sink.

use actuator_hal::config::ControlledMotorBuilder;
use actuator_hal::{
    AbsoluteEncoded, AbsoluteEncoderConfig, CanAbsoluteEncoder, CanAddress, CanMotor, Capability,
    ControlledMotorConfig, DeviceState, MotorDevice, NullSink, PositionControlled, RecordingSink,
    SimBackend, SimMotor, SoftPositionController, SteerMotor,
};

// =============================================================================
// Test configuration data
// =============================================================================

const PARTIAL_CONFIG: &str = r#"
[motor]
neutral_brake = true
stator_current_limit = 60.0

[feedback]
kp = 4.0
continuous = true

[absolute_encoder]
offset_rotations = 0.125
"#;

const INVALID_CONFIG: &str = r#"
[motor]
motor_to_mech_ratio = 0.0
"#;

fn steer_config() -> ControlledMotorConfig {
    ControlledMotorBuilder::defaults()
        .kp(50.0)
        .continuous(true)
        .max_velocity(8.0)
        .build()
}

// =============================================================================
// TOML loading (std)
// =============================================================================

#[test]
fn parse_partial_toml_fills_defaults() {
    let config = actuator_hal::parse_config(PARTIAL_CONFIG).expect("should parse");

    assert!(config.motor.neutral_brake);
    assert_eq!(config.motor.stator_current_limit, 60.0);
    // Unspecified fields keep their documented defaults.
    assert!(config.motor.ccw_positive);
    assert_eq!(config.motor.supply_current_limit, 40.0);
    assert_eq!(config.feedback.kp, 4.0);
    assert!(config.feedback.continuous);
    assert_eq!(config.absolute_encoder.offset_rotations, 0.125);
    assert_eq!(config.absolute_encoder.sensor_to_mech_ratio, 1.0);
}

#[test]
fn parse_rejects_zero_ratio() {
    assert!(actuator_hal::parse_config(INVALID_CONFIG).is_err());
}

// =============================================================================
// Reconfiguration protocol
// =============================================================================

#[test]
fn reconfigure_updates_snapshot_regardless_of_apply_outcome() {
    let next = ControlledMotorBuilder::defaults().kp(2.0).build();

    let mut accepted = CanMotor::new(
        CanAddress::new(1),
        ControlledMotorBuilder::defaults().build(),
        SimBackend::accepting(),
        NullSink,
    );
    assert!(accepted.reconfigure(next.clone()));
    assert_eq!(*accepted.config(), next);

    let mut rejected = CanMotor::new(
        CanAddress::new(1),
        ControlledMotorBuilder::defaults().build(),
        SimBackend::rejecting(),
        NullSink,
    );
    assert!(!rejected.reconfigure(next.clone()));
    assert_eq!(*rejected.config(), next);
}

#[test]
fn double_apply_of_identical_snapshot_is_idempotent() {
    let config = ControlledMotorBuilder::defaults().kp(3.0).build();
    let mut motor = CanMotor::new(
        CanAddress::new(2),
        config.clone(),
        SimBackend::accepting(),
        NullSink,
    );

    let first = motor.backend().last_applied().cloned();
    assert!(motor.reconfigure(config.clone()));
    let second = motor.backend().last_applied().cloned();

    assert_eq!(first, second);
    assert_eq!(*motor.config(), config);
    assert_eq!(motor.state(), DeviceState::Ready);
}

#[test]
fn per_field_setter_inverts_native_direction() {
    let mut motor = CanMotor::new(
        CanAddress::new(3),
        ControlledMotorBuilder::defaults().build(),
        SimBackend::accepting(),
        NullSink,
    );

    // Default ccw_positive = true lowers to clockwise_positive = false.
    assert_eq!(
        motor.backend().last_applied().map(|n| n.clockwise_positive),
        Some(false)
    );

    assert!(motor.set_ccw_positive(false));
    assert_eq!(
        motor.backend().last_applied().map(|n| n.clockwise_positive),
        Some(true)
    );
    // The rest of the snapshot rode along unchanged.
    assert_eq!(
        motor.backend().last_applied().map(|n| n.stator_current_limit),
        Some(80.0)
    );
}

// =============================================================================
// Fault handling
// =============================================================================

#[test]
fn rejecting_backend_faults_device_but_keeps_it_usable() {
    let sink = RecordingSink::new();
    let mut motor = CanMotor::new(
        CanAddress::on_bus(7, "canivore"),
        ControlledMotorBuilder::defaults().build(),
        SimBackend::rejecting(),
        &sink,
    );

    assert_eq!(motor.state(), DeviceState::Faulted);
    assert_eq!(sink.len(), 1);
    assert!(sink.contains("device 7"));
    assert!(sink.contains("canivore"));

    // Accessors still answer (cached last-known-good, zeros here) and
    // nothing panics.
    assert_eq!(motor.pos_rotations(), 0.0);
    assert_eq!(motor.voltage(), 0.0);
}

#[test]
fn faulted_device_recovers_on_successful_reapply() {
    let sink = RecordingSink::new();
    let mut motor = SimMotor::new(
        ControlledMotorBuilder::defaults()
            .supply_current_limit(-1.0)
            .build(),
        &sink,
    );
    assert_eq!(motor.state(), DeviceState::Faulted);

    assert!(motor.reconfigure(ControlledMotorBuilder::defaults().build()));
    assert_eq!(motor.state(), DeviceState::Ready);
}

// =============================================================================
// Capability degradation
// =============================================================================

#[test]
fn unsupported_capability_degrades_without_state_change() {
    let sink = RecordingSink::new();
    let mut motor = CanMotor::new(
        CanAddress::new(5),
        ControlledMotorBuilder::defaults().build(),
        SimBackend::accepting(),
        &sink,
    );
    let state_before = motor.state();

    assert!(!motor.supports(Capability::ExternalVelocityInput));
    motor.set_input_vel_rotations_per_sec(2.0);

    assert_eq!(sink.len(), 1);
    assert!(sink.contains("capability not supported by this device: external velocity input"));
    let mut warning_only = false;
    sink.for_each(|_, warning| warning_only = warning);
    assert!(warning_only);
    assert_eq!(motor.state(), state_before);
}

#[test]
fn capability_query_matches_degradation_behavior() {
    let sink = RecordingSink::new();
    let mut encoder = CanAbsoluteEncoder::new(
        CanAddress::new(6),
        AbsoluteEncoderConfig::builder().build(),
        SimBackend::accepting(),
        &sink,
    );

    assert!(encoder.supports(Capability::Position));
    assert!(!encoder.supports(Capability::Acceleration));

    encoder.pos_rotations();
    assert!(sink.is_empty());

    encoder.acc_rotations_per_sec_per_sec();
    assert_eq!(sink.len(), 1);
}

// =============================================================================
// Position control
// =============================================================================

#[test]
fn steer_motor_fuses_encoder_position() {
    let mut backend = SimBackend::accepting();
    backend.set_signal(actuator_hal::SignalId::Position, 0.1);
    let mut steer = SteerMotor::new(CanAddress::new(8), steer_config(), backend, NullSink);

    let mut encoder_backend = SimBackend::accepting();
    encoder_backend.set_signal(actuator_hal::SignalId::Position, 0.3);
    let mut encoder = CanAbsoluteEncoder::new(
        CanAddress::new(9),
        AbsoluteEncoderConfig::builder().build(),
        encoder_backend,
        NullSink,
    );

    // Control loop: refresh the encoder, fuse its reading into the steer
    // motor, command a setpoint.
    encoder.periodic();
    steer.set_input_pos_rotations(encoder.pos_rotations());
    steer.set_setpoint(0.5, 0.0);

    assert_eq!(steer.pos_rotations(), 0.3);
    assert_eq!(
        steer.backend().last_command(),
        Some(&actuator_hal::Command::Setpoint {
            pos_rotations: 0.5,
            vel_rotations_per_sec: 0.0
        })
    );
}

#[test]
fn soft_controller_wraps_across_continuous_boundary() {
    let config = ControlledMotorBuilder::defaults().kp(1.0).build();
    let mut controller = SoftPositionController::new(config, NullSink);

    controller.set_input_pos_rotations(0.49);
    controller.set_setpoint(-0.49, 0.0);
    controller.periodic();

    // Short way across the wrap is +0.02 rotations.
    assert!((controller.output_volts() - 0.02).abs() < 1e-9);
}

#[test]
fn soft_controller_converges_on_setpoint() {
    let config = ControlledMotorBuilder::defaults()
        .kp(12.0)
        .pos_tolerance(0.01)
        .vel_tolerance(100.0)
        .build();
    let mut controller = SoftPositionController::new(config, NullSink);

    controller.set_setpoint(0.25, 0.0);
    let mut pos = 0.0;
    for _ in 0..200 {
        controller.set_input_pos_rotations(pos);
        controller.periodic();
        // Crude plant: position follows a fraction of the commanded volts.
        pos += controller.output_volts() * 0.02;
    }

    assert!((pos - 0.25).abs() < 0.01);
    assert!(controller.at_setpoint());
}
