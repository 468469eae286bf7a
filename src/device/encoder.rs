//! Absolute encoder capability trait and the CAN encoder variant.

use crate::applier::NativeConfig;
use crate::backend::{HardwareBackend, SignalId};
use crate::can::CanAddress;
use crate::config::{validate_absolute_encoder, AbsoluteEncoderBuilder, AbsoluteEncoderConfig};
use crate::device::{report_unsupported, Capability, DeviceCore, DeviceState};
use crate::diagnostics::DiagnosticSink;

/// Uniform surface of an absolute position sensor.
///
/// Same contracts as the motor side: immutable config snapshot, whole-config
/// reapply on any change, inert defaults plus one warning for capabilities a
/// variant cannot provide.
pub trait AbsoluteEncoded {
    /// The sink failures and warnings are reported to.
    fn diagnostics(&self) -> &dyn DiagnosticSink;

    /// Current lifecycle state.
    fn state(&self) -> DeviceState;

    /// The active configuration snapshot.
    fn config(&self) -> &AbsoluteEncoderConfig;

    /// Replace the stored snapshot without applying it.
    fn set_config(&mut self, config: AbsoluteEncoderConfig);

    /// Apply the stored snapshot to hardware. Returns acceptance.
    fn configure(&mut self) -> bool;

    /// Whether this device can honor a capability.
    fn supports(&self, capability: Capability) -> bool;

    /// Absolute mechanism position in rotations.
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

    /// Per-loop housekeeping, e.g. a batched signal refresh. Default no-op.
    fn periodic(&mut self) {}

    /// Replace the snapshot and re-apply it. The stored snapshot changes
    /// even when the apply is rejected.
    fn reconfigure(&mut self, config: AbsoluteEncoderConfig) -> bool {
        self.set_config(config);
        self.configure()
    }

    /// Change only the zero offset, re-applying the configuration.
    fn set_offset_pos_rotations(&mut self, offset_rotations: f64) -> bool {
        let next = AbsoluteEncoderBuilder::edit(self.config())
            .offset_rotations(offset_rotations)
            .build();
        self.reconfigure(next)
    }
}

/// CAN absolute encoder.
///
/// Position and velocity read from hardware; acceleration degrades to the
/// default warning policy. `periodic()` refreshes both cached signals in one
/// batch so stale reads in `Faulted` stay close to the last good loop.
#[derive(Debug)]
pub struct CanAbsoluteEncoder<B, S> {
    core: DeviceCore<B, S>,
    config: AbsoluteEncoderConfig,
}

impl<B: HardwareBackend, S: DiagnosticSink> CanAbsoluteEncoder<B, S> {
    /// Bind a CAN address and self-configure.
    pub fn new(address: CanAddress, config: AbsoluteEncoderConfig, backend: B, sink: S) -> Self {
        let mut encoder = Self {
            core: DeviceCore::new(address, backend, sink),
            config,
        };
        encoder.configure();
        encoder
    }

    /// Read access to the backend, mainly for simulated backends in tests.
    pub fn backend(&self) -> &B {
        self.core.backend()
    }
}

impl<B: HardwareBackend, S: DiagnosticSink> AbsoluteEncoded for CanAbsoluteEncoder<B, S> {
    fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.core.sink()
    }

    fn state(&self) -> DeviceState {
        self.core.state()
    }

    fn config(&self) -> &AbsoluteEncoderConfig {
        &self.config
    }

    fn set_config(&mut self, config: AbsoluteEncoderConfig) {
        self.config = config;
    }

    fn configure(&mut self) -> bool {
        let native = NativeConfig::from_absolute_encoder(&self.config);
        self.core
            .apply(&native, validate_absolute_encoder(&self.config))
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Position | Capability::Velocity)
    }

    fn pos_rotations(&mut self) -> f64 {
        self.core.read(SignalId::Position)
    }

    fn vel_rotations_per_sec(&mut self) -> f64 {
        self.core.read(SignalId::Velocity)
    }

    fn periodic(&mut self) {
        self.core.refresh(&[SignalId::Position, SignalId::Velocity]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimBackend;
    use crate::diagnostics::{NullSink, RecordingSink};

    fn encoder(backend: SimBackend) -> CanAbsoluteEncoder<SimBackend, RecordingSink> {
        CanAbsoluteEncoder::new(
            CanAddress::on_bus(22, "canivore"),
            AbsoluteEncoderBuilder::defaults().build(),
            backend,
            RecordingSink::new(),
        )
    }

    #[test]
    fn test_construction_applies_offset_and_ratio() {
        let config = AbsoluteEncoderBuilder::defaults()
            .offset_rotations(0.125)
            .sensor_to_mech_ratio(2.0)
            .build();
        let encoder = CanAbsoluteEncoder::new(
            CanAddress::new(22),
            config,
            SimBackend::accepting(),
            NullSink,
        );

        assert_eq!(encoder.state(), DeviceState::Ready);
        let applied = encoder.backend().last_applied().cloned();
        assert_eq!(applied.as_ref().map(|n| n.offset_rotations), Some(0.125));
        assert_eq!(applied.as_ref().map(|n| n.ratio), Some(2.0));
    }

    #[test]
    fn test_acceleration_degrades_with_warning() {
        let mut encoder = encoder(SimBackend::accepting());

        assert!(!encoder.supports(Capability::Acceleration));
        assert_eq!(encoder.acc_rotations_per_sec_per_sec(), 0.0);
        assert_eq!(encoder.core.sink().len(), 1);
    }

    #[test]
    fn test_periodic_batches_signal_refresh() {
        let mut backend = SimBackend::accepting();
        backend.set_signal(SignalId::Position, 0.3);
        backend.set_signal(SignalId::Velocity, 1.5);
        let mut encoder = encoder(backend);

        let reads_before = encoder.backend().read_count();
        encoder.periodic();
        assert_eq!(encoder.backend().read_count(), reads_before + 2);
        assert_eq!(encoder.pos_rotations(), 0.3);
        assert_eq!(encoder.vel_rotations_per_sec(), 1.5);
    }

    #[test]
    fn test_set_offset_sugar_reapplies() {
        let mut encoder = encoder(SimBackend::accepting());

        assert!(encoder.set_offset_pos_rotations(0.25));
        assert_eq!(encoder.config().offset_rotations, 0.25);
        assert_eq!(encoder.backend().apply_count(), 2);
    }
}
