//! Device layer: lifecycle state machine, capability traits, and concrete
//! device variants.
//!
//! Every device owns its hardware backend exclusively, self-configures at
//! construction, and reports failures to an injected [`DiagnosticSink`]
//! instead of returning errors. Missing capabilities degrade to inert
//! defaults with a single diagnostic per call.

mod encoder;
mod motor;
mod position;
mod state;

pub use encoder::{AbsoluteEncoded, CanAbsoluteEncoder};
pub use motor::{CanMotor, MotorDevice, SimMotor};
pub use position::{PositionControlled, SoftPositionController, SteerMotor};
pub use state::DeviceState;

use core::fmt::Write as _;

use crate::applier::{ConfigApplier, NativeConfig};
use crate::backend::{Command, HardwareBackend, SignalId};
use crate::can::CanAddress;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;

/// Control loop period in seconds assumed by software controllers.
pub const CONTROL_PERIOD: f64 = 0.02;

/// One queryable device capability.
///
/// The six signal capabilities cover readable values; the three external
/// input capabilities cover fused measurements pushed into the device from
/// an outside sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    /// Mechanism position readout.
    Position,
    /// Mechanism velocity readout.
    Velocity,
    /// Mechanism acceleration readout.
    Acceleration,
    /// Applied voltage readout.
    Voltage,
    /// Stator current readout.
    StatorCurrent,
    /// Supply current readout.
    SupplyCurrent,
    /// Accepts a fused external position measurement.
    ExternalPositionInput,
    /// Accepts a fused external velocity measurement.
    ExternalVelocityInput,
    /// Accepts a fused external acceleration measurement.
    ExternalAccelerationInput,
}

impl Capability {
    /// Short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Capability::Position => "position",
            Capability::Velocity => "velocity",
            Capability::Acceleration => "acceleration",
            Capability::Voltage => "voltage",
            Capability::StatorCurrent => "stator current",
            Capability::SupplyCurrent => "supply current",
            Capability::ExternalPositionInput => "external position input",
            Capability::ExternalVelocityInput => "external velocity input",
            Capability::ExternalAccelerationInput => "external acceleration input",
        }
    }
}

/// Report one "capability not supported" warning to the sink.
pub(crate) fn report_unsupported(sink: &dyn DiagnosticSink, capability: Capability) {
    let mut message = heapless::String::<96>::new();
    let _ = write!(
        message,
        "capability not supported by this device: {}",
        capability.name()
    );
    sink.report(&message, true);
}

/// Last-known-good signal values, indexed by [`SignalId`].
#[derive(Debug, Default)]
struct SignalCache {
    values: [f64; SignalId::COUNT],
}

impl SignalCache {
    fn get(&self, id: SignalId) -> f64 {
        self.values[id.index()]
    }

    fn put(&mut self, id: SignalId, value: f64) {
        self.values[id.index()] = value;
    }
}

/// Shared plumbing for backend-addressed devices.
///
/// Owns the address, the backend handle, the sink, the lifecycle state, and
/// the signal cache, and centralizes state transitions so every variant
/// follows the same protocol: apply always passes through `Configuring` and
/// lands in `Ready` or `Faulted`, and signal reads in `Faulted` serve the
/// cached last-known-good value instead of touching the bus.
#[derive(Debug)]
pub struct DeviceCore<B, S> {
    address: CanAddress,
    backend: B,
    sink: S,
    state: DeviceState,
    cache: SignalCache,
}

impl<B: HardwareBackend, S: DiagnosticSink> DeviceCore<B, S> {
    /// Bind an address, a backend handle, and a sink. State starts at
    /// `Uninitialized`; the owning device applies its config right after.
    pub fn new(address: CanAddress, backend: B, sink: S) -> Self {
        Self {
            address,
            backend,
            sink,
            state: DeviceState::Uninitialized,
            cache: SignalCache::default(),
        }
    }

    /// The device's bus address.
    pub fn address(&self) -> &CanAddress {
        &self.address
    }

    /// The injected diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Read access to the backend, mainly for simulated backends in tests.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Push a lowered config through the applier, driving the state machine
    /// through `Configuring` into `Ready` or `Faulted`.
    pub fn apply(&mut self, native: &NativeConfig, validation: Result<()>) -> bool {
        self.state = DeviceState::Configuring;
        let accepted =
            ConfigApplier::apply(&mut self.backend, &self.address, native, validation, &self.sink);
        self.state = if accepted {
            DeviceState::Ready
        } else {
            DeviceState::Faulted
        };
        accepted
    }

    /// Latest value of one signal.
    ///
    /// In `Faulted` the cached last-known-good value is served without
    /// touching the backend.
    pub fn read(&mut self, id: SignalId) -> f64 {
        if self.state.is_faulted() {
            return self.cache.get(id);
        }
        let value = self.backend.read_signal(id);
        self.cache.put(id, value);
        value
    }

    /// Refresh the cache for a set of signals in one pass. No-op in
    /// `Faulted`.
    pub fn refresh(&mut self, ids: &[SignalId]) {
        if self.state.is_faulted() {
            return;
        }
        for &id in ids {
            let value = self.backend.read_signal(id);
            self.cache.put(id, value);
        }
    }

    /// Forward an output command to the backend.
    pub fn command(&mut self, command: &Command) {
        self.backend.write_command(command);
    }
}
