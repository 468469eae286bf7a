//! Hardware backend collaborator boundary.
//!
//! Physical device drivers sit behind [`HardwareBackend`]: a small opaque
//! capability of apply-configuration, read-signal, and write-command. The
//! layer above never sees vendor APIs, only this surface.

use crate::applier::NativeConfig;

/// Identifier for one readable hardware signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalId {
    /// Mechanism position in rotations.
    Position,
    /// Mechanism velocity in rotations per second.
    Velocity,
    /// Mechanism acceleration in rotations per second per second.
    Acceleration,
    /// Applied motor voltage.
    Voltage,
    /// Stator current in amps.
    StatorCurrent,
    /// Supply current in amps.
    SupplyCurrent,
}

impl SignalId {
    /// Number of signal kinds (cache sizing).
    pub const COUNT: usize = 6;

    /// Dense index for cache storage.
    pub(crate) fn index(self) -> usize {
        match self {
            SignalId::Position => 0,
            SignalId::Velocity => 1,
            SignalId::Acceleration => 2,
            SignalId::Voltage => 3,
            SignalId::StatorCurrent => 4,
            SignalId::SupplyCurrent => 5,
        }
    }
}

/// Output command pushed to a hardware backend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Open-loop voltage output.
    Voltage(f64),
    /// Closed-loop position setpoint with velocity reference.
    Setpoint {
        /// Target position in rotations.
        pos_rotations: f64,
        /// Velocity reference in rotations per second.
        vel_rotations_per_sec: f64,
    },
    /// Overwrite the backend's sensor position reading.
    RezeroSensor(f64),
}

/// Opaque capability every physical device driver implements.
///
/// Implementations are exclusively owned by one software device; no two
/// device objects may address the same physical resource.
pub trait HardwareBackend {
    /// Push a native configuration. Returns whether the device accepted it.
    fn apply_native_config(&mut self, config: &NativeConfig) -> bool;

    /// Read the latest value of one signal.
    fn read_signal(&mut self, id: SignalId) -> f64;

    /// Push an output command. Fire-and-forget.
    fn write_command(&mut self, command: &Command);
}

/// In-memory backend for tests and bring-up without hardware.
///
/// Records applied configs and commands, and serves scripted signal values.
#[derive(Debug, Default)]
pub struct SimBackend {
    /// Whether the next apply calls are accepted.
    accept_applies: bool,
    /// Number of apply calls seen.
    apply_count: usize,
    /// Most recently applied native config.
    last_applied: Option<NativeConfig>,
    /// Most recently written command.
    last_command: Option<Command>,
    /// Scripted signal values served by `read_signal`.
    signals: [f64; SignalId::COUNT],
    /// Number of read calls seen.
    read_count: usize,
}

impl SimBackend {
    /// Backend that accepts every apply.
    pub fn accepting() -> Self {
        Self {
            accept_applies: true,
            ..Self::default()
        }
    }

    /// Backend that rejects every apply.
    pub fn rejecting() -> Self {
        Self {
            accept_applies: false,
            ..Self::default()
        }
    }

    /// Script the value served for one signal.
    pub fn set_signal(&mut self, id: SignalId, value: f64) {
        self.signals[id.index()] = value;
    }

    /// Change whether future applies are accepted.
    pub fn set_accepting(&mut self, accept: bool) {
        self.accept_applies = accept;
    }

    /// Number of apply calls seen.
    pub fn apply_count(&self) -> usize {
        self.apply_count
    }

    /// Number of signal reads seen.
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Most recently applied native config, if any.
    pub fn last_applied(&self) -> Option<&NativeConfig> {
        self.last_applied.as_ref()
    }

    /// Most recently written command, if any.
    pub fn last_command(&self) -> Option<&Command> {
        self.last_command.as_ref()
    }
}

impl HardwareBackend for SimBackend {
    fn apply_native_config(&mut self, config: &NativeConfig) -> bool {
        self.apply_count += 1;
        if self.accept_applies {
            self.last_applied = Some(config.clone());
        }
        self.accept_applies
    }

    fn read_signal(&mut self, id: SignalId) -> f64 {
        self.read_count += 1;
        self.signals[id.index()]
    }

    fn write_command(&mut self, command: &Command) {
        self.last_command = Some(*command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_backend_scripted_signals() {
        let mut backend = SimBackend::accepting();
        backend.set_signal(SignalId::Velocity, 2.5);

        assert_eq!(backend.read_signal(SignalId::Velocity), 2.5);
        assert_eq!(backend.read_signal(SignalId::Position), 0.0);
        assert_eq!(backend.read_count(), 2);
    }

    #[test]
    fn test_sim_backend_records_commands() {
        let mut backend = SimBackend::accepting();
        backend.write_command(&Command::Voltage(6.0));

        assert_eq!(backend.last_command(), Some(&Command::Voltage(6.0)));
    }

    #[test]
    fn test_rejecting_backend_counts_applies() {
        let mut backend = SimBackend::rejecting();
        let native = NativeConfig::default();

        assert!(!backend.apply_native_config(&native));
        assert!(backend.last_applied().is_none());
        assert_eq!(backend.apply_count(), 1);
    }
}
