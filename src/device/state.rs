//! Device lifecycle state machine.

/// Lifecycle state of a hardware device object.
///
/// ```text
/// Uninitialized -> Configuring -> Ready
///                       |            ^
///                       v            | (successful reapply)
///                    Faulted --------+
/// ```
///
/// Reconfiguration re-enters `Configuring` from either `Ready` or `Faulted`,
/// so a device that faulted on a bad snapshot can recover with a good one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Constructed, configuration not yet pushed.
    #[default]
    Uninitialized,
    /// A configuration push is in flight.
    Configuring,
    /// Configuration accepted, device fully usable.
    Ready,
    /// Hardware rejected the configuration or stopped responding.
    Faulted,
}

impl DeviceState {
    /// Short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            DeviceState::Uninitialized => "uninitialized",
            DeviceState::Configuring => "configuring",
            DeviceState::Ready => "ready",
            DeviceState::Faulted => "faulted",
        }
    }

    /// True in `Ready`.
    pub fn is_ready(self) -> bool {
        matches!(self, DeviceState::Ready)
    }

    /// True in `Faulted`.
    pub fn is_faulted(self) -> bool {
        matches!(self, DeviceState::Faulted)
    }
}
