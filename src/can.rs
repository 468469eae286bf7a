//! CAN bus addressing for hardware devices.

/// CAN identifier for a physical device: a numeric id paired with a bus name.
///
/// The empty bus name addresses the default bus.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanAddress {
    /// CAN id.
    pub id: u32,

    /// CAN bus name (`""` = default bus).
    pub bus: heapless::String<16>,
}

impl CanAddress {
    /// Create an address on the default bus.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            bus: heapless::String::new(),
        }
    }

    /// Create an address on a named bus.
    ///
    /// Bus names are truncated to the 16 bytes the address can hold.
    pub fn on_bus(id: u32, bus: &str) -> Self {
        let mut name = heapless::String::new();
        for ch in bus.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self { id, bus: name }
    }
}
