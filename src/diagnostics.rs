//! Diagnostic sink collaborator boundary.
//!
//! Devices report unsupported capabilities and hardware rejections through a
//! sink injected at construction. The sink is fire-and-forget: `report` never
//! blocks and never panics. Substituting [`RecordingSink`] makes device
//! behavior deterministic in tests.

use core::cell::RefCell;

/// Receiver for device diagnostics.
pub trait DiagnosticSink {
    /// Report a diagnostic message.
    ///
    /// `warning_only` distinguishes degraded-but-operating conditions from
    /// failures (e.g. a rejected configuration push).
    fn report(&self, message: &str, warning_only: bool);
}

// Lets a caller keep the sink and hand a borrow to the device.
impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, message: &str, warning_only: bool) {
        (**self).report(message, warning_only);
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _message: &str, _warning_only: bool) {}
}

/// Maximum messages retained by a [`RecordingSink`].
pub const RECORDING_CAPACITY: usize = 16;

/// Sink that retains reported messages for inspection.
///
/// Holds a bounded buffer; reports past capacity are counted but dropped.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: RefCell<heapless::Vec<(heapless::String<96>, bool), RECORDING_CAPACITY>>,
    dropped: RefCell<usize>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages reported (retained only, excludes dropped).
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// True if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0 && *self.dropped.borrow() == 0
    }

    /// Number of reports dropped past capacity.
    pub fn dropped(&self) -> usize {
        *self.dropped.borrow()
    }

    /// Run `f` over each retained `(message, warning_only)` pair.
    pub fn for_each<F: FnMut(&str, bool)>(&self, mut f: F) {
        for (message, warning_only) in self.messages.borrow().iter() {
            f(message.as_str(), *warning_only);
        }
    }

    /// True if any retained message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .borrow()
            .iter()
            .any(|(message, _)| message.as_str().contains(needle))
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, message: &str, warning_only: bool) {
        let mut truncated = heapless::String::<96>::new();
        for ch in message.chars() {
            if truncated.push(ch).is_err() {
                break;
            }
        }

        if self
            .messages
            .borrow_mut()
            .push((truncated, warning_only))
            .is_err()
        {
            *self.dropped.borrow_mut() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_retains_messages() {
        let sink = RecordingSink::new();
        sink.report("first", true);
        sink.report("second", false);

        assert_eq!(sink.len(), 2);
        assert!(sink.contains("first"));
        assert!(sink.contains("second"));
        assert!(!sink.contains("third"));
    }

    #[test]
    fn test_recording_sink_bounded() {
        let sink = RecordingSink::new();
        for _ in 0..(RECORDING_CAPACITY + 3) {
            sink.report("overflow", true);
        }

        assert_eq!(sink.len(), RECORDING_CAPACITY);
        assert_eq!(sink.dropped(), 3);
    }

    #[test]
    fn test_null_sink_never_panics() {
        let sink = NullSink;
        sink.report("ignored", false);
    }
}
