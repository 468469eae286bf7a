//! Slew rate limiting for acceleration-bounded commands.

/// Limits how fast a commanded value may change per second.
#[derive(Debug, Clone)]
pub struct SlewRateLimiter {
    rate: f64,
    last: f64,
}

impl SlewRateLimiter {
    /// Create a limiter allowing `rate` units of change per second.
    pub fn new(rate: f64) -> Self {
        Self { rate, last: 0.0 }
    }

    /// Jump the internal state to `value` without limiting.
    pub fn reset(&mut self, value: f64) {
        self.last = value;
    }

    /// Advance toward `input` by at most `rate * dt`.
    pub fn calculate(&mut self, input: f64, dt: f64) -> f64 {
        let max_delta = self.rate * dt;
        let delta = (input - self.last).clamp(-max_delta, max_delta);
        self.last += delta;
        self.last
    }
}
