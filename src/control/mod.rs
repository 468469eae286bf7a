//! Software closed-loop control primitives built from config snapshots.

mod feedback;
mod ramp;

pub use feedback::FeedbackController;
pub use ramp::SlewRateLimiter;
