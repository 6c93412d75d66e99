//! Per-engine frame timing.

use web_time::Instant;

/// Tracks elapsed wall time between frames for one engine instance.
///
/// The first tick after construction (or after [`FrameClock::restart`])
/// reports a delta of zero, so an engine resuming from idle does not jump
/// by the whole idle period.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Advance the clock to `now` and return the elapsed seconds since the
    /// previous tick.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous tick. The next [`FrameClock::tick`] reports zero.
    pub fn restart(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
