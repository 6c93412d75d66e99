//! Click ripple feedback.
//!
//! Spawns an expanding circle centered on the click point, sized to cover
//! the button, and retires it after a fixed lifetime. The host animates the
//! expansion; this controller only owns the geometry and the lifetime.

use flashfx_core::{RectF, Vec2};
use web_time::{Duration, Instant};

/// How long a ripple lives.
const LIFETIME: Duration = Duration::from_millis(600);

/// One in-flight ripple, in element-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Top-left corner of the ripple's bounding square.
    pub origin: Vec2,
    /// Square side; covers the whole element from the click point.
    pub diameter: f64,
    born: Instant,
}

impl Ripple {
    /// Expansion progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.born).as_secs_f64();
        (elapsed / LIFETIME.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Ripple pool for one button.
#[derive(Debug, Default)]
pub struct RippleField {
    ripples: Vec<Ripple>,
}

impl RippleField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a ripple for a click at `click` (page coordinates) on an
    /// element at `bounds`. Degenerate bounds spawn nothing.
    pub fn spawn(&mut self, bounds: RectF, click: Vec2, now: Instant) {
        if bounds.is_empty() {
            return;
        }
        let diameter = bounds.width.max(bounds.height);
        self.ripples.push(Ripple {
            origin: Vec2::new(
                click.x - bounds.x - diameter / 2.0,
                click.y - bounds.y - diameter / 2.0,
            ),
            diameter,
            born: now,
        });
    }

    /// Retire expired ripples.
    pub fn tick(&mut self, now: Instant) {
        self.ripples.retain(|r| r.progress(now) < 1.0);
    }

    #[must_use]
    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }
}
