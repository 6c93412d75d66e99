//! Synaptic grid pulse field.
//!
//! Spawns light rays that streak across the background grid on a fixed
//! cadence. Each pulse starts on a grid lattice point inside the viewport
//! and travels a randomized distance over a randomized duration; the host
//! renders them (gradient, glow) from the plain records exposed here.

use flashfx_core::{Vec2, Viewport};
use rand::Rng;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use web_time::{Duration, Instant};

/// Background grid cell size, css pixels.
pub const GRID_SIZE: f64 = 50.0;

/// Spawn cadence.
pub const SPAWN_EVERY: Duration = Duration::from_millis(1200);

/// Length of the drawn ray, css pixels.
pub const RAY_LENGTH: f64 = 300.0;

/// One in-flight pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPulse {
    /// Lattice-aligned spawn point.
    pub origin: Vec2,
    /// Total horizontal travel, css pixels.
    pub distance: f64,
    /// Glow intensity in `[0.8, 1.2]`.
    pub glow: f64,
    born: Instant,
    lifetime: Duration,
}

impl GridPulse {
    /// Travel progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.born).as_secs_f64();
        (elapsed / self.lifetime.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Interval-driven pulse spawner for one grid overlay.
///
/// Owns its own cadence state; `start`/`stop` are idempotent and restarting
/// never doubles the spawn rate.
pub struct GridPulseField {
    pulses: Vec<GridPulse>,
    last_spawn: Option<Instant>,
    running: bool,
    rng: SmallRng,
}

impl GridPulseField {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            pulses: Vec::new(),
            last_spawn: None,
            running: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.last_spawn = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_spawn = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Live pulses, oldest first.
    #[must_use]
    pub fn pulses(&self) -> &[GridPulse] {
        &self.pulses
    }

    /// Advance to `now`: retire finished pulses and spawn any that have
    /// come due on the cadence. A degenerate viewport spawns nothing.
    pub fn tick(&mut self, now: Instant, viewport: Viewport) {
        self.pulses.retain(|p| !p.is_expired(now));
        if !self.running || viewport.width < GRID_SIZE || viewport.height < GRID_SIZE {
            return;
        }

        let Some(mut due) = self.last_spawn else {
            return;
        };
        while now.saturating_duration_since(due) >= SPAWN_EVERY {
            due += SPAWN_EVERY;
            self.spawn(due, viewport);
        }
        self.last_spawn = Some(due);
    }

    fn spawn(&mut self, born: Instant, viewport: Viewport) {
        let cols = (viewport.width / GRID_SIZE).floor() as u32;
        let rows = (viewport.height / GRID_SIZE).floor() as u32;
        let origin = Vec2::new(
            f64::from(self.rng.random_range(0..cols)) * GRID_SIZE,
            f64::from(self.rng.random_range(0..rows)) * GRID_SIZE,
        );
        self.pulses.push(GridPulse {
            origin,
            distance: self.rng.random_range(600.0..1400.0),
            glow: self.rng.random_range(0.8..1.2),
            born,
            lifetime: Duration::from_millis(self.rng.random_range(1800..3600)),
        });
    }
}
