//! The electric border loop.
//!
//! Strokes a noise-jittered closed path around a container every animation
//! frame. Two independent fractal-noise tracks (seeds 0 and 1) displace the
//! perimeter points horizontally and vertically, so the outline crackles
//! instead of sliding.
//!
//! The engine is a two-state machine: `Idle` while the container is
//! off-screen, `Running` while it intersects the viewport. Geometry updates
//! from the host's resize observer land in either state and never disturb
//! the animation-time accumulator.

use flashfx_core::{FrameClock, FrameHandle, FrameSlot, RectF, Scheduler, StrokePaint,
                   StrokeSurface, Vec2};
use tracing::debug;
use web_time::Instant;

use crate::noise::{OctaveParams, fractal_noise};
use crate::shape::RoundedRect;

/// Tuning knobs for [`ElectricBorder`].
///
/// Defaults are the canonical constants (see DESIGN.md for the divergent
/// legacy set).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderParams {
    /// Animation-time multiplier over wall time.
    pub speed: f64,
    /// Noise amplitude; the base layer's contribution before displacement.
    pub chaos: f64,
    /// Corner radius of the stroked outline.
    pub corner_radius: f64,
    /// Pixel scale applied to the composed noise value.
    pub displacement: f64,
    /// Progress frequency; also the base octave frequency.
    pub frequency: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    /// How far the drawing surface extends past the container on each side,
    /// leaving room for the jitter to wander.
    pub outset: f64,
    /// Device-pixel-ratio ceiling; anything sharper wastes fill rate.
    pub dpr_cap: f64,
    pub paint: StrokePaint,
}

impl Default for BorderParams {
    fn default() -> Self {
        Self {
            speed: 1.8,
            chaos: 0.08,
            corner_radius: 0.0,
            displacement: 50.0,
            frequency: 12.0,
            octaves: 3,
            lacunarity: 2.0,
            gain: 0.5,
            outset: 60.0,
            dpr_cap: 1.5,
            paint: StrokePaint::default(),
        }
    }
}

impl BorderParams {
    fn octave_params(&self) -> OctaveParams {
        OctaveParams {
            octaves: self.octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
            amplitude: self.chaos,
            frequency: self.frequency,
        }
    }
}

/// Current size of the animated drawing surface.
///
/// Single writer (the resize observer via [`ElectricBorder::set_bounds`]),
/// single reader (the draw loop) within any one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct BorderGeometry {
    /// Surface bounds: the container inflated by the outset.
    surface: RectF,
    /// Container size in surface-local coordinates.
    container: RectF,
    dpr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
}

/// Noise-jittered animated border for one container element.
pub struct ElectricBorder {
    params: BorderParams,
    state: State,
    geometry: BorderGeometry,
    clock: FrameClock,
    slot: FrameSlot,
    /// Animation-time accumulator; survives idle periods and resizes.
    time: f64,
    /// Reused point buffer; grows once, then steady-state.
    points: Vec<Vec2>,
}

impl ElectricBorder {
    #[must_use]
    pub fn new(params: BorderParams) -> Self {
        Self {
            params,
            state: State::Idle,
            geometry: BorderGeometry::default(),
            clock: FrameClock::new(),
            slot: FrameSlot::new(),
            time: 0.0,
            points: Vec::new(),
        }
    }

    /// Whether the loop is currently animating.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Animation-time accumulator, in scaled seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Dimensions the host should give the drawing surface, in device
    /// pixels: `(width, height)` scaled by the capped dpr.
    #[must_use]
    pub fn surface_size(&self) -> (f64, f64) {
        let g = &self.geometry;
        (g.surface.width * g.dpr, g.surface.height * g.dpr)
    }

    /// Visibility-intersection signal from the host.
    ///
    /// Entering `Running` restarts the frame clock (not the accumulator) so
    /// the idle gap does not replay as one giant step.
    pub fn set_visible(&mut self, visible: bool, sched: &mut dyn Scheduler) {
        match (self.state, visible) {
            (State::Idle, true) => {
                debug!(target: "flashfx::border", "border enters running");
                self.state = State::Running;
                self.clock.restart();
                self.slot.schedule(sched);
            }
            (State::Running, false) => {
                debug!(target: "flashfx::border", "border enters idle");
                self.state = State::Idle;
                self.slot.clear(sched);
            }
            _ => {}
        }
    }

    /// Resize-observer signal: the container's on-screen box changed.
    ///
    /// Applies in both states. If the loop is running but between frames
    /// (e.g. it went inert on zero-sized geometry), a frame is requested so
    /// the new size shows up.
    pub fn set_bounds(&mut self, container: RectF, dpr: f64, sched: &mut dyn Scheduler) {
        let surface = container.inflate(self.params.outset);
        self.geometry = BorderGeometry {
            surface,
            container: RectF::new(
                self.params.outset,
                self.params.outset,
                container.width,
                container.height,
            ),
            dpr: dpr.min(self.params.dpr_cap).max(1.0),
        };
        if self.state == State::Running && !self.slot.is_pending() {
            self.slot.schedule(sched);
        }
    }

    /// One scheduled frame fired.
    ///
    /// Stale handles (from a superseded request) and frames arriving in
    /// `Idle` are ignored. Zero-sized geometry makes the engine inert: no
    /// draw calls, no reschedule.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: Instant,
        surface: &mut dyn StrokeSurface,
        sched: &mut dyn Scheduler,
    ) {
        if !self.slot.take(handle) || self.state != State::Running {
            return;
        }
        if self.geometry.container.is_empty() {
            return;
        }

        let dt = self.clock.tick(now);
        self.time += dt * self.params.speed;

        self.draw(surface);
        self.slot.schedule(sched);
    }

    /// One scheduled frame fired while the host cannot provide a surface.
    ///
    /// Consumes the handle and keeps the loop alive so drawing resumes as
    /// soon as the surface is back; without this the slot would hold the
    /// dead handle forever and block every future reschedule.
    pub fn skip_frame(&mut self, handle: FrameHandle, now: Instant, sched: &mut dyn Scheduler) {
        if !self.slot.take(handle) || self.state != State::Running {
            return;
        }
        let dt = self.clock.tick(now);
        self.time += dt * self.params.speed;
        self.slot.schedule(sched);
    }

    fn draw(&mut self, surface: &mut dyn StrokeSurface) {
        let c = self.geometry.container;
        let rect = RoundedRect::new(c.x, c.y, c.width, c.height, self.params.corner_radius);
        let perimeter = rect.perimeter();
        if perimeter <= 0.0 {
            return;
        }

        // Point density tied to perimeter length keeps the jitter texture
        // resolution-independent: one sample every 4 css pixels.
        let samples = ((perimeter / 4.0).floor() as usize).max(1);
        let octaves = self.params.octave_params();

        self.points.clear();
        self.points.reserve(samples + 1);
        for i in 0..=samples {
            let progress = i as f64 / samples as f64;
            let p = rect.point_at(progress);
            let track = progress * self.params.frequency;
            let dx = fractal_noise(track, octaves, self.time, 0) * self.params.displacement;
            let dy = fractal_noise(track, octaves, self.time, 1) * self.params.displacement;
            self.points.push(p.offset(dx, dy));
        }

        surface.clear();
        surface.stroke_polyline(&self.points, &self.params.paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    #[derive(Default)]
    struct TestSched {
        next: u64,
        outstanding: Vec<FrameHandle>,
    }

    impl TestSched {
        fn fire(&mut self) -> FrameHandle {
            self.outstanding.remove(0)
        }
    }

    impl Scheduler for TestSched {
        fn request_frame(&mut self) -> FrameHandle {
            let h = FrameHandle(self.next);
            self.next += 1;
            self.outstanding.push(h);
            h
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.outstanding.retain(|h| *h != handle);
        }
    }

    #[derive(Default)]
    struct TestSurface {
        clears: usize,
        strokes: Vec<Vec<Vec2>>,
    }

    impl StrokeSurface for TestSurface {
        fn clear(&mut self) {
            self.clears += 1;
        }

        fn stroke_polyline(&mut self, points: &[Vec2], _paint: &StrokePaint) {
            self.strokes.push(points.to_vec());
        }
    }

    fn running_border(sched: &mut TestSched) -> ElectricBorder {
        let mut border = ElectricBorder::new(BorderParams::default());
        border.set_bounds(RectF::new(0.0, 0.0, 200.0, 100.0), 1.0, sched);
        border.set_visible(true, sched);
        border
    }

    #[test]
    fn idle_border_never_draws() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = ElectricBorder::new(BorderParams::default());
        border.set_bounds(RectF::new(0.0, 0.0, 200.0, 100.0), 1.0, &mut sched);

        assert!(sched.outstanding.is_empty(), "idle must not schedule");
        border.on_frame(FrameHandle(42), Instant::now(), &mut surface, &mut sched);
        assert_eq!(surface.clears, 0);
        assert!(surface.strokes.is_empty());
    }

    #[test]
    fn running_border_keeps_exactly_one_frame_outstanding() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = running_border(&mut sched);

        assert_eq!(sched.outstanding.len(), 1);
        for _ in 0..5 {
            let h = sched.fire();
            border.on_frame(h, Instant::now(), &mut surface, &mut sched);
            assert_eq!(sched.outstanding.len(), 1, "one pending frame while running");
        }
        assert_eq!(surface.clears, 5);
        assert_eq!(surface.strokes.len(), 5);
    }

    #[test]
    fn going_invisible_cancels_pending_frame() {
        let mut sched = TestSched::default();
        let mut border = running_border(&mut sched);

        border.set_visible(false, &mut sched);
        assert!(sched.outstanding.is_empty());
        assert!(!border.is_running());
    }

    #[test]
    fn stale_frame_after_cancel_is_ignored() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = running_border(&mut sched);

        let stale = sched.outstanding[0];
        border.set_visible(false, &mut sched);
        border.set_visible(true, &mut sched);
        border.on_frame(stale, Instant::now(), &mut surface, &mut sched);
        assert_eq!(surface.clears, 0, "stale handle must not draw");
        assert_eq!(sched.outstanding.len(), 1);
    }

    #[test]
    fn time_accumulates_by_speed_scaled_dt() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = running_border(&mut sched);
        let t0 = Instant::now();

        let h = sched.fire();
        border.on_frame(h, t0, &mut surface, &mut sched);
        assert_eq!(border.time(), 0.0, "first frame has zero dt");

        let h = sched.fire();
        border.on_frame(h, t0 + Duration::from_millis(100), &mut surface, &mut sched);
        assert!((border.time() - 0.1 * 1.8).abs() < 1e-9);
    }

    #[test]
    fn resize_updates_stroke_without_restarting_time() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = running_border(&mut sched);
        let t0 = Instant::now();

        let h = sched.fire();
        border.on_frame(h, t0, &mut surface, &mut sched);
        let h = sched.fire();
        border.on_frame(h, t0 + Duration::from_millis(500), &mut surface, &mut sched);
        let time_before = border.time();
        let points_before = surface.strokes.last().unwrap().len();

        border.set_bounds(RectF::new(0.0, 0.0, 400.0, 200.0), 1.0, &mut sched);
        let h = sched.fire();
        border.on_frame(h, t0 + Duration::from_millis(600), &mut surface, &mut sched);

        assert!(border.time() > time_before, "accumulator kept advancing");
        let points_after = surface.strokes.last().unwrap().len();
        assert!(
            points_after > points_before,
            "bigger perimeter means more samples ({points_before} -> {points_after})"
        );
    }

    #[test]
    fn zero_sized_container_is_inert() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = ElectricBorder::new(BorderParams::default());
        border.set_bounds(RectF::new(0.0, 0.0, 0.0, 0.0), 1.0, &mut sched);
        border.set_visible(true, &mut sched);

        let h = sched.fire();
        border.on_frame(h, Instant::now(), &mut surface, &mut sched);
        assert_eq!(surface.clears, 0);
        assert!(sched.outstanding.is_empty(), "inert engine does not reschedule");
    }

    #[test]
    fn resize_revives_inert_running_engine() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = ElectricBorder::new(BorderParams::default());
        border.set_bounds(RectF::new(0.0, 0.0, 0.0, 0.0), 1.0, &mut sched);
        border.set_visible(true, &mut sched);
        let h = sched.fire();
        border.on_frame(h, Instant::now(), &mut surface, &mut sched);
        assert!(sched.outstanding.is_empty());

        border.set_bounds(RectF::new(0.0, 0.0, 50.0, 50.0), 1.0, &mut sched);
        assert_eq!(sched.outstanding.len(), 1, "resize reschedules a running engine");
        let h = sched.fire();
        border.on_frame(h, Instant::now(), &mut surface, &mut sched);
        assert_eq!(surface.strokes.len(), 1);
    }

    #[test]
    fn dpr_is_capped_for_surface_sizing() {
        let mut sched = TestSched::default();
        let mut border = ElectricBorder::new(BorderParams::default());
        border.set_bounds(RectF::new(0.0, 0.0, 100.0, 100.0), 3.0, &mut sched);
        // Surface is container + 60 outset per side, at the capped 1.5 dpr.
        assert_eq!(border.surface_size(), (220.0 * 1.5, 220.0 * 1.5));
    }

    #[test]
    fn skipped_frames_keep_the_loop_alive() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = running_border(&mut sched);
        let t0 = Instant::now();

        let h = sched.fire();
        border.on_frame(h, t0, &mut surface, &mut sched);

        // Surface unavailable for a few frames: no draws, but the slot
        // cycles and time keeps advancing.
        for i in 1..=3 {
            let h = sched.fire();
            border.skip_frame(h, t0 + Duration::from_millis(100 * i), &mut sched);
            assert_eq!(sched.outstanding.len(), 1, "still exactly one pending frame");
        }
        assert_eq!(surface.strokes.len(), 1);
        assert!((border.time() - 0.3 * 1.8).abs() < 1e-9);

        let h = sched.fire();
        border.on_frame(h, t0 + Duration::from_millis(400), &mut surface, &mut sched);
        assert_eq!(surface.strokes.len(), 2, "drawing resumes with the surface");
    }

    #[test]
    fn skip_frame_ignores_stale_handles_and_idle_state() {
        let mut sched = TestSched::default();
        let mut border = running_border(&mut sched);

        border.skip_frame(FrameHandle(999), Instant::now(), &mut sched);
        assert_eq!(sched.outstanding.len(), 1, "stale handle must not double-schedule");

        border.set_visible(false, &mut sched);
        border.skip_frame(FrameHandle(0), Instant::now(), &mut sched);
        assert!(sched.outstanding.is_empty(), "idle engine stays idle");
    }

    #[test]
    fn stroke_points_stay_near_the_outline() {
        let mut sched = TestSched::default();
        let mut surface = TestSurface::default();
        let mut border = running_border(&mut sched);
        let h = sched.fire();
        border.on_frame(h, Instant::now(), &mut surface, &mut sched);

        // Displacement is bounded by the geometric octave series times scale.
        let p = BorderParams::default();
        let max_disp = p.chaos * (1.0 + p.gain + p.gain * p.gain) * p.displacement;
        let outline = RectF::new(
            p.outset - max_disp - 1e-9,
            p.outset - max_disp - 1e-9,
            200.0 + 2.0 * (max_disp + 1e-9),
            100.0 + 2.0 * (max_disp + 1e-9),
        );
        for pt in &surface.strokes[0] {
            assert!(outline.contains(*pt), "displaced point {pt:?} outside bound");
        }
    }
}
