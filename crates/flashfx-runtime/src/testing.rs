//! Test doubles for hosts: an in-memory page and a hand-pumped scheduler.
//!
//! Compiled for this crate's own tests and, behind the `test-helpers`
//! feature, for downstream crates that want to drive the orchestrator
//! without a real host.

use flashfx_core::{FrameHandle, RectF, Scheduler, StrokePaint, StrokeSurface, Vec2, Viewport};
use flashfx_fx::{GridPulse, RevealGlyph};
use flashfx_widgets::{CarouselView, Ripple};
use web_time::Instant;

use crate::page::{ElementId, Marker, Page, Phase};

/// Scheduler pumped one handle at a time, with cancel accounting.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    outstanding: Vec<FrameHandle>,
    pub cancelled: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the oldest outstanding request.
    pub fn fire_next(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }

    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let h = FrameHandle(self.next);
        self.next += 1;
        self.outstanding.push(h);
        h
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.outstanding.len();
        self.outstanding.retain(|h| *h != handle);
        self.cancelled += before - self.outstanding.len();
    }
}

/// Recording stroke surface.
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub clears: usize,
    pub strokes: usize,
    pub last_point_count: usize,
}

impl StrokeSurface for MemorySurface {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn stroke_polyline(&mut self, points: &[Vec2], _paint: &StrokePaint) {
        self.strokes += 1;
        self.last_point_count = points.len();
    }
}

#[derive(Debug, Default)]
struct Element {
    marker: Option<Marker>,
    source_text: Option<String>,
    color: Option<String>,
    bounds: Option<RectF>,
    surface: Option<MemorySurface>,

    // Writes recorded from the orchestrator.
    shown_text: String,
    glyphs: Vec<RevealGlyph>,
    glyph_color: Option<String>,
    active: bool,
    typing: bool,
    translate: (f64, f64, f64),
    carousel: Option<CarouselView>,
    ripple_count: usize,
    pulse_count: usize,
}

/// In-memory [`Page`]: elements are added by marker, writes are recorded
/// for assertions.
#[derive(Debug, Default)]
pub struct MemoryPage {
    viewport: Viewport,
    elements: Vec<Element>,
}

impl MemoryPage {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Add a bare marked element.
    pub fn add(&mut self, marker: Marker) -> ElementId {
        self.elements.push(Element {
            marker: Some(marker),
            ..Element::default()
        });
        ElementId(self.elements.len() as u64 - 1)
    }

    /// Add a marked element carrying source text.
    pub fn add_with_text(&mut self, marker: Marker, text: &str) -> ElementId {
        let el = self.add(marker);
        self.element_mut(el).source_text = Some(text.to_owned());
        el
    }

    pub fn set_color_override(&mut self, el: ElementId, color: &str) {
        self.element_mut(el).color = Some(color.to_owned());
    }

    pub fn set_element_bounds(&mut self, el: ElementId, bounds: RectF) {
        self.element_mut(el).bounds = Some(bounds);
    }

    pub fn give_surface(&mut self, el: ElementId) {
        self.element_mut(el).surface = Some(MemorySurface::default());
    }

    /// Simulate the host dropping an element's surface mid-run.
    pub fn take_surface(&mut self, el: ElementId) -> Option<MemorySurface> {
        self.element_mut(el).surface.take()
    }

    #[must_use]
    pub fn shown_text(&self, el: ElementId) -> &str {
        &self.element(el).shown_text
    }

    /// The last glyph row written, as plain text.
    #[must_use]
    pub fn glyph_text(&self, el: ElementId) -> String {
        self.element(el).glyphs.iter().map(|g| g.ch).collect()
    }

    #[must_use]
    pub fn glyphs(&self, el: ElementId) -> &[RevealGlyph] {
        &self.element(el).glyphs
    }

    #[must_use]
    pub fn glyph_color(&self, el: ElementId) -> Option<&str> {
        self.element(el).glyph_color.as_deref()
    }

    #[must_use]
    pub fn is_active(&self, el: ElementId) -> bool {
        self.element(el).active
    }

    #[must_use]
    pub fn is_typing(&self, el: ElementId) -> bool {
        self.element(el).typing
    }

    #[must_use]
    pub fn translate(&self, el: ElementId) -> (f64, f64, f64) {
        self.element(el).translate
    }

    #[must_use]
    pub fn carousel_view(&self, el: ElementId) -> Option<&CarouselView> {
        self.element(el).carousel.as_ref()
    }

    #[must_use]
    pub fn ripple_count(&self, el: ElementId) -> usize {
        self.element(el).ripple_count
    }

    #[must_use]
    pub fn pulse_count(&self, el: ElementId) -> usize {
        self.element(el).pulse_count
    }

    #[must_use]
    pub fn surface_of(&self, el: ElementId) -> Option<&MemorySurface> {
        self.element(el).surface.as_ref()
    }

    fn element(&self, el: ElementId) -> &Element {
        &self.elements[el.0 as usize]
    }

    fn element_mut(&mut self, el: ElementId) -> &mut Element {
        &mut self.elements[el.0 as usize]
    }
}

impl Page for MemoryPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn elements(&self, marker: Marker) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.marker == Some(marker))
            .map(|(i, _)| ElementId(i as u64))
            .collect()
    }

    fn bounds(&self, el: ElementId) -> Option<RectF> {
        self.elements.get(el.0 as usize)?.bounds
    }

    fn source_text(&self, el: ElementId) -> Option<String> {
        self.elements.get(el.0 as usize)?.source_text.clone()
    }

    fn color_override(&self, el: ElementId) -> Option<String> {
        self.elements.get(el.0 as usize)?.color.clone()
    }

    fn set_phase(&mut self, el: ElementId, phase: Phase, on: bool) {
        let e = self.element_mut(el);
        match phase {
            Phase::Active => e.active = on,
            Phase::Typing => e.typing = on,
        }
    }

    fn set_plain_text(&mut self, el: ElementId, text: &str) {
        self.element_mut(el).shown_text = text.to_owned();
    }

    fn set_reveal_text(&mut self, el: ElementId, glyphs: &[RevealGlyph], color: Option<&str>) {
        let e = self.element_mut(el);
        e.glyphs = glyphs.to_vec();
        e.glyph_color = color.map(str::to_owned);
    }

    fn set_translate(&mut self, el: ElementId, dx: f64, dy: f64, rotate_deg: f64) {
        self.element_mut(el).translate = (dx, dy, rotate_deg);
    }

    fn set_carousel(&mut self, el: ElementId, view: &CarouselView) {
        self.element_mut(el).carousel = Some(view.clone());
    }

    fn set_ripples(&mut self, el: ElementId, ripples: &[Ripple], _now: Instant) {
        self.element_mut(el).ripple_count = ripples.len();
    }

    fn set_grid_pulses(&mut self, el: ElementId, pulses: &[GridPulse], _now: Instant) {
        self.element_mut(el).pulse_count = pulses.len();
    }

    fn surface(&mut self, el: ElementId) -> Option<&mut dyn StrokeSurface> {
        match self.elements.get_mut(el.0 as usize)?.surface.as_mut() {
            Some(s) => Some(s),
            None => None,
        }
    }
}
