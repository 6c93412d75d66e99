//! Page orchestrator.
//!
//! Binds one engine instance per marked element at mount, then routes host
//! signals (frames, scroll, pointer, clicks, visibility, resize) to the
//! right instance. Single-threaded, run-to-completion per signal: no engine
//! state is shared across instances, and every frame request an engine makes
//! is tagged with a route so the next pump dispatches it back to exactly
//! that instance.
//!
//! Elements missing the handles an effect needs are skipped at mount and
//! logged; a page with nothing to animate mounts to an inert orchestrator.

use std::collections::HashMap;

use flashfx_core::{FrameHandle, RectF, Scheduler, Vec2};
use flashfx_fx::{
    BorderParams, ElectricBorder, GridPulseField, RevealTick, ScrambleReveal, Typewriter,
};
use flashfx_widgets::{
    BackToTop, HeroSlide, HeroSlider, Parallax, RevealOnScroll, ReviewCarousel, RippleField,
    stock_reviews,
};
use tracing::{debug, trace};
use web_time::{Duration, Instant};

use crate::page::{ElementId, Marker, Page, Phase};
use crate::scheduler::TickScheduler;

/// Delay before the first scramble reveal after mount.
const INITIAL_REVEAL_DELAY: Duration = Duration::from_secs(1);

/// Pause between a completed scramble reveal and the next one.
const REVEAL_EVERY: Duration = Duration::from_secs(12);

/// Pause between a finished typewriter pass and the next one.
const RETYPE_EVERY: Duration = Duration::from_secs(15);

/// Which engine instance a scheduled frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Border(usize),
    Hacker(usize),
}

/// Scheduler view handed to an engine: every request it makes is tagged
/// with the engine's route before reaching the underlying scheduler.
struct RoutedScheduler<'a> {
    inner: &'a mut TickScheduler,
    routes: &'a mut HashMap<FrameHandle, Route>,
    route: Route,
}

impl Scheduler for RoutedScheduler<'_> {
    fn request_frame(&mut self) -> FrameHandle {
        let h = self.inner.request_frame();
        self.routes.insert(h, self.route);
        h
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.routes.remove(&handle);
        self.inner.cancel_frame(handle);
    }
}

struct HackerBinding {
    el: ElementId,
    fx: ScrambleReveal,
    source: String,
    color: Option<String>,
    /// Next time to start a reveal; `None` while one is in flight.
    trigger_at: Option<Instant>,
}

struct TypingBinding {
    el: ElementId,
    tw: Typewriter,
    retype_at: Option<Instant>,
}

struct BorderBinding {
    el: ElementId,
    fx: ElectricBorder,
}

struct RippleBinding {
    el: ElementId,
    field: RippleField,
    /// Whether the last write showed any ripple; one trailing write clears.
    live: bool,
}

/// The page-wide effect coordinator.
pub struct Orchestrator {
    seed: u64,
    sched: TickScheduler,
    routes: HashMap<FrameHandle, Route>,
    mounted: bool,

    hackers: Vec<HackerBinding>,
    typists: Vec<TypingBinding>,
    borders: Vec<BorderBinding>,
    reveals: Vec<(ElementId, RevealOnScroll)>,
    ripples: Vec<RippleBinding>,
    cards: Vec<ElementId>,
    hero_visual: Option<ElementId>,
    grid: Option<(ElementId, GridPulseField)>,
    hero_slides: Vec<ElementId>,
    hero: Option<HeroSlider>,
    hero_typing: bool,
    carousel: Option<(ElementId, ReviewCarousel)>,
    back_to_top: Option<(ElementId, BackToTop)>,
}

impl Orchestrator {
    /// `seed` feeds every per-instance RNG; equal seeds over equal pages
    /// replay identically.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            sched: TickScheduler::new(),
            routes: HashMap::new(),
            mounted: false,
            hackers: Vec::new(),
            typists: Vec::new(),
            borders: Vec::new(),
            reveals: Vec::new(),
            ripples: Vec::new(),
            cards: Vec::new(),
            hero_visual: None,
            grid: None,
            hero_slides: Vec::new(),
            hero: None,
            hero_typing: false,
            carousel: None,
            back_to_top: None,
        }
    }

    /// Discover marked elements and build one engine instance per element.
    ///
    /// Elements missing a required handle (no source text, no surface) are
    /// skipped. Mounting twice is a no-op.
    pub fn mount(&mut self, now: Instant, page: &mut dyn Page) {
        if self.mounted {
            debug!(target: "flashfx::orchestrator", "already mounted, ignoring");
            return;
        }
        self.mounted = true;

        for el in page.elements(Marker::HackerText) {
            let Some(source) = page.source_text(el) else {
                debug!(target: "flashfx::orchestrator", ?el, "hacker text without source, skipped");
                continue;
            };
            let seed = self.next_seed();
            self.hackers.push(HackerBinding {
                el,
                fx: ScrambleReveal::new(&source, seed),
                source,
                color: page.color_override(el),
                trigger_at: Some(now + INITIAL_REVEAL_DELAY),
            });
        }

        for el in page.elements(Marker::TypingEffect) {
            let Some(text) = page.source_text(el) else {
                debug!(target: "flashfx::orchestrator", ?el, "typing effect without source, skipped");
                continue;
            };
            let mut tw = Typewriter::new(&text, self.next_seed());
            tw.restart(now);
            page.set_plain_text(el, "");
            page.set_phase(el, Phase::Typing, true);
            self.typists.push(TypingBinding {
                el,
                tw,
                retype_at: None,
            });
        }

        for el in page.elements(Marker::ElectricBorder) {
            if page.surface(el).is_none() {
                debug!(target: "flashfx::orchestrator", ?el, "border without surface, skipped");
                continue;
            }
            let mut fx = ElectricBorder::new(BorderParams::default());
            if let Some(bounds) = page.bounds(el) {
                let dpr = page.viewport().dpr;
                let mut sched = RoutedScheduler {
                    inner: &mut self.sched,
                    routes: &mut self.routes,
                    route: Route::Border(self.borders.len()),
                };
                fx.set_bounds(bounds, dpr, &mut sched);
            }
            self.borders.push(BorderBinding { el, fx });
        }

        self.reveals = page
            .elements(Marker::Reveal)
            .into_iter()
            .map(|el| (el, RevealOnScroll::new()))
            .collect();

        self.ripples = page
            .elements(Marker::RippleButton)
            .into_iter()
            .map(|el| RippleBinding {
                el,
                field: RippleField::new(),
                live: false,
            })
            .collect();

        self.cards = page.elements(Marker::ParallaxCard);
        self.hero_visual = page.elements(Marker::HeroVisual).first().copied();

        if let Some(el) = page.elements(Marker::GridOverlay).first().copied() {
            let mut field = GridPulseField::new(self.next_seed());
            field.start(now);
            self.grid = Some((el, field));
        }

        self.hero_slides = page.elements(Marker::HeroSlide);
        if !self.hero_slides.is_empty() {
            // Headlines stay in the host markup; only taglines are animated.
            let slides = self
                .hero_slides
                .iter()
                .map(|el| HeroSlide::new("", page.source_text(*el).unwrap_or_default()))
                .collect();
            let mut hero = HeroSlider::new(slides, self.next_seed());
            hero.start(now);
            self.hero = Some(hero);
            self.apply_hero_phases(page);
        }

        if let Some(el) = page.elements(Marker::ReviewCarousel).first().copied() {
            let mut carousel = ReviewCarousel::new(stock_reviews());
            carousel.start(now);
            page.set_carousel(el, &carousel.view());
            self.carousel = Some((el, carousel));
        }

        self.back_to_top = page
            .elements(Marker::BackToTop)
            .first()
            .copied()
            .map(|el| (el, BackToTop::new()));

        debug!(
            target: "flashfx::orchestrator",
            hackers = self.hackers.len(),
            typists = self.typists.len(),
            borders = self.borders.len(),
            reveals = self.reveals.len(),
            slides = self.hero_slides.len(),
            "mounted"
        );
    }

    /// One host animation frame: dispatch due engine frames, fire due
    /// timers, advance the time-driven widgets.
    pub fn on_frame(&mut self, now: Instant, page: &mut dyn Page) {
        trace!(target: "flashfx::orchestrator", due = self.sched.outstanding(), "frame");
        self.dispatch_due(now, page);
        self.fire_timers(now);
        self.tick_widgets(now, page);
    }

    /// Scroll offset changed: back-to-top visibility plus scroll parallax.
    pub fn on_scroll(&mut self, scroll_y: f64, page: &mut dyn Page) {
        if let Some((el, state)) = &mut self.back_to_top {
            if state.on_scroll(scroll_y) {
                page.set_phase(*el, Phase::Active, state.is_active());
            }
        }
        if let Some(el) = self.hero_visual {
            page.set_translate(el, 0.0, Parallax::hero_offset(scroll_y), 0.0);
        }
        if let Some((el, _)) = &self.grid {
            page.set_translate(*el, 0.0, Parallax::grid_offset(scroll_y), 0.0);
        }
    }

    /// Pointer moved; `nx`/`ny` normalized to the viewport center.
    pub fn on_pointer_move(&mut self, nx: f64, ny: f64, page: &mut dyn Page) {
        for (i, el) in self.cards.iter().enumerate() {
            let (dx, dy, rot) = Parallax::card_drift(nx, ny, i);
            page.set_translate(*el, dx, dy, rot);
        }
    }

    /// Click landed on `el` at `point` (page coordinates).
    pub fn on_click(&mut self, el: ElementId, point: Vec2, now: Instant, page: &mut dyn Page) {
        let Some(binding) = self.ripples.iter_mut().find(|b| b.el == el) else {
            return;
        };
        let Some(bounds) = page.bounds(el) else {
            debug!(target: "flashfx::orchestrator", ?el, "ripple button without bounds");
            return;
        };
        binding.field.spawn(bounds, point, now);
        binding.live = true;
        page.set_ripples(el, binding.field.ripples(), now);
    }

    /// Intersection-observer signal for one element.
    pub fn on_visibility(&mut self, el: ElementId, visible: bool, page: &mut dyn Page) {
        for i in 0..self.borders.len() {
            if self.borders[i].el != el {
                continue;
            }
            let mut sched = RoutedScheduler {
                inner: &mut self.sched,
                routes: &mut self.routes,
                route: Route::Border(i),
            };
            self.borders[i].fx.set_visible(visible, &mut sched);
        }
        for (reveal_el, state) in &mut self.reveals {
            if *reveal_el == el && state.on_intersection(visible) {
                page.set_phase(el, Phase::Active, true);
            }
        }
    }

    /// Resize-observer signal for one element.
    pub fn on_resize(&mut self, el: ElementId, bounds: RectF, dpr: f64) {
        for i in 0..self.borders.len() {
            if self.borders[i].el != el {
                continue;
            }
            let mut sched = RoutedScheduler {
                inner: &mut self.sched,
                routes: &mut self.routes,
                route: Route::Border(i),
            };
            self.borders[i].fx.set_bounds(bounds, dpr, &mut sched);
        }
    }

    /// Manual carousel navigation: advance one card.
    pub fn carousel_next(&mut self, now: Instant, page: &mut dyn Page) {
        if let Some((el, c)) = &mut self.carousel {
            c.next(now);
            page.set_carousel(*el, &c.view());
        }
    }

    /// Manual carousel navigation: back one card.
    pub fn carousel_prev(&mut self, now: Instant, page: &mut dyn Page) {
        if let Some((el, c)) = &mut self.carousel {
            c.prev(now);
            page.set_carousel(*el, &c.view());
        }
    }

    /// Dot navigation: jump to a card.
    pub fn carousel_go_to(&mut self, index: usize, now: Instant, page: &mut dyn Page) {
        if let Some((el, c)) = &mut self.carousel {
            c.go_to(index, now);
            page.set_carousel(*el, &c.view());
        }
    }

    /// Completed touch gesture over the carousel.
    pub fn carousel_swipe(&mut self, dx: f64, dy: f64, now: Instant, page: &mut dyn Page) {
        if let Some((el, c)) = &mut self.carousel {
            if c.swipe(dx, dy, now) {
                page.set_carousel(*el, &c.view());
            }
        }
    }

    /// Dispatch every engine frame that came due since the last pump.
    fn dispatch_due(&mut self, now: Instant, page: &mut dyn Page) {
        for handle in self.sched.take_due() {
            let Some(route) = self.routes.remove(&handle) else {
                continue;
            };
            match route {
                Route::Border(i) => {
                    let binding = &mut self.borders[i];
                    let mut sched = RoutedScheduler {
                        inner: &mut self.sched,
                        routes: &mut self.routes,
                        route,
                    };
                    match page.surface(binding.el) {
                        Some(surface) => binding.fx.on_frame(handle, now, surface, &mut sched),
                        // The engine must still consume the handle, or its
                        // slot would pin the dead request and never cycle.
                        None => {
                            debug!(target: "flashfx::orchestrator", el = ?binding.el, "border surface vanished");
                            binding.fx.skip_frame(handle, now, &mut sched);
                        }
                    }
                }
                Route::Hacker(i) => {
                    let mut sched = RoutedScheduler {
                        inner: &mut self.sched,
                        routes: &mut self.routes,
                        route,
                    };
                    let binding = &mut self.hackers[i];
                    let tick = binding.fx.on_frame(handle, &mut sched);
                    if tick == RevealTick::Inactive {
                        continue;
                    }
                    page.set_reveal_text(binding.el, binding.fx.glyphs(), binding.color.as_deref());
                    if tick == RevealTick::Completed {
                        binding.trigger_at = Some(now + REVEAL_EVERY);
                    }
                }
            }
        }
    }

    /// Start reveals and typewriter passes whose timers came due.
    fn fire_timers(&mut self, now: Instant) {
        for i in 0..self.hackers.len() {
            if !self.hackers[i].trigger_at.is_some_and(|t| now >= t) {
                continue;
            }
            let mut sched = RoutedScheduler {
                inner: &mut self.sched,
                routes: &mut self.routes,
                route: Route::Hacker(i),
            };
            let binding = &mut self.hackers[i];
            binding.trigger_at = None;
            let target = binding.source.clone();
            binding.fx.set_text(&target, &mut sched);
        }
    }

    fn tick_widgets(&mut self, now: Instant, page: &mut dyn Page) {
        for b in &mut self.typists {
            if b.retype_at.is_some_and(|t| now >= t) {
                b.retype_at = None;
                b.tw.restart(now);
                page.set_plain_text(b.el, "");
                page.set_phase(b.el, Phase::Typing, true);
            }
            if b.tw.tick(now) {
                page.set_plain_text(b.el, &b.tw.visible_text());
                if b.tw.is_done() {
                    page.set_phase(b.el, Phase::Typing, false);
                    b.retype_at = Some(now + RETYPE_EVERY);
                }
            }
        }

        if let Some(hero) = &mut self.hero {
            let rotated = hero.tick(now).is_some();
            let typing = hero.is_typing();
            let active = self.hero_slides.get(hero.active_index()).copied();
            if let Some(el) = active {
                if typing || self.hero_typing {
                    page.set_plain_text(el, &hero.visible_tagline());
                    page.set_phase(el, Phase::Typing, typing);
                }
            }
            self.hero_typing = typing;
            if rotated {
                let idx = hero.active_index();
                for (i, el) in self.hero_slides.iter().enumerate() {
                    page.set_phase(*el, Phase::Active, i == idx);
                }
            }
        }

        if let Some((el, c)) = &mut self.carousel {
            if c.tick(now).is_some() {
                page.set_carousel(*el, &c.view());
            }
        }

        if let Some((el, field)) = &mut self.grid {
            field.tick(now, page.viewport());
            page.set_grid_pulses(*el, field.pulses(), now);
        }

        for b in &mut self.ripples {
            if !b.live {
                continue;
            }
            b.field.tick(now);
            page.set_ripples(b.el, b.field.ripples(), now);
            b.live = !b.field.ripples().is_empty();
        }
    }

    fn apply_hero_phases(&mut self, page: &mut dyn Page) {
        let Some(hero) = &self.hero else {
            return;
        };
        let idx = hero.active_index();
        for (i, el) in self.hero_slides.iter().enumerate() {
            page.set_phase(*el, Phase::Active, i == idx);
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(1);
        self.seed
    }
}
