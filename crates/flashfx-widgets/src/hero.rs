//! Hero slider controller.
//!
//! Rotates through hero slides on a fixed cadence; whenever a slide becomes
//! active, its tagline is retyped by a [`Typewriter`].

use flashfx_fx::Typewriter;
use tracing::debug;
use web_time::{Duration, Instant};

/// Slide rotation cadence.
const ROTATE_EVERY: Duration = Duration::from_secs(12);

/// One hero slide view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSlide {
    pub headline: String,
    pub tagline: String,
}

impl HeroSlide {
    #[must_use]
    pub fn new(headline: impl Into<String>, tagline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            tagline: tagline.into(),
        }
    }
}

/// Rotating hero slider owning its own timer and tagline typewriter.
pub struct HeroSlider {
    slides: Vec<HeroSlide>,
    current: usize,
    last_rotate: Option<Instant>,
    typewriter: Option<Typewriter>,
    seed: u64,
}

impl HeroSlider {
    #[must_use]
    pub fn new(slides: Vec<HeroSlide>, seed: u64) -> Self {
        Self {
            slides,
            current: 0,
            last_rotate: None,
            typewriter: None,
            seed,
        }
    }

    /// Show slide 0 and begin rotating. Idempotent; a second `start` while
    /// running does not reset the cadence.
    pub fn start(&mut self, now: Instant) {
        if self.slides.is_empty() || self.last_rotate.is_some() {
            return;
        }
        debug!(target: "flashfx::hero", slides = self.slides.len(), "hero slider started");
        self.current = 0;
        self.last_rotate = Some(now);
        self.retype(now);
    }

    pub fn stop(&mut self) {
        self.last_rotate = None;
        self.typewriter = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_rotate.is_some()
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn active_slide(&self) -> Option<&HeroSlide> {
        self.slides.get(self.current)
    }

    /// The portion of the active tagline typed so far.
    #[must_use]
    pub fn visible_tagline(&self) -> String {
        self.typewriter
            .as_ref()
            .map(Typewriter::visible_text)
            .unwrap_or_default()
    }

    /// Whether the tagline caret should blink (host `typing` class).
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typewriter.as_ref().is_some_and(Typewriter::is_typing)
    }

    /// Advance timers; returns the newly activated slide index when the
    /// cadence rotated.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let last = self.last_rotate?;
        if let Some(tw) = &mut self.typewriter {
            tw.tick(now);
        }
        if now.saturating_duration_since(last) < ROTATE_EVERY {
            return None;
        }
        self.current = (self.current + 1) % self.slides.len();
        self.last_rotate = Some(now);
        self.retype(now);
        Some(self.current)
    }

    fn retype(&mut self, now: Instant) {
        let Some(slide) = self.slides.get(self.current) else {
            return;
        };
        // One seed stream per activation keeps runs reproducible.
        self.seed = self.seed.wrapping_add(1);
        let mut tw = Typewriter::new(&slide.tagline, self.seed);
        tw.restart(now);
        self.typewriter = Some(tw);
    }
}
