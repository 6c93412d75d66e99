//! Review carousel controller.
//!
//! Auto-rotates through review cards, with manual navigation (arrows, dots,
//! swipes) resetting the cadence. The render side consumes a structured
//! [`CarouselView`]; card content is plain records, never markup strings.

use web_time::{Duration, Instant};

/// Auto-rotation cadence.
const ROTATE_EVERY: Duration = Duration::from_secs(8);

/// Minimum swipe travel before a touch gesture counts as navigation.
const MIN_SWIPE_PX: f64 = 50.0;

/// One review card view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub name: String,
    pub initials: String,
    pub text: String,
}

impl Review {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        initials: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            initials: initials.into(),
            text: text.into(),
        }
    }
}

/// The stock review set shipped with the page.
#[must_use]
pub fn stock_reviews() -> Vec<Review> {
    vec![
        Review::new("Edgar D.", "ED", "Excelente"),
        Review::new("Juan M.", "JM", "Buen servicio"),
        Review::new("Dinámica Despachos", "Dd", "Excelente servicio, 10 puntos."),
    ]
}

/// Snapshot handed to the renderer each time the carousel changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    /// Horizontal track translation as a percentage (`-index * 100`).
    pub translate_percent: f64,
    /// One flag per dot; exactly one is set.
    pub dots: Vec<bool>,
}

/// Carousel over review records, owning its own rotation timer.
pub struct ReviewCarousel {
    reviews: Vec<Review>,
    index: usize,
    last_rotate: Option<Instant>,
}

impl ReviewCarousel {
    #[must_use]
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            index: 0,
            last_rotate: None,
        }
    }

    /// Begin auto-rotation. Idempotent: starting twice never doubles the
    /// cadence (the timer is anchored once).
    pub fn start(&mut self, now: Instant) {
        if self.reviews.is_empty() || self.last_rotate.is_some() {
            return;
        }
        self.last_rotate = Some(now);
    }

    pub fn stop(&mut self) {
        self.last_rotate = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_rotate.is_some()
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn active_review(&self) -> Option<&Review> {
        self.reviews.get(self.index)
    }

    #[must_use]
    pub fn view(&self) -> CarouselView {
        CarouselView {
            translate_percent: -(self.index as f64) * 100.0,
            dots: (0..self.reviews.len()).map(|i| i == self.index).collect(),
        }
    }

    /// Auto-advance when the cadence has elapsed; returns the new index.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let last = self.last_rotate?;
        if now.saturating_duration_since(last) < ROTATE_EVERY {
            return None;
        }
        self.step(1, now);
        Some(self.index)
    }

    /// Advance one card; manual navigation resets the timer.
    pub fn next(&mut self, now: Instant) {
        self.step(1, now);
    }

    /// Go back one card; manual navigation resets the timer.
    pub fn prev(&mut self, now: Instant) {
        self.step(-1, now);
    }

    /// Jump to `index` (wrapping); resets the timer.
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if self.reviews.is_empty() {
            return;
        }
        self.index = index % self.reviews.len();
        self.reset_timer(now);
    }

    /// Interpret a completed touch gesture.
    ///
    /// A swipe counts only when horizontal travel exceeds [`MIN_SWIPE_PX`]
    /// and dominates the vertical travel (otherwise it was a scroll).
    /// Returns `true` when the gesture navigated.
    pub fn swipe(&mut self, delta_x: f64, delta_y: f64, now: Instant) -> bool {
        if delta_x.abs() <= MIN_SWIPE_PX || delta_x.abs() <= delta_y.abs() {
            return false;
        }
        if delta_x > 0.0 {
            self.prev(now);
        } else {
            self.next(now);
        }
        true
    }

    fn step(&mut self, dir: isize, now: Instant) {
        let len = self.reviews.len();
        if len == 0 {
            return;
        }
        self.index = (self.index as isize + dir).rem_euclid(len as isize) as usize;
        self.reset_timer(now);
    }

    fn reset_timer(&mut self, now: Instant) {
        if self.last_rotate.is_some() {
            self.last_rotate = Some(now);
        }
    }
}
