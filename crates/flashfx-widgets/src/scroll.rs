//! Scroll- and pointer-driven effects: back-to-top, reveal-on-scroll,
//! parallax.

/// Scroll depth past which the back-to-top button shows.
const BACK_TO_TOP_THRESHOLD: f64 = 300.0;

/// Back-to-top button controller.
#[derive(Debug, Default)]
pub struct BackToTop {
    active: bool,
}

impl BackToTop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the scroll offset; returns `true` when the active flag flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let next = scroll_y > BACK_TO_TOP_THRESHOLD;
        let changed = next != self.active;
        self.active = next;
        changed
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Reveal-on-scroll marker: once an element has intersected the viewport it
/// stays revealed.
#[derive(Debug, Default)]
pub struct RevealOnScroll {
    revealed: bool,
}

impl RevealOnScroll {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the intersection signal; returns `true` on the transition into
    /// the revealed state (the moment the host adds its `active` class).
    pub fn on_intersection(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.revealed {
            self.revealed = true;
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Pure parallax math shared by the scroll and pointer handlers.
#[derive(Debug, Clone, Copy)]
pub struct Parallax;

impl Parallax {
    /// Hero visual vertical drift for a given scroll offset.
    #[inline]
    #[must_use]
    pub fn hero_offset(scroll_y: f64) -> f64 {
        scroll_y * 0.3
    }

    /// Background grid vertical drift for a given scroll offset.
    #[inline]
    #[must_use]
    pub fn grid_offset(scroll_y: f64) -> f64 {
        scroll_y * 0.15
    }

    /// Pointer-following card drift.
    ///
    /// `nx`/`ny` are the pointer position normalized to the viewport; cards
    /// deeper in the stack drift further. Returns `(dx, dy, rotation_deg)`.
    #[must_use]
    pub fn card_drift(nx: f64, ny: f64, card_index: usize) -> (f64, f64, f64) {
        let speed = (card_index + 1) as f64 * 20.0;
        (nx * speed, ny * speed, nx * 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_top_flips_at_threshold() {
        let mut b = BackToTop::new();
        assert!(!b.on_scroll(300.0), "at the threshold is still inactive");
        assert!(b.on_scroll(301.0));
        assert!(b.is_active());
        assert!(!b.on_scroll(500.0), "no change while deep in the page");
        assert!(b.on_scroll(10.0));
        assert!(!b.is_active());
    }

    #[test]
    fn reveal_fires_once_and_sticks() {
        let mut r = RevealOnScroll::new();
        assert!(!r.on_intersection(false));
        assert!(r.on_intersection(true));
        assert!(!r.on_intersection(true), "already revealed");
        assert!(!r.on_intersection(false), "scrolling away does not unreveal");
        assert!(r.is_revealed());
    }

    #[test]
    fn parallax_factors() {
        assert_eq!(Parallax::hero_offset(1000.0), 300.0);
        assert_eq!(Parallax::grid_offset(1000.0), 150.0);
    }

    #[test]
    fn deeper_cards_drift_further() {
        let (dx0, dy0, rot0) = Parallax::card_drift(0.5, 0.25, 0);
        let (dx1, dy1, _) = Parallax::card_drift(0.5, 0.25, 1);
        assert_eq!((dx0, dy0, rot0), (10.0, 5.0, 2.5));
        assert_eq!((dx1, dy1), (20.0, 10.0));
    }
}
