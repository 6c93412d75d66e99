//! Typewriter text effect.
//!
//! Reveals a string one character at a time with a jittered per-character
//! delay, exposing a `typing` phase flag the host maps onto its styling
//! class (blinking caret while typing).

use rand::Rng;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use web_time::{Duration, Instant};

/// Per-character delay bounds, milliseconds.
const DELAY_MIN_MS: u64 = 30;
const DELAY_MAX_MS: u64 = 70;

/// Time-driven typewriter over one string.
pub struct Typewriter {
    text: Vec<char>,
    shown: usize,
    next_due: Option<Instant>,
    rng: SmallRng,
}

impl Typewriter {
    /// Create a typewriter for `text`, initially idle with nothing shown.
    #[must_use]
    pub fn new(text: &str, seed: u64) -> Self {
        Self {
            text: text.chars().collect(),
            shown: 0,
            next_due: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Begin (or restart) typing from an empty line.
    ///
    /// Idempotent in the cancel-before-start sense: any in-flight pass is
    /// discarded, never doubled.
    pub fn restart(&mut self, now: Instant) {
        self.shown = 0;
        self.next_due = if self.text.is_empty() {
            None
        } else {
            Some(now + self.delay())
        };
    }

    /// Advance to `now`, revealing every character that has come due.
    ///
    /// Returns `true` when the visible text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(due) = self.next_due {
            if now < due {
                break;
            }
            self.shown += 1;
            changed = true;
            self.next_due = if self.shown < self.text.len() {
                Some(due + self.delay())
            } else {
                None
            };
        }
        changed
    }

    /// The revealed prefix.
    #[must_use]
    pub fn visible_text(&self) -> String {
        self.text.iter().take(self.shown).collect()
    }

    /// Whether a pass is in flight (maps to the host's `typing` class).
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whether the full text is on screen.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.shown == self.text.len()
    }

    fn delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.random_range(DELAY_MIN_MS..DELAY_MAX_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_monotonically_and_finishes() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("FLASHNET", 9);
        tw.restart(t0);
        assert!(tw.is_typing());

        let mut prev_len = 0;
        let mut now = t0;
        for _ in 0..1000 {
            now += Duration::from_millis(16);
            tw.tick(now);
            let len = tw.visible_text().chars().count();
            assert!(len >= prev_len, "visible text must never shrink");
            prev_len = len;
            if tw.is_done() {
                break;
            }
        }
        assert_eq!(tw.visible_text(), "FLASHNET");
        assert!(!tw.is_typing(), "typing flag clears at the end");
    }

    #[test]
    fn slow_frame_catches_up_multiple_chars() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("ABCDE", 1);
        tw.restart(t0);
        // One giant frame covers every per-char delay.
        tw.tick(t0 + Duration::from_secs(10));
        assert!(tw.is_done());
        assert_eq!(tw.visible_text(), "ABCDE");
    }

    #[test]
    fn restart_discards_progress() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("HELLO", 2);
        tw.restart(t0);
        tw.tick(t0 + Duration::from_secs(5));
        assert!(tw.is_done());

        tw.restart(t0 + Duration::from_secs(6));
        assert_eq!(tw.visible_text(), "");
        assert!(tw.is_typing());
    }

    #[test]
    fn empty_text_is_immediately_done() {
        let mut tw = Typewriter::new("", 3);
        tw.restart(Instant::now());
        assert!(tw.is_done());
        assert!(!tw.is_typing());
    }

    #[test]
    fn nothing_happens_before_first_delay() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("AB", 4);
        tw.restart(t0);
        assert!(!tw.tick(t0 + Duration::from_millis(5)));
        assert_eq!(tw.visible_text(), "");
    }
}
