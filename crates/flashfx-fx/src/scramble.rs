//! Scramble ("hacker text") reveal engine.
//!
//! Each character position gets its own randomized scramble window: before
//! the window it shows the outgoing character, inside it a flickering glyph
//! from a fixed symbol alphabet, after it the incoming character, settled
//! for good. Staggered windows make the reveal sweep across the string
//! instead of snapping all at once.

use flashfx_core::{FrameHandle, FrameSlot, Scheduler};
use rand::Rng;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

/// The fixed scramble alphabet.
///
/// Repeated underscores and binary digits weight the draw toward the
/// "terminal noise" look of the original.
pub const SCRAMBLE_CHARS: &[char] = &[
    '0', '1', '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '—', '=', '+', '*', '^',
    '?', '#', '_', '_', '_', '_', '_', '_', '_', '_', '0', '1', '0', '1', '0', '1', '0', '1',
];

/// Probability per frame that an in-window glyph is re-rolled.
///
/// Re-rolling every frame strobes; never re-rolling freezes. ~28% flickers.
const REROLL_PROBABILITY: f64 = 0.28;

/// Scramble windows start uniformly in `[0, STAGGER)` frames and last
/// uniformly `[0, STAGGER)` more.
const STAGGER: u32 = 40;

/// One emitted character plus whether it is currently scramble filler.
///
/// The host styles scrambled glyphs (the color-override attribute);
/// the engine never produces markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealGlyph {
    pub ch: char,
    pub scrambled: bool,
}

/// One position in the reveal queue.
#[derive(Debug, Clone)]
struct CharSlot {
    /// Outgoing character; `None` when the old text was shorter.
    from: Option<char>,
    /// Incoming character; `None` when the new text is shorter.
    to: Option<char>,
    start: u32,
    end: u32,
    /// Current scramble filler, kept between re-rolls.
    glyph: Option<char>,
}

/// What one ticked frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTick {
    /// No session in flight, or the fired handle was stale.
    Inactive,
    /// Session advanced; output changed.
    Active,
    /// Every slot resolved on this frame. Fired exactly once per session.
    Completed,
}

/// Per-element scramble reveal engine.
///
/// Starting a new reveal while one is in flight supersedes it: the pending
/// frame request is cancelled before the new queue is built, so two
/// sessions can never race on the same element.
pub struct ScrambleReveal {
    rng: SmallRng,
    queue: Vec<CharSlot>,
    frame: u32,
    done: bool,
    slot: FrameSlot,
    /// Last emitted glyph row; also the `from` side of the next session.
    output: Vec<RevealGlyph>,
}

impl ScrambleReveal {
    /// Create an engine showing `initial` text, with a caller-chosen RNG
    /// seed (hosts seed from entropy, tests from a constant).
    #[must_use]
    pub fn new(initial: &str, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            queue: Vec::new(),
            frame: 0,
            done: true,
            slot: FrameSlot::new(),
            output: initial
                .chars()
                .map(|ch| RevealGlyph { ch, scrambled: false })
                .collect(),
        }
    }

    /// The currently displayed glyph row.
    #[must_use]
    pub fn glyphs(&self) -> &[RevealGlyph] {
        &self.output
    }

    /// The currently displayed text, without scramble styling.
    #[must_use]
    pub fn text(&self) -> String {
        self.output.iter().map(|g| g.ch).collect()
    }

    /// Whether a session is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.done
    }

    /// Start revealing `target`, superseding any in-flight session.
    pub fn set_text(&mut self, target: &str, sched: &mut dyn Scheduler) {
        // Cancel before building the new queue; a stale frame from the old
        // session must never tick the new one.
        self.slot.clear(sched);

        let old: Vec<char> = self.output.iter().map(|g| g.ch).collect();
        let new: Vec<char> = target.chars().collect();
        let len = old.len().max(new.len());

        if self.is_active() {
            debug!(target: "flashfx::scramble", slots = len, "superseding in-flight reveal");
        }

        self.queue.clear();
        self.queue.reserve(len);
        for i in 0..len {
            let start = self.rng.random_range(0..STAGGER);
            let end = start + self.rng.random_range(0..STAGGER);
            self.queue.push(CharSlot {
                from: old.get(i).copied(),
                to: new.get(i).copied(),
                start,
                end,
                glyph: None,
            });
        }
        self.frame = 0;
        self.done = false;
        self.slot.schedule(sched);
    }

    /// One scheduled frame fired.
    pub fn on_frame(&mut self, handle: FrameHandle, sched: &mut dyn Scheduler) -> RevealTick {
        if !self.slot.take(handle) || self.done {
            return RevealTick::Inactive;
        }

        let tick = self.advance();
        if tick == RevealTick::Active {
            self.slot.schedule(sched);
        }
        tick
    }

    /// Advance the session by one frame and rebuild the output row.
    fn advance(&mut self) -> RevealTick {
        self.output.clear();
        let mut resolved = 0usize;

        for slot in &mut self.queue {
            if self.frame >= slot.end {
                resolved += 1;
                if let Some(to) = slot.to {
                    self.output.push(RevealGlyph { ch: to, scrambled: false });
                }
            } else if self.frame >= slot.start {
                let reroll = slot.glyph.is_none() || self.rng.random_bool(REROLL_PROBABILITY);
                if reroll {
                    let idx = self.rng.random_range(0..SCRAMBLE_CHARS.len());
                    slot.glyph = Some(SCRAMBLE_CHARS[idx]);
                }
                // In-window slots always show filler, even where the target
                // has no character; the string shrinks as those resolve.
                if let Some(glyph) = slot.glyph {
                    self.output.push(RevealGlyph { ch: glyph, scrambled: true });
                }
            } else if let Some(from) = slot.from {
                self.output.push(RevealGlyph { ch: from, scrambled: false });
            }
        }

        self.frame += 1;
        if resolved == self.queue.len() {
            self.done = true;
            RevealTick::Completed
        } else {
            RevealTick::Active
        }
    }
}
