//! Frame-scheduling seam.
//!
//! Engines never block between frames; they ask the host for "one callback
//! at the next paintable moment" and yield. The host supplies the
//! [`Scheduler`]; [`FrameSlot`] holds an engine's single outstanding request.
//!
//! # Invariants
//!
//! 1. An engine instance has at most one outstanding frame request at any
//!    time. [`FrameSlot::schedule`] cancels the pending handle before
//!    requesting a new one, so two overlapping frame loops can never
//!    double-draw the same element.
//! 2. Handles are never reused by a scheduler within its lifetime.

/// Opaque identifier for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-supplied frame scheduling primitive.
///
/// The browser shim maps this onto `requestAnimationFrame` /
/// `cancelAnimationFrame`; test fixtures use a manual pump.
pub trait Scheduler {
    /// Request one callback at the next paintable moment.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested callback. Unknown or already-fired
    /// handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Owns at most one outstanding [`FrameHandle`] for an engine instance.
///
/// Cancel-before-reschedule is a correctness requirement, not an
/// optimization: a stale loop surviving a restart would race the new one on
/// the same element. Routing every request through a slot makes the stale
/// case unrepresentable.
#[derive(Debug, Default)]
pub struct FrameSlot {
    pending: Option<FrameHandle>,
}

impl FrameSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Cancel any pending request, then request a fresh frame.
    pub fn schedule(&mut self, sched: &mut dyn Scheduler) {
        if let Some(old) = self.pending.take() {
            sched.cancel_frame(old);
        }
        self.pending = Some(sched.request_frame());
    }

    /// Cancel the pending request, if any, without rescheduling.
    pub fn clear(&mut self, sched: &mut dyn Scheduler) {
        if let Some(old) = self.pending.take() {
            sched.cancel_frame(old);
        }
    }

    /// Consume `handle` if it is the one this slot is waiting for.
    ///
    /// Returns `true` when the fired callback belongs to the current
    /// request. A stale callback (superseded session) returns `false` and
    /// must be ignored by the engine.
    pub fn take(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether a frame request is currently outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
