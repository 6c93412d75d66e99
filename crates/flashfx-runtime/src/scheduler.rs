//! Frame scheduler backing the orchestrator.
//!
//! The host calls [`Orchestrator::on_frame`](crate::Orchestrator::on_frame)
//! once per paintable moment; [`TickScheduler`] collects the frame requests
//! engines made since the last pump and hands them back as a batch. Requests
//! made *during* a pump fire on the next one, matching
//! `requestAnimationFrame` semantics.

use flashfx_core::{FrameHandle, Scheduler};

/// Monotonic handle allocator with an outstanding-request set.
///
/// Handles are never reused within a scheduler's lifetime, so a stale handle
/// from a cancelled request can never collide with a live one.
#[derive(Debug, Default)]
pub struct TickScheduler {
    next: u64,
    outstanding: Vec<FrameHandle>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every request made before this pump.
    ///
    /// Requests issued by engines while the returned batch is being
    /// dispatched accumulate for the next pump.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.outstanding)
    }

    /// Number of requests waiting for the next pump.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

impl Scheduler for TickScheduler {
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
