#![forbid(unsafe_code)]

//! Core primitives for FlashFX: continuous geometry, the frame clock, the
//! frame-scheduling seam, and the host surface/viewport seams.
//!
//! Everything here is host-agnostic. Engines in `flashfx-fx` and controllers
//! in `flashfx-widgets` consume these types; the embedding (a DOM shim, a
//! cell-grid painter, a test fixture) implements the traits.

pub mod clock;
pub mod geometry;
pub mod sched;
pub mod surface;

pub use clock::FrameClock;
pub use geometry::{RectF, Vec2};
pub use sched::{FrameHandle, FrameSlot, Scheduler};
pub use surface::{Rgba, StrokePaint, StrokeSurface, Viewport};
