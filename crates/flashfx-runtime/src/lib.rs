#![forbid(unsafe_code)]

//! FlashFX runtime: the page orchestrator and its frame scheduler.
//!
//! The host owns the real event sources (animation frames, scroll, pointer,
//! intersection and resize observers) and forwards them to one
//! [`Orchestrator`], which routes each signal to the engine instances bound
//! at mount. No subscriber is installed here; logging goes through
//! `tracing` and the host decides where it lands.

pub mod orchestrator;
pub mod page;
pub mod scheduler;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use orchestrator::Orchestrator;
pub use page::{ElementId, Marker, Page, Phase};
pub use scheduler::TickScheduler;
