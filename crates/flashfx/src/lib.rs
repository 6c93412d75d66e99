#![forbid(unsafe_code)]

//! FlashFX: procedural page effects behind host-agnostic seams.
//!
//! This facade re-exports the workspace crates under one roof:
//!
//! - [`core`]: geometry, frame clock, scheduling and surface seams.
//! - [`fx`]: the animation engines (electric border, scramble reveal,
//!   typewriter, grid pulses).
//! - [`widgets`]: page widget controllers (hero slider, review carousel,
//!   back-to-top, parallax, ripples).
//! - [`runtime`]: the orchestrator binding engines to a [`Page`] and
//!   driving them from one frame loop.
//!
//! Hosts that only need the engines can disable the default features.
//!
//! [`Page`]: runtime::Page

pub use flashfx_core as core;
pub use flashfx_fx as fx;
#[cfg(feature = "runtime")]
pub use flashfx_runtime as runtime;
#[cfg(feature = "widgets")]
pub use flashfx_widgets as widgets;

/// One-stop imports for embedding FlashFX.
pub mod prelude {
    pub use flashfx_core::{
        FrameClock, FrameHandle, FrameSlot, RectF, Rgba, Scheduler, StrokePaint, StrokeSurface,
        Vec2, Viewport,
    };
    pub use flashfx_fx::{
        BorderParams, ElectricBorder, GridPulse, GridPulseField, RevealGlyph, RevealTick,
        ScrambleReveal, Typewriter,
    };
    #[cfg(feature = "runtime")]
    pub use flashfx_runtime::{ElementId, Marker, Orchestrator, Page, Phase, TickScheduler};
    #[cfg(feature = "widgets")]
    pub use flashfx_widgets::{
        BackToTop, CarouselView, HeroSlide, HeroSlider, Parallax, RevealOnScroll, Review,
        ReviewCarousel, Ripple, RippleField, stock_reviews,
    };
}
