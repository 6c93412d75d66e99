//! The host document seam.
//!
//! The orchestrator never touches a DOM, a terminal, or any other concrete
//! host. It sees a [`Page`]: a bag of opaque elements tagged with
//! [`Marker`]s, plus the handful of reads and writes the effects need.
//! Anything a page does not provide simply disables the effect that needed
//! it; nothing in this crate panics over a missing element.

use flashfx_core::{RectF, StrokeSurface, Viewport};
use flashfx_fx::{GridPulse, RevealGlyph};
use flashfx_widgets::{CarouselView, Ripple};
use web_time::Instant;

/// Opaque handle for one host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Effect markers the orchestrator discovers at mount.
///
/// On a DOM host these correspond to the class names and ids the page
/// markup carries; other hosts map them however they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Scramble-reveal text element.
    HackerText,
    /// Standalone typewriter text element.
    TypingEffect,
    /// Container that gets the animated electric border.
    ElectricBorder,
    /// Element revealed the first time it scrolls into view.
    Reveal,
    /// Background grid that hosts the pulse field and scroll parallax.
    GridOverlay,
    /// Hero artwork that drifts with scroll.
    HeroVisual,
    /// Card that drifts with the pointer; order defines stacking depth.
    ParallaxCard,
    /// One hero slide; its source text is the tagline to type.
    HeroSlide,
    /// The review carousel track.
    ReviewCarousel,
    /// The back-to-top button.
    BackToTop,
    /// Button that gets click ripples.
    RippleButton,
}

/// Phase flags the host maps onto styling classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// "active": shown slide, revealed element, visible back-to-top button.
    Active,
    /// "typing": a typewriter pass is in flight (blinking caret).
    Typing,
}

/// Host document abstraction.
///
/// Read methods return `Option`; `None` means the element does not carry
/// that attribute (or does not exist), and the caller degrades to a no-op.
/// Write methods are fire-and-forget; hosts are free to ignore writes for
/// elements they no longer hold.
pub trait Page {
    fn viewport(&self) -> Viewport;

    /// All elements carrying `marker`, in document order.
    fn elements(&self, marker: Marker) -> Vec<ElementId>;

    /// The element's on-screen box, page coordinates.
    fn bounds(&self, el: ElementId) -> Option<RectF>;

    /// The element's source text (its text-content or data attribute).
    fn source_text(&self, el: ElementId) -> Option<String>;

    /// Scramble-glyph color override, a host-side color string.
    fn color_override(&self, el: ElementId) -> Option<String>;

    fn set_phase(&mut self, el: ElementId, phase: Phase, on: bool);

    fn set_plain_text(&mut self, el: ElementId, text: &str);

    /// Replace the element's content with a styled glyph row. `color`
    /// applies to the scrambled glyphs only.
    fn set_reveal_text(&mut self, el: ElementId, glyphs: &[RevealGlyph], color: Option<&str>);

    /// Move and tilt an element (parallax targets).
    fn set_translate(&mut self, el: ElementId, dx: f64, dy: f64, rotate_deg: f64);

    /// Render the carousel track and dots from a view snapshot.
    fn set_carousel(&mut self, el: ElementId, view: &CarouselView);

    /// Render the live ripples of one button.
    fn set_ripples(&mut self, el: ElementId, ripples: &[Ripple], now: Instant);

    /// Render the live grid pulses of the overlay.
    fn set_grid_pulses(&mut self, el: ElementId, pulses: &[GridPulse], now: Instant);

    /// The element's drawing surface, if it has one.
    fn surface(&mut self, el: ElementId) -> Option<&mut dyn StrokeSurface>;
}
