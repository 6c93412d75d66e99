#![forbid(unsafe_code)]

//! Page widget controllers for FlashFX.
//!
//! Each widget is one encapsulated controller per instance: it owns its own
//! timer state, `start`/`stop`/`reset` are idempotent, and restarting always
//! cancels before it starts. Rendering is driven from structured view-models
//! (plain records), never from markup strings.

pub mod hero;
pub mod reviews;
pub mod ripple;
pub mod scroll;

pub use hero::{HeroSlide, HeroSlider};
pub use reviews::{CarouselView, Review, ReviewCarousel, stock_reviews};
pub use ripple::{Ripple, RippleField};
pub use scroll::{BackToTop, Parallax, RevealOnScroll};
