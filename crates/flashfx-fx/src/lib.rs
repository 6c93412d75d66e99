#![forbid(unsafe_code)]

//! Procedural animation engines for FlashFX.
//!
//! The algorithmic core of the page: a hash-based value-noise field with an
//! octave compositor, a rounded-rectangle perimeter parameterizer, the
//! noise-jittered electric border loop, the scramble ("hacker text") reveal
//! engine, a typewriter effect, and the synaptic grid pulse field.
//!
//! All engines are single-threaded and frame-driven: they never block, they
//! yield by asking the host [`Scheduler`](flashfx_core::Scheduler) for the
//! next paintable moment, and each instance owns its state outright.

pub mod border;
pub mod grid_pulse;
pub mod noise;
pub mod scramble;
pub mod shape;
pub mod typewriter;

pub use border::{BorderParams, ElectricBorder};
pub use grid_pulse::{GridPulse, GridPulseField};
pub use noise::{OctaveParams, fractal_noise, lattice_hash, value_noise};
pub use scramble::{RevealGlyph, RevealTick, ScrambleReveal};
pub use shape::RoundedRect;
pub use typewriter::Typewriter;
