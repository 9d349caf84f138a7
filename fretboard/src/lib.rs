//! Idiomatic Rust primitives for pitches and fretted string instruments.

#![deny(clippy::all)]

pub mod chord;
mod fretted;
mod instrument;
mod interval;
mod pitch;
mod pitch_class;

// Re-export useful data types into the top level of the crate
pub use fretted::FrettedNote;
pub use instrument::Instrument;
pub use interval::Interval;
pub use pitch::{ParsePitchError, Pitch};
pub use pitch_class::PitchClass;
