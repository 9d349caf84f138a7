//! A search engine for voice-led chord transitions on fretted string instruments.
//!
//! Given a starting chord (as sounding pitches), a target chord (as a root plus intervals) and
//! an [`Instrument`](fretboard::Instrument), a [`Search`] finds **every** way of fingering the
//! target chord such that:
//! - each starting voice moves to some sounded note by an acceptable voice leading,
//! - every required note of the target chord is sounded,
//! - the fingering is physically playable: at most one note per string, all fretted notes
//!   within a maximum hand stretch and inside a configured fret range.
//!
//! The fingerings found are grouped by the pitches they sound into [`VoicingSet`]s, so callers
//! can e.g. display each musical voicing once, together with all the places it can be played.
//! The search is exhaustive within its constraints; pruning keeps it fast, and a configurable
//! timeout aborts it cleanly (all-or-nothing) if it isn't fast enough.
//!
//! This crate is purely computational: it does no I/O and produces no sound.
//!
//! # Example
//!
//! ```
//! use fretboard::{Instrument, Interval, PitchClass};
//! use voicelead::{Config, Search, TargetInterval};
//!
//! # fn main() -> Result<(), voicelead::Error> {
//! // Move a lone E4 to an F# root on a standard 21-fret guitar
//! let config = Config::new(
//!     vec!["E4".parse().unwrap()],
//!     Instrument::standard_guitar(21),
//!     PitchClass::F_SHARP,
//!     vec![TargetInterval::required(Interval::ROOT)],
//! );
//! let sets = Search::new(config)?.run()?;
//!
//! // Only F#4 is close enough for acceptable voice leading, but it can be played in 6 ways
//! assert_eq!(sets.len(), 1);
//! assert_eq!(sets[0].num_unique_notes(), 1);
//! assert_eq!(sets[0].pitches()[0].to_string(), "F#4");
//! assert_eq!(sets[0].fingerings().len(), 6);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

mod config;
mod error;
mod leading;
mod search;
mod utils;
mod voicing;

pub use config::{Config, TargetInterval};
pub use error::{Error, Result};
pub use search::Search;
pub use voicing::{Fingering, VoicingSet};
