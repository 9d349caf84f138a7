//! Error types for the different ways that a search can fail.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use fretboard::{Interval, Pitch};

/// Alias for `Result<T, voicelead::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The different ways that a search can fail.  Everything except [`Error::Timeout`] is a
/// structural problem with the [`Config`](crate::Config), reported by
/// [`Search::new`](crate::Search::new) before any search work starts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /* CONFIG VALIDATION ERRORS */
    /// The start chord has no notes
    EmptyStartChord,
    /// The instrument has no strings
    EmptyTuning,
    /// The instrument has no frets
    NoFrets,
    /// Two of the instrument's strings share an open-string pitch
    DuplicateTuningPitch(Pitch),
    /// The target chord has no intervals
    NoTargetIntervals,
    /// The same interval appears twice in the target chord
    DuplicateTargetInterval(Interval),
    /// The allowed fret span reaches beyond the end of the neck
    SpanBeyondNeck { max_fret_span: u8, fret_count: u8 },
    /// The fret range is inverted (`min_fret > max_fret`)
    InvertedFretRange { min_fret: u8, max_fret: u8 },
    /// The fret range reaches beyond the end of the neck
    FretRangeBeyondNeck { max_fret: u8, fret_count: u8 },
    /// The maximum voice-leading distance is more than a major third
    LeadingDistanceTooFar(Interval),
    /// The timeout is zero, which would always cancel the search before it starts
    ZeroTimeout,

    /* SEARCH ERRORS */
    /// The search didn't finish within the configured timeout.  No partial results are
    /// produced; the caller should retry with a larger budget or narrower constraints
    Timeout(Duration),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            /* CONFIG VALIDATION ERRORS */
            Error::EmptyStartChord => write!(f, "Can't lead voices out of an empty start chord"),
            Error::EmptyTuning => write!(f, "The instrument needs at least one string"),
            Error::NoFrets => write!(f, "The instrument needs at least one fret"),
            Error::DuplicateTuningPitch(pitch) => {
                write!(f, "Two open strings are both tuned to {}", pitch)
            }
            Error::NoTargetIntervals => {
                write!(f, "Can't search for a target chord with no intervals")
            }
            Error::DuplicateTargetInterval(interval) => {
                write!(f, "{:?} appears twice in the target chord", interval)
            }
            Error::SpanBeyondNeck {
                max_fret_span,
                fret_count,
            } => write!(
                f,
                "A fret span of {} can't fit on a neck with {} frets",
                max_fret_span, fret_count
            ),
            Error::InvertedFretRange { min_fret, max_fret } => write!(
                f,
                "The fret range {}..={} contains no frets",
                min_fret, max_fret
            ),
            Error::FretRangeBeyondNeck {
                max_fret,
                fret_count,
            } => write!(
                f,
                "The fret range ends at fret {}, but the neck only has {} frets",
                max_fret, fret_count
            ),
            Error::LeadingDistanceTooFar(distance) => write!(
                f,
                "A voice-leading distance of {:?} is too far; the limit is a major third",
                distance
            ),
            Error::ZeroTimeout => write!(
                f,
                "A zero timeout would always cancel the search before it starts"
            ),

            /* SEARCH ERRORS */
            Error::Timeout(limit) => {
                write!(f, "Search didn't finish within its {:?} timeout", limit)
            }
        }
    }
}

impl std::error::Error for Error {}
