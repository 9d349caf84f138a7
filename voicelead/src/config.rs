//! Configuration for a voice-leading search.

use std::time::Duration;

use fretboard::{Instrument, Interval, Pitch, PitchClass};
use itertools::Itertools;

use crate::{Error, Result};

/// One interval of the target chord, tagged with whether fingerings may omit it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TargetInterval {
    pub interval: Interval,
    pub optional: bool,
}

impl TargetInterval {
    /// An interval which every accepted fingering must sound.
    pub fn required(interval: Interval) -> Self {
        TargetInterval {
            interval,
            optional: false,
        }
    }

    /// An interval which fingerings may sound or omit freely.
    pub fn optional(interval: Interval) -> Self {
        TargetInterval {
            interval,
            optional: true,
        }
    }
}

/// Fully describes one voice-leading search: the chord transition wanted, the instrument to
/// play it on, and the physical/stylistic limits on the results.
///
/// Every field is public; [`Config::new`] fills the non-essential ones with sensible defaults
/// so callers only override what they care about.  A `Config` is never modified by a search, so
/// one `Config` can drive any number of (possibly concurrent) searches.
#[derive(Debug, Clone)]
pub struct Config {
    /// The chord the voices start from
    pub start_chord: Vec<Pitch>,
    /// The instrument the target chord will be played on
    pub instrument: Instrument,
    /// Root pitch class of the target chord
    pub target_root: PitchClass,
    /// Interval structure of the target chord
    pub target_intervals: Vec<TargetInterval>,
    /// The furthest any single voice may move, except as allowed by the travel flags below.
    /// Defaults to a major second
    pub max_leading_distance: Interval,
    /// The widest allowed span between the lowest and highest *fretted* (non-open) note of a
    /// fingering.  Defaults to `4`
    pub max_fret_span: u8,
    /// The lowest fret a fingering may use, open strings exempt (but see
    /// [`filter_open_notes`](Self::filter_open_notes)).  Defaults to `0`
    pub min_fret: u8,
    /// The highest fret a fingering may use.  Defaults to the whole neck
    pub max_fret: u8,
    /// If set, the highest note of every fingering must have this pitch class, and candidates
    /// of this class are exempt from the distance rule when leaving the highest starting voice
    pub required_highest: Option<PitchClass>,
    /// If set, the lowest note of every fingering must have this pitch class, with the
    /// symmetric exemption for the lowest starting voice
    pub required_lowest: Option<PitchClass>,
    /// Lets the highest starting voice leap upwards freely (e.g. to follow a melody).  It may
    /// still not fall further than the leading distance below the second-highest voice
    pub highest_can_travel: bool,
    /// Lets the lowest starting voice leap downwards freely, bounded above relative to the
    /// second-lowest voice
    pub lowest_can_travel: bool,
    /// Excludes open strings from fingerings whenever `min_fret > 0`.  Without this, open
    /// strings always pass the fret-range floor
    pub filter_open_notes: bool,
    /// How long a search may run before giving up with [`Error::Timeout`].  Defaults to 5
    /// seconds
    pub timeout: Duration,
}

impl Config {
    /// Creates a `Config` describing a transition from `start_chord` to the chord of
    /// `target_root` + `target_intervals`, played on `instrument`, with every other limit set
    /// to its default.
    pub fn new(
        start_chord: Vec<Pitch>,
        instrument: Instrument,
        target_root: PitchClass,
        target_intervals: Vec<TargetInterval>,
    ) -> Self {
        let max_fret = instrument.fret_count();
        Config {
            start_chord,
            instrument,
            target_root,
            target_intervals,
            max_leading_distance: Interval::SECOND,
            max_fret_span: 4,
            min_fret: 0,
            max_fret,
            required_highest: None,
            required_lowest: None,
            highest_can_travel: false,
            lowest_can_travel: false,
            filter_open_notes: false,
            timeout: Duration::from_secs(5),
        }
    }

    /// Checks every structural requirement on this `Config`, returning the first violation
    /// found.  [`Search::new`](crate::Search::new) runs this before doing anything else, so a
    /// search can never observe an invalid `Config`.
    pub fn validate(&self) -> Result<()> {
        if self.start_chord.is_empty() {
            return Err(Error::EmptyStartChord);
        }
        if self.instrument.num_strings() == 0 {
            return Err(Error::EmptyTuning);
        }
        let fret_count = self.instrument.fret_count();
        if fret_count == 0 {
            return Err(Error::NoFrets);
        }
        if let Some(&pitch) = self.instrument.tuning().iter().duplicates().next() {
            return Err(Error::DuplicateTuningPitch(pitch));
        }
        if self.target_intervals.is_empty() {
            return Err(Error::NoTargetIntervals);
        }
        if let Some(interval) = self
            .target_intervals
            .iter()
            .map(|target| target.interval)
            .duplicates()
            .next()
        {
            return Err(Error::DuplicateTargetInterval(interval));
        }
        if self.max_fret_span > fret_count {
            return Err(Error::SpanBeyondNeck {
                max_fret_span: self.max_fret_span,
                fret_count,
            });
        }
        if self.min_fret > self.max_fret {
            return Err(Error::InvertedFretRange {
                min_fret: self.min_fret,
                max_fret: self.max_fret,
            });
        }
        if self.max_fret > fret_count {
            return Err(Error::FretRangeBeyondNeck {
                max_fret: self.max_fret,
                fret_count,
            });
        }
        if self.max_leading_distance > Interval::THIRD {
            return Err(Error::LeadingDistanceTooFar(self.max_leading_distance));
        }
        if self.timeout.is_zero() {
            return Err(Error::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fretboard::{Instrument, Interval, PitchClass};

    use super::{Config, TargetInterval};
    use crate::Error;

    fn base() -> Config {
        Config::new(
            vec!["C4".parse().unwrap(), "E4".parse().unwrap()],
            Instrument::standard_guitar(21),
            PitchClass::G,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::optional(Interval::FIFTH),
            ],
        )
    }

    #[track_caller]
    fn check_err(config: Config, expected: Error) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(base().validate(), Ok(()));
    }

    #[test]
    fn empty_start_chord() {
        let mut config = base();
        config.start_chord.clear();
        check_err(config, Error::EmptyStartChord);
    }

    #[test]
    fn empty_tuning() {
        let mut config = base();
        config.instrument = Instrument::new(vec![], 21);
        check_err(config, Error::EmptyTuning);
    }

    #[test]
    fn no_frets() {
        let mut config = base();
        config.instrument = Instrument::standard_guitar(0);
        check_err(config, Error::NoFrets);
    }

    #[test]
    fn duplicate_tuning_pitch() {
        let mut config = base();
        let e4 = "E4".parse().unwrap();
        let a2 = "A2".parse().unwrap();
        config.instrument = Instrument::new(vec![e4, a2, e4], 21);
        check_err(config, Error::DuplicateTuningPitch(e4));
    }

    #[test]
    fn no_target_intervals() {
        let mut config = base();
        config.target_intervals.clear();
        check_err(config, Error::NoTargetIntervals);
    }

    #[test]
    fn duplicate_target_interval() {
        let mut config = base();
        // Optionality doesn't matter; the interval itself is duplicated
        config
            .target_intervals
            .push(TargetInterval::optional(Interval::ROOT));
        check_err(config, Error::DuplicateTargetInterval(Interval::ROOT));
    }

    #[test]
    fn span_beyond_neck() {
        let mut config = base();
        config.max_fret_span = 22;
        check_err(
            config,
            Error::SpanBeyondNeck {
                max_fret_span: 22,
                fret_count: 21,
            },
        );
    }

    #[test]
    fn inverted_fret_range() {
        let mut config = base();
        config.min_fret = 7;
        config.max_fret = 3;
        check_err(
            config,
            Error::InvertedFretRange {
                min_fret: 7,
                max_fret: 3,
            },
        );
    }

    #[test]
    fn fret_range_beyond_neck() {
        let mut config = base();
        config.max_fret = 25;
        check_err(
            config,
            Error::FretRangeBeyondNeck {
                max_fret: 25,
                fret_count: 21,
            },
        );
    }

    #[test]
    fn leading_distance_too_far() {
        let mut config = base();
        config.max_leading_distance = Interval::FOURTH;
        check_err(config, Error::LeadingDistanceTooFar(Interval::FOURTH));
    }

    #[test]
    fn major_third_distance_is_allowed() {
        let mut config = base();
        config.max_leading_distance = Interval::THIRD;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_timeout() {
        let mut config = base();
        config.timeout = Duration::ZERO;
        check_err(config, Error::ZeroTimeout);
    }
}
