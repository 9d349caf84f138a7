//! Voice-leading admissibility, pre-computed from a [`Config`].

use fretboard::{Pitch, PitchClass};
use itertools::Itertools;

use crate::Config;

/// The voice-leading rules of one search, with every bound resolved to a concrete pitch value.
///
/// Building this once up-front means the hot [`admits`](Self::admits) check is a handful of
/// integer comparisons, with no re-derivation of sorted start voices inside the search loop.
#[derive(Debug, Clone)]
pub(crate) struct Leading {
    /// Furthest a voice may move under the default rule, in semitones
    max_distance: i16,
    /// Highest and lowest voices of the start chord (by pitch value)
    highest: Pitch,
    lowest: Pitch,
    highest_can_travel: bool,
    lowest_can_travel: bool,
    required_highest: Option<PitchClass>,
    required_lowest: Option<PitchClass>,
    /// Lowest value a travelling/exempt highest voice may land on.  A travelling highest voice
    /// may go as far *up* as it likes, but must not fall below the second-highest voice by
    /// more than the leading distance
    travel_floor: i16,
    /// Highest value a travelling/exempt lowest voice may land on, mirroring `travel_floor`
    travel_ceiling: i16,
}

impl Leading {
    /// Derives the leading rules from `config`.  Assumes `config` has already passed
    /// [`Config::validate`], so the start chord and tuning are non-empty.
    pub(crate) fn new(config: &Config) -> Self {
        // Distinct start voices, highest first.  `Itertools::dedup` only removes *consecutive*
        // repeats, so sort before deduping (descending, since we want the top two).
        let distinct_voices = config
            .start_chord
            .iter()
            .copied()
            .sorted_by(|a, b| b.cmp(a))
            .dedup()
            .collect_vec();
        let highest = distinct_voices[0];
        let lowest = distinct_voices[distinct_voices.len() - 1];
        let max_distance = config.max_leading_distance.semitones() as i16;

        // With only one distinct voice there is no second voice to measure from, so the bounds
        // fall back to the extreme open-string values.
        let travel_floor = distinct_voices
            .get(1)
            .map(|second_highest| second_highest.value() - max_distance)
            .unwrap_or_else(|| {
                // Unwrap is safe because `validate` rejects empty tunings
                config.instrument.tuning().iter().map(|p| p.value()).min().unwrap()
            });
        let travel_ceiling = distinct_voices
            .iter()
            .rev()
            .nth(1)
            .map(|second_lowest| second_lowest.value() + max_distance)
            .unwrap_or_else(|| {
                // As above
                config.instrument.tuning().iter().map(|p| p.value()).max().unwrap()
            });

        Leading {
            max_distance,
            highest,
            lowest,
            highest_can_travel: config.highest_can_travel,
            lowest_can_travel: config.lowest_can_travel,
            required_highest: config.required_highest,
            required_lowest: config.required_lowest,
            travel_floor,
            travel_ceiling,
        }
    }

    /// Does the voice leading from `start` (a voice of the start chord) to `end` obey this
    /// search's rules?
    ///
    /// The relaxed rules for the extreme voices take precedence over the default distance rule,
    /// and the travel flags take precedence over the required-class exemptions.  A required
    /// extreme class only relaxes the bound when `end` actually has that class; otherwise the
    /// voice falls back to the default rule.
    pub(crate) fn admits(&self, start: Pitch, end: Pitch) -> bool {
        if self.highest_can_travel && start == self.highest {
            return end.value() >= self.travel_floor;
        }
        if let Some(class) = self.required_highest {
            if start == self.highest && end.class() == class {
                return end.value() >= self.travel_floor;
            }
        }
        if self.lowest_can_travel && start == self.lowest {
            return end.value() <= self.travel_ceiling;
        }
        if let Some(class) = self.required_lowest {
            if start == self.lowest && end.class() == class {
                return end.value() <= self.travel_ceiling;
            }
        }
        self.within_distance(start, end)
    }

    fn within_distance(&self, start: Pitch, end: Pitch) -> bool {
        (end.value() - start.value()).abs() <= self.max_distance
    }
}
