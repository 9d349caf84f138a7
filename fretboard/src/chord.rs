//! Resolution of a chord's interval structure into concrete pitch classes.

use crate::{Interval, PitchClass};

/// Returns the [`PitchClass`]es obtained by stacking each of `intervals` on top of `root`,
/// index-aligned with `intervals`.  Duplicate intervals produce duplicate output classes; it is
/// the caller's job to reject duplicates if it doesn't want them.
///
/// # Panics
///
/// Panics if `intervals` is empty — a chord must contain at least one note.
///
/// # Example
/// ```
/// use fretboard::{chord, Interval, PitchClass};
///
/// // An A major triad contains A, C# and E
/// assert_eq!(
///     chord::pitch_classes(
///         PitchClass::A,
///         &[Interval::ROOT, Interval::THIRD, Interval::FIFTH],
///     ),
///     vec![PitchClass::A, PitchClass::C_SHARP, PitchClass::E],
/// );
/// ```
#[track_caller]
pub fn pitch_classes(root: PitchClass, intervals: &[Interval]) -> Vec<PitchClass> {
    assert!(
        !intervals.is_empty(),
        "a chord must contain at least one interval"
    );
    intervals
        .iter()
        .map(|&interval| root.transpose(interval))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::pitch_classes;
    use crate::{Interval, PitchClass};

    #[test]
    fn aligned_with_intervals() {
        // E minor 7: E, G, B, D
        let intervals = [
            Interval::ROOT,
            Interval::FLAT_THIRD,
            Interval::FIFTH,
            Interval::FLAT_SEVENTH,
        ];
        let classes = pitch_classes(PitchClass::E, &intervals);
        assert_eq!(classes.len(), intervals.len());
        assert_eq!(
            classes,
            [PitchClass::E, PitchClass::G, PitchClass::B, PitchClass::D]
        );
    }

    #[test]
    fn wraps_past_b() {
        assert_eq!(
            pitch_classes(PitchClass::G, &[Interval::FIFTH]),
            [PitchClass::D]
        );
    }

    #[test]
    fn duplicate_intervals_allowed_here() {
        // Rejecting duplicates is the job of config validation, not the resolver
        assert_eq!(
            pitch_classes(PitchClass::C, &[Interval::ROOT, Interval::ROOT]),
            [PitchClass::C, PitchClass::C]
        );
    }

    #[test]
    #[should_panic]
    fn empty_chord() {
        pitch_classes(PitchClass::C, &[]);
    }
}
