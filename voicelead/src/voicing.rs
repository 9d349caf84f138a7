//! Search results: individual [`Fingering`]s and the [`VoicingSet`]s which group them.

use std::collections::BTreeMap;

use fretboard::{FrettedNote, Pitch};
use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

/// One way of playing the target chord: a set of [`FrettedNote`]s, at most one per string.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Fingering {
    notes: Vec<FrettedNote>,
}

impl Fingering {
    pub(crate) fn new(notes: Vec<FrettedNote>) -> Self {
        Fingering { notes }
    }

    /// The notes of this fingering, ordered by the string they're played on (in tuning order).
    pub fn notes(&self) -> &[FrettedNote] {
        &self.notes
    }

    /// The distinct pitches this fingering sounds, lowest first.  Two strings fretted to the
    /// same pitch contribute one entry.
    pub fn sounded_pitches(&self) -> Vec<Pitch> {
        self.notes
            .iter()
            .map(|note| note.pitch())
            .sorted()
            .dedup()
            .collect_vec()
    }

    /// The distance in frets between this fingering's lowest and highest fretted notes.  Open
    /// strings need no finger, so they never widen the span; a fingering of only open strings
    /// has span `0`.
    pub fn fret_span(&self) -> u8 {
        let fretted = self.notes.iter().map(|note| note.fret()).filter(|&f| f != 0);
        match fretted.minmax() {
            MinMaxResult::NoElements => 0,
            MinMaxResult::OneElement(_) => 0,
            MinMaxResult::MinMax(min, max) => max - min,
        }
    }

    /// The lowest non-open fret used, or 0 for an all-open fingering.  Used to order the
    /// members of a [`VoicingSet`] along the neck.
    pub(crate) fn lowest_fretted_fret(&self) -> u8 {
        self.notes
            .iter()
            .map(|note| note.fret())
            .filter(|&f| f != 0)
            .min()
            .unwrap_or(0)
    }
}

/// All the [`Fingering`]s which sound one particular set of pitches, i.e. one *voicing* of the
/// target chord.
///
/// Two fingerings land in the same `VoicingSet` exactly when their
/// [`sounded_pitches`](Fingering::sounded_pitches) are equal; where on the neck those pitches
/// are played doesn't matter.  Members are ordered by their lowest fretted fret, so sets read
/// from the nut upwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VoicingSet {
    pitches: Vec<Pitch>,
    fingerings: Vec<Fingering>,
    average_distance: OrderedFloat<f64>,
}

impl VoicingSet {
    /// Every fingering which sounds this voicing, ordered along the neck.
    pub fn fingerings(&self) -> &[Fingering] {
        &self.fingerings
    }

    /// The distinct pitches of this voicing, lowest first.
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn num_unique_notes(&self) -> usize {
        self.pitches.len()
    }

    pub fn lowest_note(&self) -> Pitch {
        self.pitches[0]
    }

    pub fn highest_note(&self) -> Pitch {
        self.pitches[self.pitches.len() - 1]
    }

    /// How far, on average, this voicing sits from the start chord (in semitones).  Lower
    /// values mean smoother voice leading; useful for ranking sets before display.
    pub fn average_leading_distance(&self) -> f64 {
        self.average_distance.into_inner()
    }
}

/// Groups `fingerings` into [`VoicingSet`]s, ordering each set's members along the neck.
///
/// The map is keyed by the sounded pitches themselves, so set identity can never be broken by
/// e.g. two pitch names formatting identically.  `BTreeMap` also gives the sets a stable order
/// (lexicographic by pitch, i.e. lowest voicings first).
pub(crate) fn group(fingerings: Vec<Fingering>, start_chord: &[Pitch]) -> Vec<VoicingSet> {
    let mut groups = BTreeMap::<Vec<Pitch>, Vec<Fingering>>::new();
    for fingering in fingerings {
        groups
            .entry(fingering.sounded_pitches())
            .or_default()
            .push(fingering);
    }
    groups
        .into_iter()
        .map(|(pitches, mut fingerings)| {
            fingerings.sort_by_key(Fingering::lowest_fretted_fret);
            let average_distance = average_leading_distance(start_chord, &pitches);
            VoicingSet {
                pitches,
                fingerings,
                average_distance: OrderedFloat(average_distance),
            }
        })
        .collect_vec()
}

/// The symmetric average nearest-neighbour distance between the start chord and a voicing:
/// every distinct pitch on each side is matched to its nearest pitch on the other side, and
/// the distances are averaged over all matches.
fn average_leading_distance(start_chord: &[Pitch], voicing: &[Pitch]) -> f64 {
    let start = start_chord.iter().copied().sorted().dedup().collect_vec();
    // `voicing` is already sorted + deduped by construction
    let sum_nearest = |from: &[Pitch], to: &[Pitch]| -> i16 {
        from.iter()
            .map(|p| {
                // Unwrap is safe because both sides are non-empty
                to.iter().map(|q| (p.value() - q.value()).abs()).min().unwrap()
            })
            .sum()
    };
    let total = sum_nearest(&start, voicing) + sum_nearest(voicing, &start);
    total as f64 / (start.len() + voicing.len()) as f64
}

#[cfg(test)]
mod tests {
    use fretboard::{FrettedNote, Instrument, Pitch, PitchClass};
    use itertools::Itertools;

    use super::{group, Fingering};

    fn pitch(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    /// Builds the note at `fret` on the string tuned to `open`, through the real fretboard
    /// mapping.
    fn note(instrument: &Instrument, open: &str, fret: u8) -> FrettedNote {
        let open = pitch(open);
        let class = PitchClass::new(((open.class().index() + fret as usize) % 12) as u8);
        instrument
            .notes_on_string(open, class)
            .find(|n| n.fret() == fret)
            .unwrap()
    }

    #[test]
    fn fret_span_ignores_open_strings() {
        let guitar = Instrument::standard_guitar(21);
        let all_open = Fingering::new(vec![note(&guitar, "E4", 0), note(&guitar, "B3", 0)]);
        assert_eq!(all_open.fret_span(), 0);

        let one_fretted = Fingering::new(vec![note(&guitar, "E4", 0), note(&guitar, "B3", 5)]);
        assert_eq!(one_fretted.fret_span(), 0);

        let spread = Fingering::new(vec![
            note(&guitar, "E4", 0),
            note(&guitar, "B3", 5),
            note(&guitar, "G3", 9),
        ]);
        assert_eq!(spread.fret_span(), 4);
    }

    #[test]
    fn grouping_is_by_sounded_pitches() {
        let guitar = Instrument::standard_guitar(21);
        // E4 at three places on the neck, plus one genuinely different voicing
        let e4_open = Fingering::new(vec![note(&guitar, "E4", 0)]);
        let e4_on_b = Fingering::new(vec![note(&guitar, "B3", 5)]);
        let e4_on_g = Fingering::new(vec![note(&guitar, "G3", 9)]);
        let b4_on_e = Fingering::new(vec![note(&guitar, "E4", 7)]);

        let sets = group(
            vec![e4_on_g.clone(), b4_on_e.clone(), e4_open.clone(), e4_on_b.clone()],
            &[pitch("E4")],
        );
        assert_eq!(sets.len(), 2);

        // BTreeMap ordering puts the E4 voicing before B4
        let e4_set = &sets[0];
        assert_eq!(e4_set.pitches(), &[pitch("E4")]);
        // Members run up the neck, with the all-open fingering first
        assert_eq!(e4_set.fingerings(), &[e4_open, e4_on_b, e4_on_g]);

        let b4_set = &sets[1];
        assert_eq!(b4_set.pitches(), &[pitch("B4")]);
        assert_eq!(b4_set.fingerings(), &[b4_on_e]);
    }

    #[test]
    fn doubled_strings_sound_one_pitch() {
        let guitar = Instrument::standard_guitar(21);
        // E4 open and E4 fretted on the B string are the same voicing as E4 alone
        let doubled = Fingering::new(vec![note(&guitar, "E4", 0), note(&guitar, "B3", 5)]);
        assert_eq!(doubled.sounded_pitches(), vec![pitch("E4")]);

        let single = Fingering::new(vec![note(&guitar, "E4", 0)]);
        let sets = group(vec![doubled, single], &[pitch("E4")]);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].fingerings().len(), 2);
    }

    #[test]
    fn average_distance_worked_example() {
        let guitar = Instrument::standard_guitar(21);
        // Start {D4}, voicing {C4, E4}: D4's nearest neighbour is 2 semitones away (either
        // side), and C4/E4 are each 2 from D4.  Total 6 over 3 pitches = 2.0.
        let fingering = Fingering::new(vec![note(&guitar, "B3", 1), note(&guitar, "E4", 0)]);
        let sets = group(vec![fingering], &[pitch("D4")]);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].average_leading_distance(), 2.0);
    }

    #[test]
    fn regrouping_is_idempotent() {
        let guitar = Instrument::standard_guitar(21);
        let fingerings = vec![
            Fingering::new(vec![note(&guitar, "E4", 0)]),
            Fingering::new(vec![note(&guitar, "B3", 5)]),
            Fingering::new(vec![note(&guitar, "E4", 7)]),
        ];
        let start = [pitch("E4")];
        let once = group(fingerings, &start);
        let again = group(
            once.iter().flat_map(|set| set.fingerings().to_vec()).collect_vec(),
            &start,
        );
        assert_eq!(once, again);
    }
}
