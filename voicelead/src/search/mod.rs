//! The search itself: validation and candidate generation here, exhaustive enumeration in
//! `dfs`.

use std::time::Instant;

use bit_vec::BitVec;
use fretboard::{chord, FrettedNote, Pitch};
use itertools::Itertools;
use voicelead_utils::BigNumInt;

use crate::{leading::Leading, utils::Deadline, voicing, Config, VoicingSet};

mod dfs;

index_vec::define_index_type! { pub(crate) struct StringIdx = usize; }
pub(crate) type StringVec<T> = index_vec::IndexVec<StringIdx, T>;

/// A fully-validated, ready-to-run voice-leading search.
///
/// Constructing a `Search` does the up-front work (checking the [`Config`] and computing the
/// candidate notes on every string); [`run`](Self::run) does the exhaustive enumeration.  A
/// `Search` is never mutated by running it, so one `Search` can be run any number of times.
#[derive(Debug)]
pub struct Search {
    config: Config,
    leading: Leading,
    /// One bit per pitch class; a set bit means every fingering must sound that class
    required_classes: BitVec,
    num_required_classes: usize,
    /// The candidate notes on each playable string, fewest candidates first.  Strings with no
    /// candidates can only ever be silent, so they aren't stored at all
    candidates: Vec<StringCandidates>,
}

/// The candidate notes on one string.
#[derive(Debug, Clone)]
struct StringCandidates {
    string: StringIdx,
    notes: Vec<FrettedNote>,
}

impl Search {
    /// Checks `config` and pre-computes everything needed to [`run`](Self::run) it: the
    /// voice-leading rules, the required pitch classes and the per-string candidate notes.
    pub fn new(config: Config) -> crate::Result<Self> {
        config.validate()?;
        let start = Instant::now();
        log::debug!("Building voice-leading search:");

        let leading = Leading::new(&config);

        // Resolve the target chord to pitch classes.  Distinct intervals resolve to distinct
        // classes, so the `zip_eq` below can't conflate two targets.
        let intervals = config
            .target_intervals
            .iter()
            .map(|target| target.interval)
            .collect_vec();
        let target_classes = chord::pitch_classes(config.target_root, &intervals);
        let mut required_classes = BitVec::from_elem(12, false); // One bit per pitch class
        for (class, target) in target_classes.iter().zip_eq(&config.target_intervals) {
            if !target.optional {
                required_classes.set(class.index(), true);
            }
        }
        let num_required_classes = required_classes.iter().filter(|&b| b).count();

        // A candidate is any place on the neck which sounds a target class, lies within the
        // fret range, and is an acceptable voice leading from at least one starting voice.
        let tuning: StringVec<Pitch> = config.instrument.tuning().iter().copied().collect();
        let mut candidates = Vec::new();
        for (string, &open_string) in tuning.iter_enumerated() {
            let notes = target_classes
                .iter()
                .flat_map(|&class| config.instrument.notes_on_string(open_string, class))
                .filter(|note| fret_allowed(&config, note.fret()))
                .filter(|note| {
                    config
                        .start_chord
                        .iter()
                        .any(|&voice| leading.admits(voice, note.pitch()))
                })
                .collect_vec();
            if !notes.is_empty() {
                candidates.push(StringCandidates { string, notes });
            }
        }
        // Strings with the fewest candidates go first, so that pruning bites as early in the
        // search as possible
        candidates.sort_by_key(|c| (c.notes.len(), c.string));

        log::debug!(
            "  {} candidate notes on {}/{} strings in {:.2?}",
            candidates.iter().map(|c| c.notes.len()).sum::<usize>(),
            candidates.len(),
            tuning.len(),
            start.elapsed()
        );

        Ok(Search {
            config,
            leading,
            required_classes,
            num_required_classes,
            candidates,
        })
    }

    /// Runs the search, returning every acceptable fingering grouped into [`VoicingSet`]s.
    ///
    /// Searches are all-or-nothing: if the timeout expires mid-search, the whole search fails
    /// with [`Error::Timeout`](crate::Error::Timeout) rather than returning whatever happened
    /// to be found before time ran out.
    pub fn run(&self) -> crate::Result<Vec<VoicingSet>> {
        let start = Instant::now();
        let deadline = Deadline::after(self.config.timeout);
        let (fingerings, steps) = dfs::enumerate(self, deadline)?;
        let num_fingerings = fingerings.len();
        let sets = voicing::group(fingerings, &self.config.start_chord);
        log::info!(
            "Found {} fingerings in {} voicings ({} note placements tried) in {:.2?}",
            num_fingerings,
            sets.len(),
            BigNumInt(steps),
            start.elapsed()
        );
        Ok(sets)
    }

    /// The [`Config`] this `Search` was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Is a note at `fret` within the configured fret range?  Open strings pass the lower bound,
/// unless they are explicitly filtered out.
fn fret_allowed(config: &Config, fret: u8) -> bool {
    if fret == 0 {
        !(config.filter_open_notes && config.min_fret > 0)
    } else {
        (config.min_fret..=config.max_fret).contains(&fret)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, time::Duration};

    use fretboard::{Instrument, Interval, Pitch, PitchClass};
    use itertools::Itertools;

    use super::Search;
    use crate::{leading::Leading, Config, Error, TargetInterval, VoicingSet};

    fn pitch(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    /// Asserts that `sets` contains exactly the fingerings given as `(open string, fret)`
    /// pairs, in any order.
    #[track_caller]
    fn assert_fingerings(sets: &[VoicingSet], expected: &[&[(&str, u8)]]) {
        let found: HashSet<Vec<(Pitch, u8)>> = sets
            .iter()
            .flat_map(VoicingSet::fingerings)
            .map(|fingering| {
                fingering
                    .notes()
                    .iter()
                    .map(|note| (note.open_string(), note.fret()))
                    .collect()
            })
            .collect();
        let expected: HashSet<Vec<(Pitch, u8)>> = expected
            .iter()
            .map(|notes| {
                notes
                    .iter()
                    .map(|&(open_string, fret)| (pitch(open_string), fret))
                    .collect()
            })
            .collect();
        assert_eq!(found, expected);
    }

    /// One raised voice: E4 moving to an F# root with no hand stretch allowed.  The only
    /// admissible pitch is F#4 (a whole tone up), and with a span of 0 no two of its five
    /// positions can be fretted together.
    #[test]
    fn one_note_no_stretch() {
        let mut config = Config::new(
            vec![pitch("E4")],
            Instrument::standard_guitar(24),
            PitchClass::F_SHARP,
            vec![TargetInterval::required(Interval::ROOT)],
        );
        config.max_fret_span = 0;
        let sets = Search::new(config).unwrap().run().unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].pitches(), &[pitch("F#4")]);
        assert_fingerings(
            &sets,
            &[
                &[("E4", 2)],
                &[("B3", 7)],
                &[("G3", 11)],
                &[("D3", 16)],
                &[("A2", 21)],
            ],
        );
    }

    /// The same search with the default 4-fret stretch also finds F#4 doubled at frets 7 & 11
    /// (the only pair of positions close enough to fret together).
    #[test]
    fn one_note_with_stretch() {
        let config = Config::new(
            vec![pitch("E4")],
            Instrument::standard_guitar(24),
            PitchClass::F_SHARP,
            vec![TargetInterval::required(Interval::ROOT)],
        );
        let sets = Search::new(config).unwrap().run().unwrap();

        assert_eq!(sets.len(), 1);
        assert_fingerings(
            &sets,
            &[
                &[("E4", 2)],
                &[("B3", 7)],
                &[("G3", 11)],
                &[("D3", 16)],
                &[("A2", 21)],
                &[("B3", 7), ("G3", 11)],
            ],
        );
    }

    /// A split voice: D4 resolving into both notes of a C/E dyad.  Checks the exact fingering
    /// list, including doubled unisons and span pruning.
    #[test]
    fn split_voice_two_classes() {
        let mut config = Config::new(
            vec![pitch("D4")],
            Instrument::standard_guitar(21),
            PitchClass::C,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::required(Interval::THIRD),
            ],
        );
        config.max_fret = 12;
        let sets = Search::new(config).unwrap().run().unwrap();

        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.pitches(), &[pitch("C4"), pitch("E4")]);
        assert_eq!(set.num_unique_notes(), 2);
        assert_eq!(set.lowest_note(), pitch("C4"));
        assert_eq!(set.highest_note(), pitch("E4"));
        assert_eq!(set.average_leading_distance(), 2.0);
        assert_fingerings(
            &sets,
            &[
                &[("E4", 0), ("B3", 1)],
                &[("E4", 0), ("G3", 5)],
                &[("E4", 0), ("D3", 10)],
                &[("B3", 5), ("G3", 5)],
                &[("G3", 9), ("D3", 10)],
                &[("E4", 0), ("B3", 1), ("G3", 5)],
                &[("E4", 0), ("B3", 5), ("G3", 5)],
                &[("E4", 0), ("G3", 9), ("D3", 10)],
            ],
        );
    }

    /// `min_fret` + `filter_open_notes` removes open strings from the candidate pool.
    #[test]
    fn filtered_open_notes() {
        let mut config = Config::new(
            vec![pitch("D4")],
            Instrument::standard_guitar(21),
            PitchClass::C,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::required(Interval::THIRD),
            ],
        );
        config.max_fret = 12;
        config.min_fret = 1;
        config.filter_open_notes = true;
        let sets = Search::new(config).unwrap().run().unwrap();

        assert_eq!(sets.len(), 1);
        assert_fingerings(&sets, &[&[("B3", 5), ("G3", 5)], &[("G3", 9), ("D3", 10)]]);
    }

    /// A travelling highest voice may leap any distance upwards and, with only one starting
    /// voice, downwards too (bounded only by the instrument's range).
    #[test]
    fn travelling_voice_spreads_over_octaves() {
        let mut config = Config::new(
            vec![pitch("E4")],
            Instrument::standard_guitar(21),
            PitchClass::F_SHARP,
            vec![TargetInterval::required(Interval::ROOT)],
        );
        config.highest_can_travel = true;
        config.max_fret_span = 0;
        config.max_fret = 12;
        let sets = Search::new(config).unwrap().run().unwrap();

        // Every F# in the first 12 frets is now admissible, so the voicings span 3 octaves.
        // Note the two-octave F#2+F#4 voicing: both of its notes sit at fret 2
        let pitches = sets.iter().map(|set| set.pitches().to_vec()).collect_vec();
        assert_eq!(
            pitches,
            vec![
                vec![pitch("F#2")],
                vec![pitch("F#2"), pitch("F#4")],
                vec![pitch("F#3")],
                vec![pitch("F#4")],
            ],
        );
        assert_fingerings(
            &sets,
            &[
                &[("E2", 2)],
                &[("E4", 2), ("E2", 2)],
                &[("D3", 4)],
                &[("A2", 9)],
                &[("E4", 2)],
                &[("B3", 7)],
                &[("G3", 11)],
            ],
        );
        // Smoother voicings sit closer to the start chord
        assert_eq!(sets[0].average_leading_distance(), 22.0);
        assert_eq!(sets[3].average_leading_distance(), 2.0);
    }

    /// `required_highest` forces the class of the top note, and exempts notes of that class
    /// from the distance rule when they leave the highest starting voice.
    #[test]
    fn required_highest_forces_top_class() {
        let mut config = Config::new(
            vec![pitch("C4"), pitch("E4"), pitch("G4")],
            Instrument::standard_guitar(21),
            PitchClass::C,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::required(Interval::THIRD),
                TargetInterval::required(Interval::FIFTH),
            ],
        );
        config.required_highest = Some(PitchClass::E);
        let sets = Search::new(config).unwrap().run().unwrap();

        // Only one voicing is reachable: C4, E4 and G4 must all stay (each is the only
        // admissible note for its voice), and an E5 on top is the only way to make the
        // highest note an E.  That E5 is 9 semitones from G4, so it can only be reached
        // through the exemption.
        assert_eq!(sets.len(), 1);
        assert_eq!(
            sets[0].pitches(),
            &[pitch("C4"), pitch("E4"), pitch("G4"), pitch("E5")],
        );
        for fingering in sets[0].fingerings() {
            assert!(fingering.fret_span() <= 4);
        }
    }

    /// `required_lowest` rejects voicings whose bottom note has the wrong class, and exempts
    /// notes of the required class from the distance rule when they leave the lowest voice.
    #[test]
    fn required_lowest_forces_bass_class() {
        let mut config = Config::new(
            vec![pitch("C3"), pitch("E3")],
            Instrument::standard_guitar(21),
            PitchClass::C,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::optional(Interval::THIRD),
            ],
        );
        // Unconstrained, the voices can only shuffle to nearby C3/E3 positions
        let sets = Search::new(config.clone()).unwrap().run().unwrap();
        assert_fingerings(
            &sets,
            &[&[("D3", 2), ("A2", 3)], &[("A2", 7), ("E2", 8)]],
        );

        // Requiring an E in the bass rejects both of those voicings, but lets the C3 voice
        // drop all the way to the open bottom string
        config.required_lowest = Some(PitchClass::E);
        let sets = Search::new(config).unwrap().run().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(
            sets[0].pitches(),
            &[pitch("E2"), pitch("C3"), pitch("E3")],
        );
        assert_fingerings(&sets, &[&[("D3", 2), ("A2", 3), ("E2", 0)]]);
    }

    /// A target out of reach of every voice gives an empty result, not an error.
    #[test]
    fn unreachable_target_is_empty() {
        let mut config = Config::new(
            vec![pitch("E4")],
            Instrument::standard_guitar(21),
            PitchClass::B_FLAT,
            vec![TargetInterval::required(Interval::ROOT)],
        );
        config.max_leading_distance = Interval::ROOT;
        let sets = Search::new(config).unwrap().run().unwrap();
        assert_eq!(sets, vec![]);
    }

    /// Timeouts abort the whole search rather than returning partial results.
    #[test]
    fn timeout_aborts() {
        let mut config = Config::new(
            vec![pitch("E4")],
            Instrument::standard_guitar(21),
            PitchClass::F_SHARP,
            vec![TargetInterval::required(Interval::ROOT)],
        );
        config.timeout = Duration::from_nanos(1);
        let result = Search::new(config).unwrap().run();
        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    /// Re-running a search always produces identical results in an identical order.
    #[test]
    fn runs_are_deterministic() {
        let mut config = Config::new(
            vec![pitch("C4"), pitch("G4")],
            Instrument::standard_guitar(21),
            PitchClass::C,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::optional(Interval::THIRD),
                TargetInterval::optional(Interval::FIFTH),
            ],
        );
        config.max_leading_distance = Interval::THIRD;
        let search = Search::new(config).unwrap();
        assert_eq!(search.run().unwrap(), search.run().unwrap());
    }

    /// Structural invariants which every returned fingering must satisfy.
    #[test]
    fn fingering_invariants() {
        let mut config = Config::new(
            vec![pitch("C4"), pitch("G4")],
            Instrument::standard_guitar(21),
            PitchClass::C,
            vec![
                TargetInterval::required(Interval::ROOT),
                TargetInterval::optional(Interval::THIRD),
                TargetInterval::optional(Interval::FIFTH),
            ],
        );
        config.max_leading_distance = Interval::THIRD;
        let target_classes = [PitchClass::C, PitchClass::E, PitchClass::G];

        let search = Search::new(config).unwrap();
        let config = search.config();
        let leading = Leading::new(config);
        let sets = search.run().unwrap();
        assert!(!sets.is_empty());
        for fingering in sets.iter().flat_map(VoicingSet::fingerings) {
            // At most one note per string
            assert!(fingering
                .notes()
                .iter()
                .map(|note| note.open_string())
                .all_unique());
            // Frets stay in range and the hand stretch is acceptable
            assert!(fingering.fret_span() <= config.max_fret_span);
            for note in fingering.notes() {
                assert!(note.fret() <= config.max_fret);
                // Only target classes are ever sounded
                assert!(target_classes.contains(&note.pitch().class()));
            }
            // The required root is always sounded
            let classes = fingering
                .sounded_pitches()
                .iter()
                .map(|p| p.class())
                .collect_vec();
            assert!(classes.contains(&PitchClass::C));
            // Every starting voice moves acceptably to something in the fingering
            for &voice in &config.start_chord {
                assert!(fingering
                    .notes()
                    .iter()
                    .any(|note| leading.admits(voice, note.pitch())));
            }
        }
    }
}
