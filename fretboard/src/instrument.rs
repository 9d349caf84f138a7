//! A description of a fretted string instrument, and the mapping from pitch classes to
//! fretboard positions.

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{FrettedNote, Pitch, PitchClass};

/// A fretted string instrument: an ordered set of strings (each given as its open-string
/// [`Pitch`]) and a number of frets.
///
/// The tuning is stored in the order the strings should be reported in — for a guitar,
/// conventionally from the highest string down (see [`Instrument::standard_guitar`]).
/// `Instrument` itself places no constraints on its contents; the search engine's configuration
/// validation is responsible for rejecting degenerate instruments (empty tunings, duplicate
/// open-string pitches, zero frets) before any fretboard work happens.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Instrument {
    tuning: Vec<Pitch>,
    fret_count: u8,
}

impl Instrument {
    /// Creates an `Instrument` from a tuning and a fret count.
    pub fn new(tuning: Vec<Pitch>, fret_count: u8) -> Instrument {
        Instrument { tuning, fret_count }
    }

    /// A six-string guitar in standard tuning, with strings reported from the high `E4` down to
    /// the low `E2`.
    ///
    /// # Example
    /// ```
    /// use fretboard::Instrument;
    ///
    /// let guitar = Instrument::standard_guitar(21);
    /// assert_eq!(guitar.num_strings(), 6);
    /// assert_eq!(guitar.tuning()[0], "E4".parse().unwrap());
    /// assert_eq!(guitar.tuning()[5], "E2".parse().unwrap());
    /// ```
    pub fn standard_guitar(fret_count: u8) -> Instrument {
        // Unwrapping is fine because all the names are valid pitches
        let tuning = ["E4", "B3", "G3", "D3", "A2", "E2"]
            .iter()
            .map(|name| name.parse().unwrap())
            .collect();
        Instrument::new(tuning, fret_count)
    }

    /// The number of strings on this `Instrument`.
    #[inline]
    pub fn num_strings(&self) -> usize {
        self.tuning.len()
    }

    /// The open-string [`Pitch`]es of this `Instrument`'s strings, in reporting order.
    #[inline]
    pub fn tuning(&self) -> &[Pitch] {
        &self.tuning
    }

    /// The number of frets on each string.  A string can therefore sound `fret_count + 1`
    /// different pitches, including its open note.
    #[inline]
    pub fn fret_count(&self) -> u8 {
        self.fret_count
    }

    /// All positions on one string which sound a given [`PitchClass`], in ascending fret order
    /// (the open string is fret `0`).
    ///
    /// The octave of each emitted note comes from counting how many times the chromatic index
    /// `class(open) + fret` passes an octave boundary.
    pub fn notes_on_string(
        &self,
        open_string: Pitch,
        class: PitchClass,
    ) -> impl Iterator<Item = FrettedNote> {
        let fret_count = self.fret_count;
        (0..=fret_count).filter_map(move |fret| {
            let chromatic_idx = open_string.class().index() + fret as usize;
            let octaves_above = (chromatic_idx / 12) as i8;
            let sounded_class = PitchClass::new((chromatic_idx % 12) as u8);
            (sounded_class == class).then(|| {
                let pitch = Pitch::new(sounded_class, open_string.octave() + octaves_above);
                FrettedNote::new(pitch, open_string, fret)
            })
        })
    }

    /// Every position on the fretboard which sounds a given [`PitchClass`], ordered by string
    /// (in tuning order) and then by ascending fret.
    ///
    /// # Example
    /// ```
    /// use fretboard::{Instrument, PitchClass};
    ///
    /// let guitar = Instrument::standard_guitar(12);
    /// let es = guitar.notes_with_class(PitchClass::E);
    /// // Every string of a guitar can sound an E somewhere in its first 12 frets
    /// assert_eq!(es.len(), 8);
    /// // The first position reported is the open high-E string
    /// assert_eq!(es[0].pitch(), "E4".parse().unwrap());
    /// assert!(es[0].is_open());
    /// ```
    pub fn notes_with_class(&self, class: PitchClass) -> Vec<FrettedNote> {
        self.tuning
            .iter()
            .flat_map(|&open_string| self.notes_on_string(open_string, class))
            .collect()
    }
}
