//! A type-safe representation of a pitch class, with human-friendly `const`s and note names.

use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{Interval, ParsePitchError};

/// The canonical note name of each pitch class, using the mixed sharp/flat spelling common in
/// guitar chord charts.
const NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// A newtype over [`u8`] representing one of the 12 pitch classes — a note identity with the
/// octave information removed.  `PitchClass`es are ordered chromatically from
/// [`C`](PitchClass::C) (index `0`) up to [`B`](PitchClass::B) (index `11`).
///
/// ```
/// use fretboard::PitchClass;
///
/// // The constants are just names for the chromatic indices
/// assert_eq!(PitchClass::C, PitchClass::new(0));
/// assert_eq!(PitchClass::F_SHARP, PitchClass::new(6));
/// // Pitch classes display as note names
/// assert_eq!(PitchClass::E_FLAT.to_string(), "Eb");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Creates a `PitchClass` from a chromatic index, where `C` is `0` and `B` is `11`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 12`.
    #[track_caller]
    pub fn new(index: u8) -> PitchClass {
        assert!(index < 12, "`PitchClass` indices must be in `0..12`");
        PitchClass(index)
    }

    /// Creates a `PitchClass` from a note name (e.g. `"C"`, `"F#"` or `"Eb"`).  Both the sharp
    /// and the flat spelling of each 'black key' class are accepted; any other string returns
    /// [`None`].
    ///
    /// # Example
    /// ```
    /// use fretboard::PitchClass;
    ///
    /// assert_eq!(PitchClass::from_name("F#"), Some(PitchClass::F_SHARP));
    /// // Enharmonic spellings name the same class
    /// assert_eq!(PitchClass::from_name("Gb"), Some(PitchClass::F_SHARP));
    /// // Case matters
    /// assert_eq!(PitchClass::from_name("f#"), None);
    /// assert_eq!(PitchClass::from_name("H"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<PitchClass> {
        let index = match name {
            "C" => 0,
            "C#" | "Db" => 1,
            "D" => 2,
            "D#" | "Eb" => 3,
            "E" => 4,
            "F" => 5,
            "F#" | "Gb" => 6,
            "G" => 7,
            "G#" | "Ab" => 8,
            "A" => 9,
            "A#" | "Bb" => 10,
            "B" => 11,
            _ => return None,
        };
        Some(PitchClass(index))
    }

    /// Returns the chromatic index of this `PitchClass` (`C` is `0`, `B` is `11`).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The note name of this `PitchClass` (e.g. `"F#"`), using the sharp spelling for `C#`/`F#`
    /// and the flat spelling for `Eb`/`Ab`/`Bb`.
    #[inline]
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Returns the `PitchClass` lying a given [`Interval`] above `self`, wrapping around the
    /// octave.
    ///
    /// # Example
    /// ```
    /// use fretboard::{Interval, PitchClass};
    ///
    /// assert_eq!(PitchClass::C.transpose(Interval::THIRD), PitchClass::E);
    /// // Transposition wraps modulo the octave
    /// assert_eq!(PitchClass::A.transpose(Interval::FOURTH), PitchClass::D);
    /// ```
    pub fn transpose(self, interval: Interval) -> PitchClass {
        PitchClass((self.0 + interval.semitones()) % 12)
    }
}

/// Human-friendly constants for the 12 pitch classes.
///
/// # Example
/// ```
/// use fretboard::PitchClass;
///
/// assert_eq!(PitchClass::D, PitchClass::new(2));
/// assert_eq!(PitchClass::A_FLAT, PitchClass::new(8));
/// ```
impl PitchClass {
    /// The pitch class `C`
    pub const C: PitchClass = PitchClass(0);

    /// The pitch class `C#` (enharmonically `Db`)
    pub const C_SHARP: PitchClass = PitchClass(1);

    /// The pitch class `D`
    pub const D: PitchClass = PitchClass(2);

    /// The pitch class `Eb` (enharmonically `D#`)
    pub const E_FLAT: PitchClass = PitchClass(3);

    /// The pitch class `E`
    pub const E: PitchClass = PitchClass(4);

    /// The pitch class `F`
    pub const F: PitchClass = PitchClass(5);

    /// The pitch class `F#` (enharmonically `Gb`)
    pub const F_SHARP: PitchClass = PitchClass(6);

    /// The pitch class `G`
    pub const G: PitchClass = PitchClass(7);

    /// The pitch class `Ab` (enharmonically `G#`)
    pub const A_FLAT: PitchClass = PitchClass(8);

    /// The pitch class `A`
    pub const A: PitchClass = PitchClass(9);

    /// The pitch class `Bb` (enharmonically `A#`)
    pub const B_FLAT: PitchClass = PitchClass(10);

    /// The pitch class `B`
    pub const B: PitchClass = PitchClass(11);
}

impl Debug for PitchClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PitchClass({})", self)
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PitchClass {
    type Err = ParsePitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::from_name(s).ok_or_else(|| ParsePitchError::InvalidClass(s.to_owned()))
    }
}

///////////
// SERDE //
///////////

#[cfg(feature = "serde")]
struct PitchClassVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for PitchClassVisitor {
    type Value = PitchClass;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a note name")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        PitchClass::from_name(v).ok_or_else(|| E::custom(format!("'{}' is not a note name", v)))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D>(deserializer: D) -> Result<PitchClass, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(PitchClassVisitor)
    }
}

// Serialise as the note name
#[cfg(feature = "serde")]
impl Serialize for PitchClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for PitchClass {
    fn arbitrary(gen: &mut Gen) -> Self {
        PitchClass(u8::arbitrary(gen) % 12)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::PitchClass;

    #[test]
    #[should_panic]
    fn new_out_of_range() {
        PitchClass::new(12);
    }

    #[quickcheck]
    fn name_round_trip(class: PitchClass) -> bool {
        PitchClass::from_name(class.name()) == Some(class)
    }
}
