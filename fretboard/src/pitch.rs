//! A representation of a concrete pitch: a pitch class sounding in a specific octave.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::PitchClass;

/// A concrete pitch: a [`PitchClass`] sounding in a specific octave, using scientific pitch
/// notation (so middle C is `C4`).  Every `Pitch` corresponds to an integer pitch
/// [`value`](Self::value) of `class + 12 * octave`, and `Pitch`es are compared, ordered and
/// hashed *solely* by this value.
///
/// ```
/// use fretboard::{Pitch, PitchClass};
///
/// let middle_c = Pitch::new(PitchClass::C, 4);
/// assert_eq!(middle_c.value(), 48);
/// // Pitches are ordered by value, even across octave boundaries
/// assert!(middle_c < Pitch::new(PitchClass::D, 4));
/// assert!(middle_c > Pitch::new(PitchClass::B, 3));
/// // ... and display as name + octave
/// assert_eq!(middle_c.to_string(), "C4");
/// ```
#[derive(Copy, Clone)]
pub struct Pitch {
    class: PitchClass,
    octave: i8,
}

impl Pitch {
    /// Creates a `Pitch` of a given [`PitchClass`] and octave.
    pub fn new(class: PitchClass, octave: i8) -> Pitch {
        Pitch { class, octave }
    }

    /// The [`PitchClass`] of this `Pitch`.
    #[inline]
    pub fn class(self) -> PitchClass {
        self.class
    }

    /// The octave this `Pitch` sounds in.
    #[inline]
    pub fn octave(self) -> i8 {
        self.octave
    }

    /// The integer value of this `Pitch`: its chromatic index `class + 12 * octave`.  Semitone
    /// distances between pitches are differences between their values.
    #[inline]
    pub fn value(self) -> i16 {
        self.class.index() as i16 + 12 * self.octave as i16
    }
}

// `Pitch`es compare solely by value: the derived impls would order by class before octave, which
// is not the total order we want.

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Pitch {}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl Debug for Pitch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pitch({})", self)
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = ParsePitchError;

    /// Parses a `Pitch` from a name + octave string like `"F#4"` or `"Bb-1"`.
    ///
    /// # Example
    /// ```
    /// use fretboard::{Pitch, PitchClass};
    ///
    /// assert_eq!("F#4".parse(), Ok(Pitch::new(PitchClass::F_SHARP, 4)));
    /// assert_eq!("E-1".parse(), Ok(Pitch::new(PitchClass::E, -1)));
    /// assert!("H4".parse::<Pitch>().is_err());
    /// assert!("F#".parse::<Pitch>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParsePitchError::Empty);
        }
        // The class name is everything before the octave number, which starts at the first digit
        // or minus sign
        let octave_start = s
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or(ParsePitchError::NoOctave)?;
        let class = PitchClass::from_name(&s[..octave_start])
            .ok_or_else(|| ParsePitchError::InvalidClass(s[..octave_start].to_owned()))?;
        let octave = s[octave_start..]
            .parse::<i8>()
            .map_err(|_| ParsePitchError::InvalidOctave(s[octave_start..].to_owned()))?;
        Ok(Pitch::new(class, octave))
    }
}

/// The possible ways that parsing a [`Pitch`] or [`PitchClass`] string could fail.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ParsePitchError {
    /// The input string was empty
    Empty,
    /// The input had no octave number (e.g. `"F#"`)
    NoOctave,
    /// The class-name part of the input is not a note name
    InvalidClass(String),
    /// The octave part of the input is not a valid octave number
    InvalidOctave(String),
}

impl Display for ParsePitchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsePitchError::Empty => write!(f, "pitch string is empty"),
            ParsePitchError::NoOctave => write!(f, "pitch has no octave number"),
            ParsePitchError::InvalidClass(s) => write!(f, "{:?} is not a note name", s),
            ParsePitchError::InvalidOctave(s) => write!(f, "{:?} is not a valid octave", s),
        }
    }
}

impl std::error::Error for ParsePitchError {}

///////////
// SERDE //
///////////

#[cfg(feature = "serde")]
struct PitchVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for PitchVisitor {
    type Value = Pitch;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a pitch name like 'F#4'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse().map_err(E::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D>(deserializer: D) -> Result<Pitch, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(PitchVisitor)
    }
}

// Serialise as the name + octave string
#[cfg(feature = "serde")]
impl Serialize for Pitch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Pitch {
    fn arbitrary(gen: &mut Gen) -> Self {
        // Octaves far outside any instrument's range aren't interesting, so keep them small
        Pitch::new(PitchClass::arbitrary(gen), i8::arbitrary(gen) % 10)
    }
}
