//! A representation of an interval class, with human-friendly `const`s and chord-chart names.

use std::fmt::{Debug, Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// A lookup of the chord-chart name of each interval
const NAMES: [&str; 12] = [
    "root", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7",
];

/// A newtype over [`u8`] representing an interval class: a semitone offset in `0..12` above some
/// root pitch class.  A chord's structure is described as a root plus a collection of
/// `Interval`s, resolved to pitch classes by
/// [`chord::pitch_classes`](crate::chord::pitch_classes).
///
/// ```
/// use fretboard::Interval;
///
/// assert_eq!(Interval::ROOT, Interval::new(0));
/// assert_eq!(Interval::FIFTH, Interval::new(7));
/// // Intervals display as they would appear in a chord chart
/// assert_eq!(Interval::FLAT_SEVENTH.to_string(), "b7");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Interval(u8);

impl Interval {
    /// Creates an `Interval` from a number of semitones above the root.
    ///
    /// # Panics
    ///
    /// Panics if `semitones >= 12`.
    #[track_caller]
    pub fn new(semitones: u8) -> Interval {
        assert!(
            semitones < 12,
            "`Interval`s must span fewer semitones than an octave"
        );
        Interval(semitones)
    }

    /// The number of semitones this `Interval` spans above the root.
    #[inline]
    pub fn semitones(self) -> u8 {
        self.0
    }

    /// The name of this `Interval` as it would appear in a chord chart (e.g. `"b3"`).
    #[inline]
    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }
}

/// Human-friendly constants for the 12 interval classes.
///
/// # Example
/// ```
/// use fretboard::Interval;
///
/// assert_eq!(Interval::FLAT_THIRD, Interval::new(3));
/// assert_eq!(Interval::SIXTH, Interval::new(9));
/// ```
impl Interval {
    /// The root itself: `0` semitones
    pub const ROOT: Interval = Interval(0);

    /// A flat (minor) second: `1` semitone
    pub const FLAT_SECOND: Interval = Interval(1);

    /// A major second: `2` semitones
    pub const SECOND: Interval = Interval(2);

    /// A flat (minor) third: `3` semitones
    pub const FLAT_THIRD: Interval = Interval(3);

    /// A major third: `4` semitones
    pub const THIRD: Interval = Interval(4);

    /// A perfect fourth: `5` semitones
    pub const FOURTH: Interval = Interval(5);

    /// A flat (diminished) fifth: `6` semitones
    pub const FLAT_FIFTH: Interval = Interval(6);

    /// A perfect fifth: `7` semitones
    pub const FIFTH: Interval = Interval(7);

    /// A flat (minor) sixth: `8` semitones
    pub const FLAT_SIXTH: Interval = Interval(8);

    /// A major sixth: `9` semitones
    pub const SIXTH: Interval = Interval(9);

    /// A flat (minor) seventh: `10` semitones
    pub const FLAT_SEVENTH: Interval = Interval(10);

    /// A major seventh: `11` semitones
    pub const SEVENTH: Interval = Interval(11);
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let const_name = match self.0 {
            0 => "ROOT",
            1 => "FLAT_SECOND",
            2 => "SECOND",
            3 => "FLAT_THIRD",
            4 => "THIRD",
            5 => "FOURTH",
            6 => "FLAT_FIFTH",
            7 => "FIFTH",
            8 => "FLAT_SIXTH",
            9 => "SIXTH",
            10 => "FLAT_SEVENTH",
            11 => "SEVENTH",
            _ => unreachable!(),
        };
        write!(f, "Interval::{}", const_name)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

///////////
// SERDE //
///////////

#[cfg(feature = "serde")]
struct IntervalVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for IntervalVisitor {
    type Value = Interval;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an integer in 0..12")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        if v < 12 {
            Ok(Interval(v as u8))
        } else {
            Err(E::custom(format!("invalid interval: {}", v)))
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Interval, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_u64(IntervalVisitor)
    }
}

// Serialise as the semitone count
#[cfg(feature = "serde")]
impl Serialize for Interval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0 as u64)
    }
}

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Interval {
    fn arbitrary(gen: &mut Gen) -> Self {
        Interval(u8::arbitrary(gen) % 12)
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;

    #[test]
    #[should_panic]
    fn new_out_of_range() {
        Interval::new(12);
    }
}
