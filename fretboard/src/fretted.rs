//! A pitch bound to the fretboard position which produces it.

use std::fmt::{Debug, Display, Formatter};

use crate::Pitch;

/// A [`Pitch`] as sounded at a specific position on a fretted instrument: the pitch itself, the
/// open-string pitch of the string it's played on, and the fret.  Unlike bare [`Pitch`]es, two
/// `FrettedNote`s are only equal if they are played at the same position — the same pitch on two
/// different strings compares unequal.
///
/// `FrettedNote`s are produced by the fretboard mapping on
/// [`Instrument`](crate::Instrument); there is no public constructor, so a `FrettedNote` is
/// always consistent with the string and fret it claims to be played at.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrettedNote {
    pitch: Pitch,
    open_string: Pitch,
    fret: u8,
}

impl FrettedNote {
    pub(crate) fn new(pitch: Pitch, open_string: Pitch, fret: u8) -> FrettedNote {
        FrettedNote {
            pitch,
            open_string,
            fret,
        }
    }

    /// The sounding [`Pitch`] of this note.
    #[inline]
    pub fn pitch(self) -> Pitch {
        self.pitch
    }

    /// The open-string [`Pitch`] identifying the string this note is played on.
    #[inline]
    pub fn open_string(self) -> Pitch {
        self.open_string
    }

    /// The fret at which this note is played; `0` is the open string.
    #[inline]
    pub fn fret(self) -> u8 {
        self.fret
    }

    /// `true` if this note is played on an open string (fret `0`).
    #[inline]
    pub fn is_open(self) -> bool {
        self.fret == 0
    }
}

impl Debug for FrettedNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrettedNote({})", self)
    }
}

impl Display for FrettedNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}/{})", self.pitch, self.open_string, self.fret)
    }
}
