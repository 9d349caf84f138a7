//! Depth-first enumeration of every acceptable fingering.

use bit_vec::BitVec;
use fretboard::FrettedNote;
use itertools::Itertools;

use super::{Search, StringIdx};
use crate::{utils::Deadline, voicing::Fingering, Error};

/// Walks the entire space of string/note assignments, returning every acceptable
/// [`Fingering`] along with the number of note placements tried.
pub(super) fn enumerate(
    search: &Search,
    deadline: Deadline,
) -> crate::Result<(Vec<Fingering>, usize)> {
    // With no playable strings there's nothing to explore (and the empty fingering is never
    // acceptable), so the search trivially succeeds with no results
    if search.candidates.is_empty() {
        return Ok((Vec::new(), 0));
    }
    let mut dfs = Dfs {
        search,
        deadline,
        partial: Vec::new(),
        obtained_classes: BitVec::from_elem(12, false),
        num_obtained: 0,
        accepted: Vec::new(),
        steps: 0,
    };
    dfs.explore(0, None)?;
    Ok((dfs.accepted, dfs.steps))
}

struct Dfs<'s> {
    search: &'s Search,
    deadline: Deadline,
    /// The notes chosen so far, one per visited non-silent string
    partial: Vec<(StringIdx, FrettedNote)>,
    /// Which *required* classes `partial` currently sounds.  One bit per pitch class; bits of
    /// non-required classes are never set
    obtained_classes: BitVec,
    num_obtained: usize,
    accepted: Vec<Fingering>,
    steps: usize,
}

impl Dfs<'_> {
    /// Recursively explores every assignment of a note-or-silence to each string from
    /// `position` onwards.  `span` holds the `(min, max)` frets of the non-open notes chosen
    /// so far.
    fn explore(&mut self, position: usize, span: Option<(u8, u8)>) -> crate::Result<()> {
        if self.deadline.expired() {
            return Err(Error::Timeout(self.search.config.timeout));
        }
        let search = self.search;
        // If even playing every remaining string couldn't cover the missing required classes,
        // the whole subtree is fruitless
        let num_missing = search.num_required_classes - self.num_obtained;
        if search.candidates.len() - position < num_missing {
            return Ok(());
        }
        if position == search.candidates.len() {
            self.accept_partial();
            return Ok(());
        }

        // This string stays silent
        self.explore(position + 1, span)?;

        // This string plays each of its candidates in turn
        for &note in &search.candidates[position].notes {
            self.steps += 1;

            // Open strings don't need a finger, so they never extend the fretted span
            let new_span = match (span, note.fret()) {
                (_, 0) => span,
                (None, fret) => Some((fret, fret)),
                (Some((min, max)), fret) => Some((min.min(fret), max.max(fret))),
            };
            if let Some((min, max)) = new_span {
                if max - min > search.config.max_fret_span {
                    continue; // Fingering would need too wide a stretch
                }
            }

            // Record any required class this note newly covers.  Tracking "newly" is what
            // makes the undo below safe: backtracking must not clear a bit which an
            // earlier-chosen note still sounds
            let class_idx = note.pitch().class().index();
            let newly_obtained = search.required_classes.get(class_idx).unwrap()
                && !self.obtained_classes.get(class_idx).unwrap();
            if newly_obtained {
                self.obtained_classes.set(class_idx, true);
                self.num_obtained += 1;
            }

            self.partial.push((search.candidates[position].string, note));
            self.explore(position + 1, new_span)?;
            self.partial.pop();

            if newly_obtained {
                self.obtained_classes.set(class_idx, false);
                self.num_obtained -= 1;
            }
        }
        Ok(())
    }

    /// Called once every string has been assigned: checks the whole-fingering rules and
    /// records the fingering if it passes them all.
    fn accept_partial(&mut self) {
        if self.partial.is_empty() {
            return; // Every string silent isn't a fingering
        }
        if self.num_obtained < self.search.num_required_classes {
            return; // Some required class is never sounded
        }
        if !self.extremes_match() {
            return; // Highest/lowest note has the wrong class
        }
        if !self.all_voices_resolved() {
            return; // Some starting voice has nowhere acceptable to go
        }
        // `partial` visits strings in candidate-count order; sort by string so that equal
        // fingerings are always represented identically
        let notes = self
            .partial
            .iter()
            .sorted_by_key(|&&(string, _)| string)
            .map(|&(_, note)| note)
            .collect_vec();
        self.accepted.push(Fingering::new(notes));
    }

    fn extremes_match(&self) -> bool {
        let config = &self.search.config;
        let pitches = || self.partial.iter().map(|&(_, note)| note.pitch());
        if let Some(class) = config.required_highest {
            if pitches().max().map(|p| p.class()) != Some(class) {
                return false;
            }
        }
        if let Some(class) = config.required_lowest {
            if pitches().min().map(|p| p.class()) != Some(class) {
                return false;
            }
        }
        true
    }

    /// Does every voice of the start chord have at least one note in `partial` it could
    /// acceptably move to?
    fn all_voices_resolved(&self) -> bool {
        self.search.config.start_chord.iter().all(|&voice| {
            self.partial
                .iter()
                .any(|&(_, note)| self.search.leading.admits(voice, note.pitch()))
        })
    }
}
