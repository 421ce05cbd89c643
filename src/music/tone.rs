// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The tone table: canonical sharp and flat spellings of the 12 pitch classes.

use crate::error::{Result, ScaleError};

/// Number of equal-tempered pitch classes in an octave
pub const NUM_TONES: usize = 12;

/// Accidental marker on a spelled note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
}

/// Which of the two enharmonic spellings to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

impl Spelling {
    pub fn from_prefer_sharp(prefer_sharp: bool) -> Self {
        if prefer_sharp {
            Spelling::Sharp
        } else {
            Spelling::Flat
        }
    }
}

/// One row of the tone table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneEntry {
    pub sharp: &'static str,
    pub flat: &'static str,
}

impl ToneEntry {
    /// The spelling selected by a preference
    pub fn spelled(&self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharp => self.sharp,
            Spelling::Flat => self.flat,
        }
    }

    /// Accidental of the selected spelling, if any
    pub fn accidental(&self, spelling: Spelling) -> Option<Accidental> {
        match self.spelled(spelling).as_bytes().get(1) {
            Some(b'#') => Some(Accidental::Sharp),
            Some(b'b') => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.sharp == name || self.flat == name
    }
}

/// Static tone table, in chromatic order from C
pub static TONES: [ToneEntry; NUM_TONES] = [
    ToneEntry { sharp: "c", flat: "c" },
    ToneEntry { sharp: "c#", flat: "db" },
    ToneEntry { sharp: "d", flat: "d" },
    ToneEntry { sharp: "d#", flat: "eb" },
    ToneEntry { sharp: "e", flat: "e" },
    ToneEntry { sharp: "f", flat: "f" },
    ToneEntry { sharp: "f#", flat: "gb" },
    ToneEntry { sharp: "g", flat: "g" },
    ToneEntry { sharp: "g#", flat: "ab" },
    ToneEntry { sharp: "a", flat: "a" },
    ToneEntry { sharp: "a#", flat: "bb" },
    ToneEntry { sharp: "b", flat: "b" },
];

/// Look up a row of the tone table
pub fn entry(index: usize) -> Result<&'static ToneEntry> {
    TONES.get(index).ok_or(ScaleError::IndexOutOfRange {
        index,
        len: TONES.len(),
        table: "tone table",
    })
}

/// Find the index of a canonical (lowercase ASCII) spelling
pub fn index_of(name: &str) -> Option<usize> {
    TONES.iter().position(|tone| tone.matches(name))
}

/// Every canonical spelling, sharp and flat, in table order
pub fn note_names() -> impl Iterator<Item = &'static str> {
    TONES.iter().flat_map(|tone| [tone.sharp, tone.flat])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(TONES.len(), NUM_TONES);
        assert_eq!(TONES[1], ToneEntry { sharp: "c#", flat: "db" });
        assert_eq!(TONES[10].flat, "bb");
    }

    #[test]
    fn test_entry_out_of_range() {
        assert!(entry(11).is_ok());
        let err = entry(12).unwrap_err();
        assert!(matches!(
            err,
            ScaleError::IndexOutOfRange { index: 12, len: 12, .. }
        ));
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of("c"), Some(0));
        assert_eq!(index_of("db"), Some(1));
        assert_eq!(index_of("c#"), Some(1));
        assert_eq!(index_of("bb"), Some(10));
        assert_eq!(index_of("cb"), None);
        assert_eq!(index_of("C"), None);
    }

    #[test]
    fn test_entry_accidental() {
        assert_eq!(TONES[1].accidental(Spelling::Sharp), Some(Accidental::Sharp));
        assert_eq!(TONES[1].accidental(Spelling::Flat), Some(Accidental::Flat));
        assert_eq!(TONES[0].accidental(Spelling::Flat), None);
    }

    #[test]
    fn test_note_names() {
        let names: Vec<&str> = note_names().collect();
        assert_eq!(names.len(), 24);
        assert!(names.contains(&"gb"));
        assert!(names.contains(&"g#"));
    }
}
