// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and roots.
//!
//! A [`PitchClass`] is one of the 12 tones plus a spelling preference.
//! The preference is supplied by the caller and never inferred from the
//! text a note was parsed from: parsing `"db"` with `prefer_sharp = true`
//! yields a note that displays as `c#`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

use super::tone::{self, Accidental, Spelling, NUM_TONES};
use crate::error::{Result, ScaleError};

/// Semitone offset type
pub type Semitones = i32;

static FLAT_REGEX: OnceLock<Regex> = OnceLock::new();
static SHARP_REGEX: OnceLock<Regex> = OnceLock::new();
static PAREN_REGEX: OnceLock<Regex> = OnceLock::new();

fn flat_regex() -> &'static Regex {
    FLAT_REGEX.get_or_init(|| Regex::new(r"([a-z])b").expect("invalid regex pattern"))
}

fn sharp_regex() -> &'static Regex {
    SHARP_REGEX.get_or_init(|| Regex::new(r"([a-z])#").expect("invalid regex pattern"))
}

fn paren_regex() -> &'static Regex {
    PAREN_REGEX.get_or_init(|| Regex::new(r"^([a-g])\(([#b])\)$").expect("invalid regex pattern"))
}

/// One of the 12 pitch classes with a display spelling
#[derive(Debug, Clone, Copy)]
pub struct PitchClass {
    index: usize,
    spelling: Spelling,
}

impl PitchClass {
    /// Create a pitch class; the index is reduced modulo 12
    pub fn new(index: usize, spelling: Spelling) -> Self {
        Self {
            index: index % NUM_TONES,
            spelling,
        }
    }

    /// Parse a note name (e.g. "C#", "db", "c(#)", "e♭")
    pub fn parse(text: &str, prefer_sharp: bool) -> Result<Self> {
        let index = index_from_str(text)?;
        Ok(Self::new(index, Spelling::from_prefer_sharp(prefer_sharp)))
    }

    /// Pick a uniformly random pitch class
    pub fn random<R: Rng + ?Sized>(rng: &mut R, prefer_sharp: bool) -> Self {
        Self::new(
            rng.gen_range(0..NUM_TONES),
            Spelling::from_prefer_sharp(prefer_sharp),
        )
    }

    /// Get the pitch class index (0-11)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the stored spelling preference
    pub fn spelling(&self) -> Spelling {
        self.spelling
    }

    /// Same pitch, other spelling
    pub fn with_spelling(self, spelling: Spelling) -> Self {
        Self { spelling, ..self }
    }

    /// Transpose by semitones, keeping the spelling preference
    pub fn transpose(self, semitones: Semitones) -> Self {
        let index = (self.index as i64 + semitones as i64).rem_euclid(NUM_TONES as i64) as usize;
        Self { index, ..self }
    }

    /// Accidental of the preferred spelling
    pub fn accidental(&self) -> Result<Option<Accidental>> {
        Ok(tone::entry(self.index)?.accidental(self.spelling))
    }

    /// Canonical ASCII spelling, e.g. "c#" or "db"
    pub fn ascii_name(&self) -> Result<String> {
        Ok(tone::entry(self.index)?.spelled(self.spelling).to_string())
    }

    /// ASCII name with unicode accidental glyphs, e.g. "d♭"
    pub fn display_name(&self) -> Result<String> {
        let ascii = self.ascii_name()?;
        let flats = flat_regex().replace(&ascii, "${1}♭");
        Ok(sharp_regex().replace(&flats, "${1}♯").into_owned())
    }
}

impl PartialEq for PitchClass {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for PitchClass {}

impl Hash for PitchClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl PartialOrd for PitchClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PitchClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // index is always reduced on construction
        let name = tone::TONES[self.index].spelled(self.spelling);
        write!(f, "{}", name)
    }
}

/// Resolve a note name to its tone-table index
pub fn index_from_str(text: &str) -> Result<usize> {
    let normalized = normalize(text);
    tone::index_of(&normalized).ok_or_else(|| ScaleError::NotFound {
        text: text.to_string(),
    })
}

/// Lowercase, strip whitespace and unicode glyphs, unwrap "c(#)"
fn normalize(text: &str) -> String {
    let lowered: String = text
        .trim()
        .chars()
        .map(|c| match c {
            '♯' => '#',
            '♭' => 'b',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    paren_regex().replace(&lowered, "${1}${2}").into_owned()
}

/// Opaque handle to a playback sample owned by the audio layer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleRef(String);

impl SampleRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn location(&self) -> &str {
        &self.0
    }
}

/// A scale root: a pitch class plus an optional sample handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pitch: PitchClass,
    sample: Option<SampleRef>,
}

impl Root {
    pub fn new(pitch: PitchClass, sample: Option<SampleRef>) -> Self {
        Self { pitch, sample }
    }

    /// Parse a root name with an optional sample location
    pub fn parse(text: &str, prefer_sharp: bool, sample: Option<&str>) -> Result<Self> {
        let pitch = PitchClass::parse(text, prefer_sharp)?;
        Ok(Self::new(pitch, sample.map(SampleRef::new)))
    }

    pub fn pitch(&self) -> PitchClass {
        self.pitch
    }

    pub fn sample(&self) -> Option<&SampleRef> {
        self.sample.as_ref()
    }
}

impl From<PitchClass> for Root {
    fn from(pitch: PitchClass) -> Self {
        Self::new(pitch, None)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spelling_round_trip() {
        for (i, entry) in tone::TONES.iter().enumerate() {
            assert_eq!(PitchClass::parse(entry.sharp, true).unwrap().index(), i);
            assert_eq!(PitchClass::parse(entry.flat, false).unwrap().index(), i);
        }
    }

    #[test]
    fn test_parse_stores_preference() {
        let note = PitchClass::parse("db", true).unwrap();
        assert_eq!(note.index(), 1);
        assert_eq!(note.spelling(), Spelling::Sharp);
        assert_eq!(note.ascii_name().unwrap(), "c#");

        let note = PitchClass::parse("C#", false).unwrap();
        assert_eq!(note.ascii_name().unwrap(), "db");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(PitchClass::parse("c(#)", true).unwrap().index(), 1);
        assert_eq!(PitchClass::parse("E(b)", true).unwrap().index(), 3);
        assert_eq!(PitchClass::parse(" Bb ", false).unwrap().index(), 10);
        assert_eq!(PitchClass::parse("f♯", true).unwrap().index(), 6);
        assert_eq!(PitchClass::parse("A♭", false).unwrap().index(), 8);
    }

    #[test]
    fn test_parse_not_found() {
        for bad in ["H", "", "cb", "c##", "(c)#", "e#"] {
            let err = PitchClass::parse(bad, true).unwrap_err();
            assert!(matches!(err, ScaleError::NotFound { .. }), "{}", bad);
        }
        let err = PitchClass::parse("H", true).unwrap_err();
        assert!(err.to_string().contains("\"H\""));
    }

    #[test]
    fn test_accidental() {
        let cs = PitchClass::new(1, Spelling::Sharp);
        assert_eq!(cs.accidental().unwrap(), Some(Accidental::Sharp));
        assert_eq!(
            cs.with_spelling(Spelling::Flat).accidental().unwrap(),
            Some(Accidental::Flat)
        );
        assert_eq!(PitchClass::new(4, Spelling::Flat).accidental().unwrap(), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(PitchClass::new(1, Spelling::Sharp).display_name().unwrap(), "c♯");
        assert_eq!(PitchClass::new(10, Spelling::Flat).display_name().unwrap(), "b♭");
        assert_eq!(PitchClass::new(11, Spelling::Flat).display_name().unwrap(), "b");
        assert_eq!(PitchClass::new(3, Spelling::Flat).display_name().unwrap(), "e♭");
    }

    #[test]
    fn test_display_name_parses_back() {
        for i in 0..NUM_TONES {
            for spelling in [Spelling::Sharp, Spelling::Flat] {
                let note = PitchClass::new(i, spelling);
                let shown = note.display_name().unwrap();
                assert_eq!(PitchClass::parse(&shown, true).unwrap(), note);
            }
        }
    }

    #[test]
    fn test_equality_ignores_spelling() {
        let sharp = PitchClass::new(6, Spelling::Sharp);
        let flat = PitchClass::new(6, Spelling::Flat);
        assert_eq!(sharp, flat);
        assert!(PitchClass::new(2, Spelling::Flat) < sharp);
    }

    #[test]
    fn test_index_reduced() {
        assert_eq!(PitchClass::new(14, Spelling::Sharp).index(), 2);
    }

    #[test]
    fn test_transpose() {
        let c = PitchClass::new(0, Spelling::Flat);
        assert_eq!(c.transpose(2).index(), 2);
        assert_eq!(c.transpose(12).index(), 0);
        assert_eq!(c.transpose(-1).index(), 11);
        assert_eq!(c.transpose(-1).spelling(), Spelling::Flat);
    }

    #[test]
    fn test_random_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(PitchClass::random(&mut rng, true).index() < NUM_TONES);
        }
    }

    #[test]
    fn test_root_composition() {
        let root = Root::parse("Eb", false, Some("samples/eb.mp3")).unwrap();
        assert_eq!(root.pitch().index(), 3);
        assert_eq!(root.sample().map(|s| s.location()), Some("samples/eb.mp3"));
        assert_eq!(root.to_string(), "eb");

        let bare: Root = PitchClass::new(0, Spelling::Sharp).into();
        assert!(bare.sample().is_none());
    }

    #[test]
    fn test_idempotent() {
        let a = PitchClass::parse("g#", false).unwrap();
        let b = PitchClass::parse("g#", false).unwrap();
        assert_eq!(a.display_name().unwrap(), b.display_name().unwrap());
        assert_eq!(a.display_name().unwrap(), a.display_name().unwrap());
    }
}
