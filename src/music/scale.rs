// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale patterns and the scale engine.
//!
//! A pattern is a sequence of interval steps in semitones. The engine
//! turns a root and a pattern into the pitch classes of the scale by a
//! running sum of the steps, reduced modulo 12.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::{PitchClass, Root};
use super::octave::{self, RenderNote};
use super::tone::NUM_TONES;
use crate::error::{Result, ScaleError, ValidationReport};

/// Compute the pitch-class indices of a scale.
///
/// The first element is `root_index` as given; every following element is
/// the running sum of `steps` reduced modulo 12. Empty `steps` yields just
/// the root.
pub fn generate(root_index: u32, steps: &[u32]) -> Vec<u32> {
    let mut indices = Vec::with_capacity(steps.len() + 1);
    indices.push(root_index);

    let tones = NUM_TONES as u32;
    let mut sum = root_index % tones;
    for &step in steps {
        sum = (sum + step % tones) % tones;
        indices.push(sum);
    }
    indices
}

/// Compute the notes of a scale; every note takes the root's spelling
pub fn scale_notes(root: &PitchClass, pattern: &ScalePattern) -> Vec<PitchClass> {
    generate(root.index() as u32, pattern.steps())
        .into_iter()
        .map(|i| PitchClass::new(i as usize, root.spelling()))
        .collect()
}

/// An ordered, non-empty sequence of positive interval steps
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct ScalePattern(Vec<u32>);

impl ScalePattern {
    /// Create a pattern, rejecting empty input and zero steps
    pub fn new(steps: Vec<u32>) -> Result<Self> {
        if steps.is_empty() {
            return Err(ScaleError::EmptySequence(
                "a scale pattern needs at least one step".to_string(),
            ));
        }
        let mut report = ValidationReport::new();
        for (i, &step) in steps.iter().enumerate() {
            if step == 0 {
                report.add_error(format!("[{}]", i), "step must be greater than 0");
            }
        }
        if !report.is_ok() {
            return Err(ScaleError::Validation(report));
        }
        Ok(Self(steps))
    }

    /// Build from steps already known to be positive
    pub(crate) fn from_steps_unchecked(steps: Vec<u32>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[u32] {
        &self.0
    }

    /// Total span of the pattern in semitones
    pub fn span(&self) -> u64 {
        self.0.iter().map(|&s| u64::from(s)).sum()
    }

    /// Whether the steps add up to exactly one octave
    pub fn spans_octave(&self) -> bool {
        self.span() == NUM_TONES as u64
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Well-known name for this pattern, if it has one
    pub fn known_name(&self) -> Option<&'static str> {
        ScaleType::from_steps(&self.0).map(ScaleType::name)
    }
}

impl TryFrom<Vec<u32>> for ScalePattern {
    type Error = ScaleError;

    fn try_from(steps: Vec<u32>) -> Result<Self> {
        Self::new(steps)
    }
}

impl From<ScalePattern> for Vec<u32> {
    fn from(pattern: ScalePattern) -> Self {
        pattern.0
    }
}

impl fmt::Display for ScalePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", steps.join(","))
    }
}

/// Named scale types with well-known step patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Phrygian,     // Minor with lowered 2nd
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian
    Locrian,      // Diminished

    // Other minor scales
    HarmonicMinor,
    MelodicMinor, // Ascending form

    // Pentatonic scales
    MajorPentatonic,
    MinorPentatonic,

    // Blues
    Blues,
    MajorBlues,

    // Symmetric scales
    WholeTone,
    Diminished,   // Half-whole
    DiminishedWH, // Whole-half
    Chromatic,
}

impl ScaleType {
    pub const ALL: [ScaleType; 17] = [
        ScaleType::Major,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::NaturalMinor,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::MajorBlues,
        ScaleType::WholeTone,
        ScaleType::Diminished,
        ScaleType::DiminishedWH,
        ScaleType::Chromatic,
    ];

    /// Interval steps between consecutive degrees, summing to an octave
    pub fn steps(self) -> &'static [u32] {
        match self {
            ScaleType::Major => &[2, 2, 1, 2, 2, 2, 1],
            ScaleType::Dorian => &[2, 1, 2, 2, 2, 1, 2],
            ScaleType::Phrygian => &[1, 2, 2, 2, 1, 2, 2],
            ScaleType::Lydian => &[2, 2, 2, 1, 2, 2, 1],
            ScaleType::Mixolydian => &[2, 2, 1, 2, 2, 1, 2],
            ScaleType::NaturalMinor => &[2, 1, 2, 2, 1, 2, 2],
            ScaleType::Locrian => &[1, 2, 2, 1, 2, 2, 2],

            ScaleType::HarmonicMinor => &[2, 1, 2, 2, 1, 3, 1],
            ScaleType::MelodicMinor => &[2, 1, 2, 2, 2, 2, 1],

            ScaleType::MajorPentatonic => &[2, 2, 3, 2, 3],
            ScaleType::MinorPentatonic => &[3, 2, 2, 3, 2],

            ScaleType::Blues => &[3, 2, 1, 1, 3, 2],
            ScaleType::MajorBlues => &[2, 1, 1, 3, 2, 3],

            ScaleType::WholeTone => &[2, 2, 2, 2, 2, 2],
            ScaleType::Diminished => &[1, 2, 1, 2, 1, 2, 1, 2],
            ScaleType::DiminishedWH => &[2, 1, 2, 1, 2, 1, 2, 1],
            ScaleType::Chromatic => &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        }
    }

    /// The step sequence as a pattern
    pub fn pattern(self) -> ScalePattern {
        ScalePattern::from_steps_unchecked(self.steps().to_vec())
    }

    /// Find the scale type whose steps match exactly
    pub fn from_steps(steps: &[u32]) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.steps() == steps)
    }

    /// Parse scale type from string
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "dorian" => Some(ScaleType::Dorian),
            "phrygian" => Some(ScaleType::Phrygian),
            "lydian" => Some(ScaleType::Lydian),
            "mixolydian" => Some(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "locrian" => Some(ScaleType::Locrian),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Some(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(ScaleType::MinorPentatonic),
            "blues" | "minorblues" => Some(ScaleType::Blues),
            "majorblues" => Some(ScaleType::MajorBlues),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "octatonic" | "halfwhole" => Some(ScaleType::Diminished),
            "diminishedwh" | "wholehalf" => Some(ScaleType::DiminishedWH),
            "chromatic" => Some(ScaleType::Chromatic),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::MajorBlues => "Major Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::Diminished => "Diminished",
            ScaleType::DiminishedWH => "Diminished (W-H)",
            ScaleType::Chromatic => "Chromatic",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A concrete scale: a root, a pattern, and the resulting notes
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Root,
    pattern: ScalePattern,
    notes: Vec<PitchClass>,
}

impl Scale {
    /// Create a new scale from root and pattern
    pub fn new(root: Root, pattern: ScalePattern) -> Self {
        let notes = scale_notes(&root.pitch(), &pattern);
        Self {
            root,
            pattern,
            notes,
        }
    }

    /// Get the root
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Get the step pattern
    pub fn pattern(&self) -> &ScalePattern {
        &self.pattern
    }

    /// Get the notes, root first and (for octave patterns) root again last
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// Get the number of notes in this scale
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if this scale is empty (shouldn't happen normally)
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Assign octaves for display, starting at `start_octave`
    pub fn render(&self, start_octave: i32) -> Vec<RenderNote> {
        octave::render(&self.notes, start_octave)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern.known_name() {
            Some(name) => write!(f, "{} {}", self.root, name),
            None => write!(f, "{} [{}]", self.root, self.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::tone::Spelling;

    #[test]
    fn test_generate_major() {
        assert_eq!(generate(0, &[2, 2, 1, 2, 2, 2, 1]), vec![0, 2, 4, 5, 7, 9, 11, 0]);
    }

    #[test]
    fn test_generate_wraps() {
        // A natural minor: a b c d e f g a
        assert_eq!(generate(9, &[2, 1, 2, 2, 1, 2, 2]), vec![9, 11, 0, 2, 4, 5, 7, 9]);
    }

    #[test]
    fn test_generate_empty_steps() {
        assert_eq!(generate(5, &[]), vec![5]);
    }

    #[test]
    fn test_generate_seed_unreduced() {
        let out = generate(14, &[1, 1]);
        assert_eq!(out, vec![14, 3, 4]);
    }

    #[test]
    fn test_generate_closure() {
        for root in 0..12u32 {
            for steps in [vec![1u32; 30], vec![5, 7, 11, 13], vec![25]] {
                let out = generate(root, &steps);
                assert_eq!(out.len(), steps.len() + 1);
                assert_eq!(out[0], root);
                assert!(out[1..].iter().all(|&i| i < 12));
            }
        }
    }

    #[test]
    fn test_generate_idempotent() {
        let steps = [3, 2, 1, 1, 3, 2];
        assert_eq!(generate(4, &steps), generate(4, &steps));
    }

    #[test]
    fn test_scale_notes_keep_spelling() {
        let root = PitchClass::parse("eb", false).unwrap();
        let notes = scale_notes(&root, &ScaleType::Major.pattern());
        let names: Vec<String> = notes.iter().map(|n| n.ascii_name().unwrap()).collect();
        assert_eq!(names, vec!["eb", "f", "g", "ab", "bb", "c", "d", "eb"]);
        assert!(notes.iter().all(|n| n.spelling() == Spelling::Flat));
    }

    #[test]
    fn test_pattern_rejects_empty_and_zero() {
        assert!(matches!(
            ScalePattern::new(vec![]),
            Err(ScaleError::EmptySequence(_))
        ));
        match ScalePattern::new(vec![2, 0, 3, 0]) {
            Err(ScaleError::Validation(report)) => {
                assert_eq!(report.errors.len(), 2);
                assert_eq!(report.errors[0].path, "[1]");
                assert_eq!(report.errors[1].path, "[3]");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_span() {
        let pattern = ScalePattern::new(vec![2, 2, 3]).unwrap();
        assert_eq!(pattern.span(), 7);
        assert!(!pattern.spans_octave());
        assert!(ScaleType::Blues.pattern().spans_octave());
        assert_eq!(pattern.to_string(), "2,2,3");
    }

    #[test]
    fn test_pattern_span_huge_steps() {
        let pattern = ScalePattern::new(vec![u32::MAX, 1]).unwrap();
        assert_eq!(pattern.span(), u32::MAX as u64 + 1);
        assert!(!pattern.spans_octave());

        let wrapping = ScalePattern::new(vec![u32::MAX, 13]).unwrap();
        assert!(!wrapping.spans_octave());
    }

    #[test]
    fn test_pattern_serde() {
        let pattern: ScalePattern = serde_json::from_str("[2,1,2]").unwrap();
        assert_eq!(pattern.steps(), &[2, 1, 2]);
        assert!(serde_json::from_str::<ScalePattern>("[]").is_err());
        assert!(serde_json::from_str::<ScalePattern>("[1,0]").is_err());
    }

    #[test]
    fn test_every_scale_type_spans_octave() {
        for t in ScaleType::ALL {
            assert!(t.pattern().spans_octave(), "{}", t);
            assert_eq!(ScaleType::from_steps(t.steps()), Some(t));
        }
    }

    #[test]
    fn test_scale_type_from_name() {
        assert_eq!(ScaleType::from_name("major"), Some(ScaleType::Major));
        assert_eq!(ScaleType::from_name("Minor"), Some(ScaleType::NaturalMinor));
        assert_eq!(ScaleType::from_name("harmonic_minor"), Some(ScaleType::HarmonicMinor));
        assert_eq!(ScaleType::from_name("unknown"), None);
    }

    #[test]
    fn test_scale_display() {
        let c = PitchClass::new(0, Spelling::Sharp);
        let scale = Scale::new(c.into(), ScaleType::Major.pattern());
        assert_eq!(scale.len(), 8);
        assert_eq!(scale.notes()[4], PitchClass::new(7, Spelling::Sharp));
        assert_eq!(scale.to_string(), "c Major");
    }

    #[test]
    fn test_scale_render() {
        let g = PitchClass::new(7, Spelling::Sharp);
        let scale = Scale::new(g.into(), ScaleType::Major.pattern());
        let octaves: Vec<i32> = scale.render(4).iter().map(|n| n.octave()).collect();
        assert_eq!(octaves, vec![4, 4, 4, 5, 5, 5, 5, 5]);
    }
}
