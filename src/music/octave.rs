// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Octave assignment for notation display.
//!
//! Ascending scale motion must read upwards on the staff: whenever a pitch
//! class is lower than the one before it, the sequence has wrapped past B
//! and the octave number goes up by one.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::PitchClass;
use crate::error::{Result, ScaleError};

/// Default starting octave (middle C = C4)
pub const DEFAULT_START_OCTAVE: i32 = 4;

/// Assign an octave to each pitch class.
///
/// `octave[0] = start_octave`, and each later octave is the previous one
/// plus one exactly when the previous pitch class is greater than the
/// current one.
pub fn assign_octaves(pitch_classes: &[u32], start_octave: i32) -> Vec<i32> {
    let Some(&first) = pitch_classes.first() else {
        return Vec::new();
    };

    let mut octaves = Vec::with_capacity(pitch_classes.len());
    let mut octave = start_octave;
    let mut prev = first;
    octaves.push(octave);
    for &pc in &pitch_classes[1..] {
        if prev > pc {
            octave += 1;
        }
        octaves.push(octave);
        prev = pc;
    }
    octaves
}

/// Pair every note with its display octave
pub fn render(notes: &[PitchClass], start_octave: i32) -> Vec<RenderNote> {
    let indices: Vec<u32> = notes.iter().map(|n| n.index() as u32).collect();
    notes
        .iter()
        .zip(assign_octaves(&indices, start_octave))
        .map(|(&pitch, octave)| RenderNote::new(pitch, octave))
        .collect()
}

/// Smallest power of two that holds `count` notes.
///
/// Notation shows a scale as equal note values filling one measure, so a
/// scale of 8 notes is written in eighths and one of 6 notes in eighths too.
pub fn note_value(count: usize) -> Result<u32> {
    if count == 0 {
        return Err(ScaleError::EmptySequence(
            "cannot pick a note value for zero notes".to_string(),
        ));
    }
    u32::try_from(count.next_power_of_two()).map_err(|_| ScaleError::IndexOutOfRange {
        index: count,
        len: u32::MAX as usize,
        table: "note value range",
    })
}

/// A pitch class placed in a specific octave, ready for notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderNote {
    pitch: PitchClass,
    octave: i32,
}

impl RenderNote {
    pub fn new(pitch: PitchClass, octave: i32) -> Self {
        Self { pitch, octave }
    }

    pub fn pitch(&self) -> PitchClass {
        self.pitch
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Notation key, e.g. "c#/4"
    pub fn key(&self) -> Result<String> {
        Ok(format!("{}/{}", self.pitch.ascii_name()?, self.octave))
    }
}

impl fmt::Display for RenderNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

/// Staff clef
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clef {
    #[default]
    Treble,
    Bass,
}

impl Clef {
    /// Octave the first note is placed in
    pub fn start_octave(self) -> i32 {
        match self {
            Clef::Treble => DEFAULT_START_OCTAVE,
            Clef::Bass => DEFAULT_START_OCTAVE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
        }
    }
}
