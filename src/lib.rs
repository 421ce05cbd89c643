// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale generation and pitch spelling for notation display.
//!
//! Given a scale pattern and a root, the crate computes the pitch classes
//! of the scale, spells them with sharps or flats, and assigns octaves so
//! that the scale reads upwards on a staff.
//!
//! ```
//! use scales::{PitchClass, Scale, ScaleType};
//!
//! let root = PitchClass::parse("Bb", false).unwrap();
//! let scale = Scale::new(root.into(), ScaleType::Major.pattern());
//! let keys: Vec<String> = scale.render(4).iter().map(|n| n.key().unwrap()).collect();
//! assert_eq!(keys, ["bb/4", "c/5", "d/5", "eb/5", "f/5", "g/5", "a/5", "bb/5"]);
//! ```

pub mod config;
pub mod error;
pub mod music;

pub use config::{PatternEntry, PatternFile, RootSpec, Settings};
pub use error::{Result, ScaleError, ValidationIssue, ValidationReport};
pub use music::{
    assign_octaves, generate, scale_notes, Accidental, Clef, PitchClass, RenderNote, Root,
    SampleRef, Scale, ScaleCatalog, ScalePattern, ScaleType, Spelling, NUM_TONES,
};
