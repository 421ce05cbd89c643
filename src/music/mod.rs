// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! This module provides the tone table, pitch-class parsing and spelling,
//! scale generation, scale-pattern enumeration, and octave assignment for
//! notation display.

pub mod catalog;
pub mod note;
pub mod octave;
pub mod scale;
pub mod tone;

pub use catalog::ScaleCatalog;
pub use note::{PitchClass, Root, SampleRef};
pub use octave::{assign_octaves, Clef, RenderNote};
pub use scale::{generate, scale_notes, Scale, ScalePattern, ScaleType};
pub use tone::{Accidental, Spelling, NUM_TONES};
