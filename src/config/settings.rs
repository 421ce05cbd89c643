// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Application settings, read from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::{Clef, NUM_TONES};

/// Largest span, in semitones, the enumerator is asked for
pub const MAX_OCTAVE_LENGTH: u32 = 2 * NUM_TONES as u32;

/// Display and catalog settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file to load instead of the enumerated patterns
    pub catalog: Option<PathBuf>,
    /// Show sharps (true) or flats (false) for short-form roots
    pub prefer_sharp: bool,
    /// Staff clef
    pub clef: Clef,
    /// Octave of the first note; defaults to the clef's octave
    pub start_octave: Option<i32>,
    /// Span in semitones of enumerated patterns
    pub octave_length: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            prefer_sharp: true,
            clef: Clef::default(),
            start_octave: None,
            octave_length: NUM_TONES as u32,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text).context("Failed to parse TOML settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the rest of the program cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_OCTAVE_LENGTH).contains(&self.octave_length) {
            bail!(
                "octave_length must be between 1 and {}, got {}",
                MAX_OCTAVE_LENGTH,
                self.octave_length
            );
        }
        Ok(())
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Octave the first rendered note is placed in
    pub fn start_octave(&self) -> i32 {
        self.start_octave.unwrap_or_else(|| self.clef.start_octave())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.prefer_sharp);
        assert_eq!(settings.start_octave(), 4);
        assert_eq!(settings.octave_length, 12);
    }

    #[test]
    fn test_parse_settings() {
        let toml = r#"
catalog = "patterns.json"
prefer_sharp = false
clef = "bass"
start_octave = 2
"#;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.catalog, Some(PathBuf::from("patterns.json")));
        assert!(!settings.prefer_sharp);
        assert_eq!(settings.clef, Clef::Bass);
        assert_eq!(settings.start_octave(), 2);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(Settings::from_toml("clef = \"alto\"").is_err());
        assert!(Settings::from_toml("prefer_sharp = ").is_err());
    }

    #[test]
    fn test_octave_length_bounds() {
        assert!(Settings::from_toml("octave_length = 1").is_ok());
        assert!(Settings::from_toml("octave_length = 24").is_ok());

        let err = Settings::from_toml("octave_length = 60").unwrap_err();
        assert!(err.to_string().contains("octave_length"));
        assert!(Settings::from_toml("octave_length = 0").is_err());
        assert!(Settings::from_toml("octave_length = 25").is_err());
    }

    #[test]
    fn test_round_trip() {
        let original = Settings {
            catalog: Some(PathBuf::from("scales.yaml")),
            prefer_sharp: false,
            clef: Clef::Treble,
            start_octave: Some(5),
            octave_length: 13,
        };
        let text = original.to_toml().unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), original);
    }
}
