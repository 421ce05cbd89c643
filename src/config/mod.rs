// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the scale browser.
//!
//! This module loads the declarative scale catalog (JSON, or YAML for
//! `.yaml`/`.yml` files), validates it, and exposes the named patterns and
//! their permitted roots. It also holds the application settings and a
//! watcher for reloading the catalog when it changes on disk.

pub mod settings;
pub mod validate;
pub mod watcher;

pub use settings::{Settings, MAX_OCTAVE_LENGTH};
pub use validate::validate_catalog;
pub use watcher::{CatalogEvent, CatalogWatcher};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ScaleError, ValidationIssue};
use crate::music::{
    PitchClass, Root, Scale, ScaleCatalog, ScalePattern, ScaleType, Spelling, NUM_TONES,
};

/// A root as written in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootSpec {
    /// Short form, e.g. "C#"
    Name(String),
    /// Record form with an explicit spelling and optional sample
    Record {
        name: String,
        sharp: bool,
        mp3: Option<String>,
    },
}

impl RootSpec {
    /// The note name as written
    pub fn name(&self) -> &str {
        match self {
            RootSpec::Name(name) => name,
            RootSpec::Record { name, .. } => name,
        }
    }

    /// Resolve into a root.
    ///
    /// The short form takes `prefer_sharp` from the caller; the record form
    /// uses its own `sharp` flag. Neither looks at the accidental in the name.
    pub fn resolve(&self, prefer_sharp: bool) -> crate::Result<Root> {
        match self {
            RootSpec::Name(name) => Root::parse(name, prefer_sharp, None),
            RootSpec::Record { name, sharp, mp3 } => Root::parse(name, *sharp, mp3.as_deref()),
        }
    }
}

/// A named scale pattern with its permitted roots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    /// Display name
    pub name: String,
    /// Interval steps
    pub pattern: ScalePattern,
    /// Permitted roots
    pub roots: Vec<RootSpec>,
}

impl PatternEntry {
    /// Resolve all permitted roots
    pub fn resolve_roots(&self, prefer_sharp: bool) -> crate::Result<Vec<Root>> {
        self.roots.iter().map(|r| r.resolve(prefer_sharp)).collect()
    }

    /// Display names of the permitted roots, with unicode accidentals
    pub fn root_names(&self, prefer_sharp: bool) -> crate::Result<Vec<String>> {
        self.resolve_roots(prefer_sharp)?
            .iter()
            .map(|r| r.pitch().display_name())
            .collect()
    }

    /// First permitted root
    pub fn first_root(&self, prefer_sharp: bool) -> crate::Result<Root> {
        self.roots
            .first()
            .ok_or_else(|| {
                ScaleError::EmptySequence(format!("pattern \"{}\" has no roots", self.name))
            })?
            .resolve(prefer_sharp)
    }

    /// Look up a permitted root by note name.
    ///
    /// The matching root keeps its catalog form, so a record root's own
    /// `sharp` flag and sample win over `prefer_sharp`.
    pub fn root(&self, name: &str, prefer_sharp: bool) -> crate::Result<Root> {
        let wanted = PitchClass::parse(name, prefer_sharp)?;
        for spec in &self.roots {
            let root = spec.resolve(prefer_sharp)?;
            if root.pitch() == wanted {
                return Ok(root);
            }
        }
        Err(ScaleError::RootNotPermitted {
            root: name.trim().to_string(),
            pattern: self.name.clone(),
        })
    }

    /// A uniformly random permitted root
    pub fn random_root<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        prefer_sharp: bool,
    ) -> crate::Result<Root> {
        self.roots
            .choose(rng)
            .ok_or_else(|| {
                ScaleError::EmptySequence(format!("pattern \"{}\" has no roots", self.name))
            })?
            .resolve(prefer_sharp)
    }

    /// Build the scale on a root
    pub fn scale(&self, root: Root) -> Scale {
        Scale::new(root, self.pattern.clone())
    }
}

/// A validated catalog of named scale patterns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternFile {
    /// Catalog entries in file order
    pub entries: Vec<PatternEntry>,
    /// Advisory issues found during validation
    pub warnings: Vec<ValidationIssue>,
}

impl PatternFile {
    /// Load a catalog from a JSON or YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        let catalog = if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
        .with_context(|| format!("Invalid catalog file: {:?}", path))?;

        info!(path = ?path, patterns = catalog.entries.len(), "loaded scale catalog");
        Ok(catalog)
    }

    /// Parse and validate a catalog from a JSON string
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse and validate a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Validate an untyped catalog, then read it into entries
    pub fn from_value(value: Value) -> crate::Result<Self> {
        let report = validate_catalog(&value);
        if !report.is_ok() {
            return Err(ScaleError::Validation(report));
        }
        for issue in &report.warnings {
            warn!(%issue, "catalog warning");
        }

        let entries: Vec<PatternEntry> = serde_json::from_value(value)?;
        Ok(Self {
            entries,
            warnings: report.warnings,
        })
    }

    /// Build a catalog from enumerated patterns, each allowed on every root
    pub fn generated(catalog: &ScaleCatalog, prefer_sharp: bool) -> crate::Result<Self> {
        let spelling = Spelling::from_prefer_sharp(prefer_sharp);
        let roots = (0..NUM_TONES)
            .map(|i| PitchClass::new(i, spelling).ascii_name().map(RootSpec::Name))
            .collect::<crate::Result<Vec<_>>>()?;

        let entries = catalog
            .iter()
            .map(|pattern| PatternEntry {
                name: pattern
                    .known_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| pattern.to_string()),
                pattern: pattern.clone(),
                roots: roots.clone(),
            })
            .collect();

        Ok(Self {
            entries,
            warnings: Vec::new(),
        })
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// First entry in file order
    pub fn first(&self) -> crate::Result<&PatternEntry> {
        self.entries
            .first()
            .ok_or_else(|| ScaleError::EmptySequence("patterns were empty".to_string()))
    }

    /// Find an entry by name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&PatternEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Find an entry by name, falling back to well-known scale names.
    ///
    /// "minor" or "aeolian" find the entry whose steps are the natural
    /// minor scale, whatever that entry is called.
    pub fn resolve_scale(&self, name: &str) -> Option<&PatternEntry> {
        self.find(name).or_else(|| {
            let scale_type = ScaleType::from_name(name)?;
            self.find_pattern(scale_type.steps())
        })
    }

    /// Find the first entry with exactly these steps
    pub fn find_pattern(&self, steps: &[u32]) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.pattern.steps() == steps)
    }

    /// A uniformly random entry
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<&PatternEntry> {
        self.entries
            .choose(rng)
            .ok_or_else(|| ScaleError::EmptySequence("patterns were empty".to_string()))
    }

    /// Names of all entries, for selection lists
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}
