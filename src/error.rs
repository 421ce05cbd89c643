// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for scale computation and catalog handling.
//!
//! Every fallible operation in the crate returns one of these. Catalog
//! validation never stops at the first problem: all violations are
//! gathered into a [`ValidationReport`] and returned together.

use std::fmt;

use thiserror::Error;

/// Errors produced by the scale core and the catalog loader.
#[derive(Error, Debug)]
pub enum ScaleError {
    /// Input text did not match any known pitch spelling.
    #[error("note \"{text}\" not found among the sharp or flat spellings of the tone table")]
    NotFound { text: String },

    /// An index into a fixed-size table fell outside its bounds.
    #[error("index {index} out of range for {table} of length {len}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        table: &'static str,
    },

    /// A root outside the permitted roots of a catalog pattern.
    #[error("root \"{root}\" is not permitted for pattern \"{pattern}\"")]
    RootNotPermitted { root: String, pattern: String },

    /// One or more catalog entries violate the catalog format.
    #[error("{0}")]
    Validation(ValidationReport),

    /// An operation that needs at least one element received none.
    #[error("expected a non-empty sequence: {0}")]
    EmptySequence(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScaleError>;

/// A single catalog violation, located by a JSON-style path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the offending value, e.g. `[0].roots[2]`.
    pub path: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog{} {}", self.path, self.message)
    }
}

/// Outcome of validating a catalog: hard errors plus advisory warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(path, message));
    }

    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(path, message));
    }

    /// Returns true if there are no errors (warnings are allowed).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check whether any error points at the given field name.
    pub fn mentions(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.path.contains(field) || e.message.contains(field))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog validation failed with {} error(s)", self.errors.len())?;
        for issue in &self.errors {
            write!(f, "\n  {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = ScaleError::IndexOutOfRange {
            index: 14,
            len: 12,
            table: "tone table",
        };
        assert_eq!(
            err.to_string(),
            "index 14 out of range for tone table of length 12"
        );
    }

    #[test]
    fn test_root_not_permitted_message() {
        let err = ScaleError::RootNotPermitted {
            root: "E".to_string(),
            pattern: "Major".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "root \"E\" is not permitted for pattern \"Major\""
        );
    }

    #[test]
    fn test_report_lists_every_error() {
        let mut report = ValidationReport::new();
        report.add_error("[0].pattern", "must have at least 1 item");
        report.add_error("[1].roots[0]", "\"H\" is not a note name");
        report.add_warning("[2].pattern", "steps sum to 10, not 12");

        assert!(!report.is_ok());
        let text = ScaleError::Validation(report.clone()).to_string();
        assert!(text.starts_with("catalog validation failed with 2 error(s)"));
        assert!(text.contains("catalog[0].pattern must have at least 1 item"));
        assert!(text.contains("catalog[1].roots[0]"));
        assert!(!text.contains("steps sum"));
        assert!(report.mentions("roots"));
        assert!(!report.mentions("name"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut report = ValidationReport::new();
        report.add_warning("[0].pattern", "steps sum to 7, not 12");
        assert!(report.is_ok());
    }
}
