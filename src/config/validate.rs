// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Structural validation of scale catalogs.
//!
//! The catalog is checked as an untyped JSON value so that every violation
//! (missing fields, wrong types, empty arrays, unknown note names) can be
//! reported in one pass instead of failing on the first.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationReport;
use crate::music::note;
use crate::music::NUM_TONES;

/// Accepted short form for a root name
const NOTE_NAME_PATTERN: &str = r"^[A-Ga-g](#|b|\(#\)|\(b\))?$";

static NOTE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn note_name_regex() -> &'static Regex {
    NOTE_NAME_REGEX.get_or_init(|| Regex::new(NOTE_NAME_PATTERN).expect("invalid regex pattern"))
}

/// Validate a whole catalog, collecting every error and warning
pub fn validate_catalog(value: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    let Some(entries) = value.as_array() else {
        report.add_error("", "must be an array");
        return report;
    };
    if entries.is_empty() {
        report.add_error("", "must have at least 1 item");
    }

    for (i, entry) in entries.iter().enumerate() {
        let path = format!("[{}]", i);
        match entry.as_object() {
            Some(fields) => validate_entry(fields, &path, &mut report),
            None => report.add_error(path, "must be an object"),
        }
    }

    report
}

fn validate_entry(fields: &Map<String, Value>, path: &str, report: &mut ValidationReport) {
    match fields.get("name") {
        None => report.add_error(path, "must have required property 'name'"),
        Some(name) if !name.is_string() => {
            report.add_error(format!("{}.name", path), "must be a string")
        }
        Some(_) => {}
    }

    match fields.get("pattern") {
        None => report.add_error(path, "must have required property 'pattern'"),
        Some(pattern) => validate_pattern(pattern, &format!("{}.pattern", path), report),
    }

    match fields.get("roots") {
        None => report.add_error(path, "must have required property 'roots'"),
        Some(roots) => validate_roots(roots, &format!("{}.roots", path), report),
    }
}

fn validate_pattern(pattern: &Value, path: &str, report: &mut ValidationReport) {
    let Some(steps) = pattern.as_array() else {
        report.add_error(path, "must be an array");
        return;
    };
    if steps.is_empty() {
        report.add_error(path, "must have at least 1 item");
        return;
    }

    let mut span: u64 = 0;
    let mut well_formed = true;
    for (j, step) in steps.iter().enumerate() {
        match step.as_u64() {
            Some(n) if n > 0 && n <= u32::MAX as u64 => span += n,
            _ => {
                well_formed = false;
                report.add_error(
                    format!("{}[{}]", path, j),
                    format!("must be an integer greater than 0, got {}", step),
                );
            }
        }
    }

    if well_formed && span != NUM_TONES as u64 {
        report.add_warning(
            path,
            format!("steps sum to {}, not one octave ({})", span, NUM_TONES),
        );
    }
}

fn validate_roots(roots: &Value, path: &str, report: &mut ValidationReport) {
    let Some(items) = roots.as_array() else {
        report.add_error(path, "must be an array");
        return;
    };
    if items.is_empty() {
        report.add_error(path, "must have at least 1 item");
        return;
    }

    for (j, root) in items.iter().enumerate() {
        let root_path = format!("{}[{}]", path, j);
        match root {
            Value::String(name) => validate_note_name(name, &root_path, report),
            Value::Object(record) => validate_root_record(record, &root_path, report),
            other => report.add_error(
                root_path,
                format!("must be a note name or a root record, got {}", other),
            ),
        }
    }
}

fn validate_root_record(record: &Map<String, Value>, path: &str, report: &mut ValidationReport) {
    match record.get("name") {
        None => report.add_error(path, "must have required property 'name'"),
        Some(Value::String(name)) => validate_note_name(name, &format!("{}.name", path), report),
        Some(_) => report.add_error(format!("{}.name", path), "must be a string"),
    }

    match record.get("sharp") {
        None => report.add_error(path, "must have required property 'sharp'"),
        Some(Value::Bool(_)) => {}
        Some(_) => report.add_error(format!("{}.sharp", path), "must be a boolean"),
    }

    match record.get("mp3") {
        None => report.add_error(path, "must have required property 'mp3'"),
        Some(Value::String(_)) | Some(Value::Null) => {}
        Some(_) => report.add_error(format!("{}.mp3", path), "must be a string or null"),
    }
}

fn validate_note_name(name: &str, path: &str, report: &mut ValidationReport) {
    if !note_name_regex().is_match(name) {
        report.add_error(
            path,
            format!("\"{}\" must match note name pattern '{}'", name, NOTE_NAME_PATTERN),
        );
    } else if note::index_from_str(name).is_err() {
        report.add_error(path, format!("\"{}\" is not in the tone table", name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_catalog() {
        let catalog = json!([
            { "name": "Major", "pattern": [2, 2, 1, 2, 2, 2, 1], "roots": ["C", "F#", "Bb"] },
            {
                "name": "Minor",
                "pattern": [2, 1, 2, 2, 1, 2, 2],
                "roots": [{ "name": "a", "sharp": true, "mp3": null }]
            }
        ]);
        let report = validate_catalog(&catalog);
        assert!(report.is_ok(), "{}", report);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_pattern_and_roots() {
        let catalog = json!([{ "name": "Broken", "pattern": [], "roots": [] }]);
        let report = validate_catalog(&catalog);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].path, "[0].pattern");
        assert_eq!(report.errors[1].path, "[0].roots");
        assert!(report.mentions("pattern"));
        assert!(report.mentions("roots"));
    }

    #[test]
    fn test_bad_root_name() {
        let catalog = json!([{ "name": "X", "pattern": [12], "roots": ["C", "H", "E#"] }]);
        let report = validate_catalog(&catalog);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].path, "[0].roots[1]");
        assert!(report.errors[0].message.contains("\"H\""));
        assert_eq!(report.errors[1].path, "[0].roots[2]");
        assert!(report.errors[1].message.contains("tone table"));
    }

    #[test]
    fn test_parenthesized_roots_accepted() {
        let catalog = json!([{ "name": "X", "pattern": [12], "roots": ["C(#)", "e(b)"] }]);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_all_errors_collected() {
        let catalog = json!([
            { "pattern": [0, -1, 2.5], "roots": "C" },
            "not an object",
            { "name": 5, "pattern": [12], "roots": [{ "name": "Q", "sharp": "yes" }] }
        ]);
        let report = validate_catalog(&catalog);
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "[0]",
                "[0].pattern[0]",
                "[0].pattern[1]",
                "[0].pattern[2]",
                "[0].roots",
                "[1]",
                "[2].name",
                "[2].roots[0].name",
                "[2].roots[0].sharp",
                "[2].roots[0]",
            ]
        );
    }

    #[test]
    fn test_top_level_shape() {
        assert!(!validate_catalog(&json!({})).is_ok());
        let report = validate_catalog(&json!([]));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("at least 1 item"));
    }

    #[test]
    fn test_non_octave_pattern_warns() {
        let catalog = json!([{ "name": "Fragment", "pattern": [2, 2, 3], "roots": ["D"] }]);
        let report = validate_catalog(&catalog);
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("sum to 7"));
    }
}
