//! # Descriptor Validation
//!
//! Checks a `doc.json` document against the required shape and against the
//! directory containing it. Checks run in a fixed order and every finding
//! becomes one human-readable line:
//!
//! 1. `author` present and a string.
//! 2. `challenge` section present; a missing or empty section stops
//!    validation with a single error.
//! 3. `difficulty`, `category`, `name`, `introduction` present and strings.
//! 4. `difficulty` is one of the enumerated values and starts uppercase.
//! 5. The directory is `<difficulty>/<category> <name>` and agrees with the
//!    declared values.
//!
//! A document that does not parse yields a single parse error and no other
//! checks run.

use std::collections::BTreeMap;
use std::path::Path;

use ccheck_core::{path_components, ChangeSet, Difficulty, DESCRIPTOR_FILE};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields every `challenge` section must carry, in reporting order.
pub const REQUIRED_CHALLENGE_FIELDS: [&str; 4] = ["difficulty", "category", "name", "introduction"];

/// Outcome of validating one descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether no errors were found.
    pub valid: bool,
    /// Findings, in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Wrap a list of findings.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a parsed descriptor against the directory holding it.
///
/// `dir` is the repository-relative parent directory of the descriptor,
/// e.g. `Hard/Combat Arena`. Returns the findings in check order; an empty
/// list means the descriptor is valid.
pub fn validate_descriptor(doc: &Value, dir: &str) -> Vec<String> {
    let mut errors = Vec::new();

    match doc.get("author") {
        None => errors.push("Missing required field: author".to_string()),
        Some(Value::String(_)) => {}
        Some(_) => errors.push("author must be a string".to_string()),
    }

    let challenge = match doc.get("challenge") {
        Some(Value::Object(map)) if !map.is_empty() => map,
        Some(value) if !is_falsy(value) => {
            errors.push("challenge must be an object".to_string());
            return errors;
        }
        _ => {
            errors.push("Missing challenge section".to_string());
            return errors;
        }
    };

    for field in REQUIRED_CHALLENGE_FIELDS {
        match challenge.get(field) {
            None => errors.push(format!("Missing challenge field: {field}")),
            Some(Value::String(_)) => {}
            Some(_) => errors.push(format!("{field} must be a string")),
        }
    }

    errors.extend(check_difficulty(challenge.get("difficulty")));
    errors.extend(check_directory(challenge, dir));

    errors
}

/// Parse JSON text and validate it.
pub fn validate_descriptor_str(content: &str, dir: &str) -> Vec<String> {
    validate_descriptor_bytes(content.as_bytes(), dir)
}

/// Parse raw file bytes as JSON and validate them. Bytes that are not
/// UTF-8 are reported as a parse error.
pub fn validate_descriptor_bytes(content: &[u8], dir: &str) -> Vec<String> {
    match serde_json::from_slice::<Value>(content) {
        Ok(doc) => validate_descriptor(&doc, dir),
        Err(e) => vec![format!("JSON parse error: {e}")],
    }
}

/// Read and validate the descriptor at `relative_path` below `repo_root`.
pub fn validate_descriptor_file(repo_root: &Path, relative_path: &str) -> ValidationResult {
    let full_path = repo_root.join(relative_path);
    let dir = parent_dir(relative_path);

    let errors = match std::fs::read(&full_path) {
        Ok(content) => validate_descriptor_bytes(&content, &dir),
        Err(e) => vec![format!("Failed to read file: {e}")],
    };

    tracing::debug!(
        path = %full_path.display(),
        errors = errors.len(),
        "validated descriptor"
    );
    ValidationResult::from_errors(errors)
}

/// Descriptor files of a change set that need validation: changed,
/// not deleted, named `doc.json`, below a difficulty directory.
pub fn select_descriptor_files(changes: &ChangeSet) -> Vec<String> {
    changes
        .all()
        .filter(|path| !changes.is_deleted(path))
        .filter(|path| {
            let parts = path_components(path);
            parts.last() == Some(&DESCRIPTOR_FILE)
                && parts
                    .first()
                    .is_some_and(|first| Difficulty::parse_exact(first).is_some())
        })
        .map(str::to_string)
        .collect()
}

/// Validate every relevant descriptor of a change set, keyed by the
/// descriptor's parent directory.
pub fn validate_changed_descriptors(
    repo_root: &Path,
    changes: &ChangeSet,
) -> BTreeMap<String, ValidationResult> {
    select_descriptor_files(changes)
        .into_iter()
        .map(|path| {
            let result = validate_descriptor_file(repo_root, &path);
            (parent_dir(&path), result)
        })
        .collect()
}

fn check_difficulty(value: Option<&Value>) -> Vec<String> {
    let mut errors = Vec::new();
    let text = display_value(value);

    let Some(difficulty) = value.and_then(Value::as_str) else {
        errors.push(invalid_difficulty(&text));
        return errors;
    };

    let is_member = Difficulty::parse_exact(difficulty).is_some();
    if !is_member {
        errors.push(invalid_difficulty(&text));
    }

    // Catches case variants of the enumerated values (e.g. "base").
    let names_a_difficulty = is_member || Difficulty::parse_ignore_case(difficulty).is_some();
    let starts_uppercase = difficulty.chars().next().is_some_and(char::is_uppercase);
    if names_a_difficulty && !starts_uppercase {
        errors.push("Difficulty must start with uppercase letter".to_string());
    }

    errors
}

fn check_directory(challenge: &Map<String, Value>, dir: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let parts = path_components(dir);
    if parts.len() < 2 {
        errors.push("Invalid directory structure".to_string());
        return errors;
    }

    let difficulty = challenge.get("difficulty");
    if difficulty.and_then(Value::as_str) != Some(parts[0]) {
        errors.push(format!(
            "Directory mismatch: {} ≠ {}",
            parts[0],
            display_value(difficulty)
        ));
    }

    match parts[1].split_once(' ') {
        None => errors.push("Directory name must be [category] name format".to_string()),
        Some((category, _)) => {
            let declared = challenge.get("category");
            let declared_str = match declared {
                None => Some(""),
                Some(value) => value.as_str(),
            };
            if declared_str != Some(category) {
                errors.push(format!(
                    "Category mismatch: {category} ≠ {}",
                    display_value(declared)
                ));
            }
        }
    }

    errors
}

fn invalid_difficulty(text: &str) -> String {
    format!(
        "Invalid difficulty: {text}. Valid options: {}",
        Difficulty::options()
    )
}

/// Render a JSON value for an error message: strings verbatim, anything
/// else as JSON, absent values as the empty string.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn parent_dir(path: &str) -> String {
    let parts = path_components(path);
    match parts.split_last() {
        Some((_, dirs)) => dirs.join("/"),
        None => String::new(),
    }
}
