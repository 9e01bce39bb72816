//! Definition loading and batch validation
//!
//! Thin filesystem layer over the validator: read bytes, parse JSON, run the
//! structural and whole-object checks, and hand back typed values. Batch
//! validation walks a directory and keeps going past individual failures;
//! one bad file never hides its siblings.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::artifact::SCHEMA_FILE_NAME;
use crate::definition::{CalendarDefinition, DispatchEntry};
use crate::error::Result;
use crate::validate::{SchemaKind, Validator};

/// Load one calendar definition file, fully validated.
///
/// `schema_path` is the location of the schema artifact that the file's
/// `$schema` back-reference must resolve to.
pub fn load_calendar(path: &Path, schema_path: &Path) -> Result<CalendarDefinition> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let validator = Validator::new();
    validator.validate(SchemaKind::Calendar, &value)?;
    let file_dir = path.parent().unwrap_or_else(|| Path::new(""));
    validator.check_schema_ref(&value, file_dir, schema_path)?;

    let definition = serde_json::from_value(value)?;
    tracing::debug!(path = %path.display(), "loaded calendar definition");
    Ok(definition)
}

/// Load a dispatch list file.
pub fn load_dispatch_list(path: &Path) -> Result<Vec<DispatchEntry>> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    Validator::new().validate(SchemaKind::DispatchList, &value)?;
    Ok(serde_json::from_value(value)?)
}

/// Validate every `*.json` definition under `dir`, independently.
///
/// The schema artifact itself is skipped. Returns one outcome per file, in
/// walk order; failures are reported, never propagated.
pub fn validate_dir(dir: &Path, schema_path: &Path) -> Vec<(PathBuf, Result<()>)> {
    let mut outcomes = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .filter(|e| e.file_name() != SCHEMA_FILE_NAME)
    {
        let path = entry.path().to_path_buf();
        let outcome = load_calendar(&path, schema_path).map(|_| ());
        outcomes.push((path, outcome));
    }
    outcomes
}
