//! Schema artifact generation
//!
//! The calendar definition shape, mirrored as a JSON Schema document and
//! written to a fixed well-known filename. Definition files back-reference
//! the artifact through their `$schema` field; runtime conformance is still
//! enforced by the hand-rolled [`crate::validate::Validator`].

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::error::Result;
use crate::timestamp;

/// The one true artifact filename. `$schema` references must resolve here.
pub const SCHEMA_FILE_NAME: &str = "calendar.schema.json";

/// Build the JSON Schema document for calendar definition files.
pub fn calendar_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "CalendarDefinition",
        "description": "A fictional calendar: epoch instant, fixed cycle length in seconds, and named era spans",
        "type": "object",
        "required": ["$schema", "calendarId", "startAt", "calendarName", "calendarCycle", "list"],
        "properties": {
            "$schema": {
                "type": "string",
                "description": "Relative path to this schema file"
            },
            "calendarId": {
                "type": "string"
            },
            "startAt": {
                "type": "string",
                "description": "Instant of year 1, moment zero",
                "pattern": timestamp::GRAMMAR
            },
            "calendarName": {
                "type": "string"
            },
            "calendarCycle": {
                "type": "integer",
                "description": "Real-world seconds per calendar year"
            },
            "list": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["from", "to", "who", "year"],
                    "properties": {
                        "from": { "type": "integer" },
                        "to": { "type": "integer" },
                        "who": { "type": "string" },
                        "year": { "type": "string" }
                    }
                }
            }
        }
    })
}

/// Write the artifact into `dir` under [`SCHEMA_FILE_NAME`], pretty-printed.
/// Returns the path written.
pub fn write_schema(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(SCHEMA_FILE_NAME);
    let document = serde_json::to_string_pretty(&calendar_schema())?;
    fs::write(&path, document + "\n")?;
    tracing::info!(path = %path.display(), "wrote schema artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_definition_field() {
        let schema = calendar_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in ["$schema", "calendarId", "startAt", "calendarName", "calendarCycle", "list"] {
            assert!(required.contains(&field), "missing {}", field);
        }
        assert_eq!(schema["properties"]["list"]["items"]["required"],
            serde_json::json!(["from", "to", "who", "year"]));
    }

    #[test]
    fn test_write_schema_uses_fixed_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), SCHEMA_FILE_NAME);
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, calendar_schema());
    }
}
