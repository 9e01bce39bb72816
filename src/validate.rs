//! Structural schema validation
//!
//! Hand-rolled recursive validator for the two input shapes the herald
//! accepts: calendar definition files and dispatch lists. Validation never
//! stops at the first problem; every violation is collected into one
//! [`ValidationFailure`] with a path, a diagnostic code, and echoes of the
//! expected shape fragment and the offending value.
//!
//! Calendar files additionally carry whole-object invariants that cannot be
//! expressed as pure structure: the `$schema` self-reference must be a
//! relative path and must resolve, against the file's own directory, to the
//! one true schema artifact location. Those are checked separately but
//! surface as the same failure kind.

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::error::{ValidationFailure, Violation};
use crate::timestamp;

/// Which input contract to validate against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A calendar definition object
    Calendar,
    /// A dispatch list (array of file/chats pairs)
    DispatchList,
}

/// Expected shape of a value, described declaratively
enum Shape {
    String,
    Integer,
    /// String under the strict timestamp grammar, denoting a real date
    Timestamp,
    /// Chat destination: numeric ID or string handle
    ChatRef,
    Array(Box<Shape>),
    Object(Vec<Field>),
}

struct Field {
    name: &'static str,
    shape: Shape,
}

impl Field {
    fn new(name: &'static str, shape: Shape) -> Self {
        Self { name, shape }
    }
}

impl Shape {
    /// Echo fragment used in violation diagnostics
    fn expected(&self) -> Value {
        match self {
            Shape::String => json!("string"),
            Shape::Integer => json!("integer"),
            Shape::Timestamp => json!("timestamp"),
            Shape::ChatRef => json!("integer | string"),
            Shape::Array(inner) => json!([inner.expected()]),
            Shape::Object(fields) => {
                let mut map = Map::new();
                for field in fields {
                    map.insert(field.name.to_string(), field.shape.expected());
                }
                Value::Object(map)
            }
        }
    }
}

fn calendar_shape() -> Shape {
    Shape::Object(vec![
        Field::new("$schema", Shape::String),
        Field::new("calendarId", Shape::String),
        Field::new("startAt", Shape::Timestamp),
        Field::new("calendarName", Shape::String),
        Field::new("calendarCycle", Shape::Integer),
        Field::new(
            "list",
            Shape::Array(Box::new(Shape::Object(vec![
                Field::new("from", Shape::Integer),
                Field::new("to", Shape::Integer),
                Field::new("who", Shape::String),
                Field::new("year", Shape::String),
            ]))),
        ),
    ])
}

fn dispatch_shape() -> Shape {
    Shape::Array(Box::new(Shape::Object(vec![
        Field::new("fileName", Shape::String),
        Field::new("sendToChats", Shape::Array(Box::new(Shape::ChatRef))),
    ])))
}

/// `scheme://` prefix, the mark of a URL rather than a path
fn url_scheme() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("valid regex"))
}

/// The structural validator
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check a raw value against one of the input contracts.
    ///
    /// Collects every violation; the error is single-problem or aggregate
    /// depending on how many were found.
    pub fn validate(&self, kind: SchemaKind, value: &Value) -> Result<(), ValidationFailure> {
        let shape = match kind {
            SchemaKind::Calendar => calendar_shape(),
            SchemaKind::DispatchList => dispatch_shape(),
        };

        let mut violations = Vec::new();
        self.check(&shape, value, "", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(violations))
        }
    }

    fn check(&self, shape: &Shape, value: &Value, path: &str, out: &mut Vec<Violation>) {
        match shape {
            Shape::String => {
                if !value.is_string() {
                    out.push(self.mismatch(shape, value, path, "expected a string"));
                }
            }
            Shape::Integer => {
                if value.as_i64().is_none() {
                    out.push(self.mismatch(shape, value, path, "expected an integer"));
                }
            }
            Shape::Timestamp => match value.as_str() {
                None => out.push(self.mismatch(shape, value, path, "expected a timestamp string")),
                Some(s) if !timestamp::is_valid(s) => out.push(Violation {
                    path: path.to_string(),
                    code: "BAD_TIMESTAMP",
                    message: "not a valid timestamp (YYYY-MM-DDTHH:mm[:ss[.mmm]] with explicit offset, real date)".to_string(),
                    expected: shape.expected(),
                    actual: value.clone(),
                }),
                Some(_) => {}
            },
            Shape::ChatRef => {
                if !value.is_string() && value.as_i64().is_none() {
                    out.push(self.mismatch(shape, value, path, "expected a chat ID or handle"));
                }
            }
            Shape::Array(inner) => match value.as_array() {
                None => out.push(self.mismatch(shape, value, path, "expected an array")),
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let child = format!("{}[{}]", path, i);
                        self.check(inner, item, &child, out);
                    }
                }
            },
            Shape::Object(fields) => match value.as_object() {
                None => out.push(self.mismatch(shape, value, path, "expected an object")),
                Some(map) => {
                    for field in fields {
                        let child = if path.is_empty() {
                            field.name.to_string()
                        } else {
                            format!("{}.{}", path, field.name)
                        };
                        match map.get(field.name) {
                            None => out.push(Violation {
                                path: child,
                                code: "MISSING_FIELD",
                                message: format!("required field '{}' is missing", field.name),
                                expected: field.shape.expected(),
                                actual: Value::Null,
                            }),
                            Some(inner) => self.check(&field.shape, inner, &child, out),
                        }
                    }
                }
            },
        }
    }

    fn mismatch(&self, shape: &Shape, value: &Value, path: &str, message: &str) -> Violation {
        Violation {
            path: path.to_string(),
            code: "WRONG_TYPE",
            message: message.to_string(),
            expected: shape.expected(),
            actual: value.clone(),
        }
    }

    /// Whole-object invariants for calendar definition files.
    ///
    /// `file_dir` is the directory the payload was read from, `schema_path`
    /// the one true artifact location. Each rule fails alone, so these are
    /// always single-problem errors.
    pub fn check_schema_ref(
        &self,
        value: &Value,
        file_dir: &Path,
        schema_path: &Path,
    ) -> Result<(), ValidationFailure> {
        let reference = match value.get("$schema").and_then(Value::as_str) {
            Some(s) => s,
            None => {
                return Err(ValidationFailure::single(Violation {
                    path: "$schema".to_string(),
                    code: "SCHEMA_REF",
                    message: "payload must name its own schema".to_string(),
                    expected: json!("relative path to the schema artifact"),
                    actual: value.get("$schema").cloned().unwrap_or(Value::Null),
                }));
            }
        };

        if url_scheme().is_match(reference) {
            return Err(ValidationFailure::single(Violation {
                path: "$schema".to_string(),
                code: "SCHEMA_REF",
                message: "schema reference must be a path, not a URL".to_string(),
                expected: json!("relative path to the schema artifact"),
                actual: json!(reference),
            }));
        }

        if Path::new(reference).is_absolute() {
            return Err(ValidationFailure::single(Violation {
                path: "$schema".to_string(),
                code: "SCHEMA_REF",
                message: "schema reference must be relative, not absolute".to_string(),
                expected: json!("relative path to the schema artifact"),
                actual: json!(reference),
            }));
        }

        let resolved = normalize(&file_dir.join(reference));
        let expected_path = normalize(schema_path);
        if resolved != expected_path {
            return Err(ValidationFailure::single(Violation {
                path: "$schema".to_string(),
                code: "SCHEMA_REF",
                message: format!(
                    "schema reference resolves to '{}', not the schema artifact '{}'",
                    resolved.display(),
                    expected_path.display()
                ),
                expected: json!(expected_path.to_string_lossy()),
                actual: json!(reference),
            }));
        }

        Ok(())
    }
}

/// Lexical normalization: strips `.` components and folds `..` into their
/// parent where one exists. No filesystem access.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
