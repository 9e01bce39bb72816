//! Error types for the era herald

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type for herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Herald errors
#[derive(Error, Debug)]
pub enum HeraldError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No era data for year {year} in calendar '{calendar}'")]
    NotFound { calendar: String, year: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single validation violation, located by path
#[derive(Debug, Clone)]
pub struct Violation {
    /// Path to the offending field (e.g. `list[2].from`)
    pub path: String,
    /// Diagnostic code (e.g. `WRONG_TYPE`)
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
    /// Echo of the expected shape fragment
    pub expected: Value,
    /// Echo of the offending value
    pub actual: Value,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "$" } else { &self.path };
        write!(
            f,
            "[{}] {}: {} (expected {}, got {})",
            self.code, path, self.message, self.expected, self.actual
        )
    }
}

/// Aggregate validation failure carrying every violation found.
///
/// The rendered message distinguishes the single-problem case from the
/// multi-problem case; callers can also inspect [`ValidationFailure::is_aggregate`].
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// A failure with exactly one problem
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// True when more than one violation was collected
    pub fn is_aggregate(&self) -> bool {
        self.violations.len() > 1
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.violations.as_slice() {
            write!(f, "Validate Fail, problem: {}", only)
        } else {
            writeln!(f, "Validate Fail, problems: ")?;
            let mut first = true;
            for v in &self.violations {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{}", v)?;
                first = false;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationFailure {}
