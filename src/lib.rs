//! Era Herald
//!
//! Converts real-world timestamps into dates under arbitrary fictional or
//! historical calendars, and renders announcements of what era/year it
//! currently is. A calendar is defined by a schema-validated JSON file: an
//! epoch instant, a fixed year length in seconds, and a list of named era
//! spans that may overlap.
//!
//! ## Features
//!
//! - **Validated data contract**: hand-rolled recursive validation with
//!   multi-error diagnostics, plus `$schema` self-reference checks
//! - **Pure calendar arithmetic**: instant → year, year → start instant,
//!   with a configurable rounding tolerance for off-boundary clocks
//! - **Era resolution**: overlapping claimants and mid-reign renames are
//!   grouped per owner and rendered together
//! - **Schema artifact**: the definition shape exported as a JSON Schema
//!   document under a fixed filename
//! - **Batch dispatch**: per-file, per-chat isolation; one failure never
//!   blocks the rest
//!
//! ## Data flow
//!
//! ```text
//! raw JSON ─▶ Validator ─▶ CalendarDefinition ─▶ CalendarEngine
//!                                                    │
//!                              announcement string ◀─┘
//!                                      │
//!                              Transport::send (per chat)
//! ```

pub mod artifact;
pub mod config;
pub mod definition;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod loader;
pub mod numerals;
pub mod timestamp;
pub mod validate;

pub use artifact::SCHEMA_FILE_NAME;
pub use config::HeraldConfig;
pub use definition::{CalendarDefinition, ChatTarget, DispatchEntry, EraEntry};
pub use dispatch::{ConsoleTransport, DispatchReport, Transport};
pub use engine::CalendarEngine;
pub use error::{HeraldError, Result, ValidationFailure, Violation};
pub use validate::{SchemaKind, Validator};
