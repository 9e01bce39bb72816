//! Announcement dispatch
//!
//! The orchestration layer: walk a dispatch list, resolve each calendar's
//! current year, render the announcement, and push it to every destination
//! chat through a [`Transport`] capability. Every outcome is logged with a
//! severity; no item's failure aborts the rest of the batch.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::definition::{ChatTarget, DispatchEntry};
use crate::engine::CalendarEngine;
use crate::loader;

/// Outbound message capability. Network transports live outside this crate;
/// the herald only needs "send text to chat, tell me if it worked".
pub trait Transport {
    fn send(&self, chat: &ChatTarget, text: &str) -> anyhow::Result<()>;
}

/// Dry-run transport that prints announcements to stdout.
#[derive(Debug, Default)]
pub struct ConsoleTransport;

impl Transport for ConsoleTransport {
    fn send(&self, chat: &ChatTarget, text: &str) -> anyhow::Result<()> {
        println!("--- to {} ---\n{}", chat, text);
        Ok(())
    }
}

/// Aggregate outcome of one dispatch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// Messages delivered
    pub sent: usize,
    /// Definitions whose current instant fell between years
    pub skipped: usize,
    /// Load, resolution, or send failures
    pub failed: usize,
}

/// Process a dispatch list against `now`.
///
/// Definition files are resolved relative to `calendars_dir`; their
/// `$schema` references must point at `schema_path`. Each definition and
/// each chat is handled independently.
pub fn run(
    entries: &[DispatchEntry],
    calendars_dir: &Path,
    schema_path: &Path,
    now: DateTime<Utc>,
    deviation_fix_digits: u32,
    transport: &dyn Transport,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for entry in entries {
        let path = calendars_dir.join(&entry.file_name);

        let definition = match loader::load_calendar(&path, schema_path) {
            Ok(definition) => definition,
            Err(err) => {
                tracing::error!(file = %entry.file_name, %err, "failed to load calendar");
                report.failed += 1;
                continue;
            }
        };
        let engine = match CalendarEngine::new(&definition) {
            Ok(engine) => engine,
            Err(err) => {
                tracing::error!(file = %entry.file_name, %err, "unusable calendar definition");
                report.failed += 1;
                continue;
            }
        };

        let year = match engine.year_from_instant(now, deviation_fix_digits) {
            Ok(Some(year)) => year,
            Ok(None) => {
                tracing::info!(file = %entry.file_name, "between calendar years, nothing to announce");
                report.skipped += 1;
                continue;
            }
            Err(err) => {
                tracing::error!(file = %entry.file_name, %err, "year conversion failed");
                report.failed += 1;
                continue;
            }
        };

        let text = match engine.announce(year) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(file = %entry.file_name, year, %err, "no announcement for year");
                report.failed += 1;
                continue;
            }
        };

        for chat in &entry.send_to_chats {
            match transport.send(chat, &text) {
                Ok(()) => {
                    tracing::info!(file = %entry.file_name, %chat, year, "announcement sent");
                    report.sent += 1;
                }
                Err(err) => {
                    tracing::warn!(file = %entry.file_name, %chat, %err, "send failed");
                    report.failed += 1;
                }
            }
        }
    }

    report
}
