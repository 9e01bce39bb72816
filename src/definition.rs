//! Calendar definition data model
//!
//! The validated shapes read from definition and dispatch files. These are
//! plain immutable values; all arithmetic lives in [`crate::engine`] and all
//! conformance checking in [`crate::validate`].

use serde::{Deserialize, Serialize};

/// One fictional calendar: an epoch, a fixed cycle length, and era spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDefinition {
    /// Back-reference to the schema artifact, relative to the file's own directory
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Opaque identifier
    pub calendar_id: String,
    /// The instant of year 1, moment zero (strict timestamp grammar)
    pub start_at: String,
    /// Display name
    pub calendar_name: String,
    /// Real-world seconds per calendar year.
    /// Positivity is an engine precondition, not a structural invariant.
    pub calendar_cycle: i64,
    /// Era spans, in definition order
    pub list: Vec<EraEntry>,
}

/// A named era period in calendar years, inclusive on both ends.
///
/// Entries may overlap (concurrent claimants) and several entries may share
/// one `who` (a ruler renaming eras mid-reign). A `from > to` range is legal
/// and simply matches no year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraEntry {
    pub from: i64,
    pub to: i64,
    /// The era's owner (ruler, dynasty, lineage)
    pub who: String,
    /// The era name prefix (reign title)
    pub year: String,
}

impl EraEntry {
    /// Whether this entry's inclusive range covers the given year
    pub fn covers(&self, year: i64) -> bool {
        self.from <= year && year <= self.to
    }
}

/// One line of a dispatch list: a definition file and its destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchEntry {
    /// Reference to a calendar definition source file
    pub file_name: String,
    /// Destination chats, in send order
    pub send_to_chats: Vec<ChatTarget>,
}

/// A chat destination: numeric ID or string handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(i64),
    Handle(String),
}

impl std::fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{}", id),
            ChatTarget::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_entry_covers_inclusive_bounds() {
        let entry = EraEntry {
            from: 3,
            to: 7,
            who: "北朝".to_string(),
            year: "永和".to_string(),
        };
        assert!(entry.covers(3));
        assert!(entry.covers(7));
        assert!(!entry.covers(2));
        assert!(!entry.covers(8));
    }

    #[test]
    fn test_malformed_range_matches_nothing() {
        let entry = EraEntry {
            from: 9,
            to: 4,
            who: "x".to_string(),
            year: "y".to_string(),
        };
        for year in 1..12 {
            assert!(!entry.covers(year));
        }
    }

    #[test]
    fn test_chat_target_untagged_forms() {
        let targets: Vec<ChatTarget> = serde_json::from_str(r#"[-1001234, "@herald_lounge"]"#).unwrap();
        assert_eq!(targets[0], ChatTarget::Id(-1001234));
        assert_eq!(targets[1], ChatTarget::Handle("@herald_lounge".to_string()));
    }

    #[test]
    fn test_definition_round_trips_camel_case() {
        let raw = r#"{
            "$schema": "calendar.schema.json",
            "calendarId": "third-epoch",
            "startAt": "2020-01-01T00:00:00.000Z",
            "calendarName": "第三紀元",
            "calendarCycle": 86400,
            "list": [{"from": 1, "to": 10, "who": "開祖", "year": "開元"}]
        }"#;
        let def: CalendarDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(def.calendar_id, "third-epoch");
        assert_eq!(def.list.len(), 1);
        let back = serde_json::to_value(&def).unwrap();
        assert_eq!(back["calendarCycle"], 86400);
        assert_eq!(back["$schema"], "calendar.schema.json");
    }
}
