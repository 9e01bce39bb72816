//! Contract tests over the committed fixture files
//!
//! Exercises loading, multi-error diagnostics, `$schema` resolution, batch
//! isolation, and agreement between the generated schema artifact and the
//! hand-rolled validator.

use std::path::{Path, PathBuf};

use era_herald::{artifact, loader, HeraldError};
use serde_json::Value;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn calendars() -> PathBuf {
    fixtures().join("calendars")
}

fn schema_path() -> PathBuf {
    calendars().join(era_herald::SCHEMA_FILE_NAME)
}

#[test]
fn committed_artifact_matches_generator() {
    let committed: Value =
        serde_json::from_str(include_str!("fixtures/calendars/calendar.schema.json")).unwrap();
    assert_eq!(
        committed,
        artifact::calendar_schema(),
        "fixture artifact is out of sync; regenerate with herald-export"
    );
}

#[test]
fn valid_definition_loads() {
    let def = loader::load_calendar(&calendars().join("third-epoch.json"), &schema_path()).unwrap();
    assert_eq!(def.calendar_id, "third-epoch");
    assert_eq!(def.calendar_cycle, 604800);
    assert_eq!(def.list.len(), 3);
}

#[test]
fn offset_epoch_without_seconds_loads() {
    let def = loader::load_calendar(&calendars().join("twin-courts.json"), &schema_path()).unwrap();
    assert_eq!(def.start_at, "1987-04-01T09:00+09:00");
}

#[test]
fn missing_field_is_single_problem() {
    let err = loader::load_calendar(&calendars().join("missing-cycle.json"), &schema_path())
        .unwrap_err();
    match err {
        HeraldError::Validation(failure) => {
            assert!(!failure.is_aggregate());
            assert_eq!(failure.violations[0].code, "MISSING_FIELD");
            assert_eq!(failure.violations[0].path, "calendarCycle");
            assert!(failure.to_string().starts_with("Validate Fail, problem: "));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn url_schema_ref_is_single_problem() {
    let err = loader::load_calendar(&calendars().join("bad-schema-ref.json"), &schema_path())
        .unwrap_err();
    match err {
        HeraldError::Validation(failure) => {
            assert!(!failure.is_aggregate());
            assert_eq!(failure.violations[0].code, "SCHEMA_REF");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn batch_validation_isolates_failures() {
    let outcomes = loader::validate_dir(&calendars(), &schema_path());

    // The artifact itself is skipped; walk order is by file name
    let names: Vec<String> = outcomes
        .iter()
        .map(|(p, _)| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "bad-schema-ref.json",
            "missing-cycle.json",
            "third-epoch.json",
            "twin-courts.json"
        ]
    );
    assert!(outcomes[0].1.is_err());
    assert!(outcomes[1].1.is_err());
    assert!(outcomes[2].1.is_ok());
    assert!(outcomes[3].1.is_ok());
}

#[test]
fn artifact_and_validator_agree_on_fixtures() {
    let schema = artifact::calendar_schema();
    let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();

    let good: Value =
        serde_json::from_str(include_str!("fixtures/calendars/third-epoch.json")).unwrap();
    assert!(compiled.is_valid(&good));

    let bad: Value =
        serde_json::from_str(include_str!("fixtures/calendars/missing-cycle.json")).unwrap();
    assert!(!compiled.is_valid(&bad));
}

#[test]
fn dispatch_list_fixture_loads() {
    let entries = loader::load_dispatch_list(&fixtures().join("send.json")).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].file_name, "third-epoch.json");
    assert_eq!(entries[0].send_to_chats.len(), 2);
}
