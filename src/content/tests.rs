use std::path::Path;

use super::*;

const SHIPPED_TUNING: &str = include_str!("../../assets/data/movement.ron");

// ----------------------------------------------------------------------------
// Parsing
// ----------------------------------------------------------------------------

#[test]
fn test_shipped_tuning_matches_defaults() {
    let tuning = parse_movement_tuning(SHIPPED_TUNING, "movement.ron").expect("shipped file parses");
    assert_eq!(tuning, MovementTuning::default());
}

#[test]
fn test_omitted_fields_keep_defaults() {
    let tuning = parse_movement_tuning(
        "(schema_version: 1, movement: (gravity: 0.002, friction: (base_factor: 0.5)))",
        "inline",
    )
    .expect("partial file parses");

    let defaults = MovementTuning::default();
    assert_eq!(tuning.gravity, 0.002);
    assert_eq!(tuning.friction.base_factor, 0.5);
    assert_eq!(tuning.friction.decel_factor, defaults.friction.decel_factor);
    assert_eq!(tuning.jump_velocity, defaults.jump_velocity);
    assert_eq!(tuning.weapons, defaults.weapons);
}

#[test]
fn test_missing_movement_block_gives_defaults() {
    let tuning = parse_movement_tuning("(schema_version: 1)", "inline").expect("parses");
    assert_eq!(tuning, MovementTuning::default());
}

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

#[test]
fn test_wrong_schema_version_is_rejected() {
    let err = parse_movement_tuning("(schema_version: 99)", "old.ron").unwrap_err();
    assert_eq!(err.file, "old.ron");
    assert!(err.message.contains("schema_version 99"));
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let err = parse_movement_tuning("(schema_version: ", "broken.ron").unwrap_err();
    assert!(err.message.starts_with("Parse error"));
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = parse_movement_tuning(
        "(schema_version: 1, movement: (body_height: 0.0, jump_velocity: 0.3))",
        "bad.ron",
    )
    .unwrap_err();
    assert!(err.message.contains("body_height"));
    assert!(err.message.contains("jump_velocity"));
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = load_movement_tuning(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

// ----------------------------------------------------------------------------
// Validation
// ----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_crouch_ratio_out_of_range_is_flagged() {
    let tuning = MovementTuning {
        crouch_height_ratio: 1.5,
        ..MovementTuning::default()
    };
    let issues = validate_tuning(&tuning);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "crouch_height_ratio");
}

#[test]
fn test_zero_boost_distance_is_flagged() {
    let mut tuning = MovementTuning::default();
    tuning.jump_boost.max_distance = 0.0;
    let issues = validate_tuning(&tuning);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "jump_boost.max_distance");
}
