// Unit tests for the replay module
//
// Tests the core functionality of the replay engine including:
// - Loading JSONL log files
// - Re-running the engine on recorded turns
// - Validating expected columns
// - Generating statistics

use connect_four_bot::config::Config;
use connect_four_bot::replay::ReplayEngine;
use std::path::PathBuf;

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

#[test]
fn test_load_log_file_forced_win() {
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let entries = engine
        .load_log_file(fixture_path("forced_win.jsonl"))
        .expect("Failed to load forced_win.jsonl");

    assert_eq!(entries.len(), 2, "Expected 2 log entries");
    assert_eq!(entries[0].turn, 0, "First entry should be turn 0");
    assert_eq!(entries[0].chosen_column, 3, "First move should be column 3");
    assert_eq!(entries[1].turn, 1, "Second entry should be turn 1");
    assert_eq!(entries[1].chosen_column, 3, "Second move should be column 3");
}

#[test]
fn test_load_log_file_missing_file() {
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let result = engine.load_log_file(fixture_path("does_not_exist.jsonl"));
    assert!(result.is_err());
}

#[test]
fn test_replay_all_forced_win_matches() {
    // Both recorded turns are forced decisions (complete our four / block
    // the opponent's four), so a deterministic engine must reproduce them.
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let entries = engine
        .load_log_file(fixture_path("forced_win.jsonl"))
        .expect("Failed to load forced_win.jsonl");

    let results = engine
        .replay_all(&entries)
        .expect("Failed to replay all turns");

    assert_eq!(results.len(), 2, "Should have replayed both turns");
    for result in &results {
        assert!(
            result.matches,
            "Turn {} should match: recorded {}, replayed {}",
            result.turn, result.original_column, result.replayed_column
        );
    }

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 2);
    assert_eq!(stats.matches, 2);
    assert_eq!(stats.mismatches, 0);
    assert!((stats.match_rate - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_replay_detects_mismatch() {
    // The mismatch fixture records column 6 on a board where the engine
    // must complete four at column 3.
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let entries = engine
        .load_log_file(fixture_path("mismatch.jsonl"))
        .expect("Failed to load mismatch.jsonl");

    let results = engine
        .replay_all(&entries)
        .expect("Failed to replay all turns");

    assert_eq!(results.len(), 1);
    assert!(!results[0].matches, "Recorded column 6 must not match");
    assert_eq!(results[0].replayed_column, 3);

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.mismatches, 1);
}

#[test]
fn test_replay_turns_subset() {
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let entries = engine
        .load_log_file(fixture_path("forced_win.jsonl"))
        .expect("Failed to load forced_win.jsonl");

    let results = engine
        .replay_turns(&entries, &[1])
        .expect("Failed to replay turn 1");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].turn, 1);
}

#[test]
fn test_replay_turns_missing_turn() {
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let entries = engine
        .load_log_file(fixture_path("forced_win.jsonl"))
        .expect("Failed to load forced_win.jsonl");

    let result = engine.replay_turns(&entries, &[42]);
    assert!(result.is_err(), "Replaying an unknown turn should fail");
}

#[test]
fn test_validate_expected_moves() {
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let entries = engine
        .load_log_file(fixture_path("forced_win.jsonl"))
        .expect("Failed to load forced_win.jsonl");

    // Both recorded turns chose column 3
    engine
        .validate_expected_moves(&entries, &[(0, vec![3]), (1, vec![2, 3])])
        .expect("Recorded columns should validate");

    let result = engine.validate_expected_moves(&entries, &[(0, vec![1])]);
    assert!(result.is_err(), "Wrong expected column should fail");

    let result = engine.validate_expected_moves(&entries, &[(42, vec![3])]);
    assert!(result.is_err(), "Unknown turn should fail");
}

#[test]
fn test_generate_stats_empty() {
    let config = Config::default_hardcoded();
    let engine = ReplayEngine::new(config, false);

    let stats = engine.generate_stats(&[]);
    assert_eq!(stats.total_turns, 0);
    assert_eq!(stats.matches, 0);
    assert!((stats.match_rate - 0.0).abs() < f64::EPSILON);
}
