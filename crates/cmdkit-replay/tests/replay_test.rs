//! End-to-end replay through a script file on disk.

use std::path::PathBuf;

use cmdkit_core::error::CommandError;
use cmdkit_core::registry::TargetId;
use cmdkit_game_state::domain::state::GameState;
use cmdkit_replay::config::ReplayConfig;
use cmdkit_replay::error::ReplayError;
use cmdkit_replay::replay::{self, Session};
use uuid::Uuid;

fn temp_script_path() -> PathBuf {
    std::env::temp_dir().join(format!("cmdkit-replay-{}.bin", Uuid::new_v4()))
}

#[test]
fn test_run_replays_recorded_session_from_disk() {
    // Arrange
    let config = ReplayConfig {
        script_path: temp_script_path(),
        undo: false,
    };

    // Act
    let report = replay::run(&config).unwrap();
    std::fs::remove_file(&config.script_path).unwrap();

    // Assert
    assert_eq!(report.commands, 4);
    assert_eq!(report.undone, 0);
    assert_eq!(report.final_state, report.recorded_state);
    assert_eq!(
        report.final_state,
        GameState {
            number_of_enemies: 4,
            number_of_players: 4,
        }
    );
}

#[test]
fn test_run_with_undo_reverts_reversible_commands() {
    // Arrange
    let config = ReplayConfig {
        script_path: temp_script_path(),
        undo: true,
    };

    // Act
    let report = replay::run(&config).unwrap();
    std::fs::remove_file(&config.script_path).unwrap();

    // Assert
    assert_eq!(report.undone, 2);
    assert_eq!(
        report.final_state,
        GameState {
            number_of_enemies: 3,
            number_of_players: 1,
        }
    );
}

#[test]
fn test_report_renders_as_json() {
    // Arrange
    let config = ReplayConfig {
        script_path: temp_script_path(),
        undo: false,
    };
    let report = replay::run(&config).unwrap();
    std::fs::remove_file(&config.script_path).unwrap();

    // Act
    let json = serde_json::to_value(&report).unwrap();

    // Assert
    assert_eq!(json["commands"], 4);
    assert_eq!(json["final_state"]["number_of_players"], 4);
}

#[test]
fn test_read_script_missing_file_is_io_error() {
    let session = Session::new(TargetId::random()).unwrap();

    let result = replay::read_script(&temp_script_path(), &session.registry);

    assert!(matches!(result, Err(ReplayError::Io(_))));
}

#[test]
fn test_read_script_corrupted_file_is_deserialization_error() {
    // Arrange
    let path = temp_script_path();
    std::fs::write(&path, b"not a command script").unwrap();
    let session = Session::new(TargetId::random()).unwrap();

    // Act
    let result = replay::read_script(&path, &session.registry);
    std::fs::remove_file(&path).unwrap();

    // Assert
    assert!(matches!(
        result,
        Err(ReplayError::Command(CommandError::Deserialization(_)))
    ));
}
