use super::*;
use chess_core::{Color, FenError};
use greedy_engine::PawnRules;

#[test]
fn test_defaults() {
    let config = DriverConfig::default();
    assert_eq!(config.moves, 3);
    assert_eq!(config.eval, EvalParams::default());
    let pos = config.start_position().unwrap();
    assert_eq!(pos.side_to_move, Color::White);
}

#[test]
fn test_empty_file_is_default() {
    assert_eq!(DriverConfig::from_toml_str("").unwrap(), DriverConfig::default());
}

#[test]
fn test_partial_file() {
    let config = DriverConfig::from_toml_str(
        r#"
        moves = 10

        [eval]
        rules = "legacy"
        center_advance = 6
        "#,
    )
    .unwrap();
    assert_eq!(config.moves, 10);
    assert_eq!(config.fen, DEFAULT_FEN);
    assert_eq!(config.eval.rules, PawnRules::Legacy);
    assert_eq!(config.eval.center_advance, 6);
    assert_eq!(config.eval.doubled_pawn, -12);
}

#[test]
fn test_bad_toml_is_config_error() {
    let err = DriverConfig::from_toml_str("moves = \"three\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let err = DriverConfig::from_toml_str("[eval]\nrules = \"sideways\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_bad_fen_fails_at_startup() {
    let config = DriverConfig {
        fen: "not a fen".to_string(),
        ..DriverConfig::default()
    };
    match config.start_position() {
        Err(Error::Fen { fen, source }) => {
            assert_eq!(fen, "not a fen");
            assert_eq!(source, FenError::MissingFields(3));
        }
        other => panic!("expected FEN error, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let err = DriverConfig::load(Path::new("/nonexistent/hill_climb.toml")).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}
