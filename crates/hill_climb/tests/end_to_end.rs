//! Full driver runs against the greedy engine.

use chess_core::{Color, Engine, Position, Score, SearchResult};
use greedy_engine::{EvalParams, GreedyEngine, PawnRules};
use hill_climb::{DEFAULT_FEN, DriverConfig, GameEnd, run_game};

fn play(fen: &str, moves: u32, engine: &mut dyn Engine) -> (hill_climb::GameTrace, String, Position) {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut out = Vec::new();
    let trace = run_game(&mut pos, engine, moves, &mut out).unwrap();
    (trace, String::from_utf8(out).unwrap(), pos)
}

#[test]
fn default_position_three_moves() {
    for rules in [PawnRules::Corrected, PawnRules::Legacy] {
        let mut engine = GreedyEngine::new(EvalParams {
            rules,
            ..EvalParams::default()
        });
        let (trace, text, end_pos) = play(DEFAULT_FEN, 3, &mut engine);

        assert!(text.starts_with("Starting position:\n"));
        assert_eq!(trace.start_fen, DEFAULT_FEN);
        assert!(trace.plies.len() <= 3);
        assert_eq!(text.matches("Best move: ").count(), trace.plies.len());
        assert_eq!(text.matches("Score: ").count(), trace.plies.len());

        if trace.plies.len() == 3 {
            assert_eq!(trace.end, GameEnd::BudgetExhausted);
        } else {
            assert!(!end_pos.has_legal_move());
            assert!(text.contains("No valid move found"));
        }

        // Sides alternate starting with White, and each record matches the board
        for (i, ply) in trace.plies.iter().enumerate() {
            let expected = if i % 2 == 0 { Color::White } else { Color::Black };
            assert_eq!(ply.side, expected);
            assert_eq!(ply.ply, i as u32 + 1);
            Position::from_fen(&ply.fen_after).unwrap();
        }
        if let Some(last) = trace.plies.last() {
            assert_eq!(last.fen_after, end_pos.to_fen());
        }
    }
}

#[test]
fn replaying_the_trace_reaches_the_same_position() {
    let mut engine = GreedyEngine::default();
    let (trace, _, end_pos) = play(DEFAULT_FEN, 3, &mut engine);

    let mut pos = Position::from_fen(DEFAULT_FEN).unwrap();
    for ply in &trace.plies {
        let mv = chess_core::parse_uci_move(&pos, &ply.uci).unwrap();
        pos.make_move(mv);
    }
    assert_eq!(pos, end_pos);
}

#[test]
fn stops_after_delivering_mate() {
    let mut engine = GreedyEngine::default();
    let (trace, text, end_pos) = play("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 3, &mut engine);

    assert_eq!(trace.plies.len(), 1);
    assert_eq!(trace.plies[0].uci, "e1e8");
    assert_eq!(trace.plies[0].score, Score::Mate(Color::White));
    assert_eq!(
        trace.end,
        GameEnd::Checkmate {
            winner: Color::White
        }
    );
    assert!(end_pos.is_checkmate());
    assert!(text.contains("Score: +inf"));
    assert!(text.contains("No valid move found (checkmate, White wins)"));
}

#[test]
fn stalemate_before_first_move() {
    let mut engine = GreedyEngine::default();
    let (trace, text, _) = play("k5r1/8/8/8/8/8/r7/7K w - - 0 1", 3, &mut engine);
    assert!(trace.plies.is_empty());
    assert_eq!(trace.end, GameEnd::Stalemate);
    assert!(text.contains("No valid move found (stalemate)"));
}

#[test]
fn zero_budget_prints_only_the_board() {
    let mut engine = GreedyEngine::default();
    let (trace, text, end_pos) = play(DEFAULT_FEN, 0, &mut engine);
    assert!(trace.plies.is_empty());
    assert_eq!(trace.end, GameEnd::BudgetExhausted);
    assert_eq!(text.lines().count(), 9);
    assert_eq!(end_pos.to_fen(), DEFAULT_FEN);
}

/// Refuses every position, as a selector with a stricter legality test might.
struct Refuser;

impl Engine for Refuser {
    fn search(&mut self, pos: &Position) -> SearchResult {
        SearchResult {
            rejected: chess_core::legal_moves(pos).len() as u32,
            ..SearchResult::no_move(pos.side_to_move)
        }
    }

    fn name(&self) -> &str {
        "Refuser"
    }
}

#[test]
fn engine_without_a_move_ends_the_game() {
    let (trace, text, _) = play(DEFAULT_FEN, 3, &mut Refuser);
    assert_eq!(trace.end, GameEnd::NoAcceptableMove);
    assert!(text.contains("No valid move found (no acceptable move)"));
}

#[test]
fn trace_serializes_to_json() {
    let mut engine = GreedyEngine::default();
    let (trace, _, _) = play("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 2, &mut engine);
    let json: serde_json::Value = serde_json::from_str(&trace.to_json().unwrap()).unwrap();

    assert_eq!(json["engine"], "Greedy v1.0");
    assert_eq!(json["plies"][0]["uci"], "e1e8");
    assert_eq!(json["plies"][0]["score"]["Mate"], "White");
    assert_eq!(json["end"]["kind"], "checkmate");
    assert_eq!(json["end"]["winner"], "White");
}

#[test]
fn config_drives_the_engine() {
    let config = DriverConfig::from_toml_str(
        r#"
        fen = "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1"
        moves = 1
        "#,
    )
    .unwrap();
    let mut pos = config.start_position().unwrap();
    let mut engine = GreedyEngine::new(config.eval.clone());
    let trace = run_game(&mut pos, &mut engine, config.moves, &mut std::io::sink()).unwrap();
    assert_eq!(trace.plies.len(), 1);
    assert_eq!(trace.plies[0].uci, "d1d5");
    assert_eq!(trace.plies[0].score, Score::Eval(500));
}

#[test]
fn huge_budget_on_a_finished_game() {
    let mut engine = GreedyEngine::default();
    let (trace, _, _) = play("k5r1/8/8/8/8/8/r7/7K w - - 0 1", u32::MAX, &mut engine);
    assert!(trace.plies.is_empty());
    assert_eq!(trace.end, GameEnd::Stalemate);
}
