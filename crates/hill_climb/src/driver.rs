//! Turn loop: ask the engine, play its move, print the board.

use std::fmt;
use std::io::Write;
use std::path::Path;

use chess_core::{Color, Engine, GameStatus, Position, Score, move_to_uci};
use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// One applied move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlyRecord {
    /// 1-based index in the game
    pub ply: u32,
    pub side: Color,
    pub uci: String,
    pub score: Score,
    pub fen_after: String,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEnd {
    BudgetExhausted,
    Checkmate { winner: Color },
    Stalemate,
    /// Legal moves exist but the engine accepted none of them
    NoAcceptableMove,
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnd::BudgetExhausted => f.write_str("move budget exhausted"),
            GameEnd::Checkmate { winner } => write!(f, "checkmate, {winner:?} wins"),
            GameEnd::Stalemate => f.write_str("stalemate"),
            GameEnd::NoAcceptableMove => f.write_str("no acceptable move"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameTrace {
    pub engine: String,
    pub start_fen: String,
    pub plies: Vec<PlyRecord>,
    pub end: GameEnd,
}

impl GameTrace {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn ordinal_heading(i: u32) -> String {
    match i {
        1 => "First move:".to_string(),
        n => format!("Move {n}:"),
    }
}

/// Play up to `moves` greedy moves on `pos`, writing the human-readable
/// trace to `out`. Stops early when the side to move has no move.
pub fn run_game<W: Write>(
    pos: &mut Position,
    engine: &mut dyn Engine,
    moves: u32,
    out: &mut W,
) -> Result<GameTrace> {
    let mut trace = GameTrace {
        engine: engine.name().to_string(),
        start_fen: pos.to_fen(),
        plies: Vec::new(),
        end: GameEnd::BudgetExhausted,
    };

    writeln!(out, "Starting position:")?;
    writeln!(out, "{pos}")?;

    for ply in 1..=moves {
        let side = pos.side_to_move;
        writeln!(out, "{}", ordinal_heading(ply))?;

        let result = engine.search(pos);
        let Some(mv) = result.best_move else {
            trace.end = match pos.status() {
                GameStatus::Checkmate { winner } => GameEnd::Checkmate { winner },
                GameStatus::Stalemate => GameEnd::Stalemate,
                GameStatus::Ongoing => GameEnd::NoAcceptableMove,
            };
            writeln!(out, "No valid move found ({})", trace.end)?;
            info!(ply, ?side, end = %trace.end, "game stopped");
            return Ok(trace);
        };

        let uci = move_to_uci(mv);
        writeln!(out, "Best move: {uci}")?;
        writeln!(out, "Score: {}", result.score)?;
        info!(ply, ?side, mv = %uci, score = %result.score, nodes = result.nodes, "move played");

        pos.make_move(mv);
        writeln!(out, "{pos}")?;

        trace.plies.push(PlyRecord {
            ply,
            side,
            uci,
            score: result.score,
            fen_after: pos.to_fen(),
        });
    }

    Ok(trace)
}
