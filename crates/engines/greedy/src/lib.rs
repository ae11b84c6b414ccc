//! Greedy Chess Engine
//!
//! Looks one ply ahead and plays the move with the best static score.
//! The evaluation is material plus a handful of pawn-structure terms.

mod eval;
mod search;

use chess_core::{Engine, Position, SearchResult};

pub use eval::{EvalParams, Evaluation, Evaluator, PawnRules, PieceValues};
pub use search::select_best_move;

/// Hill-climbing engine: one ply, no lookahead beyond mate-in-one.
#[derive(Debug, Clone, Default)]
pub struct GreedyEngine {
    evaluator: Evaluator,
}

impl GreedyEngine {
    pub fn new(params: EvalParams) -> Self {
        Self {
            evaluator: Evaluator::new(params),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}

impl Engine for GreedyEngine {
    fn search(&mut self, pos: &Position) -> SearchResult {
        select_best_move(pos, pos.side_to_move, &self.evaluator)
    }

    fn name(&self) -> &str {
        "Greedy v1.0"
    }
}
