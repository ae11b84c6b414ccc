pub mod board;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod score;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use fen::FenError;
pub use movegen::*;
pub use perft::perft;
pub use score::Score;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait, implemented by move selectors
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The best move found (None if no candidate was accepted)
    pub best_move: Option<Move>,
    /// Score of `best_move`, White-positive; a floor when there is no move
    pub score: Score,
    /// Number of positions evaluated
    pub nodes: u64,
    /// Candidates discarded because they left the mover in check
    pub rejected: u32,
}

impl SearchResult {
    /// The "no move" result for `side`.
    pub fn no_move(side: Color) -> Self {
        Self {
            best_move: None,
            score: Score::floor(side),
            nodes: 0,
            rejected: 0,
        }
    }
}

/// Trait that all move selectors implement.
pub trait Engine {
    /// Pick a move for the side to move in `pos`.
    fn search(&mut self, pos: &Position) -> SearchResult;

    /// Returns the engine's name for the trace header
    fn name(&self) -> &str;
}
