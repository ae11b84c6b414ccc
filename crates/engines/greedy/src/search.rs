//! One-ply greedy move selection.

use chess_core::{Color, Position, Score, SearchResult, legal_moves_for, move_to_uci};
use tracing::{debug, trace};

use crate::eval::Evaluator;

/// Pick the move for `side` whose resulting position scores best: highest
/// for White, lowest for Black.
///
/// A move that mates the opponent is taken as soon as it is seen. Moves that
/// leave the mover's own king in check are skipped. Among equal scores the
/// first move in generator order wins. With no acceptable move the result
/// has no move and the floor score for `side`.
pub fn select_best_move(pos: &Position, side: Color, evaluator: &Evaluator) -> SearchResult {
    let moves = legal_moves_for(pos, side);
    let mut result = SearchResult::no_move(side);
    if moves.is_empty() {
        debug!(?side, "no legal moves");
        return result;
    }

    let mut scratch = pos.with_side_to_move(side);
    for mv in moves {
        let after = scratch.play(mv);

        if after.is_checkmate() {
            debug!(?side, mv = %move_to_uci(mv), "mate in one");
            result.best_move = Some(mv);
            result.score = Score::Mate(side);
            return result;
        }

        if after.in_check(side) {
            trace!(mv = %move_to_uci(mv), "leaves own king in check");
            result.rejected += 1;
            continue;
        }

        let score = Score::Eval(evaluator.evaluate(&after));
        result.nodes += 1;
        trace!(mv = %move_to_uci(mv), %score, "candidate");

        if score.improves_on(result.score, side) {
            result.best_move = Some(mv);
            result.score = score;
        }
    }

    debug!(
        ?side,
        best = ?result.best_move.map(move_to_uci),
        score = %result.score,
        nodes = result.nodes,
        rejected = result.rejected,
        "greedy search done"
    );
    result
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
