//! Search scores, always read from White's point of view.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// A White-positive score.
///
/// Mate and "nothing found" are tags rather than float infinities, so two
/// of them never compare ambiguously.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Score {
    /// Static evaluation in centipawns.
    Eval(i32),
    /// The given color has delivered checkmate.
    Mate(Color),
    /// Worst possible value for the given side; the seed a search starts
    /// from and what it reports when no move was accepted.
    Floor(Color),
}

impl Score {
    /// Starting value for a search on behalf of `side`.
    pub fn floor(side: Color) -> Self {
        Score::Floor(side)
    }

    /// Whether `self` is strictly better than `other` for `side`.
    /// White prefers larger scores, Black smaller ones.
    pub fn improves_on(self, other: Score, side: Color) -> bool {
        match side {
            Color::White => self > other,
            Color::Black => self < other,
        }
    }

    /// Pawn units, with mates and floors mapped to infinities.
    pub fn as_pawns(self) -> f64 {
        match self {
            Score::Eval(cp) => f64::from(cp) / 100.0,
            Score::Mate(Color::White) | Score::Floor(Color::Black) => f64::INFINITY,
            Score::Mate(Color::Black) | Score::Floor(Color::White) => f64::NEG_INFINITY,
        }
    }

    fn rank(self) -> (i8, i32) {
        match self {
            Score::Floor(Color::White) => (-3, 0),
            Score::Mate(Color::Black) => (-2, 0),
            Score::Eval(cp) => (0, cp),
            Score::Mate(Color::White) => (2, 0),
            Score::Floor(Color::Black) => (3, 0),
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Eval(cp) => write!(f, "{:+.2}", f64::from(*cp) / 100.0),
            Score::Mate(Color::White) => f.write_str("+inf (White mates)"),
            Score::Mate(Color::Black) => f.write_str("-inf (Black mates)"),
            Score::Floor(Color::White) => f.write_str("-inf"),
            Score::Floor(Color::Black) => f.write_str("+inf"),
        }
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod score_tests;
