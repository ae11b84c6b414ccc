//! Long algebraic move text (`e2e4`, `d7d8q`), as used in the move trace.

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Resolve move text against the legal moves of `pos`, so castling and
/// en-passant flags come out right. A bare promotion defaults to a queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.chars().nth(4) {
        Some(ch) => match PieceKind::from_letter(ch)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => kind,
        },
        None => PieceKind::Queen,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo.is_none_or(|p| p == promo))
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
