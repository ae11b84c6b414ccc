use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Outcome of a position from the rules' point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Legal moves for `side`, whether or not it is that side's turn.
pub fn legal_moves_for(pos: &Position, side: Color) -> Vec<Move> {
    let mut tmp = pos.with_side_to_move(side);
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| !pos.play(mv).in_check(mover));
}

impl Position {
    pub fn has_legal_move(&self) -> bool {
        !legal_moves(self).is_empty()
    }

    /// Side to move is in check and cannot escape.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    /// Side to move has no legal move but is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    pub fn status(&self) -> GameStatus {
        if self.has_legal_move() {
            GameStatus::Ongoing
        } else if self.is_check() {
            GameStatus::Checkmate {
                winner: self.side_to_move.other(),
            }
        } else {
            GameStatus::Stalemate
        }
    }
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(p) if p.color == pos.side_to_move => p,
            _ => continue,
        };
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
            PieceKind::Knight => gen_steps(pos, from, pc.color, out, &KNIGHT_DELTAS),
            PieceKind::Bishop => gen_slider(pos, from, pc.color, out, &DIAGONALS),
            PieceKind::Rook => gen_slider(pos, from, pc.color, out, &ORTHOGONALS),
            PieceKind::Queen => {
                gen_slider(pos, from, pc.color, out, &DIAGONALS);
                gen_slider(pos, from, pc.color, out, &ORTHOGONALS);
            }
            PieceKind::King => {
                gen_steps(pos, from, pc.color, out, &KING_DELTAS);
                gen_castle(pos, from, pc.color, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PROMOTIONS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();
    let (start_rank, promo_rank) = match c {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to)
                && sq(f + df, r).and_then(|s| pos.piece_at(s))
                    == Some(Piece::new(c.other(), PieceKind::Pawn)) =>
            {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// One castling option: rights flag, rook home, king target, squares that
/// must be empty, squares the king crosses that must not be attacked.
struct CastleOption {
    allowed: bool,
    rook: u8,
    king_to: u8,
    empty: &'static [u8],
    safe: &'static [u8],
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (king_home, options) = match c {
        Color::White => (
            4u8,
            [
                CastleOption {
                    allowed: pos.castling.wk,
                    rook: 7,
                    king_to: 6,
                    empty: &[5, 6],
                    safe: &[5, 6],
                },
                CastleOption {
                    allowed: pos.castling.wq,
                    rook: 0,
                    king_to: 2,
                    empty: &[3, 2, 1],
                    safe: &[3, 2],
                },
            ],
        ),
        Color::Black => (
            60u8,
            [
                CastleOption {
                    allowed: pos.castling.bk,
                    rook: 63,
                    king_to: 62,
                    empty: &[61, 62],
                    safe: &[61, 62],
                },
                CastleOption {
                    allowed: pos.castling.bq,
                    rook: 56,
                    king_to: 58,
                    empty: &[59, 58, 57],
                    safe: &[59, 58],
                },
            ],
        ),
    };
    // Can't castle out of check
    if from != king_home || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    for opt in options {
        if opt.allowed
            && pos.piece_at(opt.rook) == Some(Piece::new(c, PieceKind::Rook))
            && opt.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && opt.safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(from, opt.king_to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
