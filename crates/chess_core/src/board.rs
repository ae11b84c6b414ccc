use std::fmt;
use std::ops::Deref;

use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Position {
    /// Board with no pieces, White to move.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position {
            castling: CastlingRights::all(),
            ..Position::empty()
        };

        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// The same position seen from the other side: ranks flipped, colors
    /// swapped, the other side to move.
    pub fn mirrored(&self) -> Position {
        let mut board = [None; 64];
        for (s, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                board[flip_rank(s as u8) as usize] = Some(Piece::new(pc.color.other(), pc.kind));
            }
        }
        Position {
            board,
            side_to_move: self.side_to_move.other(),
            castling: CastlingRights {
                wk: self.castling.bk,
                wq: self.castling.bq,
                bk: self.castling.wk,
                bq: self.castling.wq,
            },
            en_passant: self.en_passant.map(flip_rank),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Copy with the turn handed to `side`. Handing the turn over forfeits
    /// any en-passant right of the other side.
    pub fn with_side_to_move(&self, side: Color) -> Position {
        let mut p = self.clone();
        if p.side_to_move != side {
            p.side_to_move = side;
            p.en_passant = None;
        }
        p
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| self.board[s as usize] == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    /// Whether a pawn of color `by` attacks `target`.
    pub fn is_attacked_by_pawn(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        // an attacking pawn sits one step behind the target from its own side
        let from_rank = rank_of(target) - by.forward();
        [-1, 1].into_iter().any(|df| {
            sq(tf + df, from_rank).and_then(|s| self.piece_at(s))
                == Some(Piece::new(by, PieceKind::Pawn))
        })
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        if self.is_attacked_by_pawn(target, by) {
            return true;
        }

        let tf = file_of(target);
        let tr = rank_of(target);
        let stepper = |deltas: &[(i8, i8)], kind: PieceKind| {
            deltas.iter().any(|(df, dr)| {
                sq(tf + df, tr + dr).and_then(|s| self.piece_at(s)) == Some(Piece::new(by, kind))
            })
        };
        if stepper(&KNIGHT_DELTAS[..], PieceKind::Knight)
            || stepper(&KING_DELTAS[..], PieceKind::King)
        {
            return true;
        }

        let slider = |dirs: &[(i8, i8)], kind: PieceKind| {
            dirs.iter().any(|(df, dr)| {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        return pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen);
                    }
                    f += df;
                    r += dr;
                }
                false
            })
        };
        slider(&DIAGONALS[..], PieceKind::Bishop) || slider(&ORTHOGONALS[..], PieceKind::Rook)
    }

    /// Apply `mv` and return what `unmake_move` needs to take it back.
    ///
    /// # Panics
    ///
    /// Panics if `mv.from` is empty. Moves from `legal_moves` always
    /// satisfy this.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            // the captured pawn sits behind the destination square
            if let Some(cs) = sq(file_of(to), rank_of(to) - moved.color.forward()) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if is_promotion(moved, to) {
            let promo = mv.promo.unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(moved.color, promo)));
        }

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            if let Some((rf, rt)) = castle_rook_squares(moved.color, from, to) {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        self.revoke_castling(moved, from);
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            self.revoke_castling(cp, to);
        }

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // moved_piece is the pre-promotion piece, so this also reverts promotions
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Apply `mv` for the lifetime of the returned guard. The move is undone
    /// when the guard is dropped, whichever way the caller leaves its scope.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.make_move(mv);
        MoveGuard {
            pos: self,
            mv,
            undo: Some(undo),
        }
    }

    /// Clear castling rights tied to `pc` leaving or being captured on `at`.
    fn revoke_castling(&mut self, pc: Piece, at: u8) {
        match (pc.color, pc.kind, at) {
            (Color::White, PieceKind::King, _) => {
                self.castling.wk = false;
                self.castling.wq = false;
            }
            (Color::Black, PieceKind::King, _) => {
                self.castling.bk = false;
                self.castling.bq = false;
            }
            (Color::White, PieceKind::Rook, 0) => self.castling.wq = false,
            (Color::White, PieceKind::Rook, 7) => self.castling.wk = false,
            (Color::Black, PieceKind::Rook, 56) => self.castling.bq = false,
            (Color::Black, PieceKind::Rook, 63) => self.castling.bk = false,
            _ => {}
        }
    }
}

fn is_promotion(pc: Piece, to: u8) -> bool {
    pc.kind == PieceKind::Pawn
        && match pc.color {
            Color::White => rank_of(to) == 7,
            Color::Black => rank_of(to) == 0,
        }
}

fn castle_rook_squares(c: Color, king_from: u8, king_to: u8) -> Option<(u8, u8)> {
    match (c, king_from, king_to) {
        (Color::White, 4, 6) => Some((7, 5)),
        (Color::White, 4, 2) => Some((0, 3)),
        (Color::Black, 60, 62) => Some((63, 61)),
        (Color::Black, 60, 58) => Some((56, 59)),
        _ => None,
    }
}

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A move applied to a borrowed position. Read the position through the
/// guard; dropping it restores the position exactly.
pub struct MoveGuard<'a> {
    pos: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

impl MoveGuard<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.pos
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.unmake_move(self.mv, undo);
        }
    }
}

/// Eight lines, rank 8 first, pieces as FEN letters and `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                if file > 0 {
                    f.write_str(" ")?;
                }
                let ch = self.board[(rank * 8 + file) as usize].map_or('.', Piece::to_char);
                write!(f, "{ch}")?;
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
