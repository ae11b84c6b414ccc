//! Forsyth-Edwards Notation parsing and printing.

use std::str::FromStr;

use thiserror::Error;

use crate::board::{CastlingRights, Position};
use crate::types::*;

/// Reasons a FEN string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 space-separated fields, found {0}")]
    MissingFields(usize),

    #[error("board section must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("rank {rank} describes more than 8 files")]
    RankOverflow { rank: u8 },

    #[error("rank {rank} describes only {files} files")]
    RankUnderflow { rank: u8, files: u8 },

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en-passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),
}

impl Position {
    /// Parse a FEN string. The halfmove clock and fullmove number may be
    /// omitted and default to `0` and `1`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::InvalidCastling(c)),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            coord => {
                let target = coord_to_sq(coord)
                    .filter(|&ep| ep_target_is_possible(&board, side_to_move, ep))
                    .ok_or_else(|| FenError::InvalidEnPassant(coord.to_string()))?;
                Some(target)
            }
        };

        let halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
        let fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?;

        let mut pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        pos.clean_castling_rights();
        Ok(pos)
    }

    /// Drop castling rights whose king or rook is not on its home square.
    fn clean_castling_rights(&mut self) {
        let home = |s: u8, c: Color, kind: PieceKind| self.piece_at(s) == Some(Piece::new(c, kind));
        let white_king = home(4, Color::White, PieceKind::King);
        let black_king = home(60, Color::Black, PieceKind::King);
        let rights = CastlingRights {
            wk: self.castling.wk && white_king && home(7, Color::White, PieceKind::Rook),
            wq: self.castling.wq && white_king && home(0, Color::White, PieceKind::Rook),
            bk: self.castling.bk && black_king && home(63, Color::Black, PieceKind::Rook),
            bq: self.castling.bq && black_king && home(56, Color::Black, PieceKind::Rook),
        };
        self.castling = rights;
    }

    /// Full six-field FEN for this position.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let c = &self.castling;
        if !(c.wk || c.wq || c.bk || c.bq) {
            out.push('-');
        } else {
            for (flag, ch) in [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')] {
                if flag {
                    out.push(ch);
                }
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        out
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

fn parse_placement(section: &str) -> Result<[Option<Piece>; 64], FenError> {
    let ranks: Vec<&str> = section.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = [None; 64];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first
        let rank = 7 - rank_idx as i8;
        let rank_label = rank as u8 + 1;
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as i8;
            } else {
                let pc = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                let s = sq(file, rank).ok_or(FenError::RankOverflow { rank: rank_label })?;
                board[s as usize] = Some(pc);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankOverflow { rank: rank_label });
            }
        }
        if file != 8 {
            return Err(FenError::RankUnderflow {
                rank: rank_label,
                files: file as u8,
            });
        }
    }
    Ok(board)
}

/// The square a double pawn push just skipped: on the mover's sixth rank,
/// empty, with the pushed enemy pawn in front of it and its origin empty.
fn ep_target_is_possible(board: &[Option<Piece>; 64], side_to_move: Color, ep: u8) -> bool {
    let pusher = side_to_move.other();
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(ep) != expected_rank || board[ep as usize].is_some() {
        return false;
    }
    let file = file_of(ep);
    let pawn_sq = sq(file, rank_of(ep) + pusher.forward());
    let origin_sq = sq(file, rank_of(ep) - pusher.forward());
    match (pawn_sq, origin_sq) {
        (Some(p), Some(o)) => {
            board[p as usize] == Some(Piece::new(pusher, PieceKind::Pawn))
                && board[o as usize].is_none()
        }
        _ => false,
    }
}

fn parse_counter(txt: &str) -> Result<u32, FenError> {
    txt.parse()
        .map_err(|_| FenError::InvalidCounter(txt.to_string()))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
