//! Material plus pawn-structure evaluation.
//!
//! All weights are centipawns. Scores are White-positive regardless of the
//! side to move; callers wanting Black's view negate.

use chess_core::{Color, PieceKind, Position, file_of, rank_of, sq};
use serde::{Deserialize, Serialize};

/// Which pawn-structure rules the evaluator applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PawnRules {
    /// The historical scoring: file checks count pieces of either color and
    /// penalties keep one sign for both sides. Backward pawns are ignored.
    Legacy,
    /// Same-color pawn checks with penalties mirrored for Black, including
    /// backward pawns. Color-symmetric.
    #[default]
    Corrected,
}

/// Material values by piece kind. The king carries no material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 100,
            knight: 325,
            bishop: 325,
            rook: 500,
            queen: 975,
            king: 0,
        }
    }
}

impl PieceValues {
    pub fn of(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

/// Evaluation weights, loadable from the `[eval]` table of a config file.
/// Missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalParams {
    pub rules: PawnRules,
    pub piece_values: PieceValues,
    /// Isolated-pawn penalty by file, a..h.
    pub isolated_pawn: [i32; 8],
    pub doubled_pawn: i32,
    pub backward_pawn: i32,
    /// Credited to the opponent of a backward pawn standing on a file the
    /// opponent has no pawn on.
    pub backward_pawn_attack: i32,
    /// Per rank of advance, for pawns on the d and e files.
    pub center_advance: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            rules: PawnRules::default(),
            piece_values: PieceValues::default(),
            isolated_pawn: [-12, -14, -16, -20, -20, -16, -14, -12],
            doubled_pawn: -12,
            backward_pawn: -6,
            backward_pawn_attack: 4,
            center_advance: 4,
        }
    }
}

/// Score split into its two sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub material: i32,
    pub structure: i32,
}

impl Evaluation {
    pub fn total(self) -> i32 {
        self.material + self.structure
    }
}

/// Per-file occupancy, gathered once per evaluation.
struct FileMap {
    /// Pieces of any kind and color on each file.
    pieces: [u8; 8],
    /// Rank bitmask of pawns on each file, by color.
    pawns: [[u8; 8]; 2],
}

impl FileMap {
    fn scan(pos: &Position) -> Self {
        let mut map = FileMap {
            pieces: [0; 8],
            pawns: [[0; 8]; 2],
        };
        for s in 0..64u8 {
            if let Some(pc) = pos.piece_at(s) {
                let f = file_of(s) as usize;
                map.pieces[f] += 1;
                if pc.kind == PieceKind::Pawn {
                    map.pawns[pc.color.idx()][f] |= 1 << rank_of(s);
                }
            }
        }
        map
    }

    fn pawn_ranks(&self, c: Color, file: i8) -> u8 {
        if (0..8).contains(&file) {
            self.pawns[c.idx()][file as usize]
        } else {
            0
        }
    }
}

fn relative_rank(c: Color, rank: i8) -> i32 {
    match c {
        Color::White => rank as i32,
        Color::Black => 7 - rank as i32,
    }
}

fn is_center_file(file: i8) -> bool {
    file == 3 || file == 4
}

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    params: EvalParams,
}

impl Evaluator {
    pub fn new(params: EvalParams) -> Self {
        Self { params }
    }

    /// White-positive score of `pos`.
    pub fn evaluate(&self, pos: &Position) -> i32 {
        self.breakdown(pos).total()
    }

    pub fn breakdown(&self, pos: &Position) -> Evaluation {
        let files = FileMap::scan(pos);
        let mut eval = Evaluation::default();

        for s in 0..64u8 {
            let Some(pc) = pos.piece_at(s) else {
                continue;
            };
            eval.material += pc.color.sign() * self.params.piece_values.of(pc.kind);

            if pc.kind == PieceKind::Pawn {
                eval.structure += match self.params.rules {
                    PawnRules::Legacy => self.legacy_pawn(&files, s),
                    PawnRules::Corrected => self.pawn_structure(pos, &files, pc.color, s),
                };
            }
        }
        eval
    }

    fn legacy_pawn(&self, files: &FileMap, s: u8) -> i32 {
        let p = &self.params;
        let file = file_of(s);
        let mut score = 0;

        // the pawn itself is the only piece on its file
        if files.pieces[file as usize] == 1 {
            score += p.isolated_pawn[file as usize];
        } else {
            score += p.doubled_pawn;
        }
        if is_center_file(file) {
            score += p.center_advance * rank_of(s) as i32;
        }
        score
    }

    fn pawn_structure(&self, pos: &Position, files: &FileMap, c: Color, s: u8) -> i32 {
        let p = &self.params;
        let file = file_of(s);
        let rank = rank_of(s);
        let rel = relative_rank(c, rank);
        let sign = c.sign();
        let mut score = 0;

        let neighbours = files.pawn_ranks(c, file - 1) | files.pawn_ranks(c, file + 1);
        let isolated = neighbours == 0;
        if isolated {
            score += sign * p.isolated_pawn[file as usize];
        }

        if files.pawn_ranks(c, file).count_ones() > 1 {
            score += sign * p.doubled_pawn;
        }

        if !isolated && self.is_backward(pos, neighbours, c, file, rank) {
            score += sign * p.backward_pawn;
            if files.pawn_ranks(c.other(), file) == 0 {
                score -= sign * p.backward_pawn_attack;
            }
        }

        if is_center_file(file) {
            score += sign * p.center_advance * rel;
        }
        score
    }

    /// No friendly neighbour pawn level with or behind it, and its stop
    /// square is covered by an enemy pawn.
    fn is_backward(&self, pos: &Position, neighbours: u8, c: Color, file: i8, rank: i8) -> bool {
        let supporters = match c {
            Color::White => neighbours & (u8::MAX >> (7 - rank)),
            Color::Black => neighbours & (u8::MAX << rank),
        };
        if supporters != 0 {
            return false;
        }
        sq(file, rank + c.forward()).is_some_and(|stop| pos.is_attacked_by_pawn(stop, c.other()))
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
