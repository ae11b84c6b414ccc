//! Driver configuration, read from an optional TOML file.
//!
//! ```toml
//! fen = "8/2BPR3/B3P3/3P1P2/p6R/5p2/P1p2b1K/3k2N1 w - - 0 1"
//! moves = 3
//!
//! [eval]
//! rules = "corrected"
//! doubled_pawn = -12
//! ```

use std::path::Path;

use chess_core::Position;
use greedy_engine::EvalParams;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Position the driver starts from when none is configured.
pub const DEFAULT_FEN: &str = "8/2BPR3/B3P3/3P1P2/p6R/5p2/P1p2b1K/3k2N1 w - - 0 1";

pub const DEFAULT_MOVES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Starting position in FEN.
    pub fen: String,
    /// Number of moves to play, both sides counted.
    pub moves: u32,
    pub eval: EvalParams,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fen: DEFAULT_FEN.to_string(),
            moves: DEFAULT_MOVES,
            eval: EvalParams::default(),
        }
    }
}

impl DriverConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parse the configured FEN.
    pub fn start_position(&self) -> Result<Position> {
        Position::from_fen(&self.fen).map_err(|source| Error::Fen {
            fen: self.fen.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
