//! Hill-climb driver for ML-chess
//!
//! Plays a fixed number of greedy moves from a FEN position, alternating
//! sides, and prints each chosen move, its score and the board after it.
//!
//! # Usage
//!
//! ```bash
//! # Three moves from the built-in position
//! cargo run -p hill_climb
//!
//! # Ten moves from the start position with the legacy pawn rules
//! cargo run -p hill_climb -- --fen "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" \
//!     --moves 10 --rules legacy --json-out game.json
//! ```

mod config;
mod driver;
mod error;

pub use config::*;
pub use driver::*;
pub use error::{Error, Result};
