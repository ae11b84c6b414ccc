use std::io;
use std::path::PathBuf;

use chess_core::FenError;
use thiserror::Error;

/// Errors surfaced by the driver.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid FEN '{fen}': {source}")]
    Fen {
        fen: String,
        #[source]
        source: FenError,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("failed to serialize trace: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
