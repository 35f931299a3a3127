use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("could not read leaderboard {path:?}: {source}")]
    PersistenceRead { path: PathBuf, source: io::Error },

    #[error("could not write leaderboard {path:?}: {source}")]
    PersistenceWrite { path: PathBuf, source: io::Error },

    #[error("malformed leaderboard {path:?}: {source}")]
    Corrupt { path: PathBuf, source: serde_json::Error },

    #[error("no free cell left for food")]
    BoardExhausted,

    #[error("invalid config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
