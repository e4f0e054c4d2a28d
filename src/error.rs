use std::io;

use thiserror::Error;

use crate::board::Move;

/// Malformed board notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square: {0:?}")]
    Square(String),
    #[error("invalid piece letter: {0:?}")]
    PieceLetter(char),
    #[error("invalid FEN ({reason}): {fen}")]
    Fen { fen: String, reason: &'static str },
}

impl NotationError {
    pub(crate) fn fen(fen: &str, reason: &'static str) -> Self {
        NotationError::Fen { fen: fen.to_string(), reason }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    #[error("engine has been closed")]
    Closed,
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read opening book: {0}")]
    Io(#[from] io::Error),
    #[error("opening book is truncated: {0} trailing bytes")]
    Truncated(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("thread count must be at least 1")]
    ZeroThreads,
    #[error(transparent)]
    Book(#[from] BookError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
