//! Error types raised by repository implementations.

use cup_core::GameId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("game repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("{0} already exists")]
    AlreadyExists(GameId),

    #[error("{0} is not stored")]
    Missing(GameId),

    #[error("stale write to {game}: expected revision {expected}, found {found}")]
    Conflict {
        game: GameId,
        expected: u64,
        found: u64,
    },
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Json(err.to_string())
    }
}

impl RepositoryError {
    /// Another writer committed first; retrying from a fresh read may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
