//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections and repository failures so clients can bubble
//! them up with consistent context.

use cup_core::{ErrorKind, ExecuteError, GameError, GameId, TeamId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0} not found")]
    GameNotFound(GameId),

    #[error("a game needs two different teams, got {0} on both sides")]
    SameTeams(TeamId),

    #[error("{game} kept conflicting with concurrent writers after {attempts} attempts")]
    CommitConflict { game: GameId, attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError for RuntimeError {
    fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Execute(err) => err.kind(),
            RuntimeError::GameNotFound(_) => ErrorKind::NotFound,
            RuntimeError::SameTeams(_) | RuntimeError::InvalidConfig(_) => ErrorKind::Validation,
            RuntimeError::CommitConflict { .. } => ErrorKind::StateConflict,
            RuntimeError::Repository(_) => ErrorKind::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Execute(err) => err.error_code(),
            RuntimeError::GameNotFound(_) => "GAME_NOT_FOUND",
            RuntimeError::SameTeams(_) => "SAME_TEAMS",
            RuntimeError::CommitConflict { .. } => "COMMIT_CONFLICT",
            RuntimeError::InvalidConfig(_) => "INVALID_CONFIG",
            RuntimeError::Repository(_) => "STORAGE_FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use cup_core::{NotFoundError, ValidationError};

    use super::*;

    #[test]
    fn engine_codes_pass_through() {
        let err = RuntimeError::from(ExecuteError::from(ValidationError::MissingShooter));
        assert_eq!(err.error_code(), "MISSING_SHOOTER");
        assert_eq!(err.to_string(), "shot events require a shooter");

        let err = RuntimeError::from(ExecuteError::from(NotFoundError::NothingToUndo));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn storage_failures_are_internal() {
        let err = RuntimeError::from(RepositoryError::LockPoisoned);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.kind().is_client_error());
        assert_eq!(RuntimeError::GameNotFound(GameId(3)).to_string(), "game#3 not found");
    }
}
