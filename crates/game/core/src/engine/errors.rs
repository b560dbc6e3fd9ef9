//! Error types for the scoring pipeline.

use crate::action::ResultType;
use crate::error::{ErrorKind, GameError};
use crate::state::{GameStatus, PlayerId, TeamId, TurnId};

/// Input rejected before any write.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("unknown result type '{0}'")]
    UnknownResultType(String),

    #[error("shot events require a shooter")]
    MissingShooter,

    #[error("{shooter} is not eligible to shoot in {turn}")]
    ShooterNotEligible { shooter: PlayerId, turn: TurnId },

    #[error("{0} is not playing in this game")]
    UnknownTeam(TeamId),

    #[error("{team} is not on offense; {offense} has possession")]
    TeamNotOnOffense { team: TeamId, offense: TeamId },

    #[error("a winning team is required to decide a tied game")]
    WinnerRequired,

    #[error("adjustments only apply to shots, not {0}")]
    PullNotAdjustable(ResultType),
}

impl GameError for ValidationError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            UnknownResultType(_) => "UNKNOWN_RESULT_TYPE",
            MissingShooter => "MISSING_SHOOTER",
            ShooterNotEligible { .. } => "SHOOTER_NOT_ELIGIBLE",
            UnknownTeam(_) => "UNKNOWN_TEAM",
            TeamNotOnOffense { .. } => "TEAM_NOT_ON_OFFENSE",
            WinnerRequired => "WINNER_REQUIRED",
            PullNotAdjustable(_) => "PULL_NOT_ADJUSTABLE",
        }
    }
}

/// Operation not allowed in the game's current lifecycle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateConflictError {
    #[error("game is {status}, events require IN_PROGRESS")]
    NotInProgress { status: GameStatus },

    #[error("game is {status}, adjustments require FINAL")]
    NotFinal { status: GameStatus },

    #[error("adjustments only apply to live-tracked games")]
    NotLiveTracked,

    #[error("game is {status}, only SCHEDULED games can start")]
    NotScheduled { status: GameStatus },

    #[error("game has not started")]
    NotStarted,

    #[error("game is already decided")]
    AlreadyDecided,
}

impl GameError for StateConflictError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::StateConflict
    }

    fn error_code(&self) -> &'static str {
        use StateConflictError::*;
        match self {
            NotInProgress { .. } => "GAME_NOT_IN_PROGRESS",
            NotFinal { .. } => "GAME_NOT_FINAL",
            NotLiveTracked => "GAME_NOT_LIVE",
            NotScheduled { .. } => "GAME_NOT_SCHEDULED",
            NotStarted => "GAME_NOT_STARTED",
            AlreadyDecided => "GAME_ALREADY_DECIDED",
        }
    }
}

/// Referenced log entry does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotFoundError {
    #[error("no events to undo")]
    NothingToUndo,

    #[error("no {result_type} event recorded for {player}")]
    NoMatchingEvent {
        player: PlayerId,
        result_type: ResultType,
    },
}

impl GameError for NotFoundError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }

    fn error_code(&self) -> &'static str {
        match self {
            NotFoundError::NothingToUndo => "NOTHING_TO_UNDO",
            NotFoundError::NoMatchingEvent { .. } => "NO_MATCHING_EVENT",
        }
    }
}

/// Errors surfaced while executing an operation through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    StateConflict(#[from] StateConflictError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl GameError for ExecuteError {
    fn kind(&self) -> ErrorKind {
        match self {
            ExecuteError::Validation(e) => e.kind(),
            ExecuteError::StateConflict(e) => e.kind(),
            ExecuteError::NotFound(e) => e.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Validation(e) => e.error_code(),
            ExecuteError::StateConflict(e) => e.error_code(),
            ExecuteError::NotFound(e) => e.error_code(),
        }
    }
}
