//! Common error infrastructure for cup-core.
//!
//! Domain errors live next to the engine (see [`crate::engine`]); this module
//! holds the classification shared by all of them so callers can map any
//! failure to a transport status without matching on every variant.
//!
//! # Design Principles
//!
//! - **Reject before write**: every classified error is raised before the
//!   record is touched
//! - **Stable codes**: [`GameError::error_code`] strings are part of the
//!   external contract

/// Category of a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Malformed or ineligible input. Retrying unchanged will fail again.
    ///
    /// Examples: unknown result type, shooter outside the eligible set
    Validation,

    /// The game is in the wrong lifecycle state for this operation.
    ///
    /// Examples: shot on a finished game, adjustment on a live game
    StateConflict,

    /// The referenced entity does not exist.
    ///
    /// Examples: undo on an empty log, unknown game id
    NotFound,

    /// Stored data violates an invariant. Indicates a bug.
    Internal,
}

impl ErrorKind {
    /// Returns a human-readable name of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::StateConflict => "state_conflict",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller sent something it can fix.
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal)
    }
}

/// Shared behavior of every cup-core error.
pub trait GameError: core::error::Error {
    /// Category for transport mapping and logging.
    fn kind(&self) -> ErrorKind;

    /// Stable machine-readable reason, e.g. `"SHOOTER_NOT_ELIGIBLE"`.
    fn error_code(&self) -> &'static str;
}
