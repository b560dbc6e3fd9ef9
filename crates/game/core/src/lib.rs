//! Deterministic scoring rules for the cup game.
//!
//! `cup-core` turns an append-only log of shots and pulls into one
//! authoritative scoreboard. It performs no I/O and reads no clock; callers
//! pass timestamps and lineups in. All mutation flows through
//! [`engine::GameEngine`], and the runtime depends on the types re-exported
//! here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod ledger;
pub mod state;

pub use action::{AdjustAction, AdjustKind, ResultType, ShotAction};
pub use config::GameConfig;
pub use engine::{
    Applied, ExecuteError, GameEngine, NotFoundError, PhaseController, RecomputeReport,
    StateConflictError, StateProjector, Transition, TurnManager, ValidationError,
};
pub use env::{GameEnv, LineupOracle, NoLineups};
pub use error::{ErrorKind, GameError};
pub use ledger::{CupsDelta, CupsLedger};
pub use state::{
    EventDraft, EventId, EventLog, Game, GameId, GameRecord, GameSource, GameState, GameStatus,
    Phase, PlayerId, ShotEvent, Side, TeamId, Timestamp, Turn, TurnId, TurnKind, TurnPlan,
};
