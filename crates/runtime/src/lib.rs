//! Runtime services for the cup-game scoring engine.
//!
//! This crate wires the pure rules in `cup-core` to storage, lineups and the
//! wall clock. Consumers build a [`Scorekeeper`] and call its operations; each
//! one is a single load → compute → commit transaction on one game.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the service, its builder and configuration
//! - [`api`] exposes errors and the clock abstraction
//! - [`repository`] persists game records (in memory or as JSON files)
//! - [`oracle`] supplies team lineups
//! - [`scenario`] replays scripted games from RON files
pub mod api;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod scenario;

pub use api::{Clock, Result, RuntimeError, StepClock, SystemClock};
pub use oracle::{LineupEntry, StaticLineups};
pub use repository::{
    FileGameRepository, GameRepository, InMemoryGameRepo, RepositoryError, Versioned,
};
pub use runtime::{RuntimeConfig, Scorekeeper, ScorekeeperBuilder, StoreKind, default_data_dir};
pub use scenario::{Scenario, ScenarioRun, Step, TeamSheet};
