//! Repository layer for game records.
//!
//! Repositories hold the only durable data: one [`cup_core::GameRecord`] per
//! game, written as a unit under an optimistic revision check.
//!
//! Lineups are supplied by oracles, not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileGameRepository;
pub use memory::InMemoryGameRepo;
pub use traits::{GameRepository, Versioned};
