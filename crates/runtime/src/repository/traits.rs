//! Repository contract for game records.

use cup_core::{GameId, GameRecord};
use serde::{Deserialize, Serialize};

use super::Result;

/// A stored record together with the revision it was read at.
///
/// Revisions start at 1 on insert and grow by one per commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned {
    pub revision: u64,
    pub record: GameRecord,
}

/// Persistence for whole game records.
///
/// Every write replaces Game, GameState, Turns and Events together. A commit
/// only lands if the stored revision still equals the one the caller read,
/// which serializes concurrent writers on the same game.
pub trait GameRepository: Send + Sync {
    /// Next unused game id.
    fn next_game_id(&self) -> Result<GameId>;

    /// Stores a new record at revision 1.
    fn insert(&self, record: &GameRecord) -> Result<u64>;

    /// Loads a record and its revision.
    fn load(&self, game: GameId) -> Result<Option<Versioned>>;

    /// Replaces a record if nobody committed since `expected_revision`.
    ///
    /// Returns the new revision.
    fn commit(&self, record: &GameRecord, expected_revision: u64) -> Result<u64>;

    /// All stored game ids, ascending.
    fn list_games(&self) -> Result<Vec<GameId>>;

    fn exists(&self, game: GameId) -> bool {
        matches!(self.load(game), Ok(Some(_)))
    }
}
