//! In-memory GameRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use cup_core::{GameId, GameRecord};

use crate::repository::{GameRepository, RepositoryError, Result, Versioned};

/// In-memory implementation of GameRepository.
pub struct InMemoryGameRepo {
    games: RwLock<BTreeMap<GameId, Versioned>>,
}

impl InMemoryGameRepo {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryGameRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRepository for InMemoryGameRepo {
    fn next_game_id(&self) -> Result<GameId> {
        let games = self
            .games
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(GameId(games.keys().next_back().map_or(1, |id| id.0 + 1)))
    }

    fn insert(&self, record: &GameRecord) -> Result<u64> {
        let mut games = self
            .games
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if games.contains_key(&record.id()) {
            return Err(RepositoryError::AlreadyExists(record.id()));
        }
        games.insert(
            record.id(),
            Versioned {
                revision: 1,
                record: record.clone(),
            },
        );
        Ok(1)
    }

    fn load(&self, game: GameId) -> Result<Option<Versioned>> {
        let games = self
            .games
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(games.get(&game).cloned())
    }

    fn commit(&self, record: &GameRecord, expected_revision: u64) -> Result<u64> {
        let mut games = self
            .games
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = games
            .get_mut(&record.id())
            .ok_or(RepositoryError::Missing(record.id()))?;
        if stored.revision != expected_revision {
            return Err(RepositoryError::Conflict {
                game: record.id(),
                expected: expected_revision,
                found: stored.revision,
            });
        }
        stored.revision += 1;
        stored.record = record.clone();
        Ok(stored.revision)
    }

    fn list_games(&self) -> Result<Vec<GameId>> {
        let games = self
            .games
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(games.keys().copied().collect())
    }

    fn exists(&self, game: GameId) -> bool {
        self.games
            .read()
            .map(|games| games.contains_key(&game))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use cup_core::{Game, GameSource, TeamId};

    use super::*;

    fn record(id: u64) -> GameRecord {
        GameRecord::new(
            Game::new(GameId(id), TeamId(1), TeamId(2), GameSource::Live),
            100,
        )
    }

    #[test]
    fn stale_commit_is_rejected() {
        let repo = InMemoryGameRepo::new();
        assert_eq!(repo.insert(&record(1)).unwrap(), 1);

        let mut first = repo.load(GameId(1)).unwrap().unwrap();
        let second = repo.load(GameId(1)).unwrap().unwrap();

        first.record.state.home_cups_remaining = 90;
        assert_eq!(repo.commit(&first.record, first.revision).unwrap(), 2);

        let err = repo.commit(&second.record, second.revision).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            repo.load(GameId(1)).unwrap().unwrap().record.state.home_cups_remaining,
            90
        );
    }

    #[test]
    fn ids_follow_the_highest_stored_game() {
        let repo = InMemoryGameRepo::new();
        assert_eq!(repo.next_game_id().unwrap(), GameId(1));
        repo.insert(&record(4)).unwrap();
        assert_eq!(repo.next_game_id().unwrap(), GameId(5));
        assert!(matches!(
            repo.insert(&record(4)),
            Err(RepositoryError::AlreadyExists(GameId(4)))
        ));
        assert_eq!(repo.list_games().unwrap(), vec![GameId(4)]);
        assert!(repo.exists(GameId(4)));
        assert!(!repo.exists(GameId(5)));
    }
}
