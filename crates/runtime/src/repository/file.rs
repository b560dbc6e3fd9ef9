//! File-based GameRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use cup_core::{GameId, GameRecord};

use crate::repository::{GameRepository, RepositoryError, Result, Versioned};

/// Stores each game as `game_{id}.json` under a base directory.
///
/// Writes go to a uniquely named temp file that is renamed over the target,
/// so readers see either the old or the new record. The revision check and
/// the rename run under a lock held by this handle only: handles in one
/// process that share an `Arc` are serialized, but two processes writing the
/// same game at the same moment can both pass the check and the later rename
/// wins. Run one writer process per data directory.
pub struct FileGameRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
    temp_seq: AtomicU64,
}

impl FileGameRepository {
    /// Opens (and creates if needed) a repository rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
            temp_seq: AtomicU64::new(0),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn game_path(&self, game: GameId) -> PathBuf {
        self.base_dir.join(format!("game_{}.json", game.0))
    }

    fn read(&self, game: GameId) -> Result<Option<Versioned>> {
        let path = self.game_path(game);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let stored: Versioned = serde_json::from_slice(&bytes)?;
        Ok(Some(stored))
    }

    fn write(&self, stored: &Versioned) -> Result<()> {
        let path = self.game_path(stored.record.id());
        let seq = self.temp_seq.fetch_add(1, Ordering::Relaxed);
        let temp_path = self.base_dir.join(format!(
            "game_{}.json.{}-{}.tmp",
            stored.record.id().0,
            std::process::id(),
            seq
        ));

        let bytes = serde_json::to_vec_pretty(stored)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            "Saved {}@{} to {}",
            stored.record.id(),
            stored.revision,
            path.display()
        );
        Ok(())
    }
}

impl GameRepository for FileGameRepository {
    fn next_game_id(&self) -> Result<GameId> {
        let last = self.list_games()?.last().copied();
        Ok(GameId(last.map_or(1, |id| id.0 + 1)))
    }

    fn insert(&self, record: &GameRecord) -> Result<u64> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if self.game_path(record.id()).exists() {
            return Err(RepositoryError::AlreadyExists(record.id()));
        }
        self.write(&Versioned {
            revision: 1,
            record: record.clone(),
        })?;
        Ok(1)
    }

    fn load(&self, game: GameId) -> Result<Option<Versioned>> {
        let stored = self.read(game)?;
        if stored.is_some() {
            tracing::debug!("Loaded {} from {}", game, self.base_dir.display());
        }
        Ok(stored)
    }

    fn commit(&self, record: &GameRecord, expected_revision: u64) -> Result<u64> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let current = self
            .read(record.id())?
            .ok_or(RepositoryError::Missing(record.id()))?;
        if current.revision != expected_revision {
            return Err(RepositoryError::Conflict {
                game: record.id(),
                expected: expected_revision,
                found: current.revision,
            });
        }

        let revision = current.revision + 1;
        self.write(&Versioned {
            revision,
            record: record.clone(),
        })?;
        Ok(revision)
    }

    fn list_games(&self) -> Result<Vec<GameId>> {
        let mut games = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("game_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(id) = id.parse::<u64>()
            {
                games.push(GameId(id));
            }
        }

        games.sort_unstable();
        Ok(games)
    }

    fn exists(&self, game: GameId) -> bool {
        self.game_path(game).exists()
    }
}
