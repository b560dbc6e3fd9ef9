//! [`cup_core::LineupOracle`] backed by an in-memory table.
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use cup_core::{GameId, LineupOracle, PlayerId, TeamId};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result};

/// One team's lineup in shooting order, as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub team: TeamId,
    pub players: Vec<PlayerId>,
}

/// Lineups shared by every game a team plays.
pub struct StaticLineups {
    lineups: RwLock<HashMap<TeamId, Vec<PlayerId>>>,
}

impl StaticLineups {
    pub fn new() -> Self {
        Self {
            lineups: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_lineup(self, team: TeamId, players: Vec<PlayerId>) -> Self {
        if let Ok(mut lineups) = self.lineups.write() {
            lineups.insert(team, players);
        }
        self
    }

    /// Replaces a team's lineup. Turns already opened keep the shooters they
    /// captured.
    pub fn set_lineup(&self, team: TeamId, players: Vec<PlayerId>) -> Result<()> {
        let mut lineups = self
            .lineups
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        lineups.insert(team, players);
        Ok(())
    }

    /// Snapshot sorted by team id.
    pub fn entries(&self) -> Result<Vec<LineupEntry>> {
        let lineups = self
            .lineups
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut entries: Vec<LineupEntry> = lineups
            .iter()
            .map(|(team, players)| LineupEntry {
                team: *team,
                players: players.clone(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.team);
        Ok(entries)
    }

    /// Loads lineups from a JSON file. A missing file yields an empty table.
    pub fn load_json(path: &Path) -> Result<Self> {
        let table = Self::new();
        if !path.exists() {
            return Ok(table);
        }
        let entries: Vec<LineupEntry> = serde_json::from_slice(&fs::read(path)?)?;
        for entry in entries {
            table.set_lineup(entry.team, entry.players)?;
        }
        tracing::debug!("Loaded lineups from {}", path.display());
        Ok(table)
    }

    /// Writes lineups as JSON via temp file and rename.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(&self.entries()?)?)?;
        fs::rename(&temp_path, path)?;
        tracing::debug!("Saved lineups to {}", path.display());
        Ok(())
    }
}

impl Default for StaticLineups {
    fn default() -> Self {
        Self::new()
    }
}

impl LineupOracle for StaticLineups {
    fn lineup(&self, _game: GameId, team: TeamId) -> Vec<PlayerId> {
        self.lineups
            .read()
            .map(|lineups| lineups.get(&team).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn players(ids: &[u64]) -> Vec<PlayerId> {
        ids.iter().copied().map(PlayerId).collect()
    }

    #[test]
    fn unknown_team_has_empty_lineup() {
        let lineups = StaticLineups::new().with_lineup(TeamId(1), players(&[1, 2]));
        assert_eq!(lineups.lineup(GameId(1), TeamId(1)), players(&[1, 2]));
        assert!(lineups.lineup(GameId(1), TeamId(2)).is_empty());
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineups.json");

        let lineups = StaticLineups::new()
            .with_lineup(TeamId(2), players(&[23, 21, 22]))
            .with_lineup(TeamId(1), players(&[11]));
        lineups.save_json(&path).unwrap();

        let loaded = StaticLineups::load_json(&path).unwrap();
        assert_eq!(loaded.entries().unwrap(), lineups.entries().unwrap());
        assert_eq!(loaded.lineup(GameId(9), TeamId(2)), players(&[23, 21, 22]));

        let missing = StaticLineups::load_json(&dir.path().join("absent.json")).unwrap();
        assert!(missing.entries().unwrap().is_empty());
    }
}
