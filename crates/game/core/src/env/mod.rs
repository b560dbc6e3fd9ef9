//! Read-only collaborators the engine consults.
//!
//! Rosters are owned by an external service; the engine only needs each
//! team's active lineup order when it opens a turn. [`GameEnv`] bundles that
//! oracle with the rule configuration.
use crate::config::GameConfig;
use crate::state::{GameId, PlayerId, TeamId};

/// Source of a team's active lineup, in shooting order.
pub trait LineupOracle: Send + Sync {
    /// Active lineup for `team` in `game`. Empty when none is configured.
    fn lineup(&self, game: GameId, team: TeamId) -> Vec<PlayerId>;
}

/// Oracle for games scored without rosters; every turn falls back to the
/// default quota and accepts any shooter.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLineups;

impl LineupOracle for NoLineups {
    fn lineup(&self, _game: GameId, _team: TeamId) -> Vec<PlayerId> {
        Vec::new()
    }
}

/// Aggregates read-only inputs required by the engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    lineups: &'a dyn LineupOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(lineups: &'a dyn LineupOracle, config: &'a GameConfig) -> Self {
        Self { lineups, config }
    }

    pub fn lineups(&self) -> &'a dyn LineupOracle {
        self.lineups
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn lineup(&self, game: GameId, team: TeamId) -> Vec<PlayerId> {
        self.lineups.lineup(game, team)
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
