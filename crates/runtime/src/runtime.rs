//! Transactional scoring service.
//!
//! [`Scorekeeper`] owns the repository, the lineup oracle and the clock, and
//! runs every engine operation as one load → compute → commit unit. A commit
//! that lost the race to another writer is retried from a fresh read.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use cup_core::{
    AdjustAction, Applied, ExecuteError, Game, GameConfig, GameEngine, GameEnv, GameError,
    GameId, GameRecord, GameSource, GameState, LineupOracle, NoLineups, RecomputeReport,
    ShotAction, ShotEvent, TeamId, Transition,
};

use crate::api::{Clock, Result, RuntimeError, SystemClock};
use crate::repository::{
    FileGameRepository, GameRepository, InMemoryGameRepo, RepositoryError, Versioned,
};

/// Where game records live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Memory,
    File,
}

impl StoreKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Some(StoreKind::Memory),
            "file" | "json" => Some(StoreKind::File),
            _ => None,
        }
    }
}

/// Runtime configuration shared by the service and its repository.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub store: StoreKind,
    /// Directory for the file store. `None` uses the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// Extra attempts after a revision conflict.
    pub commit_retries: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            store: StoreKind::Memory,
            data_dir: None,
            commit_retries: 3,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CUP_STORE` - `memory` or `file` (default: memory)
    /// - `CUP_DATA_DIR` - Directory for the file store (default: platform-specific)
    /// - `CUP_COMMIT_RETRIES` - Retries after a write conflict (default: 3)
    /// - `CUP_RACK_SIZE` - Cups per rack (default: 100)
    /// - `CUP_DEFAULT_LINEUP` - Quota for turns without a lineup (default: 6)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(store) = env::var("CUP_STORE") {
            match StoreKind::parse(&store) {
                Some(kind) => config.store = kind,
                None => tracing::warn!("Ignoring unknown CUP_STORE value '{}'", store),
            }
        }

        config.data_dir = env::var("CUP_DATA_DIR").ok().map(PathBuf::from);

        if let Some(retries) = read_env::<u32>("CUP_COMMIT_RETRIES") {
            config.commit_retries = retries;
        }

        if let Some(rack_size) = read_env::<u32>("CUP_RACK_SIZE") {
            config.game = config.game.with_rack_size(rack_size.max(1));
        }

        if let Some(lineup) = read_env::<u32>("CUP_DEFAULT_LINEUP") {
            config.game = config.game.with_default_lineup_size(lineup);
        }

        config
    }

    /// Configured data directory, or the platform default.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Opens the configured repository.
    pub fn open_repository(&self) -> Result<Arc<dyn GameRepository>> {
        Ok(match self.store {
            StoreKind::Memory => Arc::new(InMemoryGameRepo::new()),
            StoreKind::File => Arc::new(FileGameRepository::new(
                self.resolved_data_dir().join("games"),
            )?),
        })
    }
}

/// Platform data directory for cupscore.
///
/// - macOS: `~/Library/Application Support/cupscore`
/// - Linux: `~/.local/share/cupscore` (or `$XDG_DATA_HOME/cupscore`)
/// - Windows: `%APPDATA%\cupscore`
/// - Fallback: `./cup_data`
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "cupscore")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./cup_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Scoring service over a game repository.
pub struct Scorekeeper {
    repository: Arc<dyn GameRepository>,
    lineups: Arc<dyn LineupOracle>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
    commit_retries: u32,
}

impl Scorekeeper {
    pub fn builder() -> ScorekeeperBuilder {
        ScorekeeperBuilder::new()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Creates a SCHEDULED game with full racks.
    pub fn create_game(&self, home: TeamId, away: TeamId, source: GameSource) -> Result<GameId> {
        if home == away {
            return Err(RuntimeError::SameTeams(home));
        }

        // Another creator may grab the same id; take the next one.
        let mut attempts = 0;
        loop {
            let id = self.repository.next_game_id()?;
            let record = GameRecord::new(Game::new(id, home, away, source), self.config.rack_size);
            match self.repository.insert(&record) {
                Ok(_) => {
                    tracing::info!("Created {} ({} vs {}, {})", id, home, away, source);
                    return Ok(id);
                }
                Err(RepositoryError::AlreadyExists(_)) if attempts < self.commit_retries => {
                    attempts += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// SCHEDULED → IN_PROGRESS, opening turn #1.
    pub fn start_game(&self, game: GameId) -> Result<GameState> {
        self.mutate(game, "start", |engine, env| engine.start(env))?;
        Ok(self.get_state(game)?.state)
    }

    /// Records a shot or pull.
    pub fn append_event(&self, game: GameId, action: &ShotAction) -> Result<Applied> {
        let applied = self.mutate(game, "append_event", |engine, env| {
            engine.apply_event(env, action, self.clock.now())
        })?;

        match &applied.transition {
            Transition::OpenTurn { plan, phase } => tracing::debug!(
                "{}: turn over, {} takes a {:?} turn ({})",
                game,
                plan.offense_team_id,
                plan.kind,
                phase
            ),
            Transition::Finish { phase, winner, .. } => tracing::info!(
                "{}: game over in {} (winner: {})",
                game,
                phase,
                winner.map_or_else(|| "pending".to_owned(), |team| team.to_string())
            ),
            Transition::Hold | Transition::Advance { .. } => {}
        }
        Ok(applied)
    }

    /// Removes the latest event.
    pub fn undo(&self, game: GameId) -> Result<ShotEvent> {
        self.mutate(game, "undo", |engine, env| engine.undo(env))
    }

    /// Rebuilds the scoreboard from the log and repairs drift.
    pub fn recompute(&self, game: GameId, preserve_final_status: bool) -> Result<RecomputeReport> {
        let report = self.mutate(game, "recompute", |engine, env| {
            engine.recompute(env, preserve_final_status)
        })?;
        if report.repaired_events > 0 {
            tracing::warn!(
                "{}: repaired {} drifted events",
                game,
                report.repaired_events
            );
        }
        Ok(report)
    }

    /// Admin correction of a finished live game.
    pub fn admin_adjust(&self, game: GameId, adjustment: &AdjustAction) -> Result<()> {
        self.mutate(game, "admin_adjust", |engine, env| {
            engine.adjust(env, adjustment, self.clock.now())
        })
    }

    /// Declares the game over. Returns the winner, if any.
    pub fn finalize(&self, game: GameId, winner: Option<TeamId>) -> Result<Option<TeamId>> {
        self.mutate(game, "finalize", |engine, _env| engine.finalize(winner))
    }

    /// Full projection: game, scoreboard, turns and events.
    pub fn get_state(&self, game: GameId) -> Result<GameRecord> {
        Ok(self.load(game)?.record)
    }

    pub fn list_games(&self) -> Result<Vec<GameId>> {
        Ok(self.repository.list_games()?)
    }

    fn load(&self, game: GameId) -> Result<Versioned> {
        self.repository
            .load(game)?
            .ok_or(RuntimeError::GameNotFound(game))
    }

    /// Runs `op` on a private copy of the record and commits it.
    fn mutate<T>(
        &self,
        game: GameId,
        name: &'static str,
        mut op: impl FnMut(&mut GameEngine<'_>, GameEnv<'_>) -> std::result::Result<T, ExecuteError>,
    ) -> Result<T> {
        let env = GameEnv::new(self.lineups.as_ref(), &self.config);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let Versioned {
                revision,
                mut record,
            } = self.load(game)?;

            let output = match op(&mut GameEngine::new(&mut record), env) {
                Ok(output) => output,
                Err(err) => {
                    tracing::debug!("{} {} rejected [{}]: {}", name, game, err.error_code(), err);
                    return Err(err.into());
                }
            };

            match self.repository.commit(&record, revision) {
                Ok(committed) => {
                    tracing::info!("{} {} committed at revision {}", name, game, committed);
                    return Ok(output);
                }
                Err(err) if err.is_conflict() && attempt <= self.commit_retries => {
                    tracing::warn!("{} {}: {}; retrying", name, game, err);
                }
                Err(err) if err.is_conflict() => {
                    return Err(RuntimeError::CommitConflict {
                        game,
                        attempts: attempt,
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Builder for [`Scorekeeper`].
pub struct ScorekeeperBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn GameRepository>>,
    lineups: Option<Arc<dyn LineupOracle>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ScorekeeperBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            lineups: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this repository instead of opening the configured one.
    pub fn repository(mut self, repository: Arc<dyn GameRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Lineup source. Defaults to no lineups.
    pub fn lineups(mut self, lineups: Arc<dyn LineupOracle>) -> Self {
        self.lineups = Some(lineups);
        self
    }

    /// Timestamp source. Defaults to the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Scorekeeper> {
        let repository = match self.repository {
            Some(repository) => repository,
            None => self.config.open_repository()?,
        };
        if self.config.game.rack_size == 0 {
            return Err(RuntimeError::InvalidConfig(
                "rack size must be at least 1".to_owned(),
            ));
        }

        Ok(Scorekeeper {
            repository,
            lineups: self.lineups.unwrap_or_else(|| Arc::new(NoLineups)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config: self.config.game,
            commit_retries: self.config.commit_retries,
        })
    }
}
