//! Opening the store shared by all commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use cup_core::GameError;
use cup_runtime::{RuntimeConfig, RuntimeError, Scorekeeper, StaticLineups, StoreKind};

const LINEUPS_FILE: &str = "lineups.json";

/// Store selection flags accepted before any subcommand.
#[derive(Args, Clone, Debug)]
pub struct StoreArgs {
    /// Data directory (defaults to CUP_DATA_DIR, then a platform-specific location)
    #[arg(short, long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Keep games in memory; nothing outlives the command
    #[arg(long, global = true)]
    memory: bool,
}

/// A scorekeeper plus the lineup table it reads from.
pub struct Session {
    pub keeper: Scorekeeper,
    pub lineups: Arc<StaticLineups>,
    lineups_path: PathBuf,
}

impl StoreArgs {
    pub fn config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::from_env();
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        config.store = if self.memory {
            StoreKind::Memory
        } else {
            StoreKind::File
        };
        config
    }

    pub fn lineups_path(&self) -> PathBuf {
        self.config().resolved_data_dir().join(LINEUPS_FILE)
    }

    /// Opens the configured store with the persisted lineup table.
    pub fn open(&self) -> Result<Session> {
        let lineups_path = self.lineups_path();
        let lineups = StaticLineups::load_json(&lineups_path)
            .with_context(|| format!("Failed to read lineups: {}", lineups_path.display()))?;
        self.open_with(lineups)
    }

    /// Opens the configured store with lineups supplied by the caller.
    pub fn open_with(&self, lineups: StaticLineups) -> Result<Session> {
        let config = self.config();
        let lineups_path = self.lineups_path();
        tracing::debug!(
            "Opening {:?} store at {}",
            config.store,
            config.resolved_data_dir().display()
        );

        let lineups = Arc::new(lineups);
        let keeper = Scorekeeper::builder()
            .config(config)
            .lineups(lineups.clone())
            .build()
            .map_err(rejected)?;

        Ok(Session {
            keeper,
            lineups,
            lineups_path,
        })
    }
}

impl Session {
    pub fn save_lineups(&self) -> Result<()> {
        self.lineups
            .save_json(&self.lineups_path)
            .with_context(|| format!("Failed to write lineups: {}", self.lineups_path.display()))
    }

    pub fn lineups_path(&self) -> &PathBuf {
        &self.lineups_path
    }
}

/// Tags a runtime error with its stable code.
pub fn rejected(err: RuntimeError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", err.error_code(), err)
}
