//! Creating, starting and inspecting games.

use anyhow::Result;
use clap::Parser;
use console::style;
use cup_core::{GameId, GameSource, TeamId};

use crate::context::{StoreArgs, rejected};
use crate::render::{OutputFormat, print_record};

/// Create a scheduled game
#[derive(Parser)]
pub struct NewGame {
    /// Home team id
    #[arg(value_name = "HOME")]
    home: u64,

    /// Away team id
    #[arg(value_name = "AWAY")]
    away: u64,

    /// Mark the game as imported from another system (no adjustments)
    #[arg(long)]
    imported: bool,

    /// Start the game right away
    #[arg(long)]
    start: bool,
}

impl NewGame {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let source = if self.imported {
            GameSource::Imported
        } else {
            GameSource::Live
        };

        let game = session
            .keeper
            .create_game(TeamId(self.home), TeamId(self.away), source)
            .map_err(rejected)?;
        println!("{} {}", style("Created").bold().green(), game);

        if self.start {
            session.keeper.start_game(game).map_err(rejected)?;
            println!("{} {}", style("Started").bold().green(), game);
        }
        Ok(())
    }
}

/// Start a scheduled game
#[derive(Parser)]
pub struct StartGame {
    #[arg(value_name = "GAME")]
    game: u64,
}

impl StartGame {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let state = session
            .keeper
            .start_game(GameId(self.game))
            .map_err(rejected)?;
        println!(
            "{} {}, {} shoots first",
            style("Started").bold().green(),
            GameId(self.game),
            state.possession_team_id
        );
        Ok(())
    }
}

/// Show a game
#[derive(Parser)]
pub struct Show {
    #[arg(value_name = "GAME")]
    game: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Show {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let record = session
            .keeper
            .get_state(GameId(self.game))
            .map_err(rejected)?;
        print_record(&record, self.format)
    }
}

/// List stored games
#[derive(Parser)]
pub struct ListGames;

impl ListGames {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let games = session.keeper.list_games().map_err(rejected)?;
        if games.is_empty() {
            println!("{}", style("No games stored").dim());
            return Ok(());
        }

        for id in games {
            let record = session.keeper.get_state(id).map_err(rejected)?;
            let state = &record.state;
            println!(
                "{:>10}  {} vs {}  {:<11} home {:>3} / away {:>3}",
                id.to_string(),
                record.game.home_team_id,
                record.game.away_team_id,
                state.status.to_string(),
                state.home_cups_remaining,
                state.away_cups_remaining
            );
        }
        Ok(())
    }
}
