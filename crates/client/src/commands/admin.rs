//! Corrections: recompute, adjustments and finalization.

use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use console::style;
use cup_core::{AdjustAction, AdjustKind, GameId, PlayerId, TeamId};

use super::{parse_result, play::print_scoreline};
use crate::context::{StoreArgs, rejected};

/// Rebuild the scoreboard from the event log
#[derive(Parser)]
pub struct Recompute {
    #[arg(value_name = "GAME")]
    game: u64,

    /// Keep a FINAL game FINAL even if the log no longer finishes it
    #[arg(long)]
    preserve_final: bool,
}

impl Recompute {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let game = GameId(self.game);
        let report = session
            .keeper
            .recompute(game, self.preserve_final)
            .map_err(rejected)?;

        if report.is_noop() {
            println!("{} {} already consistent", style("Recomputed").bold().green(), game);
        } else {
            println!(
                "{} {}: {} events repaired, {} turns trimmed{}",
                style("Recomputed").bold().yellow(),
                game,
                report.repaired_events,
                report.trimmed_turns,
                if report.created_turn {
                    ", next turn recreated"
                } else {
                    ""
                }
            );
        }
        print_scoreline(&session.keeper.get_state(game).map_err(rejected)?);
        Ok(())
    }
}

/// Correct a finished game
#[derive(Parser)]
pub struct Adjust {
    #[arg(value_name = "GAME")]
    game: u64,

    /// Player whose shot is added or removed
    #[arg(short, long)]
    player: u64,

    /// Shot result, e.g. TOP_ISO
    #[arg(short, long)]
    result: String,

    /// ADD or SUBTRACT
    #[arg(short, long, default_value = "ADD")]
    action: String,
}

impl Adjust {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let kind = AdjustKind::from_str(&self.action.trim().to_ascii_uppercase())
            .map_err(|_| anyhow::anyhow!("unknown adjustment '{}'", self.action))?;
        let adjustment = AdjustAction::new(PlayerId(self.player), parse_result(&self.result)?, kind);

        let session = store.open()?;
        let game = GameId(self.game);
        session
            .keeper
            .admin_adjust(game, &adjustment)
            .map_err(rejected)?;

        println!(
            "{} {} {} for {}",
            style("Adjusted").bold().green(),
            kind,
            adjustment.result_type,
            adjustment.player_id
        );
        print_scoreline(&session.keeper.get_state(game).map_err(rejected)?);
        Ok(())
    }
}

/// Declare a game over
#[derive(Parser)]
pub struct Finalize {
    #[arg(value_name = "GAME")]
    game: u64,

    /// Winning team; required when cups are level
    #[arg(short, long)]
    winner: Option<u64>,
}

impl Finalize {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let winner = session
            .keeper
            .finalize(GameId(self.game), self.winner.map(TeamId))
            .map_err(rejected)?;
        match winner {
            Some(team) => println!(
                "{} {} won {}",
                style("Final:").bold().green(),
                team,
                GameId(self.game)
            ),
            None => println!(
                "{} {} ended level, no winner recorded",
                style("Final:").bold().green(),
                GameId(self.game)
            ),
        }
        Ok(())
    }
}
