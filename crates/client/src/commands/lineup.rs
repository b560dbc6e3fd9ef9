//! Persisted team lineups.

use anyhow::Result;
use clap::Parser;
use console::style;
use cup_core::{PlayerId, TeamId};

use crate::context::{StoreArgs, rejected};

/// Set the shooting order of a team
#[derive(Parser)]
pub struct SetLineup {
    /// Team id
    #[arg(value_name = "TEAM")]
    team: u64,

    /// Player ids in shooting order; omit to clear the lineup
    #[arg(value_name = "PLAYER")]
    players: Vec<u64>,
}

impl SetLineup {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let team = TeamId(self.team);
        let players: Vec<PlayerId> = self.players.into_iter().map(PlayerId).collect();

        session
            .lineups
            .set_lineup(team, players.clone())
            .map_err(|err| rejected(err.into()))?;
        session.save_lineups()?;

        println!(
            "{} {} now shoots with {} players ({})",
            style("Lineup:").bold().cyan(),
            team,
            players.len(),
            session.lineups_path().display()
        );
        Ok(())
    }
}
