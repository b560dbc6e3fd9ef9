//! Live table input: shots, pulls and undo.

use anyhow::Result;
use clap::Parser;
use console::style;
use cup_core::{Applied, GameId, GameRecord, PlayerId, ShotAction, TeamId, Transition};

use super::parse_result;
use crate::context::{StoreArgs, rejected};

/// Record a shot
#[derive(Parser)]
pub struct Shot {
    #[arg(value_name = "GAME")]
    game: u64,

    /// Shooting team
    #[arg(short, long)]
    team: u64,

    /// Shooter
    #[arg(short, long)]
    shooter: u64,

    /// TOP_REGULAR, TOP_ISO, BOTTOM_REGULAR, BOTTOM_ISO or MISS
    #[arg(short, long)]
    result: String,
}

impl Shot {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let action = ShotAction::shot(
            TeamId(self.team),
            PlayerId(self.shooter),
            parse_result(&self.result)?,
        );
        submit(store, GameId(self.game), &action)
    }
}

/// Record a pull
#[derive(Parser)]
pub struct Pull {
    #[arg(value_name = "GAME")]
    game: u64,

    /// Team submitting the pull
    #[arg(short, long)]
    team: u64,

    /// PULL_HOME or PULL_AWAY
    #[arg(short, long)]
    result: String,

    /// Cups to remove; negative puts cups back
    #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
    count: i32,
}

impl Pull {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let action = ShotAction::pull(TeamId(self.team), parse_result(&self.result)?, self.count);
        submit(store, GameId(self.game), &action)
    }
}

/// Remove the latest event
#[derive(Parser)]
pub struct Undo {
    #[arg(value_name = "GAME")]
    game: u64,
}

impl Undo {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let session = store.open()?;
        let game = GameId(self.game);
        let removed = session.keeper.undo(game).map_err(rejected)?;
        println!(
            "{} {} ({})",
            style("Removed").bold().yellow(),
            removed.id,
            removed.result_type
        );
        let record = session.keeper.get_state(game).map_err(rejected)?;
        print_scoreline(&record);
        Ok(())
    }
}

fn submit(store: &StoreArgs, game: GameId, action: &ShotAction) -> Result<()> {
    let session = store.open()?;
    let applied = session.keeper.append_event(game, action).map_err(rejected)?;
    let record = session.keeper.get_state(game).map_err(rejected)?;

    println!("{} {}", style("Recorded").bold().green(), applied.event_id);
    print_transition(&applied);
    print_scoreline(&record);
    Ok(())
}

fn print_transition(applied: &Applied) {
    match &applied.transition {
        Transition::OpenTurn { plan, phase } => println!(
            "  {} {} takes a {:?} turn ({})",
            style("Turn over:").bold().cyan(),
            plan.offense_team_id,
            plan.kind,
            phase
        ),
        Transition::Finish { phase, winner, .. } => match winner {
            Some(team) => println!(
                "  {} {} wins in {}",
                style("Game over:").bold().magenta(),
                team,
                phase
            ),
            None => println!(
                "  {} tied in {}, finalize with a winner",
                style("Game over:").bold().magenta(),
                phase
            ),
        },
        Transition::Hold | Transition::Advance { .. } => {}
    }
}

pub(crate) fn print_scoreline(record: &GameRecord) {
    let state = &record.state;
    println!(
        "  home {} / away {} | {} {} | turn #{} ({})",
        state.home_cups_remaining,
        state.away_cups_remaining,
        state.status,
        state.phase,
        state.current_turn_number,
        state.possession_team_id
    );
}
