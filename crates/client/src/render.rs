//! Terminal rendering of games.

use anyhow::{Context, Result};
use console::style;
use cup_core::{GameRecord, GameStatus, ShotEvent, Turn, TurnKind};

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Scoreboard with turns and events
    #[default]
    Summary,
    /// Full JSON record
    Json,
}

pub fn print_record(record: &GameRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Summary => {
            print_summary(record);
            Ok(())
        }
        OutputFormat::Json => print_json(record),
    }
}

fn print_json(record: &GameRecord) -> Result<()> {
    let json =
        serde_json::to_string_pretty(record).context("Failed to serialize game to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_summary(record: &GameRecord) {
    let game = &record.game;
    let state = &record.state;

    println!(
        "{} {} vs {} ({})",
        style(format!("=== {} ===", game.id)).bold().green(),
        game.home_team_id,
        game.away_team_id,
        game.source
    );
    println!();

    println!("{}", style("Scoreboard:").bold().yellow());
    println!("  Status: {}", status_label(state.status));
    println!("  Phase: {}", state.phase);
    println!(
        "  Cups: home {} / away {}",
        state.home_cups_remaining, state.away_cups_remaining
    );
    println!(
        "  Turn: #{} ({} shooting, shooter index {})",
        state.current_turn_number, state.possession_team_id, state.current_shooter_index
    );
    if let Some(winner) = game.winner_team_id {
        println!("  Winner: {}", style(winner).bold());
    }
    println!();

    if !record.turns().is_empty() {
        println!("{}", style("Turns:").bold().yellow());
        for turn in record.turns() {
            println!("  {}", turn_line(turn));
        }
        println!();
    }

    if !record.events().is_empty() {
        println!("{}", style("Events:").bold().yellow());
        for event in record.events().iter() {
            println!("  {}", event_line(event));
        }
        println!();
    }
}

fn status_label(status: GameStatus) -> String {
    match status {
        GameStatus::Scheduled => style(status).dim().to_string(),
        GameStatus::InProgress => style(status).cyan().to_string(),
        GameStatus::Final => style(status).green().bold().to_string(),
    }
}

fn turn_line(turn: &Turn) -> String {
    let kind = match turn.kind {
        TurnKind::Regular => "regular".to_owned(),
        TurnKind::Bonus => "bonus".to_owned(),
        TurnKind::Redemption { quota } => format!("redemption, {} misses allowed", quota),
    };
    let shooters: Vec<String> = turn
        .eligible_shooters
        .iter()
        .map(|p| p.0.to_string())
        .collect();
    format!(
        "#{} {} ({}) shooters [{}]",
        turn.turn_index,
        turn.offense_team_id,
        kind,
        shooters.join(", ")
    )
}

fn event_line(event: &ShotEvent) -> String {
    let who = event
        .shooter_id
        .map_or_else(|| event.offense_team_id.to_string(), |p| p.to_string());
    let mut line = format!(
        "{} {} {} {} -> {}",
        event.id, who, event.result_type, event.remaining_cups_before, event.remaining_cups_after
    );
    if event.out_of_band {
        line.push_str(" (adjustment)");
    }
    line
}

#[cfg(test)]
mod tests {
    use cup_core::{EventId, GameId, PlayerId, ResultType, TeamId, Timestamp, TurnId};

    use super::*;

    #[test]
    fn event_lines_name_the_shooter_or_team() {
        let mut event = ShotEvent {
            id: EventId(4),
            game_id: GameId(1),
            turn_id: Some(TurnId(2)),
            offense_team_id: TeamId(1),
            defense_team_id: TeamId(2),
            shooter_id: Some(PlayerId(11)),
            result_type: ResultType::TopIso,
            cups_delta: 1,
            remaining_cups_before: 40,
            remaining_cups_after: 39,
            timestamp: Timestamp(5),
            out_of_band: false,
        };
        assert_eq!(event_line(&event), "event#4 player#11 TOP_ISO 40 -> 39");

        event.shooter_id = None;
        event.result_type = ResultType::PullAway;
        event.out_of_band = true;
        assert_eq!(event_line(&event), "event#4 team#1 PULL_AWAY 40 -> 39 (adjustment)");
    }

    #[test]
    fn redemption_turns_show_their_quota() {
        let turn = Turn {
            id: TurnId(3),
            game_id: GameId(1),
            turn_index: 3,
            offense_team_id: TeamId(2),
            kind: TurnKind::Redemption { quota: 4 },
            eligible_shooters: vec![PlayerId(21), PlayerId(22)],
        };
        assert_eq!(
            turn_line(&turn),
            "#3 team#2 (redemption, 4 misses allowed) shooters [21, 22]"
        );
    }
}
