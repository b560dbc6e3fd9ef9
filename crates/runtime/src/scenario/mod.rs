//! Scripted games loaded from RON.
//!
//! A scenario names two teams with their lineups and an ordered list of
//! table actions. Running it creates and starts a game, then feeds every step
//! through the [`Scorekeeper`] exactly like live input, so a scenario doubles
//! as a reproducible bug report.

use std::path::Path;
use std::str::FromStr;

use cup_core::{
    AdjustAction, AdjustKind, GameId, GameSource, PlayerId, ResultType, ShotAction, TeamId,
};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};
use crate::oracle::StaticLineups;
use crate::runtime::Scorekeeper;

/// A team and its lineup in shooting order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub team: TeamId,
    #[serde(default)]
    pub lineup: Vec<PlayerId>,
}

/// One table action. Result types use their wire names, e.g. `"TOP_ISO"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Shot {
        team: TeamId,
        shooter: PlayerId,
        result: String,
    },
    Pull {
        team: TeamId,
        result: String,
        #[serde(default)]
        count: i32,
    },
    Undo,
    /// `action` is `"ADD"` or `"SUBTRACT"`.
    Adjust {
        player: PlayerId,
        result: String,
        action: String,
    },
    Finalize {
        #[serde(default)]
        winner: Option<TeamId>,
    },
    Recompute {
        #[serde(default)]
        preserve_final: bool,
    },
}

/// Scenario configuration for a scripted game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub home: TeamSheet,
    pub away: TeamSheet,
    /// Imported games reject admin adjustments.
    #[serde(default)]
    pub imported: bool,
    pub steps: Vec<Step>,
}

/// Result of [`Scenario::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioRun {
    pub game: GameId,
    pub steps_applied: usize,
}

impl Scenario {
    /// Lineup table for both teams, to hand to the scorekeeper builder.
    pub fn lineups(&self) -> StaticLineups {
        StaticLineups::new()
            .with_lineup(self.home.team, self.home.lineup.clone())
            .with_lineup(self.away.team, self.away.lineup.clone())
    }

    /// Creates and starts a game, then applies every step in order.
    ///
    /// Stops at the first rejected step; earlier steps stay committed.
    pub fn run(&self, keeper: &Scorekeeper) -> Result<ScenarioRun> {
        let source = if self.imported {
            GameSource::Imported
        } else {
            GameSource::Live
        };
        let game = keeper.create_game(self.home.team, self.away.team, source)?;
        keeper.start_game(game)?;

        tracing::info!(
            "Running scenario '{}' as {} with {} steps",
            self.name,
            game,
            self.steps.len()
        );

        for (index, step) in self.steps.iter().enumerate() {
            self.apply(keeper, game, step).map_err(|err| {
                tracing::warn!("Scenario step {} ({:?}) failed: {}", index + 1, step, err);
                err
            })?;
        }

        Ok(ScenarioRun {
            game,
            steps_applied: self.steps.len(),
        })
    }

    fn apply(&self, keeper: &Scorekeeper, game: GameId, step: &Step) -> Result<()> {
        match step {
            Step::Shot {
                team,
                shooter,
                result,
            } => {
                let result_type = parse_result(result)?;
                keeper.append_event(game, &ShotAction::shot(*team, *shooter, result_type))?;
            }
            Step::Pull {
                team,
                result,
                count,
            } => {
                let result_type = parse_result(result)?;
                keeper.append_event(game, &ShotAction::pull(*team, result_type, *count))?;
            }
            Step::Undo => {
                keeper.undo(game)?;
            }
            Step::Adjust {
                player,
                result,
                action,
            } => {
                let kind = AdjustKind::from_str(action.trim()).map_err(|_| {
                    RuntimeError::InvalidConfig(format!("unknown adjustment action '{}'", action))
                })?;
                keeper.admin_adjust(game, &AdjustAction::new(*player, parse_result(result)?, kind))?;
            }
            Step::Finalize { winner } => {
                keeper.finalize(game, *winner)?;
            }
            Step::Recompute { preserve_final } => {
                keeper.recompute(game, *preserve_final)?;
            }
        }
        Ok(())
    }

    /// Load scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to read scenario file: {}", e))
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to parse scenario RON: {}", e))
        })
    }
}

fn parse_result(value: &str) -> Result<ResultType> {
    ResultType::parse(value.trim()).map_err(|err| RuntimeError::Execute(err.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
        Scenario(
            name: "quick",
            home: (team: 1, lineup: [11, 12]),
            away: (team: 2, lineup: [21, 22]),
            steps: [
                Shot(team: 1, shooter: 11, result: "TOP_ISO"),
                Pull(team: 2, result: "PULL_HOME", count: 3),
                Undo,
                Finalize(winner: None),
                Recompute(preserve_final: true),
            ],
        )
    "#;

    #[test]
    fn parses_steps() {
        let scenario = Scenario::from_ron(SCRIPT).unwrap();
        assert_eq!(scenario.name, "quick");
        assert!(!scenario.imported);
        assert_eq!(scenario.home.lineup, vec![PlayerId(11), PlayerId(12)]);
        assert_eq!(scenario.steps.len(), 5);
        assert_eq!(
            scenario.steps[1],
            Step::Pull {
                team: TeamId(2),
                result: "PULL_HOME".to_owned(),
                count: 3
            }
        );
        assert_eq!(scenario.steps[3], Step::Finalize { winner: None });
    }

    #[test]
    fn malformed_ron_is_a_config_error() {
        assert!(matches!(
            Scenario::from_ron("Scenario(home: )"),
            Err(RuntimeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_result_type_is_a_validation_error() {
        let err = parse_result("SLAM_DUNK").unwrap_err();
        assert!(matches!(err, RuntimeError::Execute(_)));
        assert_eq!(cup_core::GameError::error_code(&err), "UNKNOWN_RESULT_TYPE");
    }
}
