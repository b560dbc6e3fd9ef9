//! Turn lifecycle: opening turns, shooter eligibility, attempt quotas.

use crate::action::ResultType;
use crate::env::GameEnv;
use crate::state::{
    EventLog, Game, GameRecord, PlayerId, ShotEvent, TeamId, Turn, TurnId, TurnKind, TurnPlan,
};

use super::errors::ValidationError;

/// Rules for creating turns and deciding when they are used up.
#[derive(Clone, Copy, Debug)]
pub struct TurnManager<'a> {
    env: GameEnv<'a>,
}

impl<'a> TurnManager<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    /// Turn #1: the home team with its lineup.
    pub fn opening_plan(&self, game: &Game) -> TurnPlan {
        self.regular_plan(game, game.home_team_id)
    }

    /// Ordinary possession for `offense` with its full lineup.
    pub fn regular_plan(&self, game: &Game, offense: TeamId) -> TurnPlan {
        TurnPlan {
            offense_team_id: offense,
            kind: TurnKind::Regular,
            eligible_shooters: self.env.lineup(game.id, offense),
        }
    }

    /// Extra possession for the same offense, limited to who made.
    pub fn bonus_plan(&self, offense: TeamId, makers: Vec<PlayerId>) -> TurnPlan {
        TurnPlan {
            offense_team_id: offense,
            kind: TurnKind::Bonus,
            eligible_shooters: makers,
        }
    }

    /// Comeback for the team whose rack was cleared. The cleared team shoots
    /// with its own lineup; the quota is the clearing team's lineup size.
    pub fn redemption_plan(&self, game: &Game, cleared: TeamId, clearing: TeamId) -> TurnPlan {
        let clearing_lineup = self.env.lineup(game.id, clearing).len() as u32;
        let quota = if clearing_lineup == 0 {
            self.env.config().default_lineup_size
        } else {
            clearing_lineup
        };
        TurnPlan {
            offense_team_id: cleared,
            kind: TurnKind::Redemption { quota },
            eligible_shooters: self.env.lineup(game.id, cleared),
        }
    }

    /// The open turn, or turn #1 created on the spot when the game has none.
    pub fn current_turn<'r>(&self, record: &'r mut GameRecord) -> &'r Turn {
        if record.last_turn().is_none() {
            let plan = self.opening_plan(&record.game);
            record.push_turn(plan);
        }
        // Non-empty after the push above.
        let len = record.turns().len();
        &record.turns()[len - 1]
    }

    /// Captured shooters, or the offense's current lineup when the turn was
    /// opened without one.
    pub fn eligible_shooters(&self, game: &Game, turn: &Turn) -> Vec<PlayerId> {
        if turn.eligible_shooters.is_empty() {
            self.env.lineup(game.id, turn.offense_team_id)
        } else {
            turn.eligible_shooters.clone()
        }
    }

    /// Rejects a shot whose shooter is missing or outside the eligible set.
    /// Pulls carry no shooter and always pass. An empty eligible set accepts
    /// anyone.
    pub fn check_shooter(
        &self,
        game: &Game,
        turn: &Turn,
        result_type: ResultType,
        shooter: Option<PlayerId>,
    ) -> Result<(), ValidationError> {
        if result_type.is_pull() {
            return Ok(());
        }
        let shooter = shooter.ok_or(ValidationError::MissingShooter)?;
        let eligible = self.eligible_shooters(game, turn);
        if eligible.is_empty() || eligible.contains(&shooter) {
            Ok(())
        } else {
            Err(ValidationError::ShooterNotEligible {
                shooter,
                turn: turn.id,
            })
        }
    }

    /// Attempts the turn allows before the rules take over.
    pub fn quota(&self, game: &Game, turn: &Turn) -> u32 {
        if let TurnKind::Redemption { quota } = turn.kind {
            return quota.max(1);
        }
        match self.eligible_shooters(game, turn).len() as u32 {
            0 => self.env.config().default_lineup_size.max(1),
            n => n,
        }
    }

    /// Whether the counted shots have reached the quota.
    pub fn turn_exhausted(&self, game: &Game, log: &EventLog, turn: &Turn) -> bool {
        shots_in_turn(log, turn.id) >= self.quota(game, turn)
    }
}

/// Non-pull, in-band entries recorded against a turn.
pub fn shots_in_turn(log: &EventLog, turn: TurnId) -> u32 {
    count_shots(log.for_turn(turn))
}

pub(crate) fn count_shots<'e>(events: impl IntoIterator<Item = &'e ShotEvent>) -> u32 {
    events
        .into_iter()
        .filter(|event| event.is_counted_shot())
        .count() as u32
}

/// Distinct shooters who made, in order of their first make.
pub(crate) fn distinct_makers<'e>(events: impl IntoIterator<Item = &'e ShotEvent>) -> Vec<PlayerId> {
    let mut makers = Vec::new();
    for event in events {
        if !event.is_make() || event.out_of_band {
            continue;
        }
        if let Some(shooter) = event.shooter_id
            && !makers.contains(&shooter)
        {
            makers.push(shooter);
        }
    }
    makers
}
