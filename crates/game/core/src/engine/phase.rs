//! Phase and turn transitions evaluated after each event.
//!
//! Evaluation is a pure function of the game, the scoreboard after the
//! event's cups were applied, the turn, and the turn's entries up to and
//! including the event. The incremental path and full replay both call it,
//! which is what keeps them in agreement.

use crate::state::{Game, GameState, Phase, ShotEvent, Side, TeamId, Turn, TurnKind, TurnPlan};

use super::turns::{TurnManager, count_shots, distinct_makers};

/// What the rules decided after one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing moves. Used for out-of-band corrections.
    Hold,

    /// Same turn continues with this shooter index.
    Advance { shooter_index: u32 },

    /// The turn is over and `plan` opens next.
    OpenTurn { plan: TurnPlan, phase: Phase },

    /// The game is over. `winner` is `None` for a tied overtime.
    Finish {
        phase: Phase,
        winner: Option<TeamId>,
        shooter_index: u32,
    },
}

/// Evaluates the transition rules of the three phases.
#[derive(Clone, Copy, Debug)]
pub struct PhaseController<'a> {
    turns: TurnManager<'a>,
}

impl<'a> PhaseController<'a> {
    pub fn new(turns: TurnManager<'a>) -> Self {
        Self { turns }
    }

    /// Decides the transition caused by `event`.
    ///
    /// `turn_events` are the turn's entries in log order ending with `event`.
    pub fn evaluate(
        &self,
        game: &Game,
        state: &GameState,
        turn: &Turn,
        turn_events: &[&ShotEvent],
        event: &ShotEvent,
    ) -> Transition {
        if event.out_of_band {
            return Transition::Hold;
        }

        if drove_both_racks_dry(game, state, event) {
            return Transition::Finish {
                phase: Phase::Overtime,
                winner: None,
                shooter_index: state.current_shooter_index,
            };
        }

        match turn.kind {
            TurnKind::Redemption { quota } => self.redemption(game, state, turn, turn_events, event, quota),
            TurnKind::Regular | TurnKind::Bonus => self.regulation(game, turn, turn_events, event),
        }
    }

    fn regulation(
        &self,
        game: &Game,
        turn: &Turn,
        turn_events: &[&ShotEvent],
        event: &ShotEvent,
    ) -> Transition {
        let shots = count_shots(turn_events.iter().copied());
        if event.is_pull() || shots < self.turns.quota(game, turn) {
            return Transition::Advance {
                shooter_index: shots,
            };
        }

        let offense = turn.offense_team_id;
        let Some(defense) = game.opponent_of(offense) else {
            return Transition::Advance {
                shooter_index: shots,
            };
        };

        let shots_taken = || turn_events.iter().copied().filter(|e| e.is_counted_shot());
        let cleared = shots_taken().any(|e| e.cleared_rack());
        let stuff_makes = shots_taken().filter(|e| e.is_stuff_make()).count();

        if cleared {
            if stuff_makes >= 2 {
                return Transition::Finish {
                    phase: Phase::Regulation,
                    winner: Some(offense),
                    shooter_index: shots,
                };
            }
            return Transition::OpenTurn {
                plan: self.turns.redemption_plan(game, defense, offense),
                phase: Phase::Redemption,
            };
        }

        let makers = distinct_makers(turn_events.iter().copied());
        if makers.len() >= 2 {
            return Transition::OpenTurn {
                plan: self.turns.bonus_plan(offense, makers),
                phase: Phase::Regulation,
            };
        }

        Transition::OpenTurn {
            plan: self.turns.regular_plan(game, defense),
            phase: Phase::Regulation,
        }
    }

    fn redemption(
        &self,
        game: &Game,
        state: &GameState,
        turn: &Turn,
        turn_events: &[&ShotEvent],
        event: &ShotEvent,
        quota: u32,
    ) -> Transition {
        // Only misses consume the comeback's attempts.
        let misses = turn_events
            .iter()
            .filter(|e| e.is_counted_shot() && e.is_miss())
            .count() as u32;

        let opponent = game.opponent_of(turn.offense_team_id);
        let opponent_cups = opponent
            .and_then(|team| game.side_of(team))
            .map(|side| state.cups(side));

        if event.is_miss() && opponent_cups == Some(0) {
            return Transition::Finish {
                phase: Phase::Overtime,
                winner: None,
                shooter_index: misses,
            };
        }

        if event.is_shot() && misses >= quota.max(1) {
            return Transition::Finish {
                phase: Phase::Redemption,
                winner: opponent,
                shooter_index: misses,
            };
        }

        Transition::Advance {
            shooter_index: misses,
        }
    }
}

/// The event emptied a rack while the other one was already empty.
fn drove_both_racks_dry(game: &Game, state: &GameState, event: &ShotEvent) -> bool {
    let Some(defense_side) = game.side_of(event.defense_team_id) else {
        return false;
    };
    let touched: Side = event.affected_side(defense_side);
    state.is_dry()
        && state.cups(touched) == 0
        && event.remaining_cups_before > 0
        && event.remaining_cups_after == 0
}
