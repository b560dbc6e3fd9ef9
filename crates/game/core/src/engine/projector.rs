//! Folding the event log into the scoreboard.
//!
//! [`StateProjector::project`] applies one transition to the live record and
//! is what the incremental path uses. [`StateProjector::recompute`] rebuilds
//! the same scoreboard from nothing but the log and the stored turns.

use crate::env::GameEnv;
use crate::ledger::CupsLedger;
use crate::state::{
    GameRecord, GameState, GameStatus, Phase, ShotEvent, TeamId, Turn, TurnKind, TurnPlan,
};

use super::phase::{PhaseController, Transition};
use super::turns::TurnManager;

/// What a full recompute changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    /// Events whose before/after values had drifted and were rewritten.
    pub repaired_events: usize,
    /// Empty trailing turns deleted.
    pub trimmed_turns: usize,
    /// Whether a successor turn had to be created.
    pub created_turn: bool,
    /// Whether the scoreboard differs from what was stored.
    pub state_changed: bool,
}

impl RecomputeReport {
    pub fn is_noop(&self) -> bool {
        self.repaired_events == 0
            && self.trimmed_turns == 0
            && !self.created_turn
            && !self.state_changed
    }
}

/// Sole writer of [`GameState`].
#[derive(Clone, Copy, Debug)]
pub struct StateProjector<'a> {
    env: GameEnv<'a>,
}

impl<'a> StateProjector<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn ledger(&self) -> CupsLedger {
        CupsLedger::new(self.env.config().rack_size)
    }

    pub fn turns(&self) -> TurnManager<'a> {
        TurnManager::new(self.env)
    }

    pub fn phases(&self) -> PhaseController<'a> {
        PhaseController::new(self.turns())
    }

    /// Applies a transition to the record, opening the next turn if the
    /// rules ask for one. Returns the opened turn.
    pub fn project(&self, record: &mut GameRecord, transition: Transition) -> Option<Turn> {
        fold_transition(record, transition).map(|plan| record.push_turn(plan).clone())
    }

    /// Rebuilds the scoreboard from the log.
    ///
    /// 1. Trailing turns without events are set aside (turn #1 always stays).
    /// 2. Every event's before/after is recomputed in log order and repaired
    ///    if it drifted.
    /// 3. The log is replayed through the phase rules against the stored
    ///    turns. If the last transition opens a turn, the set-aside turn is
    ///    reused when it matches, otherwise a new one is created.
    /// 4. The game is FINAL when the replay ends it, or when
    ///    `preserve_final_status` is set and it was already FINAL.
    ///
    /// Running it twice in a row changes nothing the second time.
    pub fn recompute(&self, record: &mut GameRecord, preserve_final_status: bool) -> RecomputeReport {
        let mut report = RecomputeReport::default();
        let stored_state = record.state.clone();
        let was_final = record.game.is_final();
        let prior_winner = record.game.winner_team_id;

        let mut set_aside = record.pop_empty_turns(1);
        report.trimmed_turns = set_aside.len();

        report.repaired_events = self.repair_ledger(record);

        let replay = self.replay(record);

        // Reuse the set-aside successor only if it is exactly what the rules
        // want next; anything else is discarded.
        if let Some(plan) = replay.pending {
            match set_aside.pop() {
                Some(candidate) if candidate.plan() == plan => {
                    record.restore_turn(candidate);
                    report.trimmed_turns -= 1;
                }
                _ => {
                    record.push_turn(plan);
                    report.created_turn = true;
                }
            }
        }
        if record.turns().is_empty() && record.game.status != GameStatus::Scheduled {
            let plan = self.turns().opening_plan(&record.game);
            record.push_turn(plan);
            report.created_turn = true;
        }

        let mut state = replay.state;
        let finished = replay.finish.is_some();
        let keep_final = preserve_final_status && was_final;
        state.status = if finished || keep_final {
            GameStatus::Final
        } else if record.game.status == GameStatus::Scheduled {
            GameStatus::Scheduled
        } else {
            GameStatus::InProgress
        };

        record.game.winner_team_id = match replay.finish {
            Some(Some(winner)) => Some(winner),
            Some(None) if was_final => prior_winner,
            Some(None) => None,
            None if keep_final => prior_winner,
            None => None,
        };
        record.game.status = state.status;

        report.state_changed = state != stored_state;
        record.state = state;
        report
    }

    /// Rewrites drifted before/after values. Returns how many were touched.
    fn repair_ledger(&self, record: &mut GameRecord) -> usize {
        let ledger = self.ledger();
        let rack = self.env.config().rack_size;
        let game = record.game.clone();
        let mut cups = GameState::initial(&game, rack);
        let mut repaired = 0;

        for event in record.events_mut().iter_mut() {
            let Some(defense_side) = game.side_of(event.defense_team_id) else {
                continue;
            };
            let side = event.affected_side(defense_side);
            let settled = ledger.settle(cups.cups(side), event.cups_delta);
            if event.remaining_cups_before != settled.before
                || event.remaining_cups_after != settled.after
            {
                event.remaining_cups_before = settled.before;
                event.remaining_cups_after = settled.after;
                repaired += 1;
            }
            cups.set_cups(side, settled.after);
        }

        repaired
    }

    /// Runs the phase rules over the whole log.
    fn replay(&self, record: &GameRecord) -> Replay {
        let game = &record.game;
        let phases = self.phases();
        let mut state = GameState::initial(game, self.env.config().rack_size);
        state.status = GameStatus::InProgress;

        let mut pending: Option<TurnPlan> = None;
        let mut finish: Option<Option<TeamId>> = None;
        let mut current: Option<&Turn> = None;
        let mut turn_events: Vec<&ShotEvent> = Vec::new();

        for event in record.events().iter() {
            if let Some(defense_side) = game.side_of(event.defense_team_id) {
                let side = event.affected_side(defense_side);
                state.set_cups(side, event.remaining_cups_after);
            }
            if finish.is_some() {
                continue;
            }
            let Some(turn) = event.turn_id.and_then(|id| record.turn(id)) else {
                continue;
            };

            if current.map(|t| t.id) != Some(turn.id) {
                enter_turn(&mut state, turn);
                current = Some(turn);
                turn_events.clear();
                pending = None;
            }
            turn_events.push(event);

            let transition = phases.evaluate(game, &state, turn, &turn_events, event);
            match &transition {
                Transition::OpenTurn { plan, .. } => pending = Some(plan.clone()),
                Transition::Finish { winner, .. } => finish = Some(*winner),
                Transition::Hold | Transition::Advance { .. } => {}
            }
            fold_into_state(&mut state, transition);
        }

        Replay {
            state,
            pending,
            finish,
        }
    }
}

struct Replay {
    state: GameState,
    /// Turn the last transition asked to open.
    pending: Option<TurnPlan>,
    /// Set once the replay ended the game; inner value is the winner.
    finish: Option<Option<TeamId>>,
}

/// Aligns the scoreboard with a stored turn the replay is entering.
fn enter_turn(state: &mut GameState, turn: &Turn) {
    state.current_turn_number = turn.turn_index;
    state.possession_team_id = turn.offense_team_id;
    state.current_shooter_index = 0;
    state.phase = match turn.kind {
        TurnKind::Redemption { .. } => Phase::Redemption,
        TurnKind::Regular | TurnKind::Bonus => Phase::Regulation,
    };
}

/// Updates the scoreboard for a transition. Returns the plan of a turn to
/// open, if any.
fn fold_into_state(state: &mut GameState, transition: Transition) -> Option<TurnPlan> {
    match transition {
        Transition::Hold => None,
        Transition::Advance { shooter_index } => {
            state.current_shooter_index = shooter_index;
            None
        }
        Transition::OpenTurn { plan, phase } => {
            state.current_turn_number += 1;
            state.current_shooter_index = 0;
            state.possession_team_id = plan.offense_team_id;
            state.phase = phase;
            Some(plan)
        }
        Transition::Finish {
            phase,
            shooter_index,
            ..
        } => {
            state.phase = phase;
            state.current_shooter_index = shooter_index;
            state.status = GameStatus::Final;
            None
        }
    }
}

/// Applies a transition to both the scoreboard and the game metadata.
fn fold_transition(record: &mut GameRecord, transition: Transition) -> Option<TurnPlan> {
    if let Transition::Finish { winner, .. } = &transition {
        record.game.status = GameStatus::Final;
        record.game.winner_team_id = *winner;
    }
    fold_into_state(&mut record.state, transition)
}
