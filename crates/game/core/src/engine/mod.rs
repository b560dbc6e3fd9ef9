//! Scoring pipeline.
//!
//! The [`GameEngine`] is the only code that mutates a [`GameRecord`]. Each
//! operation validates against the record, works on a private copy, and
//! swaps the copy in only when every step succeeded, so a rejected call
//! leaves the record exactly as it was.
//!
//! Control flow for a shot: [`TurnManager`] resolves the open turn,
//! [`CupsLedger`](crate::ledger::CupsLedger) computes the rack change, the
//! event is appended, [`PhaseController`] decides what happens next, and
//! [`StateProjector`] folds that decision into the scoreboard.

mod errors;
mod phase;
mod projector;
mod turns;

pub use errors::{ExecuteError, NotFoundError, StateConflictError, ValidationError};
pub use phase::{PhaseController, Transition};
pub use projector::{RecomputeReport, StateProjector};
pub use turns::{TurnManager, shots_in_turn};

use crate::action::{AdjustAction, AdjustKind, ShotAction};
use crate::env::GameEnv;
use crate::state::{EventDraft, EventId, GameRecord, GameStatus, ShotEvent, TeamId, Timestamp};

/// Outcome of a successful [`GameEngine::apply_event`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub event_id: EventId,
    /// Transition the event caused.
    pub transition: Transition,
}

/// Applies scoring operations to one game record.
pub struct GameEngine<'a> {
    record: &'a mut GameRecord,
}

impl<'a> GameEngine<'a> {
    pub fn new(record: &'a mut GameRecord) -> Self {
        Self { record }
    }

    /// Moves a scheduled game to IN_PROGRESS and opens turn #1.
    pub fn start(&mut self, env: GameEnv<'_>) -> Result<(), ExecuteError> {
        self.transact(|record| {
            let status = record.game.status;
            if status != GameStatus::Scheduled {
                return Err(StateConflictError::NotScheduled { status }.into());
            }
            record.game.status = GameStatus::InProgress;
            record.state.status = GameStatus::InProgress;
            TurnManager::new(env).current_turn(record);
            Ok(())
        })
    }

    /// Records a shot or pull against the open turn.
    pub fn apply_event(
        &mut self,
        env: GameEnv<'_>,
        action: &ShotAction,
        now: Timestamp,
    ) -> Result<Applied, ExecuteError> {
        self.transact(|record| {
            let status = record.game.status;
            if status != GameStatus::InProgress {
                return Err(StateConflictError::NotInProgress { status }.into());
            }
            let game = record.game.clone();
            if game.side_of(action.team_id).is_none() {
                return Err(ValidationError::UnknownTeam(action.team_id).into());
            }

            let projector = StateProjector::new(env);
            let turns = projector.turns();
            let result_type = action.result_type;

            let turn = turns.current_turn(record).clone();
            let offense = turn.offense_team_id;
            if result_type.is_shot() {
                if action.shooter_id.is_none() {
                    return Err(ValidationError::MissingShooter.into());
                }
                if action.team_id != offense {
                    return Err(ValidationError::TeamNotOnOffense {
                        team: action.team_id,
                        offense,
                    }
                    .into());
                }
            }
            turns.check_shooter(&game, &turn, result_type, action.shooter_id)?;

            let defense = game
                .opponent_of(offense)
                .ok_or(ValidationError::UnknownTeam(offense))?;
            let defense_side = game
                .side_of(defense)
                .ok_or(ValidationError::UnknownTeam(defense))?;
            let affected = result_type.affected_side(defense_side);
            let cups = projector
                .ledger()
                .apply(result_type, action.count, record.state.cups(affected));

            let event = record
                .events_mut()
                .append(
                    game.id,
                    EventDraft {
                        turn_id: Some(turn.id),
                        offense_team_id: offense,
                        defense_team_id: defense,
                        shooter_id: action.shooter_id.filter(|_| result_type.is_shot()),
                        result_type,
                        cups_delta: cups.delta,
                        remaining_cups_before: cups.before,
                        remaining_cups_after: cups.after,
                        out_of_band: false,
                    },
                    now,
                )
                .clone();
            record.state.set_cups(affected, cups.after);

            let transition = {
                let turn_events: Vec<&ShotEvent> = record.events().for_turn(turn.id).collect();
                projector
                    .phases()
                    .evaluate(&game, &record.state, &turn, &turn_events, &event)
            };
            projector.project(record, transition.clone());

            Ok(Applied {
                event_id: event.id,
                transition,
            })
        })
    }

    /// Removes the most recent event and rebuilds the scoreboard.
    ///
    /// Undoing the event that ended a game reopens it.
    pub fn undo(&mut self, env: GameEnv<'_>) -> Result<ShotEvent, ExecuteError> {
        self.transact(|record| {
            let removed = record
                .events_mut()
                .pop_latest()
                .ok_or(NotFoundError::NothingToUndo)?;
            record.pop_empty_turns(1);
            StateProjector::new(env).recompute(record, false);
            Ok(removed)
        })
    }

    /// Rebuilds the scoreboard from the log. See [`StateProjector::recompute`].
    pub fn recompute(
        &mut self,
        env: GameEnv<'_>,
        preserve_final_status: bool,
    ) -> Result<RecomputeReport, ExecuteError> {
        self.transact(|record| {
            if record.game.status == GameStatus::Scheduled {
                return Err(StateConflictError::NotStarted.into());
            }
            Ok(StateProjector::new(env).recompute(record, preserve_final_status))
        })
    }

    /// Admin correction of a finished live game.
    ///
    /// `Add` logs an out-of-band event that moves cups without touching turn
    /// or phase rules. `Subtract` deletes the latest matching event. Either
    /// way the game stays FINAL.
    pub fn adjust(
        &mut self,
        env: GameEnv<'_>,
        adjustment: &AdjustAction,
        now: Timestamp,
    ) -> Result<(), ExecuteError> {
        self.transact(|record| {
            let status = record.game.status;
            if status != GameStatus::Final {
                return Err(StateConflictError::NotFinal { status }.into());
            }
            if !record.game.is_live() {
                return Err(StateConflictError::NotLiveTracked.into());
            }
            let result_type = adjustment.result_type;
            if result_type.is_pull() {
                return Err(ValidationError::PullNotAdjustable(result_type).into());
            }

            match adjustment.kind {
                AdjustKind::Add => add_out_of_band(record, env, adjustment, now)?,
                AdjustKind::Subtract => {
                    let target = record
                        .events()
                        .find_latest(|event| {
                            event.shooter_id == Some(adjustment.player_id)
                                && event.result_type == result_type
                        })
                        .map(|event| event.id)
                        .ok_or(NotFoundError::NoMatchingEvent {
                            player: adjustment.player_id,
                            result_type,
                        })?;
                    record.events_mut().remove(target);
                }
            }

            StateProjector::new(env).recompute(record, true);
            Ok(())
        })
    }

    /// Declares the game over. Returns the recorded winner.
    ///
    /// An IN_PROGRESS game takes `winner` when given, otherwise the team with
    /// more cups left, or no winner when the cups are level. A FINAL game
    /// without a winner can only be finalized again with one.
    pub fn finalize(
        &mut self,
        winner: Option<TeamId>,
    ) -> Result<Option<TeamId>, ExecuteError> {
        self.transact(|record| {
            let game = &record.game;
            if let Some(team) = winner
                && game.side_of(team).is_none()
            {
                return Err(ValidationError::UnknownTeam(team).into());
            }

            let decided = match game.status {
                GameStatus::Scheduled => {
                    return Err(StateConflictError::NotInProgress {
                        status: GameStatus::Scheduled,
                    }
                    .into());
                }
                GameStatus::Final => {
                    if game.winner_team_id.is_some() {
                        return Err(StateConflictError::AlreadyDecided.into());
                    }
                    Some(winner.ok_or(ValidationError::WinnerRequired)?)
                }
                GameStatus::InProgress => winner.or_else(|| cup_leader(record)),
            };

            record.game.status = GameStatus::Final;
            record.game.winner_team_id = decided;
            record.state.status = GameStatus::Final;
            Ok(decided)
        })
    }

    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut GameRecord) -> Result<T, ExecuteError>,
    ) -> Result<T, ExecuteError> {
        let mut work = self.record.clone();
        let out = op(&mut work)?;
        *self.record = work;
        Ok(out)
    }
}

/// Appends an admin event. The offense is the team whose lineup holds the
/// player, falling back to the last turn's offense.
fn add_out_of_band(
    record: &mut GameRecord,
    env: GameEnv<'_>,
    adjustment: &AdjustAction,
    now: Timestamp,
) -> Result<(), ExecuteError> {
    let game = record.game.clone();
    let last_turn = record.last_turn().cloned();

    let offense = [game.home_team_id, game.away_team_id]
        .into_iter()
        .find(|team| env.lineup(game.id, *team).contains(&adjustment.player_id))
        .or(last_turn.as_ref().map(|turn| turn.offense_team_id))
        .unwrap_or(game.home_team_id);
    let defense = game
        .opponent_of(offense)
        .ok_or(ValidationError::UnknownTeam(offense))?;
    let defense_side = game
        .side_of(defense)
        .ok_or(ValidationError::UnknownTeam(defense))?;

    let affected = adjustment.result_type.affected_side(defense_side);
    let cups = StateProjector::new(env).ledger().apply(
        adjustment.result_type,
        None,
        record.state.cups(affected),
    );

    record.events_mut().append(
        game.id,
        EventDraft {
            turn_id: last_turn.map(|turn| turn.id),
            offense_team_id: offense,
            defense_team_id: defense,
            shooter_id: Some(adjustment.player_id),
            result_type: adjustment.result_type,
            cups_delta: cups.delta,
            remaining_cups_before: cups.before,
            remaining_cups_after: cups.after,
            out_of_band: true,
        },
        now,
    );
    Ok(())
}

/// Team with more cups left, `None` when level.
fn cup_leader(record: &GameRecord) -> Option<TeamId> {
    let state = &record.state;
    let game = &record.game;
    match state.home_cups_remaining.cmp(&state.away_cups_remaining) {
        core::cmp::Ordering::Greater => Some(game.home_team_id),
        core::cmp::Ordering::Less => Some(game.away_team_id),
        core::cmp::Ordering::Equal => None,
    }
}
