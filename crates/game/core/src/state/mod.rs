//! Authoritative game records.
//!
//! A [`GameRecord`] is the unit of persistence: the match metadata, the
//! scoreboard projection, the turn list and the event log, always read and
//! written together. Runtime layers load, hand it to the engine, and commit
//! the result; they never edit the projection themselves.
pub mod log;
pub mod types;

pub use log::{EventDraft, EventLog};
pub use types::{
    EventId, Game, GameId, GameSource, GameState, GameStatus, Phase, PlayerId, ShotEvent, Side,
    TeamId, Timestamp, Turn, TurnId, TurnKind, TurnPlan,
};

/// Everything the scoring engine knows about one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRecord {
    pub game: Game,
    pub state: GameState,
    turns: Vec<Turn>,
    events: EventLog,
    next_turn_id: u64,
}

impl GameRecord {
    /// Creates a scheduled game with full racks and no turns yet.
    pub fn new(game: Game, rack_size: u32) -> Self {
        let state = GameState::initial(&game, rack_size);
        Self {
            game,
            state,
            turns: Vec::new(),
            events: EventLog::new(),
            next_turn_id: 1,
        }
    }

    /// Reassembles a record from stored parts.
    ///
    /// Turns are re-sorted by index and events by `(timestamp, id)`.
    pub fn from_parts(
        game: Game,
        state: GameState,
        mut turns: Vec<Turn>,
        events: Vec<ShotEvent>,
    ) -> Self {
        turns.sort_by_key(|turn| turn.turn_index);
        let next_turn_id = turns.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        Self {
            game,
            state,
            turns,
            events: EventLog::from_events(events),
            next_turn_id,
        }
    }

    #[inline]
    pub fn id(&self) -> GameId {
        self.game.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    /// Highest-index turn.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn turn(&self, id: TurnId) -> Option<&Turn> {
        self.turns.iter().find(|turn| turn.id == id)
    }

    pub fn turn_by_index(&self, turn_index: u32) -> Option<&Turn> {
        self.turns.iter().find(|turn| turn.turn_index == turn_index)
    }

    /// Opens the next turn from a plan; its index follows the current tail.
    pub fn push_turn(&mut self, plan: TurnPlan) -> &Turn {
        let turn_index = self.turns.last().map_or(1, |turn| turn.turn_index + 1);
        let id = TurnId(self.next_turn_id.max(1));
        self.next_turn_id = id.0 + 1;
        self.turns.push(plan.into_turn(id, self.game.id, turn_index));

        let len = self.turns.len();
        &self.turns[len - 1]
    }

    /// Drops trailing turns that have no events, keeping at least `keep`
    /// turns in place. Returns the removed turns, tail first.
    pub fn pop_empty_turns(&mut self, keep: usize) -> Vec<Turn> {
        let mut removed = Vec::new();
        while self.turns.len() > keep {
            let Some(tail) = self.turns.last() else {
                break;
            };
            if self.events.has_events_for(tail.id) {
                break;
            }
            if let Some(turn) = self.turns.pop() {
                removed.push(turn);
            }
        }
        removed
    }

    /// Puts a previously removed turn back at the tail.
    pub(crate) fn restore_turn(&mut self, turn: Turn) {
        debug_assert_eq!(
            turn.turn_index,
            self.turns.last().map_or(1, |t| t.turn_index + 1)
        );
        self.turns.push(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GameRecord {
        let game = Game::new(GameId(1), TeamId(1), TeamId(2), GameSource::Live);
        GameRecord::new(game, 100)
    }

    fn plan(team: u64) -> TurnPlan {
        TurnPlan {
            offense_team_id: TeamId(team),
            kind: TurnKind::Regular,
            eligible_shooters: vec![],
        }
    }

    #[test]
    fn turn_indices_are_gapless() {
        let mut record = record();
        record.push_turn(plan(1));
        record.push_turn(plan(2));
        record.push_turn(plan(1));

        let indices: Vec<u32> = record.turns().iter().map(|t| t.turn_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn pop_empty_turns_respects_floor() {
        let mut record = record();
        record.push_turn(plan(1));
        record.push_turn(plan(2));

        let removed = record.pop_empty_turns(1);
        assert_eq!(removed.len(), 1);
        assert_eq!(record.turns().len(), 1);
        assert_eq!(record.turns()[0].turn_index, 1);
    }

    #[test]
    fn turn_ids_are_not_reused() {
        let mut record = record();
        let first = record.push_turn(plan(1)).id;
        record.pop_empty_turns(0);
        let second = record.push_turn(plan(1)).id;
        assert_ne!(first, second);
    }
}
