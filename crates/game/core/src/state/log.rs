//! Append-only event log of a single game.

use crate::action::ResultType;

use super::types::{EventId, GameId, PlayerId, ShotEvent, TeamId, Timestamp, TurnId};

/// Event fields known before the log assigns identity and time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDraft {
    pub turn_id: Option<TurnId>,
    pub offense_team_id: TeamId,
    pub defense_team_id: TeamId,
    pub shooter_id: Option<PlayerId>,
    pub result_type: ResultType,
    pub cups_delta: i32,
    pub remaining_cups_before: u32,
    pub remaining_cups_after: u32,
    pub out_of_band: bool,
}

/// Strictly time-ordered record of shots and pulls.
///
/// Entries are kept sorted by `(timestamp, id)`. New entries always land at
/// the tail because [`EventLog::append`] bumps the timestamp past the current
/// tail when the caller's clock lags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    events: Vec<ShotEvent>,
    next_event_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_event_id: 1,
        }
    }

    /// Builds a log from stored entries, restoring the sort order.
    pub fn from_events(mut events: Vec<ShotEvent>) -> Self {
        events.sort_by_key(ShotEvent::log_key);
        let next_event_id = events.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        Self {
            events,
            next_event_id,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShotEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[ShotEvent] {
        &self.events
    }

    pub fn latest(&self) -> Option<&ShotEvent> {
        self.events.last()
    }

    pub fn get(&self, id: EventId) -> Option<&ShotEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Entries recorded against `turn`, in log order.
    pub fn for_turn(&self, turn: TurnId) -> impl Iterator<Item = &ShotEvent> {
        self.events
            .iter()
            .filter(move |event| event.turn_id == Some(turn))
    }

    pub fn has_events_for(&self, turn: TurnId) -> bool {
        self.for_turn(turn).next().is_some()
    }

    /// Appends an entry and returns it.
    ///
    /// The stored timestamp is `now`, or one millisecond past the current
    /// tail if `now` would not be strictly later.
    pub fn append(&mut self, game_id: GameId, draft: EventDraft, now: Timestamp) -> &ShotEvent {
        let timestamp = match self.events.last() {
            Some(tail) if now <= tail.timestamp => tail.timestamp.next(),
            _ => now,
        };
        let id = EventId(self.next_event_id.max(1));
        self.next_event_id = id.0 + 1;

        self.events.push(ShotEvent {
            id,
            game_id,
            turn_id: draft.turn_id,
            offense_team_id: draft.offense_team_id,
            defense_team_id: draft.defense_team_id,
            shooter_id: draft.shooter_id,
            result_type: draft.result_type,
            cups_delta: draft.cups_delta,
            remaining_cups_before: draft.remaining_cups_before,
            remaining_cups_after: draft.remaining_cups_after,
            timestamp,
            out_of_band: draft.out_of_band,
        });

        let len = self.events.len();
        &self.events[len - 1]
    }

    /// Removes and returns the most recent entry.
    pub fn pop_latest(&mut self) -> Option<ShotEvent> {
        self.events.pop()
    }

    /// Removes an entry by id.
    pub fn remove(&mut self, id: EventId) -> Option<ShotEvent> {
        let position = self.events.iter().position(|event| event.id == id)?;
        Some(self.events.remove(position))
    }

    /// Most recent entry matching `predicate`.
    pub fn find_latest<F>(&self, predicate: F) -> Option<&ShotEvent>
    where
        F: Fn(&ShotEvent) -> bool,
    {
        self.events.iter().rev().find(|event| predicate(event))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ShotEvent> {
        self.events.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(result_type: ResultType) -> EventDraft {
        EventDraft {
            turn_id: Some(TurnId(1)),
            offense_team_id: TeamId(1),
            defense_team_id: TeamId(2),
            shooter_id: Some(PlayerId(11)),
            result_type,
            cups_delta: 0,
            remaining_cups_before: 100,
            remaining_cups_after: 100,
            out_of_band: false,
        }
    }

    #[test]
    fn append_keeps_timestamps_strictly_increasing() {
        let mut log = EventLog::new();
        let first = log.append(GameId(1), draft(ResultType::Miss), Timestamp(500)).timestamp;
        // Clock went backwards.
        let second = log.append(GameId(1), draft(ResultType::Miss), Timestamp(100)).timestamp;
        let third = log.append(GameId(1), draft(ResultType::Miss), Timestamp(501)).timestamp;

        assert_eq!(first, Timestamp(500));
        assert_eq!(second, Timestamp(501));
        assert_eq!(third, Timestamp(502));
    }

    #[test]
    fn ids_are_not_reused_after_pop() {
        let mut log = EventLog::new();
        log.append(GameId(1), draft(ResultType::Miss), Timestamp(1));
        let popped = log.pop_latest().expect("entry");
        let next = log.append(GameId(1), draft(ResultType::Miss), Timestamp(2));
        assert!(next.id > popped.id);
    }

    #[test]
    fn from_events_restores_order() {
        let mut log = EventLog::new();
        log.append(GameId(1), draft(ResultType::TopIso), Timestamp(10));
        log.append(GameId(1), draft(ResultType::Miss), Timestamp(20));
        let mut events = log.as_slice().to_vec();
        events.reverse();

        let restored = EventLog::from_events(events);
        assert_eq!(restored.as_slice(), log.as_slice());
        let next = restored.clone().append(GameId(1), draft(ResultType::Miss), Timestamp(0)).id;
        assert_eq!(next, EventId(3));
    }

    #[test]
    fn find_latest_scans_from_tail() {
        let mut log = EventLog::new();
        log.append(GameId(1), draft(ResultType::TopIso), Timestamp(10));
        log.append(GameId(1), draft(ResultType::Miss), Timestamp(20));
        log.append(GameId(1), draft(ResultType::TopIso), Timestamp(30));

        let found = log
            .find_latest(|e| e.result_type == ResultType::TopIso)
            .expect("match");
        assert_eq!(found.id, EventId(3));
    }
}
