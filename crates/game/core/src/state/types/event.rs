use crate::action::ResultType;

use super::{EventId, GameId, PlayerId, Side, TeamId, Timestamp, TurnId};

/// One entry of the append-only event log.
///
/// `remaining_cups_before`/`after` describe the rack that the event touched:
/// the defense's rack for shots, the named rack for pulls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotEvent {
    pub id: EventId,
    pub game_id: GameId,
    /// `None` only for adjustments logged before any turn existed.
    pub turn_id: Option<TurnId>,
    pub offense_team_id: TeamId,
    pub defense_team_id: TeamId,
    /// Absent for pulls.
    pub shooter_id: Option<PlayerId>,
    pub result_type: ResultType,
    /// Signed; negative pulls put cups back.
    pub cups_delta: i32,
    pub remaining_cups_before: u32,
    pub remaining_cups_after: u32,
    pub timestamp: Timestamp,
    /// Logged through the admin adjustment path after the game ended. Such
    /// events move cups but never count toward quotas or phase rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub out_of_band: bool,
}

impl ShotEvent {
    #[inline]
    pub fn is_make(&self) -> bool {
        self.result_type.is_make()
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        self.result_type.is_miss()
    }

    #[inline]
    pub fn is_pull(&self) -> bool {
        self.result_type.is_pull()
    }

    #[inline]
    pub fn is_shot(&self) -> bool {
        self.result_type.is_shot()
    }

    /// Counts toward the turn's attempt quota.
    #[inline]
    pub fn is_counted_shot(&self) -> bool {
        self.result_type.is_shot() && !self.out_of_band
    }

    /// Make that emptied a rack that still had cups.
    #[inline]
    pub fn cleared_rack(&self) -> bool {
        self.is_make() && self.remaining_cups_before > 0 && self.remaining_cups_after == 0
    }

    /// Make scored into a rack that was already empty.
    #[inline]
    pub fn is_stuff_make(&self) -> bool {
        self.is_make() && self.remaining_cups_before == 0
    }

    /// Ordering key of the log: timestamp, then id.
    #[inline]
    pub fn log_key(&self) -> (Timestamp, EventId) {
        (self.timestamp, self.id)
    }

    /// Rack this event touches, given which side the defense plays on.
    pub fn affected_side(&self, defense_side: Side) -> Side {
        self.result_type.affected_side(defense_side)
    }
}
