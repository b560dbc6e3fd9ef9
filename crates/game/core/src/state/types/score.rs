use super::{Game, GameStatus, Side, TeamId};

/// Stage of play, orthogonal to [`GameStatus`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Phase {
    Regulation,
    Redemption,
    Overtime,
}

/// Authoritative scoreboard of a game.
///
/// A pure projection of the event log: the projector is the only writer and
/// a full replay always reproduces it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub possession_team_id: TeamId,
    pub home_cups_remaining: u32,
    pub away_cups_remaining: u32,
    pub current_turn_number: u32,
    pub current_shooter_index: u32,
    pub phase: Phase,
    pub status: GameStatus,
}

impl GameState {
    /// Full racks, home team on offense in turn 1.
    pub fn initial(game: &Game, rack_size: u32) -> Self {
        Self {
            possession_team_id: game.home_team_id,
            home_cups_remaining: rack_size,
            away_cups_remaining: rack_size,
            current_turn_number: 1,
            current_shooter_index: 0,
            phase: Phase::Regulation,
            status: game.status,
        }
    }

    #[inline]
    pub fn cups(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_cups_remaining,
            Side::Away => self.away_cups_remaining,
        }
    }

    #[inline]
    pub fn set_cups(&mut self, side: Side, cups: u32) {
        match side {
            Side::Home => self.home_cups_remaining = cups,
            Side::Away => self.away_cups_remaining = cups,
        }
    }

    /// Both racks are empty.
    #[inline]
    pub fn is_dry(&self) -> bool {
        self.home_cups_remaining == 0 && self.away_cups_remaining == 0
    }
}
