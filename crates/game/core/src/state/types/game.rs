use super::{GameId, Side, TeamId};

/// Lifecycle of a match. Only the scoring engine moves a game between states.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Final,
}

/// Where a game's event log came from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GameSource {
    /// Scored shot by shot at the table.
    Live,
    /// Back-filled from historical records.
    Imported,
}

/// A match between two teams.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub status: GameStatus,
    pub source: GameSource,
    /// Set when the game is decided. A tied overtime stays `None` until a
    /// winner is supplied through finalize.
    pub winner_team_id: Option<TeamId>,
}

impl Game {
    pub fn new(id: GameId, home_team_id: TeamId, away_team_id: TeamId, source: GameSource) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            status: GameStatus::Scheduled,
            source,
            winner_team_id: None,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.source == GameSource::Live
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// Team playing on the given side.
    pub fn team(&self, side: Side) -> TeamId {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    /// Side a team plays on, or `None` if the team is not part of this game.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if team == self.home_team_id {
            Some(Side::Home)
        } else if team == self.away_team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// The other team in this game.
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        self.side_of(team).map(|side| self.team(side.opposite()))
    }
}
