//! Inputs accepted by the scoring engine.
//!
//! Each action is plain data. Validation against the current game happens in
//! the engine so a rejected action never touches the record.
mod result;

pub use result::ResultType;

use crate::state::{PlayerId, TeamId};

/// A shot or pull submitted from the table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotAction {
    /// Team submitting the entry. Must be one of the game's teams.
    pub team_id: TeamId,
    /// Required for shots, ignored for pulls.
    pub shooter_id: Option<PlayerId>,
    pub result_type: ResultType,
    /// Pull magnitude; `None` and `Some(0)` both mean one cup.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: Option<i32>,
}

impl ShotAction {
    pub fn shot(team_id: TeamId, shooter_id: PlayerId, result_type: ResultType) -> Self {
        Self {
            team_id,
            shooter_id: Some(shooter_id),
            result_type,
            count: None,
        }
    }

    pub fn pull(team_id: TeamId, result_type: ResultType, count: i32) -> Self {
        Self {
            team_id,
            shooter_id: None,
            result_type,
            count: Some(count),
        }
    }
}

/// Direction of an admin score correction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AdjustKind {
    Add,
    Subtract,
}

/// Admin correction of a finished, live-tracked game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustAction {
    pub player_id: PlayerId,
    pub result_type: ResultType,
    pub kind: AdjustKind,
}

impl AdjustAction {
    pub fn new(player_id: PlayerId, result_type: ResultType, kind: AdjustKind) -> Self {
        Self {
            player_id,
            result_type,
            kind,
        }
    }
}
