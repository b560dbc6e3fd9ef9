use super::{GameId, PlayerId, TeamId, TurnId};

/// Why a turn exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TurnKind {
    /// Ordinary possession with the offense's full lineup.
    Regular,
    /// Extra possession earned by two or more distinct makers.
    Bonus,
    /// Comeback attempt by the team whose rack was just cleared. `quota` is the
    /// clearing team's lineup size; only misses consume it.
    Redemption { quota: u32 },
}

/// One offensive possession.
///
/// Turns are created by the turn manager and never edited afterwards; the
/// eligible shooter list is captured at creation time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub id: TurnId,
    pub game_id: GameId,
    /// Gapless, starting at 1.
    pub turn_index: u32,
    pub offense_team_id: TeamId,
    pub kind: TurnKind,
    pub eligible_shooters: Vec<PlayerId>,
}

impl Turn {
    #[inline]
    pub fn is_bonus(&self) -> bool {
        self.kind == TurnKind::Bonus
    }

    #[inline]
    pub fn is_redemption(&self) -> bool {
        matches!(self.kind, TurnKind::Redemption { .. })
    }

    /// Shape of this turn with identity stripped, used to compare a stored
    /// turn against the one the rules would create.
    pub fn plan(&self) -> TurnPlan {
        TurnPlan {
            offense_team_id: self.offense_team_id,
            kind: self.kind,
            eligible_shooters: self.eligible_shooters.clone(),
        }
    }
}

/// A turn the rules want to open next, before it has an id or index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnPlan {
    pub offense_team_id: TeamId,
    pub kind: TurnKind,
    pub eligible_shooters: Vec<PlayerId>,
}

impl TurnPlan {
    pub fn into_turn(self, id: TurnId, game_id: GameId, turn_index: u32) -> Turn {
        Turn {
            id,
            game_id,
            turn_index,
            offense_team_id: self.offense_team_id,
            kind: self.kind,
            eligible_shooters: self.eligible_shooters,
        }
    }
}
