use core::str::FromStr;

use crate::engine::ValidationError;
use crate::state::Side;

/// Outcome recorded for a single shot or pull.
///
/// The wire names (`TOP_REGULAR`, `PULL_HOME`, ...) are the external
/// contract; anything else is rejected with
/// [`ValidationError::UnknownResultType`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ResultType {
    TopRegular,
    TopIso,
    BottomRegular,
    BottomIso,
    Miss,
    /// Cups removed from (or returned to) the home rack outside of a shot.
    PullHome,
    /// Cups removed from (or returned to) the away rack outside of a shot.
    PullAway,
}

impl ResultType {
    /// Parses a wire name.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::from_str(value).map_err(|_| ValidationError::UnknownResultType(value.to_owned()))
    }

    #[inline]
    pub const fn is_make(self) -> bool {
        matches!(
            self,
            Self::TopRegular | Self::TopIso | Self::BottomRegular | Self::BottomIso
        )
    }

    #[inline]
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::Miss)
    }

    #[inline]
    pub const fn is_pull(self) -> bool {
        matches!(self, Self::PullHome | Self::PullAway)
    }

    /// Anything a shooter takes; the complement of [`Self::is_pull`].
    #[inline]
    pub const fn is_shot(self) -> bool {
        !self.is_pull()
    }

    /// Rack touched by this result. Shots hit the defense; pulls name their
    /// rack explicitly.
    #[inline]
    pub const fn affected_side(self, defense_side: Side) -> Side {
        match self {
            Self::PullHome => Side::Home,
            Self::PullAway => Side::Away,
            _ => defense_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn predicates_partition_results() {
        for result in ResultType::iter() {
            assert_ne!(result.is_pull(), result.is_shot(), "{result}");
            if result.is_make() {
                assert!(result.is_shot() && !result.is_miss());
            }
        }
        assert_eq!(ResultType::iter().filter(|r| r.is_make()).count(), 4);
    }

    #[test]
    fn parse_accepts_wire_names_only() {
        assert_eq!(ResultType::parse("BOTTOM_ISO"), Ok(ResultType::BottomIso));
        assert_eq!(ResultType::parse("PULL_AWAY"), Ok(ResultType::PullAway));
        assert_eq!(
            ResultType::parse("SWISH"),
            Err(ValidationError::UnknownResultType("SWISH".into()))
        );
    }

    #[test]
    fn pulls_name_their_rack() {
        assert_eq!(ResultType::PullHome.affected_side(Side::Away), Side::Home);
        assert_eq!(ResultType::TopIso.affected_side(Side::Away), Side::Away);
        assert_eq!(ResultType::Miss.affected_side(Side::Home), Side::Home);
    }
}
