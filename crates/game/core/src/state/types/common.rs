use core::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a scored match.
    GameId,
    "game"
);
define_id!(
    /// Identifier of a team, owned by the external roster service.
    TeamId,
    "team"
);
define_id!(
    /// Identifier of a player, owned by the external roster service.
    PlayerId,
    "player"
);
define_id!(
    /// Identifier of a turn, unique within its game.
    TurnId,
    "turn"
);
define_id!(
    /// Identifier of a logged shot or pull, unique within its game.
    EventId,
    "event"
);

/// Milliseconds since the Unix epoch.
///
/// The core never reads a clock; callers pass the wall time in and the event
/// log bumps it forward when needed so timestamps stay strictly increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    /// Smallest timestamp strictly after `self`.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Which end of the table a rack belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Home,
    Away,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_prefix() {
        assert_eq!(GameId(7).to_string(), "game#7");
        assert_eq!(PlayerId(12).to_string(), "player#12");
    }

    #[test]
    fn timestamp_next_is_strictly_greater() {
        let ts = Timestamp(41);
        assert!(ts.next() > ts);
        assert_eq!(ts.next(), Timestamp(42));
    }
}
