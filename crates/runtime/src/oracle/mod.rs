//! Runtime implementations of the engine's read-only oracles.
//!
//! Rosters belong to an external service. The runtime only needs each team's
//! active lineup, which [`StaticLineups`] keeps in memory and can persist
//! next to the game records.
mod lineups;

pub use lineups::{LineupEntry, StaticLineups};
