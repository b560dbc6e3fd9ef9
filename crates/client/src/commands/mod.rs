//! Command implementations for cupctl
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod admin;
mod game;
mod lineup;
mod play;
mod scenario;

pub use admin::{Adjust, Finalize, Recompute};
pub use game::{ListGames, NewGame, Show, StartGame};
pub use lineup::SetLineup;
pub use play::{Pull, Shot, Undo};
pub use scenario::RunScenario;

use anyhow::Result;
use cup_core::ResultType;

/// Parses a result wire name such as `TOP_ISO`, case-insensitively.
pub(crate) fn parse_result(value: &str) -> Result<ResultType> {
    ResultType::parse(&value.trim().to_ascii_uppercase()).map_err(|err| anyhow::anyhow!("{}", err))
}
