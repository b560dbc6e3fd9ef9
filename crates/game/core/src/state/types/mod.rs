pub mod common;
pub mod event;
pub mod game;
pub mod score;
pub mod turn;

// Re-export identifiers and shared primitives
pub use common::{EventId, GameId, PlayerId, Side, TeamId, Timestamp, TurnId};

// Re-export match metadata
pub use game::{Game, GameSource, GameStatus};

// Re-export the scoreboard projection
pub use score::{GameState, Phase};

// Re-export turn and log entries
pub use event::ShotEvent;
pub use turn::{Turn, TurnKind, TurnPlan};
