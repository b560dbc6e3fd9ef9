//! `cupctl`: command-line scorekeeping for cup games.
//!
//! Every invocation opens the configured store, runs one operation and exits.
//! Configuration comes from `CUP_*` environment variables (a `.env` file is
//! honored) with a few flags layered on top.
//!
//! ```bash
//! cupctl lineup 1 11 12 13
//! cupctl lineup 2 21 22 23
//! cupctl new 1 2
//! cupctl start 1
//! cupctl shot 1 --team 1 --shooter 11 --result TOP_ISO
//! cupctl show 1
//! ```

mod commands;
mod context;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{
    Adjust, Finalize, ListGames, NewGame, Pull, Recompute, RunScenario, SetLineup, Shot, Show,
    StartGame, Undo,
};
use context::StoreArgs;

/// Scorekeeping for cup games
#[derive(Parser)]
#[command(name = "cupctl")]
#[command(about = "Track cup games shot by shot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Set the shooting order of a team
    Lineup(SetLineup),

    /// Create a scheduled game
    New(NewGame),

    /// Start a scheduled game
    Start(StartGame),

    /// Record a shot
    Shot(Shot),

    /// Record a pull (cups removed or returned outside of a shot)
    Pull(Pull),

    /// Remove the latest event
    Undo(Undo),

    /// Rebuild the scoreboard from the event log
    Recompute(Recompute),

    /// Correct a finished game
    Adjust(Adjust),

    /// Declare a game over
    Finalize(Finalize),

    /// Show a game
    Show(Show),

    /// List stored games
    List(ListGames),

    /// Replay a RON scenario
    Run(RunScenario),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = cli.store;

    match cli.command {
        Command::Lineup(cmd) => cmd.execute(&store),
        Command::New(cmd) => cmd.execute(&store),
        Command::Start(cmd) => cmd.execute(&store),
        Command::Shot(cmd) => cmd.execute(&store),
        Command::Pull(cmd) => cmd.execute(&store),
        Command::Undo(cmd) => cmd.execute(&store),
        Command::Recompute(cmd) => cmd.execute(&store),
        Command::Adjust(cmd) => cmd.execute(&store),
        Command::Finalize(cmd) => cmd.execute(&store),
        Command::Show(cmd) => cmd.execute(&store),
        Command::List(cmd) => cmd.execute(&store),
        Command::Run(cmd) => cmd.execute(&store),
    }
}
