//! Replay of RON scenarios.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use cup_runtime::Scenario;

use crate::context::{StoreArgs, rejected};
use crate::render::{OutputFormat, print_record};

/// Replay a RON scenario
#[derive(Parser)]
pub struct RunScenario {
    /// Scenario file
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Output format for the resulting game
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl RunScenario {
    pub fn execute(self, store: &StoreArgs) -> Result<()> {
        let scenario = Scenario::load_from_file(&self.path).map_err(rejected)?;

        // Scenario lineups win over the persisted table for this run only.
        let session = store.open_with(scenario.lineups())?;

        let run = scenario.run(&session.keeper).map_err(rejected)?;
        println!(
            "{} '{}': {} steps applied to {}",
            style("Scenario").bold().green(),
            scenario.name,
            run.steps_applied,
            run.game
        );
        println!();

        let record = session.keeper.get_state(run.game).map_err(rejected)?;
        print_record(&record, self.format)
    }
}
