//! Command line interface.

pub mod command;

use std::time::Duration;

use clap::{command, Parser, Subcommand};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full daily fetch job
    Run {},
    /// Check that the data site is reachable
    Probe {},
    /// Fetch the station metadata file
    Stations {},
    /// Fetch today's forecast files
    Forecasts {},
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}
