mod archive;
mod cli;
mod download;
mod endpoints;
mod forecast;
mod job;
mod listing;
mod probe;
mod report;
mod stations;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {} => match command::run().await {
            Ok(summary) => println!("{}", summary),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Probe {} => match command::probe().await {
            Ok(message) => println!("{}", message),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Stations {} => match command::stations().await {
            Ok(path) => println!("File saved to `{}`", path),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Forecasts {} => match command::forecasts().await {
            Ok(summary) => println!("{}", summary),
            Err(e) => eprintln!("Error: {}", e),
        },
    }

    Ok(())
}
