use anyhow::Result;
use chrono::Local;

use crate::{
    archive::Archive, cli::create_spinner, endpoints::Endpoints, forecast::fetch_daily_forecasts,
    report::ConsoleReporter,
};

use super::http_client;

pub async fn forecasts() -> Result<String> {
    let client = http_client()?;
    let endpoints = Endpoints::default();
    let archive = Archive::in_home_dir()?;
    let reporter = ConsoleReporter;
    // Local clock at invocation time names the day directory.
    let date = Local::now().date_naive();

    let bar = create_spinner("Fetching daily forecasts...".to_string());
    let downloaded = fetch_daily_forecasts(&client, &endpoints, &archive, date, &reporter).await?;
    bar.finish_with_message("Forecasts fetched");

    Ok(format!(
        "{} new files in {}",
        downloaded,
        archive.day_dir(date).display()
    ))
}
