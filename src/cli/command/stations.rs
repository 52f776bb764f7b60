use anyhow::Result;

use crate::{
    archive::Archive, cli::create_spinner, endpoints::Endpoints, report::ConsoleReporter,
    stations::fetch_station_metadata,
};

use super::http_client;

pub async fn stations() -> Result<String> {
    let client = http_client()?;
    let endpoints = Endpoints::default();
    let archive = Archive::in_home_dir()?;
    let reporter = ConsoleReporter;

    let bar = create_spinner("Fetching station metadata...".to_string());
    fetch_station_metadata(&client, &endpoints, &archive, &reporter).await?;
    bar.finish_with_message("Station metadata up to date");

    Ok(archive.station_path().to_string_lossy().to_string())
}
