//! Station metadata fetch: one CSV, downloaded at most once.

use anyhow::Result;
use reqwest::Client;

use crate::{
    archive::Archive,
    download::{download_if_missing, FetchOutcome},
    endpoints::Endpoints,
    report::Reporter,
};

/// Ensures the archive root exists and fetches `TMD-station.csv` unless a
/// copy is already on disk.
///
/// An existing file is never refreshed, even across calendar days; presence
/// is the only check performed.
pub async fn fetch_station_metadata(
    client: &Client,
    endpoints: &Endpoints,
    archive: &Archive,
    reporter: &dyn Reporter,
) -> Result<()> {
    archive.ensure_root()?;

    let target = archive.station_path();
    let url = endpoints.station_csv();

    match download_if_missing(client, &url, &target).await? {
        FetchOutcome::Downloaded => {
            reporter.info(&format!("File downloaded and saved to {}", target.display()));
        }
        FetchOutcome::AlreadyPresent => {
            reporter.info(&format!(
                "File already exists at {}, skipping download",
                target.display()
            ));
        }
        FetchOutcome::Refused(status) => {
            reporter.warn(&format!(
                "Station metadata request answered {}, nothing saved",
                status
            ));
        }
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------
