//! Availability probe against the surface-data endpoint.

use anyhow::{anyhow, bail, Result};
use reqwest::{Client, StatusCode};

use crate::endpoints::Endpoints;

/// Succeeds only when the base endpoint answers exactly 200.
///
/// No side effects besides the network call: the rest of the job must not
/// run, and no directory may be created, when this fails.
pub async fn check_availability(client: &Client, endpoints: &Endpoints) -> Result<()> {
    let response = client
        .get(endpoints.base())
        .send()
        .await
        .map_err(|e| anyhow!("Failed to connect to {}: {}", endpoints.base(), e))?;

    let status = response.status();
    if status != StatusCode::OK {
        bail!("{} answered {} instead of 200 OK", endpoints.base(), status);
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------
