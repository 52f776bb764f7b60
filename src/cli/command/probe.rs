use anyhow::Result;

use crate::{cli::create_spinner, endpoints::Endpoints, probe::check_availability};

use super::http_client;

pub async fn probe() -> Result<String> {
    let client = http_client()?;
    let endpoints = Endpoints::default();

    let bar = create_spinner("Checking availability...".to_string());
    check_availability(&client, &endpoints).await?;
    bar.finish_with_message("Site reachable");

    Ok(format!("{} is reachable", endpoints.base()))
}
