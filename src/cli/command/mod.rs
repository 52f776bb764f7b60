pub mod forecasts;
pub mod probe;
pub mod run;
pub mod stations;

use std::time::Duration;

use anyhow::Result;
pub use forecasts::forecasts;
pub use probe::probe;
use reqwest::Client;
pub use run::run;
pub use stations::stations;

/// Shared HTTP client for all commands. One fixed timeout per request; the
/// steps themselves never configure transport details.
pub fn http_client() -> Result<Client> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

    Ok(client)
}
