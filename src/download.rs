//! HTTP fetch helpers shared by the download steps.

use std::{fs::File, io::Write, path::Path};

use anyhow::{anyhow, Result};
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};

/// Outcome of an idempotent single-file download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was fetched and written.
    Downloaded,
    /// A file of that name already exists; no network call was made.
    AlreadyPresent,
    /// The server answered with a non-200 status; nothing was written.
    Refused(StatusCode),
}

/// Fetches `url` into `path` unless the file is already on disk.
///
/// The body is written verbatim with no partial-write protection: a dropped
/// connection mid-stream leaves a truncated file that the next run will treat
/// as already fetched.
pub async fn download_if_missing(
    client: &Client,
    url: &str,
    path: &Path,
) -> Result<FetchOutcome> {
    if path.exists() {
        return Ok(FetchOutcome::AlreadyPresent);
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| anyhow!("Request for {} failed: {}", url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Ok(FetchOutcome::Refused(status));
    }

    write_body(response, path).await?;

    Ok(FetchOutcome::Downloaded)
}

/// Streams a response body to disk, chunk by chunk.
async fn write_body(response: Response, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| anyhow!("Error reading chunk: {}", e))?;
        file.write_all(&chunk)?;
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn should_write_the_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("data.csv");
        let client = Client::new();

        let outcome = download_if_missing(&client, &format!("{}/data.csv", server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Downloaded);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "a,b\n1,2\n");
    }

    #[tokio::test]
    async fn should_not_hit_the_network_for_an_existing_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
            .expect(0)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("data.csv");
        std::fs::write(&target, "stale").unwrap();
        let client = Client::new();

        let outcome = download_if_missing(&client, &format!("{}/data.csv", server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "stale");
    }

    #[tokio::test]
    async fn should_leave_no_file_behind_on_a_non_200_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("data.csv");
        let client = Client::new();

        let outcome = download_if_missing(&client, &format!("{}/data.csv", server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Refused(StatusCode::NOT_FOUND));
        assert!(!target.exists());
    }
}
