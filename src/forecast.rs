//! Daily forecast fetch: mirror the per-day CSV listing into the archive.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use reqwest::Client;

use crate::{
    archive::Archive,
    download::{download_if_missing, FetchOutcome},
    endpoints::Endpoints,
    listing::csv_links,
    report::Reporter,
};

/// Downloads every CSV linked from the forecast index into the day directory
/// for `date`, one file at a time in document order.
///
/// The date is a parameter so the caller decides whether it is the wall-clock
/// day or a scheduler's logical run date. Files already present are skipped;
/// an individual non-200 response is reported and left out of the archive
/// without failing the step, so partial completion is a normal outcome.
///
/// Returns the number of files newly written.
pub async fn fetch_daily_forecasts(
    client: &Client,
    endpoints: &Endpoints,
    archive: &Archive,
    date: NaiveDate,
    reporter: &dyn Reporter,
) -> Result<usize> {
    let day_dir = archive.ensure_day_dir(date)?;

    let index_url = endpoints.forecast_index();
    let response = client
        .get(&index_url)
        .send()
        .await
        .map_err(|e| anyhow!("Request for {} failed: {}", index_url, e))?;

    if !response.status().is_success() {
        bail!("{} answered {}", index_url, response.status());
    }

    let body = response.text().await?;
    let files = csv_links(&body)?;
    reporter.info(&format!(
        "{} CSV files listed for {}",
        files.len(),
        day_dir.display()
    ));

    let mut downloaded = 0;
    for file_name in &files {
        let target = archive.forecast_path(date, file_name);
        let url = endpoints.forecast_file(file_name);

        match download_if_missing(client, &url, &target).await? {
            FetchOutcome::Downloaded => {
                downloaded += 1;
                reporter.info(&format!(
                    "File {} downloaded and saved to {}",
                    file_name,
                    target.display()
                ));
            }
            FetchOutcome::AlreadyPresent => {
                reporter.info(&format!(
                    "File {} already exists at {}, skipping download",
                    file_name,
                    target.display()
                ));
            }
            FetchOutcome::Refused(status) => {
                reporter.warn(&format!("Failed to download file {}: {}", file_name, status));
            }
        }
    }

    Ok(downloaded)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::report::test_support::MemoryReporter;

    use super::*;

    const INDEX: &str = "/Ventilation_daily_forecast/";

    fn april_third() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 3).unwrap()
    }

    async fn mount_index(server: &MockServer, body: &str, hits: u64) {
        Mock::given(method("GET"))
            .and(path(INDEX))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(hits)
            .mount(server)
            .await;
    }

    async fn mount_file(server: &MockServer, name: &str, status: u16, hits: u64) {
        Mock::given(method("GET"))
            .and(path(format!("{}{}", INDEX, name)))
            .respond_with(ResponseTemplate::new(status).set_body_string(format!("data for {}", name)))
            .expect(hits)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn should_tolerate_an_individual_download_failure() {
        let server = MockServer::start().await;
        let index = concat!(
            r#"<a href="one.csv">one.csv</a>"#,
            r#"<a href="two.csv">two.csv</a>"#,
            r#"<a href="three.csv">three.csv</a>"#,
        );
        mount_index(&server, index, 1).await;
        mount_file(&server, "one.csv", 200, 1).await;
        mount_file(&server, "two.csv", 404, 1).await;
        mount_file(&server, "three.csv", 200, 1).await;

        let tmp = tempfile::tempdir().unwrap();
        let archive = Archive::new(tmp.path().join("archive"));
        let endpoints = Endpoints::new(&server.uri());
        let client = Client::new();
        let reporter = MemoryReporter::default();

        let downloaded =
            fetch_daily_forecasts(&client, &endpoints, &archive, april_third(), &reporter)
                .await
                .unwrap();

        assert_eq!(downloaded, 2);
        assert!(archive.forecast_path(april_third(), "one.csv").exists());
        assert!(!archive.forecast_path(april_third(), "two.csv").exists());
        assert!(archive.forecast_path(april_third(), "three.csv").exists());
        assert!(reporter
            .lines()
            .iter()
            .any(|l| l.contains("Failed to download file two.csv")));
    }

    #[tokio::test]
    async fn should_fetch_each_file_once_across_two_runs() {
        let server = MockServer::start().await;
        let index = r#"<a href="one.csv">one.csv</a><a href="two.csv">two.csv</a>"#;
        // The index is listed on every run, but each file travels only once.
        mount_index(&server, index, 2).await;
        mount_file(&server, "one.csv", 200, 1).await;
        mount_file(&server, "two.csv", 200, 1).await;

        let tmp = tempfile::tempdir().unwrap();
        let archive = Archive::new(tmp.path().join("archive"));
        let endpoints = Endpoints::new(&server.uri());
        let client = Client::new();
        let reporter = MemoryReporter::default();

        let first =
            fetch_daily_forecasts(&client, &endpoints, &archive, april_third(), &reporter)
                .await
                .unwrap();
        let second =
            fetch_daily_forecasts(&client, &endpoints, &archive, april_third(), &reporter)
                .await
                .unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn should_name_the_day_directory_after_the_given_date() {
        let server = MockServer::start().await;
        mount_index(&server, "<html></html>", 1).await;

        let tmp = tempfile::tempdir().unwrap();
        let archive = Archive::new(tmp.path().join("archive"));
        let endpoints = Endpoints::new(&server.uri());
        let client = Client::new();
        let reporter = MemoryReporter::default();

        fetch_daily_forecasts(&client, &endpoints, &archive, april_third(), &reporter)
            .await
            .unwrap();

        assert!(tmp.path().join("archive").join("03.04.2024").is_dir());
    }

    #[tokio::test]
    async fn should_fail_on_an_anchor_without_an_href() {
        let server = MockServer::start().await;
        mount_index(&server, r#"<a name="broken">broken</a>"#, 1).await;

        let tmp = tempfile::tempdir().unwrap();
        let archive = Archive::new(tmp.path().join("archive"));
        let endpoints = Endpoints::new(&server.uri());
        let client = Client::new();
        let reporter = MemoryReporter::default();

        let err = fetch_daily_forecasts(&client, &endpoints, &archive, april_third(), &reporter)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("without an href"));
    }

    #[tokio::test]
    async fn should_fail_when_the_index_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(INDEX))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let archive = Archive::new(tmp.path().join("archive"));
        let endpoints = Endpoints::new(&server.uri());
        let client = Client::new();
        let reporter = MemoryReporter::default();

        let err = fetch_daily_forecasts(&client, &endpoints, &archive, april_third(), &reporter)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
    }
}
