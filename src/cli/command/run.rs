use anyhow::Result;
use chrono::Local;

use crate::{
    archive::Archive,
    cli::create_spinner,
    endpoints::Endpoints,
    job::{DailyFetchJob, JobConfig, StepStatus},
    report::ConsoleReporter,
};

use super::http_client;

pub async fn run() -> Result<String> {
    let config = JobConfig::default();
    let client = http_client()?;
    let endpoints = Endpoints::default();
    let archive = Archive::in_home_dir()?;
    let reporter = ConsoleReporter;

    let job = DailyFetchJob {
        client: &client,
        endpoints: &endpoints,
        archive: &archive,
        date: Local::now().date_naive(),
        reporter: &reporter,
    };

    let bar = create_spinner(format!("Running {} ({})...", config.name, config.schedule));
    let report = job.run(&config).await?;
    bar.finish_with_message("Job finished");

    let mut lines = vec![format!("Archive: {}", archive.root().display())];
    for (id, status) in report.outcomes() {
        let status = match status {
            StepStatus::Succeeded => "ok".to_string(),
            StepStatus::Failed(reason) => format!("failed: {}", reason),
            StepStatus::Skipped => "skipped".to_string(),
        };
        lines.push(format!("{}: {}", id, status));
    }

    Ok(lines.join("\n"))
}
