//! The daily fetch job and the runner that executes it.
//!
//! The original deployment delegated sequencing, retries and the daily
//! trigger to an external scheduler. That contract is modeled here as an
//! explicit [`JobConfig`] consumed by a small in-process runner, so the fetch
//! steps stay decoupled from any particular orchestrator.

use std::fmt;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use reqwest::Client;

use crate::{
    archive::Archive,
    endpoints::Endpoints,
    forecast::fetch_daily_forecasts,
    probe::check_availability,
    report::Reporter,
    stations::fetch_station_metadata,
};

/// The three steps of the daily fetch job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Probe,
    StationMetadata,
    DailyForecasts,
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StepId::Probe => "probe",
            StepId::StationMetadata => "station-metadata",
            StepId::DailyForecasts => "daily-forecasts",
        };
        write!(f, "{}", name)
    }
}

/// Trigger cadence of the job, as the scheduler sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cadence::Daily => write!(f, "@daily"),
        }
    }
}

/// One entry in the job's dependency chain.
///
/// When a blocking step fails, the remaining steps are skipped for that
/// attempt. A non-blocking failure is recorded and the chain continues.
#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub id: StepId,
    pub blocking: bool,
}

/// Scheduling contract for the whole job: name, whole-job retry budget,
/// cadence and the ordered dependency chain.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub name: &'static str,
    pub retries: u32,
    pub schedule: Cadence,
    pub steps: Vec<StepSpec>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            name: "daily_ozone_fetch",
            retries: 6,
            schedule: Cadence::Daily,
            steps: vec![
                StepSpec {
                    id: StepId::Probe,
                    blocking: true,
                },
                StepSpec {
                    id: StepId::StationMetadata,
                    blocking: false,
                },
                StepSpec {
                    id: StepId::DailyForecasts,
                    blocking: false,
                },
            ],
        }
    }
}

/// Outcome of one step within one attempt.
#[derive(Debug, Clone)]
pub enum StepStatus {
    Succeeded,
    Failed(String),
    Skipped,
}

/// Per-step outcomes of a single attempt.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    outcomes: Vec<(StepId, StepStatus)>,
}

impl RunReport {
    fn record(&mut self, id: StepId, status: StepStatus) {
        self.outcomes.push((id, status));
    }

    pub fn succeeded(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, status)| matches!(status, StepStatus::Succeeded))
    }

    pub fn outcomes(&self) -> &[(StepId, StepStatus)] {
        &self.outcomes
    }
}

/// Everything one attempt of the daily fetch job needs.
///
/// The date is injected rather than read from the clock inside the steps, so
/// a scheduler's logical run date can stand in for "today".
pub struct DailyFetchJob<'a> {
    pub client: &'a Client,
    pub endpoints: &'a Endpoints,
    pub archive: &'a Archive,
    pub date: NaiveDate,
    pub reporter: &'a dyn Reporter,
}

impl DailyFetchJob<'_> {
    async fn run_step(&self, id: StepId) -> Result<()> {
        match id {
            StepId::Probe => check_availability(self.client, self.endpoints).await,
            StepId::StationMetadata => {
                fetch_station_metadata(self.client, self.endpoints, self.archive, self.reporter)
                    .await
            }
            StepId::DailyForecasts => fetch_daily_forecasts(
                self.client,
                self.endpoints,
                self.archive,
                self.date,
                self.reporter,
            )
            .await
            .map(|_| ()),
        }
    }

    /// Executes the chain once, honoring the blocking flags.
    pub async fn run_once(&self, config: &JobConfig) -> RunReport {
        let mut report = RunReport::default();
        let mut blocked = false;

        for spec in &config.steps {
            if blocked {
                report.record(spec.id, StepStatus::Skipped);
                continue;
            }

            match self.run_step(spec.id).await {
                Ok(()) => report.record(spec.id, StepStatus::Succeeded),
                Err(e) => {
                    self.reporter
                        .warn(&format!("Step {} failed: {:#}", spec.id, e));
                    report.record(spec.id, StepStatus::Failed(format!("{:#}", e)));
                    if spec.blocking {
                        blocked = true;
                    }
                }
            }
        }

        report
    }

    /// Runs the job until an attempt succeeds or the retry budget is spent.
    ///
    /// Mirrors the scheduler's whole-job retry policy; the skip-if-present
    /// checks make repeated attempts cheap.
    pub async fn run(&self, config: &JobConfig) -> Result<RunReport> {
        let mut attempt = 0;
        loop {
            let report = self.run_once(config).await;
            if report.succeeded() {
                return Ok(report);
            }

            if attempt >= config.retries {
                bail!("Job {} failed after {} attempts", config.name, attempt + 1);
            }

            attempt += 1;
            self.reporter.warn(&format!(
                "Job {} attempt {} failed, retrying",
                config.name, attempt
            ));
        }
    }
}

// -- Tests -------------------------------------------------------------------
