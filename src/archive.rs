//! Local archive layout: where downloaded files land on disk.
//!
//! The archive grows monotonically. Nothing is ever deleted or overwritten;
//! a file's presence is the sole record of "already fetched".

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};

use crate::endpoints::STATION_FILE;

/// Directory tree holding the station metadata file and one subdirectory per
/// fetch day.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default root under the home directory.
    pub fn in_home_dir() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;

        Ok(Self::new(home.join("tmd-surface-data")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn station_path(&self) -> PathBuf {
        self.root.join(STATION_FILE)
    }

    pub fn day_dir(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date_label(date))
    }

    pub fn forecast_path(&self, date: NaiveDate, file_name: &str) -> PathBuf {
        self.day_dir(date).join(file_name)
    }

    /// Idempotent create, including missing parents.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        Ok(())
    }

    pub fn ensure_day_dir(&self, date: NaiveDate) -> Result<PathBuf> {
        let dir = self.day_dir(date);
        fs::create_dir_all(&dir)?;

        Ok(dir)
    }
}

/// One archive subdirectory per calendar day, named `DD.MM.YYYY`.
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{:02}.{:02}.{}",
        date.day(),
        date.month(),
        date.year()
    )
}

// -- Tests -------------------------------------------------------------------
