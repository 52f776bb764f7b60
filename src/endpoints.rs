//! Fixed remote endpoints on the TMD ozone site.

/// Root of the surface-observation data published by the site.
pub const DEFAULT_BASE_URL: &str = "http://ozone.tmd.go.th/Data/Surface/";

/// Station metadata resource, relative to the base.
pub const STATION_FILE: &str = "TMD-station.csv";

/// Per-day forecast directory index, relative to the base.
pub const FORECAST_DIR: &str = "Ventilation_daily_forecast/";

/// The URL set the fetch steps operate on. Fixed in production; tests point
/// it at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is the surface-data root; a missing trailing slash is added.
    pub fn new(base: &str) -> Self {
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };

        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn station_csv(&self) -> String {
        format!("{}{}", self.base, STATION_FILE)
    }

    pub fn forecast_index(&self) -> String {
        format!("{}{}", self.base, FORECAST_DIR)
    }

    /// Forecast filenames come straight from the index hrefs and are resolved
    /// relative to the index itself.
    pub fn forecast_file(&self, file_name: &str) -> String {
        format!("{}{}", self.forecast_index(), file_name)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// -- Tests -------------------------------------------------------------------
