//! Session files: a child profile plus recorded measurements.
//!
//! Files ending in `.json` are read as JSON; anything else as TOML:
//!
//! ```toml
//! [child]
//! name = "Sam"
//! date_of_birth = "2023-01-01"
//! sex = "male"
//!
//! [[measurements]]
//! date = "2023-07-03"
//! height_cm = 67.9
//! weight_kg = 7.8
//! ```
//!
//! Dates are quoted `YYYY-MM-DD` strings. A measurement may carry an `id`
//! (UUID string) to keep it stable across runs; one is generated otherwise.
//! Two measurements with the same id are rejected.

use crate::error::{CliError, Result};
use growth_domain::{ChildProfile, Measurement, MeasurementSeries};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    /// The child
    pub child: ChildProfile,

    /// Measurements in recorded order
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl SessionFile {
    /// Read a session file, choosing the format by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let session = if is_json {
            serde_json::from_str(&contents)?
        } else {
            toml::from_str(&contents)?
        };
        Ok(session)
    }

    /// Replay the measurements into a series.
    ///
    /// The first rejected measurement fails the whole file.
    pub fn into_series(self) -> Result<MeasurementSeries> {
        let mut series = MeasurementSeries::new(self.child);
        for (index, measurement) in self.measurements.into_iter().enumerate() {
            series.add(measurement).map_err(|e| {
                CliError::InvalidInput(format!("measurement {}: {}", index + 1, e))
            })?;
        }
        tracing::debug!(measurements = series.len(), "Session loaded");
        Ok(series)
    }
}

/// Load a session file straight into a series.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<MeasurementSeries> {
    SessionFile::load(path)?.into_series()
}
