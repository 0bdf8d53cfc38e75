//! Growth Engine
//!
//! Caller-facing API over the growth domain: centile calculation against a
//! reference store, cached percentile curves, and chart and report assembly
//! for one child's measurement record.
//!
//! # Overview
//!
//! - **Centiles**: [`GrowthEngine::calculate_centile`] looks up the table
//!   for the child's sex, interpolates (L, M, S) at the child's age and
//!   applies the LMS transform
//! - **Curves**: [`GrowthEngine::get_curve_set`] generates percentile lines
//!   once per (sex, measurement, percentiles, sampling) and shares them
//! - **Charts**: [`ChartFacade::build_chart`] overlays the child's points on
//!   the reference curves
//! - **Reports**: [`ChartFacade::export`] builds every requested chart in
//!   parallel and encodes a paginated JSON document
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use growth_domain::{ChildProfile, Measurement, MeasurementSeries, MeasurementType, Sex};
//! use growth_engine::GrowthEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = GrowthEngine::bundled()?;
//!
//! let dob = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let mut series = MeasurementSeries::new(ChildProfile::new(dob, Sex::Male));
//! series.add(Measurement::new(dob).with_weight(3.3).with_height(49.9))?;
//!
//! let chart = engine.charts(&series).build_chart(MeasurementType::Weight)?;
//! assert_eq!(chart.child_points.len(), 1);
//!
//! let bytes = engine.charts(&series).export(&MeasurementType::ALL)?;
//! assert!(!bytes.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The engine can be configured via TOML:
//!
//! ```toml
//! percentile_labels = [3.0, 15.0, 50.0, 85.0, 97.0]
//! age_step_days = 30
//! z_score_method = "lms"
//! ```

#![warn(missing_docs)]

mod cache;
mod chart;
mod config;
mod engine;
mod error;
mod report;

pub use cache::{CurveCache, CurveKey, MAX_CURVE_SETS};
pub use chart::{ChartFacade, ChartSpec, ChildPoint, SummaryRow, AGE_AXIS_LABEL};
pub use config::{EngineConfig, NINE_CENTILE_PERCENTILES, WHO_PERCENTILES};
pub use engine::GrowthEngine;
pub use error::{EngineError, Result};
pub use report::{ReportDocument, ReportPage, SkipNote, DEFAULT_CHILD_NAME};
