//! Growth Domain Layer
//!
//! Pure computations behind growth centiles: reference tables, age
//! interpolation, the LMS transform and its inverse, percentile curve
//! generation and the per-child measurement record. Nothing here performs
//! I/O; reference data arrives through the [`traits::ReferenceSource`] seam.
//!
//! ## Key Concepts
//!
//! - **Reference table**: WHO (L, M, S) parameters by age for one sex and
//!   measurement
//! - **Centile**: a measurement's z-score and percentile at the child's age
//! - **Curve set**: reference values at chosen percentiles, sampled by age
//! - **Series**: one child's append-only list of dated measurements
//!
//! ## Example
//!
//! ```
//! use growth_domain::{
//!     interpolate, to_centile, MeasurementType, ReferenceRow, ReferenceTable, Sex,
//! };
//!
//! let table = ReferenceTable::new(
//!     Sex::Male,
//!     MeasurementType::Weight,
//!     vec![
//!         ReferenceRow::new(0, 0.3487, 3.3464, 0.14602),
//!         ReferenceRow::new(30, 0.2297, 4.4709, 0.13395),
//!     ],
//! )
//! .unwrap();
//!
//! let lms = interpolate(&table, 0).unwrap();
//! let centile = to_centile(3.3464, lms).unwrap();
//! assert_eq!(centile.percentile, 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod centile;
pub mod curve;
pub mod error;
pub mod interpolation;
pub mod measurement;
pub mod normal;
pub mod reference;
pub mod series;
pub mod standard;
pub mod traits;

// Re-exports for convenience
pub use centile::{to_centile, to_centile_with, value_at_z, z_score, CentileResult, ZScoreMethod};
pub use curve::{
    generate_curves, normalize_percentiles, percentile_label, AgeSampling, CentileCurveSet,
    CurvePoint, PercentileCurve,
};
pub use error::{GrowthError, Result};
pub use interpolation::interpolate;
pub use measurement::{ChildProfile, Measurement, MeasurementId};
pub use reference::{LmsParams, ReferenceRow, ReferenceTable};
pub use series::MeasurementSeries;
pub use standard::{MeasurementType, Sex};
pub use traits::ReferenceSource;
