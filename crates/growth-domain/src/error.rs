//! Error types for growth computations

use crate::{MeasurementType, Sex};
use chrono::NaiveDate;
use thiserror::Error;

/// Result alias for domain operations
pub type Result<T> = std::result::Result<T, GrowthError>;

/// Errors raised by the growth engine's pure computations
///
/// Every failure path returns one of these; no computation falls back to a
/// NaN or other sentinel value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrowthError {
    /// No reference table exists for the sex / measurement pair
    #[error("No reference standard for {measurement_type} ({sex})")]
    UnknownStandard {
        /// Requested sex
        sex: Sex,
        /// Requested measurement type
        measurement_type: MeasurementType,
    },

    /// Age lies outside the published coverage of a table
    #[error("Age {age_in_days} days is outside the reference range {min_age}..={max_age} days")]
    AgeOutOfRange {
        /// Requested age
        age_in_days: u32,
        /// First age covered by the table
        min_age: u32,
        /// Last age covered by the table
        max_age: u32,
    },

    /// Non-positive or non-finite measurement or reference parameter
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// Measurement dated before the child's date of birth
    #[error("Measurement date {date} precedes date of birth {date_of_birth}")]
    InvalidDate {
        /// Date of the rejected measurement
        date: NaiveDate,
        /// Child's date of birth
        date_of_birth: NaiveDate,
    },

    /// LMS inversion has no real solution at this age and z-score
    #[error("Degenerate curve point at {age_in_days} days (z = {z})")]
    DegenerateCurvePoint {
        /// Sampled age
        age_in_days: u32,
        /// Target z-score
        z: f64,
    },

    /// Query on a series with no measurements
    #[error("Measurement series is empty")]
    EmptySeries,

    /// A field required by a derived query is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A reference table violates its structural invariants
    #[error("Invalid reference table: {0}")]
    InvalidReference(String),

    /// Invalid percentile label, sampling configuration or probability
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GrowthError {
    /// Whether a chart facade may drop the affected chart or point and carry on
    ///
    /// Coverage gaps and absent data are local to one chart; anything else
    /// indicates bad input or a broken dataset.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GrowthError::UnknownStandard { .. }
                | GrowthError::AgeOutOfRange { .. }
                | GrowthError::MissingField(_)
                | GrowthError::DegenerateCurvePoint { .. }
        )
    }
}
