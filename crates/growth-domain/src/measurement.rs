//! Measurements and the child they belong to

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GrowthError, Result};
use crate::Sex;

/// Handle on one entry of a growth record
///
/// Generated when a measurement is created or read without one, so entries
/// that share a date stay distinguishable. Session files may carry ids to
/// keep them stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementId(uuid::Uuid);

impl MeasurementId {
    /// Fresh time-ordered id
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for MeasurementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MeasurementId {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| GrowthError::InvalidMeasurement(format!("bad id {:?}: {}", s, e)))
    }
}

/// A dated set of anthropometric readings
///
/// Any field may be absent; absence is explicit, never a NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Entry id, generated when absent
    #[serde(default)]
    pub id: MeasurementId,

    /// Date the child was measured
    pub date: NaiveDate,

    /// Length or height in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,

    /// Weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    /// Head circumference in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_circumference_cm: Option<f64>,
}

impl Measurement {
    /// Create an empty measurement for `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: MeasurementId::new(),
            date,
            height_cm: None,
            weight_kg: None,
            head_circumference_cm: None,
        }
    }

    /// Set the height
    pub fn with_height(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    /// Set the weight
    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Set the head circumference
    pub fn with_head_circumference(mut self, head_circumference_cm: f64) -> Self {
        self.head_circumference_cm = Some(head_circumference_cm);
        self
    }
}

/// The child a growth record describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Date of birth
    pub date_of_birth: NaiveDate,

    /// Sex, selecting the reference standard
    pub sex: Sex,
}

impl ChildProfile {
    /// Create a profile without a name
    pub fn new(date_of_birth: NaiveDate, sex: Sex) -> Self {
        Self {
            name: None,
            date_of_birth,
            sex,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
