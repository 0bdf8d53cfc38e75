//! Reference tables of LMS parameters indexed by age
//!
//! A table holds the published (L, M, S) triples for one sex and one
//! measurement type. Tables are validated once on construction and never
//! mutated afterwards.

use crate::error::{GrowthError, Result};
use crate::{MeasurementType, Sex};
use serde::{Deserialize, Serialize};

/// Box-Cox power (L), median (M) and coefficient of variation (S)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsParams {
    /// Box-Cox power
    pub l: f64,
    /// Median
    pub m: f64,
    /// Coefficient of variation
    pub s: f64,
}

impl LmsParams {
    /// Create a new parameter triple (unchecked)
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    /// Check the triple is usable for the LMS transform
    pub fn validate(&self) -> Result<()> {
        if !self.l.is_finite() {
            return Err(GrowthError::InvalidMeasurement(format!(
                "L must be finite, got {}",
                self.l
            )));
        }
        if !self.m.is_finite() || self.m <= 0.0 {
            return Err(GrowthError::InvalidMeasurement(format!(
                "M must be positive, got {}",
                self.m
            )));
        }
        if !self.s.is_finite() || self.s <= 0.0 {
            return Err(GrowthError::InvalidMeasurement(format!(
                "S must be positive, got {}",
                self.s
            )));
        }
        Ok(())
    }
}

/// One published row: LMS parameters at an exact age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// Age in completed days since birth
    pub age_in_days: u32,
    /// Box-Cox power
    pub l: f64,
    /// Median
    pub m: f64,
    /// Coefficient of variation
    pub s: f64,
}

impl ReferenceRow {
    /// Create a new row
    pub fn new(age_in_days: u32, l: f64, m: f64, s: f64) -> Self {
        Self {
            age_in_days,
            l,
            m,
            s,
        }
    }

    /// The row's parameters as a triple
    pub fn lms(&self) -> LmsParams {
        LmsParams::new(self.l, self.m, self.s)
    }
}

/// Immutable, age-ordered LMS table for one (sex, measurement type)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    sex: Sex,
    measurement_type: MeasurementType,
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Build a table, checking its invariants
    ///
    /// Rows must be non-empty, strictly increasing in age, and carry finite
    /// L with positive M and S.
    ///
    /// # Examples
    ///
    /// ```
    /// use growth_domain::{MeasurementType, ReferenceRow, ReferenceTable, Sex};
    ///
    /// let table = ReferenceTable::new(
    ///     Sex::Male,
    ///     MeasurementType::Weight,
    ///     vec![
    ///         ReferenceRow::new(0, 0.3487, 3.3464, 0.14602),
    ///         ReferenceRow::new(30, 0.2297, 4.4709, 0.13395),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(table.max_age(), 30);
    /// ```
    pub fn new(
        sex: Sex,
        measurement_type: MeasurementType,
        rows: Vec<ReferenceRow>,
    ) -> Result<Self> {
        if rows.is_empty() {
            return Err(GrowthError::InvalidReference(format!(
                "{} ({}) has no rows",
                measurement_type, sex
            )));
        }

        for pair in rows.windows(2) {
            if pair[1].age_in_days <= pair[0].age_in_days {
                return Err(GrowthError::InvalidReference(format!(
                    "{} ({}) ages not strictly increasing at {} days",
                    measurement_type, sex, pair[1].age_in_days
                )));
            }
        }

        for row in &rows {
            row.lms().validate().map_err(|e| {
                GrowthError::InvalidReference(format!(
                    "{} ({}) at {} days: {}",
                    measurement_type, sex, row.age_in_days, e
                ))
            })?;
        }

        Ok(Self {
            sex,
            measurement_type,
            rows,
        })
    }

    /// Sex this table applies to
    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Measurement type this table applies to
    pub fn measurement_type(&self) -> MeasurementType {
        self.measurement_type
    }

    /// Rows in ascending age order
    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    /// First age covered
    pub fn min_age(&self) -> u32 {
        self.rows[0].age_in_days
    }

    /// Last age covered
    pub fn max_age(&self) -> u32 {
        self.rows[self.rows.len() - 1].age_in_days
    }

    /// Whether the table's published range includes `age_in_days`
    pub fn covers(&self, age_in_days: u32) -> bool {
        age_in_days >= self.min_age() && age_in_days <= self.max_age()
    }

    /// Error describing `age_in_days` as outside this table
    pub(crate) fn out_of_range(&self, age_in_days: u32) -> GrowthError {
        GrowthError::AgeOutOfRange {
            age_in_days,
            min_age: self.min_age(),
            max_age: self.max_age(),
        }
    }
}
