//! Append-only growth record for one child
//!
//! A series is either empty or non-empty; `add` is its only transition and
//! there is no way to edit or remove an entry. Ages are derived from the
//! child's date of birth, never stored.

use crate::error::{GrowthError, Result};
use crate::measurement::{ChildProfile, Measurement, MeasurementId};
use crate::MeasurementType;

/// Days per year used when expressing ages in years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A child's dated measurements in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    profile: ChildProfile,
    measurements: Vec<Measurement>,
}

impl MeasurementSeries {
    /// Start an empty record for `profile`
    pub fn new(profile: ChildProfile) -> Self {
        Self {
            profile,
            measurements: Vec::new(),
        }
    }

    /// The child this record describes
    pub fn profile(&self) -> &ChildProfile {
        &self.profile
    }

    /// Append a measurement
    ///
    /// Rejects measurements dated before birth, readings that are not
    /// positive finite numbers, and an id already in the series. A rejected
    /// measurement leaves the series unchanged.
    pub fn add(&mut self, measurement: Measurement) -> Result<()> {
        if measurement.date < self.profile.date_of_birth {
            return Err(GrowthError::InvalidDate {
                date: measurement.date,
                date_of_birth: self.profile.date_of_birth,
            });
        }

        for (field, value) in [
            ("height_cm", measurement.height_cm),
            ("weight_kg", measurement.weight_kg),
            ("head_circumference_cm", measurement.head_circumference_cm),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(GrowthError::InvalidMeasurement(format!(
                        "{} must be positive, got {}",
                        field, v
                    )));
                }
            }
        }

        if self.get(measurement.id).is_some() {
            return Err(GrowthError::InvalidMeasurement(format!(
                "duplicate measurement id {}",
                measurement.id
            )));
        }

        self.measurements.push(measurement);
        Ok(())
    }

    /// Number of measurements
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether no measurement has been added
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// The entry with `id`, if present
    pub fn get(&self, id: MeasurementId) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id == id)
    }

    /// Measurements in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter()
    }

    /// The most recent measurement by date; ties go to the last appended
    pub fn latest(&self) -> Result<&Measurement> {
        self.measurements
            .iter()
            .enumerate()
            .max_by_key(|(index, m)| (m.date, *index))
            .map(|(_, m)| m)
            .ok_or(GrowthError::EmptySeries)
    }

    /// Age at `measurement` in days
    ///
    /// Stored measurements are never negative; a foreign measurement dated
    /// before birth saturates to 0.
    pub fn age_in_days(&self, measurement: &Measurement) -> u32 {
        let days = (measurement.date - self.profile.date_of_birth).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    /// Age at `measurement` in years (days / 365.25)
    pub fn age_in_years(&self, measurement: &Measurement) -> f64 {
        f64::from(self.age_in_days(measurement)) / DAYS_PER_YEAR
    }

    /// Body mass index, `weight_kg / (height_cm / 100)²`
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use growth_domain::{ChildProfile, Measurement, MeasurementSeries, Sex};
    ///
    /// let dob = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let series = MeasurementSeries::new(ChildProfile::new(dob, Sex::Female));
    /// let m = Measurement::new(dob).with_height(100.0).with_weight(20.0);
    /// assert_eq!(series.bmi(&m).unwrap(), 20.0);
    /// ```
    pub fn bmi(&self, measurement: &Measurement) -> Result<f64> {
        let height_cm = measurement
            .height_cm
            .ok_or(GrowthError::MissingField("height_cm"))?;
        let weight_kg = measurement
            .weight_kg
            .ok_or(GrowthError::MissingField("weight_kg"))?;

        let height_m = height_cm / 100.0;
        Ok(weight_kg / (height_m * height_m))
    }

    /// The reading of `measurement_type` in `measurement`, deriving BMI
    pub fn value(
        &self,
        measurement: &Measurement,
        measurement_type: MeasurementType,
    ) -> Result<f64> {
        match measurement_type {
            MeasurementType::Height => measurement
                .height_cm
                .ok_or(GrowthError::MissingField("height_cm")),
            MeasurementType::Weight => measurement
                .weight_kg
                .ok_or(GrowthError::MissingField("weight_kg")),
            MeasurementType::Bmi => self.bmi(measurement),
            MeasurementType::HeadCircumference => measurement
                .head_circumference_cm
                .ok_or(GrowthError::MissingField("head_circumference_cm")),
        }
    }

    /// Measurements ordered by age, paired with that age
    ///
    /// Equal ages keep insertion order.
    pub fn sorted_by_age(&self) -> Vec<(u32, &Measurement)> {
        let mut entries: Vec<(u32, &Measurement)> = self
            .measurements
            .iter()
            .map(|m| (self.age_in_days(m), m))
            .collect();
        entries.sort_by_key(|(age, _)| *age);
        entries
    }

    /// Age-ordered `(age_in_days, value)` points for one measurement type
    ///
    /// Measurements that lack the reading are skipped.
    pub fn points(&self, measurement_type: MeasurementType) -> Vec<(u32, f64)> {
        self.sorted_by_age()
            .into_iter()
            .filter_map(|(age, m)| self.value(m, measurement_type).ok().map(|v| (age, v)))
            .collect()
    }
}
