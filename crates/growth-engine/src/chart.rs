//! Chart specifications for one child's record
//!
//! A chart overlays the child's measurements, each with its centile, on the
//! reference percentile curves for the child's sex.

use crate::engine::GrowthEngine;
use chrono::NaiveDate;
use growth_domain::{
    CentileCurveSet, CentileResult, GrowthError, MeasurementId, MeasurementSeries,
    MeasurementType, ReferenceSource, Result, Sex,
};
use serde::Serialize;

/// Label of the age axis; curve and child points are in days
pub const AGE_AXIS_LABEL: &str = "Age (days)";

/// One of the child's own measurements on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildPoint {
    /// Entry the point was read from
    pub measurement_id: MeasurementId,
    /// Date measured
    pub date: NaiveDate,
    /// Age at measurement
    pub age_in_days: u32,
    /// Age at measurement in years
    pub age_in_years: f64,
    /// Measured (or derived, for BMI) value
    pub value: f64,
    /// Centile at that age; `None` outside the table's coverage
    pub centile: Option<CentileResult>,
}

/// Everything needed to draw one growth chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Measurement charted
    pub measurement_type: MeasurementType,
    /// Sex of the reference curves
    pub sex: Sex,
    /// Title, e.g. "Weight-for-age (Boys)"
    pub title: String,
    /// Horizontal axis label
    pub x_label: String,
    /// Vertical axis label, e.g. "Weight (kg)"
    pub y_label: String,
    /// Unit of the vertical axis
    pub unit: String,
    /// Reference percentile curves
    pub curves: CentileCurveSet,
    /// The child's measurements in age order
    pub child_points: Vec<ChildPoint>,
}

impl ChartSpec {
    /// Points that fall inside the reference table
    pub fn plotted_points(&self) -> impl Iterator<Item = &ChildPoint> {
        self.child_points.iter().filter(|p| p.centile.is_some())
    }
}

/// The most recent centile for one measurement type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Measurement type
    pub measurement_type: MeasurementType,
    /// Entry the row was read from
    pub measurement_id: MeasurementId,
    /// Date of the measurement used
    pub date: NaiveDate,
    /// Age at that measurement
    pub age_in_days: u32,
    /// Measured (or derived) value
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// Centile at that age
    pub centile: CentileResult,
}

/// Chart operations over one child's record
///
/// Borrowed from [`GrowthEngine::charts`]; holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct ChartFacade<'a> {
    engine: &'a GrowthEngine,
    series: &'a MeasurementSeries,
}

impl<'a> ChartFacade<'a> {
    pub(crate) fn new(engine: &'a GrowthEngine, series: &'a MeasurementSeries) -> Self {
        Self { engine, series }
    }

    /// The record being charted
    pub fn series(&self) -> &MeasurementSeries {
        self.series
    }

    pub(crate) fn engine(&self) -> &GrowthEngine {
        self.engine
    }

    /// Build the chart for `measurement_type`
    ///
    /// Fails with [`GrowthError::EmptySeries`] when nothing has been
    /// measured, [`GrowthError::MissingField`] when no measurement carries
    /// this type, and [`GrowthError::AgeOutOfRange`] when every point lies
    /// outside the reference table. Individual points outside the table keep
    /// a `None` centile.
    pub fn build_chart(&self, measurement_type: MeasurementType) -> Result<ChartSpec> {
        if self.series.is_empty() {
            return Err(GrowthError::EmptySeries);
        }

        let sex = self.series.profile().sex;
        let table = self.engine.store().get_table(sex, measurement_type)?;

        let mut child_points = Vec::new();
        for (age_in_days, measurement) in self.series.sorted_by_age() {
            let value = match self.series.value(measurement, measurement_type) {
                Ok(value) => value,
                Err(GrowthError::MissingField(_)) => continue,
                Err(e) => return Err(e),
            };

            let centile = if table.covers(age_in_days) {
                Some(
                    self.engine
                        .calculate_centile(measurement_type, value, age_in_days, sex)?,
                )
            } else {
                tracing::debug!(
                    measurement = %measurement_type,
                    age_in_days,
                    "Point outside reference coverage"
                );
                None
            };

            child_points.push(ChildPoint {
                measurement_id: measurement.id,
                date: measurement.date,
                age_in_days,
                age_in_years: self.series.age_in_years(measurement),
                value,
                centile,
            });
        }

        let last = match child_points.last() {
            Some(point) => point.age_in_days,
            None => return Err(GrowthError::MissingField(measurement_type.field_name())),
        };
        if child_points.iter().all(|p| p.centile.is_none()) {
            return Err(GrowthError::AgeOutOfRange {
                age_in_days: last,
                min_age: table.min_age(),
                max_age: table.max_age(),
            });
        }

        let curves = self.engine.default_curve_set(measurement_type, sex)?;

        Ok(ChartSpec {
            measurement_type,
            sex,
            title: format!("{} ({})", measurement_type.title(), sex.group_name()),
            x_label: AGE_AXIS_LABEL.to_string(),
            y_label: format!("{} ({})", measurement_type.name(), measurement_type.unit()),
            unit: measurement_type.unit().to_string(),
            curves: CentileCurveSet::clone(&curves),
            child_points,
        })
    }

    /// Centiles of the latest measurement, one row per type it carries
    ///
    /// Types the measurement lacks, or whose table does not cover the
    /// child's age, are left out.
    pub fn latest_centiles(&self) -> Result<Vec<SummaryRow>> {
        let latest = self.series.latest()?;
        let age_in_days = self.series.age_in_days(latest);
        let sex = self.series.profile().sex;

        let mut rows = Vec::new();
        for measurement_type in MeasurementType::ALL {
            let outcome = self
                .series
                .value(latest, measurement_type)
                .and_then(|value| {
                    self.engine
                        .calculate_centile(measurement_type, value, age_in_days, sex)
                        .map(|centile| (value, centile))
                });

            match outcome {
                Ok((value, centile)) => rows.push(SummaryRow {
                    measurement_type,
                    measurement_id: latest.id,
                    date: latest.date,
                    age_in_days,
                    value,
                    unit: measurement_type.unit().to_string(),
                    centile,
                }),
                Err(e) if e.is_recoverable() => {
                    tracing::debug!(
                        measurement = %measurement_type,
                        error = %e,
                        "No latest centile"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(rows)
    }
}
