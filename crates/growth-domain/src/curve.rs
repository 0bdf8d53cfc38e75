//! Percentile curve generation
//!
//! For every sampled age the table's (L, M, S) are interpolated and the LMS
//! transform is inverted at the z-score of each requested percentile. Points
//! whose inversion has no real solution are skipped individually and
//! recorded as gaps; the rest of the curve is still produced.

use crate::centile::value_at_z;
use crate::error::{GrowthError, Result};
use crate::interpolation::interpolate;
use crate::normal;
use crate::reference::ReferenceTable;
use crate::{MeasurementType, Sex};
use serde::{Deserialize, Serialize};

/// Tables covering at most this many days are sampled daily under [`AgeSampling::Auto`]
pub const DAILY_SAMPLING_LIMIT_DAYS: u32 = 730;

/// Step used under [`AgeSampling::Auto`] for longer tables (roughly monthly)
pub const MONTHLY_STEP_DAYS: u32 = 30;

/// Which ages a curve is evaluated at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeSampling {
    /// Daily up to two years of coverage, monthly beyond
    #[default]
    Auto,
    /// Every `n` days from the table's first age, always ending on its last
    Step(u32),
    /// Exactly these ages
    Ages(Vec<u32>),
}

impl AgeSampling {
    /// Replace `Auto` with the concrete step it implies for `table`
    pub fn resolve(&self, table: &ReferenceTable) -> AgeSampling {
        match self {
            AgeSampling::Auto => AgeSampling::Step(auto_step(table)),
            other => other.clone(),
        }
    }

    /// Ages to evaluate for `table`, ascending and de-duplicated
    pub fn ages(&self, table: &ReferenceTable) -> Result<Vec<u32>> {
        let step = match self {
            AgeSampling::Auto => auto_step(table),
            AgeSampling::Step(step) => *step,
            AgeSampling::Ages(list) => return listed_ages(list, table),
        };
        if step == 0 {
            return Err(GrowthError::InvalidConfig(
                "age step must be at least one day".to_string(),
            ));
        }

        let (min, max) = (table.min_age(), table.max_age());
        let mut ages: Vec<u32> = (min..=max).step_by(step as usize).collect();
        if ages.last() != Some(&max) {
            ages.push(max);
        }
        Ok(ages)
    }
}

fn auto_step(table: &ReferenceTable) -> u32 {
    if table.max_age() - table.min_age() <= DAILY_SAMPLING_LIMIT_DAYS {
        1
    } else {
        MONTHLY_STEP_DAYS
    }
}

fn listed_ages(list: &[u32], table: &ReferenceTable) -> Result<Vec<u32>> {
    if list.is_empty() {
        return Err(GrowthError::InvalidConfig(
            "age list must not be empty".to_string(),
        ));
    }

    let mut ages = list.to_vec();
    ages.sort_unstable();
    ages.dedup();
    if let Some(&age) = ages.iter().find(|&&age| !table.covers(age)) {
        return Err(table.out_of_range(age));
    }
    Ok(ages)
}

/// One sampled point on a percentile curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Age in days
    pub age_in_days: u32,
    /// Measurement value at this percentile
    pub value: f64,
}

/// A single percentile line, e.g. the 97th centile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileCurve {
    /// Percentile in (0, 100)
    pub percentile: f64,
    /// z-score of the percentile
    pub z: f64,
    /// Display label, e.g. `P97` or `P99.6`
    pub label: String,
    /// Points in ascending age
    pub points: Vec<CurvePoint>,
    /// Sampled ages with no real solution
    pub gaps: Vec<u32>,
}

impl PercentileCurve {
    /// Value at `age_in_days`, if that age was sampled and not a gap
    pub fn value_at(&self, age_in_days: u32) -> Option<f64> {
        self.points
            .binary_search_by_key(&age_in_days, |p| p.age_in_days)
            .ok()
            .map(|index| self.points[index].value)
    }
}

/// Reference percentile bands for one measurement type and sex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentileCurveSet {
    /// Measurement the curves describe
    pub measurement_type: MeasurementType,
    /// Sex the curves describe
    pub sex: Sex,
    /// Curves in ascending percentile order
    pub curves: Vec<PercentileCurve>,
}

impl CentileCurveSet {
    /// Curve for `percentile`, if it was requested
    pub fn curve(&self, percentile: f64) -> Option<&PercentileCurve> {
        self.curves
            .iter()
            .find(|c| (c.percentile - percentile).abs() < 1e-9)
    }

    /// Percentiles present, ascending
    pub fn percentiles(&self) -> Vec<f64> {
        self.curves.iter().map(|c| c.percentile).collect()
    }
}

/// Label for a percentile: `P3`, `P50`, `P99.6`
pub fn percentile_label(percentile: f64) -> String {
    if percentile.fract() == 0.0 {
        format!("P{:.0}", percentile)
    } else {
        format!("P{}", percentile)
    }
}

/// Check, sort and de-duplicate percentile labels
pub fn normalize_percentiles(percentiles: &[f64]) -> Result<Vec<f64>> {
    if percentiles.is_empty() {
        return Err(GrowthError::InvalidConfig(
            "at least one percentile is required".to_string(),
        ));
    }
    if let Some(p) = percentiles.iter().find(|&&p| !(p > 0.0 && p < 100.0)) {
        return Err(GrowthError::InvalidConfig(format!(
            "percentile {} is outside (0, 100)",
            p
        )));
    }

    let mut sorted = percentiles.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    Ok(sorted)
}

/// Generate percentile curves for `table`
///
/// # Examples
///
/// ```
/// use growth_domain::{
///     generate_curves, AgeSampling, MeasurementType, ReferenceRow, ReferenceTable, Sex,
/// };
///
/// let table = ReferenceTable::new(
///     Sex::Male,
///     MeasurementType::Weight,
///     vec![ReferenceRow::new(0, 1.0, 3.3, 0.15), ReferenceRow::new(60, 1.0, 5.5, 0.12)],
/// )
/// .unwrap();
///
/// let sampling = AgeSampling::Ages(vec![0, 30, 60]);
/// let set = generate_curves(&table, &[3.0, 50.0, 97.0], &sampling).unwrap();
/// assert_eq!(set.curves.len(), 3);
/// assert_eq!(set.curve(50.0).unwrap().points.len(), 3);
/// ```
pub fn generate_curves(
    table: &ReferenceTable,
    percentile_labels: &[f64],
    age_sampling: &AgeSampling,
) -> Result<CentileCurveSet> {
    let percentiles = normalize_percentiles(percentile_labels)?;
    let ages = age_sampling.ages(table)?;

    let mut curves = percentiles
        .iter()
        .map(|&percentile| {
            Ok(PercentileCurve {
                percentile,
                z: normal::inverse_cdf(percentile / 100.0)?,
                label: percentile_label(percentile),
                points: Vec::with_capacity(ages.len()),
                gaps: Vec::new(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for &age_in_days in &ages {
        let lms = interpolate(table, age_in_days)?;
        for curve in &mut curves {
            match value_at_z(lms, curve.z) {
                Ok(value) => curve.points.push(CurvePoint { age_in_days, value }),
                Err(GrowthError::DegenerateCurvePoint { .. }) => curve.gaps.push(age_in_days),
                Err(e) => return Err(e),
            }
        }
    }

    Ok(CentileCurveSet {
        measurement_type: table.measurement_type(),
        sex: table.sex(),
        curves,
    })
}
