//! LMS centile transform
//!
//! Converts a measurement into a z-score and percentile given the (L, M, S)
//! parameters at the child's age, and inverts the transform to find the
//! measurement at a given z-score.

use crate::error::{GrowthError, Result};
use crate::normal;
use crate::reference::LmsParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// |L| below this is treated as the log-normal limit L = 0
pub const L_ZERO_TOLERANCE: f64 = 1e-9;

/// Lowest percentile shown on reports
pub const DISPLAY_PERCENTILE_MIN: f64 = 0.1;

/// Highest percentile shown on reports
pub const DISPLAY_PERCENTILE_MAX: f64 = 99.9;

/// A measurement's position in the reference distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentileResult {
    /// Standard deviation score (never clamped)
    pub z: f64,
    /// 100 × Φ(z)
    ///
    /// Rounds to exactly 100 above z ≈ 8.3 and to 0 below z ≈ -37; `z` keeps
    /// the full distance.
    pub percentile: f64,
}

impl CentileResult {
    /// Build a result from a z-score
    pub fn from_z(z: f64) -> Self {
        Self {
            z,
            percentile: 100.0 * normal::cdf(z),
        }
    }

    /// Percentile clamped to the reportable band [0.1, 99.9]
    pub fn display_percentile(&self) -> f64 {
        self.percentile
            .clamp(DISPLAY_PERCENTILE_MIN, DISPLAY_PERCENTILE_MAX)
    }

    /// Short label such as `50.0th`, `<0.1th` or `>99.9th`
    pub fn display_label(&self) -> String {
        if self.percentile < DISPLAY_PERCENTILE_MIN {
            format!("<{:.1}th", DISPLAY_PERCENTILE_MIN)
        } else if self.percentile > DISPLAY_PERCENTILE_MAX {
            format!(">{:.1}th", DISPLAY_PERCENTILE_MAX)
        } else {
            format!("{:.1}th", self.percentile)
        }
    }
}

impl fmt::Display for CentileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (z = {:.2})", self.display_label(), self.z)
    }
}

/// How z-scores are derived from the LMS parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZScoreMethod {
    /// Plain LMS transform at every z
    #[default]
    Lms,
    /// WHO 2006 restricted application: beyond ±3 SD, weight and BMI z-scores
    /// are extended linearly using the distance between the 2 SD and 3 SD
    /// curves
    WhoRestricted,
}

fn check_value(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GrowthError::InvalidMeasurement(format!(
            "value must be positive, got {}",
            value
        )));
    }
    Ok(())
}

fn is_log_normal(l: f64) -> bool {
    l.abs() < L_ZERO_TOLERANCE
}

/// LMS z-score of `value`
///
/// A value so far from M that the power overflows is rejected rather than
/// reported as an infinite z-score.
pub fn z_score(value: f64, lms: LmsParams) -> Result<f64> {
    check_value(value)?;
    lms.validate()?;

    let LmsParams { l, m, s } = lms;
    let z = if is_log_normal(l) {
        (value / m).ln() / s
    } else {
        ((value / m).powf(l) - 1.0) / (l * s)
    };
    if !z.is_finite() {
        return Err(GrowthError::InvalidMeasurement(format!(
            "value {} has no finite z-score against M = {}",
            value, m
        )));
    }
    Ok(z)
}

/// Centile of `value` given its (L, M, S)
///
/// # Examples
///
/// ```
/// use growth_domain::{to_centile, LmsParams};
///
/// let result = to_centile(3.3, LmsParams::new(1.0, 3.3, 0.15)).unwrap();
/// assert_eq!(result.z, 0.0);
/// assert_eq!(result.percentile, 50.0);
/// ```
pub fn to_centile(value: f64, lms: LmsParams) -> Result<CentileResult> {
    Ok(CentileResult::from_z(z_score(value, lms)?))
}

/// Centile of `value` with an explicit z-score method
///
/// `restricted_tails` says whether the measurement is one the WHO restricts
/// (weight and BMI); otherwise the method has no effect.
pub fn to_centile_with(
    value: f64,
    lms: LmsParams,
    method: ZScoreMethod,
    restricted_tails: bool,
) -> Result<CentileResult> {
    let z = z_score(value, lms)?;

    let z = match method {
        ZScoreMethod::WhoRestricted if restricted_tails && z.abs() > 3.0 => {
            let sign = z.signum();
            let sd3 = value_at_z(lms, 3.0 * sign)?;
            let sd2 = value_at_z(lms, 2.0 * sign)?;
            // |sd3 - sd2| is the 2 SD to 3 SD spacing on the side of the tail
            3.0 * sign + (value - sd3) / (sd3 - sd2).abs()
        }
        _ => z,
    };

    Ok(CentileResult::from_z(z))
}

/// Measurement value at z-score `z` (inverse LMS transform)
///
/// Fails with [`GrowthError::DegenerateCurvePoint`] (age reported as 0) when
/// `1 + L·S·z <= 0`; callers that know the age re-tag the error.
pub fn value_at_z(lms: LmsParams, z: f64) -> Result<f64> {
    lms.validate()?;

    let LmsParams { l, m, s } = lms;
    if is_log_normal(l) {
        return Ok(m * (s * z).exp());
    }

    let base = 1.0 + l * s * z;
    if base <= 0.0 {
        return Err(GrowthError::DegenerateCurvePoint { age_in_days: 0, z });
    }
    Ok(m * base.powf(1.0 / l))
}
