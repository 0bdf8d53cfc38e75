//! Age interpolation of LMS parameters
//!
//! Between two published rows each of L, M and S is interpolated linearly
//! and independently:
//!
//! ```text
//! v = v0 + (v1 - v0) * (age - age0) / (age1 - age0)
//! ```
//!
//! Ages outside the table are rejected; published standards make no claim
//! beyond their last row.

use crate::error::Result;
use crate::reference::{LmsParams, ReferenceTable};

/// Interpolated (L, M, S) for `age_in_days`
///
/// An age equal to a row's age returns that row's parameters exactly. A
/// single-row table covers only its own age.
///
/// # Examples
///
/// ```
/// use growth_domain::{interpolate, MeasurementType, ReferenceRow, ReferenceTable, Sex};
///
/// let table = ReferenceTable::new(
///     Sex::Male,
///     MeasurementType::Height,
///     vec![ReferenceRow::new(0, 1.0, 50.0, 0.04), ReferenceRow::new(10, 1.0, 60.0, 0.03)],
/// )
/// .unwrap();
///
/// let lms = interpolate(&table, 5).unwrap();
/// assert!((lms.m - 55.0).abs() < 1e-12);
/// assert!(interpolate(&table, 11).is_err());
/// ```
pub fn interpolate(table: &ReferenceTable, age_in_days: u32) -> Result<LmsParams> {
    let rows = table.rows();

    match rows.binary_search_by_key(&age_in_days, |row| row.age_in_days) {
        Ok(index) => Ok(rows[index].lms()),
        Err(index) if index == 0 || index == rows.len() => Err(table.out_of_range(age_in_days)),
        Err(index) => {
            let lower = &rows[index - 1];
            let upper = &rows[index];
            let fraction = f64::from(age_in_days - lower.age_in_days)
                / f64::from(upper.age_in_days - lower.age_in_days);

            Ok(LmsParams::new(
                lerp(lower.l, upper.l, fraction),
                lerp(lower.m, upper.m, fraction),
                lerp(lower.s, upper.s, fraction),
            ))
        }
    }
}

fn lerp(v0: f64, v1: f64, fraction: f64) -> f64 {
    v0 + (v1 - v0) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrowthError;
    use crate::reference::ReferenceRow;
    use crate::{MeasurementType, Sex};

    fn weight_table() -> ReferenceTable {
        ReferenceTable::new(
            Sex::Male,
            MeasurementType::Weight,
            vec![
                ReferenceRow::new(0, 0.3487, 3.3464, 0.14602),
                ReferenceRow::new(30, 0.2297, 4.4709, 0.13395),
                ReferenceRow::new(61, 0.1970, 5.5675, 0.12385),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_row_returns_row_values() {
        let table = weight_table();
        for row in table.rows() {
            let lms = interpolate(&table, row.age_in_days).unwrap();
            assert_eq!(lms, row.lms());
        }
    }

    #[test]
    fn test_midpoint_interpolation() {
        let table = weight_table();
        let lms = interpolate(&table, 15).unwrap();

        assert!((lms.l - (0.3487 + 0.2297) / 2.0).abs() < 1e-12);
        assert!((lms.m - (3.3464 + 4.4709) / 2.0).abs() < 1e-12);
        assert!((lms.s - (0.14602 + 0.13395) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_uneven_interval() {
        let table = weight_table();
        // 31 days is 1/31 of the way from day 30 to day 61
        let lms = interpolate(&table, 31).unwrap();
        let expected_m = 4.4709 + (5.5675 - 4.4709) / 31.0;
        assert!((lms.m - expected_m).abs() < 1e-12);
    }

    #[test]
    fn test_above_maximum_fails() {
        let table = weight_table();
        assert_eq!(
            interpolate(&table, 62),
            Err(GrowthError::AgeOutOfRange {
                age_in_days: 62,
                min_age: 0,
                max_age: 61,
            })
        );
    }

    #[test]
    fn test_below_minimum_fails() {
        let table = ReferenceTable::new(
            Sex::Female,
            MeasurementType::Bmi,
            vec![
                ReferenceRow::new(731, -0.5684, 15.6881, 0.08454),
                ReferenceRow::new(1096, -0.56, 15.4, 0.085),
            ],
        )
        .unwrap();
        assert!(matches!(
            interpolate(&table, 730),
            Err(GrowthError::AgeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_single_row_table() {
        let table = ReferenceTable::new(
            Sex::Male,
            MeasurementType::Weight,
            vec![ReferenceRow::new(0, 1.0, 3.3, 0.15)],
        )
        .unwrap();

        assert_eq!(interpolate(&table, 0).unwrap(), LmsParams::new(1.0, 3.3, 0.15));
        assert!(interpolate(&table, 1).is_err());
    }
}
