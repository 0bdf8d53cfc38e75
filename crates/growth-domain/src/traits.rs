//! Trait definitions for external interactions
//!
//! Reference data lives outside the domain crate; computations reach it only
//! through these traits.

use crate::error::{GrowthError, Result};
use crate::reference::ReferenceTable;
use crate::{MeasurementType, Sex};

/// Read-only lookup of reference tables
///
/// Implemented by the infrastructure layer (growth-store)
pub trait ReferenceSource {
    /// The table for `(sex, measurement_type)`, if the dataset has one
    fn find_table(&self, sex: Sex, measurement_type: MeasurementType) -> Option<&ReferenceTable>;

    /// The table for `(sex, measurement_type)`
    ///
    /// Fails with [`GrowthError::UnknownStandard`] if the pair has no data.
    fn get_table(&self, sex: Sex, measurement_type: MeasurementType) -> Result<&ReferenceTable> {
        self.find_table(sex, measurement_type)
            .ok_or(GrowthError::UnknownStandard {
                sex,
                measurement_type,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceRow;

    struct SingleTable(ReferenceTable);

    impl ReferenceSource for SingleTable {
        fn find_table(
            &self,
            sex: Sex,
            measurement_type: MeasurementType,
        ) -> Option<&ReferenceTable> {
            let matches = self.0.sex() == sex && self.0.measurement_type() == measurement_type;
            matches.then_some(&self.0)
        }
    }

    #[test]
    fn test_get_table_unknown_standard() {
        let table = ReferenceTable::new(
            Sex::Female,
            MeasurementType::Height,
            vec![ReferenceRow::new(0, 1.0, 49.1477, 0.0379)],
        )
        .unwrap();
        let source = SingleTable(table);

        assert!(source.get_table(Sex::Female, MeasurementType::Height).is_ok());
        assert_eq!(
            source.get_table(Sex::Male, MeasurementType::Height).unwrap_err(),
            GrowthError::UnknownStandard {
                sex: Sex::Male,
                measurement_type: MeasurementType::Height,
            }
        );
    }
}
