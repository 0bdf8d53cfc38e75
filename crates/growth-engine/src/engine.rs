//! Caller-facing growth engine
//!
//! Binds a reference store, a configuration and a curve cache together.

use crate::cache::{CurveCache, CurveKey};
use crate::chart::ChartFacade;
use crate::config::EngineConfig;
use crate::error::Result;
use growth_domain::{
    generate_curves, interpolate, normalize_percentiles, to_centile_with, AgeSampling,
    CentileCurveSet, CentileResult, MeasurementSeries, MeasurementType, ReferenceSource, Sex,
};
use growth_store::ReferenceStore;
use std::sync::Arc;

/// Entry point for centile calculation, curve generation and charts
///
/// The engine is `Send + Sync`; one instance can serve many sessions.
#[derive(Debug)]
pub struct GrowthEngine {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
    cache: CurveCache,
}

impl GrowthEngine {
    /// Create an engine over `store`
    ///
    /// Fails if `config` does not validate.
    pub fn new(store: Arc<ReferenceStore>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            dataset = store.dataset_version(),
            percentiles = ?config.percentile_labels,
            "Growth engine created"
        );
        Ok(Self {
            store,
            config,
            cache: CurveCache::new(),
        })
    }

    /// Engine over the shared bundled dataset with the default configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use growth_domain::{MeasurementType, Sex};
    /// use growth_engine::GrowthEngine;
    ///
    /// let engine = GrowthEngine::bundled().unwrap();
    /// let result = engine
    ///     .calculate_centile(MeasurementType::Weight, 3.3464, 0, Sex::Male)
    ///     .unwrap();
    /// assert_eq!(result.display_label(), "50.0th");
    /// ```
    pub fn bundled() -> Result<Self> {
        Self::new(ReferenceStore::shared()?, EngineConfig::default())
    }

    /// Reference data in use
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Centile of `value` for a child of `sex` aged `age_in_days`
    pub fn calculate_centile(
        &self,
        measurement_type: MeasurementType,
        value: f64,
        age_in_days: u32,
        sex: Sex,
    ) -> growth_domain::Result<CentileResult> {
        let table = self.store.get_table(sex, measurement_type)?;
        let lms = interpolate(table, age_in_days)?;
        to_centile_with(
            value,
            lms,
            self.config.z_score_method,
            measurement_type.uses_restricted_tails(),
        )
    }

    /// Curves at `percentile_labels`, sampled per the configured step
    pub fn get_curve_set(
        &self,
        measurement_type: MeasurementType,
        sex: Sex,
        percentile_labels: &[f64],
    ) -> growth_domain::Result<Arc<CentileCurveSet>> {
        self.get_curve_set_with(
            measurement_type,
            sex,
            percentile_labels,
            &self.config.age_sampling(),
        )
    }

    /// Curves at `percentile_labels` with an explicit age sampling
    pub fn get_curve_set_with(
        &self,
        measurement_type: MeasurementType,
        sex: Sex,
        percentile_labels: &[f64],
        age_sampling: &AgeSampling,
    ) -> growth_domain::Result<Arc<CentileCurveSet>> {
        let table = self.store.get_table(sex, measurement_type)?;
        let percentiles = normalize_percentiles(percentile_labels)?;
        let sampling = age_sampling.resolve(table);

        let key = CurveKey::new(sex, measurement_type, &percentiles, sampling.clone());
        self.cache
            .get_or_try_insert(key, || generate_curves(table, &percentiles, &sampling))
    }

    /// Curves at the configured percentile labels
    pub fn default_curve_set(
        &self,
        measurement_type: MeasurementType,
        sex: Sex,
    ) -> growth_domain::Result<Arc<CentileCurveSet>> {
        self.get_curve_set(measurement_type, sex, &self.config.percentile_labels)
    }

    /// Number of curve sets generated so far
    pub fn cached_curve_sets(&self) -> usize {
        self.cache.len()
    }

    /// Chart and report operations over one child's record
    pub fn charts<'a>(&'a self, series: &'a MeasurementSeries) -> ChartFacade<'a> {
        ChartFacade::new(self, series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_domain::{GrowthError, ReferenceRow, ReferenceTable};

    fn engine() -> GrowthEngine {
        GrowthEngine::bundled().unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            age_step_days: Some(0),
            ..EngineConfig::default()
        };
        let store = ReferenceStore::shared().unwrap();
        assert!(GrowthEngine::new(store, config).is_err());
    }

    #[test]
    fn test_median_weight_at_birth() {
        let result = engine()
            .calculate_centile(MeasurementType::Weight, 3.3464, 0, Sex::Male)
            .unwrap();
        assert!(result.z.abs() < 1e-12);
        assert!((result.percentile - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_centile_out_of_range() {
        let result = engine().calculate_centile(
            MeasurementType::HeadCircumference,
            52.0,
            7 * 365,
            Sex::Female,
        );
        assert!(matches!(result, Err(GrowthError::AgeOutOfRange { .. })));
    }

    #[test]
    fn test_unknown_standard() {
        let table = ReferenceTable::new(
            Sex::Male,
            MeasurementType::Height,
            vec![ReferenceRow::new(0, 1.0, 49.8842, 0.03795)],
        )
        .unwrap();
        let store = Arc::new(ReferenceStore::from_tables("test", vec![table]).unwrap());
        let engine = GrowthEngine::new(store, EngineConfig::default()).unwrap();

        let result = engine.calculate_centile(MeasurementType::Weight, 3.3, 0, Sex::Male);
        assert!(matches!(result, Err(GrowthError::UnknownStandard { .. })));
    }

    #[test]
    fn test_curve_set_is_cached() {
        let engine = engine();
        let a = engine
            .get_curve_set(MeasurementType::Height, Sex::Female, &[97.0, 3.0, 50.0])
            .unwrap();
        let b = engine
            .get_curve_set(MeasurementType::Height, Sex::Female, &[3.0, 50.0, 97.0, 50.0])
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(engine.cached_curve_sets(), 1);
        assert_eq!(a.percentiles(), vec![3.0, 50.0, 97.0]);
    }

    #[test]
    fn test_auto_and_equivalent_step_share_entry() {
        let engine = engine();
        // bundled BMI table spans more than two years, so Auto resolves to a 30-day step
        let auto = engine
            .get_curve_set_with(MeasurementType::Bmi, Sex::Male, &[50.0], &AgeSampling::Auto)
            .unwrap();
        let step = engine
            .get_curve_set_with(MeasurementType::Bmi, Sex::Male, &[50.0], &AgeSampling::Step(30))
            .unwrap();
        assert!(Arc::ptr_eq(&auto, &step));
    }

    #[test]
    fn test_curve_set_invalid_labels() {
        let result = engine().get_curve_set(MeasurementType::Weight, Sex::Male, &[0.0, 50.0]);
        assert!(matches!(result, Err(GrowthError::InvalidConfig(_))));
    }
}
