//! Configuration for curve generation and centile calculation
//!
//! Defines which percentile lines are drawn, how densely curves are sampled
//! and how z-scores are derived.

use growth_domain::{normalize_percentiles, AgeSampling, GrowthError, ZScoreMethod};
use serde::{Deserialize, Serialize};

/// WHO chart percentiles: 3rd, 15th, 50th, 85th and 97th
pub const WHO_PERCENTILES: [f64; 5] = [3.0, 15.0, 50.0, 85.0, 97.0];

/// UK-WHO nine-centile chart lines, two-thirds of an SD apart
pub const NINE_CENTILE_PERCENTILES: [f64; 9] = [0.4, 2.0, 9.0, 25.0, 50.0, 75.0, 91.0, 98.0, 99.6];

/// Configuration for the growth engine
///
/// # Examples
///
/// ```
/// use growth_engine::EngineConfig;
///
/// // Default configuration (WHO five-line charts, automatic sampling)
/// let config = EngineConfig::default();
/// assert_eq!(config.percentile_labels, vec![3.0, 15.0, 50.0, 85.0, 97.0]);
///
/// // Nine centile lines
/// let config = EngineConfig::extended();
/// assert_eq!(config.percentile_labels.len(), 9);
///
/// // Daily sampling
/// let config = EngineConfig::high_resolution();
/// assert_eq!(config.age_step_days, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Percentile lines drawn on charts, each in (0, 100)
    /// Default: 3, 15, 50, 85, 97
    #[serde(default = "default_percentile_labels")]
    pub percentile_labels: Vec<f64>,

    /// Curve sampling step in days
    /// Default: none (daily up to two years of coverage, then every 30 days)
    #[serde(default)]
    pub age_step_days: Option<u32>,

    /// How z-scores are computed
    /// Default: plain LMS
    #[serde(default)]
    pub z_score_method: ZScoreMethod,
}

fn default_percentile_labels() -> Vec<f64> {
    WHO_PERCENTILES.to_vec()
}

impl Default for EngineConfig {
    /// WHO five-line charts with automatic sampling and plain LMS z-scores
    fn default() -> Self {
        Self {
            percentile_labels: default_percentile_labels(),
            age_step_days: None,
            z_score_method: ZScoreMethod::Lms,
        }
    }
}

impl EngineConfig {
    /// WHO presentation: five lines and the WHO restricted tails for weight and BMI
    pub fn who_standard() -> Self {
        Self {
            z_score_method: ZScoreMethod::WhoRestricted,
            ..Self::default()
        }
    }

    /// Nine centile lines (0.4th to 99.6th)
    pub fn extended() -> Self {
        Self {
            percentile_labels: NINE_CENTILE_PERCENTILES.to_vec(),
            ..Self::default()
        }
    }

    /// Daily sampling over the whole table
    ///
    /// Produces large curve sets for the 0–5 year tables.
    pub fn high_resolution() -> Self {
        Self {
            age_step_days: Some(1),
            ..Self::default()
        }
    }

    /// Sampling implied by `age_step_days`
    pub fn age_sampling(&self) -> AgeSampling {
        match self.age_step_days {
            Some(step) => AgeSampling::Step(step),
            None => AgeSampling::Auto,
        }
    }

    /// Check the percentile labels and the sampling step
    pub fn validate(&self) -> Result<(), GrowthError> {
        normalize_percentiles(&self.percentile_labels)?;
        if self.age_step_days == Some(0) {
            return Err(GrowthError::InvalidConfig(
                "age_step_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.percentile_labels, WHO_PERCENTILES.to_vec());
        assert_eq!(config.age_step_days, None);
        assert_eq!(config.z_score_method, ZScoreMethod::Lms);
        assert_eq!(config.age_sampling(), AgeSampling::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_who_standard_config() {
        let config = EngineConfig::who_standard();
        assert_eq!(config.z_score_method, ZScoreMethod::WhoRestricted);
        assert_eq!(config.percentile_labels, EngineConfig::default().percentile_labels);
    }

    #[test]
    fn test_extended_config() {
        let config = EngineConfig::extended();
        assert_eq!(config.percentile_labels.first(), Some(&0.4));
        assert_eq!(config.percentile_labels.last(), Some(&99.6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_high_resolution_config() {
        let config = EngineConfig::high_resolution();
        assert_eq!(config.age_sampling(), AgeSampling::Step(1));
    }

    #[test]
    fn test_validate_rejects_bad_labels() {
        let config = EngineConfig {
            percentile_labels: vec![50.0, 100.0],
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(GrowthError::InvalidConfig(_))));

        let config = EngineConfig {
            percentile_labels: vec![],
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = EngineConfig {
            age_step_days: Some(0),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(GrowthError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            percentile_labels = [10.0, 50.0, 90.0]
            z_score_method = "who_restricted"
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.percentile_labels, vec![10.0, 50.0, 90.0]);
        assert_eq!(config.age_step_days, None);
        assert_eq!(config.z_score_method, ZScoreMethod::WhoRestricted);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::extended();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
