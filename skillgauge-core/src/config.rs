//! Scoring configuration.
//!
//! Every section has serde defaults equal to the documented constants, so an
//! empty TOML file (or no file at all) reproduces the stock behavior. Custom
//! weights must still be normalized; [`ScoringConfig::validate`] rejects any
//! set whose weights do not sum to 1.0.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::benchmark::BenchmarkProfile;
use crate::error::{Error, Result};
use crate::scores::{Dimension, PerDimension};

/// Allowed drift when checking that weights sum to one.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Top-level configuration for scoring and live assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Dimension and sub-score weights.
    pub weights: WeightConfig,
    /// Real-time tracker settings.
    pub realtime: RealtimeConfig,
    /// Replacement benchmark profiles. Empty keeps the seeded set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub benchmarks: Vec<BenchmarkProfile>,
}

impl ScoringConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ScoringConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No scoring config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check weight normalization and real-time settings.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.realtime.validate()?;
        if self.benchmarks.iter().any(|b| b.category.trim().is_empty()) {
            return Err(Error::InvalidConfig(
                "benchmark category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Weights used to combine sub-scores and dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Contribution of each dimension to the overall score.
    pub dimensions: PerDimension<f64>,
    /// Contribution of each sub-score within its dimension.
    pub sub_scores: PerDimension<BTreeMap<String, f64>>,
}

impl Default for WeightConfig {
    fn default() -> Self {
        let dimensions = PerDimension {
            technical: 0.25,
            communication: 0.25,
            procedural: 0.20,
            customer_service: 0.20,
            problem_solving: 0.10,
        };

        let sub_scores = PerDimension {
            technical: named(&[
                ("accuracy", 0.40),
                ("efficiency", 0.25),
                ("knowledge", 0.25),
                ("innovation", 0.10),
            ]),
            communication: named(&[
                ("clarity", 0.30),
                ("empathy", 0.25),
                ("professionalism", 0.25),
                ("responsiveness", 0.20),
            ]),
            procedural: named(&[
                ("compliance", 0.35),
                ("documentation", 0.25),
                ("security", 0.25),
                ("escalation", 0.15),
            ]),
            customer_service: named(&[
                ("satisfaction", 0.35),
                ("rapport", 0.20),
                ("expectation_management", 0.20),
                ("follow_through", 0.25),
            ]),
            problem_solving: named(&[
                ("analytical", 0.30),
                ("systematic", 0.30),
                ("creativity", 0.20),
                ("resourcefulness", 0.20),
            ]),
        };

        Self {
            dimensions,
            sub_scores,
        }
    }
}

fn named(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

impl WeightConfig {
    /// Weight of a dimension in the overall score.
    #[must_use]
    pub fn dimension(&self, dimension: Dimension) -> f64 {
        *self.dimensions.get(dimension)
    }

    /// Sub-score weights for a dimension.
    #[must_use]
    pub fn sub_scores(&self, dimension: Dimension) -> &BTreeMap<String, f64> {
        self.sub_scores.get(dimension)
    }

    /// Every dimension and sub-score must be weighted, non-negative, and sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let mut total = 0.0;
        for (dimension, weight) in self.dimensions.iter() {
            check_weight(&format!("dimension {dimension}"), *weight)?;
            total += weight;
        }
        check_sum("dimension weights", total)?;

        for (dimension, subs) in self.sub_scores.iter() {
            let expected = dimension.sub_score_names();
            if let Some(unknown) = subs.keys().find(|k| !expected.contains(&k.as_str())) {
                return Err(Error::InvalidConfig(format!(
                    "unknown sub-score '{unknown}' for {dimension}"
                )));
            }
            let mut sub_total = 0.0;
            for name in expected {
                let weight = subs.get(name).copied().ok_or_else(|| {
                    Error::InvalidConfig(format!("missing weight for {dimension}.{name}"))
                })?;
                check_weight(&format!("{dimension}.{name}"), weight)?;
                sub_total += weight;
            }
            check_sum(&format!("{dimension} sub-score weights"), sub_total)?;
        }

        Ok(())
    }
}

fn check_weight(name: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "weight for {name} must be a non-negative number, got {weight}"
        )));
    }
    Ok(())
}

fn check_sum(name: &str, total: f64) -> Result<()> {
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(Error::InvalidConfig(format!(
            "{name} must sum to 1.0, got {total:.6}"
        )));
    }
    Ok(())
}

/// Settings for the real-time tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Expected session length when the scenario gives none usable, in minutes.
    pub default_expected_minutes: f64,
    /// Elapsed/expected ratio above which the time-overrun indicator fires.
    pub time_overrun_ratio: f64,
    /// Completeness percentages that emit a milestone when crossed.
    pub milestones: Vec<f64>,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            default_expected_minutes: 30.0,
            time_overrun_ratio: 1.2,
            milestones: vec![25.0, 50.0, 75.0],
        }
    }
}

impl RealtimeConfig {
    fn validate(&self) -> Result<()> {
        if !self.default_expected_minutes.is_finite() || self.default_expected_minutes <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "realtime.default_expected_minutes must be positive, got {}",
                self.default_expected_minutes
            )));
        }
        if !self.time_overrun_ratio.is_finite() || self.time_overrun_ratio <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "realtime.time_overrun_ratio must be positive, got {}",
                self.time_overrun_ratio
            )));
        }
        if let Some(m) = self
            .milestones
            .iter()
            .find(|m| !(0.0..=100.0).contains(*m))
        {
            return Err(Error::InvalidConfig(format!(
                "realtime.milestones must be within 0-100, got {m}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_weights_are_normalized() {
        let weights = WeightConfig::default();
        weights.validate().unwrap();

        let total: f64 = weights.dimensions.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < WEIGHT_TOLERANCE);
        for dimension in Dimension::ALL {
            let sub_total: f64 = weights.sub_scores(dimension).values().sum();
            assert!(
                (sub_total - 1.0).abs() < WEIGHT_TOLERANCE,
                "{dimension} sub-weights sum to {sub_total}"
            );
        }
    }

    #[test]
    fn unnormalized_dimension_weights_are_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.dimensions.problem_solving = 0.3;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dimension weights must sum to 1.0"));
    }

    #[test]
    fn unknown_sub_score_is_rejected() {
        let mut config = ScoringConfig::default();
        config
            .weights
            .sub_scores
            .technical
            .insert("speed".to_string(), 0.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ScoringConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn toml_overrides_realtime_section() {
        let config = ScoringConfig::from_toml_str(
            r#"
            [realtime]
            default_expected_minutes = 45.0
            milestones = [50.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.realtime.default_expected_minutes, 45.0);
        assert_eq!(config.realtime.milestones, vec![50.0]);
        assert_eq!(config.realtime.time_overrun_ratio, 1.2);
    }

    #[test]
    fn toml_with_custom_weights_is_validated() {
        let toml = r#"
            [weights.dimensions]
            technical = 0.5
            communication = 0.2
            procedural = 0.1
            customer_service = 0.1
            problem_solving = 0.2
        "#;
        let err = ScoringConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ScoringConfig::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[realtime]\ntime_overrun_ratio = 1.5").unwrap();

        let config = ScoringConfig::load(&path).unwrap();
        assert_eq!(config.realtime.time_overrun_ratio, 1.5);
    }

    #[test]
    fn load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[realtime\n").unwrap();

        assert!(matches!(ScoringConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ScoringConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed = ScoringConfig::from_toml_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }
}
