//! Industry benchmark profiles and comparisons against them.
//!
//! Profiles are read-only once the repository is built. Lookups never fail:
//! an unknown category resolves to the `general` profile, which is always
//! present.

mod alignment;
pub mod percentile;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scores::PerDimension;

pub use alignment::{
    APPROACHING_RATIO, AlignmentEntry, AlignmentStatus, EXCEEDS_RATIO, IndustryAlignment,
    IndustryReadiness, MEETS_RATIO, PROFESSIONAL_FRACTION,
};

/// Category every lookup falls back to.
pub const GENERAL_CATEGORY: &str = "general";

/// Distribution of overall scores in an industry population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub average: f64,
    pub top_percentile: f64,
    pub standard_deviation: f64,
    pub sample_size: u32,
}

/// Reference values for a single dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionBenchmark {
    pub average: f64,
    pub top_percentile: f64,
}

impl DimensionBenchmark {
    const fn new(average: f64, top_percentile: f64) -> Self {
        Self {
            average,
            top_percentile,
        }
    }
}

/// Named benchmark for one scenario category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkProfile {
    pub category: String,
    pub industry: IndustryBenchmark,
    pub dimensions: PerDimension<DimensionBenchmark>,
}

/// Percentile placement of a score within a profile's population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileRankings {
    pub benchmark_category: String,
    pub overall: f64,
    pub dimensions: PerDimension<f64>,
    pub sample_size: u32,
}

/// Holds the benchmark profiles known to this process.
#[derive(Debug, Clone)]
pub struct BenchmarkRepository {
    profiles: BTreeMap<String, BenchmarkProfile>,
}

impl Default for BenchmarkRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

impl BenchmarkRepository {
    /// Repository holding the given profiles.
    ///
    /// The seeded `general` profile is added when none of them is named `general`.
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = BenchmarkProfile>) -> Self {
        let mut profiles: BTreeMap<_, _> = profiles
            .into_iter()
            .map(|p| (p.category.clone(), p))
            .collect();
        profiles
            .entry(GENERAL_CATEGORY.to_string())
            .or_insert_with(general_profile);
        Self { profiles }
    }

    /// The stock `general`, `technical_support` and `comprehensive` profiles.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new([
            general_profile(),
            technical_support_profile(),
            comprehensive_profile(),
        ])
    }

    /// Configured profiles, or the stock set when none are configured.
    #[must_use]
    pub fn from_config(profiles: &[BenchmarkProfile]) -> Self {
        if profiles.is_empty() {
            Self::seeded()
        } else {
            Self::new(profiles.iter().cloned())
        }
    }

    /// Profile for `category`, falling back to `general`.
    #[must_use]
    pub fn get_benchmarks(&self, category: &str) -> &BenchmarkProfile {
        if let Some(profile) = self.profiles.get(category) {
            return profile;
        }
        warn!(category, "Unknown benchmark category, falling back to general");
        // `new` always inserts the general profile
        &self.profiles[GENERAL_CATEGORY]
    }

    /// Whether a profile is registered under exactly this name.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.profiles.contains_key(category)
    }

    /// Registered category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Place an overall score and its dimension scores within the profile.
    ///
    /// Dimensions use their own average with the industry standard deviation.
    #[must_use]
    pub fn calculate_percentile_rankings(
        &self,
        overall: f64,
        dimensions: &PerDimension<f64>,
        profile: &BenchmarkProfile,
    ) -> PercentileRankings {
        let sd = profile.industry.standard_deviation;
        let rankings = PercentileRankings {
            benchmark_category: profile.category.clone(),
            overall: percentile::percentile(overall, profile.industry.average, sd),
            dimensions: PerDimension::from_fn(|d| {
                percentile::percentile(*dimensions.get(d), profile.dimensions.get(d).average, sd)
            }),
            sample_size: profile.industry.sample_size,
        };
        debug!(
            category = %profile.category,
            overall_percentile = rankings.overall,
            "Calculated percentile rankings"
        );
        rankings
    }

    /// Compare scores with the profile's averages.
    #[must_use]
    pub fn assess_alignment(
        &self,
        overall: f64,
        dimensions: &PerDimension<f64>,
        profile: &BenchmarkProfile,
    ) -> IndustryAlignment {
        let industry = &profile.industry;
        IndustryAlignment {
            benchmark_category: profile.category.clone(),
            overall: AlignmentEntry::new(overall, industry.average),
            dimensions: PerDimension::from_fn(|d| {
                AlignmentEntry::new(*dimensions.get(d), profile.dimensions.get(d).average)
            }),
            meets_professional_standards: overall >= PROFESSIONAL_FRACTION * industry.average,
            industry_readiness: alignment::readiness(
                overall,
                industry.average,
                industry.top_percentile,
            ),
        }
    }
}

fn general_profile() -> BenchmarkProfile {
    BenchmarkProfile {
        category: GENERAL_CATEGORY.to_string(),
        industry: IndustryBenchmark {
            average: 72.0,
            top_percentile: 88.0,
            standard_deviation: 12.0,
            sample_size: 1500,
        },
        dimensions: PerDimension {
            technical: DimensionBenchmark::new(70.0, 87.0),
            communication: DimensionBenchmark::new(74.0, 90.0),
            procedural: DimensionBenchmark::new(75.0, 91.0),
            customer_service: DimensionBenchmark::new(73.0, 89.0),
            problem_solving: DimensionBenchmark::new(68.0, 86.0),
        },
    }
}

fn technical_support_profile() -> BenchmarkProfile {
    BenchmarkProfile {
        category: "technical_support".to_string(),
        industry: IndustryBenchmark {
            average: 75.0,
            top_percentile: 90.0,
            standard_deviation: 11.0,
            sample_size: 850,
        },
        dimensions: PerDimension {
            technical: DimensionBenchmark::new(77.0, 92.0),
            communication: DimensionBenchmark::new(73.0, 89.0),
            procedural: DimensionBenchmark::new(78.0, 93.0),
            customer_service: DimensionBenchmark::new(74.0, 90.0),
            problem_solving: DimensionBenchmark::new(72.0, 88.0),
        },
    }
}

fn comprehensive_profile() -> BenchmarkProfile {
    BenchmarkProfile {
        category: "comprehensive".to_string(),
        industry: IndustryBenchmark {
            average: 70.0,
            top_percentile: 87.0,
            standard_deviation: 13.0,
            sample_size: 600,
        },
        dimensions: PerDimension {
            technical: DimensionBenchmark::new(69.0, 86.0),
            communication: DimensionBenchmark::new(71.0, 88.0),
            procedural: DimensionBenchmark::new(72.0, 89.0),
            customer_service: DimensionBenchmark::new(70.0, 87.0),
            problem_solving: DimensionBenchmark::new(67.0, 85.0),
        },
    }
}
