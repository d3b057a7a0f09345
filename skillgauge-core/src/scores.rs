//! Score types produced by the dimension engine and the final scorer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::benchmark::IndustryAlignment;
use crate::context::ContextFactors;
use crate::types::{ReportId, ScenarioId, SessionId, UserId};

/// Clamp a score into the reportable 0-100 range.
///
/// Non-finite input collapses to 0 so a bad signal can never escape as NaN.
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// One of the five competency axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Technical,
    Communication,
    Procedural,
    CustomerService,
    ProblemSolving,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Technical,
        Dimension::Communication,
        Dimension::Procedural,
        Dimension::CustomerService,
        Dimension::ProblemSolving,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Communication => "communication",
            Self::Procedural => "procedural",
            Self::CustomerService => "customer_service",
            Self::ProblemSolving => "problem_solving",
        }
    }

    /// Names of the four sub-scores, matching the field names of the sub-score set.
    #[must_use]
    pub fn sub_score_names(&self) -> [&'static str; 4] {
        match self {
            Self::Technical => ["accuracy", "efficiency", "knowledge", "innovation"],
            Self::Communication => ["clarity", "empathy", "professionalism", "responsiveness"],
            Self::Procedural => ["compliance", "documentation", "security", "escalation"],
            Self::CustomerService => [
                "satisfaction",
                "rapport",
                "expectation_management",
                "follow_through",
            ],
            Self::ProblemSolving => [
                "analytical",
                "systematic",
                "creativity",
                "resourcefulness",
            ],
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Communication => "Communication",
            Self::Procedural => "Procedural",
            Self::CustomerService => "Customer Service",
            Self::ProblemSolving => "Problem-Solving",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerDimension<T> {
    pub technical: T,
    pub communication: T,
    pub procedural: T,
    pub customer_service: T,
    pub problem_solving: T,
}

impl<T> PerDimension<T> {
    /// Build by evaluating `f` for every dimension.
    pub fn from_fn(mut f: impl FnMut(Dimension) -> T) -> Self {
        Self {
            technical: f(Dimension::Technical),
            communication: f(Dimension::Communication),
            procedural: f(Dimension::Procedural),
            customer_service: f(Dimension::CustomerService),
            problem_solving: f(Dimension::ProblemSolving),
        }
    }

    #[must_use]
    pub fn get(&self, dimension: Dimension) -> &T {
        match dimension {
            Dimension::Technical => &self.technical,
            Dimension::Communication => &self.communication,
            Dimension::Procedural => &self.procedural,
            Dimension::CustomerService => &self.customer_service,
            Dimension::ProblemSolving => &self.problem_solving,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut T {
        match dimension {
            Dimension::Technical => &mut self.technical,
            Dimension::Communication => &mut self.communication,
            Dimension::Procedural => &mut self.procedural,
            Dimension::CustomerService => &mut self.customer_service,
            Dimension::ProblemSolving => &mut self.problem_solving,
        }
    }

    /// Iterate `(dimension, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &T)> {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Four named sub-scores belonging to one dimension.
pub trait SubScoreSet {
    /// The dimension these sub-scores belong to.
    const DIMENSION: Dimension;

    /// Sub-score names and values, in declaration order.
    fn entries(&self) -> [(&'static str, f64); 4];
}

macro_rules! sub_score_set {
    ($(#[$meta:meta])* $name:ident, $dimension:expr, [$($field:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(pub $field: f64,)+
        }

        impl $name {
            /// Clamp every sub-score into 0-100.
            #[must_use]
            pub fn clamped(self) -> Self {
                Self { $($field: clamp_score(self.$field),)+ }
            }
        }

        impl SubScoreSet for $name {
            const DIMENSION: Dimension = $dimension;

            fn entries(&self) -> [(&'static str, f64); 4] {
                [$((stringify!($field), self.$field),)+]
            }
        }
    };
}

sub_score_set!(
    /// Technical accuracy, efficiency, knowledge and innovation.
    TechnicalScores,
    Dimension::Technical,
    [accuracy, efficiency, knowledge, innovation]
);

sub_score_set!(
    CommunicationScores,
    Dimension::Communication,
    [clarity, empathy, professionalism, responsiveness]
);

sub_score_set!(
    ProceduralScores,
    Dimension::Procedural,
    [compliance, documentation, security, escalation]
);

sub_score_set!(
    CustomerServiceScores,
    Dimension::CustomerService,
    [satisfaction, rapport, expectation_management, follow_through]
);

sub_score_set!(
    ProblemSolvingScores,
    Dimension::ProblemSolving,
    [analytical, systematic, creativity, resourcefulness]
);

/// A named sub-score value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub name: String,
    pub value: f64,
}

/// Sub-scores of one dimension plus their weighted combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub sub_scores: Vec<SubScore>,
    /// Weighted sub-score average after contextual adjustment (0-100)
    pub weighted: f64,
}

impl DimensionScore {
    /// Combine a sub-score set using per-name weights.
    ///
    /// `weighted = Σ(sub × w) / Σ w`; names without a weight contribute nothing.
    #[must_use]
    pub fn from_set<S: SubScoreSet>(set: &S, weights: &BTreeMap<String, f64>) -> Self {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut sub_scores = Vec::with_capacity(4);

        for (name, value) in set.entries() {
            let value = clamp_score(value);
            let weight = weights.get(name).copied().unwrap_or(0.0);
            numerator += value * weight;
            denominator += weight;
            sub_scores.push(SubScore {
                name: name.to_string(),
                value,
            });
        }

        let weighted = if denominator > 0.0 {
            numerator / denominator
        } else {
            0.0
        };

        Self {
            dimension: S::DIMENSION,
            sub_scores,
            weighted: clamp_score(weighted),
        }
    }

    /// Look up a sub-score by name.
    #[must_use]
    pub fn sub_score(&self, name: &str) -> Option<f64> {
        self.sub_scores
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value)
    }

    /// Highest sub-score (first wins on ties).
    #[must_use]
    pub fn strongest(&self) -> Option<&SubScore> {
        self.sub_scores
            .iter()
            .reduce(|best, s| if s.value > best.value { s } else { best })
    }

    /// Lowest sub-score (first wins on ties).
    #[must_use]
    pub fn weakest(&self) -> Option<&SubScore> {
        self.sub_scores
            .iter()
            .reduce(|worst, s| if s.value < worst.value { s } else { worst })
    }
}

/// Scores for all five dimensions.
pub type DimensionScoreSet = PerDimension<DimensionScore>;

impl PerDimension<DimensionScore> {
    /// Weighted value of a dimension.
    #[must_use]
    pub fn weighted(&self, dimension: Dimension) -> f64 {
        self.get(dimension).weighted
    }

    /// Weighted values only.
    #[must_use]
    pub fn weighted_values(&self) -> PerDimension<f64> {
        PerDimension::from_fn(|d| self.weighted(d))
    }
}

/// Provenance of a final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
    pub context_factors: ContextFactors,
    /// Clamped contextual multiplier applied to every dimension
    pub adjustment_factor: f64,
    /// Benchmark profile actually used (after fallback)
    pub benchmark_category: String,
    pub industry_alignment: IndustryAlignment,
}

/// Final, immutable assessment of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub report_id: ReportId,
    pub overall: f64,
    pub dimensions: DimensionScoreSet,
    pub metadata: ScoreMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technical_weights() -> BTreeMap<String, f64> {
        [
            ("accuracy", 0.40),
            ("efficiency", 0.25),
            ("knowledge", 0.25),
            ("innovation", 0.10),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn clamp_score_bounds_and_rejects_nan() {
        assert_eq!(clamp_score(120.0), 100.0);
        assert_eq!(clamp_score(-4.0), 0.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(64.5), 64.5);
    }

    #[test]
    fn weighted_uses_normalized_sub_weights() {
        let set = TechnicalScores {
            accuracy: 100.0,
            efficiency: 80.0,
            knowledge: 60.0,
            innovation: 40.0,
        };
        let score = DimensionScore::from_set(&set, &technical_weights());

        // 40 + 20 + 15 + 4
        assert!((score.weighted - 79.0).abs() < 1e-9);
        assert_eq!(score.dimension, Dimension::Technical);
        assert_eq!(score.sub_score("knowledge"), Some(60.0));
    }

    #[test]
    fn from_set_clamps_out_of_range_sub_scores() {
        let set = TechnicalScores {
            accuracy: 130.0,
            efficiency: -20.0,
            knowledge: 50.0,
            innovation: 50.0,
        };
        let score = DimensionScore::from_set(&set, &technical_weights());

        assert_eq!(score.sub_score("accuracy"), Some(100.0));
        assert_eq!(score.sub_score("efficiency"), Some(0.0));
        assert!((0.0..=100.0).contains(&score.weighted));
    }

    #[test]
    fn strongest_and_weakest_pick_extremes() {
        let set = CommunicationScores {
            clarity: 70.0,
            empathy: 95.0,
            professionalism: 60.0,
            responsiveness: 80.0,
        };
        let weights = BTreeMap::new();
        let score = DimensionScore::from_set(&set, &weights);

        assert_eq!(score.strongest().unwrap().name, "empathy");
        assert_eq!(score.weakest().unwrap().name, "professionalism");
        // No weights at all yields a zero rather than a division by zero
        assert_eq!(score.weighted, 0.0);
    }

    #[test]
    fn entries_follow_declaration_order() {
        let set = CustomerServiceScores {
            satisfaction: 1.0,
            rapport: 2.0,
            expectation_management: 3.0,
            follow_through: 4.0,
        };
        let names: Vec<_> = set.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "satisfaction",
                "rapport",
                "expectation_management",
                "follow_through"
            ]
        );
    }
}
