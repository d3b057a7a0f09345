//! Final scoring of a finished session.
//!
//! [`PerformanceScorer`] runs the dimension engine, combines sub-scores with
//! the configured weights, applies the contextual difficulty adjustment and
//! compares the result with the scenario's benchmark profile. Every report it
//! produces is archived by session id so the breakdown and benchmark views
//! can be served later without recomputation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::benchmark::{
    AlignmentStatus, BenchmarkRepository, IndustryAlignment, IndustryReadiness,
    PercentileRankings,
};
use crate::config::{ScoringConfig, WeightConfig};
use crate::context::{ContextFactors, ScoringContext};
use crate::dimensions::{DimensionScoringEngine, SubScoreSets};
use crate::error::{Error, Result};
use crate::scores::{
    Dimension, DimensionScore, DimensionScoreSet, PerDimension, PerformanceScore,
    ScoreMetadata, SubScore, clamp_score,
};
use crate::store::{InMemorySessionStore, SessionStore};
use crate::types::{ReportId, SessionId};

/// Lower bound of the contextual multiplier.
pub const MIN_ADJUSTMENT: f64 = 0.90;
/// Upper bound of the contextual multiplier.
pub const MAX_ADJUSTMENT: f64 = 1.15;

/// Sub-scores below this value produce a recommendation.
pub const RECOMMENDATION_THRESHOLD: f64 = 70.0;
/// Maximum number of recommendations in a breakdown.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Multiplier rewarding performance under harder conditions.
///
/// Always within [`MIN_ADJUSTMENT`, `MAX_ADJUSTMENT`].
#[must_use]
pub fn contextual_adjustment(factors: &ContextFactors) -> f64 {
    let mut factor: f64 = 1.0;
    if factors.difficulty > 80.0 {
        factor += 0.05;
    } else if factors.difficulty < 40.0 {
        factor -= 0.03;
    }
    if factors.time_constraints > 80.0 {
        factor += 0.03;
    }
    if factors.customer_complexity > 75.0 {
        factor += 0.04;
    }
    if factors.technical_complexity > 85.0 {
        factor += 0.05;
    }
    if factors.resource_availability < 50.0 {
        factor += 0.02;
    }
    factor.clamp(MIN_ADJUSTMENT, MAX_ADJUSTMENT)
}

/// Coarse label for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Expert,
    Proficient,
    Competent,
    Developing,
    Novice,
}

impl PerformanceLevel {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Expert
        } else if score >= 80.0 {
            Self::Proficient
        } else if score >= 70.0 {
            Self::Competent
        } else if score >= 60.0 {
            Self::Developing
        } else {
            Self::Novice
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::Proficient => "proficient",
            Self::Competent => "competent",
            Self::Developing => "developing",
            Self::Novice => "novice",
        }
    }
}

/// How much one dimension contributed to the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionContribution {
    pub dimension: Dimension,
    pub score: f64,
    pub weight: f64,
    /// `score × weight`, in overall-score points
    pub contribution: f64,
    pub strongest: Option<SubScore>,
    pub weakest: Option<SubScore>,
}

/// Benchmark context summarized for a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryContext {
    pub benchmark_category: String,
    pub overall_percentile: f64,
    pub alignment: AlignmentStatus,
    pub readiness: IndustryReadiness,
    pub sample_size: u32,
}

/// Human-oriented explanation of an archived report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub session_id: SessionId,
    pub report_id: ReportId,
    pub overall: f64,
    pub performance_level: PerformanceLevel,
    pub dimensions: Vec<DimensionContribution>,
    pub recommendations: Vec<String>,
    pub industry_context: IndustryContext,
}

/// Percentile rankings plus alignment for an archived report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPerformance {
    pub session_id: SessionId,
    pub rankings: PercentileRankings,
    pub alignment: IndustryAlignment,
}

/// Scores finished sessions and archives the reports.
pub struct PerformanceScorer {
    engine: DimensionScoringEngine,
    benchmarks: Arc<BenchmarkRepository>,
    weights: WeightConfig,
    reports: Arc<dyn SessionStore<PerformanceScore>>,
}

impl PerformanceScorer {
    pub fn new(
        benchmarks: Arc<BenchmarkRepository>,
        weights: WeightConfig,
        reports: Arc<dyn SessionStore<PerformanceScore>>,
    ) -> Self {
        Self {
            engine: DimensionScoringEngine::new(),
            benchmarks,
            weights,
            reports,
        }
    }

    /// Scorer with configured weights and benchmarks and an in-memory archive.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            Arc::new(BenchmarkRepository::from_config(&config.benchmarks)),
            config.weights.clone(),
            Arc::new(InMemorySessionStore::new()),
        ))
    }

    #[must_use]
    pub fn benchmarks(&self) -> &BenchmarkRepository {
        &self.benchmarks
    }

    #[must_use]
    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Score a finished session and archive the report.
    pub fn score(&self, context: &ScoringContext) -> Result<PerformanceScore> {
        self.score_at(context, Utc::now())
    }

    /// Like [`score`](Self::score) with an explicit report timestamp.
    pub fn score_at(
        &self,
        context: &ScoringContext,
        timestamp: DateTime<Utc>,
    ) -> Result<PerformanceScore> {
        let session_id = &context.session_id;

        if let Err(e) = context.validate() {
            error!(session_id = %session_id, error = %e, "Rejected scoring context");
            return Err(e);
        }

        match self.reports.contains(session_id) {
            Ok(false) => {}
            Ok(true) => {
                let e = Error::ReportExists(session_id.clone());
                error!(session_id = %session_id, error = %e, "Report already archived");
                return Err(e);
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "Failed to read report store");
                return Err(e);
            }
        }

        let profile = self.benchmarks.get_benchmarks(&context.scenario.category);
        let raw = self.engine.score_all(context);
        let adjustment = contextual_adjustment(&context.context_factors);
        let dimensions = self.weigh(&raw, adjustment);

        let overall = match self.overall(&dimensions) {
            Ok(overall) => overall,
            Err(e) => {
                error!(session_id = %session_id, error = %e, "Scoring failed");
                return Err(e);
            }
        };

        let weighted = dimensions.weighted_values();
        let alignment = self.benchmarks.assess_alignment(overall, &weighted, profile);

        let report = PerformanceScore {
            report_id: ReportId::new(),
            overall,
            dimensions,
            metadata: ScoreMetadata {
                session_id: session_id.clone(),
                scenario_id: context.scenario_id.clone(),
                user_id: context.user_id.clone(),
                timestamp,
                context_factors: context.context_factors,
                adjustment_factor: adjustment,
                benchmark_category: profile.category.clone(),
                industry_alignment: alignment,
            },
        };

        if let Err(e) = self.reports.put(session_id.clone(), report.clone()) {
            error!(session_id = %session_id, error = %e, "Failed to archive report");
            return Err(e);
        }

        info!(
            session_id = %session_id,
            report_id = %report.report_id,
            overall = report.overall,
            benchmark = %profile.category,
            adjustment,
            "Performance report created"
        );
        Ok(report)
    }

    /// Archived report for a session.
    pub fn report(&self, session_id: &SessionId) -> Result<PerformanceScore> {
        self.reports
            .get(session_id)?
            .ok_or_else(|| Error::SessionNotFound(session_id.clone()))
    }

    /// Explain an archived report.
    pub fn score_breakdown(&self, session_id: &SessionId) -> Result<ScoreBreakdown> {
        let report = self.report(session_id)?;
        let profile = self
            .benchmarks
            .get_benchmarks(&report.metadata.benchmark_category);
        let rankings = self.benchmarks.calculate_percentile_rankings(
            report.overall,
            &report.dimensions.weighted_values(),
            profile,
        );

        let dimensions = report
            .dimensions
            .iter()
            .map(|(dimension, score)| {
                let weight = self.weights.dimension(dimension);
                DimensionContribution {
                    dimension,
                    score: score.weighted,
                    weight,
                    contribution: score.weighted * weight,
                    strongest: score.strongest().cloned(),
                    weakest: score.weakest().cloned(),
                }
            })
            .collect();

        let alignment = &report.metadata.industry_alignment;
        Ok(ScoreBreakdown {
            session_id: session_id.clone(),
            report_id: report.report_id,
            overall: report.overall,
            performance_level: PerformanceLevel::from_score(report.overall),
            dimensions,
            recommendations: recommendations(&report.dimensions),
            industry_context: IndustryContext {
                benchmark_category: alignment.benchmark_category.clone(),
                overall_percentile: rankings.overall,
                alignment: alignment.overall.status,
                readiness: alignment.industry_readiness,
                sample_size: rankings.sample_size,
            },
        })
    }

    /// Percentile rankings and alignment of an archived report.
    pub fn benchmark_performance(&self, session_id: &SessionId) -> Result<BenchmarkPerformance> {
        let report = self.report(session_id)?;
        let profile = self
            .benchmarks
            .get_benchmarks(&report.metadata.benchmark_category);
        let weighted = report.dimensions.weighted_values();

        Ok(BenchmarkPerformance {
            session_id: session_id.clone(),
            rankings: self
                .benchmarks
                .calculate_percentile_rankings(report.overall, &weighted, profile),
            alignment: self
                .benchmarks
                .assess_alignment(report.overall, &weighted, profile),
        })
    }

    fn weigh(&self, raw: &SubScoreSets, adjustment: f64) -> DimensionScoreSet {
        let w = &self.weights.sub_scores;
        let mut set = PerDimension {
            technical: DimensionScore::from_set(&raw.technical, &w.technical),
            communication: DimensionScore::from_set(&raw.communication, &w.communication),
            procedural: DimensionScore::from_set(&raw.procedural, &w.procedural),
            customer_service: DimensionScore::from_set(
                &raw.customer_service,
                &w.customer_service,
            ),
            problem_solving: DimensionScore::from_set(&raw.problem_solving, &w.problem_solving),
        };
        for dimension in Dimension::ALL {
            let score = set.get_mut(dimension);
            score.weighted = clamp_score(score.weighted * adjustment);
            debug!(dimension = %dimension, weighted = score.weighted, "Weighted dimension");
        }
        set
    }

    fn overall(&self, dimensions: &DimensionScoreSet) -> Result<f64> {
        let raw: f64 = dimensions
            .iter()
            .map(|(d, score)| score.weighted * self.weights.dimension(d))
            .sum();
        if !raw.is_finite() {
            return Err(Error::ComputationFailure(format!(
                "overall score is not finite: {raw}"
            )));
        }
        Ok(clamp_score(raw))
    }
}

/// Advice for every sub-score under the threshold, weakest first.
fn recommendations(dimensions: &DimensionScoreSet) -> Vec<String> {
    let mut weak: Vec<(f64, &'static str)> = dimensions
        .iter()
        .flat_map(|(dimension, score)| {
            score
                .sub_scores
                .iter()
                .filter(|s| s.value < RECOMMENDATION_THRESHOLD)
                .filter_map(move |s| advice(dimension, &s.name).map(|text| (s.value, text)))
        })
        .collect();
    weak.sort_by(|a, b| a.0.total_cmp(&b.0));
    weak.into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|(_, text)| text.to_string())
        .collect()
}

fn advice(dimension: Dimension, sub_score: &str) -> Option<&'static str> {
    let text = match (dimension, sub_score) {
        (Dimension::Technical, "accuracy") => {
            "Confirm the diagnosis with a second test before applying a fix."
        }
        (Dimension::Technical, "efficiency") => {
            "Work toward the expected resolution time and skip steps that do not narrow the problem."
        }
        (Dimension::Technical, "knowledge") => {
            "Review the knowledge base for this product area before the next session."
        }
        (Dimension::Technical, "innovation") => {
            "Consider an alternative solution when the standard fix is slow or disruptive."
        }
        (Dimension::Communication, "clarity") => {
            "Explain technical steps in plain language and check the customer follows."
        }
        (Dimension::Communication, "empathy") => {
            "Acknowledge the customer's frustration before moving to troubleshooting."
        }
        (Dimension::Communication, "professionalism") => {
            "Open with a greeting and close the conversation with a clear summary."
        }
        (Dimension::Communication, "responsiveness") => {
            "Reply to the customer within a couple of minutes, even if only with a status update."
        }
        (Dimension::Procedural, "compliance") => {
            "Follow the required troubleshooting steps in order and avoid procedure shortcuts."
        }
        (Dimension::Procedural, "documentation") => {
            "Document the problem, the steps taken and the outcome in the ticket."
        }
        (Dimension::Procedural, "security") => {
            "Verify the customer's identity and avoid actions that weaken security controls."
        }
        (Dimension::Procedural, "escalation") => {
            "Escalate once the issue is beyond your scope, and only after basic diagnosis."
        }
        (Dimension::CustomerService, "satisfaction") => {
            "Confirm the customer is satisfied with the outcome before closing the ticket."
        }
        (Dimension::CustomerService, "rapport") => {
            "Build rapport with a friendly greeting and keep the customer engaged."
        }
        (Dimension::CustomerService, "expectation_management") => {
            "Set expectations about timing and send status updates when work runs long."
        }
        (Dimension::CustomerService, "follow_through") => {
            "Verify the fix with the customer and schedule follow-up when it is required."
        }
        (Dimension::ProblemSolving, "analytical") => {
            "Look for the root cause rather than treating the symptom."
        }
        (Dimension::ProblemSolving, "systematic") => {
            "Start with an initial assessment and diagnose before applying a solution."
        }
        (Dimension::ProblemSolving, "creativity") => {
            "Brainstorm more than one approach before committing to a fix."
        }
        (Dimension::ProblemSolving, "resourcefulness") => {
            "Use documentation and research to solve problems before escalating."
        }
        _ => return None,
    };
    Some(text)
}
