//! Provisional scores computed while a session is still running.
//!
//! These are deliberately simpler than the final scorer: each dimension blends
//! a baseline with whatever signal has arrived so far, and the overall score is
//! discounted until the session looks complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::WeightConfig;
use crate::dimensions::signals::mean;
use crate::events::{ActionEvent, ActionKind, InteractionEvent};
use crate::scores::{PerDimension, clamp_score};

/// Baseline assumed for a dimension with no signal yet.
pub const BASELINE: f64 = 70.0;
/// Procedural starting point; it only ever decreases from here.
pub const PROCEDURAL_BASELINE: f64 = 90.0;

/// Live score for each dimension.
pub type ProgressiveDimensions = PerDimension<f64>;

/// Snapshot of a running session's standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveScore {
    pub overall: f64,
    pub dimensions: ProgressiveDimensions,
    /// How much evidence backs the score (0-100)
    pub confidence: f64,
    /// How far through the expected workflow the session is (0-100)
    pub completeness: f64,
    pub computed_at: DateTime<Utc>,
}

impl ProgressiveScore {
    /// Score a session starts with before any event arrives.
    #[must_use]
    pub fn baseline(at: DateTime<Utc>) -> Self {
        Self {
            overall: 70.0,
            dimensions: PerDimension {
                technical: BASELINE,
                communication: BASELINE,
                procedural: PROCEDURAL_BASELINE,
                customer_service: BASELINE,
                problem_solving: BASELINE,
            },
            confidence: 20.0,
            completeness: 0.0,
            computed_at: at,
        }
    }
}

/// Point in a session's score history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSample {
    pub at: DateTime<Utc>,
    pub overall: f64,
    pub completeness: f64,
}

impl From<&ProgressiveScore> for ScoreSample {
    fn from(score: &ProgressiveScore) -> Self {
        Self {
            at: score.computed_at,
            overall: score.overall,
            completeness: score.completeness,
        }
    }
}

/// Inputs for one recomputation.
pub(crate) struct Snapshot<'a> {
    pub actions: &'a [ActionEvent],
    pub interactions: &'a [InteractionEvent],
    pub elapsed_minutes: f64,
    pub expected_minutes: f64,
    pub previous_procedural: f64,
}

pub(crate) fn compute(
    snapshot: &Snapshot<'_>,
    weights: &WeightConfig,
    at: DateTime<Utc>,
) -> ProgressiveScore {
    let completeness = completeness(
        snapshot.actions,
        snapshot.elapsed_minutes,
        snapshot.expected_minutes,
    );
    let dimensions = dimensions(
        snapshot.actions,
        snapshot.interactions,
        snapshot.previous_procedural,
    );

    ProgressiveScore {
        overall: overall(&dimensions, weights, completeness),
        dimensions,
        confidence: confidence(
            snapshot.actions.len(),
            snapshot.interactions.len(),
            completeness,
            snapshot.elapsed_minutes,
        ),
        completeness,
        computed_at: at,
    }
}

/// Expected action kinds seen so far.
pub(crate) fn completed_steps(actions: &[ActionEvent]) -> usize {
    ActionKind::EXPECTED
        .iter()
        .filter(|kind| actions.iter().any(|a| a.kind == **kind))
        .count()
}

/// 70% workflow coverage, 30% time used.
pub(crate) fn completeness(actions: &[ActionEvent], elapsed_minutes: f64, expected: f64) -> f64 {
    let steps = completed_steps(actions) as f64 / ActionKind::EXPECTED.len() as f64 * 100.0;
    let time = if expected > 0.0 {
        (elapsed_minutes / expected * 100.0).min(100.0)
    } else {
        0.0
    };
    clamp_score(0.7 * steps + 0.3 * time)
}

pub(crate) fn dimensions(
    actions: &[ActionEvent],
    interactions: &[InteractionEvent],
    previous_procedural: f64,
) -> ProgressiveDimensions {
    let blend = |share: f64, signal: Option<f64>| match signal {
        Some(value) => clamp_score(share * BASELINE + (1.0 - share) * value),
        None => BASELINE,
    };

    let technical_quality = mean(
        actions
            .iter()
            .filter(|a| a.kind.is_technical())
            .map(|a| a.quality),
    );
    let clarity_and_empathy = mean(interactions.iter().map(|i| mean([i.clarity, i.empathy])));
    let satisfaction = mean(interactions.iter().map(|i| i.satisfaction));
    let solving_quality = mean(
        actions
            .iter()
            .filter(|a| {
                a.kind.is_diagnostic()
                    || matches!(a.kind, ActionKind::Solution | ActionKind::AlternativeSolution)
            })
            .map(|a| a.quality),
    );

    PerDimension {
        technical: blend(0.3, technical_quality),
        communication: blend(0.4, clarity_and_empathy),
        procedural: procedural(actions, previous_procedural),
        customer_service: blend(0.4, satisfaction),
        problem_solving: blend(0.5, solving_quality),
    }
}

/// Never rises above the previous value.
fn procedural(actions: &[ActionEvent], previous: f64) -> f64 {
    let violations = actions
        .iter()
        .filter(|a| a.kind == ActionKind::ProcedureViolation)
        .count() as f64;
    let risks = actions.iter().filter(|a| a.security_risk).count() as f64;
    let unnecessary = actions.iter().filter(|a| a.unnecessary).count() as f64;

    let current = PROCEDURAL_BASELINE - 10.0 * violations - 15.0 * risks - 5.0 * unnecessary;
    clamp_score(current.min(previous))
}

/// Weighted sum, discounted while the session is incomplete.
pub(crate) fn overall(
    dimensions: &ProgressiveDimensions,
    weights: &WeightConfig,
    completeness: f64,
) -> f64 {
    let weighted: f64 = dimensions
        .iter()
        .map(|(d, value)| value * weights.dimension(d))
        .sum();
    clamp_score(weighted * (0.7 + 0.3 * completeness / 100.0))
}

pub(crate) fn confidence(
    actions: usize,
    interactions: usize,
    completeness: f64,
    elapsed_minutes: f64,
) -> f64 {
    let from_actions = (5.0 * actions as f64).min(30.0);
    let from_interactions = (4.0 * interactions as f64).min(20.0);
    let from_time = (2.0 * elapsed_minutes.max(0.0)).min(20.0);
    clamp_score(from_actions + from_interactions + 0.3 * completeness + from_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::InteractionKind;

    #[test]
    fn baseline_is_the_documented_seed() {
        let score = ProgressiveScore::baseline(Utc::now());
        assert_eq!(score.overall, 70.0);
        assert_eq!(score.confidence, 20.0);
        assert_eq!(score.completeness, 0.0);
        assert_eq!(score.dimensions.procedural, 90.0);
        assert_eq!(score.dimensions.technical, 70.0);
    }

    #[test]
    fn completeness_mixes_steps_and_time() {
        let actions = vec![
            ActionEvent::new(ActionKind::InitialAssessment),
            ActionEvent::new(ActionKind::Diagnosis),
            ActionEvent::new(ActionKind::Diagnosis),
        ];
        // 0.7 × (2/6 × 100) + 0.3 × 50
        let value = completeness(&actions, 15.0, 30.0);
        assert!((value - (0.7 * 200.0 / 6.0 + 15.0)).abs() < 1e-9);
    }

    #[test]
    fn time_share_of_completeness_caps_at_full() {
        let value = completeness(&[], 90.0, 30.0);
        assert!((value - 30.0).abs() < 1e-9);
    }

    #[test]
    fn missing_signals_keep_the_baseline() {
        let actions = vec![ActionEvent::new(ActionKind::Research)];
        let dims = dimensions(&actions, &[], PROCEDURAL_BASELINE);
        assert_eq!(dims.technical, BASELINE);
        assert_eq!(dims.communication, BASELINE);
        assert_eq!(dims.procedural, PROCEDURAL_BASELINE);
    }

    #[test]
    fn signals_blend_with_baseline() {
        let actions = vec![ActionEvent::new(ActionKind::Diagnosis).with_quality(90.0)];
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Explanation)
                .with_clarity(80.0)
                .with_empathy(100.0)
                .with_satisfaction(50.0),
        ];
        let dims = dimensions(&actions, &interactions, PROCEDURAL_BASELINE);

        assert!((dims.technical - (21.0 + 63.0)).abs() < 1e-9);
        assert!((dims.communication - (28.0 + 54.0)).abs() < 1e-9);
        assert!((dims.customer_service - (28.0 + 30.0)).abs() < 1e-9);
        assert!((dims.problem_solving - (35.0 + 45.0)).abs() < 1e-9);
    }

    #[test]
    fn procedural_never_recovers() {
        let actions = vec![ActionEvent::new(ActionKind::ProcedureViolation)];
        assert_eq!(procedural(&actions, PROCEDURAL_BASELINE), 80.0);
        // Already lower than what the current events alone would give
        assert_eq!(procedural(&actions, 60.0), 60.0);
    }

    #[test]
    fn penalties_stack_and_clamp() {
        let actions: Vec<_> = (0..5)
            .map(|_| ActionEvent::new(ActionKind::Solution).with_security_risk().unnecessary())
            .collect();
        assert_eq!(procedural(&actions, PROCEDURAL_BASELINE), 0.0);
    }

    #[test]
    fn overall_is_discounted_until_complete() {
        let weights = WeightConfig::default();
        let dims = PerDimension::from_fn(|_| 80.0);
        assert!((overall(&dims, &weights, 0.0) - 56.0).abs() < 1e-9);
        assert!((overall(&dims, &weights, 100.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn confidence_components_are_capped() {
        assert!((confidence(0, 0, 0.0, 0.0)).abs() < 1e-9);
        // 30 + 20 + 30 + 20
        assert_eq!(confidence(100, 100, 100.0, 100.0), 100.0);
        // 10 + 4 + 6 + 2
        assert!((confidence(2, 1, 20.0, 1.0) - 22.0).abs() < 1e-9);
    }
}
