//! End-of-session summary.

use serde::{Deserialize, Serialize};

use super::feedback::KeyMoment;
use super::indicators::PerformanceIndicator;
use super::progressive::{ProgressiveScore, ScoreSample};
use super::session::AssessmentSession;
use crate::events::ActionKind;
use crate::types::SessionId;

/// Points of overall change that count as a trend.
pub const TREND_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Steady,
    Declining,
}

/// Direction of the overall score across a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTrend {
    pub direction: TrendDirection,
    /// Last sample minus first sample, in points
    pub change: f64,
    pub narrative: String,
}

impl PerformanceTrend {
    pub(crate) fn from_history(history: &[ScoreSample]) -> Self {
        let change = match (history.first(), history.last()) {
            (Some(first), Some(last)) if history.len() >= 2 => last.overall - first.overall,
            _ => 0.0,
        };

        let (direction, narrative) = if change > TREND_THRESHOLD {
            (
                TrendDirection::Improving,
                format!("Performance improved by {change:.1} points over the session"),
            )
        } else if change < -TREND_THRESHOLD {
            (
                TrendDirection::Declining,
                format!(
                    "Performance declined by {:.1} points over the session",
                    change.abs()
                ),
            )
        } else {
            (
                TrendDirection::Steady,
                "Performance stayed consistent throughout the session".to_string(),
            )
        };

        Self {
            direction,
            change,
            narrative,
        }
    }
}

/// Final report for a live session, produced when it ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub session_id: SessionId,
    pub final_score: ProgressiveScore,
    pub duration_minutes: f64,
    pub action_count: usize,
    pub interaction_count: usize,
    pub trend: PerformanceTrend,
    pub key_moments: Vec<KeyMoment>,
    pub recommendations: Vec<String>,
}

impl AssessmentSummary {
    pub(crate) fn build(session: AssessmentSession, indicators: &[PerformanceIndicator]) -> Self {
        let mut recommendations: Vec<String> = indicators
            .iter()
            .filter_map(|i| i.recommendation.clone())
            .collect();

        let missing: Vec<&str> = ActionKind::EXPECTED
            .iter()
            .filter(|kind| !session.actions.iter().any(|a| a.kind == **kind))
            .map(|kind| kind.as_str())
            .collect();
        if !missing.is_empty() {
            recommendations.push(format!(
                "Include the missing workflow steps next time: {}",
                missing.join(", ")
            ));
        }

        Self {
            trend: PerformanceTrend::from_history(&session.history),
            duration_minutes: session.elapsed_minutes(session.current_time),
            action_count: session.actions.len(),
            interaction_count: session.interactions.len(),
            session_id: session.session_id,
            final_score: session.latest,
            key_moments: session.key_moments,
            recommendations,
        }
    }
}
