//! Threshold-based performance indicators for live sessions.

use serde::{Deserialize, Serialize};

use super::progressive::ProgressiveDimensions;
use crate::scores::Dimension;

/// Severity of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Positive,
    Neutral,
    Concern,
    Critical,
}

/// Observation about one aspect of a live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceIndicator {
    pub kind: IndicatorKind,
    /// Dimension name, or `time` for the overrun indicator
    pub category: String,
    pub message: String,
    pub score: f64,
    pub actionable: bool,
    pub recommendation: Option<String>,
}

/// Score cut-offs for one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
    pub concern: f64,
}

impl Thresholds {
    #[must_use]
    pub const fn for_dimension(dimension: Dimension) -> Self {
        let (excellent, good, acceptable, concern) = match dimension {
            Dimension::Technical | Dimension::Communication | Dimension::CustomerService => {
                (90.0, 80.0, 70.0, 60.0)
            }
            Dimension::Procedural => (95.0, 85.0, 75.0, 65.0),
            Dimension::ProblemSolving => (85.0, 75.0, 65.0, 55.0),
        };
        Self {
            excellent,
            good,
            acceptable,
            concern,
        }
    }

    #[must_use]
    pub fn classify(&self, score: f64) -> IndicatorKind {
        if score >= self.good {
            IndicatorKind::Positive
        } else if score >= self.acceptable {
            IndicatorKind::Neutral
        } else if score >= self.concern {
            IndicatorKind::Concern
        } else {
            IndicatorKind::Critical
        }
    }
}

/// One indicator per dimension, plus a time indicator when the session runs long.
pub(crate) fn evaluate(
    dimensions: &ProgressiveDimensions,
    elapsed_minutes: f64,
    expected_minutes: f64,
    overrun_ratio: f64,
) -> Vec<PerformanceIndicator> {
    let mut indicators: Vec<_> = dimensions
        .iter()
        .map(|(dimension, score)| dimension_indicator(dimension, *score))
        .collect();

    if expected_minutes > 0.0 && elapsed_minutes > overrun_ratio * expected_minutes {
        indicators.push(PerformanceIndicator {
            kind: IndicatorKind::Concern,
            category: "time".to_string(),
            message: format!(
                "Session has run {elapsed_minutes:.0} minutes against an expected {expected_minutes:.0}"
            ),
            score: elapsed_minutes / expected_minutes * 100.0,
            actionable: true,
            recommendation: Some(
                "Update the customer on progress and consider escalating if no fix is in sight."
                    .to_string(),
            ),
        });
    }

    indicators
}

fn dimension_indicator(dimension: Dimension, score: f64) -> PerformanceIndicator {
    let thresholds = Thresholds::for_dimension(dimension);
    let kind = thresholds.classify(score);
    let label = dimension.label();

    let message = match kind {
        IndicatorKind::Positive if score >= thresholds.excellent => {
            format!("Excellent {label} performance")
        }
        IndicatorKind::Positive => format!("Good {label} performance"),
        IndicatorKind::Neutral => format!("{label} performance is acceptable"),
        IndicatorKind::Concern => format!("{label} performance needs attention"),
        IndicatorKind::Critical => format!("{label} performance is critically low"),
    };
    let needs_action = matches!(kind, IndicatorKind::Concern | IndicatorKind::Critical);

    PerformanceIndicator {
        kind,
        category: dimension.as_str().to_string(),
        message,
        score,
        actionable: needs_action,
        recommendation: needs_action.then(|| recommendation(dimension).to_string()),
    }
}

fn recommendation(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Technical => "Slow down and verify each diagnostic result before acting on it.",
        Dimension::Communication => {
            "Explain what you are doing in plain language and acknowledge the customer's concerns."
        }
        Dimension::Procedural => {
            "Stop and review the standard procedure; avoid shortcuts that bypass security checks."
        }
        Dimension::CustomerService => {
            "Check in with the customer and confirm the fix meets their needs."
        }
        Dimension::ProblemSolving => {
            "Step back and work through the problem methodically: assess, diagnose, then fix."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::PerDimension;

    #[test]
    fn procedural_thresholds_are_stricter() {
        let procedural = Thresholds::for_dimension(Dimension::Procedural);
        assert_eq!(procedural.classify(85.0), IndicatorKind::Positive);
        assert_eq!(procedural.classify(80.0), IndicatorKind::Neutral);
        assert_eq!(procedural.classify(70.0), IndicatorKind::Concern);
        assert_eq!(procedural.classify(64.0), IndicatorKind::Critical);

        let technical = Thresholds::for_dimension(Dimension::Technical);
        assert_eq!(technical.classify(70.0), IndicatorKind::Neutral);
    }

    #[test]
    fn one_indicator_per_dimension_without_overrun() {
        let dims = PerDimension::from_fn(|_| 75.0);
        let indicators = evaluate(&dims, 10.0, 30.0, 1.2);
        assert_eq!(indicators.len(), 5);
        assert!(indicators.iter().all(|i| i.category != "time"));
    }

    #[test]
    fn concern_and_critical_carry_recommendations() {
        let mut dims = PerDimension::from_fn(|_| 95.0);
        dims.communication = 65.0;
        dims.procedural = 20.0;
        let indicators = evaluate(&dims, 0.0, 30.0, 1.2);

        let communication = indicators
            .iter()
            .find(|i| i.category == "communication")
            .unwrap();
        assert_eq!(communication.kind, IndicatorKind::Concern);
        assert!(communication.recommendation.is_some());

        let procedural = indicators.iter().find(|i| i.category == "procedural").unwrap();
        assert_eq!(procedural.kind, IndicatorKind::Critical);
        assert!(procedural.actionable);

        let technical = indicators.iter().find(|i| i.category == "technical").unwrap();
        assert_eq!(technical.kind, IndicatorKind::Positive);
        assert!(technical.message.starts_with("Excellent"));
        assert!(technical.recommendation.is_none());
    }

    #[test]
    fn overrun_adds_time_concern() {
        let dims = PerDimension::from_fn(|_| 75.0);
        let indicators = evaluate(&dims, 37.0, 30.0, 1.2);
        let time = indicators.iter().find(|i| i.category == "time").unwrap();
        assert_eq!(time.kind, IndicatorKind::Concern);

        // Exactly at the ratio is not an overrun
        assert_eq!(evaluate(&dims, 36.0, 30.0, 1.2).len(), 5);
    }
}
