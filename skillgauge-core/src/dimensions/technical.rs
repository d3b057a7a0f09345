//! Technical dimension: accuracy, efficiency, knowledge, innovation.

use super::signals::{diagnostic_count, has_action, mean, mean_quality, time_ratio};
use crate::context::{ResolutionData, ScenarioData};
use crate::events::{ActionEvent, ActionKind};
use crate::scores::TechnicalScores;

/// Returned when no actions have been recorded.
pub const NEUTRAL: TechnicalScores = TechnicalScores {
    accuracy: 80.0,
    efficiency: 75.0,
    knowledge: 80.0,
    innovation: 70.0,
};

const LOW_QUALITY: f64 = 60.0;

pub(crate) fn score(
    actions: &[ActionEvent],
    scenario: &ScenarioData,
    resolution: &ResolutionData,
) -> TechnicalScores {
    if actions.is_empty() {
        return NEUTRAL;
    }

    TechnicalScores {
        accuracy: accuracy(actions, scenario, resolution),
        efficiency: efficiency(actions, scenario, resolution),
        knowledge: knowledge(actions, resolution),
        innovation: innovation(actions),
    }
    .clamped()
}

fn accuracy(actions: &[ActionEvent], scenario: &ScenarioData, resolution: &ResolutionData) -> f64 {
    let mut score = 85.0;
    if resolution.resolved {
        score += 10.0;
    }
    if diagnostic_count(actions) >= 2 {
        score += 5.0;
    }
    let low_quality = actions
        .iter()
        .filter(|a| a.quality.is_some_and(|q| q < LOW_QUALITY))
        .count();
    score -= 3.0 * low_quality as f64;
    if resolution.solution_complexity == Some(scenario.complexity) {
        score += 5.0;
    }
    score
}

fn efficiency(
    actions: &[ActionEvent],
    scenario: &ScenarioData,
    resolution: &ResolutionData,
) -> f64 {
    let mut score = 75.0;
    if let Some(ratio) = time_ratio(actions, scenario, resolution) {
        score += if ratio <= 0.8 {
            20.0
        } else if ratio <= 1.0 {
            10.0
        } else if ratio <= 1.2 {
            0.0
        } else {
            -10.0
        };
    }
    score -= 2.0 * actions.iter().filter(|a| a.unnecessary).count() as f64;
    let high_quality_research = actions
        .iter()
        .any(|a| a.kind == ActionKind::Research && a.quality.is_some_and(|q| q >= 80.0));
    if high_quality_research {
        score += 5.0;
    }
    score
}

fn knowledge(actions: &[ActionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 80.0;
    if let Some(avg) = mean_quality(actions, |a| {
        a.kind == ActionKind::Research || a.kind.is_diagnostic()
    }) {
        if avg >= 85.0 {
            score += 10.0;
        } else if avg >= 70.0 {
            score += 5.0;
        } else if avg < 50.0 {
            score -= 10.0;
        }
    }
    if has_action(actions, ActionKind::RootCauseAnalysis) {
        score += 5.0;
    }
    if resolution.escalated {
        score -= 5.0;
    }
    score
}

fn innovation(actions: &[ActionEvent]) -> f64 {
    let mut score = 70.0;
    if has_action(actions, ActionKind::AlternativeSolution) {
        score += 10.0;
    }
    if let Some(creativity) = mean(actions.iter().map(|a| a.creativity)) {
        if creativity >= 80.0 {
            score += 15.0;
        } else if creativity >= 60.0 {
            score += 5.0;
        }
    }
    let polished_solution = actions
        .iter()
        .any(|a| a.kind == ActionKind::Solution && a.quality.is_some_and(|q| q >= 90.0));
    if polished_solution {
        score += 5.0;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ComplexityLevel;

    fn scenario() -> ScenarioData {
        ScenarioData::new("technical_support", ComplexityLevel::Advanced, 30.0)
    }

    #[test]
    fn empty_actions_return_neutral_default() {
        let scores = score(&[], &scenario(), &ResolutionData::default());
        assert_eq!(scores, NEUTRAL);
    }

    #[test]
    fn resolved_advanced_session_clamps_accuracy_at_100() {
        let actions = vec![
            ActionEvent::new(ActionKind::Diagnosis).with_quality(85.0),
            ActionEvent::new(ActionKind::Diagnosis).with_quality(90.0),
        ];
        let resolution = ResolutionData {
            resolved: true,
            solution_complexity: Some(ComplexityLevel::Advanced),
            ..Default::default()
        };

        let scores = score(&actions, &scenario(), &resolution);

        // 85 + 10 + 5 + 5 = 105, clamped
        assert_eq!(scores.accuracy, 100.0);
    }

    #[test]
    fn each_low_quality_action_costs_three_points() {
        let actions = vec![
            ActionEvent::new(ActionKind::Research).with_quality(40.0),
            ActionEvent::new(ActionKind::Solution).with_quality(55.0),
            ActionEvent::new(ActionKind::Verification).with_quality(75.0),
        ];
        let scores = score(&actions, &scenario(), &ResolutionData::default());
        assert_eq!(scores.accuracy, 79.0);
    }

    #[test]
    fn efficiency_rewards_fast_resolution_and_penalizes_waste() {
        let actions = vec![
            ActionEvent::new(ActionKind::Research).with_quality(82.0),
            ActionEvent::new(ActionKind::Other).unnecessary(),
        ];
        let fast = ResolutionData {
            time_to_resolution_minutes: Some(20.0),
            ..Default::default()
        };
        // 75 + 20 (ratio 0.67) - 2 + 5
        assert_eq!(score(&actions, &scenario(), &fast).efficiency, 98.0);

        let slow = ResolutionData {
            time_to_resolution_minutes: Some(45.0),
            ..Default::default()
        };
        // 75 - 10 (ratio 1.5) - 2 + 5
        assert_eq!(score(&actions, &scenario(), &slow).efficiency, 68.0);
    }

    #[test]
    fn knowledge_tracks_research_quality_and_root_cause() {
        let actions = vec![
            ActionEvent::new(ActionKind::Research).with_quality(90.0),
            ActionEvent::new(ActionKind::RootCauseAnalysis).with_quality(88.0),
        ];
        let escalated = ResolutionData {
            escalated: true,
            ..Default::default()
        };
        // 80 + 10 + 5 - 5
        assert_eq!(score(&actions, &scenario(), &escalated).knowledge, 90.0);
    }

    #[test]
    fn innovation_rewards_alternatives_and_creativity() {
        let actions = vec![
            ActionEvent::new(ActionKind::AlternativeSolution).with_creativity(85.0),
            ActionEvent::new(ActionKind::Solution).with_quality(95.0),
        ];
        // 70 + 10 + 15 + 5
        assert_eq!(
            score(&actions, &scenario(), &ResolutionData::default()).innovation,
            100.0
        );
    }
}
