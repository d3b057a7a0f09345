//! Customer service dimension: satisfaction, rapport, expectation management,
//! follow-through.

use super::signals::{has_action, has_interaction, mean, time_ratio};
use crate::context::{ResolutionData, ScenarioData};
use crate::events::{ActionEvent, ActionKind, InteractionEvent, InteractionKind};
use crate::scores::CustomerServiceScores;

pub const NEUTRAL: CustomerServiceScores = CustomerServiceScores {
    satisfaction: 75.0,
    rapport: 75.0,
    expectation_management: 80.0,
    follow_through: 80.0,
};

pub(crate) fn score(
    interactions: &[InteractionEvent],
    actions: &[ActionEvent],
    scenario: &ScenarioData,
    resolution: &ResolutionData,
) -> CustomerServiceScores {
    if interactions.is_empty() && actions.is_empty() {
        return NEUTRAL;
    }

    CustomerServiceScores {
        satisfaction: satisfaction(interactions, resolution),
        rapport: rapport(interactions),
        expectation_management: expectation_management(
            interactions,
            time_ratio(actions, scenario, resolution),
        ),
        follow_through: follow_through(actions, resolution),
    }
    .clamped()
}

fn satisfaction(interactions: &[InteractionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 75.0;
    if let Some(csat) = resolution.customer_satisfaction {
        score += if csat >= 90.0 {
            20.0
        } else if csat >= 75.0 {
            10.0
        } else if csat >= 50.0 {
            0.0
        } else {
            -20.0
        };
    }
    if let Some(avg) = mean(interactions.iter().map(|i| i.satisfaction)) {
        if avg >= 80.0 {
            score += 5.0;
        } else if avg < 50.0 {
            score -= 10.0;
        }
    }
    score
}

fn rapport(interactions: &[InteractionEvent]) -> f64 {
    let mut score = 75.0;
    if has_interaction(interactions, InteractionKind::Greeting) {
        score += 5.0;
    }
    if mean(interactions.iter().map(|i| i.empathy)).is_some_and(|e| e >= 80.0) {
        score += 10.0;
    }
    if interactions.len() >= 3 {
        score += 5.0;
    }
    if interactions
        .iter()
        .any(|i| i.satisfaction.is_some_and(|s| s < 30.0))
    {
        score -= 10.0;
    }
    score
}

fn expectation_management(interactions: &[InteractionEvent], time_ratio: Option<f64>) -> f64 {
    let mut score = 80.0;
    let kept_informed = has_interaction(interactions, InteractionKind::StatusUpdate);
    if kept_informed {
        score += 10.0;
    }
    if interactions.iter().any(|i| i.proactive) {
        score += 5.0;
    }
    if time_ratio.is_some_and(|r| r > 1.2) && !kept_informed {
        score -= 10.0;
    }
    score
}

fn follow_through(actions: &[ActionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 80.0;
    let followed_up = has_action(actions, ActionKind::FollowUp);
    if followed_up {
        score += 10.0;
    } else if resolution.follow_up_required {
        score -= 15.0;
    }
    if has_action(actions, ActionKind::Verification) {
        score += 5.0;
    }
    if resolution.resolved {
        score += 5.0;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ComplexityLevel;

    fn scenario() -> ScenarioData {
        ScenarioData::new("general", ComplexityLevel::Beginner, 10.0)
    }

    #[test]
    fn no_events_return_neutral_default() {
        let scores = score(&[], &[], &scenario(), &ResolutionData::default());
        assert_eq!(scores, NEUTRAL);
    }

    #[test]
    fn satisfaction_combines_csat_and_turn_level_signal() {
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Closing).with_satisfaction(85.0),
        ];
        let resolution = ResolutionData {
            customer_satisfaction: Some(92.0),
            ..Default::default()
        };
        // 75 + 20 + 5, clamped
        let scores = score(&interactions, &[], &scenario(), &resolution);
        assert_eq!(scores.satisfaction, 100.0);

        let unhappy = ResolutionData {
            customer_satisfaction: Some(40.0),
            ..Default::default()
        };
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Question).with_satisfaction(20.0),
        ];
        // 75 - 20 - 10
        assert_eq!(
            score(&interactions, &[], &scenario(), &unhappy).satisfaction,
            45.0
        );
    }

    #[test]
    fn rapport_needs_engagement() {
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Greeting).with_empathy(85.0),
            InteractionEvent::new(InteractionKind::Question).with_empathy(80.0),
            InteractionEvent::new(InteractionKind::Closing),
        ];
        // 75 + 5 + 10 + 5
        assert_eq!(
            score(&interactions, &[], &scenario(), &ResolutionData::default()).rapport,
            95.0
        );
    }

    #[test]
    fn silent_overrun_hurts_expectation_management() {
        let resolution = ResolutionData {
            time_to_resolution_minutes: Some(15.0),
            ..Default::default()
        };
        let interactions = vec![InteractionEvent::new(InteractionKind::Question)];
        assert_eq!(
            score(&interactions, &[], &scenario(), &resolution).expectation_management,
            70.0
        );

        let interactions = vec![InteractionEvent::new(InteractionKind::StatusUpdate).proactive()];
        assert_eq!(
            score(&interactions, &[], &scenario(), &resolution).expectation_management,
            95.0
        );
    }

    #[test]
    fn missing_required_follow_up_is_penalized() {
        let actions = vec![ActionEvent::new(ActionKind::Solution)];
        let resolution = ResolutionData {
            follow_up_required: true,
            resolved: true,
            ..Default::default()
        };
        // 80 - 15 + 5
        assert_eq!(
            score(&[], &actions, &scenario(), &resolution).follow_through,
            70.0
        );
    }
}
