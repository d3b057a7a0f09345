//! Procedural dimension: compliance, documentation, security, escalation.

use super::signals::{count_actions, has_action, mean, mean_quality};
use crate::context::{ResolutionData, ScenarioData};
use crate::events::{ActionEvent, ActionKind};
use crate::scores::ProceduralScores;

pub const NEUTRAL: ProceduralScores = ProceduralScores {
    compliance: 90.0,
    documentation: 70.0,
    security: 90.0,
    escalation: 85.0,
};

pub(crate) fn score(
    actions: &[ActionEvent],
    scenario: &ScenarioData,
    resolution: &ResolutionData,
) -> ProceduralScores {
    if actions.is_empty() {
        return NEUTRAL;
    }

    ProceduralScores {
        compliance: compliance(actions, scenario),
        documentation: documentation(actions, resolution),
        security: security(actions),
        escalation: escalation(actions, resolution),
    }
    .clamped()
}

fn compliance(actions: &[ActionEvent], scenario: &ScenarioData) -> f64 {
    let mut score = 90.0;
    let missing = scenario
        .required_steps
        .iter()
        .filter(|step| !has_action(actions, **step))
        .count();
    score -= 5.0 * missing as f64;
    score -= 10.0 * count_actions(actions, ActionKind::ProcedureViolation) as f64;
    if has_action(actions, ActionKind::Verification) {
        score += 5.0;
    }
    score
}

fn documentation(actions: &[ActionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 70.0;
    let documented = has_action(actions, ActionKind::Documentation);
    if documented {
        score += 15.0;
    }

    let quality = mean_quality(actions, |a| a.kind == ActionKind::Documentation)
        .or(resolution.documentation_quality);
    match quality {
        Some(q) if q >= 80.0 => score += 10.0,
        Some(q) if q < 50.0 => score -= 10.0,
        Some(_) => {}
        None if resolution.resolved && !documented => score -= 10.0,
        None => {}
    }
    score
}

fn security(actions: &[ActionEvent]) -> f64 {
    let mut score = 90.0;
    score -= 15.0 * actions.iter().filter(|a| a.security_risk).count() as f64;
    if has_action(actions, ActionKind::SecurityCheck) {
        score += 5.0;
    }
    score
}

fn escalation(actions: &[ActionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 85.0;
    if resolution.escalated {
        let appropriateness = mean(
            actions
                .iter()
                .filter(|a| a.kind == ActionKind::Escalation)
                .map(|a| a.appropriateness),
        );
        match appropriateness {
            Some(a) if a >= 70.0 => score += 10.0,
            Some(a) if a < 50.0 => score -= 15.0,
            _ => {}
        }
    } else if !resolution.resolved {
        score -= 10.0;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ComplexityLevel;

    fn scenario() -> ScenarioData {
        ScenarioData::new("general", ComplexityLevel::Intermediate, 20.0).with_required_steps(
            vec![
                ActionKind::InitialAssessment,
                ActionKind::Diagnosis,
                ActionKind::Verification,
            ],
        )
    }

    fn resolved() -> ResolutionData {
        ResolutionData {
            resolved: true,
            ..Default::default()
        }
    }

    #[test]
    fn empty_actions_return_neutral_default() {
        assert_eq!(score(&[], &scenario(), &resolved()), NEUTRAL);
    }

    #[test]
    fn missing_required_steps_and_violations_reduce_compliance() {
        let actions = vec![
            ActionEvent::new(ActionKind::Diagnosis),
            ActionEvent::new(ActionKind::ProcedureViolation),
        ];
        // 90 - 2*5 - 10
        assert_eq!(score(&actions, &scenario(), &resolved()).compliance, 70.0);
    }

    #[test]
    fn verification_lifts_compliance() {
        let actions = vec![
            ActionEvent::new(ActionKind::InitialAssessment),
            ActionEvent::new(ActionKind::Diagnosis),
            ActionEvent::new(ActionKind::Verification),
        ];
        assert_eq!(score(&actions, &scenario(), &resolved()).compliance, 95.0);
    }

    #[test]
    fn documentation_quality_from_actions_wins_over_resolution() {
        let actions = vec![ActionEvent::new(ActionKind::Documentation).with_quality(85.0)];
        let resolution = ResolutionData {
            documentation_quality: Some(30.0),
            ..resolved()
        };
        // 70 + 15 + 10
        assert_eq!(score(&actions, &scenario(), &resolution).documentation, 95.0);
    }

    #[test]
    fn resolved_without_documentation_is_penalized() {
        let actions = vec![ActionEvent::new(ActionKind::Solution)];
        assert_eq!(score(&actions, &scenario(), &resolved()).documentation, 60.0);
    }

    #[test]
    fn security_risks_stack() {
        let actions = vec![
            ActionEvent::new(ActionKind::Solution).with_security_risk(),
            ActionEvent::new(ActionKind::Testing).with_security_risk(),
            ActionEvent::new(ActionKind::SecurityCheck),
        ];
        // 90 - 30 + 5
        assert_eq!(score(&actions, &scenario(), &resolved()).security, 65.0);
    }

    #[test]
    fn escalation_judged_by_appropriateness() {
        let actions = vec![ActionEvent::new(ActionKind::Escalation).with_appropriateness(40.0)];
        let escalated = ResolutionData {
            escalated: true,
            ..Default::default()
        };
        assert_eq!(score(&actions, &scenario(), &escalated).escalation, 70.0);

        let unresolved = ResolutionData::default();
        let actions = vec![ActionEvent::new(ActionKind::Solution)];
        assert_eq!(score(&actions, &scenario(), &unresolved).escalation, 75.0);
    }
}
