//! Problem-solving dimension: analytical, systematic, creativity, resourcefulness.

use super::signals::{count_actions, diagnostic_count, has_action, mean, mean_quality};
use crate::context::ResolutionData;
use crate::events::{ActionEvent, ActionKind};
use crate::scores::ProblemSolvingScores;

pub const NEUTRAL: ProblemSolvingScores = ProblemSolvingScores {
    analytical: 75.0,
    systematic: 75.0,
    creativity: 70.0,
    resourcefulness: 75.0,
};

pub(crate) fn score(actions: &[ActionEvent], resolution: &ResolutionData) -> ProblemSolvingScores {
    if actions.is_empty() {
        return NEUTRAL;
    }

    ProblemSolvingScores {
        analytical: analytical(actions),
        systematic: systematic(actions, resolution),
        creativity: creativity(actions),
        resourcefulness: resourcefulness(actions, resolution),
    }
    .clamped()
}

fn analytical(actions: &[ActionEvent]) -> f64 {
    let mut score = 75.0;
    if has_action(actions, ActionKind::RootCauseAnalysis) {
        score += 10.0;
    }
    if diagnostic_count(actions) >= 2 {
        score += 5.0;
    }
    if let Some(avg) = mean_quality(actions, |a| a.kind.is_diagnostic()) {
        if avg >= 80.0 {
            score += 10.0;
        } else if avg < 50.0 {
            score -= 10.0;
        }
    }
    score
}

/// Actions are assumed to be in the order they were recorded.
fn systematic(actions: &[ActionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 75.0;
    if actions
        .first()
        .is_some_and(|a| a.kind == ActionKind::InitialAssessment)
    {
        score += 10.0;
    }
    if let Some(first_solution) = actions.iter().position(|a| a.kind == ActionKind::Solution) {
        let diagnosed_first = actions[..first_solution]
            .iter()
            .any(|a| a.kind.is_diagnostic());
        score += if diagnosed_first { 10.0 } else { -10.0 };
    }
    if resolution.steps.len() >= 3 {
        score += 5.0;
    }
    score
}

fn creativity(actions: &[ActionEvent]) -> f64 {
    let mut score = 70.0;
    if let Some(avg) = mean(actions.iter().map(|a| a.creativity)) {
        if avg >= 80.0 {
            score += 15.0;
        } else if avg >= 60.0 {
            score += 5.0;
        } else if avg < 40.0 {
            score -= 5.0;
        }
    }
    if has_action(actions, ActionKind::AlternativeSolution) {
        score += 10.0;
    }
    score
}

fn resourcefulness(actions: &[ActionEvent], resolution: &ResolutionData) -> f64 {
    let mut score = 75.0;
    score += match count_actions(actions, ActionKind::Research) {
        0 => 0.0,
        1 => 5.0,
        _ => 10.0,
    };
    if resolution.escalated {
        score -= 5.0;
    } else if resolution.resolved {
        score += 5.0;
    }
    score
}
