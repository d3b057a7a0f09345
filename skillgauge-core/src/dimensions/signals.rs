//! Signal extraction helpers shared by the dimension scorers.

use crate::context::{ResolutionData, ScenarioData};
use crate::events::{ActionEvent, ActionKind, InteractionEvent, InteractionKind};

/// Mean of the values that are present; `None` when nothing was observed.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub(crate) fn has_action(actions: &[ActionEvent], kind: ActionKind) -> bool {
    actions.iter().any(|a| a.kind == kind)
}

pub(crate) fn count_actions(actions: &[ActionEvent], kind: ActionKind) -> usize {
    actions.iter().filter(|a| a.kind == kind).count()
}

pub(crate) fn has_interaction(interactions: &[InteractionEvent], kind: InteractionKind) -> bool {
    interactions.iter().any(|i| i.kind == kind)
}

pub(crate) fn diagnostic_count(actions: &[ActionEvent]) -> usize {
    actions.iter().filter(|a| a.kind.is_diagnostic()).count()
}

/// Mean quality of actions matching `filter`.
pub(crate) fn mean_quality(
    actions: &[ActionEvent],
    filter: impl Fn(&ActionEvent) -> bool,
) -> Option<f64> {
    mean(actions.iter().filter(|a| filter(a)).map(|a| a.quality))
}

/// Actual duration over the scenario's estimated duration.
///
/// Uses the reported time to resolution, else the span between the first and
/// last recorded action. `None` when neither is known.
pub(crate) fn time_ratio(
    actions: &[ActionEvent],
    scenario: &ScenarioData,
    resolution: &ResolutionData,
) -> Option<f64> {
    let expected = scenario.estimated_time_minutes;
    if !expected.is_finite() || expected <= 0.0 {
        return None;
    }

    let actual = resolution.time_to_resolution_minutes.or_else(|| {
        let first = actions.iter().map(|a| a.timestamp).min()?;
        let last = actions.iter().map(|a| a.timestamp).max()?;
        (actions.len() >= 2).then(|| (last - first).num_milliseconds() as f64 / 60_000.0)
    })?;

    Some(actual / expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ComplexityLevel;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([Some(80.0), None, Some(60.0)]), Some(70.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn time_ratio_prefers_reported_resolution_time() {
        let scenario = ScenarioData::new("general", ComplexityLevel::Beginner, 20.0);
        let resolution = ResolutionData {
            time_to_resolution_minutes: Some(16.0),
            ..Default::default()
        };
        let ratio = time_ratio(&[], &scenario, &resolution).unwrap();
        assert!((ratio - 0.8).abs() < 1e-9);
    }

    #[test]
    fn time_ratio_falls_back_to_action_span() {
        let scenario = ScenarioData::new("general", ComplexityLevel::Beginner, 10.0);
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let actions = vec![
            ActionEvent::new(ActionKind::InitialAssessment).at(start),
            ActionEvent::new(ActionKind::Solution).at(start + Duration::minutes(15)),
        ];
        let ratio = time_ratio(&actions, &scenario, &ResolutionData::default()).unwrap();
        assert!((ratio - 1.5).abs() < 1e-9);
    }

    #[test]
    fn time_ratio_unknown_with_single_action() {
        let scenario = ScenarioData::new("general", ComplexityLevel::Beginner, 10.0);
        let actions = vec![ActionEvent::new(ActionKind::Research)];
        assert!(time_ratio(&actions, &scenario, &ResolutionData::default()).is_none());
    }
}
