//! Per-dimension sub-score computation.
//!
//! Every sub-score starts from a fixed base reflecting baseline competent
//! behavior and moves by bounded deltas keyed to observed signals. The result
//! is always clamped to 0-100. An empty event list never fails: each
//! dimension returns its neutral default instead, since early in a session
//! there is usually nothing to score yet.
//!
//! # Signals
//!
//! | Dimension        | Events read                      | Neutral default          |
//! |------------------|----------------------------------|--------------------------|
//! | technical        | actions, scenario, resolution    | 80 / 75 / 80 / 70        |
//! | communication    | interactions                     | 80 / 75 / 85 / 80        |
//! | procedural       | actions, scenario, resolution    | 90 / 70 / 90 / 85        |
//! | customer service | interactions, actions, resolution| 75 / 75 / 80 / 80        |
//! | problem-solving  | actions, resolution              | 75 / 75 / 70 / 75        |
//!
//! The per-signal deltas live next to each sub-score in the dimension modules.

mod communication;
mod customer_service;
mod problem_solving;
mod procedural;
pub(crate) mod signals;
mod technical;

use serde::{Deserialize, Serialize};

use crate::context::{ResolutionData, ScenarioData, ScoringContext};
use crate::events::{ActionEvent, InteractionEvent};
use crate::scores::{
    CommunicationScores, CustomerServiceScores, ProblemSolvingScores, ProceduralScores,
    TechnicalScores,
};

pub use communication::NEUTRAL as COMMUNICATION_NEUTRAL;
pub use customer_service::NEUTRAL as CUSTOMER_SERVICE_NEUTRAL;
pub use problem_solving::NEUTRAL as PROBLEM_SOLVING_NEUTRAL;
pub use procedural::NEUTRAL as PROCEDURAL_NEUTRAL;
pub use technical::NEUTRAL as TECHNICAL_NEUTRAL;

/// Raw sub-scores for all five dimensions, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScoreSets {
    pub technical: TechnicalScores,
    pub communication: CommunicationScores,
    pub procedural: ProceduralScores,
    pub customer_service: CustomerServiceScores,
    pub problem_solving: ProblemSolvingScores,
}

/// Stateless engine turning event logs into dimension sub-scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionScoringEngine;

impl DimensionScoringEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn technical(
        &self,
        actions: &[ActionEvent],
        scenario: &ScenarioData,
        resolution: &ResolutionData,
    ) -> TechnicalScores {
        technical::score(actions, scenario, resolution)
    }

    #[must_use]
    pub fn communication(&self, interactions: &[InteractionEvent]) -> CommunicationScores {
        communication::score(interactions)
    }

    #[must_use]
    pub fn procedural(
        &self,
        actions: &[ActionEvent],
        scenario: &ScenarioData,
        resolution: &ResolutionData,
    ) -> ProceduralScores {
        procedural::score(actions, scenario, resolution)
    }

    #[must_use]
    pub fn customer_service(
        &self,
        interactions: &[InteractionEvent],
        actions: &[ActionEvent],
        scenario: &ScenarioData,
        resolution: &ResolutionData,
    ) -> CustomerServiceScores {
        customer_service::score(interactions, actions, scenario, resolution)
    }

    #[must_use]
    pub fn problem_solving(
        &self,
        actions: &[ActionEvent],
        resolution: &ResolutionData,
    ) -> ProblemSolvingScores {
        problem_solving::score(actions, resolution)
    }

    /// Score every dimension for a finished session.
    #[must_use]
    pub fn score_all(&self, context: &ScoringContext) -> SubScoreSets {
        let ScoringContext {
            scenario,
            actions,
            interactions,
            resolution,
            ..
        } = context;

        SubScoreSets {
            technical: self.technical(actions, scenario, resolution),
            communication: self.communication(interactions),
            procedural: self.procedural(actions, scenario, resolution),
            customer_service: self.customer_service(interactions, actions, scenario, resolution),
            problem_solving: self.problem_solving(actions, resolution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ComplexityLevel, ContextFactors};
    use crate::events::{ActionKind, InteractionKind};
    use crate::scores::SubScoreSet;

    fn context(actions: Vec<ActionEvent>, interactions: Vec<InteractionEvent>) -> ScoringContext {
        ScoringContext {
            session_id: "sess-1".into(),
            scenario_id: "vpn-drop".into(),
            user_id: "trainee".into(),
            scenario: ScenarioData::new("technical_support", ComplexityLevel::Advanced, 25.0),
            actions,
            interactions,
            resolution: ResolutionData::default(),
            context_factors: ContextFactors::default(),
        }
    }

    fn all_entries(sets: &SubScoreSets) -> Vec<f64> {
        let mut values = Vec::new();
        values.extend(sets.technical.entries().map(|(_, v)| v));
        values.extend(sets.communication.entries().map(|(_, v)| v));
        values.extend(sets.procedural.entries().map(|(_, v)| v));
        values.extend(sets.customer_service.entries().map(|(_, v)| v));
        values.extend(sets.problem_solving.entries().map(|(_, v)| v));
        values
    }

    #[test]
    fn empty_context_yields_neutral_defaults() {
        let sets = DimensionScoringEngine::new().score_all(&context(vec![], vec![]));

        assert_eq!(sets.technical, TECHNICAL_NEUTRAL);
        assert_eq!(sets.communication, COMMUNICATION_NEUTRAL);
        assert_eq!(sets.procedural, PROCEDURAL_NEUTRAL);
        assert_eq!(sets.customer_service, CUSTOMER_SERVICE_NEUTRAL);
        assert_eq!(sets.problem_solving, PROBLEM_SOLVING_NEUTRAL);
    }

    #[test]
    fn extreme_inputs_stay_bounded() {
        let mut actions: Vec<_> = (0..40)
            .map(|_| {
                ActionEvent::new(ActionKind::ProcedureViolation)
                    .with_quality(0.0)
                    .with_security_risk()
                    .unnecessary()
            })
            .collect();
        actions.push(ActionEvent::new(ActionKind::Solution).with_creativity(0.0));
        let interactions: Vec<_> = (0..40)
            .map(|_| {
                InteractionEvent::new(InteractionKind::Question)
                    .with_clarity(0.0)
                    .with_empathy(0.0)
                    .with_satisfaction(0.0)
                    .with_response_time(10_000.0)
            })
            .collect();

        let sets = DimensionScoringEngine::new().score_all(&context(actions, interactions));

        for value in all_entries(&sets) {
            assert!((0.0..=100.0).contains(&value), "{value} out of range");
        }
        assert_eq!(sets.procedural.security, 0.0);
    }
}
