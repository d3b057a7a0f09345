//! Scoring context supplied by the session orchestrator at session end.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::events::{ActionEvent, ActionKind, InteractionEvent};
use crate::types::{ScenarioId, SessionId, UserId};

/// Difficulty or complexity tier of a scenario or a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Static scenario metadata from the scenario repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioData {
    /// Benchmark category (e.g. "technical_support")
    pub category: String,
    pub difficulty: ComplexityLevel,
    /// Time an experienced technician needs, in minutes
    pub estimated_time_minutes: f64,
    pub complexity: ComplexityLevel,
    /// Action kinds the scenario's procedure requires
    #[serde(default)]
    pub required_steps: Vec<ActionKind>,
}

impl ScenarioData {
    /// Create scenario metadata with no required steps.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        complexity: ComplexityLevel,
        estimated_time_minutes: f64,
    ) -> Self {
        Self {
            category: category.into(),
            difficulty: complexity,
            estimated_time_minutes,
            complexity,
            required_steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_required_steps(mut self, steps: Vec<ActionKind>) -> Self {
        self.required_steps = steps;
        self
    }
}

/// How the session ended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionData {
    pub resolved: bool,
    /// Post-session customer satisfaction (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_satisfaction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_resolution_minutes: Option<f64>,
    pub follow_up_required: bool,
    pub escalated: bool,
    /// Quality of the ticket documentation (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_complexity: Option<ComplexityLevel>,
    /// Resolution steps recorded by the trainee
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

/// Situational factors that make a session harder than its scenario alone.
///
/// Every factor is on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextFactors {
    pub difficulty: f64,
    pub time_constraints: f64,
    pub resource_availability: f64,
    pub customer_complexity: f64,
    pub technical_complexity: f64,
}

impl Default for ContextFactors {
    fn default() -> Self {
        Self {
            difficulty: 50.0,
            time_constraints: 50.0,
            resource_availability: 50.0,
            customer_complexity: 50.0,
            technical_complexity: 50.0,
        }
    }
}

impl ContextFactors {
    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("difficulty", self.difficulty),
            ("time_constraints", self.time_constraints),
            ("resource_availability", self.resource_availability),
            ("customer_complexity", self.customer_complexity),
            ("technical_complexity", self.technical_complexity),
        ]
    }
}

/// Everything the final scorer needs for one finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringContext {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    pub scenario: ScenarioData,
    #[serde(default)]
    pub actions: Vec<ActionEvent>,
    #[serde(default)]
    pub interactions: Vec<InteractionEvent>,
    #[serde(default)]
    pub resolution: ResolutionData,
    #[serde(default)]
    pub context_factors: ContextFactors,
}

impl ScoringContext {
    /// Check the fields the scorer relies on.
    ///
    /// Missing events are fine; malformed scenario or out-of-range signals are not.
    pub fn validate(&self) -> Result<()> {
        let id = &self.session_id;

        if self.scenario.category.trim().is_empty() {
            return Err(Error::invalid_context(id, "scenario category is empty"));
        }
        let estimated = self.scenario.estimated_time_minutes;
        if !estimated.is_finite() || estimated <= 0.0 {
            return Err(Error::invalid_context(
                id,
                format!("estimated_time_minutes must be positive, got {estimated}"),
            ));
        }

        for (name, value) in self.context_factors.fields() {
            check_percent(id, name, Some(value))?;
        }

        check_percent(id, "customer_satisfaction", self.resolution.customer_satisfaction)?;
        check_percent(id, "documentation_quality", self.resolution.documentation_quality)?;
        if let Some(minutes) = self.resolution.time_to_resolution_minutes
            && (!minutes.is_finite() || minutes < 0.0)
        {
            return Err(Error::invalid_context(
                id,
                format!("time_to_resolution_minutes must be non-negative, got {minutes}"),
            ));
        }

        for action in &self.actions {
            check_percent(id, "action.quality", action.quality)?;
            check_percent(id, "action.appropriateness", action.appropriateness)?;
            check_percent(id, "action.creativity", action.creativity)?;
        }
        for interaction in &self.interactions {
            check_percent(id, "interaction.clarity", interaction.clarity)?;
            check_percent(id, "interaction.empathy", interaction.empathy)?;
            check_percent(id, "interaction.satisfaction", interaction.satisfaction)?;
            if let Some(secs) = interaction.response_time_secs
                && (!secs.is_finite() || secs < 0.0)
            {
                return Err(Error::invalid_context(
                    id,
                    format!("response_time_secs must be non-negative, got {secs}"),
                ));
            }
        }

        Ok(())
    }
}

pub(crate) fn check_percent(session_id: &SessionId, name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=100.0).contains(&v) => Err(Error::invalid_context(
            session_id,
            format!("{name} must be within 0-100, got {v}"),
        )),
        _ => Ok(()),
    }
}
