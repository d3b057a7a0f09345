//! Action and interaction events recorded during a training session.
//!
//! Events are produced by the session orchestrator and are immutable once
//! recorded. Every quality-like signal is optional: a missing value means
//! "not observed" and scoring falls back to its documented default instead
//! of treating it as zero.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of technical or procedural step the trainee performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    InitialAssessment,
    Research,
    Diagnosis,
    Testing,
    RootCauseAnalysis,
    Solution,
    AlternativeSolution,
    Verification,
    CustomerCommunication,
    Documentation,
    Escalation,
    FollowUp,
    SecurityCheck,
    ProcedureViolation,
    /// Any action type this crate does not score explicitly
    #[serde(other)]
    Other,
}

impl ActionKind {
    /// The six kinds a complete session is expected to contain.
    pub const EXPECTED: [ActionKind; 6] = [
        ActionKind::InitialAssessment,
        ActionKind::Research,
        ActionKind::Diagnosis,
        ActionKind::Solution,
        ActionKind::CustomerCommunication,
        ActionKind::Verification,
    ];

    /// Actions that gather evidence about the fault.
    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Self::Diagnosis | Self::Testing | Self::RootCauseAnalysis
        )
    }

    /// Actions that count towards the technical dimension.
    #[must_use]
    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            Self::Research
                | Self::Diagnosis
                | Self::Testing
                | Self::RootCauseAnalysis
                | Self::Solution
                | Self::AlternativeSolution
                | Self::Verification
        )
    }

    /// Convert to the wire string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialAssessment => "initial_assessment",
            Self::Research => "research",
            Self::Diagnosis => "diagnosis",
            Self::Testing => "testing",
            Self::RootCauseAnalysis => "root_cause_analysis",
            Self::Solution => "solution",
            Self::AlternativeSolution => "alternative_solution",
            Self::Verification => "verification",
            Self::CustomerCommunication => "customer_communication",
            Self::Documentation => "documentation",
            Self::Escalation => "escalation",
            Self::FollowUp => "follow_up",
            Self::SecurityCheck => "security_check",
            Self::ProcedureViolation => "procedure_violation",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trainee action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    /// What the trainee did
    pub kind: ActionKind,
    /// When it happened (server-assigned in the real-time tracker)
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Quality of execution (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
    /// How appropriate the action was for the situation (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appropriateness: Option<f64>,
    /// Originality of the approach (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creativity: Option<f64>,
    /// The action exposed the customer or system to a security risk
    #[serde(default)]
    pub security_risk: bool,
    /// The action did not contribute to the resolution
    #[serde(default)]
    pub unnecessary: bool,
    /// Free-form numeric attributes supplied by the orchestrator
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, f64>,
}

impl ActionEvent {
    /// Create an action of the given kind stamped with the current time.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            quality: None,
            appropriateness: None,
            creativity: None,
            security_risk: false,
            unnecessary: false,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn with_appropriateness(mut self, appropriateness: f64) -> Self {
        self.appropriateness = Some(appropriateness);
        self
    }

    #[must_use]
    pub fn with_creativity(mut self, creativity: f64) -> Self {
        self.creativity = Some(creativity);
        self
    }

    #[must_use]
    pub fn with_security_risk(mut self) -> Self {
        self.security_risk = true;
        self
    }

    #[must_use]
    pub fn unnecessary(mut self) -> Self {
        self.unnecessary = true;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Kind of customer-facing turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Greeting,
    Question,
    Explanation,
    StatusUpdate,
    Empathy,
    Apology,
    Closing,
    #[serde(other)]
    Other,
}

/// A single customer-facing interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub kind: InteractionKind,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// How clearly the trainee expressed themselves (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarity: Option<f64>,
    /// Empathy shown towards the customer (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empathy: Option<f64>,
    /// Customer satisfaction after this turn (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<f64>,
    /// Seconds the customer waited for this reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_secs: Option<f64>,
    /// The trainee reached out without being prompted
    #[serde(default)]
    pub proactive: bool,
}

impl InteractionEvent {
    /// Create an interaction of the given kind stamped with the current time.
    #[must_use]
    pub fn new(kind: InteractionKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            clarity: None,
            empathy: None,
            satisfaction: None,
            response_time_secs: None,
            proactive: false,
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_clarity(mut self, clarity: f64) -> Self {
        self.clarity = Some(clarity);
        self
    }

    #[must_use]
    pub fn with_empathy(mut self, empathy: f64) -> Self {
        self.empathy = Some(empathy);
        self
    }

    #[must_use]
    pub fn with_satisfaction(mut self, satisfaction: f64) -> Self {
        self.satisfaction = Some(satisfaction);
        self
    }

    #[must_use]
    pub fn with_response_time(mut self, secs: f64) -> Self {
        self.response_time_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn proactive(mut self) -> Self {
        self.proactive = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_kinds_are_a_subset_of_technical_kinds() {
        for kind in [
            ActionKind::Diagnosis,
            ActionKind::Testing,
            ActionKind::RootCauseAnalysis,
        ] {
            assert!(kind.is_diagnostic());
            assert!(kind.is_technical());
        }
        assert!(!ActionKind::Documentation.is_technical());
        assert!(!ActionKind::Research.is_diagnostic());
    }

    #[test]
    fn unknown_action_kind_deserializes_to_other() {
        let action: ActionEvent =
            serde_json::from_str(r#"{"kind":"reboot_router","quality":70}"#).unwrap();
        assert_eq!(action.kind, ActionKind::Other);
        assert_eq!(action.quality, Some(70.0));
        assert!(!action.security_risk);
    }

    #[test]
    fn missing_optional_signals_stay_none() {
        let interaction: InteractionEvent =
            serde_json::from_str(r#"{"kind":"greeting","empathy":90}"#).unwrap();
        assert_eq!(interaction.kind, InteractionKind::Greeting);
        assert_eq!(interaction.empathy, Some(90.0));
        assert!(interaction.clarity.is_none());
        assert!(interaction.response_time_secs.is_none());
    }

    #[test]
    fn action_kind_wire_names_match_serde() {
        for kind in ActionKind::EXPECTED {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
