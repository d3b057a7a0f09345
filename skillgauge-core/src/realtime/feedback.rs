//! Live feedback generated as events arrive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::indicators::{IndicatorKind, PerformanceIndicator};
use crate::events::{ActionEvent, ActionKind, InteractionEvent};
use crate::types::FeedbackId;

/// Research quality that earns an achievement.
pub const RESEARCH_ACHIEVEMENT_QUALITY: f64 = 85.0;
/// Verification quality that earns positive feedback.
pub const VERIFICATION_PRAISE_QUALITY: f64 = 80.0;
/// Customer wait, in seconds, above which a warning fires.
pub const SLOW_RESPONSE_SECS: f64 = 300.0;
/// Interaction empathy that earns positive feedback.
pub const EMPATHY_PRAISE: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Immediate,
    Milestone,
    Warning,
    Achievement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// A message to show the trainee while the session is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFeedbackEvent {
    pub id: FeedbackId,
    pub kind: FeedbackKind,
    pub category: String,
    pub message: String,
    pub priority: FeedbackPriority,
    pub display_duration_secs: u32,
    pub action_required: bool,
    pub created_at: DateTime<Utc>,
}

impl LiveFeedbackEvent {
    fn new(
        kind: FeedbackKind,
        category: &str,
        message: impl Into<String>,
        priority: FeedbackPriority,
        at: DateTime<Utc>,
    ) -> Self {
        let display_duration_secs = match priority {
            FeedbackPriority::Low => 3,
            FeedbackPriority::Medium => 5,
            FeedbackPriority::High => 8,
            FeedbackPriority::Critical => 12,
        };
        Self {
            id: FeedbackId::new(),
            kind,
            category: category.to_string(),
            message: message.into(),
            priority,
            display_duration_secs,
            action_required: false,
            created_at: at,
        }
    }

    fn requiring_action(mut self) -> Self {
        self.action_required = true;
        self
    }

    /// Achievements and warnings are remembered for the session summary.
    #[must_use]
    pub fn is_key_moment(&self) -> bool {
        matches!(self.kind, FeedbackKind::Achievement | FeedbackKind::Warning)
    }
}

/// Notable event kept for the end-of-session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMoment {
    pub at: DateTime<Utc>,
    pub kind: FeedbackKind,
    pub category: String,
    pub message: String,
}

impl From<&LiveFeedbackEvent> for KeyMoment {
    fn from(event: &LiveFeedbackEvent) -> Self {
        Self {
            at: event.created_at,
            kind: event.kind,
            category: event.category.clone(),
            message: event.message.clone(),
        }
    }
}

pub(crate) fn for_action(action: &ActionEvent, at: DateTime<Utc>) -> Vec<LiveFeedbackEvent> {
    let mut feedback = Vec::new();
    let quality = action.quality.unwrap_or(0.0);

    if action.kind == ActionKind::Research && quality >= RESEARCH_ACHIEVEMENT_QUALITY {
        feedback.push(LiveFeedbackEvent::new(
            FeedbackKind::Achievement,
            "technical",
            "Thorough research: you found the right information quickly",
            FeedbackPriority::Medium,
            at,
        ));
    }
    if action.security_risk {
        feedback.push(
            LiveFeedbackEvent::new(
                FeedbackKind::Warning,
                "procedural",
                format!("The {} step introduced a security risk", action.kind),
                FeedbackPriority::High,
                at,
            )
            .requiring_action(),
        );
    }
    if action.kind == ActionKind::ProcedureViolation {
        feedback.push(LiveFeedbackEvent::new(
            FeedbackKind::Warning,
            "procedural",
            "Standard procedure was not followed",
            FeedbackPriority::Medium,
            at,
        ));
    }
    if action.kind == ActionKind::Verification && quality >= VERIFICATION_PRAISE_QUALITY {
        feedback.push(LiveFeedbackEvent::new(
            FeedbackKind::Immediate,
            "technical",
            "Good verification of the fix",
            FeedbackPriority::Low,
            at,
        ));
    }

    feedback
}

pub(crate) fn for_interaction(
    interaction: &InteractionEvent,
    at: DateTime<Utc>,
) -> Vec<LiveFeedbackEvent> {
    let mut feedback = Vec::new();

    if let Some(secs) = interaction.response_time_secs
        && secs > SLOW_RESPONSE_SECS
    {
        feedback.push(LiveFeedbackEvent::new(
            FeedbackKind::Warning,
            "communication",
            format!(
                "The customer waited {:.0} minutes for a reply",
                secs / 60.0
            ),
            FeedbackPriority::Medium,
            at,
        ));
    }
    if interaction.empathy.is_some_and(|e| e >= EMPATHY_PRAISE) {
        feedback.push(LiveFeedbackEvent::new(
            FeedbackKind::Immediate,
            "communication",
            "Great empathy with the customer",
            FeedbackPriority::Low,
            at,
        ));
    }

    feedback
}

/// One milestone for each configured mark crossed by this update.
pub(crate) fn milestones(
    previous: f64,
    current: f64,
    marks: &[f64],
    at: DateTime<Utc>,
) -> Vec<LiveFeedbackEvent> {
    marks
        .iter()
        .filter(|mark| previous < **mark && current >= **mark)
        .map(|mark| {
            LiveFeedbackEvent::new(
                FeedbackKind::Milestone,
                "progress",
                format!("{mark:.0}% of the expected workflow complete"),
                FeedbackPriority::Low,
                at,
            )
        })
        .collect()
}

/// One critical warning per indicator that turned critical since `previous`.
pub(crate) fn for_critical_indicators(
    previous: &[PerformanceIndicator],
    current: &[PerformanceIndicator],
    at: DateTime<Utc>,
) -> Vec<LiveFeedbackEvent> {
    let was_critical = |category: &str| {
        previous
            .iter()
            .any(|p| p.category == category && p.kind == IndicatorKind::Critical)
    };
    current
        .iter()
        .filter(|i| i.kind == IndicatorKind::Critical && !was_critical(&i.category))
        .map(|i| {
            LiveFeedbackEvent::new(
                FeedbackKind::Warning,
                &i.category,
                i.message.clone(),
                FeedbackPriority::Critical,
                at,
            )
            .requiring_action()
        })
        .collect()
}
