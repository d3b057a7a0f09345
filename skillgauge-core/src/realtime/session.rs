//! State of one live assessment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::feedback::{KeyMoment, LiveFeedbackEvent};
use super::progressive::{self, ProgressiveScore, ScoreSample, Snapshot};
use crate::config::WeightConfig;
use crate::context::ScenarioData;
use crate::events::{ActionEvent, InteractionEvent};
use crate::types::{ScenarioId, SessionId, UserId};

/// What the orchestrator knows when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSetup {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    pub scenario: ScenarioData,
}

/// Everything recorded for an active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    pub scenario: ScenarioData,
    pub expected_duration_minutes: f64,
    pub actions: Vec<ActionEvent>,
    pub interactions: Vec<InteractionEvent>,
    pub start_time: DateTime<Utc>,
    pub current_time: DateTime<Utc>,
    /// Most recent progressive score
    pub latest: ProgressiveScore,
    /// One sample per recomputation, oldest first. The seed score is not sampled.
    pub history: Vec<ScoreSample>,
    pub key_moments: Vec<KeyMoment>,
}

impl AssessmentSession {
    pub(crate) fn start(setup: SessionSetup, default_minutes: f64, now: DateTime<Utc>) -> Self {
        let estimated = setup.scenario.estimated_time_minutes;
        let expected_duration_minutes = if estimated.is_finite() && estimated > 0.0 {
            estimated
        } else {
            default_minutes
        };

        Self {
            session_id: setup.session_id,
            scenario_id: setup.scenario_id,
            user_id: setup.user_id,
            scenario: setup.scenario,
            expected_duration_minutes,
            actions: Vec::new(),
            interactions: Vec::new(),
            start_time: now,
            current_time: now,
            latest: ProgressiveScore::baseline(now),
            history: Vec::new(),
            key_moments: Vec::new(),
        }
    }

    /// Minutes between session start and `now`, never negative.
    #[must_use]
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        let millis = (now - self.start_time).num_milliseconds().max(0);
        millis as f64 / 60_000.0
    }

    pub(crate) fn record_action(&mut self, mut action: ActionEvent, now: DateTime<Utc>) {
        action.timestamp = now;
        self.actions.push(action);
        self.touch(now);
    }

    pub(crate) fn record_interaction(
        &mut self,
        mut interaction: InteractionEvent,
        now: DateTime<Utc>,
    ) {
        interaction.timestamp = now;
        self.interactions.push(interaction);
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.current_time {
            self.current_time = now;
        }
    }

    /// Recompute the progressive score at the session's current time.
    pub(crate) fn rescore(&mut self, weights: &WeightConfig) -> &ProgressiveScore {
        let snapshot = Snapshot {
            actions: &self.actions,
            interactions: &self.interactions,
            elapsed_minutes: self.elapsed_minutes(self.current_time),
            expected_minutes: self.expected_duration_minutes,
            previous_procedural: self.latest.dimensions.procedural,
        };
        let score = progressive::compute(&snapshot, weights, self.current_time);
        self.history.push(ScoreSample::from(&score));
        self.latest = score;
        &self.latest
    }

    pub(crate) fn remember(&mut self, feedback: &[LiveFeedbackEvent]) {
        self.key_moments.extend(
            feedback
                .iter()
                .filter(|f| f.is_key_moment())
                .map(KeyMoment::from),
        );
    }
}
