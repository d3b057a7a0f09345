//! Live assessment of sessions in progress.
//!
//! ## Flow
//!
//! ```text
//! start_assessment ──► session seeded with baseline score (70 / 20 / 0)
//!         │
//!         ▼
//! update_with_action / update_with_interaction
//!         │  stamp event, append, recompute progressive score
//!         │  evaluate indicators, derive feedback, keep key moments
//!         ▼
//! ProgressUpdate { score, indicators, feedback }
//!         │
//!         ▼
//! end_assessment ──► final recomputation ──► AssessmentSummary (session removed)
//! ```
//!
//! Sessions are independent. Updates to the same session are single-writer:
//! while one call is working on a session, any other call for it fails fast
//! with [`Error::ConcurrentUpdate`] instead of blocking.

mod feedback;
mod indicators;
mod progressive;
mod session;
mod summary;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::{RealtimeConfig, ScoringConfig, WeightConfig};
use crate::context::check_percent;
use crate::error::{Error, Result};
use crate::events::{ActionEvent, InteractionEvent};
use crate::store::{InMemorySessionStore, SessionStore};
use crate::types::SessionId;

pub use feedback::{FeedbackKind, FeedbackPriority, KeyMoment, LiveFeedbackEvent};
pub use indicators::{IndicatorKind, PerformanceIndicator, Thresholds};
pub use progressive::{ProgressiveDimensions, ProgressiveScore, ScoreSample};
pub use session::{AssessmentSession, SessionSetup};
pub use summary::{AssessmentSummary, PerformanceTrend, TrendDirection};

/// Result of applying one event, or a view of the cached state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub session_id: SessionId,
    pub score: ProgressiveScore,
    pub indicators: Vec<PerformanceIndicator>,
    pub feedback: Vec<LiveFeedbackEvent>,
}

/// Tracks active sessions and scores them as events arrive.
pub struct RealTimeAssessmentTracker {
    weights: WeightConfig,
    config: RealtimeConfig,
    sessions: Arc<dyn SessionStore<AssessmentSession>>,
    in_flight: Mutex<HashSet<SessionId>>,
}

/// Marks a session busy until dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<SessionId>>,
    session_id: SessionId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.session_id);
    }
}

enum Event {
    Action(ActionEvent),
    Interaction(InteractionEvent),
}

impl RealTimeAssessmentTracker {
    pub fn new(
        weights: WeightConfig,
        config: RealtimeConfig,
        sessions: Arc<dyn SessionStore<AssessmentSession>>,
    ) -> Self {
        Self {
            weights,
            config,
            sessions,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Tracker with configured weights and an in-memory session store.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.weights.clone(),
            config.realtime.clone(),
            Arc::new(InMemorySessionStore::new()),
        ))
    }

    /// Begin tracking a session.
    pub fn start_assessment(&self, setup: SessionSetup) -> Result<ProgressiveScore> {
        self.start_assessment_at(setup, Utc::now())
    }

    pub fn start_assessment_at(
        &self,
        setup: SessionSetup,
        now: DateTime<Utc>,
    ) -> Result<ProgressiveScore> {
        let session_id = setup.session_id.clone();
        let _guard = self.acquire(&session_id)?;

        if self.sessions.contains(&session_id)? {
            return Err(fail(Error::SessionAlreadyActive(session_id)));
        }

        let session =
            AssessmentSession::start(setup, self.config.default_expected_minutes, now);
        let score = session.latest.clone();
        info!(
            session_id = %session_id,
            scenario_id = %session.scenario_id,
            user_id = %session.user_id,
            expected_minutes = session.expected_duration_minutes,
            "Assessment started"
        );
        self.sessions.put(session_id, session)?;
        Ok(score)
    }

    /// Record a trainee action and rescore.
    pub fn update_with_action(
        &self,
        session_id: &SessionId,
        action: ActionEvent,
    ) -> Result<ProgressUpdate> {
        self.update_with_action_at(session_id, action, Utc::now())
    }

    pub fn update_with_action_at(
        &self,
        session_id: &SessionId,
        action: ActionEvent,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate> {
        check_percent(session_id, "action.quality", action.quality)
            .and_then(|()| {
                check_percent(session_id, "action.appropriateness", action.appropriateness)
            })
            .and_then(|()| check_percent(session_id, "action.creativity", action.creativity))
            .map_err(fail)?;
        self.apply(session_id, Event::Action(action), now)
    }

    /// Record a customer-facing interaction and rescore.
    pub fn update_with_interaction(
        &self,
        session_id: &SessionId,
        interaction: InteractionEvent,
    ) -> Result<ProgressUpdate> {
        self.update_with_interaction_at(session_id, interaction, Utc::now())
    }

    pub fn update_with_interaction_at(
        &self,
        session_id: &SessionId,
        interaction: InteractionEvent,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate> {
        check_percent(session_id, "interaction.clarity", interaction.clarity)
            .and_then(|()| check_percent(session_id, "interaction.empathy", interaction.empathy))
            .and_then(|()| {
                check_percent(session_id, "interaction.satisfaction", interaction.satisfaction)
            })
            .map_err(fail)?;
        if let Some(secs) = interaction.response_time_secs
            && (!secs.is_finite() || secs < 0.0)
        {
            return Err(fail(Error::invalid_context(
                session_id,
                format!("response_time_secs must be non-negative, got {secs}"),
            )));
        }
        self.apply(session_id, Event::Interaction(interaction), now)
    }

    /// Latest cached score; no recomputation.
    pub fn current_score(&self, session_id: &SessionId) -> Result<ProgressiveScore> {
        Ok(self.session(session_id)?.latest)
    }

    /// Latest cached score with indicators, without feedback.
    pub fn current_progress(&self, session_id: &SessionId) -> Result<ProgressUpdate> {
        let session = self.session(session_id)?;
        let indicators = self.indicators(&session);
        Ok(ProgressUpdate {
            session_id: session.session_id,
            score: session.latest,
            indicators,
            feedback: Vec::new(),
        })
    }

    /// Finish a session, returning its summary. The session stops being active.
    pub fn end_assessment(&self, session_id: &SessionId) -> Result<AssessmentSummary> {
        self.end_assessment_at(session_id, Utc::now())
    }

    pub fn end_assessment_at(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<AssessmentSummary> {
        let _guard = self.acquire(session_id)?;
        let mut session = self.session(session_id)?;

        if now > session.current_time {
            session.current_time = now;
        }
        session.rescore(&self.weights);
        let indicators = self.indicators(&session);

        self.sessions.remove(session_id)?;
        let summary = AssessmentSummary::build(session, &indicators);
        info!(
            session_id = %session_id,
            overall = summary.final_score.overall,
            duration_minutes = summary.duration_minutes,
            trend = ?summary.trend.direction,
            "Assessment ended"
        );
        Ok(summary)
    }

    /// Ids of every active session.
    pub fn active_sessions(&self) -> Result<Vec<SessionId>> {
        self.sessions.ids()
    }

    pub fn is_active(&self, session_id: &SessionId) -> Result<bool> {
        self.sessions.contains(session_id)
    }

    fn apply(
        &self,
        session_id: &SessionId,
        event: Event,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate> {
        let _guard = self.acquire(session_id)?;
        let mut session = self.session(session_id)?;
        let previous_completeness = session.latest.completeness;
        let previous_indicators = self.indicators(&session);

        let mut feedback = match event {
            Event::Action(action) => {
                let kind = action.kind;
                let fb = feedback::for_action(&action, now);
                session.record_action(action, now);
                debug!(session_id = %session_id, kind = %kind, "Action recorded");
                fb
            }
            Event::Interaction(interaction) => {
                let kind = interaction.kind;
                let fb = feedback::for_interaction(&interaction, now);
                session.record_interaction(interaction, now);
                debug!(session_id = %session_id, kind = ?kind, "Interaction recorded");
                fb
            }
        };

        let score = session.rescore(&self.weights).clone();
        let indicators = self.indicators(&session);
        feedback.extend(feedback::milestones(
            previous_completeness,
            score.completeness,
            &self.config.milestones,
            now,
        ));
        feedback.extend(feedback::for_critical_indicators(
            &previous_indicators,
            &indicators,
            now,
        ));
        session.remember(&feedback);

        debug!(
            session_id = %session_id,
            overall = score.overall,
            confidence = score.confidence,
            completeness = score.completeness,
            feedback = feedback.len(),
            "Progressive score updated"
        );
        self.sessions.put(session_id.clone(), session)?;

        Ok(ProgressUpdate {
            session_id: session_id.clone(),
            score,
            indicators,
            feedback,
        })
    }

    fn indicators(&self, session: &AssessmentSession) -> Vec<PerformanceIndicator> {
        indicators::evaluate(
            &session.latest.dimensions,
            session.elapsed_minutes(session.current_time),
            session.expected_duration_minutes,
            self.config.time_overrun_ratio,
        )
    }

    fn session(&self, session_id: &SessionId) -> Result<AssessmentSession> {
        self.sessions
            .get(session_id)?
            .ok_or_else(|| fail(Error::SessionNotFound(session_id.clone())))
    }

    fn acquire(&self, session_id: &SessionId) -> Result<InFlight<'_>> {
        let mut busy = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !busy.insert(session_id.clone()) {
            return Err(fail(Error::ConcurrentUpdate(session_id.clone())));
        }
        Ok(InFlight {
            set: &self.in_flight,
            session_id: session_id.clone(),
        })
    }
}

fn fail(err: Error) -> Error {
    match &err {
        Error::SessionNotFound(id)
        | Error::SessionAlreadyActive(id)
        | Error::ConcurrentUpdate(id)
        | Error::InvalidContext { session_id: id, .. } => {
            error!(session_id = %id, error = %err, "Assessment operation failed");
        }
        _ => error!(error = %err, "Assessment operation failed"),
    }
    err
}
