use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use serde::Deserialize;
use skillgauge_core::realtime::SessionSetup;
use skillgauge_core::{ActionEvent, InteractionEvent, RealTimeAssessmentTracker, ScoringConfig};

use super::{read_json, write_line};

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file holding the session setup and timed events
    pub script: PathBuf,
}

/// A recorded session to feed through the tracker.
#[derive(Debug, Deserialize)]
pub struct ReplayScript {
    pub setup: SessionSetup,
    /// Session start; defaults to now
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    pub events: Vec<ScriptedEvent>,
    /// When the session ends, relative to start; defaults to the last event
    #[serde(default)]
    pub end_offset_secs: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptedEvent {
    /// Seconds after session start
    pub offset_secs: f64,
    #[serde(flatten)]
    pub event: ScriptedPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedPayload {
    Action(ActionEvent),
    Interaction(InteractionEvent),
}

pub fn run(args: ReplayArgs, config: &ScoringConfig, out: &mut impl Write) -> Result<()> {
    let script: ReplayScript = read_json(&args.script)?;
    replay(script, config, out)
}

fn offset(start: DateTime<Utc>, secs: f64) -> Result<DateTime<Utc>> {
    if !secs.is_finite() || secs < 0.0 {
        bail!("Event offsets must be non-negative seconds, got {secs}");
    }
    Ok(start + Duration::milliseconds((secs * 1000.0).round() as i64))
}

fn replay(script: ReplayScript, config: &ScoringConfig, out: &mut impl Write) -> Result<()> {
    let tracker = RealTimeAssessmentTracker::from_config(config)?;
    let start = script.start.unwrap_or_else(Utc::now);
    let session_id = script.setup.session_id.clone();

    tracker.start_assessment_at(script.setup, start)?;

    let mut last = start;
    for (index, scripted) in script.events.into_iter().enumerate() {
        let at = offset(start, scripted.offset_secs)?;
        let update = match scripted.event {
            ScriptedPayload::Action(action) => {
                tracker.update_with_action_at(&session_id, action, at)
            }
            ScriptedPayload::Interaction(interaction) => {
                tracker.update_with_interaction_at(&session_id, interaction, at)
            }
        }
        .with_context(|| format!("Event {index} of session {session_id} was rejected"))?;
        write_line(out, &update)?;
        last = last.max(at);
    }

    let end = match script.end_offset_secs {
        Some(secs) => offset(start, secs)?,
        None => last,
    };
    let summary = tracker.end_assessment_at(&session_id, end)?;
    write_line(out, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "setup": {
            "session_id": "replay-1",
            "scenario_id": "printer",
            "user_id": "trainee",
            "scenario": {
                "category": "general",
                "difficulty": "beginner",
                "estimated_time_minutes": 10.0,
                "complexity": "beginner"
            }
        },
        "start": "2026-03-01T09:00:00Z",
        "events": [
            {"offset_secs": 30, "interaction": {"kind": "greeting", "empathy": 90}},
            {"offset_secs": 60, "action": {"kind": "initial_assessment"}},
            {"offset_secs": 120, "action": {"kind": "research", "quality": 88}},
            {"offset_secs": 300, "action": {"kind": "solution", "quality": 80}}
        ],
        "end_offset_secs": 420
    }"#;

    #[test]
    fn emits_one_line_per_event_plus_summary() {
        let script: ReplayScript = serde_json::from_str(SCRIPT).unwrap();
        let mut out = Vec::new();
        replay(script, &ScoringConfig::default(), &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0]["score"]["overall"].is_number());

        let summary = &lines[4];
        assert_eq!(summary["session_id"], "replay-1");
        assert_eq!(summary["action_count"], 3);
        assert_eq!(summary["interaction_count"], 1);
        assert_eq!(summary["duration_minutes"], 7.0);
    }

    #[test]
    fn negative_offset_is_rejected() {
        let start = Utc::now();
        assert!(offset(start, -1.0).is_err());
        assert_eq!(offset(start, 1.5).unwrap(), start + Duration::milliseconds(1500));
    }
}
