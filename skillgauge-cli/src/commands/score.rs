use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use skillgauge_core::{PerformanceScorer, ScoringConfig, ScoringContext};

use super::{read_json, write_pretty};

#[derive(Args)]
pub struct ScoreArgs {
    /// JSON file holding the scoring context
    pub context: PathBuf,

    /// Print the explained breakdown instead of the raw report
    #[arg(long)]
    pub breakdown: bool,
}

pub fn run(args: ScoreArgs, config: &ScoringConfig, out: &mut impl Write) -> Result<()> {
    let context: ScoringContext = read_json(&args.context)?;
    let scorer = PerformanceScorer::from_config(config)?;

    let report = scorer
        .score(&context)
        .with_context(|| format!("Failed to score session {}", context.session_id))?;

    if args.breakdown {
        let breakdown = scorer.score_breakdown(&report.metadata.session_id)?;
        write_pretty(out, &breakdown)
    } else {
        write_pretty(out, &report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONTEXT: &str = r#"{
        "session_id": "cli-1",
        "scenario_id": "vpn",
        "user_id": "trainee",
        "scenario": {
            "category": "technical_support",
            "difficulty": "intermediate",
            "estimated_time_minutes": 20.0,
            "complexity": "intermediate"
        },
        "actions": [
            {"kind": "diagnosis", "quality": 85.0},
            {"kind": "solution", "quality": 90.0}
        ],
        "interactions": [
            {"kind": "greeting", "clarity": 90.0}
        ],
        "resolution": {"resolved": true},
        "context_factors": {}
    }"#;

    fn write_context(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("context.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn prints_report_json() {
        let dir = TempDir::new().unwrap();
        let args = ScoreArgs {
            context: write_context(&dir, CONTEXT),
            breakdown: false,
        };
        let mut out = Vec::new();
        run(args, &ScoringConfig::default(), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(json["overall"].as_f64().is_some());
        assert_eq!(json["metadata"]["benchmark_category"], "technical_support");
    }

    #[test]
    fn prints_breakdown_json() {
        let dir = TempDir::new().unwrap();
        let args = ScoreArgs {
            context: write_context(&dir, CONTEXT),
            breakdown: true,
        };
        let mut out = Vec::new();
        run(args, &ScoringConfig::default(), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["dimensions"].as_array().unwrap().len(), 5);
        assert!(json["performance_level"].is_string());
    }

    #[test]
    fn malformed_input_names_the_file() {
        let dir = TempDir::new().unwrap();
        let args = ScoreArgs {
            context: write_context(&dir, "{not json"),
            breakdown: false,
        };
        let err = run(args, &ScoringConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("context.json"));
    }
}
