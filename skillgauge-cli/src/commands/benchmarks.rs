use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;
use skillgauge_core::benchmark::{AlignmentEntry, BenchmarkProfile, percentile};
use skillgauge_core::{BenchmarkRepository, ScoringConfig};

use super::write_pretty;

#[derive(Args)]
pub struct BenchmarksArgs {
    /// Profile to show; lists every profile when omitted
    pub category: Option<String>,

    /// Place an overall score within the profile
    #[arg(long)]
    pub score: Option<f64>,
}

#[derive(Serialize)]
struct Placement<'a> {
    profile: &'a BenchmarkProfile,
    score: f64,
    percentile: f64,
    alignment: AlignmentEntry,
}

pub fn run(args: BenchmarksArgs, config: &ScoringConfig, out: &mut impl Write) -> Result<()> {
    let repo = BenchmarkRepository::from_config(&config.benchmarks);

    let Some(category) = args.category else {
        if args.score.is_some() {
            bail!("--score needs a benchmark category");
        }
        let profiles: Vec<_> = repo.categories().map(|c| repo.get_benchmarks(c)).collect();
        return write_pretty(out, &profiles);
    };

    let profile = repo.get_benchmarks(&category);
    match args.score {
        None => write_pretty(out, profile),
        Some(score) => {
            if !(0.0..=100.0).contains(&score) {
                bail!("Score must be within 0-100, got {score}");
            }
            let industry = &profile.industry;
            write_pretty(
                out,
                &Placement {
                    profile,
                    score,
                    percentile: percentile::percentile(
                        score,
                        industry.average,
                        industry.standard_deviation,
                    ),
                    alignment: AlignmentEntry::new(score, industry.average),
                },
            )
        }
    }
}
