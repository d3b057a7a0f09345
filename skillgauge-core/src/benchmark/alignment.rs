//! Alignment of scores against industry averages.

use serde::{Deserialize, Serialize};

use crate::scores::PerDimension;

/// Ratio at or above which a score exceeds the industry average.
pub const EXCEEDS_RATIO: f64 = 1.2;
/// Ratio at or above which a score meets the industry average.
pub const MEETS_RATIO: f64 = 1.0;
/// Ratio at or above which a score is approaching the industry average.
pub const APPROACHING_RATIO: f64 = 0.8;
/// Fraction of the average (or top percentile) that counts as close enough.
pub const PROFESSIONAL_FRACTION: f64 = 0.9;

/// Where a score sits relative to the industry average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    Exceeds,
    Meets,
    Approaching,
    Below,
}

impl AlignmentStatus {
    /// Classify a score/average ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= EXCEEDS_RATIO {
            Self::Exceeds
        } else if ratio >= MEETS_RATIO {
            Self::Meets
        } else if ratio >= APPROACHING_RATIO {
            Self::Approaching
        } else {
            Self::Below
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exceeds => "exceeds",
            Self::Meets => "meets",
            Self::Approaching => "approaching",
            Self::Below => "below",
        }
    }
}

/// How ready the trainee is for real customer work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryReadiness {
    Advanced,
    Ready,
    Developing,
}

/// Alignment of a single score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentEntry {
    pub score: f64,
    pub industry_average: f64,
    pub ratio: f64,
    pub status: AlignmentStatus,
}

impl AlignmentEntry {
    /// Compare a score to an average; a non-positive average counts as met.
    #[must_use]
    pub fn new(score: f64, industry_average: f64) -> Self {
        let ratio = if industry_average > 0.0 {
            score / industry_average
        } else {
            1.0
        };
        Self {
            score,
            industry_average,
            ratio,
            status: AlignmentStatus::from_ratio(ratio),
        }
    }
}

/// Alignment of a full score against one benchmark profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAlignment {
    pub benchmark_category: String,
    pub overall: AlignmentEntry,
    pub dimensions: PerDimension<AlignmentEntry>,
    pub meets_professional_standards: bool,
    pub industry_readiness: IndustryReadiness,
}

pub(crate) fn readiness(overall: f64, average: f64, top_percentile: f64) -> IndustryReadiness {
    if overall >= PROFESSIONAL_FRACTION * top_percentile {
        IndustryReadiness::Advanced
    } else if overall >= PROFESSIONAL_FRACTION * average {
        IndustryReadiness::Ready
    } else {
        IndustryReadiness::Developing
    }
}
