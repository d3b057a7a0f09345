//! Competency scoring for simulated IT-support training sessions.
//!
//! A trainee works through a help-desk scenario; their actions and customer
//! interactions are scored along five dimensions (technical, communication,
//! procedural, customer service, problem-solving) and compared with industry
//! benchmarks.
//!
//! # Architecture
//!
//! - **Engine** ([`DimensionScoringEngine`]) turns event logs into raw sub-scores
//! - **Scorer** ([`PerformanceScorer`]) weights, adjusts and benchmarks a finished
//!   session and archives the resulting [`PerformanceScore`]
//! - **Tracker** ([`RealTimeAssessmentTracker`]) keeps a provisional score, indicators
//!   and feedback for sessions still in progress
//! - **Benchmarks** ([`BenchmarkRepository`]) hold read-only industry profiles
//! - **Storage** ([`SessionStore`]) abstracts per-session state
//!
//! Everything is synchronous; services are `Send + Sync` and share read-only
//! data through `Arc`.

pub mod benchmark;
pub mod config;
mod context;
pub mod dimensions;
mod error;
mod events;
pub mod realtime;
mod scorer;
mod scores;
pub mod store;
mod types;

// Errors
pub use error::{Error, Result};

// Configuration
pub use config::{RealtimeConfig, ScoringConfig, WeightConfig};

// Input types
pub use context::{ComplexityLevel, ContextFactors, ResolutionData, ScenarioData, ScoringContext};
pub use events::{ActionEvent, ActionKind, InteractionEvent, InteractionKind};

// Score types
pub use scores::{
    CommunicationScores, CustomerServiceScores, Dimension, DimensionScore, DimensionScoreSet,
    PerDimension, PerformanceScore, ProblemSolvingScores, ProceduralScores, ScoreMetadata,
    SubScore, SubScoreSet, TechnicalScores, clamp_score,
};

// Services
pub use benchmark::BenchmarkRepository;
pub use dimensions::DimensionScoringEngine;
pub use realtime::RealTimeAssessmentTracker;
pub use scorer::{
    BenchmarkPerformance, DimensionContribution, IndustryContext, PerformanceLevel,
    PerformanceScorer, ScoreBreakdown, contextual_adjustment,
};

// Storage
pub use store::{InMemorySessionStore, SessionStore};

// ID types
pub use types::{FeedbackId, ReportId, ScenarioId, SessionId, UserId};
