//! SafeHer Safety Score Engine — deterministic, keyword-based.
//!
//! Classifies incident titles by severity, weights them by a step time decay,
//! and compresses the total into a bounded 0–100 safety score with a
//! Low/Moderate/High risk level.
//!
//! No AI, no DB, no network; pure computation, no state between calls.

pub mod config;
pub mod decay;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod score;
pub mod severity;
pub mod types;

pub use config::Config;
pub use engine::{compute_safety_score, Engine};
pub use error::{ConfigError, EngineError};
pub use types::{InboundIncident, RiskLevel, ScoreReport, ScoreRequest, ScoreResult, SeverityTier};
