//! Core types for the safety engine (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One incident item from the news feed. Unknown fields are silently ignored.
///
/// The raw RSS-derived names (`pubDate`, `source`) are accepted alongside the
/// canonical camelCase ones; when an item carries both, the canonical one wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundIncident {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub published_at: Option<String>,
  #[serde(default)]
  pub pub_date: Option<String>,
  #[serde(default)]
  pub source_id: Option<String>,
  #[serde(default)]
  pub source: Option<String>,
}

impl InboundIncident {
  /// `publishedAt`, falling back to `pubDate`.
  pub fn timestamp(&self) -> Option<&str> {
    self.published_at.as_deref().or(self.pub_date.as_deref())
  }

  /// `sourceId`, falling back to `source`.
  pub fn source_name(&self) -> Option<&str> {
    self.source_id.as_deref().or(self.source.as_deref())
  }
}

/// One scoring request: the incident list plus an optional evaluation time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
  #[serde(default)]
  pub incidents: Vec<InboundIncident>,
  #[serde(default)]
  pub now: Option<String>,
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// Canonical incident after normalization + validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
  pub title: String,
  pub published_at: DateTime<Utc>,
  pub source_id: String,
}

// ---------------------------------------------------------------------------
// Severity tier
// ---------------------------------------------------------------------------

/// Keyword-derived severity, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
  High,
  Medium,
  Low,
  None,
}

impl SeverityTier {
  /// Fixed penalty points per tier: high = 25, medium = 15, low = 7, none = 0.
  pub fn points(self) -> u32 {
    match self {
      Self::High => 25,
      Self::Medium => 15,
      Self::Low => 7,
      Self::None => 0,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::High => "high",
      Self::Medium => "medium",
      Self::Low => "low",
      Self::None => "none",
    }
  }
}

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
  Low,
  Moderate,
  High,
}

impl RiskLevel {
  /// High below 40, Moderate below 70, Low otherwise.
  pub fn from_score(score: u8) -> Self {
    if score < 40 {
      Self::High
    } else if score < 70 {
      Self::Moderate
    } else {
      Self::Low
    }
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// The engine's result: a bounded score plus its derived risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
  pub score: u8,
  pub risk_level: RiskLevel,
}

/// How a single incident contributed to the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentContribution {
  pub title: String,
  pub tier: SeverityTier,
  pub points: u32,
  pub age_days: i64,
  pub decay_weight: f64,
  pub weighted_severity: f64,
}

/// Every intermediate value of the score computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
  pub total_weighted_severity: f64,
  pub log_penalty: f64,
  pub density_factor: f64,
  pub source_factor: f64,
  pub final_penalty: f64,
  pub distinct_sources: usize,
  pub incidents: Vec<IncidentContribution>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub explanations: Vec<String>,
}

/// One report per request, written to stdout by the binary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
  #[serde(flatten)]
  pub result: ScoreResult,
  pub evaluated_at: String,
  pub incident_count: usize,
  pub truncated: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub breakdown: Option<ScoreBreakdown>,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

impl From<&EngineError> for ErrorOutput {
  fn from(e: &EngineError) -> Self {
    match e {
      EngineError::InvalidInput { field, reason } => {
        Self::new(reason.clone()).with_field(field.clone())
      }
      _ => Self::new(e.to_string()),
    }
  }
}
