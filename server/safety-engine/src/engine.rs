//! Request-level orchestration: resolve `now`, cap, normalize, score.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::EngineError;
use crate::normalize;
use crate::score;
use crate::types::*;

/// Score an incident list at an RFC 3339 (or RFC 2822) `now`.
///
/// No cap is applied; missing titles/sources take the default config values.
pub fn compute_safety_score(
  incidents: &[InboundIncident],
  now: &str,
) -> Result<ScoreResult, EngineError> {
  let now = normalize::parse_now(now)?;
  let config = Config::default();
  let incidents = incidents
    .iter()
    .map(|raw| normalize::normalize(raw, &config))
    .collect::<Result<Vec<_>, EngineError>>()?;
  Ok(score::compute_score(&incidents, &now))
}

/// The safety engine. Holds configuration only; every evaluation is independent.
#[derive(Debug, Clone)]
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Evaluate one request.
  ///
  /// `request.now` wins over `fallback_now`. The first invalid incident aborts the request.
  pub fn evaluate(
    &self,
    request: &ScoreRequest,
    fallback_now: DateTime<Utc>,
    with_breakdown: bool,
  ) -> Result<ScoreReport, EngineError> {
    let now = match request.now.as_deref() {
      Some(s) => normalize::parse_now(s)?,
      None => fallback_now,
    };

    let cap = self.config.max_incidents;
    let truncated = cap > 0 && request.incidents.len() > cap;
    let kept = if truncated {
      warn!(
        received = request.incidents.len(),
        cap, "incident list exceeds cap, dropping tail"
      );
      &request.incidents[..cap]
    } else {
      &request.incidents[..]
    };

    let incidents = kept
      .iter()
      .map(|raw| normalize::normalize(raw, &self.config))
      .collect::<Result<Vec<_>, EngineError>>()?;

    let mut breakdown = score::compute_breakdown(&incidents, &now);
    let result = score::result_from_breakdown(&breakdown);

    debug!(
      incidents = incidents.len(),
      distinct_sources = breakdown.distinct_sources,
      total_weighted_severity = breakdown.total_weighted_severity,
      final_penalty = breakdown.final_penalty,
      score = result.score,
      risk_level = ?result.risk_level,
      "safety score computed"
    );

    let breakdown = if with_breakdown {
      breakdown.explanations = score::compute_explanations(&breakdown);
      Some(breakdown)
    } else {
      None
    };

    Ok(ScoreReport {
      result,
      evaluated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
      incident_count: incidents.len(),
      truncated,
      breakdown,
    })
  }

  /// Evaluate one JSON-lines request.
  ///
  /// Without `fixed_now` the wall clock is read per call, so a long-running
  /// stream never scores against a stale time.
  pub fn evaluate_line(
    &self,
    line: &str,
    fixed_now: Option<DateTime<Utc>>,
    with_breakdown: bool,
  ) -> Result<ScoreReport, ErrorOutput> {
    let now = fixed_now.unwrap_or_else(Utc::now);
    serde_json::from_str::<ScoreRequest>(line)
      .map_err(EngineError::from)
      .and_then(|request| self.evaluate(&request, now, with_breakdown))
      .map_err(|e| ErrorOutput::from(&e))
  }
}
