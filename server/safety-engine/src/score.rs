//! Safety score, its breakdown, and human-readable explanations.
//!
//! Pipeline: per-incident `points * decay`, summed, compressed with
//! `ln(1 + total) * 15`, scaled by incident density (cap 2.0) and source
//! diversity (cap 1.5), then subtracted from 100. Rounding happens once at
//! the end, clamping after rounding.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::decay;
use crate::severity;
use crate::types::*;

const BASE_SCORE: f64 = 100.0;
const LOG_SCALE: f64 = 15.0;
const DENSITY_DIVISOR: f64 = 10.0;
const DENSITY_CAP: f64 = 2.0;
const SOURCE_DIVISOR: f64 = 5.0;
const SOURCE_CAP: f64 = 1.5;

/// Score 0–100 plus risk level for `incidents` evaluated at `now`.
pub fn compute_score(incidents: &[Incident], now: &DateTime<Utc>) -> ScoreResult {
  result_from_breakdown(&compute_breakdown(incidents, now))
}

/// All intermediates of the score computation (explanations left empty).
pub fn compute_breakdown(incidents: &[Incident], now: &DateTime<Utc>) -> ScoreBreakdown {
  let contributions: Vec<IncidentContribution> = incidents
    .iter()
    .map(|incident| {
      let tier = severity::classify(&incident.title);
      let points = tier.points();
      let age_days = decay::age_days(&incident.published_at, now);
      let decay_weight = decay::weight_for_age(age_days);
      IncidentContribution {
        title: incident.title.clone(),
        tier,
        points,
        age_days,
        decay_weight,
        weighted_severity: points as f64 * decay_weight,
      }
    })
    .collect();

  let total_weighted_severity: f64 = contributions.iter().map(|c| c.weighted_severity).sum();
  let log_penalty = (1.0 + total_weighted_severity).ln() * LOG_SCALE;

  let distinct_sources = incidents
    .iter()
    .map(|i| i.source_id.as_str())
    .collect::<HashSet<_>>()
    .len();
  let density_factor = density_factor(incidents.len());
  let source_factor = source_factor(distinct_sources);
  let final_penalty = log_penalty * density_factor * source_factor;

  ScoreBreakdown {
    total_weighted_severity,
    log_penalty,
    density_factor,
    source_factor,
    final_penalty,
    distinct_sources,
    incidents: contributions,
    explanations: Vec::new(),
  }
}

/// Final score and risk level from a breakdown's penalty.
pub fn result_from_breakdown(breakdown: &ScoreBreakdown) -> ScoreResult {
  let score = (BASE_SCORE - breakdown.final_penalty)
    .round()
    .clamp(0.0, BASE_SCORE) as u8;
  ScoreResult {
    score,
    risk_level: RiskLevel::from_score(score),
  }
}

/// `min(2, count / 10)`.
pub fn density_factor(count: usize) -> f64 {
  (count as f64 / DENSITY_DIVISOR).min(DENSITY_CAP)
}

/// `min(1.5, distinct / 5)`.
pub fn source_factor(distinct_sources: usize) -> f64 {
  (distinct_sources as f64 / SOURCE_DIVISOR).min(SOURCE_CAP)
}

/// Short human-readable reasons.
pub fn compute_explanations(breakdown: &ScoreBreakdown) -> Vec<String> {
  let mut out = Vec::new();
  if breakdown.incidents.is_empty() {
    out.push("No incidents reported; baseline score applies".to_string());
    return out;
  }

  for tier in [SeverityTier::High, SeverityTier::Medium, SeverityTier::Low] {
    let recent = breakdown
      .incidents
      .iter()
      .filter(|c| c.tier == tier && c.age_days <= 7)
      .count();
    if recent > 0 {
      out.push(format!(
        "{} {}-severity incident{} in the last week",
        recent,
        tier.as_str(),
        if recent == 1 { "" } else { "s" }
      ));
    }
  }

  let unclassified = breakdown
    .incidents
    .iter()
    .filter(|c| c.tier == SeverityTier::None)
    .count();
  if unclassified > 0 {
    out.push(format!(
      "{} item{} matched no crime keywords",
      unclassified,
      if unclassified == 1 { "" } else { "s" }
    ));
  }

  if breakdown.density_factor < 1.0 {
    out.push("Sparse reporting dampens the penalty".to_string());
  } else if breakdown.density_factor >= DENSITY_CAP {
    out.push("High incident volume doubles the penalty".to_string());
  }
  if breakdown.source_factor < 1.0 {
    out.push("Few independent sources dampen the penalty".to_string());
  } else if breakdown.source_factor > 1.0 {
    out.push("Corroboration across many sources amplifies the penalty".to_string());
  }
  out
}
