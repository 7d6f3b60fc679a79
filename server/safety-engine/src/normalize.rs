//! Normalize inbound feed items into canonical internal Incident models.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::EngineError;
use crate::types::*;

/// Parse and validate an InboundIncident into a canonical Incident.
pub fn normalize(raw: &InboundIncident, config: &Config) -> Result<Incident, EngineError> {
  let published_at = match raw.timestamp().map(str::trim) {
    Some(s) if !s.is_empty() => parse_timestamp(s, "publishedAt")?,
    _ => return Err(EngineError::invalid_input("publishedAt", "missing timestamp")),
  };

  let title = non_blank(raw.title.as_deref())
    .map(str::to_string)
    .unwrap_or_else(|| config.default_title.clone());

  let source_id = non_blank(raw.source_name())
    .map(|s| s.trim().to_string())
    .unwrap_or_else(|| config.default_source.clone());

  Ok(Incident {
    title,
    published_at,
    source_id,
  })
}

/// Parse the evaluation time with the same rules as incident timestamps.
pub fn parse_now(s: &str) -> Result<DateTime<Utc>, EngineError> {
  parse_timestamp(s.trim(), "now")
}

/// RFC 3339 first, then RFC 2822 (RSS `pubDate`). Always converted to UTC.
fn parse_timestamp(s: &str, field: &str) -> Result<DateTime<Utc>, EngineError> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  DateTime::parse_from_rfc2822(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| EngineError::invalid_input(field, &format!("invalid RFC3339/RFC2822 {:?}: {}", s, e)))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
  s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn inbound(title: Option<&str>, published_at: Option<&str>, source: Option<&str>) -> InboundIncident {
    InboundIncident {
      title: title.map(Into::into),
      published_at: published_at.map(Into::into),
      source_id: source.map(Into::into),
      ..Default::default()
    }
  }

  #[test]
  fn normalize_valid_incident() {
    let raw = inbound(
      Some("Robbery reported downtown"),
      Some("2025-01-15T10:30:00+05:30"),
      Some(" Hindustan Times "),
    );
    let incident = normalize(&raw, &Config::default()).unwrap();
    assert_eq!(incident.title, "Robbery reported downtown");
    assert_eq!(incident.source_id, "Hindustan Times");
    assert_eq!(
      incident.published_at,
      Utc.with_ymd_and_hms(2025, 1, 15, 5, 0, 0).unwrap()
    );
  }

  #[test]
  fn normalize_accepts_rss_pub_date() {
    let raw = inbound(Some("Theft"), Some("Wed, 15 Jan 2025 10:30:00 GMT"), Some("a"));
    let incident = normalize(&raw, &Config::default()).unwrap();
    assert_eq!(
      incident.published_at,
      Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
    );
  }

  #[test]
  fn normalize_rejects_missing_timestamp() {
    let raw = inbound(Some("Theft"), None, Some("a"));
    let err = normalize(&raw, &Config::default()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "publishedAt"));
  }

  #[test]
  fn normalize_rejects_garbage_timestamp() {
    let raw = inbound(Some("Theft"), Some("yesterday-ish"), Some("a"));
    let err = normalize(&raw, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("publishedAt"));
  }

  #[test]
  fn missing_title_and_source_use_defaults() {
    let raw = inbound(None, Some("2025-01-15T10:30:00Z"), Some("   "));
    let incident = normalize(&raw, &Config::default()).unwrap();
    assert_eq!(incident.title, "Unknown Incident");
    assert_eq!(incident.source_id, "Google News");
  }

  #[test]
  fn parse_now_reports_its_field() {
    let err = parse_now("not a time").unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "now"));
    assert!(parse_now(" 2025-01-15T10:30:00Z ").is_ok());
  }
}
