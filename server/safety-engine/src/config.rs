//! Engine configuration with sane defaults.
//!
//! Only the calling-layer knobs live here. Severity points, decay breakpoints,
//! compression constants and risk thresholds are fixed in their modules.

use std::env;

use crate::error::ConfigError;

pub const ENV_MAX_INCIDENTS: &str = "SAFETY_ENGINE_MAX_INCIDENTS";
pub const ENV_DEFAULT_TITLE: &str = "SAFETY_ENGINE_DEFAULT_TITLE";
pub const ENV_DEFAULT_SOURCE: &str = "SAFETY_ENGINE_DEFAULT_SOURCE";
pub const ENV_LOG: &str = "SAFETY_ENGINE_LOG";

#[derive(Debug, Clone)]
pub struct Config {
  /// Max incidents scored per request; extra items are dropped in feed order. 0 = no cap.
  pub max_incidents: usize,
  /// Title used when an item arrives without one.
  pub default_title: String,
  /// Source id used when an item arrives without one.
  pub default_source: String,
  /// Fallback tracing filter when `RUST_LOG` is unset.
  pub log_filter: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_incidents: 20,
      default_title: "Unknown Incident".to_string(),
      default_source: "Google News".to_string(),
      log_filter: "warn".to_string(),
    }
  }
}

impl Config {
  /// Defaults overridden by `SAFETY_ENGINE_*` variables (a `.env` file is loaded first if present).
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(raw) = lookup(ENV_MAX_INCIDENTS) {
      config.max_incidents = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidNumber {
          var: ENV_MAX_INCIDENTS,
          value: raw.clone(),
        })?;
    }
    if let Some(title) = lookup(ENV_DEFAULT_TITLE).filter(|s| !s.trim().is_empty()) {
      config.default_title = title;
    }
    if let Some(source) = lookup(ENV_DEFAULT_SOURCE).filter(|s| !s.trim().is_empty()) {
      config.default_source = source;
    }
    if let Some(filter) = lookup(ENV_LOG).filter(|s| !s.trim().is_empty()) {
      config.log_filter = filter;
    }

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn defaults_match_feed_layer() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config.max_incidents, 20);
    assert_eq!(config.default_title, "Unknown Incident");
    assert_eq!(config.default_source, "Google News");
    assert_eq!(config.log_filter, "warn");
  }

  #[test]
  fn env_overrides_apply() {
    let config = Config::from_lookup(lookup_from(&[
      (ENV_MAX_INCIDENTS, " 50 "),
      (ENV_DEFAULT_SOURCE, "wire"),
      (ENV_LOG, "debug"),
    ]))
    .unwrap();
    assert_eq!(config.max_incidents, 50);
    assert_eq!(config.default_source, "wire");
    assert_eq!(config.default_title, "Unknown Incident");
    assert_eq!(config.log_filter, "debug");
  }

  #[test]
  fn invalid_cap_is_rejected() {
    let err = Config::from_lookup(lookup_from(&[(ENV_MAX_INCIDENTS, "-3")])).unwrap_err();
    assert!(err.to_string().contains(ENV_MAX_INCIDENTS));
  }

  #[test]
  fn blank_overrides_are_ignored() {
    let config = Config::from_lookup(lookup_from(&[(ENV_DEFAULT_TITLE, "  ")])).unwrap();
    assert_eq!(config.default_title, "Unknown Incident");
  }
}
