//! Structured error types for the safety engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("invalid input: {field}: {reason}")]
  InvalidInput { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn invalid_input(field: &str, reason: &str) -> Self {
    Self::InvalidInput {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

/// Configuration could not be read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{var}: expected a non-negative integer, got {value:?}")]
  InvalidNumber { var: &'static str, value: String },
}
