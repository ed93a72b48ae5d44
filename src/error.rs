//! Errors surfaced by the stdin/stdout driver

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
