//! Error types for `carelink-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("emergency record has an empty seniorId")]
  MissingSeniorId,

  #[error("latitude out of range: {0}")]
  InvalidLatitude(f64),

  #[error("longitude out of range: {0}")]
  InvalidLongitude(f64),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
