//! Error type for `carelink-fcm`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// FCM answered with a non-success status.
  #[error("fcm rejected message ({status}): {body}")]
  Rejected { status: u16, body: String },

  #[error("invalid fcm config: {0}")]
  InvalidConfig(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
