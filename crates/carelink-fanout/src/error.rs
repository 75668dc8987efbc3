//! Errors that abort a round.

use thiserror::Error;

/// An unexpected failure inside a round.
///
/// Never surfaces past [`crate::Dispatcher`]; it is logged and turned into
/// [`crate::RoundOutcome::Aborted`].
#[derive(Debug, Error)]
pub enum RoundError {
  #[error("account store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("round panicked: {0}")]
  Panicked(String),
}

impl RoundError {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}
