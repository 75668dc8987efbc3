//! Error type for `carelink-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("account id must not be empty")]
  EmptyAccountId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
