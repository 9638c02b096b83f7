//! Error type for `wowi-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("invalid connection string: {0:?}")]
  InvalidConnectionString(String),

  #[error("unsupported connection string {0:?}: only sqlite is supported")]
  UnsupportedConnectionString(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
