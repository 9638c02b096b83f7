//! Error types for `wowi-client`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The API answered with a non-success status.
  #[error("GET {path} returned {status}")]
  Status { path: String, status: StatusCode },

  #[error("authentication failed: {0}")]
  Auth(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
