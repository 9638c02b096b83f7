//! Error types for `wowi-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A date field did not match `YYYY-MM-DD`.
  #[error("invalid date in {field}: {value:?}")]
  InvalidDate { field: &'static str, value: String },

  /// A reference the local schema stores as NOT NULL was absent.
  #[error("{entity} {id}: required reference `{field}` is missing")]
  MissingReference {
    entity: &'static str,
    id:     i64,
    field:  &'static str,
  },

  /// A value the local schema stores as NOT NULL was absent.
  #[error("{entity} {id}: required field `{field}` is missing")]
  MissingField {
    entity: &'static str,
    id:     i64,
    field:  &'static str,
  },

  #[error("unknown entity kind: {0:?}")]
  UnknownEntityKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
