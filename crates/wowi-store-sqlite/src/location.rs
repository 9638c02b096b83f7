//! Connection strings for the SQLite store.
//!
//! Accepted forms:
//!
//! - `sqlite:////var/lib/wowicache/cache.db`: absolute file path
//! - `sqlite:///cache.db`: path relative to the working directory
//! - `sqlite::memory:` or `sqlite://:memory:`: in-memory database

use std::{
  fmt,
  path::{Path, PathBuf},
  str::FromStr,
};

use crate::Error;

const FILE_PREFIX: &str = "sqlite:///";
const MEMORY_FORMS: [&str; 2] = ["sqlite::memory:", "sqlite://:memory:"];

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

impl Location {
  /// The database file, if the store is file-based and addressed absolutely.
  /// Only such stores can be backed up and restored.
  pub fn absolute_file(&self) -> Option<&Path> {
    match self {
      Self::File(path) if path.is_absolute() => Some(path),
      _ => None,
    }
  }
}

impl FromStr for Location {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let lowered = trimmed.to_ascii_lowercase();

    if MEMORY_FORMS.contains(&lowered.as_str()) {
      return Ok(Self::Memory);
    }
    if !lowered.starts_with("sqlite:") {
      return Err(Error::UnsupportedConnectionString(s.to_owned()));
    }
    if !lowered.starts_with(FILE_PREFIX) {
      return Err(Error::InvalidConnectionString(s.to_owned()));
    }

    let path = &trimmed[FILE_PREFIX.len()..];
    if path.is_empty() {
      return Err(Error::InvalidConnectionString(s.to_owned()));
    }
    Ok(Self::File(PathBuf::from(path)))
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Memory => f.write_str(MEMORY_FORMS[0]),
      Self::File(path) => write!(f, "{FILE_PREFIX}{}", path.display()),
    }
  }
}
