//! Error types for the sync orchestrator and the backup manager.

use std::path::PathBuf;

use thiserror::Error;
use wowi_core::EntityKind;

/// A store or source error, boxed so the orchestrator stays generic over both.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A fatal failure of one sync step. The run stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
  #[error("clearing {kind}: {source}")]
  Clear { kind: EntityKind, source: BoxError },

  #[error("fetching {kind}: {source}")]
  Fetch { kind: EntityKind, source: BoxError },

  #[error("mapping {kind}: {source}")]
  Map { kind: EntityKind, source: wowi_core::Error },

  #[error("writing {kind}: {source}")]
  Write { kind: EntityKind, source: BoxError },
}

impl Error {
  /// The kind whose step failed.
  pub fn kind(&self) -> EntityKind {
    match self {
      Self::Clear { kind, .. }
      | Self::Fetch { kind, .. }
      | Self::Map { kind, .. }
      | Self::Write { kind, .. } => *kind,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a backup or restore did not happen. Only ever logged; the public
/// backup API reports a boolean.
#[derive(Debug, Error)]
pub enum BackupError {
  #[error("store {0:?} is not a file addressed by an absolute path")]
  UnsupportedStore(String),

  #[error(transparent)]
  ConnectionString(#[from] wowi_store_sqlite::Error),

  #[error("no backups found in {0}")]
  NoBackups(PathBuf),

  #[error("{}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}
