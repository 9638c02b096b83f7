//! Timestamped copies of a file-based store, and restore of the newest one.
//!
//! Only stores addressed as `sqlite:////absolute/path.db` qualify. Backups sit
//! flat in one directory as `<YYYYMMDD_HHMMSS>_<store file name>`; a second
//! backup within the same second is written as `<YYYYMMDD_HHMMSS>-1_<name>`
//! rather than over the first. "Newest" is decided by modification time alone.
//!
//! Both operations are best-effort. Failures are logged and reported as
//! `false`, never propagated.

use std::{
  fs,
  path::{Path, PathBuf},
  time::SystemTime,
};

use chrono::Local;
use tracing::{error, info, warn};
use wowi_store_sqlite::Location;

use crate::error::BackupError;

/// How many backups survive a [`BackupManager::backup`].
pub const RETAINED_BACKUPS: usize = 7;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct BackupManager {
  backup_dir: PathBuf,
  retain:     usize,
}

impl BackupManager {
  pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
    Self { backup_dir: backup_dir.into(), retain: RETAINED_BACKUPS }
  }

  /// Copy the store behind `connection_string` into the backup directory,
  /// then prune all but the newest backups.
  pub fn backup(&self, connection_string: &str) -> bool {
    match self.try_backup(connection_string) {
      Ok(path) => {
        info!(backup = %path.display(), "store backed up");
        true
      }
      Err(e) => {
        error!(error = %e, "backup failed");
        false
      }
    }
  }

  /// Copy the newest backup over the store behind `connection_string`.
  pub fn restore_latest(&self, connection_string: &str) -> bool {
    match self.try_restore(connection_string) {
      Ok(path) => {
        warn!(backup = %path.display(), "store restored from backup");
        true
      }
      Err(e) => {
        error!(error = %e, "restore failed");
        false
      }
    }
  }

  fn try_backup(&self, connection_string: &str) -> Result<PathBuf, BackupError> {
    let store = store_file(connection_string)?;
    let name = store
      .file_name()
      .ok_or_else(|| BackupError::UnsupportedStore(connection_string.to_owned()))?
      .to_string_lossy();

    fs::create_dir_all(&self.backup_dir).map_err(io(&self.backup_dir))?;
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let target = self.free_target(&stamp, &name);
    fs::copy(&store, &target).map_err(io(&store))?;

    self.prune()?;
    Ok(target)
  }

  /// `<stamp>_<name>`, or `<stamp>-<n>_<name>` with the smallest free `n`
  /// when a backup from the same second already exists.
  fn free_target(&self, stamp: &str, name: &str) -> PathBuf {
    let mut target = self.backup_dir.join(format!("{stamp}_{name}"));
    let mut n = 1;
    while target.exists() {
      target = self.backup_dir.join(format!("{stamp}-{n}_{name}"));
      n += 1;
    }
    target
  }

  fn try_restore(&self, connection_string: &str) -> Result<PathBuf, BackupError> {
    let store = store_file(connection_string)?;
    let newest = self
      .backups_newest_first()?
      .into_iter()
      .next()
      .ok_or_else(|| BackupError::NoBackups(self.backup_dir.clone()))?;
    fs::copy(&newest, &store).map_err(io(&store))?;
    Ok(newest)
  }

  /// Delete everything past the newest `retain` backups. A file that cannot
  /// be removed is logged and left in place.
  fn prune(&self) -> Result<(), BackupError> {
    for old in self.backups_newest_first()?.into_iter().skip(self.retain) {
      match fs::remove_file(&old) {
        Ok(()) => info!(backup = %old.display(), "old backup removed"),
        Err(e) => warn!(backup = %old.display(), error = %e, "could not remove old backup"),
      }
    }
    Ok(())
  }

  /// Regular files in the backup directory, newest modification first.
  fn backups_newest_first(&self) -> Result<Vec<PathBuf>, BackupError> {
    let entries = match fs::read_dir(&self.backup_dir) {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(io(&self.backup_dir)(e)),
    };

    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in entries {
      let entry = entry.map_err(io(&self.backup_dir))?;
      let path = entry.path();
      let meta = entry.metadata().map_err(io(&path))?;
      if meta.is_file() {
        files.push((meta.modified().map_err(io(&path))?, path));
      }
    }
    files.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(files.into_iter().map(|(_, path)| path).collect())
  }
}

/// The absolute database file behind a connection string.
fn store_file(connection_string: &str) -> Result<PathBuf, BackupError> {
  let location: Location = connection_string.parse()?;
  location
    .absolute_file()
    .map(Path::to_path_buf)
    .ok_or_else(|| BackupError::UnsupportedStore(connection_string.to_owned()))
}

fn io(path: &Path) -> impl Fn(std::io::Error) -> BackupError + '_ {
  move |source| BackupError::Io { path: path.to_path_buf(), source }
}
