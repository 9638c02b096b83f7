//! [`SqliteStore`]: the SQLite implementation of [`CacheStore`].

use std::path::Path;

use tracing::debug;
use wowi_core::{
  ConflictPolicy, EntityKind, Table,
  store::{Batch, CacheStore, WriteReport},
};

use crate::{
  Result,
  encode::{insert_row, is_key_conflict},
  location::Location,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A wowicache mirror backed by a single SQLite database.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and create missing tables.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store a connection string points at.
  pub async fn connect(connection_string: &str) -> Result<Self> {
    match connection_string.parse::<Location>()? {
      Location::Memory => Self::open_in_memory().await,
      Location::File(path) => Self::open(path).await,
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CacheStore impl ─────────────────────────────────────────────────────────

impl CacheStore for SqliteStore {
  type Error = crate::Error;

  async fn clear(&self, kind: EntityKind) -> Result<u64> {
    let tables = kind.tables();

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut removed = 0u64;
        for table in tables {
          removed += tx.execute(&format!("DELETE FROM {}", table.name()), [])? as u64;
        }
        tx.commit()?;
        Ok(removed)
      })
      .await?;

    debug!(%kind, removed, "cleared");
    Ok(removed)
  }

  async fn write(&self, batch: Batch) -> Result<WriteReport> {
    debug!(
      kind = %batch.kind,
      rows = batch.len(),
      on_conflict = ?batch.on_conflict,
      "writing batch"
    );
    if batch.is_empty() {
      return Ok(WriteReport::default());
    }
    let Batch { rows, on_conflict, .. } = batch;

    // Dropping the transaction on an early return rolls it back.
    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = WriteReport::default();
        for row in rows {
          match insert_row(&tx, &row) {
            Ok(()) => report.inserted += 1,
            Err(e) if on_conflict == ConflictPolicy::Skip && is_key_conflict(&e) => {
              report.skipped.push(row);
            }
            Err(e) => return Err(e.into()),
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;

    Ok(report)
  }

  async fn count(&self, table: Table) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table.name()), [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    Ok(n as u64)
  }
}
