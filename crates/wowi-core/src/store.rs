//! The `CacheStore` trait and the batch types it consumes.
//!
//! The trait is implemented by storage backends (e.g. `wowi-store-sqlite`).
//! The sync orchestrator depends on this abstraction only.

use std::future::Future;

use crate::{
  kind::{ConflictPolicy, EntityKind, Table},
  record::Row,
};

// ─── Batch ───────────────────────────────────────────────────────────────────

/// All rows staged for one entity kind, written as a single unit.
#[derive(Debug, Clone)]
pub struct Batch {
  pub kind:        EntityKind,
  pub rows:        Vec<Row>,
  pub on_conflict: ConflictPolicy,
}

impl Batch {
  /// An empty batch using the kind's own conflict policy.
  pub fn new(kind: EntityKind) -> Self {
    Self { kind, rows: Vec::new(), on_conflict: kind.conflict_policy() }
  }

  pub fn push(&mut self, row: Row) { self.rows.push(row); }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Outcome of a committed [`Batch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteReport {
  pub inserted: usize,
  /// Rows dropped under [`ConflictPolicy::Skip`], in staging order.
  pub skipped:  Vec<Row>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the local relational cache.
///
/// Every kind is replaced wholesale: [`CacheStore::clear`] followed by one
/// [`CacheStore::write`]. There are no updates in place.
pub trait CacheStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Delete every row of every table owned by `kind` and commit. Returns the
  /// number of rows removed.
  fn clear(
    &self,
    kind: EntityKind,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Insert all rows of `batch` in one transaction and commit it.
  ///
  /// A key collision either rolls the whole batch back (returning an error)
  /// or drops the row and records it in [`WriteReport::skipped`], depending on
  /// `batch.on_conflict`. Any other failure rolls back.
  fn write(
    &self,
    batch: Batch,
  ) -> impl Future<Output = Result<WriteReport, Self::Error>> + Send + '_;

  /// Number of rows currently in `table`.
  fn count(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
