//! The sync orchestrator: one full replace of each planned entity kind.
//!
//! For every kind in the resolved plan the orchestrator walks a fixed
//! sequence of [`StepState`]s:
//!
//! 1. **Deleting**: every table the kind owns is emptied and committed.
//! 2. **Fetching**: the complete remote collection is requested.
//! 3. **Inserting**: records are mapped one at a time and staged into a
//!    single [`Batch`], which the store writes in one transaction.
//! 4. **Committed**: the kind is visible to the kinds that follow.
//!
//! Any failure ends the run. Because the delete is committed on its own, a
//! failed fetch or insert leaves that kind empty until the next run. The one
//! recoverable case is a duplicate contractor key, which the store skips
//! under [`wowi_core::ConflictPolicy::Skip`] and the orchestrator logs.

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt,
};

use tracing::{debug, info, warn};
use wowi_core::{
  EntityKind, SyncPlan, map,
  record::{ContractorKey, Row},
  remote,
  source::RemoteSource,
  store::{Batch, CacheStore},
};

use crate::{Error, Result};

// ─── Configuration ───────────────────────────────────────────────────────────

/// What one run should synchronise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncConfig {
  pub requested: BTreeSet<EntityKind>,
}

impl SyncConfig {
  pub fn new(requested: impl IntoIterator<Item = EntityKind>) -> Self {
    Self { requested: requested.into_iter().collect() }
  }

  pub fn plan(&self) -> SyncPlan { SyncPlan::resolve(self.requested.iter().copied()) }
}

// ─── Step state ──────────────────────────────────────────────────────────────

/// Where a single kind's step currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
  Idle,
  Deleting,
  Fetching,
  Inserting,
  Committed,
}

impl StepState {
  /// The state that follows `self`, or `None` once committed.
  pub fn next(self) -> Option<Self> {
    match self {
      Self::Idle => Some(Self::Deleting),
      Self::Deleting => Some(Self::Fetching),
      Self::Fetching => Some(Self::Inserting),
      Self::Inserting => Some(Self::Committed),
      Self::Committed => None,
    }
  }
}

impl fmt::Display for StepState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Idle => "idle",
      Self::Deleting => "deleting",
      Self::Fetching => "fetching",
      Self::Inserting => "inserting",
      Self::Committed => "committed",
    })
  }
}

struct Step {
  kind:  EntityKind,
  state: StepState,
}

impl Step {
  fn new(kind: EntityKind) -> Self { Self { kind, state: StepState::Idle } }

  fn advance(&mut self) {
    if let Some(next) = self.state.next() {
      debug!(kind = %self.kind, from = %self.state, to = %next, "step transition");
      self.state = next;
    }
  }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Outcome of one committed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindReport {
  pub kind:     EntityKind,
  /// Rows removed across all of the kind's tables.
  pub deleted:  u64,
  /// Top-level remote records received.
  pub fetched:  usize,
  /// Rows inserted across all of the kind's tables.
  pub inserted: usize,
  pub skipped:  Vec<ContractorKey>,
}

/// Outcome of a completed run, one entry per plan step in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub kinds: Vec<KindReport>,
}

impl SyncReport {
  pub fn get(&self, kind: EntityKind) -> Option<&KindReport> {
    self.kinds.iter().find(|r| r.kind == kind)
  }

  pub fn inserted(&self) -> usize { self.kinds.iter().map(|r| r.inserted).sum() }

  pub fn skipped(&self) -> usize { self.kinds.iter().map(|r| r.skipped.len()).sum() }
}

// ─── Fetched collections ─────────────────────────────────────────────────────

/// A complete remote collection for one kind.
#[derive(Debug)]
pub enum Fetched {
  Districts(Vec<remote::District>),
  EconomicUnits(Vec<remote::EconomicUnit>),
  Buildings(Vec<remote::BuildingLand>),
  UseUnits(Vec<remote::UseUnit>),
  Persons(Vec<remote::Person>),
  Contracts(Vec<remote::LicenseAgreement>),
  Contractors(Vec<remote::Contractor>),
}

impl Fetched {
  pub fn kind(&self) -> EntityKind {
    match self {
      Self::Districts(_) => EntityKind::Districts,
      Self::EconomicUnits(_) => EntityKind::EconomicUnits,
      Self::Buildings(_) => EntityKind::Buildings,
      Self::UseUnits(_) => EntityKind::UseUnits,
      Self::Persons(_) => EntityKind::Persons,
      Self::Contracts(_) => EntityKind::Contracts,
      Self::Contractors(_) => EntityKind::Contractors,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      Self::Districts(v) => v.len(),
      Self::EconomicUnits(v) => v.len(),
      Self::Buildings(v) => v.len(),
      Self::UseUnits(v) => v.len(),
      Self::Persons(v) => v.len(),
      Self::Contracts(v) => v.len(),
      Self::Contractors(v) => v.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Map every record of `fetched` and stage the rows into one batch.
///
/// Persons contribute their addresses and communications; buildings
/// contribute the distinct building types they reference (first name seen
/// wins).
pub fn stage(fetched: Fetched) -> wowi_core::Result<Batch> {
  let mut batch = Batch::new(fetched.kind());
  match fetched {
    Fetched::Districts(records) => {
      for r in records {
        batch.push(Row::District(map::district(r)?));
      }
    }
    Fetched::EconomicUnits(records) => {
      for r in records {
        batch.push(Row::EconomicUnit(map::economic_unit(r)?));
      }
    }
    Fetched::Buildings(records) => {
      let mut types = BTreeMap::new();
      for r in records {
        let building = map::building(r)?;
        if let Some(t) = map::building_type(&building) {
          types.entry(t.internal_id).or_insert(t);
        }
        batch.push(Row::Building(building));
      }
      for t in types.into_values() {
        batch.push(Row::BuildingType(t));
      }
    }
    Fetched::UseUnits(records) => {
      for r in records {
        batch.push(Row::UseUnit(map::use_unit(r)?));
      }
    }
    Fetched::Persons(records) => {
      for r in records {
        for row in map::person_rows(r)? {
          batch.push(row);
        }
      }
    }
    Fetched::Contracts(records) => {
      for r in records {
        batch.push(Row::Contract(map::contract(r)?));
      }
    }
    Fetched::Contractors(records) => {
      for r in records {
        batch.push(Row::Contractor(map::contractor(r)?));
      }
    }
  }
  Ok(batch)
}

// ─── Orchestrator ────────────────────────────────────────────────────────────

/// Drives a [`CacheStore`] from a [`RemoteSource`], one kind at a time.
pub struct SyncOrchestrator<S, R> {
  store:  S,
  source: R,
  config: SyncConfig,
}

impl<S, R> SyncOrchestrator<S, R>
where
  S: CacheStore,
  R: RemoteSource,
{
  pub fn new(store: S, source: R, config: SyncConfig) -> Self { Self { store, source, config } }

  pub fn store(&self) -> &S { &self.store }

  /// Synchronise every kind of the resolved plan, in order. Stops at the
  /// first fatal error; kinds committed before it stay committed.
  pub async fn run(&self) -> Result<SyncReport> {
    let plan = self.config.plan();
    if plan.is_empty() {
      info!("no entity kinds enabled, nothing to do");
      return Ok(SyncReport::default());
    }
    info!(%plan, steps = plan.len(), "sync started");

    let mut report = SyncReport::default();
    for &kind in &plan {
      report.kinds.push(self.sync_kind(kind).await?);
    }

    info!(
      kinds = report.kinds.len(),
      inserted = report.inserted(),
      skipped = report.skipped(),
      "sync finished"
    );
    Ok(report)
  }

  async fn sync_kind(&self, kind: EntityKind) -> Result<KindReport> {
    let mut step = Step::new(kind);
    info!(%kind, "syncing");

    step.advance();
    let deleted = self
      .store
      .clear(kind)
      .await
      .map_err(|e| Error::Clear { kind, source: Box::new(e) })?;

    step.advance();
    let fetched = self
      .fetch(kind)
      .await
      .map_err(|e| Error::Fetch { kind, source: Box::new(e) })?;
    let fetched_len = fetched.len();
    if fetched.is_empty() {
      warn!(%kind, "remote returned no records, kind stays empty");
    }

    step.advance();
    let batch = stage(fetched).map_err(|source| Error::Map { kind, source })?;
    let written = self
      .store
      .write(batch)
      .await
      .map_err(|e| Error::Write { kind, source: Box::new(e) })?;

    let skipped: Vec<ContractorKey> = written
      .skipped
      .iter()
      .filter_map(|row| match row {
        Row::Contractor(c) => Some(c.key()),
        _ => None,
      })
      .collect();
    for key in &skipped {
      warn!(%kind, "skipped duplicate {key}");
    }

    step.advance();
    info!(
      %kind,
      deleted,
      fetched = fetched_len,
      inserted = written.inserted,
      skipped = skipped.len(),
      "committed"
    );

    Ok(KindReport {
      kind,
      deleted,
      fetched: fetched_len,
      inserted: written.inserted,
      skipped,
    })
  }

  async fn fetch(&self, kind: EntityKind) -> Result<Fetched, R::Error> {
    Ok(match kind {
      EntityKind::Districts => Fetched::Districts(self.source.districts().await?),
      EntityKind::EconomicUnits => Fetched::EconomicUnits(self.source.economic_units().await?),
      EntityKind::Buildings => Fetched::Buildings(self.source.building_lands().await?),
      EntityKind::UseUnits => Fetched::UseUnits(self.source.use_units().await?),
      EntityKind::Persons => Fetched::Persons(self.source.persons().await?),
      EntityKind::Contracts => Fetched::Contracts(self.source.license_agreements().await?),
      EntityKind::Contractors => Fetched::Contractors(self.source.contractors().await?),
    })
  }
}
