//! Entity kinds and the local tables that hold them.
//!
//! An [`EntityKind`] is the unit of synchronisation: one kind is wiped and
//! repopulated as a whole. A kind owns one or more [`Table`]s; persons, for
//! example, bring their addresses and communications with them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── EntityKind ──────────────────────────────────────────────────────────────

/// A synchronisable collection of the remote API.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
  Districts,
  EconomicUnits,
  Buildings,
  UseUnits,
  Persons,
  Contracts,
  Contractors,
}

impl EntityKind {
  pub const ALL: [EntityKind; 7] = [
    Self::Districts,
    Self::EconomicUnits,
    Self::Buildings,
    Self::UseUnits,
    Self::Persons,
    Self::Contracts,
    Self::Contractors,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Districts => "districts",
      Self::EconomicUnits => "economic_units",
      Self::Buildings => "buildings",
      Self::UseUnits => "use_units",
      Self::Persons => "persons",
      Self::Contracts => "contracts",
      Self::Contractors => "contractors",
    }
  }

  /// Kinds that are pulled into a run whenever this kind is requested.
  pub fn implies(self) -> &'static [EntityKind] {
    match self {
      Self::EconomicUnits | Self::Buildings => &[Self::Districts],
      Self::Contractors => &[Self::Persons, Self::Contracts],
      _ => &[],
    }
  }

  /// Kinds whose rows this kind references. When both are part of a run the
  /// referenced kind must be committed first.
  pub fn depends_on(self) -> &'static [EntityKind] {
    match self {
      Self::Districts | Self::Persons => &[],
      Self::EconomicUnits => &[Self::Districts],
      Self::Buildings => &[Self::Districts, Self::EconomicUnits],
      Self::UseUnits => &[Self::Buildings, Self::EconomicUnits],
      Self::Contracts => &[Self::UseUnits],
      Self::Contractors => &[Self::Contracts, Self::UseUnits, Self::Persons],
    }
  }

  /// Tables wiped and refilled by this kind, children before parents.
  pub fn tables(self) -> &'static [Table] {
    match self {
      Self::Districts => &[Table::Districts],
      Self::EconomicUnits => &[Table::EconomicUnits],
      Self::Buildings => &[Table::Buildings, Table::BuildingTypes],
      Self::UseUnits => &[Table::UseUnits],
      Self::Persons => &[Table::Communications, Table::Addresses, Table::Persons],
      Self::Contracts => &[Table::Contracts],
      Self::Contractors => &[Table::Contractors],
    }
  }

  /// How an insert that collides with an existing key is treated.
  pub fn conflict_policy(self) -> ConflictPolicy {
    match self {
      Self::Contractors => ConflictPolicy::Skip,
      _ => ConflictPolicy::Abort,
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EntityKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
    match normalised.as_str() {
      "districts" => Ok(Self::Districts),
      "economic_units" => Ok(Self::EconomicUnits),
      "buildings" => Ok(Self::Buildings),
      "use_units" => Ok(Self::UseUnits),
      "persons" => Ok(Self::Persons),
      "contracts" | "license_agreements" => Ok(Self::Contracts),
      "contractors" => Ok(Self::Contractors),
      _ => Err(Error::UnknownEntityKind(s.to_owned())),
    }
  }
}

// ─── ConflictPolicy ──────────────────────────────────────────────────────────

/// What a store does when a staged row collides with a key already written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
  /// The whole batch fails and is rolled back.
  Abort,
  /// The offending row is dropped and reported; the batch continues.
  Skip,
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// A local table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
  Districts,
  BuildingTypes,
  EconomicUnits,
  Buildings,
  UseUnits,
  Persons,
  Addresses,
  Communications,
  Contracts,
  Contractors,
}

impl Table {
  pub fn name(self) -> &'static str {
    match self {
      Self::Districts => "wowi_districts",
      Self::BuildingTypes => "wowi_building_types",
      Self::EconomicUnits => "wowi_economic_units",
      Self::Buildings => "wowi_buildings",
      Self::UseUnits => "wowi_use_units",
      Self::Persons => "wowi_persons",
      Self::Addresses => "wowi_addresses",
      Self::Communications => "wowi_communications",
      Self::Contracts => "wowi_contracts",
      Self::Contractors => "wowi_contractors",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
