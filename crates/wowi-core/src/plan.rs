//! Expansion and ordering of a requested set of entity kinds.
//!
//! The dependency graph is small and fixed, so the order is a static table
//! rather than a computed topological sort.

use std::{collections::BTreeSet, fmt};

use crate::kind::EntityKind;

/// The order in which kinds are synchronised. Every kind appears after all of
/// the kinds it references.
pub const SYNC_ORDER: [EntityKind; 7] = [
  EntityKind::Districts,
  EntityKind::EconomicUnits,
  EntityKind::Buildings,
  EntityKind::UseUnits,
  EntityKind::Persons,
  EntityKind::Contracts,
  EntityKind::Contractors,
];

/// An ordered, duplicate-free sequence of kinds to synchronise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncPlan {
  steps: Vec<EntityKind>,
}

impl SyncPlan {
  /// Expand `requested` with every implied kind and order the result.
  pub fn resolve(requested: impl IntoIterator<Item = EntityKind>) -> Self {
    let mut wanted: BTreeSet<EntityKind> = BTreeSet::new();
    let mut pending: Vec<EntityKind> = requested.into_iter().collect();

    while let Some(kind) = pending.pop() {
      if wanted.insert(kind) {
        pending.extend_from_slice(kind.implies());
      }
    }

    let steps = SYNC_ORDER
      .iter()
      .copied()
      .filter(|kind| wanted.contains(kind))
      .collect();

    Self { steps }
  }

  pub fn steps(&self) -> &[EntityKind] { &self.steps }

  pub fn contains(&self, kind: EntityKind) -> bool { self.steps.contains(&kind) }

  pub fn is_empty(&self) -> bool { self.steps.is_empty() }

  pub fn len(&self) -> usize { self.steps.len() }
}

impl<'a> IntoIterator for &'a SyncPlan {
  type Item = &'a EntityKind;
  type IntoIter = std::slice::Iter<'a, EntityKind>;

  fn into_iter(self) -> Self::IntoIter { self.steps.iter() }
}

impl fmt::Display for SyncPlan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names: Vec<&str> = self.steps.iter().map(|k| k.as_str()).collect();
    f.write_str(&names.join(" -> "))
  }
}
