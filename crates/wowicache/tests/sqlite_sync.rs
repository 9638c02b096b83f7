//! End-to-end runs of the orchestrator against an in-memory SQLite store.

use wowi_core::{
  EntityKind, Table,
  remote::{
    self, BuildingDetails, BuildingLand, IdRef, LicenseAgreement, NamedRef, NaturalPerson,
    PersonAddress,
  },
  source::RemoteSource,
  store::CacheStore,
};
use wowi_store_sqlite::SqliteStore;
use wowicache::{Error, SyncConfig, SyncOrchestrator};

#[derive(Debug, thiserror::Error)]
#[error("offline")]
struct Offline;

#[derive(Clone, Default)]
struct Snapshot {
  districts:          Vec<remote::District>,
  economic_units:     Vec<remote::EconomicUnit>,
  building_lands:     Vec<BuildingLand>,
  use_units:          Vec<remote::UseUnit>,
  persons:            Vec<remote::Person>,
  license_agreements: Vec<LicenseAgreement>,
  contractors:        Vec<remote::Contractor>,
}

impl RemoteSource for Snapshot {
  type Error = Offline;

  async fn districts(&self) -> Result<Vec<remote::District>, Offline> {
    Ok(self.districts.clone())
  }

  async fn economic_units(&self) -> Result<Vec<remote::EconomicUnit>, Offline> {
    Ok(self.economic_units.clone())
  }

  async fn building_lands(&self) -> Result<Vec<BuildingLand>, Offline> {
    Ok(self.building_lands.clone())
  }

  async fn use_units(&self) -> Result<Vec<remote::UseUnit>, Offline> {
    Ok(self.use_units.clone())
  }

  async fn persons(&self) -> Result<Vec<remote::Person>, Offline> { Ok(self.persons.clone()) }

  async fn license_agreements(&self) -> Result<Vec<LicenseAgreement>, Offline> {
    Ok(self.license_agreements.clone())
  }

  async fn contractors(&self) -> Result<Vec<remote::Contractor>, Offline> {
    Ok(self.contractors.clone())
  }
}

fn snapshot() -> Snapshot {
  let lookup = |id, name: &str| Some(NamedRef { id, name: Some(name.into()) });
  Snapshot {
    districts: vec![remote::District { id: 1, name: Some("Nord".into()) }],
    economic_units: vec![remote::EconomicUnit {
      id: 10,
      owner: Some(IdRef { id: 7 }),
      district: lookup(1, "Nord"),
      ..Default::default()
    }],
    building_lands: vec![BuildingLand {
      id: 100,
      economic_unit: Some(IdRef { id: 10 }),
      entry_date: Some("1999-12-31".into()),
      building: Some(BuildingDetails {
        building_type: lookup(5, "Mehrfamilienhaus"),
        ..Default::default()
      }),
      ..Default::default()
    }],
    use_units: vec![remote::UseUnit {
      id: 900,
      building_land: Some(IdRef { id: 100 }),
      economic_unit: Some(IdRef { id: 10 }),
      living_space: Some(72.5),
      ..Default::default()
    }],
    persons: vec![remote::Person {
      id: 42,
      natural_person: Some(NaturalPerson {
        last_name: Some("Doe".into()),
        ..Default::default()
      }),
      addresses: Some(vec![PersonAddress { id: 421, ..Default::default() }]),
      ..Default::default()
    }],
    license_agreements: vec![LicenseAgreement {
      id: 300,
      use_unit: Some(IdRef { id: 900 }),
      ..Default::default()
    }],
    contractors: vec![
      remote::Contractor {
        id: 1,
        license_agreement_id: Some(300),
        use_unit: Some(IdRef { id: 900 }),
        person: Some(IdRef { id: 42 }),
        contractor_type: lookup(1, "Hauptmieter"),
        ..Default::default()
      };
      2
    ],
  }
}

fn everything() -> SyncConfig {
  SyncConfig::new([
    EntityKind::EconomicUnits,
    EntityKind::Buildings,
    EntityKind::UseUnits,
    EntityKind::Contractors,
  ])
}

#[tokio::test]
async fn full_run_populates_every_table() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let o = SyncOrchestrator::new(store, snapshot(), everything());

  let report = o.run().await.unwrap();
  assert_eq!(report.kinds.len(), 7);
  assert_eq!(report.skipped(), 1);

  let expected = [
    (Table::Districts, 1),
    (Table::EconomicUnits, 1),
    (Table::Buildings, 1),
    (Table::BuildingTypes, 1),
    (Table::UseUnits, 1),
    (Table::Persons, 1),
    (Table::Addresses, 1),
    (Table::Communications, 0),
    (Table::Contracts, 1),
    (Table::Contractors, 1),
  ];
  for (table, n) in expected {
    assert_eq!(o.store().count(table).await.unwrap(), n, "{table}");
  }
}

#[tokio::test]
async fn second_run_replaces_rather_than_appends() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let o = SyncOrchestrator::new(store, snapshot(), everything());

  o.run().await.unwrap();
  let report = o.run().await.unwrap();

  assert_eq!(report.get(EntityKind::Persons).unwrap().deleted, 2);
  assert_eq!(o.store().count(Table::Persons).await.unwrap(), 1);
  assert_eq!(o.store().count(Table::Contractors).await.unwrap(), 1);
}

#[tokio::test]
async fn missing_required_reference_stops_the_run() {
  let mut data = snapshot();
  data.use_units[0].building_land = None;
  let store = SqliteStore::open_in_memory().await.unwrap();
  let o = SyncOrchestrator::new(store, data, everything());

  let err = o.run().await.unwrap_err();
  assert!(matches!(err, Error::Map { kind: EntityKind::UseUnits, .. }), "{err}");
  assert_eq!(o.store().count(Table::Buildings).await.unwrap(), 1);
  assert_eq!(o.store().count(Table::Persons).await.unwrap(), 0);
}
