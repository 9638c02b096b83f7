//! Field mapping from remote records to local rows.
//!
//! All functions are pure. An absent nested object nulls every column derived
//! from it; only references the local schema stores as NOT NULL are an error.
//! Dates are parsed here, so a malformed date fails the record.

use crate::{
  Error, Result,
  date::parse_date,
  record::{
    Address, Building, BuildingType, Communication, Contract, Contractor, District,
    EconomicUnit, EstateAddress, Person, Row, UseUnit,
  },
  remote,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn require_ref<T>(
  entity: &'static str,
  id: i64,
  field: &'static str,
  value: Option<T>,
) -> Result<T> {
  value.ok_or(Error::MissingReference { entity, id, field })
}

fn require_field<T>(
  entity: &'static str,
  id: i64,
  field: &'static str,
  value: Option<T>,
) -> Result<T> {
  value.ok_or(Error::MissingField { entity, id, field })
}

/// Split a lookup into its `(id, name)` column pair.
fn lookup(value: Option<remote::NamedRef>) -> (Option<i64>, Option<String>) {
  match value {
    Some(r) => (Some(r.id), r.name),
    None => (None, None),
  }
}

fn id_of(value: Option<remote::IdRef>) -> Option<i64> { value.map(|r| r.id) }

fn estate_address(value: Option<remote::EstateAddress>) -> EstateAddress {
  let Some(a) = value else {
    return EstateAddress::default();
  };
  EstateAddress {
    postcode:              a.postcode,
    town:                  a.town,
    street:                a.street,
    house_number:          a.house_number,
    house_number_addition: a.house_number_addition,
    country_id:            a.country_id,
    country:               a.country_code,
    street_complete:       a.street_complete,
    house_number_complete: a.house_number_complete,
  }
}

// ─── Inventory ───────────────────────────────────────────────────────────────

pub fn district(src: remote::District) -> Result<District> {
  Ok(District {
    internal_id: src.id,
    name:        require_field("district", src.id, "name", src.name)?,
  })
}

pub fn economic_unit(src: remote::EconomicUnit) -> Result<EconomicUnit> {
  let id = src.id;
  Ok(EconomicUnit {
    internal_id:       id,
    id_num:            src.id_num,
    company_id:        id_of(src.company_code),
    name:              src.name,
    location:          src.location,
    construction_year: src.construction_year,
    info:              src.info,
    owner_id:          require_ref("economic unit", id, "owner", id_of(src.owner))?,
    district_id:       src.district.map(|d| d.id),
  })
}

pub fn building(src: remote::BuildingLand) -> Result<Building> {
  let id = src.id;
  let economic_unit_id =
    require_ref("building", id, "economic_unit", id_of(src.economic_unit))?;
  let entry_date = parse_date("entry_date", src.entry_date.as_deref())?;
  let (land_type_id, land_type) = lookup(src.building_land_type);

  let details = src.building.unwrap_or_default();
  let move_in_date = parse_date("move_in_date", details.move_in_date.as_deref())?;
  let (building_type_id, building_type_name) = lookup(details.building_type);

  Ok(Building {
    internal_id: id,
    id_num: src.id_num,
    company_id: id_of(src.company_code),
    building_land_type_id: land_type_id,
    building_land_type: land_type,
    entry_date,
    economic_unit_id,
    address: estate_address(src.estate_address),
    construction_year: details.construction_year,
    move_in_date,
    building_type_id,
    building_type_name,
    district_id: details.district.map(|d| d.id),
  })
}

/// The building type a building row refers to, if any.
pub fn building_type(building: &Building) -> Option<BuildingType> {
  building.building_type_id.map(|internal_id| BuildingType {
    internal_id,
    name: building.building_type_name.clone(),
  })
}

pub fn use_unit(src: remote::UseUnit) -> Result<UseUnit> {
  let id = src.id;
  let building_id = require_ref("use unit", id, "building_land", id_of(src.building_land))?;
  let economic_unit_id =
    require_ref("use unit", id, "economic_unit", id_of(src.economic_unit))?;

  let (financing_type_id, financing_type) = lookup(src.financing_type);
  let (usage_type_id, usage_type) =
    lookup(src.current_use_unit_type.and_then(|t| t.use_unit_usage_type));
  let (position_id, position) = lookup(src.position);
  let (floor_id, floor_name, floor_level) = match src.floor {
    Some(f) => (Some(f.id), f.name, f.level_to_ground),
    None => (None, None, None),
  };

  Ok(UseUnit {
    internal_id: id,
    id_num: src.id_num,
    company_id: id_of(src.company_code),
    building_id,
    economic_unit_id,
    address: estate_address(src.estate_address),
    financing_type_id,
    financing_type,
    use_unit_usage_type_id: usage_type_id,
    use_unit_usage_type: usage_type,
    usable_space: src.usable_space,
    living_space: src.living_space,
    heating_space: src.heating_space,
    number_of_rooms: src.number_of_rooms,
    number_of_half_rooms: src.number_of_half_rooms,
    position_description: src.description_of_position,
    management_start: parse_date("management_start", src.management_start.as_deref())?,
    management_end: parse_date("management_end", src.management_end.as_deref())?,
    move_in_date: parse_date("move_in_date", src.move_in_date.as_deref())?,
    exit_date: parse_date("exit_date", src.exit_date.as_deref())?,
    entry_date: parse_date("entry_date", src.entry_date.as_deref())?,
    position_id,
    position,
    floor_id,
    floor_name,
    floor_level,
  })
}

// ─── Persons ─────────────────────────────────────────────────────────────────

/// Map the person itself, leaving its addresses and communications aside.
pub fn person(src: &remote::Person) -> Result<Person> {
  let legal = src.legal_person.clone().unwrap_or_default();
  let natural = src.natural_person.clone().unwrap_or_default();
  let (gender_id, gender_name) = lookup(natural.gender);
  let is_natural_person = natural.first_name.is_some() || natural.last_name.is_some();

  Ok(Person {
    internal_id: src.id,
    id_num: src.id_num.clone(),
    name: src.name.clone(),
    short_name: src.short_name.clone(),
    valid_from: parse_date("valid_from", src.valid_from.as_deref())?,
    valid_to: parse_date("valid_to", src.valid_to.as_deref())?,
    long_name_1: legal.long_name1,
    long_name_2: legal.long_name2,
    vat_id: legal.vat_id,
    commercial_register_number: legal.commercial_register_number,
    commercial_register_town: legal.commercial_register_town,
    first_name: natural.first_name,
    last_name: natural.last_name,
    birth_date: parse_date("birth_date", natural.birth_date.as_deref())?,
    gender_id,
    gender_name,
    is_natural_person,
  })
}

pub fn address(person_id: i64, src: remote::PersonAddress) -> Result<Address> {
  let (address_type_id, address_type) = lookup(src.address_type);
  let (country_id, country) = match src.country {
    Some(c) => (Some(c.id), c.code),
    None => (None, None),
  };

  Ok(Address {
    internal_id: src.id,
    person_id,
    postcode: src.postcode,
    town: src.town,
    street: src.street,
    house_number: src.house_number,
    house_number_addition: src.house_number_addition,
    country_id,
    country,
    street_complete: src.street_complete,
    house_number_complete: src.house_number_complete,
    address_type_id,
    address_type,
    valid_from: parse_date("valid_from", src.valid_from.as_deref())?,
    valid_to: parse_date("valid_to", src.valid_to.as_deref())?,
  })
}

pub fn communication(person_id: i64, src: remote::Communication) -> Communication {
  let (communication_type_id, communication_type) = lookup(src.communication_type);
  Communication {
    internal_id: src.id,
    person_id,
    related_address_id: src.related_address_id,
    content: src.content,
    explanation: src.explanation,
    communication_type_id,
    communication_type,
  }
}

/// Map a person together with its nested addresses and communications, all
/// linked to the person's id. The person row comes first.
pub fn person_rows(mut src: remote::Person) -> Result<Vec<Row>> {
  let person = person(&src)?;
  let person_id = person.internal_id;
  let addresses = src.addresses.take().unwrap_or_default();
  let communications = src.communications.take().unwrap_or_default();

  let mut rows = Vec::with_capacity(1 + addresses.len() + communications.len());
  rows.push(Row::Person(person));
  for a in addresses {
    rows.push(Row::Address(address(person_id, a)?));
  }
  for c in communications {
    rows.push(Row::Communication(communication(person_id, c)));
  }
  Ok(rows)
}

// ─── Contracts ───────────────────────────────────────────────────────────────

pub fn contract(src: remote::LicenseAgreement) -> Result<Contract> {
  let id = src.id;
  let (restriction_id, restriction_name, is_vacancy) = match src.restriction_of_use {
    Some(r) => (Some(r.id), r.name, r.is_vacancy),
    None => (None, None, None),
  };
  let (status_id, status_name) = lookup(src.status_contract);
  let (life_id, life_name) = lookup(src.life_of_contract);

  Ok(Contract {
    internal_id: id,
    id_num: src.id_num,
    use_unit_id: require_ref("contract", id, "use_unit", id_of(src.use_unit))?,
    restriction_id,
    restriction_name,
    is_vacancy,
    status_id,
    status_name,
    life_id,
    life_name,
    contract_start: parse_date("start_contract", src.start_contract.as_deref())?,
    contract_end: parse_date("end_of_contract", src.end_of_contract.as_deref())?,
  })
}

pub fn contractor(src: remote::Contractor) -> Result<Contractor> {
  let id = src.id;
  let contract_id =
    require_ref("contractor", id, "license_agreement_id", src.license_agreement_id)?;
  let use_unit_id = require_ref("contractor", id, "use_unit", id_of(src.use_unit))?;
  let person_id = require_ref("contractor", id, "person", id_of(src.person))?;
  let contractor_type =
    require_ref("contractor", id, "contractor_type", src.contractor_type)?;

  Ok(Contractor {
    internal_id: id,
    contract_id,
    type_id: contractor_type.id,
    use_unit_id,
    person_id,
    type_name: contractor_type.name,
    valid_from: parse_date(
      "contractual_use_valid_from",
      src.contractual_use_valid_from.as_deref(),
    )?,
    valid_to: parse_date(
      "contractual_use_valid_to",
      src.contractual_use_valid_to.as_deref(),
    )?,
  })
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use serde_json::json;

  use super::*;
  use crate::remote::{IdRef, NamedRef};

  fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> { NaiveDate::from_ymd_opt(y, m, d) }

  fn named(id: i64, name: &str) -> Option<NamedRef> {
    Some(NamedRef { id, name: Some(name.into()) })
  }

  // ── Districts / economic units ───────────────────────────────────────────

  #[test]
  fn district_requires_a_name() {
    let ok = district(remote::District { id: 3, name: Some("Nord".into()) }).unwrap();
    assert_eq!(ok.name, "Nord");

    let err = district(remote::District { id: 4, name: None }).unwrap_err();
    assert!(matches!(err, Error::MissingField { id: 4, field: "name", .. }));
  }

  #[test]
  fn economic_unit_without_district_has_null_district() {
    let unit = economic_unit(remote::EconomicUnit {
      id: 10,
      owner: Some(IdRef { id: 1 }),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(unit.district_id, None);
    assert_eq!(unit.company_id, None);
    assert_eq!(unit.owner_id, 1);
  }

  #[test]
  fn economic_unit_requires_an_owner() {
    let err = economic_unit(remote::EconomicUnit { id: 11, ..Default::default() }).unwrap_err();
    assert!(matches!(err, Error::MissingReference { field: "owner", .. }));
  }

  // ── Buildings ────────────────────────────────────────────────────────────

  #[test]
  fn building_from_api_json() {
    let src: remote::BuildingLand = serde_json::from_value(json!({
      "Id": 501,
      "IdNum": "001.01",
      "CompanyCode": { "Id": 1 },
      "BuildingLandType": { "Id": 1, "Name": "Gebäude" },
      "EntryDate": "2001-01-01",
      "EconomicUnit": { "Id": 77 },
      "EstateAddress": {
        "Street": "Teststraße",
        "Postcode": "12345",
        "Town": "Musterstadt",
        "HouseNumber": "5",
        "CountryId": 49,
        "CountryCode": "DE",
        "StreetComplete": "Teststraße 5"
      },
      "Building": {
        "District": { "Id": 3, "Name": "Nord" },
        "MoveInDate": "2002-03-04",
        "ConstructionYear": 1972,
        "BuildingType": { "Id": 2, "Name": "Mehrfamilienhaus" }
      }
    }))
    .unwrap();

    let b = building(src).unwrap();
    assert_eq!(b.economic_unit_id, 77);
    assert_eq!(b.address.postcode.as_deref(), Some("12345"));
    assert_eq!(b.address.street.as_deref(), Some("Teststraße"));
    assert_eq!(b.address.country.as_deref(), Some("DE"));
    assert_eq!(b.entry_date, date(2001, 1, 1));
    assert_eq!(b.move_in_date, date(2002, 3, 4));
    assert_eq!(b.building_type_id, Some(2));
    assert_eq!(b.building_type_name.as_deref(), Some("Mehrfamilienhaus"));
    assert_eq!(b.building_land_type.as_deref(), Some("Gebäude"));
    assert_eq!(b.district_id, Some(3));

    let bt = building_type(&b).unwrap();
    assert_eq!(bt.internal_id, 2);
  }

  #[test]
  fn building_without_details_is_null_safe() {
    let b = building(remote::BuildingLand {
      id: 1,
      economic_unit: Some(IdRef { id: 9 }),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(b.district_id, None);
    assert_eq!(b.building_type_id, None);
    assert_eq!(b.building_type_name, None);
    assert_eq!(b.address, EstateAddress::default());
    assert!(building_type(&b).is_none());
  }

  #[test]
  fn building_requires_economic_unit() {
    let err = building(remote::BuildingLand { id: 1, ..Default::default() }).unwrap_err();
    assert!(matches!(err, Error::MissingReference { field: "economic_unit", .. }));
  }

  #[test]
  fn malformed_building_date_fails() {
    let err = building(remote::BuildingLand {
      id: 1,
      economic_unit: Some(IdRef { id: 9 }),
      entry_date: Some("01.01.2001".into()),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::InvalidDate { field: "entry_date", .. }));
  }

  // ── Use units ────────────────────────────────────────────────────────────

  #[test]
  fn use_unit_denormalises_lookups() {
    let u = use_unit(remote::UseUnit {
      id: 900,
      building_land: Some(IdRef { id: 501 }),
      economic_unit: Some(IdRef { id: 77 }),
      financing_type: named(4, "frei finanziert"),
      current_use_unit_type: Some(remote::UseUnitType {
        use_unit_usage_type: named(1, "Wohnung"),
      }),
      position: named(2, "links"),
      floor: Some(remote::Floor { id: 5, name: Some("1. OG".into()), level_to_ground: Some(1.0) }),
      living_space: Some(71.5),
      number_of_rooms: Some(3),
      management_start: Some("2010-07-01".into()),
      ..Default::default()
    })
    .unwrap();

    assert_eq!((u.building_id, u.economic_unit_id), (501, 77));
    assert_eq!(u.financing_type_id, Some(4));
    assert_eq!(u.financing_type.as_deref(), Some("frei finanziert"));
    assert_eq!(u.use_unit_usage_type.as_deref(), Some("Wohnung"));
    assert_eq!(u.position_id, Some(2));
    assert_eq!((u.floor_id, u.floor_level), (Some(5), Some(1.0)));
    assert_eq!(u.management_start, date(2010, 7, 1));
    assert_eq!(u.management_end, None);
  }

  #[test]
  fn use_unit_without_lookups_has_null_pairs() {
    let u = use_unit(remote::UseUnit {
      id: 901,
      building_land: Some(IdRef { id: 501 }),
      economic_unit: Some(IdRef { id: 77 }),
      current_use_unit_type: Some(remote::UseUnitType { use_unit_usage_type: None }),
      ..Default::default()
    })
    .unwrap();

    assert_eq!((u.financing_type_id, u.financing_type), (None, None));
    assert_eq!((u.use_unit_usage_type_id, u.use_unit_usage_type), (None, None));
    assert_eq!((u.position_id, u.position), (None, None));
    assert_eq!((u.floor_id, u.floor_name, u.floor_level), (None, None, None));
  }

  #[test]
  fn use_unit_requires_building() {
    let err = use_unit(remote::UseUnit {
      id: 902,
      economic_unit: Some(IdRef { id: 77 }),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::MissingReference { field: "building_land", .. }));
  }

  // ── Persons ──────────────────────────────────────────────────────────────

  #[test]
  fn person_without_names_is_not_natural() {
    let p = person(&remote::Person {
      id: 1,
      legal_person: Some(remote::LegalPerson {
        long_name1: Some("Muster GmbH".into()),
        ..Default::default()
      }),
      natural_person: Some(remote::NaturalPerson::default()),
      ..Default::default()
    })
    .unwrap();
    assert!(!p.is_natural_person);
    assert_eq!(p.long_name_1.as_deref(), Some("Muster GmbH"));
  }

  #[test]
  fn person_with_first_name_is_natural() {
    let p = person(&remote::Person {
      id: 2,
      natural_person: Some(remote::NaturalPerson {
        first_name: Some("Jane".into()),
        birth_date: Some("1980-02-29".into()),
        gender: named(2, "weiblich"),
        ..Default::default()
      }),
      ..Default::default()
    })
    .unwrap();
    assert!(p.is_natural_person);
    assert_eq!(p.birth_date, date(1980, 2, 29));
    assert_eq!(p.gender_name.as_deref(), Some("weiblich"));
  }

  #[test]
  fn person_with_only_last_name_is_natural() {
    let p = person(&remote::Person {
      id: 3,
      natural_person: Some(remote::NaturalPerson {
        last_name: Some("Doe".into()),
        ..Default::default()
      }),
      ..Default::default()
    })
    .unwrap();
    assert!(p.is_natural_person);
  }

  #[test]
  fn person_without_any_sub_objects_is_null_safe() {
    let p = person(&remote::Person { id: 4, ..Default::default() }).unwrap();
    assert!(!p.is_natural_person);
    assert_eq!((p.gender_id, p.gender_name), (None, None));
    assert_eq!(p.vat_id, None);
  }

  #[test]
  fn person_rows_link_children_to_the_person() {
    let rows = person_rows(remote::Person {
      id: 42,
      addresses: Some(vec![remote::PersonAddress {
        id: 7,
        street: Some("Hauptstraße".into()),
        postcode: Some("54321".into()),
        country: Some(remote::Country { id: 49, code: Some("DE".into()) }),
        valid_from: Some("2020-01-01".into()),
        ..Default::default()
      }]),
      communications: Some(vec![remote::Communication {
        id: 8,
        related_address_id: Some(7),
        content: Some("jane@example.com".into()),
        communication_type: named(3, "E-Mail"),
        ..Default::default()
      }]),
      ..Default::default()
    })
    .unwrap();

    assert_eq!(rows.len(), 3);
    assert!(matches!(&rows[0], Row::Person(p) if p.internal_id == 42));
    let Row::Address(a) = &rows[1] else { panic!("expected address, got {:?}", rows[1]) };
    assert_eq!(a.person_id, 42);
    assert_eq!(a.postcode.as_deref(), Some("54321"));
    assert_eq!(a.country.as_deref(), Some("DE"));
    assert_eq!(a.valid_from, date(2020, 1, 1));
    assert_eq!(a.valid_to, None);
    let Row::Communication(c) = &rows[2] else { panic!("expected communication") };
    assert_eq!((c.person_id, c.related_address_id), (42, Some(7)));
    assert_eq!(c.communication_type.as_deref(), Some("E-Mail"));
  }

  #[test]
  fn malformed_address_date_fails_the_person() {
    let err = person_rows(remote::Person {
      id: 42,
      addresses: Some(vec![remote::PersonAddress {
        id: 7,
        valid_to: Some("31.12.2020".into()),
        ..Default::default()
      }]),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::InvalidDate { field: "valid_to", .. }));
  }

  // ── Contracts ────────────────────────────────────────────────────────────

  #[test]
  fn contract_copies_vacancy_flag() {
    let c = contract(remote::LicenseAgreement {
      id: 300,
      use_unit: Some(IdRef { id: 900 }),
      restriction_of_use: Some(remote::RestrictionOfUse {
        id: 9,
        name: Some("Leerstand".into()),
        is_vacancy: Some(true),
      }),
      start_contract: Some("2023-05-01".into()),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(c.is_vacancy, Some(true));
    assert_eq!(c.restriction_name.as_deref(), Some("Leerstand"));
    assert_eq!(c.contract_start, date(2023, 5, 1));
    assert_eq!(c.contract_end, None);
    assert_eq!((c.status_id, c.life_id), (None, None));
  }

  #[test]
  fn contractor_key_is_composite() {
    let c = contractor(remote::Contractor {
      id: 1,
      license_agreement_id: Some(300),
      use_unit: Some(IdRef { id: 900 }),
      person: Some(IdRef { id: 42 }),
      contractor_type: named(1, "Hauptmieter"),
      contractual_use_valid_from: Some("2023-05-01".into()),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(c.key().to_string(), "contractor 1 (contract 300, type 1)");
    assert_eq!(c.type_name.as_deref(), Some("Hauptmieter"));
    assert_eq!(c.valid_from, date(2023, 5, 1));
  }

  #[test]
  fn contractor_requires_person() {
    let err = contractor(remote::Contractor {
      id: 1,
      license_agreement_id: Some(300),
      use_unit: Some(IdRef { id: 900 }),
      contractor_type: named(1, "Hauptmieter"),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::MissingReference { field: "person", .. }));
  }
}
