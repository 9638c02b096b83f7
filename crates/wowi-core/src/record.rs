//! Flat local rows, one struct per table.
//!
//! Reference objects of the remote graph are denormalised onto the owning row
//! as `(id, name)` column pairs. Only districts and building types get tables
//! of their own.

use std::fmt;

use chrono::NaiveDate;

use crate::kind::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct District {
  pub internal_id: i64,
  pub name:        String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingType {
  pub internal_id: i64,
  pub name:        Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EconomicUnit {
  pub internal_id:       i64,
  pub id_num:            Option<String>,
  pub company_id:        Option<i64>,
  pub name:              Option<String>,
  pub location:          Option<String>,
  pub construction_year: Option<i32>,
  pub info:              Option<String>,
  pub owner_id:          i64,
  pub district_id:       Option<i64>,
}

/// Address columns shared by buildings and use units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstateAddress {
  pub postcode:              Option<String>,
  pub town:                  Option<String>,
  pub street:                Option<String>,
  pub house_number:          Option<String>,
  pub house_number_addition: Option<String>,
  pub country_id:            Option<i64>,
  pub country:               Option<String>,
  pub street_complete:       Option<String>,
  pub house_number_complete: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
  pub internal_id:           i64,
  pub id_num:                Option<String>,
  pub company_id:            Option<i64>,
  pub building_land_type_id: Option<i64>,
  pub building_land_type:    Option<String>,
  pub entry_date:            Option<NaiveDate>,
  pub economic_unit_id:      i64,
  pub address:               EstateAddress,
  pub construction_year:     Option<i32>,
  pub move_in_date:          Option<NaiveDate>,
  pub building_type_id:      Option<i64>,
  pub building_type_name:    Option<String>,
  pub district_id:           Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseUnit {
  pub internal_id:            i64,
  pub id_num:                 Option<String>,
  pub company_id:             Option<i64>,
  pub building_id:            i64,
  pub economic_unit_id:       i64,
  pub address:                EstateAddress,
  pub financing_type_id:      Option<i64>,
  pub financing_type:         Option<String>,
  pub use_unit_usage_type_id: Option<i64>,
  pub use_unit_usage_type:    Option<String>,
  pub usable_space:           Option<f64>,
  pub living_space:           Option<f64>,
  pub heating_space:          Option<f64>,
  pub number_of_rooms:        Option<i64>,
  pub number_of_half_rooms:   Option<i64>,
  pub position_description:   Option<String>,
  pub management_start:       Option<NaiveDate>,
  pub management_end:         Option<NaiveDate>,
  pub move_in_date:           Option<NaiveDate>,
  pub exit_date:              Option<NaiveDate>,
  pub entry_date:             Option<NaiveDate>,
  pub position_id:            Option<i64>,
  pub position:               Option<String>,
  pub floor_id:               Option<i64>,
  pub floor_name:             Option<String>,
  pub floor_level:            Option<f64>,
}

/// A natural person or a legal entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
  pub internal_id:                i64,
  pub id_num:                     Option<String>,
  pub name:                       Option<String>,
  pub short_name:                 Option<String>,
  pub valid_from:                 Option<NaiveDate>,
  pub valid_to:                   Option<NaiveDate>,
  pub long_name_1:                Option<String>,
  pub long_name_2:                Option<String>,
  pub vat_id:                     Option<String>,
  pub commercial_register_number: Option<String>,
  pub commercial_register_town:   Option<String>,
  pub first_name:                 Option<String>,
  pub last_name:                  Option<String>,
  pub birth_date:                 Option<NaiveDate>,
  pub gender_id:                  Option<i64>,
  pub gender_name:                Option<String>,
  /// Fixed when the row is built; true iff a first or last name is present.
  pub is_natural_person:          bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
  pub internal_id:           i64,
  pub person_id:             i64,
  pub postcode:              Option<String>,
  pub town:                  Option<String>,
  pub street:                Option<String>,
  pub house_number:          Option<String>,
  pub house_number_addition: Option<String>,
  pub country_id:            Option<i64>,
  pub country:               Option<String>,
  pub street_complete:       Option<String>,
  pub house_number_complete: Option<String>,
  pub address_type_id:       Option<i64>,
  pub address_type:          Option<String>,
  pub valid_from:            Option<NaiveDate>,
  /// `None` means the address is open-ended.
  pub valid_to:              Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Communication {
  pub internal_id:           i64,
  pub person_id:             i64,
  pub related_address_id:    Option<i64>,
  pub content:               Option<String>,
  pub explanation:           Option<String>,
  pub communication_type_id: Option<i64>,
  pub communication_type:    Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
  pub internal_id:      i64,
  pub id_num:           Option<String>,
  pub use_unit_id:      i64,
  pub restriction_id:   Option<i64>,
  pub restriction_name: Option<String>,
  pub is_vacancy:       Option<bool>,
  pub status_id:        Option<i64>,
  pub status_name:      Option<String>,
  pub life_id:          Option<i64>,
  pub life_name:        Option<String>,
  pub contract_start:   Option<NaiveDate>,
  pub contract_end:     Option<NaiveDate>,
}

/// One role a person holds on a contract. Identified by
/// `(internal_id, contract_id, type_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contractor {
  pub internal_id: i64,
  pub contract_id: i64,
  pub type_id:     i64,
  pub use_unit_id: i64,
  pub person_id:   i64,
  pub type_name:   Option<String>,
  pub valid_from:  Option<NaiveDate>,
  pub valid_to:    Option<NaiveDate>,
}

impl Contractor {
  pub fn key(&self) -> ContractorKey {
    ContractorKey {
      internal_id: self.internal_id,
      contract_id: self.contract_id,
      type_id:     self.type_id,
    }
  }
}

/// The composite identity of a [`Contractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractorKey {
  pub internal_id: i64,
  pub contract_id: i64,
  pub type_id:     i64,
}

impl fmt::Display for ContractorKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "contractor {} (contract {}, type {})",
      self.internal_id, self.contract_id, self.type_id
    )
  }
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// Any local row, staged for insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
  District(District),
  BuildingType(BuildingType),
  EconomicUnit(EconomicUnit),
  Building(Building),
  UseUnit(UseUnit),
  Person(Person),
  Address(Address),
  Communication(Communication),
  Contract(Contract),
  Contractor(Contractor),
}

impl Row {
  pub fn table(&self) -> Table {
    match self {
      Self::District(_) => Table::Districts,
      Self::BuildingType(_) => Table::BuildingTypes,
      Self::EconomicUnit(_) => Table::EconomicUnits,
      Self::Building(_) => Table::Buildings,
      Self::UseUnit(_) => Table::UseUnits,
      Self::Person(_) => Table::Persons,
      Self::Address(_) => Table::Addresses,
      Self::Communication(_) => Table::Communications,
      Self::Contract(_) => Table::Contracts,
      Self::Contractor(_) => Table::Contractors,
    }
  }

  /// The row's `internal_id`.
  pub fn internal_id(&self) -> i64 {
    match self {
      Self::District(r) => r.internal_id,
      Self::BuildingType(r) => r.internal_id,
      Self::EconomicUnit(r) => r.internal_id,
      Self::Building(r) => r.internal_id,
      Self::UseUnit(r) => r.internal_id,
      Self::Person(r) => r.internal_id,
      Self::Address(r) => r.internal_id,
      Self::Communication(r) => r.internal_id,
      Self::Contract(r) => r.internal_id,
      Self::Contractor(r) => r.internal_id,
    }
  }
}

impl fmt::Display for Row {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Contractor(c) => c.key().fmt(f),
      other => write!(f, "{} {}", other.table(), other.internal_id()),
    }
  }
}
