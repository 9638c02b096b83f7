//! Records as delivered by the remote property-management API.
//!
//! These mirror the API's nested JSON object graph. Every nested object is
//! optional; which absences are tolerated is decided by [`crate::map`], not
//! here. Dates stay raw strings until mapping so a malformed value surfaces as
//! a mapping error naming the field.

use serde::{Deserialize, Serialize};

// ─── Shared references ───────────────────────────────────────────────────────

/// A bare reference to another record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdRef {
  pub id: i64,
}

/// A lookup value: identifier plus display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedRef {
  pub id:   i64,
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
  pub id:   i64,
  pub code: Option<String>,
}

/// Postal address of an estate (building, land, or use unit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstateAddress {
  pub street:                Option<String>,
  pub postcode:              Option<String>,
  pub town:                  Option<String>,
  pub house_number:          Option<String>,
  pub house_number_addition: Option<String>,
  pub country_id:            Option<i64>,
  pub country_code:          Option<String>,
  pub street_complete:       Option<String>,
  pub house_number_complete: Option<String>,
}

// ─── Inventory ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct District {
  pub id:   i64,
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EconomicUnit {
  pub id:                i64,
  pub id_num:            Option<String>,
  pub company_code:      Option<IdRef>,
  pub name:              Option<String>,
  pub location:          Option<String>,
  pub construction_year: Option<i32>,
  pub info:              Option<String>,
  pub owner:             Option<IdRef>,
  pub district:          Option<NamedRef>,
}

/// The building half of a building/land record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildingDetails {
  pub district:          Option<NamedRef>,
  pub move_in_date:      Option<String>,
  pub construction_year: Option<i32>,
  pub building_type:     Option<NamedRef>,
}

/// A building or plot of land; stored locally as a building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildingLand {
  pub id:                 i64,
  pub id_num:             Option<String>,
  pub company_code:       Option<IdRef>,
  pub building_land_type: Option<NamedRef>,
  pub entry_date:         Option<String>,
  pub economic_unit:      Option<IdRef>,
  pub estate_address:     Option<EstateAddress>,
  pub building:           Option<BuildingDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Floor {
  pub id:              i64,
  pub name:            Option<String>,
  pub level_to_ground: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UseUnitType {
  pub use_unit_usage_type: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UseUnit {
  pub id:                      i64,
  pub id_num:                  Option<String>,
  pub company_code:            Option<IdRef>,
  pub building_land:           Option<IdRef>,
  pub economic_unit:           Option<IdRef>,
  pub estate_address:          Option<EstateAddress>,
  pub financing_type:          Option<NamedRef>,
  pub current_use_unit_type:   Option<UseUnitType>,
  pub usable_space:            Option<f64>,
  pub living_space:            Option<f64>,
  pub heating_space:           Option<f64>,
  pub number_of_rooms:         Option<i64>,
  pub number_of_half_rooms:    Option<i64>,
  pub description_of_position: Option<String>,
  pub management_start:        Option<String>,
  pub management_end:          Option<String>,
  pub move_in_date:            Option<String>,
  pub exit_date:               Option<String>,
  pub entry_date:              Option<String>,
  pub position:                Option<NamedRef>,
  pub floor:                   Option<Floor>,
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegalPerson {
  pub long_name1:                 Option<String>,
  pub long_name2:                 Option<String>,
  pub vat_id:                     Option<String>,
  pub commercial_register_number: Option<String>,
  pub commercial_register_town:   Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NaturalPerson {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub birth_date: Option<String>,
  pub gender:     Option<NamedRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonAddress {
  pub id:                    i64,
  pub street:                Option<String>,
  pub postcode:              Option<String>,
  pub town:                  Option<String>,
  pub house_number:          Option<String>,
  pub house_number_addition: Option<String>,
  pub country:               Option<Country>,
  pub street_complete:       Option<String>,
  pub house_number_complete: Option<String>,
  pub address_type:          Option<NamedRef>,
  pub valid_from:            Option<String>,
  pub valid_to:              Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Communication {
  pub id:                 i64,
  pub related_address_id: Option<i64>,
  pub content:            Option<String>,
  pub explanation:        Option<String>,
  pub communication_type: Option<NamedRef>,
}

/// A natural person or a legal entity; the API sends both shapes on one
/// record and fills whichever applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
  pub id:             i64,
  pub id_num:         Option<String>,
  pub name:           Option<String>,
  pub short_name:     Option<String>,
  pub valid_from:     Option<String>,
  pub valid_to:       Option<String>,
  pub legal_person:   Option<LegalPerson>,
  pub natural_person: Option<NaturalPerson>,
  pub addresses:      Option<Vec<PersonAddress>>,
  pub communications: Option<Vec<Communication>>,
}

// ─── Contracts ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestrictionOfUse {
  pub id:         i64,
  pub name:       Option<String>,
  pub is_vacancy: Option<bool>,
}

/// A licence agreement; stored locally as a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseAgreement {
  pub id:                 i64,
  pub id_num:             Option<String>,
  pub use_unit:           Option<IdRef>,
  pub restriction_of_use: Option<RestrictionOfUse>,
  pub status_contract:    Option<NamedRef>,
  pub life_of_contract:   Option<NamedRef>,
  pub start_contract:     Option<String>,
  pub end_of_contract:    Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contractor {
  pub id:                         i64,
  pub license_agreement_id:       Option<i64>,
  pub use_unit:                   Option<IdRef>,
  pub person:                     Option<IdRef>,
  pub contractor_type:            Option<NamedRef>,
  pub contractual_use_valid_from: Option<String>,
  pub contractual_use_valid_to:   Option<String>,
}
