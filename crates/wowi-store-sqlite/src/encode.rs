//! Encoding helpers between row values and the plain representations stored
//! in SQLite columns, plus the per-table INSERT statements.
//!
//! Dates are stored as `YYYY-MM-DD` text. Booleans are stored as 0/1.

use chrono::NaiveDate;
use rusqlite::{Transaction, params};
use wowi_core::{
  date::DATE_FORMAT,
  record::{
    Address, Building, BuildingType, Communication, Contract, Contractor, District,
    EconomicUnit, Person, Row, UseUnit,
  },
};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: Option<NaiveDate>) -> Option<String> {
  d.map(|d| d.format(DATE_FORMAT).to_string())
}

// ─── Conflicts ───────────────────────────────────────────────────────────────

/// True if `err` is a primary-key or unique-constraint violation, the only
/// failures [`wowi_core::ConflictPolicy::Skip`] may swallow.
pub fn is_key_conflict(err: &rusqlite::Error) -> bool {
  match err {
    rusqlite::Error::SqliteFailure(e, _) => matches!(
      e.extended_code,
      rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    ),
    _ => false,
  }
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

pub fn insert_row(tx: &Transaction<'_>, row: &Row) -> rusqlite::Result<()> {
  match row {
    Row::District(r) => insert_district(tx, r),
    Row::BuildingType(r) => insert_building_type(tx, r),
    Row::EconomicUnit(r) => insert_economic_unit(tx, r),
    Row::Building(r) => insert_building(tx, r),
    Row::UseUnit(r) => insert_use_unit(tx, r),
    Row::Person(r) => insert_person(tx, r),
    Row::Address(r) => insert_address(tx, r),
    Row::Communication(r) => insert_communication(tx, r),
    Row::Contract(r) => insert_contract(tx, r),
    Row::Contractor(r) => insert_contractor(tx, r),
  }
}

fn insert_district(tx: &Transaction<'_>, r: &District) -> rusqlite::Result<()> {
  tx.prepare_cached("INSERT INTO wowi_districts (internal_id, name) VALUES (?1, ?2)")?
    .execute(params![r.internal_id, r.name])?;
  Ok(())
}

fn insert_building_type(tx: &Transaction<'_>, r: &BuildingType) -> rusqlite::Result<()> {
  tx.prepare_cached("INSERT INTO wowi_building_types (internal_id, name) VALUES (?1, ?2)")?
    .execute(params![r.internal_id, r.name])?;
  Ok(())
}

fn insert_economic_unit(tx: &Transaction<'_>, r: &EconomicUnit) -> rusqlite::Result<()> {
  tx.prepare_cached(
    "INSERT INTO wowi_economic_units (
       internal_id, id_num, company_id, name, location,
       construction_year, info, owner_id, district_id
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
  )?
  .execute(params![
    r.internal_id,
    r.id_num,
    r.company_id,
    r.name,
    r.location,
    r.construction_year,
    r.info,
    r.owner_id,
    r.district_id,
  ])?;
  Ok(())
}

fn insert_building(tx: &Transaction<'_>, r: &Building) -> rusqlite::Result<()> {
  let a = &r.address;
  tx.prepare_cached(
    "INSERT INTO wowi_buildings (
       internal_id, id_num, company_id, building_land_type_id, building_land_type,
       entry_date, economic_unit_id, postcode, town, street,
       house_number, house_number_addition, country_id, country, street_complete,
       house_number_complete, construction_year, move_in_date, building_type_id,
       building_type_name, district_id
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
               ?16, ?17, ?18, ?19, ?20, ?21)",
  )?
  .execute(params![
    r.internal_id,
    r.id_num,
    r.company_id,
    r.building_land_type_id,
    r.building_land_type,
    encode_date(r.entry_date),
    r.economic_unit_id,
    a.postcode,
    a.town,
    a.street,
    a.house_number,
    a.house_number_addition,
    a.country_id,
    a.country,
    a.street_complete,
    a.house_number_complete,
    r.construction_year,
    encode_date(r.move_in_date),
    r.building_type_id,
    r.building_type_name,
    r.district_id,
  ])?;
  Ok(())
}

fn insert_use_unit(tx: &Transaction<'_>, r: &UseUnit) -> rusqlite::Result<()> {
  let a = &r.address;
  tx.prepare_cached(
    "INSERT INTO wowi_use_units (
       internal_id, id_num, company_id, building_id, economic_unit_id,
       postcode, town, street, house_number, house_number_addition,
       country_id, country, street_complete, house_number_complete, financing_type_id,
       financing_type, use_unit_usage_type_id, use_unit_usage_type, usable_space, living_space,
       heating_space, number_of_rooms, number_of_half_rooms, position_description, management_start,
       management_end, move_in_date, exit_date, entry_date, position_id,
       position, floor_id, floor_name, floor_level
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
               ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
               ?33, ?34)",
  )?
  .execute(params![
    r.internal_id,
    r.id_num,
    r.company_id,
    r.building_id,
    r.economic_unit_id,
    a.postcode,
    a.town,
    a.street,
    a.house_number,
    a.house_number_addition,
    a.country_id,
    a.country,
    a.street_complete,
    a.house_number_complete,
    r.financing_type_id,
    r.financing_type,
    r.use_unit_usage_type_id,
    r.use_unit_usage_type,
    r.usable_space,
    r.living_space,
    r.heating_space,
    r.number_of_rooms,
    r.number_of_half_rooms,
    r.position_description,
    encode_date(r.management_start),
    encode_date(r.management_end),
    encode_date(r.move_in_date),
    encode_date(r.exit_date),
    encode_date(r.entry_date),
    r.position_id,
    r.position,
    r.floor_id,
    r.floor_name,
    r.floor_level,
  ])?;
  Ok(())
}

fn insert_person(tx: &Transaction<'_>, r: &Person) -> rusqlite::Result<()> {
  tx.prepare_cached(
    "INSERT INTO wowi_persons (
       internal_id, id_num, name, short_name, valid_from,
       valid_to, long_name_1, long_name_2, vat_id, commercial_register_number,
       commercial_register_town, first_name, last_name, birth_date, gender_id,
       gender_name, is_natural_person
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
  )?
  .execute(params![
    r.internal_id,
    r.id_num,
    r.name,
    r.short_name,
    encode_date(r.valid_from),
    encode_date(r.valid_to),
    r.long_name_1,
    r.long_name_2,
    r.vat_id,
    r.commercial_register_number,
    r.commercial_register_town,
    r.first_name,
    r.last_name,
    encode_date(r.birth_date),
    r.gender_id,
    r.gender_name,
    r.is_natural_person,
  ])?;
  Ok(())
}

fn insert_address(tx: &Transaction<'_>, r: &Address) -> rusqlite::Result<()> {
  tx.prepare_cached(
    "INSERT INTO wowi_addresses (
       internal_id, person_id, postcode, town, street,
       house_number, house_number_addition, country_id, country, street_complete,
       house_number_complete, address_type_id, address_type, valid_from, valid_to
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
  )?
  .execute(params![
    r.internal_id,
    r.person_id,
    r.postcode,
    r.town,
    r.street,
    r.house_number,
    r.house_number_addition,
    r.country_id,
    r.country,
    r.street_complete,
    r.house_number_complete,
    r.address_type_id,
    r.address_type,
    encode_date(r.valid_from),
    encode_date(r.valid_to),
  ])?;
  Ok(())
}

fn insert_communication(tx: &Transaction<'_>, r: &Communication) -> rusqlite::Result<()> {
  tx.prepare_cached(
    "INSERT INTO wowi_communications (
       internal_id, person_id, related_address_id, content, explanation,
       communication_type_id, communication_type
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?
  .execute(params![
    r.internal_id,
    r.person_id,
    r.related_address_id,
    r.content,
    r.explanation,
    r.communication_type_id,
    r.communication_type,
  ])?;
  Ok(())
}

fn insert_contract(tx: &Transaction<'_>, r: &Contract) -> rusqlite::Result<()> {
  tx.prepare_cached(
    "INSERT INTO wowi_contracts (
       internal_id, id_num, use_unit_id, restriction_id, restriction_name,
       is_vacancy, status_id, status_name, life_id, life_name,
       contract_start, contract_end
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
  )?
  .execute(params![
    r.internal_id,
    r.id_num,
    r.use_unit_id,
    r.restriction_id,
    r.restriction_name,
    r.is_vacancy,
    r.status_id,
    r.status_name,
    r.life_id,
    r.life_name,
    encode_date(r.contract_start),
    encode_date(r.contract_end),
  ])?;
  Ok(())
}

fn insert_contractor(tx: &Transaction<'_>, r: &Contractor) -> rusqlite::Result<()> {
  tx.prepare_cached(
    "INSERT INTO wowi_contractors (
       internal_id, contract_id, type_id, use_unit_id, person_id,
       type_name, valid_from, valid_to
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
  )?
  .execute(params![
    r.internal_id,
    r.contract_id,
    r.type_id,
    r.use_unit_id,
    r.person_id,
    r.type_name,
    encode_date(r.valid_from),
    encode_date(r.valid_to),
  ])?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_encode_as_iso() {
    assert_eq!(
      encode_date(NaiveDate::from_ymd_opt(2023, 5, 1)).as_deref(),
      Some("2023-05-01")
    );
    assert_eq!(encode_date(None), None);
  }
}
