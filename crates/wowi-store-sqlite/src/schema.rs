//! SQL schema for the wowicache SQLite store.
//!
//! Executed once at connection startup. There are no migrations; tables are
//! created if missing and otherwise left as they are.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- Backups copy the main database file only.
PRAGMA journal_mode = DELETE;
-- Kinds are replaced one at a time and may reference kinds outside the run.
PRAGMA foreign_keys = OFF;

CREATE TABLE IF NOT EXISTS wowi_districts (
    internal_id INTEGER PRIMARY KEY,
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS wowi_building_types (
    internal_id INTEGER PRIMARY KEY,
    name        TEXT
);

CREATE TABLE IF NOT EXISTS wowi_economic_units (
    internal_id       INTEGER PRIMARY KEY,
    id_num            TEXT,
    company_id        INTEGER,
    name              TEXT,
    location          TEXT,
    construction_year INTEGER,
    info              TEXT,
    owner_id          INTEGER NOT NULL,
    district_id       INTEGER REFERENCES wowi_districts(internal_id)
);

CREATE TABLE IF NOT EXISTS wowi_buildings (
    internal_id           INTEGER PRIMARY KEY,
    id_num                TEXT,
    company_id            INTEGER,
    building_land_type_id INTEGER,
    building_land_type    TEXT,
    entry_date            TEXT,   -- YYYY-MM-DD
    economic_unit_id      INTEGER NOT NULL REFERENCES wowi_economic_units(internal_id),
    postcode              TEXT,
    town                  TEXT,
    street                TEXT,
    house_number          TEXT,
    house_number_addition TEXT,
    country_id            INTEGER,
    country               TEXT,
    street_complete       TEXT,
    house_number_complete TEXT,
    construction_year     INTEGER,
    move_in_date          TEXT,
    building_type_id      INTEGER REFERENCES wowi_building_types(internal_id),
    building_type_name    TEXT,
    district_id           INTEGER REFERENCES wowi_districts(internal_id)
);

CREATE TABLE IF NOT EXISTS wowi_use_units (
    internal_id            INTEGER PRIMARY KEY,
    id_num                 TEXT,
    company_id             INTEGER,
    building_id            INTEGER NOT NULL REFERENCES wowi_buildings(internal_id),
    economic_unit_id       INTEGER NOT NULL REFERENCES wowi_economic_units(internal_id),
    postcode               TEXT,
    town                   TEXT,
    street                 TEXT,
    house_number           TEXT,
    house_number_addition  TEXT,
    country_id             INTEGER,
    country                TEXT,
    street_complete        TEXT,
    house_number_complete  TEXT,
    financing_type_id      INTEGER,
    financing_type         TEXT,
    use_unit_usage_type_id INTEGER,
    use_unit_usage_type    TEXT,
    usable_space           REAL,
    living_space           REAL,
    heating_space          REAL,
    number_of_rooms        INTEGER,
    number_of_half_rooms   INTEGER,
    position_description   TEXT,
    management_start       TEXT,
    management_end         TEXT,
    move_in_date           TEXT,
    exit_date              TEXT,
    entry_date             TEXT,
    position_id            INTEGER,
    position               TEXT,
    floor_id               INTEGER,
    floor_name             TEXT,
    floor_level            REAL
);

CREATE TABLE IF NOT EXISTS wowi_persons (
    internal_id                INTEGER PRIMARY KEY,
    id_num                     TEXT,
    name                       TEXT,
    short_name                 TEXT,
    valid_from                 TEXT,
    valid_to                   TEXT,
    long_name_1                TEXT,
    long_name_2                TEXT,
    vat_id                     TEXT,
    commercial_register_number TEXT,
    commercial_register_town   TEXT,
    first_name                 TEXT,
    last_name                  TEXT,
    birth_date                 TEXT,
    gender_id                  INTEGER,
    gender_name                TEXT,
    is_natural_person          INTEGER NOT NULL   -- 0 | 1
);

CREATE TABLE IF NOT EXISTS wowi_addresses (
    internal_id           INTEGER PRIMARY KEY,
    person_id             INTEGER NOT NULL REFERENCES wowi_persons(internal_id),
    postcode              TEXT,
    town                  TEXT,
    street                TEXT,
    house_number          TEXT,
    house_number_addition TEXT,
    country_id            INTEGER,
    country               TEXT,
    street_complete       TEXT,
    house_number_complete TEXT,
    address_type_id       INTEGER,
    address_type          TEXT,
    valid_from            TEXT,
    valid_to              TEXT      -- NULL while the address is current
);

CREATE TABLE IF NOT EXISTS wowi_communications (
    internal_id           INTEGER PRIMARY KEY,
    person_id             INTEGER NOT NULL REFERENCES wowi_persons(internal_id),
    related_address_id    INTEGER REFERENCES wowi_addresses(internal_id),
    content               TEXT,
    explanation           TEXT,
    communication_type_id INTEGER,
    communication_type    TEXT
);

CREATE TABLE IF NOT EXISTS wowi_contracts (
    internal_id      INTEGER PRIMARY KEY,
    id_num           TEXT,
    use_unit_id      INTEGER NOT NULL REFERENCES wowi_use_units(internal_id),
    restriction_id   INTEGER,
    restriction_name TEXT,
    is_vacancy       INTEGER,
    status_id        INTEGER,
    status_name      TEXT,
    life_id          INTEGER,
    life_name        TEXT,
    contract_start   TEXT,
    contract_end     TEXT
);

-- One person can hold several roles on the same contract.
CREATE TABLE IF NOT EXISTS wowi_contractors (
    internal_id INTEGER NOT NULL,
    contract_id INTEGER NOT NULL REFERENCES wowi_contracts(internal_id),
    type_id     INTEGER NOT NULL,
    use_unit_id INTEGER NOT NULL REFERENCES wowi_use_units(internal_id),
    person_id   INTEGER NOT NULL REFERENCES wowi_persons(internal_id),
    type_name   TEXT,
    valid_from  TEXT,
    valid_to    TEXT,
    PRIMARY KEY (internal_id, contract_id, type_id)
);

CREATE INDEX IF NOT EXISTS use_units_building_idx  ON wowi_use_units(building_id);
CREATE INDEX IF NOT EXISTS addresses_person_idx    ON wowi_addresses(person_id);
CREATE INDEX IF NOT EXISTS communications_person_idx ON wowi_communications(person_id);
CREATE INDEX IF NOT EXISTS contracts_use_unit_idx  ON wowi_contracts(use_unit_id);
CREATE INDEX IF NOT EXISTS contractors_person_idx  ON wowi_contractors(person_id);
";
