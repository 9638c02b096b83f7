//! Runtime settings, read from a config file layered under `WOWICACHE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use wowi_client::{ClientConfig, DEFAULT_PAGE_SIZE};
use wowi_core::EntityKind;

use crate::sync::SyncConfig;

pub const ENV_PREFIX: &str = "WOWICACHE";
pub const DEFAULT_USER_AGENT: &str = "WowiCache/1.0";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub wowi_host:  String,
  #[serde(default)]
  pub wowi_user:  String,
  #[serde(default)]
  pub wowi_pass:  String,
  #[serde(default)]
  pub wowi_key:   String,
  #[serde(default)]
  pub user_agent: Option<String>,

  /// e.g. `sqlite:////var/lib/wowicache/cache.db`
  pub db_connection_string: String,

  #[serde(default)]
  pub enable_buildings:          bool,
  #[serde(default)]
  pub enable_contractors:        bool,
  #[serde(default)]
  pub enable_persons:            bool,
  #[serde(default)]
  pub enable_economic_units:     bool,
  #[serde(default)]
  pub enable_license_agreements: bool,
  #[serde(default)]
  pub enable_use_units:          bool,

  #[serde(default)]
  pub backup_dir:     Option<PathBuf>,
  #[serde(default)]
  pub require_backup: bool,

  #[serde(default = "default_log_level")]
  pub log_level: String,
  #[serde(default)]
  pub log_dir:   Option<PathBuf>,

  #[serde(default = "default_page_size")]
  pub page_size: usize,
}

fn default_log_level() -> String { "info".to_string() }

fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }

impl Settings {
  /// Read `path` (optional, format by extension) and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  /// The kinds switched on by the `enable_*` toggles, before expansion.
  /// Districts have no toggle; the plan adds them when needed.
  pub fn requested_kinds(&self) -> Vec<EntityKind> {
    [
      (self.enable_economic_units, EntityKind::EconomicUnits),
      (self.enable_buildings, EntityKind::Buildings),
      (self.enable_use_units, EntityKind::UseUnits),
      (self.enable_persons, EntityKind::Persons),
      (self.enable_license_agreements, EntityKind::Contracts),
      (self.enable_contractors, EntityKind::Contractors),
    ]
    .into_iter()
    .filter_map(|(on, kind)| on.then_some(kind))
    .collect()
  }

  /// The configured user agent, or [`DEFAULT_USER_AGENT`] when unset or blank.
  pub fn user_agent(&self) -> &str {
    match self.user_agent.as_deref().map(str::trim) {
      Some(ua) if !ua.is_empty() => ua,
      _ => DEFAULT_USER_AGENT,
    }
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      host:       self.wowi_host.clone(),
      user:       self.wowi_user.clone(),
      password:   self.wowi_pass.clone(),
      api_key:    self.wowi_key.clone(),
      user_agent: self.user_agent().to_string(),
      page_size:  self.page_size,
    }
  }

  pub fn sync_config(&self) -> SyncConfig { SyncConfig::new(self.requested_kinds()) }
}
