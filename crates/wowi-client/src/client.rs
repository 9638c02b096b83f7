//! [`WowiClient`]: the HTTP implementation of [`RemoteSource`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::debug;
use wowi_core::{
  remote::{
    BuildingLand, Contractor, District, EconomicUnit, LicenseAgreement, Person, UseUnit,
  },
  source::RemoteSource,
};

use crate::{Error, Result};

const TOKEN_PATH: &str = "oauth2/token";
const API_BASE: &str = "openwowi/v1.2";

/// Collection endpoints, relative to [`API_BASE`].
mod endpoint {
  pub const DISTRICTS: &str = "CommercialInventory/Districts";
  pub const ECONOMIC_UNITS: &str = "CommercialInventory/EconomicUnits";
  pub const BUILDING_LANDS: &str = "CommercialInventory/BuildingLands";
  pub const USE_UNITS: &str = "CommercialInventory/UseUnits";
  pub const PERSONS: &str = "PersonManagement/Persons";
  pub const LICENSE_AGREEMENTS: &str = "RentAccounting/LicenseAgreements";
  pub const CONTRACTORS: &str = "RentAccounting/Contractors";
}

/// Query parameters that make the persons endpoint embed sub-records.
const PERSON_DETAILS: [(&str, &str); 2] =
  [("includeAddresses", "true"), ("includeCommunications", "true")];

pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Connection settings for the remote API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL including scheme, e.g. `https://wowi.example.com`.
  pub host:       String,
  pub user:       String,
  pub password:   String,
  pub api_key:    String,
  pub user_agent: String,
  /// Records requested per page. Zero is treated as one.
  pub page_size:  usize,
}

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
}

/// Async HTTP client for the remote API.
///
/// The bearer token is requested lazily and reused until the API rejects it.
pub struct WowiClient {
  client: Client,
  config: ClientConfig,
  token:  Mutex<Option<String>>,
}

impl WowiClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(60))
      .user_agent(config.user_agent.clone())
      .build()?;
    Ok(Self { client, config, token: Mutex::new(None) })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.config.host.trim_end_matches('/'), path.trim_start_matches('/'))
  }

  fn api_url(&self, path: &str) -> String { self.url(&format!("{API_BASE}/{path}")) }

  fn page_size(&self) -> usize { self.config.page_size.max(1) }

  // ── Authentication ────────────────────────────────────────────────────────

  async fn token(&self) -> Result<String> {
    let mut slot = self.token.lock().await;
    if let Some(token) = slot.as_ref() {
      return Ok(token.clone());
    }
    let token = self.request_token().await?;
    *slot = Some(token.clone());
    Ok(token)
  }

  /// `POST /oauth2/token` with the resource-owner password grant.
  async fn request_token(&self) -> Result<String> {
    let resp = self
      .client
      .post(self.url(TOKEN_PATH))
      .query(&[("apiKey", self.config.api_key.as_str())])
      .form(&[
        ("grant_type", "password"),
        ("username", self.config.user.as_str()),
        ("password", self.config.password.as_str()),
      ])
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Auth(format!("token endpoint returned {status}")));
    }
    let body: TokenResponse = resp.json().await?;
    if body.access_token.is_empty() {
      return Err(Error::Auth("token endpoint returned an empty token".into()));
    }
    debug!("obtained access token");
    Ok(body.access_token)
  }

  // ── Paging ────────────────────────────────────────────────────────────────

  /// `GET <path>?limit=..&offset=..`, re-authenticating once on 401.
  async fn get_page<T>(&self, path: &str, extra: &[(&str, &str)], offset: usize) -> Result<Vec<T>>
  where
    T: DeserializeOwned + Send,
  {
    let mut reauthenticated = false;
    loop {
      let token = self.token().await?;
      let resp = self
        .client
        .get(self.api_url(path))
        .bearer_auth(&token)
        .query(&[("apiKey", self.config.api_key.as_str())])
        .query(&[("limit", self.page_size()), ("offset", offset)])
        .query(extra)
        .send()
        .await?;

      let status = resp.status();
      if status == StatusCode::UNAUTHORIZED && !reauthenticated {
        debug!(path, "token rejected, re-authenticating");
        *self.token.lock().await = None;
        reauthenticated = true;
        continue;
      }
      if !status.is_success() {
        return Err(Error::Status { path: path.to_owned(), status });
      }
      return Ok(resp.json().await?);
    }
  }

  /// Every record of a collection, walking pages until an empty one.
  ///
  /// A page shorter than `limit` does not end the walk: the server may cap
  /// `limit` below the configured page size.
  async fn fetch_all<T>(&self, path: &str, extra: &[(&str, &str)]) -> Result<Vec<T>>
  where
    T: DeserializeOwned + Send,
  {
    let mut records = Vec::new();
    let mut offset = 0;
    loop {
      let page: Vec<T> = self.get_page(path, extra, offset).await?;
      if page.is_empty() {
        break;
      }
      offset += page.len();
      records.extend(page);
    }
    debug!(path, records = records.len(), "fetched collection");
    Ok(records)
  }
}

// ─── RemoteSource impl ───────────────────────────────────────────────────────

impl RemoteSource for WowiClient {
  type Error = Error;

  async fn districts(&self) -> Result<Vec<District>> {
    self.fetch_all(endpoint::DISTRICTS, &[]).await
  }

  async fn economic_units(&self) -> Result<Vec<EconomicUnit>> {
    self.fetch_all(endpoint::ECONOMIC_UNITS, &[]).await
  }

  async fn building_lands(&self) -> Result<Vec<BuildingLand>> {
    self.fetch_all(endpoint::BUILDING_LANDS, &[]).await
  }

  async fn use_units(&self) -> Result<Vec<UseUnit>> {
    self.fetch_all(endpoint::USE_UNITS, &[]).await
  }

  async fn persons(&self) -> Result<Vec<Person>> {
    self.fetch_all(endpoint::PERSONS, &PERSON_DETAILS).await
  }

  async fn license_agreements(&self) -> Result<Vec<LicenseAgreement>> {
    self.fetch_all(endpoint::LICENSE_AGREEMENTS, &[]).await
  }

  async fn contractors(&self) -> Result<Vec<Contractor>> {
    self.fetch_all(endpoint::CONTRACTORS, &[]).await
  }
}
