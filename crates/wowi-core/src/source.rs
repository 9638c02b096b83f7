//! The `RemoteSource` trait: full collections from the remote API.
//!
//! Implementations own authentication and pagination; callers always receive
//! a complete collection.

use std::future::Future;

use crate::remote::{
  BuildingLand, Contractor, District, EconomicUnit, LicenseAgreement, Person, UseUnit,
};

pub trait RemoteSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn districts(&self) -> impl Future<Output = Result<Vec<District>, Self::Error>> + Send + '_;

  fn economic_units(
    &self,
  ) -> impl Future<Output = Result<Vec<EconomicUnit>, Self::Error>> + Send + '_;

  fn building_lands(
    &self,
  ) -> impl Future<Output = Result<Vec<BuildingLand>, Self::Error>> + Send + '_;

  fn use_units(&self) -> impl Future<Output = Result<Vec<UseUnit>, Self::Error>> + Send + '_;

  /// Persons including their addresses and communications.
  fn persons(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn license_agreements(
    &self,
  ) -> impl Future<Output = Result<Vec<LicenseAgreement>, Self::Error>> + Send + '_;

  fn contractors(
    &self,
  ) -> impl Future<Output = Result<Vec<Contractor>, Self::Error>> + Send + '_;
}
