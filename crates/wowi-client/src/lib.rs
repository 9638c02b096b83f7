//! HTTP client for the remote property-management API.
//!
//! [`WowiClient`] implements [`wowi_core::source::RemoteSource`]: it obtains
//! an OAuth2 token with the configured credentials and walks every collection
//! page by page, so callers always receive complete collections.

mod client;
pub mod error;

pub use client::{ClientConfig, DEFAULT_PAGE_SIZE, WowiClient};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
