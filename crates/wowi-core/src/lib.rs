//! Core types and trait definitions for the wowicache mirror.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! holds the entity kinds and their sync order, the remote record shapes, the
//! flat local rows, and the pure mapping between the two.

// We intentionally use native `async fn` in traits.
#![allow(async_fn_in_trait)]

pub mod date;
pub mod error;
pub mod kind;
pub mod map;
pub mod plan;
pub mod record;
pub mod remote;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use kind::{ConflictPolicy, EntityKind, Table};
pub use plan::SyncPlan;
