//! Mirror the remote property-management API into a local SQLite cache.
//!
//! [`SyncOrchestrator`] replaces each enabled entity kind wholesale, in
//! dependency order. [`BackupManager`] keeps timestamped copies of a
//! file-based cache so a failed run can be rolled back by hand.

pub mod backup;
pub mod error;
pub mod settings;
pub mod sync;

pub use backup::BackupManager;
pub use error::{BackupError, Error, Result};
pub use settings::Settings;
pub use sync::{KindReport, SyncConfig, SyncOrchestrator, SyncReport};
