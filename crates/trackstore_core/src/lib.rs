//! Core collection store for trackstore.
//! This crate is the single source of truth for record and collection invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod store;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{validate_candidate, Record, RecordId, RecordValidationError};
pub use store::{CollectionStore, CreateResult, Status, StoreError, StoreResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
