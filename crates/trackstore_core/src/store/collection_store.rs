//! In-memory collection store with validated inserts.
//!
//! # Responsibility
//! - Own every loaded collection for the lifetime of one instance.
//! - Provide copy-out reads, validated appends and whole-store persistence.
//!
//! # Invariants
//! - `find` never hands out references into internal state.
//! - `create` checks everything before it touches a collection.
//! - `write` never changes in-memory state.

use super::files::{self, Collections};
use super::{CreateResult, StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::record::{validate_candidate, Record};
use log::{error, info, warn};
use serde_json::Value;
use std::time::Instant;

/// Named collections loaded from one data directory.
///
/// Lifecycle: [`CollectionStore::open`] loads, `find`/`create`/`add` query
/// and mutate, `write` optionally persists. Outcome codes for mutations are
/// [`Status`](super::Status) values.
#[derive(Debug)]
pub struct CollectionStore {
    config: StoreConfig,
    collections: Collections,
}

impl CollectionStore {
    /// Loads every collection file from `config.data_dir`.
    ///
    /// # Errors
    /// - `DirectoryNotFound` when the data directory is missing or unreadable.
    /// - `InvalidData` when a collection file is malformed.
    ///
    /// # Side effects
    /// - Reads the data directory only.
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start");

        match files::load_collections(&config.data_dir) {
            Ok(collections) => {
                info!(
                    "event=store_open module=store status=ok collections={} duration_ms={}",
                    collections.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    config,
                    collections,
                })
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Loads the bundled collections with default output location.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(StoreConfig::default())
    }

    /// Returns the configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns loaded collection names in sorted order.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }

    /// Returns a copy of the records in `collection`, in insertion order.
    ///
    /// # Errors
    /// - `CollectionNotFound` for a blank or unknown name.
    pub fn find(&self, collection: &str) -> StoreResult<Vec<Record>> {
        let records = self.records(collection)?;
        Ok(records.iter().map(Record::clone).collect())
    }

    /// Validates `candidate` and appends it to `collection`.
    ///
    /// Rejections are reported through the returned status, never as `Err`.
    /// Only `_id` and `titles` are kept from the candidate.
    pub fn create(&mut self, collection: &str, candidate: &Value) -> CreateResult {
        let Some(records) = self.collections.get_mut(collection) else {
            warn!(
                "event=record_create module=store status=rejected reason=collection_not_found"
            );
            return CreateResult::failure(format!("collection not found: {collection}"));
        };

        let record = match validate_candidate(candidate) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "event=record_create module=store status=rejected reason={}",
                    err.code()
                );
                return CreateResult::failure(err.to_string());
            }
        };

        if records.iter().any(|existing| existing.id == record.id) {
            warn!("event=record_create module=store status=rejected reason=duplicate_id");
            return CreateResult::failure(format!(
                "`_id` `{}` already exists in `{collection}`",
                record.id
            ));
        }

        let id = record.id.clone();
        records.push(record);
        info!(
            "event=record_create module=store status=ok size={}",
            records.len()
        );
        CreateResult::success(id, collection)
    }

    /// Creates `{_id: id, titles: [display_name]}` in `collection`.
    pub fn add(&mut self, collection: &str, id: &str, display_name: &str) -> CreateResult {
        let candidate = Record::with_title(id, display_name).to_value();
        self.create(collection, &candidate)
    }

    /// Writes every collection to `<output_dir>/<name>.json`.
    ///
    /// The output directory (and missing parents) is created on demand.
    /// Existing files are overwritten.
    ///
    /// # Errors
    /// - `Io` when the directory or any file cannot be written.
    pub fn write(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let output_dir = self.config.output_dir.as_path();

        match files::write_collections(output_dir, &self.collections) {
            Ok(()) => {
                info!(
                    "event=store_write module=store status=ok collections={} duration_ms={}",
                    self.collections.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn records(&self, collection: &str) -> StoreResult<&Vec<Record>> {
        if collection.trim().is_empty() {
            return Err(StoreError::CollectionNotFound(String::new()));
        }
        self.collections
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))
    }
}
