//! Directory load and write helpers for collection files.
//!
//! # Responsibility
//! - Map `<name>.json` files to named collections and back.
//! - Reject persisted content that breaks record invariants.
//!
//! # Invariants
//! - Only regular files with a `json` extension are treated as collections.
//! - Collection names are valid UTF-8 and never blank.
//! - Loaded collections never contain empty or duplicated `_id` values.

use super::{StoreError, StoreResult};
use crate::model::record::Record;
use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub(crate) const COLLECTION_FILE_EXTENSION: &str = "json";

pub(crate) type Collections = BTreeMap<String, Vec<Record>>;

/// Reads every collection file in `dir`.
///
/// Fails with `DirectoryNotFound` when `dir` cannot be enumerated, and with
/// `InvalidData` when any collection file is malformed.
pub(crate) fn load_collections(dir: &Path) -> StoreResult<Collections> {
    if !dir.is_dir() {
        return Err(StoreError::DirectoryNotFound(dir.to_path_buf()));
    }
    let entries =
        fs::read_dir(dir).map_err(|_| StoreError::DirectoryNotFound(dir.to_path_buf()))?;

    let mut collections = Collections::new();
    for entry in entries {
        let path = entry.map_err(|source| io_error(dir, source))?.path();

        if !is_collection_file(&path) {
            debug!("event=collection_skip module=store path={}", path.display());
            continue;
        }
        let Some(name) = collection_name(&path) else {
            warn!(
                "event=collection_skip module=store status=unnamed path={}",
                path.display()
            );
            continue;
        };

        let records = read_collection_file(&path)?;
        collections.insert(name, records);
    }

    Ok(collections)
}

/// Writes every collection to `<dir>/<name>.json`, creating `dir` if needed.
pub(crate) fn write_collections(dir: &Path, collections: &Collections) -> StoreResult<()> {
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

    for (name, records) in collections {
        let path = collection_path(dir, name);
        let mut body = serde_json::to_string_pretty(records)?;
        body.push('\n');
        fs::write(&path, body).map_err(|source| io_error(&path, source))?;
    }

    Ok(())
}

/// Returns the file backing collection `name` inside `dir`.
pub(crate) fn collection_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{COLLECTION_FILE_EXTENSION}"))
}

fn is_collection_file(path: &Path) -> bool {
    path.is_file()
        && path.extension().and_then(|ext| ext.to_str()) == Some(COLLECTION_FILE_EXTENSION)
}

/// Derives the collection name for a collection file.
///
/// `None` for non-UTF-8 or blank stems, which `find` could not address.
fn collection_name(path: &Path) -> Option<String> {
    if !is_collection_file(path) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.trim().is_empty() {
        return None;
    }
    Some(stem.to_string())
}

fn read_collection_file(path: &Path) -> StoreResult<Vec<Record>> {
    let body = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::InvalidData => {
            StoreError::InvalidData(format!("`{}` is not valid UTF-8", path.display()))
        }
        _ => io_error(path, source),
    })?;
    let records: Vec<Record> = serde_json::from_str(&body).map_err(|err| {
        StoreError::InvalidData(format!("`{}` is not a record array: {err}", path.display()))
    })?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        record
            .validate()
            .map_err(|err| StoreError::InvalidData(format!("`{}`: {err}", path.display())))?;
        if !seen.insert(record.id.as_str()) {
            return Err(StoreError::InvalidData(format!(
                "`{}`: duplicate `_id` `{}`",
                path.display(),
                record.id
            )));
        }
    }

    Ok(records)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
