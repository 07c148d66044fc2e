//! Store configuration and built-in default locations.
//!
//! # Responsibility
//! - Resolve where collections are loaded from and written to.
//! - Keep defaults explicit so independent store instances never share state.
//!
//! # Invariants
//! - Defaults are fixed at build time and do not depend on the working directory.
//! - Blank environment overrides are ignored.

use std::path::PathBuf;

/// Bundled collection directory shipped with the core crate.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
/// Scratch output directory used when no output location is configured.
pub const DEFAULT_OUTPUT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tmp");

/// Environment variable overriding `data_dir` in [`StoreConfig::from_env`].
pub const DATA_DIR_ENV: &str = "TRACKSTORE_DATA_DIR";
/// Environment variable overriding `output_dir` in [`StoreConfig::from_env`].
pub const OUTPUT_DIR_ENV: &str = "TRACKSTORE_OUTPUT_DIR";

/// Paths used by one `CollectionStore` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory enumerated at construction, one `<name>.json` per collection.
    pub data_dir: PathBuf,
    /// Directory targeted by `write`.
    pub output_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl StoreConfig {
    /// Creates a config with both locations set explicitly.
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Replaces the load directory, keeping the current output directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Replaces the output directory, keeping the current load directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builds a config from defaults plus `TRACKSTORE_*` environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = non_blank_path(lookup(DATA_DIR_ENV)) {
            config.data_dir = path;
        }
        if let Some(path) = non_blank_path(lookup(OUTPUT_DIR_ENV)) {
            config.output_dir = path;
        }
        config
    }
}

fn non_blank_path(raw: Option<String>) -> Option<PathBuf> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}
