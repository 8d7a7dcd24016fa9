//! Store construction.
//!
//! All backend selection happens here, from explicit fields. Nothing else in
//! the crate reads the environment.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::{MemoryStore, Store};

/// Configuration for [`open_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory for `RocksDB` data (default: "/data/playground").
    pub data_dir: PathBuf,

    /// Project the data belongs to. Each project gets its own database under `data_dir`.
    pub project_id: String,

    /// Use the in-memory store instead of `RocksDB`.
    pub mock: bool,
}

impl StoreConfig {
    /// Configuration for the in-memory store.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            mock: true,
            ..Self::default()
        }
    }

    /// Directory of this project's database.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.project_id)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/data/playground"),
            project_id: "playground".into(),
            mock: false,
        }
    }
}

/// Construct the store selected by `config`.
///
/// # Errors
///
/// - `StoreError::Configuration` if `project_id` is empty, or a real store is
///   requested but the `rocksdb-backend` feature is disabled.
/// - `StoreError::Database` if the database cannot be opened.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn Store>> {
    if config.mock {
        tracing::info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if config.project_id.is_empty() {
        return Err(crate::StoreError::Configuration(
            "project id must not be empty".into(),
        ));
    }

    open_rocks(config)
}

#[cfg(feature = "rocksdb-backend")]
fn open_rocks(config: &StoreConfig) -> Result<Arc<dyn Store>> {
    let path = config.database_path();
    tracing::info!(path = %path.display(), project_id = %config.project_id, "Opening RocksDB store");
    Ok(Arc::new(crate::RocksStore::open(path)?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_rocks(_config: &StoreConfig) -> Result<Arc<dyn Store>> {
    Err(crate::StoreError::Configuration(
        "built without the rocksdb-backend feature; set the mock flag".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    #[test]
    fn mock_config_opens_memory_store() {
        let store = open_store(&StoreConfig::mock()).unwrap();
        assert!(store.get_sdks().unwrap().is_empty());
    }

    #[test]
    fn empty_project_id_is_rejected() {
        let config = StoreConfig {
            project_id: String::new(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            open_store(&config),
            Err(StoreError::Configuration(_))
        ));
    }

    #[test]
    fn database_path_is_per_project() {
        let config = StoreConfig {
            data_dir: PathBuf::from("/tmp/pg"),
            project_id: "demo".into(),
            mock: false,
        };
        assert_eq!(config.database_path(), PathBuf::from("/tmp/pg/demo"));
    }
}
