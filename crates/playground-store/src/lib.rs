//! Storage layer for playground snippets and the example catalog.
//!
//! This crate provides persistent storage for snippets, their files, SDKs,
//! curated examples and precompiled example artifacts, plus the two batch
//! consumers built on top of it: the catalog builder and the retention
//! sweeper. Both consumers depend only on the [`Store`] trait.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-process and deterministic, with failure injection for tests
//! - `RocksStore`: `RocksDB` with one column family per record kind
//!   (behind the `rocksdb-backend` feature)
//!
//! Use [`open_store`] to construct either from a [`StoreConfig`].
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use playground_core::{FileEntity, IdMeta, Origin, Sdk, Snippet};
//! use playground_store::{open_store, Store, StoreConfig};
//!
//! let store = open_store(&StoreConfig::mock()).unwrap();
//!
//! let snippet = Snippet::new(
//!     IdMeta { salt: "salt".into(), id_length: 11 },
//!     Sdk::Go,
//!     "",
//!     Origin::PgUser,
//!     vec![FileEntity::new("main.go", "package main", true)],
//!     Utc::now(),
//! );
//! let id = snippet.id().unwrap();
//! store.put_snippet(&id, &snippet).unwrap();
//!
//! let entity = store.get_snippet(&id).unwrap();
//! let files = store.get_files(&id, entity.number_of_files).unwrap();
//! assert_eq!(files[0].name, "main.go");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;
pub mod sweeper;

pub use catalog::CatalogBuilder;
pub use config::{open_store, StoreConfig};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;
pub use sweeper::{RetentionSweeper, SweepReport};

use playground_core::{
    ExampleEntity, ExampleId, FileEntity, Origin, PrecompiledObjectEntity, PrecompiledObjectKind,
    SchemaEntity, Sdk, SdkEntity, Snippet, SnippetEntity, SnippetId,
};

/// The storage trait defining all database operations.
///
/// Every method is consistent on its own: multi-record writes are atomic and
/// batched reads see one state of the store.
pub trait Store: Send + Sync {
    // =========================================================================
    // Snippet Operations
    // =========================================================================

    /// Write a snippet entity and all of its files atomically.
    ///
    /// Overwrites any snippet stored under `id`, including removing files
    /// beyond the new file count.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidInput` if the snippet fails validation.
    /// - `StoreError::Database` if the write fails; nothing is written.
    fn put_snippet(&self, id: &SnippetId, snippet: &Snippet) -> Result<()>;

    /// Get a snippet entity, recording the visit.
    ///
    /// `last_visited` is refreshed (never moved backwards) and `visit_count`
    /// incremented in the same step as the read.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no snippet is stored under `id`.
    fn get_snippet(&self, id: &SnippetId) -> Result<SnippetEntity>;

    /// Get the first `number_of_files` files of a snippet, in index order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if fewer than `number_of_files` files exist.
    fn get_files(&self, id: &SnippetId, number_of_files: usize) -> Result<Vec<FileEntity>>;

    /// Delete a snippet and all of its files. Deleting a missing snippet succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_snippet(&self, id: &SnippetId) -> Result<()>;

    /// Delete a snippet and its files only if `condition` holds for the
    /// currently stored entity. The check and the delete are one step with
    /// respect to `put_snippet` and `get_snippet`.
    ///
    /// Returns whether the snippet was deleted. A missing snippet is `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_snippet_if(
        &self,
        id: &SnippetId,
        condition: &dyn Fn(&SnippetEntity) -> bool,
    ) -> Result<bool>;

    /// Scan snippet entities, optionally restricted to one origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_snippets(&self, origin: Option<Origin>) -> Result<Vec<(SnippetId, SnippetEntity)>>;

    /// Batched snippet lookup without recording visits. Results align with `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_snippets(&self, ids: &[SnippetId]) -> Result<Vec<Option<SnippetEntity>>>;

    /// Batched file lookup. For each `(id, count)` returns the files found in
    /// index order, stopping at the first gap. Results align with `requests`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_files_multi(&self, requests: &[(SnippetId, usize)]) -> Result<Vec<Vec<FileEntity>>>;

    /// Mark a retention sweep as running over this store. Returns `false` if
    /// one already is, whichever sweeper started it.
    fn try_begin_sweep(&self) -> bool;

    /// Clear the mark set by a successful [`Store::try_begin_sweep`].
    fn end_sweep(&self);

    // =========================================================================
    // SDK and Schema Operations
    // =========================================================================

    /// Upsert SDK rows. An empty slice is a no-op.
    ///
    /// Each row is written on its own; one bad row does not block the rest.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PartialFailure` naming the SDKs that were not written.
    fn put_sdks(&self, sdks: &[SdkEntity]) -> Result<()>;

    /// Get every stored SDK row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_sdks(&self) -> Result<Vec<SdkEntity>>;

    /// Upsert a schema version. `None` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_schema_version(&self, id: &str, schema: Option<&SchemaEntity>) -> Result<()>;

    /// Get a schema version.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the schema version doesn't exist.
    fn get_schema_version(&self, id: &str) -> Result<SchemaEntity>;

    // =========================================================================
    // Example Operations
    // =========================================================================

    /// Upsert an example under `{SDK}_{name}`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the example name is not a valid id.
    fn put_example(&self, example: &ExampleEntity) -> Result<()>;

    /// Get an example by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the example doesn't exist.
    fn get_example(&self, id: &ExampleId) -> Result<ExampleEntity>;

    /// Get all examples of the given SDKs, grouped by SDK in request order and
    /// sorted by name within each SDK.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_examples(&self, sdks: &[Sdk]) -> Result<Vec<(ExampleId, ExampleEntity)>>;

    /// Upsert a precompiled artifact of an example.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_precompiled_object(
        &self,
        example_id: &ExampleId,
        kind: PrecompiledObjectKind,
        object: &PrecompiledObjectEntity,
    ) -> Result<()>;

    /// Get a precompiled artifact of an example.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the artifact doesn't exist.
    fn get_precompiled_object(
        &self,
        example_id: &ExampleId,
        kind: PrecompiledObjectKind,
    ) -> Result<PrecompiledObjectEntity>;

    /// Batched artifact presence check: the kinds stored for each example.
    /// Results align with `example_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_precompiled_objects(
        &self,
        example_ids: &[ExampleId],
    ) -> Result<Vec<Vec<PrecompiledObjectKind>>>;
}

/// Deduplicate SDKs, keeping the first occurrence of each.
pub(crate) fn distinct_sdks(sdks: &[Sdk]) -> Vec<Sdk> {
    let mut distinct = Vec::with_capacity(sdks.len());
    for sdk in sdks {
        if !distinct.contains(sdk) {
            distinct.push(*sdk);
        }
    }
    distinct
}
