//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Multi-record writes go through a single `WriteBatch`; batched reads use
//! `multi_get_cf`.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use playground_core::{
    ExampleEntity, ExampleId, FileEntity, Origin, PrecompiledObjectEntity, PrecompiledObjectKind,
    SchemaEntity, Sdk, SdkEntity, Snippet, SnippetEntity, SnippetId,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{distinct_sdks, Store};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes snippet read-modify-write cycles so a visit refresh cannot
    /// overwrite a concurrent `put_snippet` with a stale entity.
    snippet_writes: Mutex<()>,
    /// Set while a retention sweep runs against this handle.
    sweeping: AtomicBool,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            snippet_writes: Mutex::new(()),
            sweeping: AtomicBool::new(false),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    fn lock_snippets(&self) -> Result<MutexGuard<'_, ()>> {
        self.snippet_writes
            .lock()
            .map_err(|_| StoreError::Database("snippet write lock poisoned".into()))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn get_value<T: serde::de::DeserializeOwned>(
        &self,
        cf: &Arc<BoundColumnFamily<'_>>,
        key: &[u8],
    ) -> Result<Option<T>> {
        self.db
            .get_cf(cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn multi_get<T: serde::de::DeserializeOwned>(
        &self,
        cf: &Arc<BoundColumnFamily<'_>>,
        keys: &[Vec<u8>],
    ) -> Result<Vec<Option<T>>> {
        self.db
            .multi_get_cf(keys.iter().map(|key| (cf, key)))
            .into_iter()
            .map(|item| {
                item.map_err(|e| StoreError::Database(e.to_string()))?
                    .map(|data| Self::deserialize(&data))
                    .transpose()
            })
            .collect()
    }

    /// Collect every `(key, value)` pair whose key starts with `prefix`.
    fn scan_prefix(
        &self,
        cf: &Arc<BoundColumnFamily<'_>>,
        prefix: &[u8],
    ) -> Result<Vec<(Box<[u8]>, Box<[u8]>)>> {
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward));

        let mut entries = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(prefix) {
                break;
            }
            entries.push((key, value));
        }
        Ok(entries)
    }

    fn snippet_id_from_key(key: &[u8]) -> Result<SnippetId> {
        let id = std::str::from_utf8(key).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(id.parse()?)
    }

    /// Batch deleting a snippet entity and all of its files.
    fn snippet_delete_batch(&self, id: &SnippetId) -> Result<WriteBatch> {
        let cf_snippets = self.cf(cf::SNIPPETS)?;
        let cf_files = self.cf(cf::FILES)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_snippets, keys::snippet_key(id));
        for (key, _) in self.scan_prefix(&cf_files, &keys::file_prefix(id))? {
            batch.delete_cf(&cf_files, key);
        }
        Ok(batch)
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Snippet Operations
    // =========================================================================

    fn put_snippet(&self, id: &SnippetId, snippet: &Snippet) -> Result<()> {
        snippet.validate()?;

        let _guard = self.lock_snippets()?;
        let cf_snippets = self.cf(cf::SNIPPETS)?;
        let cf_files = self.cf(cf::FILES)?;

        let mut batch = WriteBatch::default();
        // Files of a previous version; later puts in the batch win for reused indexes.
        for (key, _) in self.scan_prefix(&cf_files, &keys::file_prefix(id))? {
            batch.delete_cf(&cf_files, key);
        }
        batch.put_cf(
            &cf_snippets,
            keys::snippet_key(id),
            Self::serialize(&snippet.snippet)?,
        );
        for (index, file) in snippet.files.iter().enumerate() {
            batch.put_cf(&cf_files, keys::file_key(id, index), Self::serialize(file)?);
        }

        self.write(batch)?;
        tracing::debug!(snippet_id = %id, files = snippet.files.len(), "Snippet stored");

        Ok(())
    }

    fn get_snippet(&self, id: &SnippetId) -> Result<SnippetEntity> {
        let _guard = self.lock_snippets()?;
        let cf = self.cf(cf::SNIPPETS)?;
        let key = keys::snippet_key(id);

        let mut entity: SnippetEntity = self
            .get_value(&cf, &key)?
            .ok_or_else(|| StoreError::not_found("snippet", id))?;

        entity.touch(Utc::now());
        self.db
            .put_cf(&cf, key, Self::serialize(&entity)?)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(entity)
    }

    fn get_files(&self, id: &SnippetId, number_of_files: usize) -> Result<Vec<FileEntity>> {
        let cf = self.cf(cf::FILES)?;
        let file_keys: Vec<Vec<u8>> = (0..number_of_files)
            .map(|index| keys::file_key(id, index))
            .collect();

        self.multi_get(&cf, &file_keys)?
            .into_iter()
            .collect::<Option<Vec<FileEntity>>>()
            .ok_or_else(|| StoreError::not_found("files", id))
    }

    fn delete_snippet(&self, id: &SnippetId) -> Result<()> {
        let _guard = self.lock_snippets()?;
        let batch = self.snippet_delete_batch(id)?;
        self.write(batch)
    }

    fn delete_snippet_if(
        &self,
        id: &SnippetId,
        condition: &dyn Fn(&SnippetEntity) -> bool,
    ) -> Result<bool> {
        let _guard = self.lock_snippets()?;
        let cf = self.cf(cf::SNIPPETS)?;

        let entity: Option<SnippetEntity> = self.get_value(&cf, &keys::snippet_key(id))?;
        if !entity.as_ref().is_some_and(condition) {
            return Ok(false);
        }

        let batch = self.snippet_delete_batch(id)?;
        self.write(batch)?;
        Ok(true)
    }

    fn find_snippets(&self, origin: Option<Origin>) -> Result<Vec<(SnippetId, SnippetEntity)>> {
        let cf = self.cf(cf::SNIPPETS)?;

        let mut snippets = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let entity: SnippetEntity = Self::deserialize(&value)?;
            if origin.map_or(true, |origin| entity.origin == origin) {
                snippets.push((Self::snippet_id_from_key(&key)?, entity));
            }
        }

        Ok(snippets)
    }

    fn get_snippets(&self, ids: &[SnippetId]) -> Result<Vec<Option<SnippetEntity>>> {
        let cf = self.cf(cf::SNIPPETS)?;
        let snippet_keys: Vec<Vec<u8>> = ids.iter().map(keys::snippet_key).collect();
        self.multi_get(&cf, &snippet_keys)
    }

    fn get_files_multi(&self, requests: &[(SnippetId, usize)]) -> Result<Vec<Vec<FileEntity>>> {
        let cf = self.cf(cf::FILES)?;
        let file_keys: Vec<Vec<u8>> = requests
            .iter()
            .flat_map(|(id, count)| (0..*count).map(move |index| keys::file_key(id, index)))
            .collect();

        let mut found = self.multi_get::<FileEntity>(&cf, &file_keys)?.into_iter();
        Ok(requests
            .iter()
            .map(|(_, count)| {
                let slots: Vec<Option<FileEntity>> = found.by_ref().take(*count).collect();
                slots.into_iter().map_while(|file| file).collect()
            })
            .collect())
    }

    fn try_begin_sweep(&self) -> bool {
        self.sweeping
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn end_sweep(&self) {
        self.sweeping.store(false, Ordering::Release);
    }

    // =========================================================================
    // SDK and Schema Operations
    // =========================================================================

    fn put_sdks(&self, sdks: &[SdkEntity]) -> Result<()> {
        if sdks.is_empty() {
            return Ok(());
        }

        let cf = self.cf(cf::SDKS)?;
        let mut failed = Vec::new();
        for sdk in sdks {
            if sdk.name == Sdk::Unspecified {
                tracing::warn!("Refusing to store SDK_UNSPECIFIED");
                failed.push(sdk.name.to_string());
                continue;
            }
            let written = Self::serialize(sdk).and_then(|value| {
                self.db
                    .put_cf(&cf, keys::sdk_key(sdk.name), value)
                    .map_err(|e| StoreError::Database(e.to_string()))
            });
            if let Err(e) = written {
                tracing::warn!(sdk = %sdk.name, error = %e, "Failed to store SDK");
                failed.push(sdk.name.to_string());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(StoreError::PartialFailure {
                succeeded: sdks.len() - failed.len(),
                failed,
            })
        }
    }

    fn get_sdks(&self) -> Result<Vec<SdkEntity>> {
        let cf = self.cf(cf::SDKS)?;
        self.db
            .iterator_cf(&cf, IteratorMode::Start)
            .map(|item| {
                let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                Self::deserialize(&value)
            })
            .collect()
    }

    fn put_schema_version(&self, id: &str, schema: Option<&SchemaEntity>) -> Result<()> {
        let Some(schema) = schema else {
            return Ok(());
        };
        let cf = self.cf(cf::SCHEMA_VERSIONS)?;

        self.db
            .put_cf(&cf, keys::schema_key(id), Self::serialize(schema)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_schema_version(&self, id: &str) -> Result<SchemaEntity> {
        let cf = self.cf(cf::SCHEMA_VERSIONS)?;
        self.get_value(&cf, &keys::schema_key(id))?
            .ok_or_else(|| StoreError::not_found("schema version", id))
    }

    // =========================================================================
    // Example Operations
    // =========================================================================

    fn put_example(&self, example: &ExampleEntity) -> Result<()> {
        let id = example.id()?;
        let cf = self.cf(cf::EXAMPLES)?;

        self.db
            .put_cf(&cf, keys::example_key(&id), Self::serialize(example)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_example(&self, id: &ExampleId) -> Result<ExampleEntity> {
        let cf = self.cf(cf::EXAMPLES)?;
        self.get_value(&cf, &keys::example_key(id))?
            .ok_or_else(|| StoreError::not_found("example", id))
    }

    fn get_examples(&self, sdks: &[Sdk]) -> Result<Vec<(ExampleId, ExampleEntity)>> {
        let cf = self.cf(cf::EXAMPLES)?;

        let mut examples = Vec::new();
        for sdk in distinct_sdks(sdks) {
            for (_, value) in self.scan_prefix(&cf, &keys::example_prefix(sdk))? {
                let example: ExampleEntity = Self::deserialize(&value)?;
                examples.push((example.id()?, example));
            }
        }

        Ok(examples)
    }

    fn put_precompiled_object(
        &self,
        example_id: &ExampleId,
        kind: PrecompiledObjectKind,
        object: &PrecompiledObjectEntity,
    ) -> Result<()> {
        let cf = self.cf(cf::PRECOMPILED_OBJECTS)?;

        self.db
            .put_cf(
                &cf,
                keys::precompiled_object_key(example_id, kind),
                Self::serialize(object)?,
            )
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_precompiled_object(
        &self,
        example_id: &ExampleId,
        kind: PrecompiledObjectKind,
    ) -> Result<PrecompiledObjectEntity> {
        let cf = self.cf(cf::PRECOMPILED_OBJECTS)?;
        self.get_value(&cf, &keys::precompiled_object_key(example_id, kind))?
            .ok_or_else(|| {
                StoreError::not_found("precompiled object", format!("{example_id}_{kind}"))
            })
    }

    fn get_precompiled_objects(
        &self,
        example_ids: &[ExampleId],
    ) -> Result<Vec<Vec<PrecompiledObjectKind>>> {
        let cf = self.cf(cf::PRECOMPILED_OBJECTS)?;
        let object_keys: Vec<Vec<u8>> = example_ids
            .iter()
            .flat_map(|id| {
                PrecompiledObjectKind::ALL
                    .into_iter()
                    .map(move |kind| keys::precompiled_object_key(id, kind))
            })
            .collect();

        let found = self.multi_get::<PrecompiledObjectEntity>(&cf, &object_keys)?;
        Ok(found
            .chunks(PrecompiledObjectKind::ALL.len())
            .map(|chunk| {
                PrecompiledObjectKind::ALL
                    .into_iter()
                    .zip(chunk)
                    .filter_map(|(kind, object)| object.as_ref().map(|_| kind))
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogBuilder;
    use chrono::Duration;
    use playground_core::{Complexity, IdMeta, PrecompiledObjectType};
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn snippet(files: usize) -> Snippet {
        let files = (0..files)
            .map(|i| FileEntity::new(format!("MOCK_NAME_{i}"), format!("MOCK_CONTENT_{i}"), i == 0))
            .collect();
        Snippet::new(
            IdMeta {
                salt: "MOCK_SALT".into(),
                id_length: 11,
            },
            Sdk::Go,
            "MOCK_OPTIONS",
            Origin::PgUser,
            files,
            Utc::now() - Duration::days(1),
        )
    }

    #[test]
    fn snippet_crud() {
        let (store, _dir) = create_test_store();
        let id: SnippetId = "MOCK_ID".parse().unwrap();

        // Create
        store.put_snippet(&id, &snippet(3)).unwrap();

        // Read
        let entity = store.get_snippet(&id).unwrap();
        assert_eq!(entity.number_of_files, 3);
        assert_eq!(entity.visit_count, 1);
        let files = store.get_files(&id, 3).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["MOCK_NAME_0", "MOCK_NAME_1", "MOCK_NAME_2"]);

        // Overwrite with fewer files
        store.put_snippet(&id, &snippet(1)).unwrap();
        assert!(store.get_files(&id, 2).is_err());
        let cf_files = store.cf(cf::FILES).unwrap();
        assert_eq!(
            store.scan_prefix(&cf_files, &keys::file_prefix(&id)).unwrap().len(),
            1
        );

        // Delete twice
        store.delete_snippet(&id).unwrap();
        store.delete_snippet(&id).unwrap();
        assert!(matches!(
            store.get_snippet(&id),
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.get_files(&id, 1).is_err());
    }

    #[test]
    fn visit_refresh_is_persisted() {
        let (store, _dir) = create_test_store();
        let id: SnippetId = "MOCK_ID".parse().unwrap();
        let written = snippet(1);
        store.put_snippet(&id, &written).unwrap();

        store.get_snippet(&id).unwrap();
        let stored = store.get_snippets(&[id]).unwrap().remove(0).unwrap();
        assert_eq!(stored.visit_count, 1);
        assert!(stored.last_visited > written.snippet.last_visited);
    }

    #[test]
    fn batched_file_reads_stop_at_gaps() {
        let (store, _dir) = create_test_store();
        let a: SnippetId = "A".parse().unwrap();
        let b: SnippetId = "B".parse().unwrap();
        store.put_snippet(&a, &snippet(2)).unwrap();
        store.put_snippet(&b, &snippet(1)).unwrap();

        let files = store
            .get_files_multi(&[(a, 2), ("MISSING".parse().unwrap(), 1), (b, 3)])
            .unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].len(), 2);
        assert!(files[1].is_empty());
        assert_eq!(files[2].len(), 1);
    }

    #[test]
    fn find_snippets_filters_by_origin() {
        let (store, _dir) = create_test_store();
        let mut example = snippet(1);
        example.snippet.origin = Origin::PgExamples;
        store.put_snippet(&"USER".parse().unwrap(), &snippet(1)).unwrap();
        store.put_snippet(&"EXAMPLE".parse().unwrap(), &example).unwrap();

        assert_eq!(store.find_snippets(None).unwrap().len(), 2);
        let users = store.find_snippets(Some(Origin::PgUser)).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].0.as_str(), "USER");
    }

    #[test]
    fn sdk_batch_reports_unspecified() {
        let (store, _dir) = create_test_store();
        let result = store.put_sdks(&[
            SdkEntity::new(Sdk::Java, "WordCount"),
            SdkEntity::new(Sdk::Unspecified, ""),
            SdkEntity::new(Sdk::Go, "MinimalWordCount"),
        ]);

        match result {
            Err(StoreError::PartialFailure { failed, succeeded }) => {
                assert_eq!(failed, ["SDK_UNSPECIFIED"]);
                assert_eq!(succeeded, 2);
            }
            other => panic!("expected partial failure, got {other:?}"),
        }
        assert_eq!(store.get_sdks().unwrap().len(), 2);
    }

    fn seed_example(
        store: &RocksStore,
        sdk: Sdk,
        name: &str,
        kinds: &[PrecompiledObjectKind],
    ) -> ExampleId {
        let example = ExampleEntity {
            name: name.into(),
            sdk,
            description: "MOCK_DESCR".into(),
            categories: vec!["MOCK_CATEGORY".into()],
            complexity: Complexity::Basic,
            content_path: "MOCK_PATH".into(),
            object_type: PrecompiledObjectType::Example,
            origin: Origin::PgExamples,
            schema_version: "MOCK_VERSION".into(),
        };
        let id = example.id().unwrap();
        store.put_example(&example).unwrap();

        let mut example_snippet = snippet(2);
        example_snippet.snippet.sdk = sdk;
        example_snippet.snippet.origin = Origin::PgExamples;
        store.put_snippet(&id.snippet_id(), &example_snippet).unwrap();

        for kind in kinds {
            store
                .put_precompiled_object(
                    &id,
                    *kind,
                    &PrecompiledObjectEntity {
                        content: format!("{name}_{kind}"),
                    },
                )
                .unwrap();
        }
        id
    }

    #[test]
    fn precompiled_objects_align_with_examples() {
        let (store, _dir) = create_test_store();
        let graph = seed_example(
            &store,
            Sdk::Go,
            "A",
            &[PrecompiledObjectKind::Output, PrecompiledObjectKind::Graph],
        );
        let bare = seed_example(&store, Sdk::Go, "B", &[]);
        let log = seed_example(&store, Sdk::Java, "C", &[PrecompiledObjectKind::Log]);

        let kinds = store
            .get_precompiled_objects(&[graph.clone(), bare, log.clone()])
            .unwrap();
        assert_eq!(
            kinds,
            vec![
                vec![PrecompiledObjectKind::Output, PrecompiledObjectKind::Graph],
                vec![],
                vec![PrecompiledObjectKind::Log],
            ]
        );

        let object = store
            .get_precompiled_object(&log, PrecompiledObjectKind::Log)
            .unwrap();
        assert_eq!(object.content, "C_LOG");
        assert!(matches!(
            store.get_precompiled_object(&graph, PrecompiledObjectKind::Log),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn examples_are_scanned_per_sdk() {
        let (store, _dir) = create_test_store();
        seed_example(&store, Sdk::Python, "Z", &[]);
        seed_example(&store, Sdk::Go, "B", &[]);
        seed_example(&store, Sdk::Go, "A", &[]);

        let ids: Vec<String> = store
            .get_examples(&[Sdk::Python, Sdk::Go, Sdk::Python])
            .unwrap()
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect();
        assert_eq!(ids, ["SDK_PYTHON_Z", "SDK_GO_A", "SDK_GO_B"]);
        assert!(store.get_examples(&[Sdk::Scio]).unwrap().is_empty());
    }

    #[test]
    fn catalog_over_rocks_store() {
        let (store, _dir) = create_test_store();
        seed_example(&store, Sdk::Go, "A", &[PrecompiledObjectKind::Output]);
        seed_example(&store, Sdk::Go, "NO_ARTIFACTS", &[]);
        seed_example(&store, Sdk::Java, "B", &PrecompiledObjectKind::ALL);

        let catalog = CatalogBuilder::new(&store)
            .get_catalog(&[SdkEntity::new(Sdk::Go, "A"), SdkEntity::new(Sdk::Java, "X")])
            .unwrap();

        let sdks: Vec<Sdk> = catalog.iter().map(|entry| entry.sdk).collect();
        assert_eq!(sdks, [Sdk::Java, Sdk::Go]);

        let go_objects = &catalog[1].categories[0].precompiled_objects;
        assert_eq!(go_objects.len(), 1);
        assert_eq!(go_objects[0].name, "A");
        assert_eq!(go_objects[0].cloud_path, "SDK_GO/PRECOMPILED_OBJECT_TYPE_EXAMPLE/A");
        assert!(go_objects[0].multifile);
        assert!(go_objects[0].default_example);

        let java_objects = &catalog[0].categories[0].precompiled_objects;
        assert_eq!(java_objects.len(), 1);
        assert!(!java_objects[0].default_example);
    }

    #[test]
    fn conditional_delete_sees_visit() {
        let (store, _dir) = create_test_store();
        let id: SnippetId = "MOCK_ID".parse().unwrap();
        store.put_snippet(&id, &snippet(2)).unwrap();
        let now = Utc::now();

        store.get_snippet(&id).unwrap();
        let expired = |s: &SnippetEntity| playground_core::is_expired(s, now, 1);
        assert!(!store.delete_snippet_if(&id, &expired).unwrap());

        assert!(store.delete_snippet_if(&id, &|_| true).unwrap());
        assert!(store.get_files(&id, 1).is_err());
    }

    #[test]
    fn sweep_mark_is_exclusive() {
        let (store, _dir) = create_test_store();
        assert!(store.try_begin_sweep());
        assert!(!store.try_begin_sweep());
        store.end_sweep();
        assert!(store.try_begin_sweep());
    }
}
