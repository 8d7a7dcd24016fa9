//! In-memory storage implementation.
//!
//! `MemoryStore` keeps every record kind in ordered maps behind one lock, so
//! each trait call is atomic. It needs no backend and is deterministic, which
//! makes it the store of choice for tests and for local runs with the mock
//! flag set. Failures can be injected per key, and scans can be slowed down.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::Utc;

use playground_core::{
    ExampleEntity, ExampleId, FileEntity, Origin, PrecompiledObjectEntity, PrecompiledObjectKind,
    SchemaEntity, Sdk, SdkEntity, Snippet, SnippetEntity, SnippetId,
};

use crate::error::{Result, StoreError};
use crate::{distinct_sdks, Store};

#[derive(Debug, Default)]
struct Tables {
    snippets: BTreeMap<SnippetId, SnippetEntity>,
    files: BTreeMap<(SnippetId, usize), FileEntity>,
    sdks: BTreeMap<Sdk, SdkEntity>,
    schemas: BTreeMap<String, SchemaEntity>,
    examples: BTreeMap<ExampleId, ExampleEntity>,
    precompiled: BTreeMap<(ExampleId, PrecompiledObjectKind), PrecompiledObjectEntity>,
}

impl Tables {
    fn remove_files(&mut self, id: &SnippetId) {
        self.files.retain(|(snippet_id, _), _| snippet_id != id);
    }

    fn files_from(&self, id: &SnippetId, count: usize) -> Vec<FileEntity> {
        (0..count)
            .map_while(|index| self.files.get(&(id.clone(), index)).cloned())
            .collect()
    }
}

/// In-memory store with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    /// Snippet ids whose deletion fails with a database error.
    pub failing_deletes: Mutex<HashSet<SnippetId>>,
    /// SDKs whose write fails with a database error.
    pub failing_sdk_writes: Mutex<HashSet<Sdk>>,
    /// Delay applied to every snippet scan, to simulate a slow backend.
    pub scan_delay: Mutex<Option<Duration>>,
    sweeping: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every deletion of `id` fail until [`MemoryStore::clear_failures`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the failure set lock is poisoned.
    pub fn fail_delete_for(&self, id: &SnippetId) -> Result<()> {
        Self::lock(&self.failing_deletes)?.insert(id.clone());
        Ok(())
    }

    /// Make every write of `sdk` fail until [`MemoryStore::clear_failures`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the failure set lock is poisoned.
    pub fn fail_sdk_write_for(&self, sdk: Sdk) -> Result<()> {
        Self::lock(&self.failing_sdk_writes)?.insert(sdk);
        Ok(())
    }

    /// Make every snippet scan block for `delay` before reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the delay lock is poisoned.
    pub fn delay_scans(&self, delay: Duration) -> Result<()> {
        *Self::lock(&self.scan_delay)? = Some(delay);
        Ok(())
    }

    /// Remove all injected failures and delays.
    ///
    /// # Errors
    ///
    /// Returns an error if a failure set lock is poisoned.
    pub fn clear_failures(&self) -> Result<()> {
        Self::lock(&self.failing_deletes)?.clear();
        Self::lock(&self.failing_sdk_writes)?.clear();
        *Self::lock(&self.scan_delay)? = None;
        Ok(())
    }

    /// Number of file records stored for `id`, including any beyond `number_of_files`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn file_count(&self, id: &SnippetId) -> Result<usize> {
        Ok(self
            .read()?
            .files
            .keys()
            .filter(|(snippet_id, _)| snippet_id == id)
            .count())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }

    fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
        mutex
            .lock()
            .map_err(|_| StoreError::Database("failure injection lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    // =========================================================================
    // Snippet Operations
    // =========================================================================

    fn put_snippet(&self, id: &SnippetId, snippet: &Snippet) -> Result<()> {
        snippet.validate()?;

        let mut tables = self.write()?;
        tables.remove_files(id);
        tables.snippets.insert(id.clone(), snippet.snippet.clone());
        for (index, file) in snippet.files.iter().enumerate() {
            tables.files.insert((id.clone(), index), file.clone());
        }

        Ok(())
    }

    fn get_snippet(&self, id: &SnippetId) -> Result<SnippetEntity> {
        let mut tables = self.write()?;
        let entity = tables
            .snippets
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("snippet", id))?;

        entity.touch(Utc::now());
        Ok(entity.clone())
    }

    fn get_files(&self, id: &SnippetId, number_of_files: usize) -> Result<Vec<FileEntity>> {
        let files = self.read()?.files_from(id, number_of_files);
        if files.len() < number_of_files {
            return Err(StoreError::not_found("files", id));
        }
        Ok(files)
    }

    fn delete_snippet(&self, id: &SnippetId) -> Result<()> {
        if Self::lock(&self.failing_deletes)?.contains(id) {
            return Err(StoreError::Database(format!("injected delete failure: {id}")));
        }

        let mut tables = self.write()?;
        tables.snippets.remove(id);
        tables.remove_files(id);

        Ok(())
    }

    fn delete_snippet_if(
        &self,
        id: &SnippetId,
        condition: &dyn Fn(&SnippetEntity) -> bool,
    ) -> Result<bool> {
        if Self::lock(&self.failing_deletes)?.contains(id) {
            return Err(StoreError::Database(format!("injected delete failure: {id}")));
        }

        let mut tables = self.write()?;
        if !tables.snippets.get(id).is_some_and(condition) {
            return Ok(false);
        }
        tables.snippets.remove(id);
        tables.remove_files(id);

        Ok(true)
    }

    fn find_snippets(&self, origin: Option<Origin>) -> Result<Vec<(SnippetId, SnippetEntity)>> {
        let delay = *Self::lock(&self.scan_delay)?;
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        Ok(self
            .read()?
            .snippets
            .iter()
            .filter(|(_, entity)| origin.map_or(true, |origin| entity.origin == origin))
            .map(|(id, entity)| (id.clone(), entity.clone()))
            .collect())
    }

    fn get_snippets(&self, ids: &[SnippetId]) -> Result<Vec<Option<SnippetEntity>>> {
        let tables = self.read()?;
        Ok(ids.iter().map(|id| tables.snippets.get(id).cloned()).collect())
    }

    fn get_files_multi(&self, requests: &[(SnippetId, usize)]) -> Result<Vec<Vec<FileEntity>>> {
        let tables = self.read()?;
        Ok(requests
            .iter()
            .map(|(id, count)| tables.files_from(id, *count))
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

        let failing = Self::lock(&self.failing_sdk_writes)?.clone();
        let mut tables = self.write()?;
        let mut failed = Vec::new();
        for sdk in sdks {
            if sdk.name == Sdk::Unspecified || failing.contains(&sdk.name) {
                failed.push(sdk.name.to_string());
                continue;
            }
            tables.sdks.insert(sdk.name, sdk.clone());
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
        Ok(self.read()?.sdks.values().cloned().collect())
    }

    fn put_schema_version(&self, id: &str, schema: Option<&SchemaEntity>) -> Result<()> {
        let Some(schema) = schema else {
            return Ok(());
        };
        self.write()?.schemas.insert(id.to_string(), schema.clone());
        Ok(())
    }

    fn get_schema_version(&self, id: &str) -> Result<SchemaEntity> {
        self.read()?
            .schemas
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("schema version", id))
    }

    // =========================================================================
    // Example Operations
    // =========================================================================

    fn put_example(&self, example: &ExampleEntity) -> Result<()> {
        let id = example.id()?;
        self.write()?.examples.insert(id, example.clone());
        Ok(())
    }

    fn get_example(&self, id: &ExampleId) -> Result<ExampleEntity> {
        self.read()?
            .examples
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("example", id))
    }

    fn get_examples(&self, sdks: &[Sdk]) -> Result<Vec<(ExampleId, ExampleEntity)>> {
        let tables = self.read()?;
        let mut examples = Vec::new();
        for sdk in distinct_sdks(sdks) {
            examples.extend(
                tables
                    .examples
                    .iter()
                    .filter(|(id, _)| id.sdk() == sdk)
                    .map(|(id, example)| (id.clone(), example.clone())),
            );
        }
        Ok(examples)
    }

    fn put_precompiled_object(
        &self,
        example_id: &ExampleId,
        kind: PrecompiledObjectKind,
        object: &PrecompiledObjectEntity,
    ) -> Result<()> {
        self.write()?
            .precompiled
            .insert((example_id.clone(), kind), object.clone());
        Ok(())
    }

    fn get_precompiled_object(
        &self,
        example_id: &ExampleId,
        kind: PrecompiledObjectKind,
    ) -> Result<PrecompiledObjectEntity> {
        self.read()?
            .precompiled
            .get(&(example_id.clone(), kind))
            .cloned()
            .ok_or_else(|| StoreError::not_found("precompiled object", format!("{example_id}_{kind}")))
    }

    fn get_precompiled_objects(
        &self,
        example_ids: &[ExampleId],
    ) -> Result<Vec<Vec<PrecompiledObjectKind>>> {
        let tables = self.read()?;
        Ok(example_ids
            .iter()
            .map(|id| {
                PrecompiledObjectKind::ALL
                    .into_iter()
                    .filter(|kind| tables.precompiled.contains_key(&(id.clone(), *kind)))
                    .collect()
            })
            .collect())
    }
}
