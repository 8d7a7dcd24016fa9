//! Catalog builder.
//!
//! Reconstructs the SDK -> category -> object tree from independently stored
//! records. The join is four batched reads (examples, precompiled objects,
//! snippets, files) followed by one aggregation pass; no per-example round
//! trips.

use playground_core::catalog::assemble;
use playground_core::{
    CatalogRecord, ExampleEntity, ExampleId, FileEntity, ObjectInfo, Sdk, SdkCatalogEntry,
    SdkEntity, SnippetEntity, SnippetId,
};

use crate::error::{Result, StoreError};
use crate::Store;

/// Builds catalog views from a [`Store`].
pub struct CatalogBuilder<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> CatalogBuilder<'a, S> {
    /// Create a builder reading from `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Build the catalog for the given SDKs.
    ///
    /// Examples without precompiled objects or without a stored snippet are
    /// logged and left out rather than failing the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the batched reads fails.
    pub fn get_catalog(&self, sdk_catalog: &[SdkEntity]) -> Result<Vec<SdkCatalogEntry>> {
        let sdks: Vec<Sdk> = sdk_catalog.iter().map(|sdk| sdk.name).collect();
        let examples = self.store.get_examples(&sdks)?;
        let example_count = examples.len();

        let records = self.join(examples)?;
        tracing::info!(
            sdks = sdks.len(),
            examples = example_count,
            objects = records.len(),
            "Catalog built"
        );

        Ok(assemble(&records, sdk_catalog))
    }

    /// Resolve the default example of each SDK.
    ///
    /// SDKs whose default example is missing or incomplete are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails for a reason other than a missing record.
    pub fn get_default_examples(&self, sdk_catalog: &[SdkEntity]) -> Result<Vec<(Sdk, ObjectInfo)>> {
        let mut examples = Vec::with_capacity(sdk_catalog.len());
        for sdk in sdk_catalog {
            let Ok(id) = ExampleId::new(sdk.name, sdk.default_example.clone()) else {
                tracing::warn!(sdk = %sdk.name, "SDK has no default example");
                continue;
            };
            match self.store.get_example(&id) {
                Ok(example) => examples.push((id, example)),
                Err(StoreError::NotFound { .. }) => {
                    tracing::warn!(sdk = %sdk.name, example_id = %id, "Default example not found");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self
            .join(examples)?
            .iter()
            .map(|record| (record.example.sdk, ObjectInfo::from_record(record, true)))
            .collect())
    }

    fn join(&self, examples: Vec<(ExampleId, ExampleEntity)>) -> Result<Vec<CatalogRecord>> {
        let example_ids: Vec<ExampleId> = examples.iter().map(|(id, _)| id.clone()).collect();
        let snippet_ids: Vec<SnippetId> = example_ids.iter().map(ExampleId::snippet_id).collect();

        let artifacts = self.store.get_precompiled_objects(&example_ids)?;
        let snippets = self.store.get_snippets(&snippet_ids)?;

        let mut joined: Vec<(ExampleEntity, SnippetEntity)> = Vec::with_capacity(examples.len());
        let mut file_requests: Vec<(SnippetId, usize)> = Vec::with_capacity(examples.len());
        for (((id, example), kinds), (snippet_id, snippet)) in examples
            .into_iter()
            .zip(artifacts)
            .zip(snippet_ids.into_iter().zip(snippets))
        {
            if kinds.is_empty() {
                tracing::warn!(example_id = %id, "Example has no precompiled objects, skipping");
                continue;
            }
            let Some(snippet) = snippet else {
                tracing::warn!(example_id = %id, "Example snippet not found, skipping");
                continue;
            };
            file_requests.push((snippet_id, snippet.number_of_files));
            joined.push((example, snippet));
        }

        let files = self.store.get_files_multi(&file_requests)?;

        Ok(joined
            .into_iter()
            .zip(files)
            .map(|((example, snippet), files)| CatalogRecord {
                context_line: main_context_line(&example, &files),
                example,
                snippet,
            })
            .collect())
    }
}

/// Context line of the main file, falling back to the first file.
fn main_context_line(example: &ExampleEntity, files: &[FileEntity]) -> i32 {
    match files.iter().find(|file| file.is_main).or_else(|| files.first()) {
        Some(file) => file.context_line,
        None => {
            tracing::warn!(example = %example.name, sdk = %example.sdk, "Example snippet has no files");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::Utc;
    use playground_core::{
        Complexity, IdMeta, Origin, PrecompiledObjectEntity, PrecompiledObjectKind,
        PrecompiledObjectType, Snippet,
    };

    fn seed(store: &MemoryStore, sdk: Sdk, name: &str, kinds: &[PrecompiledObjectKind]) {
        let example = ExampleEntity {
            name: name.into(),
            sdk,
            description: "MOCK_DESCR".into(),
            categories: vec!["MOCK_CATEGORY".into()],
            complexity: Complexity::Medium,
            content_path: "MOCK_PATH".into(),
            object_type: PrecompiledObjectType::Example,
            origin: Origin::PgExamples,
            schema_version: "MOCK_VERSION".into(),
        };
        let id = example.id().unwrap();
        store.put_example(&example).unwrap();

        let mut file = FileEntity::new("MOCK_NAME", "MOCK_CONTENT", true);
        file.context_line = 32;
        let snippet = Snippet::new(
            IdMeta {
                salt: "MOCK_SALT".into(),
                id_length: 11,
            },
            sdk,
            "MOCK_OPTIONS",
            Origin::PgExamples,
            vec![file],
            Utc::now(),
        );
        store.put_snippet(&id.snippet_id(), &snippet).unwrap();

        for kind in kinds {
            store
                .put_precompiled_object(
                    &id,
                    *kind,
                    &PrecompiledObjectEntity {
                        content: format!("MOCK_CONTENT_{kind}"),
                    },
                )
                .unwrap();
        }
    }

    #[test]
    fn example_without_artifacts_is_skipped() {
        let store = MemoryStore::new();
        seed(&store, Sdk::Java, "WITH", &PrecompiledObjectKind::ALL);
        seed(&store, Sdk::Java, "WITHOUT", &[]);

        let catalog = CatalogBuilder::new(&store)
            .get_catalog(&[SdkEntity::new(Sdk::Java, "WITH")])
            .unwrap();

        let objects = &catalog[0].categories[0].precompiled_objects;
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "WITH");
        assert!(objects[0].default_example);
    }

    #[test]
    fn default_examples_skip_missing() {
        let store = MemoryStore::new();
        seed(&store, Sdk::Go, "MinimalWordCount", &[PrecompiledObjectKind::Output]);

        let defaults = CatalogBuilder::new(&store)
            .get_default_examples(&[
                SdkEntity::new(Sdk::Go, "MinimalWordCount"),
                SdkEntity::new(Sdk::Python, "Missing"),
                SdkEntity::new(Sdk::Java, ""),
            ])
            .unwrap();

        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].0, Sdk::Go);
        assert_eq!(defaults[0].1.name, "MinimalWordCount");
        assert!(defaults[0].1.default_example);
    }

    #[test]
    fn context_line_falls_back_to_first_file() {
        let example = ExampleEntity {
            name: "E".into(),
            sdk: Sdk::Go,
            description: String::new(),
            categories: vec![],
            complexity: Complexity::Basic,
            content_path: String::new(),
            object_type: PrecompiledObjectType::Example,
            origin: Origin::PgExamples,
            schema_version: String::new(),
        };
        let mut first = FileEntity::new("a.go", "", false);
        first.context_line = 7;
        assert_eq!(main_context_line(&example, &[first]), 7);
        assert_eq!(main_context_line(&example, &[]), 0);
    }
}
