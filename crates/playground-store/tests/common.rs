//! Common fixtures for playground store integration tests.

#![allow(dead_code)] // Some fixtures are used by different test files

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use playground_core::{
    Complexity, ExampleEntity, FileEntity, IdMeta, Origin, PrecompiledObjectEntity,
    PrecompiledObjectKind, PrecompiledObjectType, Sdk, Snippet, SnippetId,
};
use playground_store::{MemoryStore, Store};

/// Fixed reference time for retention tests.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 5, 20, 12, 0, 0).unwrap()
}

pub fn id_meta() -> IdMeta {
    IdMeta {
        salt: "MOCK_SALT".into(),
        id_length: 11,
    }
}

/// A snippet with `files` files, the first one being main.
pub fn snippet(sdk: Sdk, origin: Origin, files: usize, now: DateTime<Utc>) -> Snippet {
    let files = (0..files)
        .map(|i| {
            let mut file = FileEntity::new(
                format!("MOCK_NAME_{i}"),
                format!("MOCK_CONTENT_{i}"),
                i == 0,
            );
            file.context_line = 10 + i32::try_from(i).unwrap();
            file
        })
        .collect();
    Snippet::new(id_meta(), sdk, "MOCK_OPTIONS", origin, files, now)
}

/// Store a snippet last visited `days_ago` days before `now` and return its id.
pub fn seed_visited(
    store: &MemoryStore,
    name: &str,
    origin: Origin,
    now: DateTime<Utc>,
    days_ago: i64,
) -> SnippetId {
    let id: SnippetId = name.parse().unwrap();
    let mut snippet = snippet(Sdk::Go, origin, 1, now - Duration::days(days_ago));
    snippet.snippet.last_visited = now - Duration::days(days_ago);
    store.put_snippet(&id, &snippet).unwrap();
    id
}

pub fn example(sdk: Sdk, name: &str, categories: &[&str]) -> ExampleEntity {
    ExampleEntity {
        name: name.into(),
        sdk,
        description: "MOCK_DESCR".into(),
        categories: categories.iter().map(|c| (*c).to_string()).collect(),
        complexity: Complexity::Medium,
        content_path: "MOCK_PATH".into(),
        object_type: PrecompiledObjectType::Example,
        origin: Origin::PgExamples,
        schema_version: "MOCK_VERSION".into(),
    }
}

/// Store an example, its snippet with `files` files, and one artifact per kind.
pub fn seed_example(
    store: &MemoryStore,
    example: &ExampleEntity,
    files: usize,
    kinds: &[PrecompiledObjectKind],
) {
    let id = example.id().unwrap();
    store.put_example(example).unwrap();
    store
        .put_snippet(
            &id.snippet_id(),
            &snippet(example.sdk, Origin::PgExamples, files, Utc::now()),
        )
        .unwrap();
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

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}
