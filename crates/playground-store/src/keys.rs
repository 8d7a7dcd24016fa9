//! Key encoding utilities for `RocksDB`.
//!
//! Composite keys join their parts with a `0x00` separator, which identifiers
//! are not allowed to contain, so a prefix never matches a longer id.

use playground_core::{ExampleId, PrecompiledObjectKind, Sdk, SnippetId};

const SEPARATOR: u8 = 0;

/// Create a snippet key from a snippet ID.
#[must_use]
pub fn snippet_key(id: &SnippetId) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// Create a prefix covering every file of a snippet.
#[must_use]
pub fn file_prefix(id: &SnippetId) -> Vec<u8> {
    let mut key = Vec::with_capacity(id.as_bytes().len() + 1);
    key.extend_from_slice(id.as_bytes());
    key.push(SEPARATOR);
    key
}

/// Create a file key.
///
/// Format: `snippet_id || 0x00 || index (8 bytes, big-endian)`
///
/// Big-endian indexes make the keys of one snippet sort in file order.
#[must_use]
pub fn file_key(id: &SnippetId, index: usize) -> Vec<u8> {
    let mut key = file_prefix(id);
    key.extend_from_slice(&(index as u64).to_be_bytes());
    key
}

/// Create an SDK key.
#[must_use]
pub fn sdk_key(sdk: Sdk) -> Vec<u8> {
    sdk.as_str().as_bytes().to_vec()
}

/// Create a schema version key.
#[must_use]
pub fn schema_key(id: &str) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// Create a prefix covering every example of an SDK.
#[must_use]
pub fn example_prefix(sdk: Sdk) -> Vec<u8> {
    let mut key = sdk_key(sdk);
    key.push(SEPARATOR);
    key
}

/// Create an example key.
///
/// Format: `sdk || 0x00 || name`
#[must_use]
pub fn example_key(id: &ExampleId) -> Vec<u8> {
    let mut key = example_prefix(id.sdk());
    key.extend_from_slice(id.name().as_bytes());
    key
}

/// Create a precompiled object key.
///
/// Format: `example_key || 0x00 || kind`
#[must_use]
pub fn precompiled_object_key(id: &ExampleId, kind: PrecompiledObjectKind) -> Vec<u8> {
    let mut key = example_key(id);
    key.push(SEPARATOR);
    key.extend_from_slice(kind.as_str().as_bytes());
    key
}
