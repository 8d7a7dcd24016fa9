//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Snippet entities, keyed by snippet id.
    pub const SNIPPETS: &str = "snippets";

    /// Snippet files, keyed by `snippet_id || 0x00 || index (u64 BE)`.
    /// Keys of one snippet sort in file order.
    pub const FILES: &str = "files";

    /// SDK rows, keyed by SDK wire name.
    pub const SDKS: &str = "sdks";

    /// Schema versions, keyed by version id.
    pub const SCHEMA_VERSIONS: &str = "schema_versions";

    /// Examples, keyed by `sdk || 0x00 || name`.
    pub const EXAMPLES: &str = "examples";

    /// Precompiled example artifacts, keyed by `example_key || 0x00 || kind`.
    pub const PRECOMPILED_OBJECTS: &str = "precompiled_objects";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::SNIPPETS,
        cf::FILES,
        cf::SDKS,
        cf::SCHEMA_VERSIONS,
        cf::EXAMPLES,
        cf::PRECOMPILED_OBJECTS,
    ]
}
