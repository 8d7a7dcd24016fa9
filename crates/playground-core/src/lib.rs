//! Core types and utilities for the playground snippet store.
//!
//! This crate provides the foundational types shared by the store, the catalog
//! builder and the retention sweeper:
//!
//! - **Identifiers**: `SnippetId`, `ExampleId`, and the content-addressed
//!   identifier generator
//! - **SDKs**: `Sdk`, `SdkEntity`
//! - **Snippets**: `Snippet`, `SnippetEntity`, `FileEntity`, `IdMeta`, `Origin`
//! - **Examples**: `ExampleEntity`, `PrecompiledObjectEntity`, `SchemaEntity`
//! - **Catalog**: `SdkCatalogEntry`, `CategoryEntry`, `ObjectInfo`
//! - **Retention**: the origin-aware age predicate used by the sweeper
//!
//! # Identifiers
//!
//! User snippet ids are derived from content: the same files, SDK and
//! pipeline options under the same salt always produce the same id, which lets
//! the HTTP layer detect re-submissions without a lookup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod example;
pub mod idgen;
pub mod ids;
pub mod retention;
pub mod sdk;
pub mod snippet;

pub use catalog::{assemble, CatalogRecord, CategoryEntry, ObjectInfo, SdkCatalogEntry};
pub use error::{IdError, ValidationError};
pub use example::{
    Complexity, ExampleEntity, PrecompiledObjectEntity, PrecompiledObjectKind,
    PrecompiledObjectType, SchemaEntity,
};
pub use idgen::{generate_id, CONTENT_DELIMITER};
pub use ids::{ExampleId, SnippetId};
pub use retention::{age_in_days, is_expired};
pub use sdk::{Sdk, SdkEntity};
pub use snippet::{FileEntity, IdMeta, Origin, Snippet, SnippetEntity};
