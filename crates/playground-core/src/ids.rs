//! Identifier types for the playground store.
//!
//! This module provides strongly-typed identifiers for snippets and examples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{IdError, Sdk};

/// Separator byte used by the storage key encoding. Identifiers may not contain it.
const RESERVED: char = '\0';

/// A snippet identifier.
///
/// User snippets get a content-addressed id from [`crate::generate_id`];
/// example snippets reuse their example id (`SDK_JAVA_WordCount`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnippetId(String);

impl SnippetId {
    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the bytes of the identifier.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for SnippetId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        if s.contains(RESERVED) {
            return Err(IdError::ReservedCharacter(RESERVED));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnippetId({})", self.0)
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SnippetId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SnippetId> for String {
    fn from(id: SnippetId) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for SnippetId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// An example identifier: the owning SDK plus the example name.
///
/// Its string form is `{SDK}_{name}`, which is also the id of the snippet
/// holding the example's code.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExampleId {
    sdk: Sdk,
    name: String,
}

impl ExampleId {
    /// Create an example id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains a reserved character.
    pub fn new(sdk: Sdk, name: impl Into<String>) -> Result<Self, IdError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IdError::Empty);
        }
        if name.contains(RESERVED) {
            return Err(IdError::ReservedCharacter(RESERVED));
        }
        Ok(Self { sdk, name })
    }

    /// The SDK owning the example.
    #[must_use]
    pub const fn sdk(&self) -> Sdk {
        self.sdk
    }

    /// The example name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the snippet that stores this example's files.
    #[must_use]
    pub fn snippet_id(&self) -> SnippetId {
        SnippetId(self.to_string())
    }
}

impl fmt::Debug for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExampleId({self})")
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.sdk, self.name)
    }
}
