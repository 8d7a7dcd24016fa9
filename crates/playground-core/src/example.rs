//! Curated example types and their precompiled artifacts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ExampleId, IdError, Origin, Sdk};

/// What kind of catalog object an example is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrecompiledObjectType {
    /// Type was not set.
    #[serde(rename = "PRECOMPILED_OBJECT_TYPE_UNSPECIFIED")]
    Unspecified,
    /// A runnable example.
    #[serde(rename = "PRECOMPILED_OBJECT_TYPE_EXAMPLE")]
    Example,
    /// An exercise with a hidden solution.
    #[serde(rename = "PRECOMPILED_OBJECT_TYPE_KATA")]
    Kata,
    /// A unit test.
    #[serde(rename = "PRECOMPILED_OBJECT_TYPE_UNIT_TEST")]
    UnitTest,
}

impl PrecompiledObjectType {
    /// The wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "PRECOMPILED_OBJECT_TYPE_UNSPECIFIED",
            Self::Example => "PRECOMPILED_OBJECT_TYPE_EXAMPLE",
            Self::Kata => "PRECOMPILED_OBJECT_TYPE_KATA",
            Self::UnitTest => "PRECOMPILED_OBJECT_TYPE_UNIT_TEST",
        }
    }
}

impl fmt::Display for PrecompiledObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrecompiledObjectType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRECOMPILED_OBJECT_TYPE_UNSPECIFIED" => Ok(Self::Unspecified),
            "PRECOMPILED_OBJECT_TYPE_EXAMPLE" => Ok(Self::Example),
            "PRECOMPILED_OBJECT_TYPE_KATA" => Ok(Self::Kata),
            "PRECOMPILED_OBJECT_TYPE_UNIT_TEST" => Ok(Self::UnitTest),
            other => Err(IdError::UnknownVariant {
                kind: "precompiled object type",
                value: other.to_string(),
            }),
        }
    }
}

/// Artifact kinds attached to an example by the precompilation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrecompiledObjectKind {
    /// Program output.
    Output,
    /// Execution log.
    Log,
    /// Pipeline graph.
    Graph,
}

impl PrecompiledObjectKind {
    /// All artifact kinds, in key order.
    pub const ALL: [PrecompiledObjectKind; 3] = [Self::Output, Self::Log, Self::Graph];

    /// The stored name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Output => "OUTPUT",
            Self::Log => "LOG",
            Self::Graph => "GRAPH",
        }
    }
}

impl fmt::Display for PrecompiledObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrecompiledObjectKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OUTPUT" => Ok(Self::Output),
            "LOG" => Ok(Self::Log),
            "GRAPH" => Ok(Self::Graph),
            other => Err(IdError::UnknownVariant {
                kind: "precompiled object kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Difficulty rating of an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Complexity {
    /// Introductory.
    Basic,
    /// Intermediate.
    Medium,
    /// Advanced.
    Advanced,
}

/// A curated example exposed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleEntity {
    /// Example name, unique per SDK.
    pub name: String,

    /// Owning SDK.
    pub sdk: Sdk,

    /// Human-readable description.
    pub description: String,

    /// Catalog categories, in declaration order.
    pub categories: Vec<String>,

    /// Difficulty rating.
    pub complexity: Complexity,

    /// Path of the example source in the content repository.
    pub content_path: String,

    /// Catalog object type.
    pub object_type: PrecompiledObjectType,

    /// Where the example came from.
    pub origin: Origin,

    /// Schema revision the example was seeded under.
    pub schema_version: String,
}

impl ExampleEntity {
    /// The storage id of this example.
    ///
    /// # Errors
    ///
    /// Returns an error if the example name is empty or contains a reserved character.
    pub fn id(&self) -> Result<ExampleId, IdError> {
        ExampleId::new(self.sdk, self.name.clone())
    }

    /// Catalog path: `{SDK}/{ObjectType}/{Name}`.
    #[must_use]
    pub fn cloud_path(&self) -> String {
        format!("{}/{}/{}", self.sdk, self.object_type, self.name)
    }
}

/// An artifact produced by precompiling an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecompiledObjectEntity {
    /// Artifact contents.
    pub content: String,
}

/// A catalog/content schema revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntity {
    /// What changed in this revision.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> ExampleEntity {
        ExampleEntity {
            name: "MOCK_EXAMPLE".into(),
            sdk: Sdk::Java,
            description: "MOCK_DESCR".into(),
            categories: vec!["MOCK_CATEGORY".into()],
            complexity: Complexity::Medium,
            content_path: "MOCK_PATH".into(),
            object_type: PrecompiledObjectType::Example,
            origin: Origin::PgExamples,
            schema_version: "MOCK_VERSION".into(),
        }
    }

    #[test]
    fn cloud_path_joins_sdk_type_and_name() {
        assert_eq!(
            example().cloud_path(),
            "SDK_JAVA/PRECOMPILED_OBJECT_TYPE_EXAMPLE/MOCK_EXAMPLE"
        );
    }

    #[test]
    fn example_id_matches_snippet_id() {
        let id = example().id().unwrap();
        assert_eq!(id.snippet_id().as_str(), "SDK_JAVA_MOCK_EXAMPLE");
    }

    #[test]
    fn wire_names() {
        assert_eq!(
            serde_json::to_string(&PrecompiledObjectKind::Graph).unwrap(),
            "\"GRAPH\""
        );
        assert_eq!(
            serde_json::to_string(&Complexity::Advanced).unwrap(),
            "\"ADVANCED\""
        );
        assert_eq!(
            "PRECOMPILED_OBJECT_TYPE_KATA"
                .parse::<PrecompiledObjectType>()
                .unwrap(),
            PrecompiledObjectType::Kata
        );
        assert!("BINARY".parse::<PrecompiledObjectKind>().is_err());
    }
}
