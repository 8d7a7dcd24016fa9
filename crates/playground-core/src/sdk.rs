//! SDK types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::IdError;

/// A language SDK supported by the playground.
///
/// Variants are ordered the way the wire enum numbers them, which is also the
/// order catalog entries are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sdk {
    /// Placeholder for requests that did not name an SDK. Never stored.
    #[serde(rename = "SDK_UNSPECIFIED")]
    Unspecified,
    /// The Java SDK.
    #[serde(rename = "SDK_JAVA")]
    Java,
    /// The Go SDK.
    #[serde(rename = "SDK_GO")]
    Go,
    /// The Python SDK.
    #[serde(rename = "SDK_PYTHON")]
    Python,
    /// The Scio (Scala) SDK.
    #[serde(rename = "SDK_SCIO")]
    Scio,
}

impl Sdk {
    /// Every SDK that can own snippets and examples.
    pub const SUPPORTED: [Sdk; 4] = [Sdk::Java, Sdk::Go, Sdk::Python, Sdk::Scio];

    /// The wire name of the SDK, e.g. `SDK_JAVA`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "SDK_UNSPECIFIED",
            Self::Java => "SDK_JAVA",
            Self::Go => "SDK_GO",
            Self::Python => "SDK_PYTHON",
            Self::Scio => "SDK_SCIO",
        }
    }
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sdk {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SDK_UNSPECIFIED" => Ok(Self::Unspecified),
            "SDK_JAVA" => Ok(Self::Java),
            "SDK_GO" => Ok(Self::Go),
            "SDK_PYTHON" => Ok(Self::Python),
            "SDK_SCIO" => Ok(Self::Scio),
            other => Err(IdError::UnknownSdk(other.to_string())),
        }
    }
}

/// One row per supported SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkEntity {
    /// The SDK this row describes.
    pub name: Sdk,

    /// Name of the example shown when the SDK is first selected.
    pub default_example: String,
}

impl SdkEntity {
    /// Create an SDK row.
    #[must_use]
    pub fn new(name: Sdk, default_example: impl Into<String>) -> Self {
        Self {
            name,
            default_example: default_example.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_wire_names_roundtrip() {
        for sdk in Sdk::SUPPORTED {
            assert_eq!(sdk.as_str().parse::<Sdk>().unwrap(), sdk);
            let json = serde_json::to_string(&sdk).unwrap();
            assert_eq!(json, format!("\"{}\"", sdk.as_str()));
        }
    }

    #[test]
    fn unknown_sdk_is_rejected() {
        assert_eq!(
            "SDK_RUST".parse::<Sdk>(),
            Err(IdError::UnknownSdk("SDK_RUST".into()))
        );
    }

    #[test]
    fn sdks_order_like_the_wire_enum() {
        let mut sdks = vec![Sdk::Scio, Sdk::Go, Sdk::Java, Sdk::Python];
        sdks.sort();
        assert_eq!(sdks, vec![Sdk::Java, Sdk::Go, Sdk::Python, Sdk::Scio]);
    }
}
