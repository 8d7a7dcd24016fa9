//! Snippet types.
//!
//! A snippet is one entity record plus an ordered list of file records. The
//! entity's `number_of_files` tells readers how many file keys to fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{generate_id, IdError, Sdk, SnippetId, ValidationError, CONTENT_DELIMITER};

/// Where a snippet came from. Only user snippets are subject to retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Saved by a playground user.
    #[serde(rename = "PG_USER")]
    PgUser,
    /// Seeded from the curated example catalog.
    #[serde(rename = "PG_EXAMPLES")]
    PgExamples,
}

impl Origin {
    /// The stored name of the origin.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PgUser => "PG_USER",
            Self::PgExamples => "PG_EXAMPLES",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PG_USER" => Ok(Self::PgUser),
            "PG_EXAMPLES" => Ok(Self::PgExamples),
            other => Err(IdError::UnknownVariant {
                kind: "origin",
                value: other.to_string(),
            }),
        }
    }
}

/// Parameters used to derive a snippet's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMeta {
    /// Salt mixed into the content hash.
    pub salt: String,

    /// Requested identifier length in characters.
    pub id_length: i32,
}

/// The stored snippet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetEntity {
    /// SDK the snippet runs against.
    pub sdk: Sdk,

    /// Pipeline options passed to the runner.
    pub pipeline_options: String,

    /// When the snippet was first saved.
    pub created: DateTime<Utc>,

    /// When the snippet was last read. The retention sweeper ages snippets by this.
    pub last_visited: DateTime<Utc>,

    /// Where the snippet came from.
    pub origin: Origin,

    /// How many times the snippet has been read.
    #[serde(default)]
    pub visit_count: u64,

    /// Number of file records stored for this snippet.
    pub number_of_files: usize,

    /// Schema revision the snippet was written under.
    #[serde(default)]
    pub schema_version: Option<String>,

    /// Authenticated owner, if the snippet was saved by a signed-in user.
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl SnippetEntity {
    /// Record a visit at `now`.
    ///
    /// `last_visited` never moves backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_visited {
            self.last_visited = now;
        }
        self.visit_count = self.visit_count.saturating_add(1);
    }
}

/// A single source file of a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntity {
    /// File name, e.g. `main.go`.
    pub name: String,

    /// File contents.
    pub content: String,

    /// Line the editor scrolls to when the file is opened.
    pub context_line: i32,

    /// Whether this is the file the runner executes.
    pub is_main: bool,
}

impl FileEntity {
    /// Create a file record with no context line.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>, is_main: bool) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            context_line: 0,
            is_main,
        }
    }
}

/// A snippet as written by `put_snippet`: id parameters, entity and files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Parameters for deriving the snippet id.
    pub id_meta: IdMeta,

    /// The snippet record.
    pub snippet: SnippetEntity,

    /// Files in display order.
    pub files: Vec<FileEntity>,
}

impl Snippet {
    /// Build a freshly created snippet: `created` and `last_visited` are both `now`
    /// and `number_of_files` is taken from `files`.
    #[must_use]
    pub fn new(
        id_meta: IdMeta,
        sdk: Sdk,
        pipeline_options: impl Into<String>,
        origin: Origin,
        files: Vec<FileEntity>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id_meta,
            snippet: SnippetEntity {
                sdk,
                pipeline_options: pipeline_options.into(),
                created: now,
                last_visited: now,
                origin,
                visit_count: 0,
                number_of_files: files.len(),
                schema_version: None,
                owner_id: None,
            },
            files,
        }
    }

    /// Derive the content-addressed id of this snippet.
    ///
    /// File order does not affect the id: files are canonicalized as
    /// `trim(name) + trim(content)`, sorted, joined, and followed by the SDK and
    /// the trimmed pipeline options.
    ///
    /// # Errors
    ///
    /// Returns `IdError::InvalidLength` if the id length in `id_meta` is invalid.
    pub fn id(&self) -> Result<SnippetId, IdError> {
        let mut parts: Vec<String> = self
            .files
            .iter()
            .map(|file| format!("{}{}", file.name.trim(), file.content.trim()))
            .collect();
        parts.sort();

        let mut content = parts.join(CONTENT_DELIMITER);
        content.push_str(self.snippet.sdk.as_str());
        content.push_str(self.snippet.pipeline_options.trim());

        generate_id(&content, &self.id_meta)?.parse()
    }

    /// Check the structural invariants enforced on write.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no files, the declared file count is wrong,
    /// or the number of main files is not exactly one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.files.is_empty() {
            return Err(ValidationError::NoFiles);
        }
        if self.snippet.number_of_files != self.files.len() {
            return Err(ValidationError::FileCountMismatch {
                declared: self.snippet.number_of_files,
                actual: self.files.len(),
            });
        }
        let mains = self.files.iter().filter(|file| file.is_main).count();
        if mains != 1 {
            return Err(ValidationError::MainFileCount(mains));
        }
        Ok(())
    }

    /// The main file, if the snippet has one.
    #[must_use]
    pub fn main_file(&self) -> Option<&FileEntity> {
        self.files.iter().find(|file| file.is_main)
    }
}
