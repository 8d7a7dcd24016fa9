//! Error types for playground identifiers.

/// Errors that can occur when parsing or generating identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The requested identifier length is non-positive or longer than the hash encoding.
    #[error("invalid identifier length: {0}")]
    InvalidLength(i32),

    /// The identifier is empty.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier contains a character reserved for key encoding.
    #[error("identifier contains a reserved character: {0:?}")]
    ReservedCharacter(char),

    /// The input does not name a known SDK.
    #[error("unknown sdk: {0}")]
    UnknownSdk(String),

    /// The input does not name a known enum variant.
    #[error("unknown {kind}: {value}")]
    UnknownVariant {
        /// The enum being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// Errors raised when a snippet violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A snippet must carry at least one file.
    #[error("snippet has no files")]
    NoFiles,

    /// The declared file count does not match the files supplied.
    #[error("snippet declares {declared} files but carries {actual}")]
    FileCountMismatch {
        /// `number_of_files` on the snippet entity.
        declared: usize,
        /// Number of file records supplied.
        actual: usize,
    },

    /// Exactly one file must be marked as main.
    #[error("snippet must have exactly one main file, found {0}")]
    MainFileCount(usize),
}
