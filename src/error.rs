//! Error types for the movetree crate
//!
//! Every variant describes a defect: a caller invoked an operation whose
//! precondition it did not check. Nothing here is retried internally.

use thiserror::Error;

/// Main error type for the movetree crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("move '{mv}' already exists among the children of this node")]
    DuplicateMove { mv: String },

    #[error("no child with move '{mv}'")]
    MissingMove { mv: String },

    #[error("no node at path '{path}'")]
    MissingNode { path: String },

    #[error("reorder must be a permutation of the current moves: expected [{expected}], got [{got}]")]
    InvalidReorder { expected: String, got: String },

    #[error("cannot {operation} a draft node at '{path}'")]
    DraftTarget { operation: String, path: String },

    #[error("cannot {operation} the root node")]
    RootTarget { operation: String },

    #[error("there is no draft move to add")]
    NoDraft,

    #[error("illegal move '{mv}': {reason}")]
    IllegalMove { mv: String, reason: String },

    #[error("cannot parse move '{text}': {reason}")]
    InvalidMoveText { text: String, reason: String },

    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid square '{square}' (expected a1..h8)")]
    InvalidSquare { square: String },

    #[error("unsupported saved tree version {found} (latest is {latest})")]
    UnsupportedVersion { found: u32, latest: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Render a move path for error messages, e.g. `e4 e5 Nf3`.
pub(crate) fn display_path<'a>(moves: impl IntoIterator<Item = &'a crate::Move>) -> String {
    moves
        .into_iter()
        .map(|mv| mv.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
