// src/error.rs
// =============================================================================
// Error types for the library side of embed-urls.
//
// The binary uses anyhow (like most application code), but a library should
// hand its callers errors they can match on. thiserror generates the Display
// and Error impls for us.
//
// Two families live here:
// - Tree shape problems: a node is missing a field its kind requires. These
//   never abort a build; the embed pass records them as diagnostics and moves
//   on to the next paragraph.
// - Loading problems: bad options file, unreadable input, invalid JSON tree.
//   These do propagate with `?`.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::NodeKind;

#[derive(Debug, Error)]
pub enum EmbedError {
    /// A text-like node arrived without its `value`
    #[error("{kind} node has no value")]
    MissingValue { kind: NodeKind },

    /// A link-like node arrived without its `url`
    #[error("{kind} node has no url")]
    MissingUrl { kind: NodeKind },

    /// The tree handed to the pipeline is not rooted where we expect
    #[error("invalid document tree: {0}")]
    InvalidTree(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid mdast JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// Shorthand used across the library
pub type Result<T, E = EmbedError> = std::result::Result<T, E>;

impl EmbedError {
    /// True for errors that describe a malformed node rather than a failed load
    pub fn is_tree_shape(&self) -> bool {
        matches!(self, EmbedError::MissingValue { .. } | EmbedError::MissingUrl { .. })
    }
}
