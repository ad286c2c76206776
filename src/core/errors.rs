//! Crate error types
//!
//! Only genuinely exceptional conditions are errors here. Lookups that
//! can miss (`find_glyph`, `axis`, `master`, layer matching) return
//! `Option` instead, and out-of-range removals are no-ops: absence is
//! an expected condition in an interactive editor, a shape viewed as
//! the wrong variant is not.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the facade layer and document plumbing
#[derive(Debug, Error)]
pub enum FontglassError {
    /// A shape was viewed as the wrong variant of the path/component
    /// sum. This fails loudly: returning nothing would hide editor
    /// logic errors.
    #[error("expected a {expected} shape, found a {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The document file could not be read
    #[error("failed to read document at {path:?}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document file is not a valid font document
    #[error("document at {path:?} is malformed")]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be written
    #[error("failed to write document at {path:?}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The live document failed to serialize
    #[error("failed to serialize document")]
    DocumentSerialize(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type FontglassResult<T> = Result<T, FontglassError>;
