//! Error types for reportgraph operations.
//!
//! Expected "nothing to do" outcomes of the expansion state machine are not
//! errors; they are reported as [`crate::expansion::Transition::Unchanged`].
//! [`ReportGraphError`] covers the failures a host has to act on.

use std::{io, ops::Range};

use thiserror::Error;

use reportgraph_core::catalog::CatalogError;

/// The main error type for reportgraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the offending source text and, when known, the
/// byte range of the error so hosts can point at it.
#[derive(Debug, Error)]
pub enum ReportGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Nothing in the diagram matches `{0}`")]
    UnknownTarget(String),
}

impl ReportGraphError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
