//! Engine error types.
//!
//! Every error is local to the operation that raised it: a rejected save or a
//! failed import leaves the session exactly as it was.

use alibi_domain::{DomainError, ReferenceMiss, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{entity_type} already exists: {id}")]
    DuplicateId { entity_type: &'static str, id: String },

    /// Only raised under `ReferencePolicy::Reject`.
    #[error("Unknown references: {}", format_misses(.0))]
    DanglingReference(Vec<ReferenceMiss>),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity_type: &'static str, id: impl ToString) -> Self {
        Self::DuplicateId {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn format_misses(misses: &[ReferenceMiss]) -> String {
    misses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reasons a snapshot is refused. The message is shown to the user as is.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("The file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The file was not exported by this application (appName {found:?})")]
    WrongApp { found: Option<String> },

    #[error("The file was exported by version {found:?}, expected {expected}")]
    WrongVersion {
        found: Option<String>,
        expected: &'static str,
    },

    #[error("The file contains no session data")]
    MissingData,

    #[error("The session data is invalid: {0}")]
    InvalidData(String),

    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),
}
