//! Error types for the object-store layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! for failures of the document object model and converts them to
//! [`NameTreeError`].

use pdfnametree_core::NameTreeError;
use thiserror::Error;

/// Error type for object store operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The referenced object does not exist in the document.
    #[error("object {0} {1} not found")]
    MissingObject(u32, u16),

    /// The object exists but is not a dictionary.
    #[error("object {0} {1} is not a dictionary")]
    NotDictionary(u32, u16),

    /// Error reported by lopdf.
    #[error("PDF object error: {0}")]
    Lopdf(#[from] lopdf::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] NameTreeError),
}

impl From<BackendError> for NameTreeError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Core(e) => e,
            other => NameTreeError::Backend(other.to_string()),
        }
    }
}
