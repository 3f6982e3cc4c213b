use thiserror::Error;

/// Failures surfaced by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend itself failed (connection lost, query error, ...).
    #[error("store backend failure: {0}")]
    Backend(#[from] sqlx::Error),

    /// A document could not be serialized or deserialized.
    #[error("malformed document: {0}")]
    Malformed(String),
}
