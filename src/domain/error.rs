//! Domain-level errors (no I/O, no transport)

use thiserror::Error;

/// Domain errors represent invalid user input or invalid endpoint settings.
/// They are raised before any request leaves the process.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("workflow id must not be empty")]
    EmptyWorkflowId,

    #[error("invalid path template '{0}': expected an {{id}} placeholder")]
    InvalidPathTemplate(String),

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}
