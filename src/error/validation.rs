use thiserror::Error;

use crate::context::validation::EntityValidationError;

/// Domain error raised by `save` when the persistence context rejects a flush for validation
/// reasons.
///
/// Distinguishes "the store rejected this data" from every other failure. The message is left
/// empty; the structured per-entity errors are only reachable through the wrapped source.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    #[source]
    source: EntityValidationError,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, source: EntityValidationError) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw validation failure reported by the flush.
    pub fn source_error(&self) -> &EntityValidationError {
        &self.source
    }
}
