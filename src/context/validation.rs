//! Validation failures reported by a flush.
//!
//! When any staged insert or update fails its entity's validation hook, the flush stops before
//! writing and reports every failure at once through [`EntityValidationError`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rejected field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Column name of the rejected field
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field errors collected for one staged entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityValidationResult {
    /// Table name of the rejected entity
    pub entity: String,
    /// Identifier of the rejected entity, `None` for fresh inserts
    pub id: Option<i32>,
    pub errors: Vec<FieldError>,
}

/// Raw validation failure raised by the persistence context when a flush is rejected.
///
/// The repository layer never lets this type escape `save`; it is rewrapped into
/// [`crate::error::validation::ValidationError`] and stays reachable as its source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for one or more entities")]
pub struct EntityValidationError {
    /// One result per rejected entity, in staging order
    pub entity_validation_errors: Vec<EntityValidationResult>,
}

impl EntityValidationError {
    /// Iterates every field error across all rejected entities.
    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.entity_validation_errors
            .iter()
            .flat_map(|result| result.errors.iter())
    }
}
