//! Error types for the repository layer.
//!
//! `RepoError` is the single error returned by repositories, configuration and startup. Store
//! failures are carried unchanged; the only failure this layer reshapes is a validation
//! rejection on flush, which surfaces as [`ValidationError`].

pub mod config;
pub mod validation;

use thiserror::Error;

use crate::error::{config::ConfigError, validation::ValidationError};

/// Top-level error type of the crate.
#[derive(Error, Debug)]
pub enum RepoError {
    /// Configuration error while loading environment variables.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM, propagated as-is.
    ///
    /// Covers connectivity, constraint violations and rows missing on update.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// A query expected to match at most one row matched several.
    ///
    /// # Fields
    /// - `entity` - Table name of the queried entity
    #[error("Query on {entity} matched more than one row")]
    AmbiguousResult { entity: String },

    /// An entity staged for removal carries no identifier.
    ///
    /// # Fields
    /// - `entity` - Table name of the entity
    #[error("Cannot delete {entity} without an identifier")]
    MissingIdentifier { entity: String },

    /// Flush rejected because staged entities failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The runtime backing the blocking accessors could not be started.
    #[error(transparent)]
    RuntimeErr(#[from] std::io::Error),
}
