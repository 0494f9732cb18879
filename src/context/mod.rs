//! Persistence context: a database connection paired with its pending change set.
//!
//! A [`DbContext`] is one unit of work. Repositories stage inserts, updates and deletes into
//! its [`ChangeTracker`] and flush them together with [`DbContext::save_changes`]. A context is
//! not meant to be shared: create one per logical operation and discard it if a flush fails.

pub mod change_tracker;
pub mod validation;

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

use crate::entity::AuditedEntity;

pub use change_tracker::{ChangeTracker, EntityKey, EntityState, EntryId, SavedChanges};
pub use validation::{EntityValidationError, EntityValidationResult, FieldError};

/// Failure of a flush, as reported by the persistence context.
#[derive(Error, Debug)]
pub enum SaveChangesError {
    /// One or more staged entities failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] EntityValidationError),

    /// Database error while writing or committing; the transaction was rolled back.
    #[error(transparent)]
    DbErr(#[from] DbErr),
}

/// Unit of work over a database connection.
pub struct DbContext {
    db: DatabaseConnection,
    change_tracker: ChangeTracker,
}

impl DbContext {
    /// Creates a context with an empty change set.
    ///
    /// # Arguments
    /// - `db` - Connection (pool) the context reads from and flushes to
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            change_tracker: ChangeTracker::new(),
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Whether any change is staged.
    pub fn has_changes(&self) -> bool {
        !self.change_tracker.is_empty()
    }

    /// Tracking state of the entity of type `E` with identifier `id`.
    pub fn entry_state<E: AuditedEntity>(&self, id: i32) -> EntityState {
        self.change_tracker.state_of::<E>(id)
    }

    /// Flushes every staged change in one transaction.
    ///
    /// See [`ChangeTracker::save_changes`] for the validation and atomicity rules.
    pub async fn save_changes(&mut self) -> Result<SavedChanges, SaveChangesError> {
        self.change_tracker.save_changes(&self.db).await
    }

    /// Drops every staged change without writing it.
    pub fn discard_changes(&mut self) {
        self.change_tracker.clear();
    }

    /// Splits the context into its connection and change set.
    pub(crate) fn parts_mut(&mut self) -> (&DatabaseConnection, &mut ChangeTracker) {
        (&self.db, &mut self.change_tracker)
    }
}
