//! Generic repositories over audited entities.
//!
//! [`ReadOnlyRepository`] builds filtered, ordered and paginated queries. [`Repository`] adds
//! staging of inserts, updates and deletes on top of it and flushes them through the
//! persistence context. Both are generic per call over any type implementing
//! [`AuditedEntity`], so a single repository instance serves every table.

pub mod read_only;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Iterable};
use std::ops::Deref;

use crate::{
    context::{
        validation::EntityValidationError, ChangeTracker, DbContext, EntityState, EntryId,
        SaveChangesError, SavedChanges,
    },
    entity::{active_model_id, AuditedEntity},
    error::{validation::ValidationError, RepoError},
};

pub use read_only::ReadOnlyRepository;

/// Repository staging changes into a persistence context.
///
/// Borrows the context mutably for its whole lifetime, so only one repository can stage and
/// flush changes on a context at a time. Read operations are those of [`ReadOnlyRepository`],
/// reachable through `Deref`.
pub struct Repository<'a> {
    reader: ReadOnlyRepository<'a>,
    changes: &'a mut ChangeTracker,
}

impl<'a> Repository<'a> {
    /// Creates a new Repository over a context.
    ///
    /// # Arguments
    /// - `context` - Unit of work the repository stages into
    ///
    /// # Returns
    /// - `Repository` - New repository instance
    pub fn new(context: &'a mut DbContext) -> Self {
        let (db, changes) = context.parts_mut();
        Self {
            reader: ReadOnlyRepository::new(db),
            changes,
        }
    }

    /// Stages an entity for insertion.
    ///
    /// Stamps `created_date` with the current UTC time and `created_by` with the given value,
    /// then stages the insert. An identifier that is unset or `0` is cleared so the database
    /// assigns one; read it back from [`SavedChanges::id_of`] after saving.
    ///
    /// # Arguments
    /// - `entity` - Active model to insert (convert a `Model` with `into_active_model()`)
    /// - `created_by` - Author recorded in `created_by`, `None` to store null
    ///
    /// # Returns
    /// - `EntryId` - Handle of the staged insert
    pub fn create<A>(&mut self, entity: A, created_by: Option<&str>) -> EntryId
    where
        A: ActiveModelTrait + Send + Sync + 'static,
        A::Entity: AuditedEntity<ActiveModel = A>,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Sync,
    {
        let mut model = entity;
        mark_all_changed(&mut model);

        if active_model_id::<A::Entity>(&model).unwrap_or(0) == 0 {
            model.not_set(<A::Entity as AuditedEntity>::id_column());
        }

        model.set(<A::Entity as AuditedEntity>::created_date_column(), Utc::now().into());
        model.set(
            <A::Entity as AuditedEntity>::created_by_column(),
            created_by.map(str::to_string).into(),
        );

        self.changes.add::<A::Entity>(model)
    }

    /// Stages a full update of an entity.
    ///
    /// Stamps `modified_date` with the current UTC time and `modified_by` with the given value.
    /// Every other column the model holds is treated as changed, whether or not it differs from
    /// the stored row; `created_by` and `created_date` are never written. The entity does not
    /// need to have been loaded through this context. Updating an entity still staged for
    /// insertion replaces the pending insert's values and keeps it an insert.
    ///
    /// # Arguments
    /// - `entity` - Active model with its identifier set
    /// - `modified_by` - Author recorded in `modified_by`, `None` to store null
    ///
    /// # Returns
    /// - `EntryId` - Handle of the staged update
    pub fn update<A>(&mut self, entity: A, modified_by: Option<&str>) -> EntryId
    where
        A: ActiveModelTrait + Send + Sync + 'static,
        A::Entity: AuditedEntity<ActiveModel = A>,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Sync,
    {
        let mut model = entity;
        mark_all_changed(&mut model);

        // created_* belong to the insert
        model.not_set(<A::Entity as AuditedEntity>::created_by_column());
        model.not_set(<A::Entity as AuditedEntity>::created_date_column());

        model.set(<A::Entity as AuditedEntity>::modified_date_column(), Utc::now().into());
        model.set(
            <A::Entity as AuditedEntity>::modified_by_column(),
            modified_by.map(str::to_string).into(),
        );

        self.changes.mark_modified::<A::Entity>(model)
    }

    /// Stages removal of an entity, attaching it first if it is not tracked.
    ///
    /// # Returns
    /// - `Ok(EntryId)` - Handle of the staged delete
    /// - `Err(RepoError::MissingIdentifier)` - Entity carries no identifier; nothing is staged
    pub fn delete<A>(&mut self, entity: A) -> Result<EntryId, RepoError>
    where
        A: ActiveModelTrait + Send + Sync + 'static,
        A::Entity: AuditedEntity<ActiveModel = A>,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Sync,
    {
        if active_model_id::<A::Entity>(&entity).is_none() {
            return Err(RepoError::MissingIdentifier {
                entity: <A::Entity as AuditedEntity>::entity_name(),
            });
        }

        Ok(self.changes.remove::<A::Entity>(entity))
    }

    /// Looks up an entity by identifier and stages its removal.
    ///
    /// A missing entity is not an error: nothing is staged.
    ///
    /// # Arguments
    /// - `id` - Identifier of the entity to remove
    ///
    /// # Returns
    /// - `Ok(Some(EntryId))` - Entity found and staged for removal
    /// - `Ok(None)` - No entity with that identifier
    /// - `Err(RepoError::DbErr)` - Database error during lookup
    pub async fn delete_by_id<E>(&mut self, id: i32) -> Result<Option<EntryId>, RepoError>
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        let found = self.reader.get_by_id::<E>(id).await?;

        Ok(self.delete_found::<E>(id, found))
    }

    /// Flushes every staged change in one transaction.
    ///
    /// A validation rejection from the persistence context is rewrapped into
    /// [`ValidationError`]; every other failure is returned unchanged. On failure the change set
    /// is left as it was and the context should be discarded.
    ///
    /// # Returns
    /// - `Ok(SavedChanges)` - All changes committed
    /// - `Err(RepoError::Validation)` - One or more staged entities failed validation
    /// - `Err(RepoError::DbErr)` - Database error while writing or committing
    pub async fn save(&mut self) -> Result<SavedChanges, RepoError> {
        match self.changes.save_changes(self.reader.connection()).await {
            Ok(saved) => Ok(saved),
            Err(SaveChangesError::Validation(err)) => Err(enhance_validation_error(err).into()),
            Err(SaveChangesError::DbErr(err)) => Err(err.into()),
        }
    }

    /// Whether any change is staged.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Tracking state of the entity of type `E` with identifier `id`.
    pub fn state_of<E: AuditedEntity>(&self, id: i32) -> EntityState {
        self.changes.state_of::<E>(id)
    }

    fn delete_found<E>(&mut self, id: i32, found: Option<E::Model>) -> Option<EntryId>
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        match found {
            Some(model) => Some(self.changes.remove::<E>(model.into_active_model())),
            None => {
                tracing::debug!("No {} with id {} to delete", E::entity_name(), id);
                None
            }
        }
    }
}

impl<'a> Deref for Repository<'a> {
    type Target = ReadOnlyRepository<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

// TODO: build the message from the field errors; it is left empty for now
fn enhance_validation_error(err: EntityValidationError) -> ValidationError {
    tracing::warn!(
        "Save rejected: {} entities failed validation",
        err.entity_validation_errors.len()
    );

    ValidationError::new(String::new(), err)
}

/// Turns every unchanged value into a set one so the whole model is written.
fn mark_all_changed<A: ActiveModelTrait>(model: &mut A) {
    for column in <<A::Entity as EntityTrait>::Column as Iterable>::iter() {
        model.reset(column);
    }
}
