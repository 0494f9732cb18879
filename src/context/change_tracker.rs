//! Pending change set of a persistence context.
//!
//! Staged inserts, updates and deletes are kept as an ordered list of entries. Entries whose
//! entity carries an identifier are keyed by `(table, id)`, so staging the same entity twice
//! keeps a single entry holding the latest state. Fresh inserts without an identifier are never
//! keyed. Nothing here touches the database until [`ChangeTracker::save_changes`] runs.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DatabaseTransaction, DbErr, IntoActiveModel,
    TransactionTrait,
};
use std::{any::Any, collections::HashMap};

use crate::{
    context::{
        validation::{EntityValidationError, EntityValidationResult, FieldError},
        SaveChangesError,
    },
    entity::{active_model_id, model_id, AuditedEntity},
};

/// Tracking state of a staged entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityState {
    /// Not part of the change set
    Detached,
    /// Staged for insertion
    Added,
    /// Staged for a full update
    Modified,
    /// Staged for removal
    Deleted,
}

/// Handle to a staged entry, returned by every staging call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

/// Identity of a staged entity within the change set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub entity: String,
    pub id: i32,
}

/// Outcome of a successful flush.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedChanges {
    written: usize,
    inserted: HashMap<EntryId, i32>,
}

impl SavedChanges {
    /// Number of entries written to the database.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Identifier the database assigned to a staged insert.
    ///
    /// # Returns
    /// - `Some(id)` - `entry` was an insert flushed by this save
    /// - `None` - `entry` was not an insert of this save
    pub fn id_of(&self, entry: EntryId) -> Option<i32> {
        self.inserted.get(&entry).copied()
    }
}

#[async_trait]
trait StagedChange: Send + Sync {
    fn entity_name(&self) -> String;

    fn id(&self) -> Option<i32>;

    fn validate(&self) -> Result<(), Vec<FieldError>>;

    fn as_any(&self) -> &dyn Any;

    /// Writes the change inside `txn`, returning the identifier of an inserted row.
    async fn apply(
        &self,
        state: EntityState,
        txn: &DatabaseTransaction,
    ) -> Result<Option<i32>, DbErr>;
}

struct Staged<E: AuditedEntity> {
    model: E::ActiveModel,
}

#[async_trait]
impl<E> StagedChange for Staged<E>
where
    E: AuditedEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send + Sync + 'static,
{
    fn entity_name(&self) -> String {
        E::entity_name()
    }

    fn id(&self) -> Option<i32> {
        active_model_id::<E>(&self.model)
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        E::validate(&self.model)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn apply(
        &self,
        state: EntityState,
        txn: &DatabaseTransaction,
    ) -> Result<Option<i32>, DbErr> {
        let model = self.model.clone();

        match state {
            EntityState::Added => {
                let inserted = model.insert(txn).await?;
                Ok(model_id::<E>(&inserted))
            }
            EntityState::Modified => {
                model.update(txn).await?;
                Ok(None)
            }
            EntityState::Deleted => {
                model.delete(txn).await?;
                Ok(None)
            }
            EntityState::Detached => Ok(None),
        }
    }
}

struct Entry {
    id: EntryId,
    key: Option<EntityKey>,
    state: EntityState,
    change: Box<dyn StagedChange>,
}

/// Ordered list of staged changes.
#[derive(Default)]
pub struct ChangeTracker {
    entries: Vec<Entry>,
    next_entry: u64,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State of the entity of type `E` with identifier `id`.
    ///
    /// # Returns
    /// - `EntityState::Detached` - No entry is keyed by this entity
    /// - Otherwise the state of the staged entry
    pub fn state_of<E: AuditedEntity>(&self, id: i32) -> EntityState {
        let key = EntityKey {
            entity: E::entity_name(),
            id,
        };

        self.position(&key)
            .map(|pos| self.entries[pos].state)
            .unwrap_or(EntityState::Detached)
    }

    /// Stages `model` for insertion.
    pub fn add<E>(&mut self, model: E::ActiveModel) -> EntryId
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        self.stage::<E>(EntityState::Added, model)
    }

    /// Stages `model` for a full update, attaching it if untracked.
    ///
    /// An entity still staged for insertion stays `Added`: its values are replaced by `model`
    /// while the creation audit values of the pending insert are kept.
    pub fn mark_modified<E>(&mut self, mut model: E::ActiveModel) -> EntryId
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        let pending_insert = key_of::<E>(&model)
            .and_then(|key| self.position(&key))
            .filter(|&pos| self.entries[pos].state == EntityState::Added);

        let Some(pos) = pending_insert else {
            return self.stage::<E>(EntityState::Modified, model);
        };

        if let Some(staged) = self.entries[pos].change.as_any().downcast_ref::<Staged<E>>() {
            for column in [E::created_by_column(), E::created_date_column()] {
                match staged.model.get(column) {
                    ActiveValue::Set(value) | ActiveValue::Unchanged(value) => {
                        model.set(column, value)
                    }
                    ActiveValue::NotSet => model.not_set(column),
                }
            }
        }

        self.stage::<E>(EntityState::Added, model)
    }

    /// Stages `model` for removal, attaching it if untracked.
    ///
    /// Removing an entity still staged for insertion drops its entry instead, since the row
    /// never reached the database.
    pub fn remove<E>(&mut self, model: E::ActiveModel) -> EntryId
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        let pending_insert = key_of::<E>(&model)
            .and_then(|key| self.position(&key))
            .filter(|&pos| self.entries[pos].state == EntityState::Added);

        if let Some(pos) = pending_insert {
            let entry = self.entries.remove(pos);
            tracing::debug!("Dropped pending insert {:?} from change set", entry.key);
            return entry.id;
        }

        self.stage::<E>(EntityState::Deleted, model)
    }

    /// Drops every staged entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flushes every staged entry in one transaction.
    ///
    /// Added and modified entries are validated first; if any are rejected nothing is written.
    /// Entries are then applied in staging order inside a single transaction. The change set is
    /// cleared only after the transaction commits; on any failure it is left as it was.
    ///
    /// # Arguments
    /// - `db` - Connection the transaction is opened on
    ///
    /// # Returns
    /// - `Ok(SavedChanges)` - Every entry was written and committed
    /// - `Err(SaveChangesError::Validation)` - One or more entries failed validation
    /// - `Err(SaveChangesError::DbErr)` - Database error while writing or committing
    pub async fn save_changes(
        &mut self,
        db: &DatabaseConnection,
    ) -> Result<SavedChanges, SaveChangesError> {
        if self.entries.is_empty() {
            return Ok(SavedChanges::default());
        }

        self.validate()?;

        let txn = db.begin().await?;

        let saved = match self.apply_all(&txn).await {
            Ok(saved) => saved,
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Failed to roll back change set: {}", rollback_err);
                }
                return Err(err.into());
            }
        };

        txn.commit().await?;

        tracing::debug!("Flushed {} staged changes", saved.written);
        self.entries.clear();

        Ok(saved)
    }

    async fn apply_all(&self, txn: &DatabaseTransaction) -> Result<SavedChanges, DbErr> {
        let mut saved = SavedChanges::default();

        for entry in &self.entries {
            let inserted_id = entry.change.apply(entry.state, txn).await?;

            if let (EntityState::Added, Some(id)) = (entry.state, inserted_id) {
                saved.inserted.insert(entry.id, id);
            }
            saved.written += 1;
        }

        Ok(saved)
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        let failures: Vec<EntityValidationResult> = self
            .entries
            .iter()
            .filter(|e| matches!(e.state, EntityState::Added | EntityState::Modified))
            .filter_map(|e| {
                e.change
                    .validate()
                    .err()
                    .map(|errors| EntityValidationResult {
                        entity: e.change.entity_name(),
                        id: e.change.id(),
                        errors,
                    })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(EntityValidationError {
                entity_validation_errors: failures,
            })
        }
    }

    fn stage<E>(&mut self, state: EntityState, model: E::ActiveModel) -> EntryId
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        let key = key_of::<E>(&model);
        let change: Box<dyn StagedChange> = Box::new(Staged::<E> { model });

        tracing::debug!(
            "Staged {:?} for {} {:?}",
            state,
            E::entity_name(),
            key.as_ref().map(|k| k.id)
        );

        // Same entity staged again: latest state wins
        if let Some(pos) = key.as_ref().and_then(|k| self.position(k)) {
            let entry = &mut self.entries[pos];
            entry.state = state;
            entry.change = change;
            return entry.id;
        }

        let id = EntryId(self.next_entry);
        self.next_entry += 1;
        self.entries.push(Entry {
            id,
            key,
            state,
            change,
        });

        id
    }

    fn position(&self, key: &EntityKey) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key.as_ref() == Some(key))
    }
}

fn key_of<E: AuditedEntity>(model: &E::ActiveModel) -> Option<EntityKey> {
    active_model_id::<E>(model).map(|id| EntityKey {
        entity: E::entity_name(),
        id,
    })
}
