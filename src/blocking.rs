//! Synchronous counterparts of the repositories.
//!
//! A [`DbContext`] here owns a current-thread Tokio runtime next to the async context and
//! drives every database call to completion on the calling thread. Staging calls never touch
//! the database and run directly.
//!
//! # Panics
//!
//! Every call that reaches the database blocks the current thread on the context's runtime and
//! panics when made from within an async execution context, including a `#[tokio::main]` or
//! `#[tokio::test]` function. Use the async repositories there, or call these from
//! `tokio::task::spawn_blocking`.

use sea_orm::{ActiveModelTrait, Condition, EntityTrait, IntoActiveModel};
use std::ops::Deref;
use tokio::runtime::{Builder, Runtime};

use crate::{
    config::Config,
    context::{self, EntityState, EntryId, SaveChangesError, SavedChanges},
    entity::AuditedEntity,
    error::RepoError,
    query::OrderBy,
    repository, startup,
};

/// Blocking persistence context.
pub struct DbContext {
    runtime: Runtime,
    context: context::DbContext,
}

impl DbContext {
    /// Wraps an async context together with the runtime its connection was opened on.
    pub fn new(runtime: Runtime, context: context::DbContext) -> Self {
        Self { runtime, context }
    }

    /// Starts a current-thread runtime and connects inside it.
    ///
    /// # Returns
    /// - `Ok(DbContext)` - Connected context with an empty change set
    /// - `Err(RepoError::RuntimeErr)` - Runtime could not be built
    /// - `Err(RepoError::DbErr)` - Failed to connect to the database
    pub fn connect(config: &Config) -> Result<Self, RepoError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let db = runtime.block_on(startup::connect_to_database(config))?;

        Ok(Self::new(runtime, context::DbContext::new(db)))
    }

    pub fn context(&self) -> &context::DbContext {
        &self.context
    }

    pub fn read_only(&self) -> ReadOnlyRepository<'_> {
        ReadOnlyRepository {
            runtime: &self.runtime,
            inner: repository::ReadOnlyRepository::from_context(&self.context),
        }
    }

    pub fn repository(&mut self) -> Repository<'_> {
        let Self { runtime, context } = self;
        let inner = repository::Repository::new(context);

        Repository {
            reader: ReadOnlyRepository {
                runtime,
                inner: *inner,
            },
            inner,
        }
    }

    /// Flushes the change set; see [`context::DbContext::save_changes`].
    pub fn save_changes(&mut self) -> Result<SavedChanges, SaveChangesError> {
        self.runtime.block_on(self.context.save_changes())
    }
}

/// Blocking form of [`repository::ReadOnlyRepository`].
#[derive(Clone, Copy)]
pub struct ReadOnlyRepository<'a> {
    runtime: &'a Runtime,
    inner: repository::ReadOnlyRepository<'a>,
}

impl<'a> ReadOnlyRepository<'a> {
    pub fn get_all<E: AuditedEntity>(
        &self,
        order_by: Option<OrderBy<E>>,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<E::Model>, RepoError> {
        self.runtime
            .block_on(self.inner.get_all::<E>(order_by, skip, take))
    }

    pub fn get<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
        order_by: Option<OrderBy<E>>,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<E::Model>, RepoError> {
        self.runtime
            .block_on(self.inner.get::<E>(filter, order_by, skip, take))
    }

    pub fn get_one<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
    ) -> Result<Option<E::Model>, RepoError> {
        self.runtime.block_on(self.inner.get_one::<E>(filter))
    }

    pub fn get_first<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
        order_by: Option<OrderBy<E>>,
    ) -> Result<Option<E::Model>, RepoError> {
        self.runtime
            .block_on(self.inner.get_first::<E>(filter, order_by))
    }

    pub fn get_by_id<E: AuditedEntity>(&self, id: i32) -> Result<Option<E::Model>, RepoError> {
        self.runtime.block_on(self.inner.get_by_id::<E>(id))
    }

    pub fn get_count<E: AuditedEntity>(&self, filter: Option<Condition>) -> Result<u64, RepoError>
    where
        E::Model: Sync,
    {
        self.runtime.block_on(self.inner.get_count::<E>(filter))
    }

    pub fn get_exists<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
    ) -> Result<bool, RepoError>
    where
        E::Model: Sync,
    {
        self.runtime.block_on(self.inner.get_exists::<E>(filter))
    }
}

/// Blocking form of [`repository::Repository`].
pub struct Repository<'a> {
    reader: ReadOnlyRepository<'a>,
    inner: repository::Repository<'a>,
}

impl<'a> Repository<'a> {
    pub fn create<A>(&mut self, entity: A, created_by: Option<&str>) -> EntryId
    where
        A: ActiveModelTrait + Send + Sync + 'static,
        A::Entity: AuditedEntity<ActiveModel = A>,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Sync,
    {
        self.inner.create(entity, created_by)
    }

    pub fn update<A>(&mut self, entity: A, modified_by: Option<&str>) -> EntryId
    where
        A: ActiveModelTrait + Send + Sync + 'static,
        A::Entity: AuditedEntity<ActiveModel = A>,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Sync,
    {
        self.inner.update(entity, modified_by)
    }

    pub fn delete<A>(&mut self, entity: A) -> Result<EntryId, RepoError>
    where
        A: ActiveModelTrait + Send + Sync + 'static,
        A::Entity: AuditedEntity<ActiveModel = A>,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Sync,
    {
        self.inner.delete(entity)
    }

    pub fn delete_by_id<E>(&mut self, id: i32) -> Result<Option<EntryId>, RepoError>
    where
        E: AuditedEntity,
        E::Model: IntoActiveModel<E::ActiveModel> + Sync,
        E::ActiveModel: Send + Sync + 'static,
    {
        self.reader
            .runtime
            .block_on(self.inner.delete_by_id::<E>(id))
    }

    pub fn save(&mut self) -> Result<SavedChanges, RepoError> {
        self.reader.runtime.block_on(self.inner.save())
    }

    pub fn has_changes(&self) -> bool {
        self.inner.has_changes()
    }

    pub fn state_of<E: AuditedEntity>(&self, id: i32) -> EntityState {
        self.inner.state_of::<E>(id)
    }
}

impl<'a> Deref for Repository<'a> {
    type Target = ReadOnlyRepository<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}
