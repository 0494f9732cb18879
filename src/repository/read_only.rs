//! Read-only repository over any audited entity.
//!
//! Every query goes through [`compose`], so filter, ordering, skip and take are applied in that
//! order and omitted stages are left out of the SQL. Nothing here stages changes.

use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    context::DbContext,
    entity::AuditedEntity,
    error::RepoError,
    query::{compose, OrderBy},
};

/// Repository providing read operations for every audited entity.
///
/// Holds only a reference to the database connection; it can be freely copied and used from
/// independent contexts at the same time.
#[derive(Clone, Copy)]
pub struct ReadOnlyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadOnlyRepository<'a> {
    /// Creates a new ReadOnlyRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ReadOnlyRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a read-only repository over the connection of a context.
    pub fn from_context(context: &'a DbContext) -> Self {
        Self::new(context.connection())
    }

    pub(crate) fn connection(&self) -> &'a DatabaseConnection {
        self.db
    }

    /// Gets every row of `E`, optionally ordered and paginated.
    ///
    /// # Arguments
    /// - `order_by` - Ordering of the result, `None` for database order
    /// - `skip` - Number of leading rows to drop
    /// - `take` - Maximum number of rows to return
    ///
    /// # Returns
    /// - `Ok(Vec<E::Model>)` - Matching rows (empty if none)
    /// - `Err(RepoError::DbErr)` - Database error during query
    pub async fn get_all<E: AuditedEntity>(
        &self,
        order_by: Option<OrderBy<E>>,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<E::Model>, RepoError> {
        Ok(compose(None, order_by, skip, take).all(self.db).await?)
    }

    /// Gets the rows of `E` matching `filter`, optionally ordered and paginated.
    ///
    /// The filter is applied before ordering and pagination, so `skip`/`take` page through the
    /// filtered result.
    ///
    /// # Arguments
    /// - `filter` - Condition rows must match, `None` for every row
    /// - `order_by` - Ordering of the result, `None` for database order
    /// - `skip` - Number of leading rows to drop
    /// - `take` - Maximum number of rows to return
    ///
    /// # Returns
    /// - `Ok(Vec<E::Model>)` - Matching rows (empty if none)
    /// - `Err(RepoError::DbErr)` - Database error during query
    pub async fn get<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
        order_by: Option<OrderBy<E>>,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<E::Model>, RepoError> {
        Ok(compose(filter, order_by, skip, take).all(self.db).await?)
    }

    /// Gets the single row of `E` matching `filter`.
    ///
    /// At most two rows are fetched, which is enough to tell a unique match from an ambiguous
    /// one.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Exactly one row matched
    /// - `Ok(None)` - No row matched
    /// - `Err(RepoError::AmbiguousResult)` - More than one row matched
    /// - `Err(RepoError::DbErr)` - Database error during query
    pub async fn get_one<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
    ) -> Result<Option<E::Model>, RepoError> {
        let mut matches = compose::<E>(filter, None, None, Some(2))
            .all(self.db)
            .await?;

        if matches.len() > 1 {
            return Err(RepoError::AmbiguousResult {
                entity: E::entity_name(),
            });
        }

        Ok(matches.pop())
    }

    /// Gets the first row of `E` matching `filter` under `order_by`.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - First matching row
    /// - `Ok(None)` - No row matched
    /// - `Err(RepoError::DbErr)` - Database error during query
    pub async fn get_first<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
        order_by: Option<OrderBy<E>>,
    ) -> Result<Option<E::Model>, RepoError> {
        Ok(compose(filter, order_by, None, None).one(self.db).await?)
    }

    /// Finds a row of `E` by its identifier.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Row found
    /// - `Ok(None)` - No row with that identifier
    /// - `Err(RepoError::DbErr)` - Database error during query
    pub async fn get_by_id<E: AuditedEntity>(&self, id: i32) -> Result<Option<E::Model>, RepoError> {
        Ok(E::find()
            .filter(E::id_column().eq(id))
            .one(self.db)
            .await?)
    }

    /// Counts the rows of `E` matching `filter`.
    pub async fn get_count<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
    ) -> Result<u64, RepoError>
    where
        E::Model: Sync,
    {
        Ok(compose::<E>(filter, None, None, None).count(self.db).await?)
    }

    /// Checks whether any row of `E` matches `filter`.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one row matches
    /// - `Ok(false)` - No row matches
    /// - `Err(RepoError::DbErr)` - Database error during count query
    pub async fn get_exists<E: AuditedEntity>(
        &self,
        filter: Option<Condition>,
    ) -> Result<bool, RepoError>
    where
        E::Model: Sync,
    {
        let count = self.get_count::<E>(filter).await?;

        Ok(count > 0)
    }
}
