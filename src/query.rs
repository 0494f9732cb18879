//! Query composition for the read accessors.
//!
//! Every read operation builds its query through [`compose`], which applies the optional stages
//! in a fixed order: filter, ordering, skip, take. A stage given as `None` is left out of the
//! query entirely, so there is never an implicit default order or limit.

use sea_orm::{Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};

/// Ordering applied to a query, one column at a time.
///
/// # Example
///
/// ```rust,ignore
/// let order = OrderBy::<customer::Entity>::asc(customer::Column::Name)
///     .then_desc(customer::Column::CreatedDate);
/// ```
#[derive(Clone, Debug)]
pub struct OrderBy<E: EntityTrait> {
    columns: Vec<(E::Column, Order)>,
}

impl<E: EntityTrait> OrderBy<E> {
    /// Orders by `column` ascending.
    pub fn asc(column: E::Column) -> Self {
        Self {
            columns: vec![(column, Order::Asc)],
        }
    }

    /// Orders by `column` descending.
    pub fn desc(column: E::Column) -> Self {
        Self {
            columns: vec![(column, Order::Desc)],
        }
    }

    /// Breaks ties by `column` ascending.
    pub fn then_asc(mut self, column: E::Column) -> Self {
        self.columns.push((column, Order::Asc));
        self
    }

    /// Breaks ties by `column` descending.
    pub fn then_desc(mut self, column: E::Column) -> Self {
        self.columns.push((column, Order::Desc));
        self
    }

    fn apply(self, mut query: Select<E>) -> Select<E> {
        for (column, order) in self.columns {
            query = query.order_by(column, order);
        }
        query
    }
}

/// Largest limit every backend accepts, used when skipping without a take.
const UNBOUNDED_LIMIT: u64 = i64::MAX as u64;

/// Builds the query for a read operation.
///
/// Stages are applied as filter, then ordering, then skip (OFFSET), then take (LIMIT).
/// `skip` and `take` are independent of each other; a skip without a take is paired with an
/// unbounded limit.
///
/// # Arguments
/// - `filter` - Condition rows must match
/// - `order_by` - Ordering of the result
/// - `skip` - Number of leading rows to drop
/// - `take` - Maximum number of rows to return
///
/// # Returns
/// - `Select<E>` - Composed query over the entity's table
pub fn compose<E: EntityTrait>(
    filter: Option<Condition>,
    order_by: Option<OrderBy<E>>,
    skip: Option<u64>,
    take: Option<u64>,
) -> Select<E> {
    let mut query = E::find();

    if let Some(filter) = filter {
        query = query.filter(filter);
    }

    if let Some(order_by) = order_by {
        query = order_by.apply(query);
    }

    if let Some(skip) = skip {
        query = query.offset(skip);
    }

    match take {
        Some(take) => query = query.limit(take),
        // SQLite only accepts OFFSET after a LIMIT
        None if skip.is_some() => query = query.limit(UNBOUNDED_LIMIT),
        None => {}
    }

    query
}
