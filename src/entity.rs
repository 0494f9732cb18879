//! Entity contract shared by every table the repositories operate on.
//!
//! A table takes part in the repository layer by implementing [`AuditedEntity`] on its SeaORM
//! `Entity` type. The trait names the identifier column and the four audit columns so the
//! generic repositories can filter by id and stamp audit data without knowing the concrete
//! model type. It also carries the validation hook run when pending changes are flushed.

use sea_orm::{
    sea_query::ValueType, ActiveModelTrait, ActiveValue, EntityName, EntityTrait, ModelTrait,
    Value,
};

use crate::context::validation::FieldError;

/// SeaORM entity carrying an integer identifier and created/modified audit columns.
///
/// # Example
///
/// ```rust,ignore
/// impl AuditedEntity for customer::Entity {
///     fn id_column() -> Self::Column { customer::Column::Id }
///     fn created_by_column() -> Self::Column { customer::Column::CreatedBy }
///     fn created_date_column() -> Self::Column { customer::Column::CreatedDate }
///     fn modified_by_column() -> Self::Column { customer::Column::ModifiedBy }
///     fn modified_date_column() -> Self::Column { customer::Column::ModifiedDate }
/// }
/// ```
pub trait AuditedEntity: EntityTrait {
    /// Integer primary key column.
    fn id_column() -> Self::Column;

    /// Nullable text column written once by `create`.
    fn created_by_column() -> Self::Column;

    /// UTC timestamp column written once by `create`.
    fn created_date_column() -> Self::Column;

    /// Nullable text column overwritten by every `update`.
    fn modified_by_column() -> Self::Column;

    /// UTC timestamp column overwritten by every `update`.
    fn modified_date_column() -> Self::Column;

    /// Validates a staged insert or update before it is written.
    ///
    /// Called for every added or modified entry when the change set is flushed. Returning
    /// field errors for any entry aborts the whole flush before the database is touched.
    ///
    /// # Arguments
    /// - `model` - Active model as it will be written
    ///
    /// # Returns
    /// - `Ok(())` - Model may be written
    /// - `Err(Vec<FieldError>)` - One error per rejected field
    fn validate(model: &Self::ActiveModel) -> Result<(), Vec<FieldError>> {
        let _ = model;
        Ok(())
    }

    /// Name of the backing table, used in change keys, errors and logs.
    fn entity_name() -> String {
        Self::default().table_name().to_string()
    }
}

/// Reads the identifier held by an active model.
///
/// # Returns
/// - `Some(id)` - Identifier is set (or unchanged) and holds a value
/// - `None` - Identifier is not set or null
pub fn active_model_id<E: AuditedEntity>(model: &E::ActiveModel) -> Option<i32> {
    match model.get(E::id_column()) {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => value_to_id(value),
        ActiveValue::NotSet => None,
    }
}

/// Reads the identifier of a loaded model.
pub fn model_id<E: AuditedEntity>(model: &E::Model) -> Option<i32> {
    value_to_id(model.get(E::id_column()))
}

fn value_to_id(value: Value) -> Option<i32> {
    <i32 as ValueType>::try_from(value).ok()
}
