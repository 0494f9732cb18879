//! Customer factory for creating test customer entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test customers with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::customer::CustomerFactory;
///
/// let customer = CustomerFactory::new(&db)
///     .name("Ada")
///     .email("ada@example.com")
///     .build()
///     .await?;
/// ```
pub struct CustomerFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    email: String,
    created_by: Option<String>,
    created_date: DateTime<Utc>,
}

impl<'a> CustomerFactory<'a> {
    /// Creates a new CustomerFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Customer {id}"` where id is auto-incremented
    /// - email: `"customer{id}@example.com"`
    /// - created_by: `Some("factory")`
    /// - created_date: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `CustomerFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Customer {}", id),
            email: format!("customer{}@example.com", id),
            created_by: Some("factory".to_string()),
            created_date: Utc::now(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn created_by(mut self, created_by: Option<&str>) -> Self {
        self.created_by = created_by.map(str::to_string);
        self
    }

    pub fn created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = created_date;
        self
    }

    /// Builds and inserts the customer entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::customer::Model)` - Created customer entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::customer::Model, DbErr> {
        entity::customer::ActiveModel {
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            created_by: ActiveValue::Set(self.created_by),
            created_date: ActiveValue::Set(self.created_date),
            modified_by: ActiveValue::Set(None),
            modified_date: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a customer with default values.
///
/// Shorthand for `CustomerFactory::new(db).build().await`.
pub async fn create_customer(db: &DatabaseConnection) -> Result<entity::customer::Model, DbErr> {
    CustomerFactory::new(db).build().await
}

/// Creates customers with the given names, in order.
///
/// # Returns
/// - `Ok(Vec<entity::customer::Model>)` - Created customers in the order of `names`
/// - `Err(DbErr)` - Database error during insert
pub async fn create_customers(
    db: &DatabaseConnection,
    names: &[&str],
) -> Result<Vec<entity::customer::Model>, DbErr> {
    let mut customers = Vec::with_capacity(names.len());
    for name in names {
        customers.push(CustomerFactory::new(db).name(*name).build().await?);
    }
    Ok(customers)
}
