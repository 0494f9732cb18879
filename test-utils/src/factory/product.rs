//! Product factory for creating test product entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test products with customizable fields.
pub struct ProductFactory<'a> {
    db: &'a DatabaseConnection,
    sku: String,
    name: String,
    price_cents: i64,
}

impl<'a> ProductFactory<'a> {
    /// Creates a new ProductFactory with default values.
    ///
    /// Defaults:
    /// - sku: `"SKU-{id}"` where id is auto-incremented
    /// - name: `"Product {id}"`
    /// - price_cents: `1000`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            price_cents: 1000,
        }
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    /// Builds and inserts the product entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::product::Model)` - Created product entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::product::Model, DbErr> {
        entity::product::ActiveModel {
            sku: ActiveValue::Set(self.sku),
            name: ActiveValue::Set(self.name),
            price_cents: ActiveValue::Set(self.price_cents),
            created_by: ActiveValue::Set(Some("factory".to_string())),
            created_date: ActiveValue::Set(Utc::now()),
            modified_by: ActiveValue::Set(None),
            modified_date: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a product with default values.
pub async fn create_product(db: &DatabaseConnection) -> Result<entity::product::Model, DbErr> {
    ProductFactory::new(db).build().await
}

/// Creates a product with a specific price.
pub async fn create_product_with_price(
    db: &DatabaseConnection,
    price_cents: i64,
) -> Result<entity::product::Model, DbErr> {
    ProductFactory::new(db).price_cents(price_cents).build().await
}
