//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories insert rows straight through SeaORM, bypassing the
//! repositories under test.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let customer = factory::create_customer(&db).await?;
//!     let product = factory::create_product(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let customer = factory::customer::CustomerFactory::new(&db)
//!     .name("Ada")
//!     .email("ada@example.com")
//!     .created_by(Some("seed"))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `customer` - Create customer entities
//! - `product` - Create product entities
//! - `helpers` - Shared id generation

pub mod customer;
pub mod helpers;
pub mod product;

// Re-export commonly used factory functions for concise usage
pub use customer::{create_customer, create_customers};
pub use product::{create_product, create_product_with_price};
