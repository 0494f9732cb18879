//! Generic repository and unit-of-work layer over SeaORM.
//!
//! The crate lets an application read and write any table that implements [`AuditedEntity`]
//! through a single pair of generic repositories instead of one hand-written repository per
//! table.
//!
//! # Architecture
//!
//! - **Entity contract** (`entity`) - Identifier, audit columns and validation hook of a table
//! - **Query** (`query`) - Fixed filter, order, skip, take composition
//! - **Context** (`context`) - Persistence context and its pending change set
//! - **Repository** (`repository`) - Read-only and mutating accessors
//! - **Blocking** (`blocking`) - Synchronous counterparts of the accessors
//! - **Error** (`error`) - Crate error types
//! - **Configuration** (`config`, `startup`) - Environment config and database connection
//!
//! # Usage
//!
//! ```rust,ignore
//! use audited_repo::{DbContext, Repository};
//! use sea_orm::{ColumnTrait, Condition, IntoActiveModel};
//!
//! let mut context = DbContext::new(db);
//! let mut repo = Repository::new(&mut context);
//!
//! let entry = repo.create(customer::ActiveModel { name: Set("Ada".into()), ..Default::default() }, Some("alice"));
//! let saved = repo.save().await?;
//!
//! let ada = repo.get_by_id::<customer::Entity>(saved.id_of(entry).unwrap()).await?;
//! ```

pub mod blocking;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod query;
pub mod repository;
pub mod startup;

pub use context::{DbContext, EntityState, EntryId, SavedChanges};
pub use entity::AuditedEntity;
pub use error::{validation::ValidationError, RepoError};
pub use query::OrderBy;
pub use repository::{ReadOnlyRepository, Repository};
