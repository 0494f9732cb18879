//! Sample application entities for the repository layer.
//!
//! Each table carries the identifier and audit columns required by
//! [`audited_repo::AuditedEntity`] and implements its validation hook.

pub mod prelude;

pub mod customer;
pub mod product;
