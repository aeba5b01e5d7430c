//! PowerX Persistence - Database entities
//!
//! This crate provides the SeaORM entity definitions for the organization
//! tables: `employees`, `departments` and the `department_ancestors`
//! closure table.

pub mod entity;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;
