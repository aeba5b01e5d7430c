//! Database migrations for the organization tables

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_organization_tables;
mod m20240101_000002_add_department_root_guard;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_organization_tables::Migration),
            Box::new(m20240101_000002_add_department_root_guard::Migration),
        ]
    }
}
