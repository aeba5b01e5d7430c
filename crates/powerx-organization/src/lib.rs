//! PowerX Organization
//!
//! Employee directory, department hierarchy and credential services, composed
//! behind [`OrganizationUseCase`]:
//! - [`CredentialService`]: bcrypt password hashing and verification
//! - [`EmployeeDirectory`]: employee CRUD, search and paging
//! - [`DepartmentHierarchy`]: department tree with a materialized ancestor closure
//! - [`OrganizationUseCase`]: cross-entity rules and startup initialization

pub mod credential;
pub mod facade;
pub mod model;
pub mod service;

pub use credential::CredentialService;
pub use facade::OrganizationUseCase;
pub use model::{
    Department, Employee, EmployeeLoginOption, EmployeePatch, EmployeeStatus,
    FindManyDepartmentsOption, FindManyEmployeesOption, Gender,
};
pub use powerx_common::{OrgError, OrgResult, Page, PageOption};
pub use service::department::DepartmentHierarchy;
pub use service::employee::EmployeeDirectory;

#[cfg(test)]
pub(crate) mod testing {
    use powerx_migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};

    use crate::credential::{CredentialService, MIN_COST};

    /// Fresh in-memory SQLite database with the organization schema.
    pub async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    pub fn credentials() -> CredentialService {
        CredentialService::new(MIN_COST).unwrap()
    }
}
