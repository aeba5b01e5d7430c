//! Shared setup for organization integration tests

use powerx_migration::{Migrator, MigratorTrait};
use powerx_organization::{CredentialService, OrganizationUseCase, credential::MIN_COST};
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Use case over a fresh, initialized store.
pub async fn setup_use_case() -> OrganizationUseCase {
    let credentials = CredentialService::new(MIN_COST).expect("valid bcrypt cost");
    let use_case = OrganizationUseCase::new(setup_db().await, credentials);
    use_case.init().await.expect("initialize organization");
    use_case
}
