//! Main entry point for the PowerX organization server.

use anyhow::Context;
use powerx_migration::{Migrator, MigratorTrait};
use powerx_organization::OrganizationUseCase;
use powerx_server::{model::Configuration, startup};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    let credentials = configuration.credential_service()?;
    let shutdown = startup::shutdown_token();

    let database_connection = configuration.database_connection().await?;

    if configuration.migrate_on_startup() {
        Migrator::up(&database_connection, None)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations applied");
    }

    let organization = OrganizationUseCase::new(database_connection.clone(), credentials);
    let root = organization
        .run_cancellable(&shutdown, organization.init())
        .await
        .context("Failed to initialize the organization")?;

    info!(
        root_department = root.id,
        password_cost = credentials.cost(),
        "PowerX organization ready"
    );

    shutdown.cancelled().await;

    database_connection
        .close()
        .await
        .context("Failed to close database connection")?;
    info!("Shutdown complete");

    Ok(())
}
