//! Configuration management for PowerX server
//!
//! Values come from `conf/application.yml` (optional), `POWERX`-prefixed
//! environment variables and command line overrides, in increasing priority.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use config::{Config, ConfigError, Environment};
use powerx_organization::CredentialService;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::startup::LoggingConfig;

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";
pub const DEFAULT_PASSWORD_COST: u32 = 12;

pub const DB_URL: &str = "db.url";
pub const DB_POOL_MAX_CONNECTIONS: &str = "db.pool.maxConnections";
pub const DB_POOL_MIN_CONNECTIONS: &str = "db.pool.minConnections";
pub const DB_POOL_CONNECT_TIMEOUT: &str = "db.pool.connectTimeout";
pub const DB_POOL_IDLE_TIMEOUT: &str = "db.pool.idleTimeout";
pub const DB_POOL_SQLX_LOGGING: &str = "db.pool.sqlxLogging";
pub const PASSWORD_COST: &str = "powerx.password.cost";
pub const MIGRATE_ON_STARTUP: &str = "powerx.migrate";
pub const LOG_DIR: &str = "powerx.log.dir";
pub const LOG_CONSOLE: &str = "powerx.log.console";
pub const LOG_FILE: &str = "powerx.log.file";
pub const LOG_LEVEL: &str = "powerx.log.level";
pub const LOG_ROTATION: &str = "powerx.log.rotation";

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command(name = "powerx-server", version, about = "PowerX organization server")]
struct Cli {
    /// Path of the YAML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Loads the configuration using the process command line.
    pub fn new() -> anyhow::Result<Self> {
        let args = Cli::parse();
        Self::load(&args.config, args.database_url)
    }

    /// Loads the configuration from `path`, the environment and an optional
    /// database URL override.
    pub fn load(path: &std::path::Path, database_url: Option<String>) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                Environment::with_prefix("powerx")
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(v) = database_url {
            config_builder = config_builder
                .set_override(DB_URL, v)
                .context("Failed to set database URL override")?;
        }

        let config = config_builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path.display()))?;

        Ok(Configuration { config })
    }

    // ========================================================================
    // Organization Configuration
    // ========================================================================

    /// Configured bcrypt cost, `DEFAULT_PASSWORD_COST` when unset. Values
    /// outside the `u32` range are rejected instead of wrapped.
    pub fn password_cost(&self) -> anyhow::Result<u32> {
        match self.config.get_int(PASSWORD_COST) {
            Ok(v) => u32::try_from(v)
                .map_err(|_| anyhow!("Invalid {}: {} is out of range", PASSWORD_COST, v)),
            Err(ConfigError::NotFound(_)) => Ok(DEFAULT_PASSWORD_COST),
            Err(e) => Err(anyhow!("Invalid {}: {}", PASSWORD_COST, e)),
        }
    }

    /// Credential service for the configured cost. Costs below the production
    /// minimum are refused.
    pub fn credential_service(&self) -> anyhow::Result<CredentialService> {
        CredentialService::production(self.password_cost()?)
            .map_err(|e| anyhow!("Invalid {}: {}", PASSWORD_COST, e))
    }

    pub fn migrate_on_startup(&self) -> bool {
        self.config.get_bool(MIGRATE_ON_STARTUP).unwrap_or(true)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    /// Logging settings from the environment, overridden by `powerx.log.*`.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut logging = LoggingConfig::from_env();

        if let Ok(v) = self.config.get_string(LOG_DIR) {
            logging.log_dir = PathBuf::from(v);
        }
        if let Ok(v) = self.config.get_bool(LOG_CONSOLE) {
            logging.console_output = v;
        }
        if let Ok(v) = self.config.get_bool(LOG_FILE) {
            logging.file_logging = v;
        }
        if let Some(level) = self
            .config
            .get_string(LOG_LEVEL)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            logging.console_level = level;
            logging.file_level = level;
        }
        if let Some(rotation) = self
            .config
            .get_string(LOG_ROTATION)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            logging.rotation = rotation;
        }

        logging
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub fn database_url(&self) -> anyhow::Result<String> {
        self.config
            .get_string(DB_URL)
            .with_context(|| format!("Missing required configuration {}", DB_URL))
    }

    pub fn connect_options(&self) -> anyhow::Result<ConnectOptions> {
        let max_connections = self
            .config
            .get_int(DB_POOL_MAX_CONNECTIONS)
            .unwrap_or(20) as u32;
        let min_connections = self
            .config
            .get_int(DB_POOL_MIN_CONNECTIONS)
            .unwrap_or(1) as u32;
        let connect_timeout = self
            .config
            .get_int(DB_POOL_CONNECT_TIMEOUT)
            .unwrap_or(30) as u64;
        let idle_timeout = self.config.get_int(DB_POOL_IDLE_TIMEOUT).unwrap_or(600) as u64;
        let sqlx_logging = self
            .config
            .get_bool(DB_POOL_SQLX_LOGGING)
            .unwrap_or(false);

        let mut opt = ConnectOptions::new(self.database_url()?);

        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .sqlx_logging(sqlx_logging)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        Ok(opt)
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let database_connection = Database::connect(self.connect_options()?)
            .await
            .context("Failed to connect to database")?;

        Ok(database_connection)
    }
}
