//! File-based logging with per-component log files.
//!
//! | Log File          | Component                   | Target Prefixes                  |
//! |-------------------|-----------------------------|----------------------------------|
//! | powerx.log        | Root logger (all components)| (all)                            |
//! | organization.log  | Employees and departments   | powerx_organization              |
//! | persistence.log   | Database access             | powerx_persistence, sea_orm, sqlx|
//!
//! Files live in `~/powerx/logs` unless `POWERX_LOG_DIR` or `powerx.log.dir`
//! says otherwise. `POWERX_LOG_ROTATION` / `powerx.log.rotation` pick the
//! rolling period: `daily`, `hourly` or `never`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const ROOT_LOG_FILE: &str = "powerx.log";

struct ComponentLogDef {
    file_name: &'static str,
    /// Target module prefixes routed to this file
    targets: &'static [&'static str],
}

/// Each entry produces a separate rolling log file. The root `powerx.log`
/// always captures every event regardless of target.
const COMPONENT_LOGS: &[ComponentLogDef] = &[
    ComponentLogDef {
        file_name: "organization.log",
        targets: &["powerx_organization"],
    },
    ComponentLogDef {
        file_name: "persistence.log",
        targets: &["powerx_persistence", "powerx_migration", "sea_orm", "sea_orm_migration", "sqlx"],
    },
];

/// Rolling period of every log file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    /// One file per component, never rolled
    Never,
}

impl FromStr for LogRotation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(LogRotation::Daily),
            "hourly" => Ok(LogRotation::Hourly),
            "never" => Ok(LogRotation::Never),
            other => Err(anyhow::anyhow!("unknown log rotation '{}'", other)),
        }
    }
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(format!("{}/powerx/logs", home))
}

/// Logging configuration for the entire application.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log directory (default: `~/powerx/logs`)
    pub log_dir: PathBuf,
    pub console_output: bool,
    pub console_level: Level,
    pub file_logging: bool,
    pub file_level: Level,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            console_output: true,
            console_level: Level::INFO,
            file_logging: true,
            file_level: Level::INFO,
            rotation: LogRotation::default(),
        }
    }
}

impl LoggingConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let log_dir = std::env::var("POWERX_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_dir());

        let console_output = std::env::var("POWERX_LOG_CONSOLE")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let file_logging = std::env::var("POWERX_LOG_FILE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        let level = std::env::var("POWERX_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::INFO);

        let rotation = std::env::var("POWERX_LOG_ROTATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            log_dir,
            console_output,
            console_level: level,
            file_logging,
            file_level: level,
            rotation,
        }
    }
}

/// Opens a rolling appender for `file_name` and returns its non-blocking
/// writer. The guard is pushed onto `guards`.
fn rolling_writer(
    rotation: LogRotation,
    dir: &Path,
    file_name: &str,
    guards: &mut Vec<WorkerGuard>,
) -> NonBlocking {
    let appender = RollingFileAppender::new(rotation.into(), dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    guards.push(guard);
    writer
}

/// Plain-text file layer with source locations.
fn file_layer<F>(writer: NonBlocking, filter: F) -> Box<dyn Layer<Registry> + Send + Sync>
where
    F: tracing_subscriber::layer::Filter<Registry> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(filter)
        .boxed()
}

/// Keeps the non-blocking file writers alive. Dropping it flushes the
/// buffered output.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Initialize the logging system with console and multi-file output.
///
/// `RUST_LOG` controls the level of the console and root file layers.
/// Component files use per-layer [`Targets`] filters to route events by
/// their tracing target.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_filter(filter);
        layers.push(Box::new(console_layer));
    }

    if config.file_logging {
        let root_writer =
            rolling_writer(config.rotation, &config.log_dir, ROOT_LOG_FILE, &mut guards);
        let root_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.file_level.to_string()));
        layers.push(file_layer(root_writer, root_filter));

        let level = LevelFilter::from_level(config.file_level);
        for component in COMPONENT_LOGS {
            let writer =
                rolling_writer(config.rotation, &config.log_dir, component.file_name, &mut guards);
            let targets = Targets::new().with_targets(component.targets.iter().map(|t| (*t, level)));
            layers.push(file_layer(writer, targets));
        }
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if config.file_logging {
        tracing::info!(
            log_dir = %config.log_dir.display(),
            rotation = ?config.rotation,
            "File logging initialized: {} (root) + {} component log files",
            ROOT_LOG_FILE,
            COMPONENT_LOGS.len()
        );
    }

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}
