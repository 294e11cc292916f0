// Logging setup: compact console output plus an optional plain-text log
// file. Debug messages only show up when running verbose or via RUST_LOG.

use crate::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Log file name, without extension.
    pub name: String,
    /// Directory receiving `<name>.log`; console only when `None`.
    pub directory: Option<PathBuf>,
    pub verbose: bool,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), directory: None, verbose: false }
    }

    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.directory.as_ref().map(|d| d.join(format!("{}.{}", self.name, LOG_FILE_SUFFIX)))
    }
}

/// Keeps the log file writer alive. Dropping it flushes and closes the file.
#[must_use = "dropping the guard closes the log file"]
#[derive(Debug)]
pub struct LogGuard {
    guard: Option<WorkerGuard>,
}

impl LogGuard {
    /// Flush pending lines and close the log file.
    pub fn close(self) {
        drop(self);
    }

    pub fn has_file(&self) -> bool {
        self.guard.is_some()
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LoggerConfig) -> Result<LogGuard> {
    let default_level = if config.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .boxed();

    let (file, guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(&config.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(false).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(filter).with(console).with(file).try_init()?;

    if let Some(path) = config.log_file() {
        tracing::debug!("Logging to {}", path.display());
    }
    Ok(LogGuard { guard })
}
