// Error module: one error type shared by the filesystem helpers, the
// prompts and the logger. The binary wraps these in `anyhow` for context.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("source is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    #[error("non-regular source file: {}", path.display())]
    NonRegularSource { path: PathBuf },

    #[error("non-regular destination file: {}", path.display())]
    NonRegularDestination { path: PathBuf },

    #[error("file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("no unique filename found in {} after {attempts} attempts", dir.display())]
    NoUniqueFilename { dir: PathBuf, attempts: usize },

    #[error("User aborted.")]
    UserAborted,

    #[error("Invalid choice.")]
    InvalidChoice,

    #[error("Input closed.")]
    InputClosed,

    #[error("No {what} command configured")]
    EmptyCommand { what: &'static str },

    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },

    #[error("Log file setup failed: {0}")]
    LogAppender(#[from] tracing_appender::rolling::InitError),

    #[error("Tracing subscriber error: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, HelperError>;

/// Return the first error found, or `Ok(())` if every step succeeded.
pub fn check_errors<E>(results: impl IntoIterator<Item = std::result::Result<(), E>>) -> std::result::Result<(), E> {
    results.into_iter().collect()
}
