use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the orchestrator-level failures. Failures of the
/// external tools themselves are not errors; they are recorded in the run
/// report instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading the configuration or stdin.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when dry-run plan serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the configuration file is not valid TOML for the settings record.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Raised when the operator picks an entry that is not on the menu.
    #[error("invalid menu choice '{0}', expected a number between 0 and 5")]
    InvalidChoice(String),

    /// Raised when a task name cannot be parsed.
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// Raised when an external program could not be started at all.
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Raised in strict mode when at least one step did not succeed.
    #[error("{failed} of {total} step(s) failed")]
    StepsFailed { failed: usize, total: usize },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
