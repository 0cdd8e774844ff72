//! Error types for pipeline runs

use std::path::PathBuf;
use thiserror::Error;

/// Fallback message when a failed command wrote nothing to stderr
pub const EXEC_FAILED: &str = "exec: failed to execute command";

/// Fatal errors that abort a run
///
/// Validation problems are not errors here; they are reported through
/// [`crate::core::ProcessorResult::error`].
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to parse pipeline document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("undefined variable `{name}` in step `{step}`")]
    UndefinedVariable { name: String, step: String },

    #[error("variable `{name}` in step `{step}` is not a scalar value")]
    NonScalarVariable { name: String, step: String },

    #[error("unterminated quote in command: {line}")]
    UnterminatedQuote { line: String },

    #[error("{message}")]
    Execution { message: String },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("step task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl RunnerError {
    /// Build an execution error from captured stderr
    pub fn execution(stderr: &str) -> Self {
        let message = if stderr.is_empty() {
            EXEC_FAILED.to_string()
        } else {
            stderr.to_string()
        };
        RunnerError::Execution { message }
    }
}
