//! Command executor - runs one resolved command line as a subprocess

use crate::core::RunnerError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// A fully interpolated command, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program followed by its arguments
    pub argv: Vec<String>,

    /// Working directory for the process
    pub cwd: PathBuf,
}

impl CommandLine {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }
}

/// Trait for command execution - allows for different implementations
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command to completion and return its trimmed stdout
    async fn execute(&self, command: &CommandLine) -> Result<String, RunnerError>;
}

/// Executes commands as local subprocesses
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    /// Spawns `argv[0]` directly (no shell) with stdout and stderr piped.
    ///
    /// # Errors
    /// Returns `RunnerError` if:
    /// - The program cannot be spawned
    /// - The process exits unsuccessfully (message is its trimmed stderr)
    async fn execute(&self, command: &CommandLine) -> Result<String, RunnerError> {
        let Some((program, args)) = command.argv.split_first() else {
            return Ok(String::new());
        };
        debug!("Spawning {:?} in {}", command.argv, command.cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(&command.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} exited with code {}: {}",
                program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            );
            return Err(RunnerError::execution(trim_output(&stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("{} returned {} bytes of output", program, stdout.len());

        Ok(trim_output(&stdout).to_string())
    }
}

/// Strip the trailing newline and a leading backslash artifact from captured output
pub fn trim_output(raw: &str) -> &str {
    let trimmed = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw);
    trimmed.strip_prefix('\\').unwrap_or(trimmed)
}
