//! Test utility functions for runner scenarios

use async_trait::async_trait;
use runner::execution::CommandLine;
use runner::{CommandExecutor, ExecutionEngine, PipelineDocument, ProcessorResult, RunOptions, RunnerError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock executor that records every argv it receives
///
/// By default it answers with `argv[1..]` joined by spaces, like `echo`.
/// Programs can be scripted to fail or to sleep before answering.
#[derive(Clone, Default)]
pub struct MockExecutor {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    failures: Arc<HashMap<String, String>>,
    delays: Arc<HashMap<String, Duration>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` exit unsuccessfully with `stderr`
    pub fn failing(mut self, program: &str, stderr: &str) -> Self {
        Arc::make_mut(&mut self.failures).insert(program.to_string(), stderr.to_string());
        self
    }

    /// Make any command whose first argument is `arg` take `delay`
    pub fn delayed(mut self, arg: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(arg.to_string(), delay);
        self
    }

    /// All argv vectors received so far, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, command: &CommandLine) -> Result<String, RunnerError> {
        if let Some(delay) = command.argv.get(1).and_then(|arg| self.delays.get(arg)) {
            tokio::time::sleep(*delay).await;
        }

        self.calls.lock().unwrap().push(command.argv.clone());

        if let Some(stderr) = self.failures.get(command.program()) {
            return Err(RunnerError::execution(stderr));
        }

        Ok(command.argv[1..].join(" "))
    }
}

/// Parse `yaml` and run it against a mock executor
pub async fn run_with_mock(
    yaml: &str,
    options: &RunOptions,
    executor: MockExecutor,
) -> Result<ProcessorResult, RunnerError> {
    let doc = PipelineDocument::from_yaml(yaml)?;
    let engine = ExecutionEngine::new(executor);
    engine.run_pipeline(&doc, options).await
}

/// Parse `yaml` and run it with real subprocesses
pub async fn run_for_real(yaml: &str, options: &RunOptions) -> Result<ProcessorResult, RunnerError> {
    let doc = PipelineDocument::from_yaml(yaml)?;
    ExecutionEngine::local().run_pipeline(&doc, options).await
}

/// Options rooted at `pwd` with default output settings
pub fn options_at(pwd: &str) -> RunOptions {
    RunOptions::new(pwd)
}

/// Assert that a run succeeded and produced exactly `expected`
pub fn assert_output(result: &ProcessorResult, expected: &str) {
    assert_eq!(result.error, None, "Run reported an error");
    assert_eq!(result.output.as_deref(), Some(expected));
}

/// Assert that a run was rejected by validation with `message`
pub fn assert_rejected(result: &ProcessorResult, message: &str) {
    assert_eq!(result.output, None);
    assert_eq!(result.error.as_deref(), Some(message));
}

/// Build an argv vector from string slices
pub fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
