//! runner - a declarative YAML task runner
//!
//! A pipeline document names jobs made of steps; each step runs shell
//! command lines against a layered variable scope and the collected
//! outputs are rendered as plain text, prefixed lines or a table.

pub mod cli;
pub mod core;
pub mod execution;
pub mod output;

// Re-export commonly used types
pub use crate::core::{PipelineDocument, ProcessorResult, RunOptions, RunnerError, Scope, StepReport};
pub use crate::execution::{CommandExecutor, ExecutionEngine, ExecutionEvent, ProcessExecutor};
