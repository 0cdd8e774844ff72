//! Pipeline execution engine

pub mod engine;
pub mod executor;
pub mod step_runner;

pub use engine::{EventHandler, ExecutionEngine, ExecutionEvent};
pub use executor::{CommandExecutor, CommandLine, ProcessExecutor};
pub use step_runner::{StepPlan, StepRunner};
