//! Core domain models for the runner
//!
//! This module defines the pipeline document, the variable scope, steps,
//! interpolation of command lines and the run results.

pub mod config;
pub mod error;
pub mod interpolation;
pub mod result;
pub mod scope;
pub mod step;

pub use config::{PipelineDocument, Validation};
pub use error::RunnerError;
pub use result::{ProcessorResult, StepReport};
pub use scope::{OutputOptions, OutputOverrides, RunOptions, Scope};
pub use step::{OutputPolicy, Step, StepRun};
