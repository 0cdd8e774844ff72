//! Step domain model

use crate::core::config::{Language, ReturnMode, RunSpec, StepConfig};
use crate::core::scope::render_scalar;
use serde_yaml::Value;
use std::collections::HashMap;

/// A single step of a job, ready to be planned
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: Option<String>,
    pub description: Option<String>,

    /// Step-local variable bindings
    pub with: HashMap<String, Value>,

    /// What to run, if anything
    pub run: Option<StepRun>,
}

/// Normalized `run` specification
#[derive(Debug, Clone, PartialEq)]
pub struct StepRun {
    /// Raw command text, one command per line
    pub script: String,
    pub lang: Language,
    pub output: OutputPolicy,
}

/// What a step reports as its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Captured stdout of each command
    Captured,
    /// Commands still run, but this text is reported instead
    Replaced(String),
}

impl Step {
    pub fn from_config(config: &StepConfig) -> Self {
        let run = config.run.as_ref().map(|run| match run {
            RunSpec::Script(script) => StepRun {
                script: script.clone(),
                lang: Language::default(),
                output: OutputPolicy::Captured,
            },
            RunSpec::Structured(object) => StepRun {
                script: object.script.clone(),
                lang: object.lang,
                output: match object.return_mode {
                    ReturnMode::Surface => OutputPolicy::Captured,
                    ReturnMode::Suppress => OutputPolicy::Replaced(
                        object
                            .default
                            .as_ref()
                            .and_then(render_scalar)
                            .unwrap_or_default(),
                    ),
                },
            },
        });

        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            with: config.with.clone(),
            run,
        }
    }

    /// Field value used as the display label for the given key
    pub fn display_key(&self, key: &str) -> Option<&str> {
        match key {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }

    /// Identifier used in logs and error messages
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Non-empty command lines of the step's script
    pub fn command_lines(&self) -> impl Iterator<Item = &str> {
        self.run
            .iter()
            .flat_map(|run| run.script.lines())
            .filter(|line| !line.trim().is_empty())
    }
}
