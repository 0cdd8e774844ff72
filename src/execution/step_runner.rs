//! Step runner - turns a step into command executions and a report

use crate::{
    core::{
        config::Language, interpolation::interpolate_line, OutputPolicy, RunnerError, Scope,
        Step, StepReport,
    },
    execution::{CommandExecutor, CommandLine},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A step with every command line already interpolated
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    /// Used in logs and events
    pub label: String,

    /// Display label chosen by the output prefix
    pub title: Option<String>,

    pub commands: Vec<CommandLine>,

    /// `None` when the step has no `run`
    pub output: Option<OutputPolicy>,
}

impl StepPlan {
    /// Interpolate all of a step's command lines against the scope
    pub fn build(step: &Step, scope: &Scope) -> Result<Self, RunnerError> {
        let title = step.display_key(&scope.output.prefix).map(str::to_string);

        if let Some(run) = &step.run {
            if run.lang != Language::Sh {
                warn!(
                    "Step {} declares lang {:?}; running through the argv splitter",
                    step.label(),
                    run.lang
                );
            }
        }

        let commands = step
            .command_lines()
            .map(|line| {
                interpolate_line(line, step, scope).map(|argv| CommandLine {
                    argv,
                    cwd: scope.pwd.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            label: step.label().to_string(),
            title,
            commands,
            output: step.run.as_ref().map(|run| run.output.clone()),
        })
    }
}

/// Executes a single step
pub struct StepRunner<E> {
    executor: Arc<E>,
}

impl<E> Clone for StepRunner<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: CommandExecutor> StepRunner<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    /// Plan and run a step in one go
    pub async fn run_step(&self, step: &Step, scope: &Scope) -> Result<StepReport, RunnerError> {
        let plan = StepPlan::build(step, scope)?;
        self.run(&plan).await
    }

    /// Run a planned step's commands in sequence
    ///
    /// Each command's output gets a trailing newline; the first failing
    /// command aborts the step.
    pub async fn run(&self, plan: &StepPlan) -> Result<StepReport, RunnerError> {
        let Some(policy) = &plan.output else {
            return Ok(StepReport {
                title: plan.title.clone(),
                output: String::new(),
            });
        };

        info!("Running step: {}", plan.label);
        let mut captured = String::new();
        for command in &plan.commands {
            let output = self.executor.execute(command).await?;
            captured.push_str(&output);
            captured.push('\n');
        }
        debug!("Step {} captured {} bytes", plan.label, captured.len());

        let output = match policy {
            OutputPolicy::Captured => captured,
            OutputPolicy::Replaced(text) => text.clone(),
        };

        Ok(StepReport {
            title: plan.title.clone(),
            output,
        })
    }
}
