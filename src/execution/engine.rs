//! Main execution engine - orchestrates the entire pipeline run

use crate::{
    core::{PipelineDocument, ProcessorResult, RunOptions, RunnerError, Scope, Step, StepReport},
    execution::{CommandExecutor, ProcessExecutor, StepPlan, StepRunner},
    output::formatter_for,
};
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        run_id: Uuid,
        name: String,
        at: DateTime<Utc>,
    },
    JobStarted {
        job: String,
        steps: usize,
    },
    StepStarted {
        job: String,
        step: String,
    },
    StepFinished {
        job: String,
        step: String,
        elapsed: Duration,
    },
    JobFinished {
        job: String,
    },
    PipelineFinished {
        run_id: Uuid,
        at: DateTime<Utc>,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;

#[derive(Clone, Default)]
struct EventBus {
    handlers: Arc<RwLock<Vec<EventHandler>>>,
}

impl EventBus {
    fn emit(&self, event: ExecutionEvent) {
        if let Ok(handlers) = self.handlers.read() {
            for handler in handlers.iter() {
                handler(&event);
            }
        }
    }
}

/// A job with all of its steps planned
#[derive(Debug, Clone)]
struct JobPlan {
    name: String,
    steps: Vec<StepPlan>,
}

/// Main pipeline execution engine
///
/// Jobs run one after another in declaration order. The steps of a job are
/// started together and joined in declaration order; the first failure
/// aborts the remaining steps and the run.
pub struct ExecutionEngine<E> {
    runner: StepRunner<E>,
    events: EventBus,
}

impl ExecutionEngine<ProcessExecutor> {
    /// Engine that runs commands as local subprocesses
    pub fn local() -> Self {
        Self::new(ProcessExecutor::new())
    }
}

impl<E: CommandExecutor + 'static> ExecutionEngine<E> {
    pub fn new(executor: E) -> Self {
        Self {
            runner: StepRunner::new(Arc::new(executor)),
            events: EventBus::default(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        if let Ok(mut handlers) = self.events.handlers.write() {
            handlers.push(Arc::new(handler));
        }
    }

    /// Load the document named by `options` and run it
    pub async fn run_file(&self, options: &RunOptions) -> Result<ProcessorResult, RunnerError> {
        let doc = PipelineDocument::from_file(options.document_path())?;
        self.run_pipeline(&doc, options).await
    }

    /// Validate, resolve, run every job and format the results
    ///
    /// Validation failures come back as `ProcessorResult::error`; anything
    /// that goes wrong after that is returned as `Err`.
    pub async fn run_pipeline(
        &self,
        doc: &PipelineDocument,
        options: &RunOptions,
    ) -> Result<ProcessorResult, RunnerError> {
        let validation = doc.validate();
        if let Some(error) = validation.error {
            info!("Pipeline document rejected: {}", error);
            return Ok(ProcessorResult::error(error));
        }

        let scope = Scope::resolve(doc, options);
        let plans = plan_jobs(doc, &scope)?;

        let run_id = Uuid::new_v4();
        let name = scope.output.title.clone();
        info!("Starting pipeline: {} ({})", name, run_id);
        self.events.emit(ExecutionEvent::PipelineStarted {
            run_id,
            name: name.clone(),
            at: Utc::now(),
        });

        let mut reports = Vec::new();
        for job in plans {
            reports.extend(self.run_job(job).await?);
        }

        info!("Pipeline finished: {}", name);
        self.events.emit(ExecutionEvent::PipelineFinished {
            run_id,
            at: Utc::now(),
        });

        let reports: Vec<StepReport> = reports.into_iter().filter(|r| !r.is_blank()).collect();
        let formatted = formatter_for(&scope.output).format(&reports, &scope.output);
        Ok(ProcessorResult::output(formatted))
    }

    /// Run all steps of one job concurrently, returning reports in declaration order
    async fn run_job(&self, job: JobPlan) -> Result<Vec<StepReport>, RunnerError> {
        info!("Running job: {} ({} steps)", job.name, job.steps.len());
        self.events.emit(ExecutionEvent::JobStarted {
            job: job.name.clone(),
            steps: job.steps.len(),
        });

        let mut set = JoinSet::new();
        let count = job.steps.len();
        for (index, plan) in job.steps.into_iter().enumerate() {
            let runner = self.runner.clone();
            let events = self.events.clone();
            let job_name = job.name.clone();
            set.spawn(async move {
                events.emit(ExecutionEvent::StepStarted {
                    job: job_name.clone(),
                    step: plan.label.clone(),
                });
                let started = Instant::now();
                let report = runner.run(&plan).await?;
                events.emit(ExecutionEvent::StepFinished {
                    job: job_name,
                    step: plan.label,
                    elapsed: started.elapsed(),
                });
                Ok::<_, RunnerError>((index, report))
            });
        }

        // Dropping the set on an early return aborts the remaining steps
        let mut slots: Vec<Option<StepReport>> = vec![None; count];
        while let Some(joined) = set.join_next().await {
            let (index, report) = joined??;
            debug!("Step {} of job {} finished", index, job.name);
            slots[index] = Some(report);
        }

        self.events.emit(ExecutionEvent::JobFinished { job: job.name });
        Ok(slots.into_iter().flatten().collect())
    }
}

/// Interpolate every command of every job before anything runs
fn plan_jobs(doc: &PipelineDocument, scope: &Scope) -> Result<Vec<JobPlan>, RunnerError> {
    doc.jobs
        .iter()
        .flat_map(|jobs| jobs.iter())
        .map(|(name, job)| {
            let steps = job
                .steps
                .iter()
                .map(|config| StepPlan::build(&Step::from_config(config), scope))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, RunnerError>(JobPlan {
                name: name.to_string(),
                steps,
            })
        })
        .collect()
}
