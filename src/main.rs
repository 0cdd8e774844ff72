use runner::cli::commands::{RunCommand, ValidateCommand};
use runner::cli::output::{create_spinner, format_execution_event, style, CHECK, CROSS};
use runner::cli::{Cli, Command};
use runner::{ExecutionEngine, PipelineDocument, RunOptions};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; results go to stdout, logs to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // The working directory is read once here and passed down explicitly
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;

    let ok = match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd, RunOptions::new(cwd)).await?,
        Command::Validate(cmd) => validate_pipeline(cmd, RunOptions::new(cwd))?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_pipeline(cmd: &RunCommand, options: RunOptions) -> Result<bool> {
    let options = options
        .with_filename(cmd.input_file())
        .with_output(cmd.output_overrides());

    let engine = ExecutionEngine::local();
    let spinner = cmd.progress.then(create_spinner);
    if let Some(spinner) = spinner.clone() {
        engine.add_event_handler(move |event| spinner.set_message(format_execution_event(event)));
    }

    let result = engine.run_file(&options).await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            eprintln!();
            eprintln!("{}{}", CROSS, style(e).red());
            return Ok(false);
        }
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result.is_ok());
    }

    if let Some(output) = result.output.as_deref().filter(|o| !o.is_empty()) {
        println!();
        println!("{}", output);
    }
    if let Some(error) = &result.error {
        println!();
        println!("{}", style(error).red());
    }

    Ok(result.is_ok())
}

fn validate_pipeline(cmd: &ValidateCommand, options: RunOptions) -> Result<bool> {
    let options = options.with_filename(cmd.input.input_file());
    let path = options.document_path();
    let doc = PipelineDocument::from_file(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let validation = doc.validate();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
        return Ok(validation.valid);
    }

    match &validation.error {
        None => {
            println!("{}Pipeline document is valid!", CHECK);
            println!("  Name: {}", style(doc.name.as_deref().unwrap_or_default()).bold());
            println!(
                "  Jobs: {}",
                style(doc.jobs.as_ref().map_or(0, |jobs| jobs.len())).cyan()
            );
            println!("  Steps: {}", style(doc.step_count()).cyan());
            println!("  Variables: {}", style(doc.variables.len()).cyan());
        }
        Some(error) => {
            println!("{}Validation failed:", CROSS);
            println!("  {}", style(error).red());
        }
    }

    Ok(validation.valid)
}
