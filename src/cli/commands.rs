//! CLI command definitions

use crate::core::OutputOverrides;
use clap::Args;
use std::path::PathBuf;

/// Document used when no input is given
pub const DEFAULT_INPUT: &str = "runner.yaml";

/// Where to find the pipeline document
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Path to the pipeline document
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Positional arguments; the last one ending in .yaml/.yml is the document
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl InputArgs {
    /// `--input`, else the last positional YAML file, else `runner.yaml`
    pub fn input_file(&self) -> PathBuf {
        self.input
            .clone()
            .or_else(|| {
                self.files
                    .iter()
                    .rev()
                    .find(|f| {
                        f.extension()
                            .and_then(|e| e.to_str())
                            .is_some_and(|e| e == "yaml" || e == "yml")
                    })
                    .cloned()
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }
}

/// Run a pipeline document
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Step field used to label each result (e.g. "name")
    #[arg(long)]
    pub prefix: Option<String>,

    /// Print the pipeline name as a header
    #[arg(long)]
    pub pretty: bool,

    /// Color result labels
    #[arg(long)]
    pub colored: bool,

    /// Render results as a table
    #[arg(long)]
    pub table: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Show a progress spinner on stderr
    #[arg(long)]
    pub progress: bool,
}

impl RunCommand {
    pub fn input_file(&self) -> PathBuf {
        self.input.input_file()
    }

    /// Flags that were not given stay `None` so the document can decide
    pub fn output_overrides(&self) -> OutputOverrides {
        OutputOverrides {
            prefix: self.prefix.clone(),
            pretty: self.pretty.then_some(true),
            colored: self.colored.then_some(true),
            table: self.table.then_some(true),
        }
    }
}

/// Validate a pipeline document
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
