//! Run results

use serde::{Deserialize, Serialize};

/// Result of one step: its display label and reported output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub title: Option<String>,
    pub output: String,
}

impl StepReport {
    /// A report with neither a label nor output carries nothing to show
    pub fn is_blank(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty) && self.output.is_empty()
    }
}

/// Final result of a pipeline run. Exactly one field is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorResult {
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ProcessorResult {
    pub fn output(output: String) -> Self {
        Self {
            output: Some(output),
            error: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            output: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
