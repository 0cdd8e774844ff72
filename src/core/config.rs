//! Pipeline document loaded from YAML

use crate::core::RunnerError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Top-level pipeline document
///
/// `name` and `jobs` are optional at the parsing level so that a document
/// missing them still loads and can be reported by [`PipelineDocument::validate`]
/// instead of failing as a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineDocument {
    /// Pipeline name
    #[serde(default)]
    pub name: Option<String>,

    /// Global variables available to all steps
    ///
    /// Older documents spell this key `var`.
    #[serde(default, alias = "var")]
    pub variables: HashMap<String, Value>,

    /// Jobs in declaration order
    #[serde(default)]
    pub jobs: Option<Jobs>,
}

/// Ordered job table
///
/// YAML mappings keep their order, so a plain map type would lose the
/// declaration order jobs must run in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Jobs(pub Vec<(String, JobConfig)>);

impl Jobs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JobConfig)> {
        self.0.iter().map(|(name, job)| (name.as_str(), job))
    }
}

impl<'de> Deserialize<'de> for Jobs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct JobsVisitor;

        impl<'de> Visitor<'de> for JobsVisitor {
            type Value = Jobs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of job name to job")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Jobs, M::Error> {
                let mut jobs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, job)) = map.next_entry::<String, Option<JobConfig>>()? {
                    jobs.push((name, job.unwrap_or_default()));
                }
                Ok(Jobs(jobs))
            }

            // `jobs:` with nothing after it
            fn visit_unit<E: de::Error>(self) -> Result<Jobs, E> {
                Ok(Jobs::default())
            }
        }

        deserializer.deserialize_any(JobsVisitor)
    }
}

impl Serialize for Jobs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, job) in &self.0 {
            map.serialize_entry(name, job)?;
        }
        map.end()
    }
}

/// A job: an ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Informational only
    #[serde(default)]
    pub description: Option<String>,

    /// Step-local variable bindings
    #[serde(default, rename = "with")]
    pub with: HashMap<String, Value>,

    /// Command(s) to execute
    #[serde(default)]
    pub run: Option<RunSpec>,
}

/// The `run` field: either raw command text or a structured object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunSpec {
    Script(String),
    Structured(RunObject),
}

/// Structured `run` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunObject {
    #[serde(default)]
    pub script: String,

    /// Reserved; commands always run through the argv splitter
    #[serde(default)]
    pub lang: Language,

    /// Whether captured stdout is surfaced
    #[serde(
        default,
        rename = "return",
        deserialize_with = "deserialize_return_mode"
    )]
    pub return_mode: ReturnMode,

    /// Replacement output when stdout is suppressed
    #[serde(default)]
    pub default: Option<Value>,
}

/// Interpreter tag on a structured run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sh,
    Cmd,
    Js,
    Go,
    Php,
}

/// `return: true` or absent surfaces stdout; `false` or `null` suppresses it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ReturnMode {
    #[default]
    Surface,
    Suppress,
}

// Only called when the key is present, so `null` lands here as `None`
// while a missing key falls back to `ReturnMode::default()`.
fn deserialize_return_mode<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ReturnMode, D::Error> {
    Ok(match Option::<bool>::deserialize(deserializer)? {
        Some(true) => ReturnMode::Surface,
        Some(false) | None => ReturnMode::Suppress,
    })
}

impl RunSpec {
    /// Newline-separated command text
    pub fn script(&self) -> &str {
        match self {
            RunSpec::Script(script) => script,
            RunSpec::Structured(run) => &run.script,
        }
    }
}

/// Outcome of [`PipelineDocument::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Self { valid: true, error: None }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            error: Some(message.to_string()),
        }
    }
}

impl PipelineDocument {
    /// Load a pipeline document from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a pipeline document from a YAML string
    ///
    /// Parsing does not validate; an empty document yields a default one.
    pub fn from_yaml(yaml: &str) -> Result<Self, RunnerError> {
        let doc: Option<PipelineDocument> = serde_yaml::from_str(yaml)?;
        Ok(doc.unwrap_or_default())
    }

    /// Check the minimal structure needed before running. First failure wins.
    pub fn validate(&self) -> Validation {
        if self.name.as_deref().map_or(true, str::is_empty) {
            return Validation::fail("Please provide name");
        }
        if self.jobs.as_ref().map_or(true, Jobs::is_empty) {
            return Validation::fail("No job found");
        }
        Validation::ok()
    }

    /// Total number of steps across all jobs
    pub fn step_count(&self) -> usize {
        self.jobs
            .iter()
            .flat_map(|jobs| jobs.iter())
            .map(|(_, job)| job.steps.len())
            .sum()
    }
}
