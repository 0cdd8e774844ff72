//! Variable scope - the merged, read-only namespace used for interpolation

use crate::core::{config::PipelineDocument, RunnerError};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Effective output formatting options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Which step field labels each result (`"name"`, `"description"`); empty for none
    pub prefix: String,
    pub pretty: bool,
    pub colored: bool,
    pub table: bool,
    /// The pipeline name
    pub title: String,
}

/// Output options as supplied by a caller. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOverrides {
    pub prefix: Option<String>,
    pub pretty: Option<bool>,
    pub colored: Option<bool>,
    pub table: Option<bool>,
}

/// Caller-supplied inputs to a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Absolute working directory of the caller
    pub pwd: PathBuf,

    /// Path to the document, relative to `pwd`
    pub filename: PathBuf,

    pub output: OutputOverrides,
}

impl RunOptions {
    pub fn new(pwd: impl Into<PathBuf>) -> Self {
        Self {
            pwd: pwd.into(),
            filename: PathBuf::from("runner.yaml"),
            output: OutputOverrides::default(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_output(mut self, output: OutputOverrides) -> Self {
        self.output = output;
        self
    }

    /// Absolute path of the document
    pub fn document_path(&self) -> PathBuf {
        self.pwd.join(&self.filename)
    }
}

/// `output` block as it may appear under the document's variables
#[derive(Debug, Default, Deserialize)]
struct DeclaredOutput {
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    pretty: Option<bool>,
    #[serde(default)]
    colored: Option<bool>,
    #[serde(default)]
    table: Option<bool>,
}

/// The resolved scope for one run
#[derive(Debug, Clone)]
pub struct Scope {
    /// Document variables plus the injected `pwd` and `output`
    variables: HashMap<String, Value>,

    /// Absolute working directory for commands and path rewriting
    pub pwd: PathBuf,

    pub output: OutputOptions,
}

impl Scope {
    /// Build the effective scope from a document and the caller's options
    ///
    /// Output fields: caller override, then document value, then default.
    /// `pwd` is the caller's directory joined with the document's `pwd`.
    pub fn resolve(doc: &PipelineDocument, options: &RunOptions) -> Self {
        let declared = doc
            .variables
            .get("output")
            .map(|value| {
                serde_yaml::from_value::<DeclaredOutput>(value.clone()).unwrap_or_else(|e| {
                    warn!("Ignoring malformed `output` variable: {}", e);
                    DeclaredOutput::default()
                })
            })
            .unwrap_or_default();
        let overrides = &options.output;

        let output = OutputOptions {
            prefix: overrides
                .prefix
                .clone()
                .filter(|p| !p.is_empty())
                .or(declared.prefix)
                .unwrap_or_default(),
            pretty: overrides.pretty.or(declared.pretty).unwrap_or(false),
            colored: overrides.colored.or(declared.colored).unwrap_or(false),
            table: overrides.table.or(declared.table).unwrap_or(false),
            title: doc.name.clone().unwrap_or_default(),
        };

        let declared_pwd = doc
            .variables
            .get("pwd")
            .and_then(render_scalar)
            .unwrap_or_else(|| ".".to_string());
        let pwd = join_normalized(&options.pwd, Path::new(&declared_pwd));

        let mut variables = doc.variables.clone();
        variables.insert(
            "pwd".to_string(),
            Value::String(pwd.to_string_lossy().into_owned()),
        );
        variables.insert("output".to_string(), output_value(&output));

        Self {
            variables,
            pwd,
            output,
        }
    }

    /// Look up `name`, first in the step's `with` bindings, then globally
    pub fn lookup(
        &self,
        name: &str,
        with: &HashMap<String, Value>,
        step: &str,
    ) -> Result<String, RunnerError> {
        let value = with
            .get(name)
            .or_else(|| self.variables.get(name))
            .ok_or_else(|| RunnerError::UndefinedVariable {
                name: name.to_string(),
                step: step.to_string(),
            })?;

        render_scalar(value).ok_or_else(|| RunnerError::NonScalarVariable {
            name: name.to_string(),
            step: step.to_string(),
        })
    }

    /// Get a global variable
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

fn output_value(output: &OutputOptions) -> Value {
    let mut map = Mapping::new();
    map.insert("prefix".into(), output.prefix.clone().into());
    map.insert("pretty".into(), output.pretty.into());
    map.insert("colored".into(), output.colored.into());
    map.insert("table".into(), output.table.into());
    map.insert("title".into(), output.title.clone().into());
    Value::Mapping(map)
}

/// Render a scalar YAML value as text. Mappings and sequences have no text form.
pub fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => render_scalar(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Join `rel` onto `base` and fold `.`/`..` lexically.
///
/// A leading `/` in `rel` does not escape `base`.
pub fn join_normalized(base: &Path, rel: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in base.components().chain(rel.components().filter(|c| {
        !matches!(c, Component::RootDir | Component::Prefix(_))
    })) {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
