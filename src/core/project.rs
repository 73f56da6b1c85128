//! `Cljgoal.toml` project descriptor.
//!
//! The descriptor plays the part of the host build's project model: it declares
//! the project's dependencies, its build output layout, and the goal executions
//! whose `configuration` tables feed the configuration mapper.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::config_node::ConfigNode;
use crate::core::dependency::DeclaredDependency;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Descriptor file name.
pub const PROJECT_FILE_NAME: &str = "Cljgoal.toml";

/// Default compiled-output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "target/classes";

/// Default compiled-test-output directory, relative to the project root.
pub const DEFAULT_TEST_OUTPUT_DIRECTORY: &str = "target/test-classes";

/// Errors locating or reading the project descriptor.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ProjectError {
    #[error("could not find Cljgoal.toml in {} or any parent directory", .dir.display())]
    #[diagnostic(code(cljgoal::project::not_found))]
    NotFound { dir: PathBuf },

    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(cljgoal::project::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    #[diagnostic(code(cljgoal::project::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("execution id `{id}` cannot be used as a deps.edn alias")]
    #[diagnostic(code(cljgoal::project::invalid_execution_id))]
    InvalidExecutionId { id: String },

    #[error("execution id `{id}` is declared more than once")]
    #[diagnostic(code(cljgoal::project::duplicate_execution))]
    DuplicateExecution { id: String },
}

impl ProjectError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProjectError::NotFound { .. } => {
                Diagnostic::error(self.to_string()).with_suggestion(suggestions::NO_PROJECT)
            }
            ProjectError::Io { path, source } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(source.to_string()),
            ProjectError::Parse { path, source } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(source.message().to_string()),
            ProjectError::InvalidExecutionId { .. } => Diagnostic::error(self.to_string())
                .with_context("ids must start with a letter and use only letters, digits and .*+!-_?$%&=<>")
                .with_suggestion("Rename the execution, e.g. `my-exec` instead of `my exec`"),
            ProjectError::DuplicateExecution { id } => Diagnostic::error(self.to_string())
                .with_suggestion(format!("Rename one of the `{}` executions", id)),
        }
    }
}

/// Project coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub artifact: String,
    #[serde(default)]
    pub version: String,
}

/// `[build]` section: output directories, relative to the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BuildSection {
    pub output_directory: String,
    pub test_output_directory: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        BuildSection {
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
            test_output_directory: DEFAULT_TEST_OUTPUT_DIRECTORY.to_string(),
        }
    }
}

/// `[test]` section: settings of the `clojure.test` goal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TestSection {
    /// Execution id of the `clojure` goal whose configuration the tests borrow
    pub clojure_goal_execution_id: Option<String>,

    /// Skip the test run entirely
    pub skip: bool,

    /// Report success even when the test run fails
    pub test_failure_ignore: bool,

    /// Arguments for the test run, replacing the borrowed configuration's
    pub args: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExecution {
    id: String,
    #[serde(default)]
    goals: Vec<String>,
    #[serde(default)]
    configuration: Option<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(default)]
    project: ProjectInfo,
    #[serde(default)]
    build: BuildSection,
    #[serde(default)]
    dependencies: Vec<DeclaredDependency>,
    #[serde(default)]
    executions: Vec<RawExecution>,
    #[serde(default)]
    test: TestSection,
}

/// One configured use of one or more goals.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub id: String,
    pub goals: Vec<String>,
    /// `None` when the execution carries no configuration at all
    pub configuration: Option<ConfigNode>,
}

impl Execution {
    /// Check if this execution binds a goal (case-insensitive).
    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g.eq_ignore_ascii_case(goal))
    }
}

/// Filesystem layout of the project build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    root: PathBuf,
    output_directory: String,
    test_output_directory: String,
}

impl BuildLayout {
    /// Create a layout with the conventional directories.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BuildLayout::from_section(root, &BuildSection::default())
    }

    fn from_section(root: impl Into<PathBuf>, build: &BuildSection) -> Self {
        BuildLayout {
            root: root.into(),
            output_directory: build.output_directory.clone(),
            test_output_directory: build.test_output_directory.clone(),
        }
    }

    /// Get the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the compiled-output directory as declared.
    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }

    /// Get the compiled-test-output directory as declared.
    pub fn test_output_directory(&self) -> &str {
        &self.test_output_directory
    }
}

/// A loaded project descriptor.
#[derive(Debug, Clone)]
pub struct Project {
    path: PathBuf,
    info: ProjectInfo,
    layout: BuildLayout,
    dependencies: Vec<DeclaredDependency>,
    executions: Vec<Execution>,
    test: TestSection,
}

impl Project {
    /// Load a descriptor from disk.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse descriptor content. `path` locates the project root.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ProjectError> {
        let raw: RawProject = toml::from_str(content).map_err(|source| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut ids = HashSet::new();
        let mut executions = Vec::with_capacity(raw.executions.len());
        for raw_exec in raw.executions {
            if !is_alias_name(&raw_exec.id) {
                return Err(ProjectError::InvalidExecutionId { id: raw_exec.id });
            }
            if !ids.insert(raw_exec.id.clone()) {
                return Err(ProjectError::DuplicateExecution { id: raw_exec.id });
            }
            executions.push(Execution {
                configuration: raw_exec
                    .configuration
                    .as_ref()
                    .map(|v| ConfigNode::from_toml("configuration", v)),
                id: raw_exec.id,
                goals: raw_exec.goals,
            });
        }

        let root = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        Ok(Project {
            path: path.to_path_buf(),
            info: raw.project,
            layout: BuildLayout::from_section(root, &raw.build),
            dependencies: raw.dependencies,
            executions,
            test: raw.test,
        })
    }

    /// Get the descriptor path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the project root directory.
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    /// Get the project coordinates.
    pub fn info(&self) -> &ProjectInfo {
        &self.info
    }

    /// Get the build layout.
    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Get the declared dependencies in declaration order.
    pub fn dependencies(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }

    /// Get all executions in declaration order.
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    /// Get the executions that bind a goal.
    pub fn executions_of<'a>(&'a self, goal: &'a str) -> impl Iterator<Item = &'a Execution> + 'a {
        self.executions.iter().filter(move |e| e.has_goal(goal))
    }

    /// Get the `clojure.test` goal settings.
    pub fn test_settings(&self) -> &TestSection {
        &self.test
    }
}

/// Check that an execution id reads back as a single EDN keyword.
fn is_alias_name(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || "*+!-_?$%&=<>".contains(first) => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || ".*+!-_?$%&=<>".contains(c))
}

/// Find the descriptor in `dir` or any of its parents.
pub fn find_project(dir: &Path) -> Result<PathBuf, ProjectError> {
    let mut current = dir.to_path_buf();
    loop {
        let candidate = current.join(PROJECT_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ProjectError::NotFound {
                dir: dir.to_path_buf(),
            });
        }
    }
}
