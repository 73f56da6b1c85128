//! Goal configuration mapping.
//!
//! Folds a configuration tree over a default [`GoalState`]. Each recognized
//! field replaces exactly one part of the state; anything else is ignored.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::config_node::ConfigNode;
use crate::core::goal_state::{
    GoalState, ARGS_KEY, CLASSPATH_SCOPE_KEY, EXECUTABLE_KEY, SOURCE_PATHS_KEY,
    SOURCE_PATH_CHILD_KEY, TEST_PATHS_KEY, TEST_PATH_CHILD_KEY,
};
use crate::core::project::Project;
use crate::core::scope::ScopeKind;
use crate::util::diagnostic::Diagnostic;

/// Goal states keyed by execution id.
pub type NamedConfigurations = BTreeMap<String, GoalState>;

/// Location of the configuration root in error messages.
const ROOT_LOCATION: &str = "configuration";

/// Error mapping a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("unrecognized configuration node at `{location}`: found a {found}")]
    #[diagnostic(code(cljgoal::config::node_type))]
    UnrecognizedNodeType {
        location: String,
        found: &'static str,
    },

    #[error("invalid value `{value}` for `{location}`")]
    #[diagnostic(code(cljgoal::config::invalid_value))]
    InvalidValue {
        location: String,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    /// Get the location the error refers to.
    pub fn location(&self) -> &str {
        match self {
            ConfigError::UnrecognizedNodeType { location, .. }
            | ConfigError::InvalidValue { location, .. } => location,
        }
    }

    /// Prefix the location with the execution it came from.
    pub fn in_execution(self, id: &str) -> Self {
        let prefix = |location: String| format!("executions[{}].{}", id, location);
        match self {
            ConfigError::UnrecognizedNodeType { location, found } => {
                ConfigError::UnrecognizedNodeType {
                    location: prefix(location),
                    found,
                }
            }
            ConfigError::InvalidValue {
                location,
                value,
                expected,
            } => ConfigError::InvalidValue {
                location: prefix(location),
                value,
                expected,
            },
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::UnrecognizedNodeType { found, .. } => {
                let expected = if *found == "tree" { "a plain value" } else { "a table" };
                Diagnostic::error(self.to_string())
                    .with_context(format!("expected {}", expected))
                    .with_suggestion(
                        "Write `configuration` as a table whose fields are strings or string arrays",
                    )
            }
            ConfigError::InvalidValue { expected, .. } => {
                Diagnostic::error(self.to_string()).with_context(format!("expected {}", expected))
            }
        }
    }
}

/// Map a configuration tree onto `defaults`.
///
/// `None` means the goal has no configuration and yields `Ok(None)`; an empty
/// tree yields the defaults unchanged.
pub fn parse(
    defaults: &GoalState,
    node: Option<&ConfigNode>,
) -> Result<Option<GoalState>, ConfigError> {
    let Some(node) = node else {
        return Ok(None);
    };

    let ConfigNode::Tree(children) = node else {
        return Err(ConfigError::UnrecognizedNodeType {
            location: ROOT_LOCATION.to_string(),
            found: node.kind(),
        });
    };

    children
        .iter()
        .try_fold(defaults.clone(), |state, (name, child)| {
            apply_field(state, name, child)
        })
        .map(Some)
}

fn apply_field(state: GoalState, name: &str, node: &ConfigNode) -> Result<GoalState, ConfigError> {
    let location = format!("{}.{}", ROOT_LOCATION, name);

    match name {
        ARGS_KEY => {
            let args = scalar(node, &location)?;
            Ok(state.with_arguments(Some(args.to_string())))
        }
        EXECUTABLE_KEY => {
            let executable = scalar(node, &location)?;
            if executable.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    location,
                    value: executable.to_string(),
                    expected: "a non-empty executable name or path",
                });
            }
            Ok(state.with_executable(executable))
        }
        CLASSPATH_SCOPE_KEY => {
            let label = scalar(node, &location)?;
            let scope = label
                .parse::<ScopeKind>()
                .map_err(|_| ConfigError::InvalidValue {
                    location,
                    value: label.to_string(),
                    expected: "one of NONE, COMPILE, TEST",
                })?;
            Ok(state.with_scope(scope))
        }
        SOURCE_PATHS_KEY => Ok(state.with_source_paths(list(node, SOURCE_PATH_CHILD_KEY, &location)?)),
        TEST_PATHS_KEY => Ok(state.with_test_paths(list(node, TEST_PATH_CHILD_KEY, &location)?)),
        other => {
            tracing::debug!("Ignoring unknown configuration field `{}`", other);
            Ok(state)
        }
    }
}

fn scalar<'a>(node: &'a ConfigNode, location: &str) -> Result<&'a str, ConfigError> {
    node.as_value()
        .ok_or_else(|| ConfigError::UnrecognizedNodeType {
            location: location.to_string(),
            found: node.kind(),
        })
}

/// Collect the values of children named `item_name` (case-insensitive).
///
/// A bare value is a one-element list.
fn list(node: &ConfigNode, item_name: &str, location: &str) -> Result<Vec<String>, ConfigError> {
    match node {
        ConfigNode::Value(value) => Ok(vec![value.clone()]),
        ConfigNode::Tree(children) => children
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(item_name))
            .map(|(name, child)| {
                scalar(child, &format!("{}.{}", location, name)).map(str::to_string)
            })
            .collect(),
    }
}

/// Parse every configured execution of `goal`.
///
/// Executions without configuration are skipped. The first error aborts the
/// walk and names the execution it came from.
pub fn named_configurations(
    project: &Project,
    goal: &str,
    defaults: &GoalState,
) -> Result<NamedConfigurations, ConfigError> {
    let mut configs = NamedConfigurations::new();

    for execution in project.executions_of(goal) {
        let parsed = parse(defaults, execution.configuration.as_ref())
            .map_err(|e| e.in_execution(&execution.id))?;

        match parsed {
            Some(state) => {
                configs.insert(execution.id.clone(), state);
            }
            None => tracing::debug!("Execution `{}` has no configuration", execution.id),
        }
    }

    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::goal_state::DEFAULT_SOURCE_PATH;
    use crate::test_support::SAMPLE_PROJECT;
    use std::path::Path;

    fn parse_tree(node: ConfigNode) -> Result<Option<GoalState>, ConfigError> {
        parse(&GoalState::default(), Some(&node))
    }

    #[test]
    fn test_absent_configuration() {
        assert_eq!(parse(&GoalState::default(), None), Ok(None));
    }

    #[test]
    fn test_empty_tree_is_defaults() {
        assert_eq!(parse_tree(ConfigNode::tree()), Ok(Some(GoalState::default())));
    }

    #[test]
    fn test_top_level_value_is_rejected() {
        let err = parse_tree(ConfigNode::value("-m app")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnrecognizedNodeType {
                location: "configuration".into(),
                found: "value",
            }
        );
    }

    #[test]
    fn test_recognized_fields() {
        let node = ConfigNode::tree()
            .with_child("args", ConfigNode::value("-m app.core"))
            .with_child("executable", ConfigNode::value("clj"))
            .with_child("classpathScope", ConfigNode::value("test"))
            .with_list("sourcePaths", "sourcePath", ["src", "dev"])
            .with_list("testPaths", "TestPath", ["test"]);

        let state = parse_tree(node).unwrap().unwrap();
        assert_eq!(state.arguments(), Some("-m app.core"));
        assert_eq!(state.executable(), "clj");
        assert_eq!(state.scope(), ScopeKind::Test);
        assert_eq!(state.source_paths(), ["src", "dev"]);
        assert_eq!(state.test_paths(), ["test"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let node = ConfigNode::tree()
            .with_child("jvmOpts", ConfigNode::value("-Xmx1g"))
            .with_child("nested", ConfigNode::tree().with_child("x", ConfigNode::value("y")));

        assert_eq!(parse_tree(node), Ok(Some(GoalState::default())));
    }

    #[test]
    fn test_list_children_with_other_names_are_skipped() {
        let node = ConfigNode::tree().with_child(
            "sourcePaths",
            ConfigNode::tree()
                .with_child("sourcePath", ConfigNode::value("a"))
                .with_child("comment", ConfigNode::value("ignored"))
                .with_child("SOURCEPATH", ConfigNode::value("b")),
        );

        let state = parse_tree(node).unwrap().unwrap();
        assert_eq!(state.source_paths(), ["a", "b"]);
    }

    #[test]
    fn test_bare_value_list() {
        let node = ConfigNode::tree().with_child("testPaths", ConfigNode::value("spec"));
        let state = parse_tree(node).unwrap().unwrap();
        assert_eq!(state.test_paths(), ["spec"]);
        assert_eq!(state.source_paths(), [DEFAULT_SOURCE_PATH]);
    }

    #[test]
    fn test_later_fields_win() {
        let node = ConfigNode::tree()
            .with_child("args", ConfigNode::value("first"))
            .with_child("args", ConfigNode::value("second"));
        let state = parse_tree(node).unwrap().unwrap();
        assert_eq!(state.arguments(), Some("second"));
    }

    #[test]
    fn test_invalid_scope_and_executable() {
        let err = parse_tree(
            ConfigNode::tree().with_child("classpathScope", ConfigNode::value("RUNTIME")),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref value, .. } if value == "RUNTIME"));
        assert_eq!(err.location(), "configuration.classpathScope");

        let err = parse_tree(ConfigNode::tree().with_child("executable", ConfigNode::value("")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_scalar_field_given_tree() {
        let err = parse_tree(ConfigNode::tree().with_child("args", ConfigNode::tree())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnrecognizedNodeType {
                location: "configuration.args".into(),
                found: "tree",
            }
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        let node = ConfigNode::tree()
            .with_child("classpathScope", ConfigNode::value("NONE"))
            .with_list("sourcePaths", "sourcePath", ["x"]);
        let defaults = GoalState::default();

        assert_eq!(parse(&defaults, Some(&node)), parse(&defaults, Some(&node)));
    }

    #[test]
    fn test_named_configurations_from_project() {
        let project = Project::parse(SAMPLE_PROJECT, Path::new("/work/app/Cljgoal.toml")).unwrap();
        let configs = named_configurations(&project, "clojure", &GoalState::default()).unwrap();

        let ids: Vec<&str> = configs.keys().map(String::as_str).collect();
        assert_eq!(ids, ["hello", "repl"]);
        assert_eq!(configs["hello"].arguments(), Some("-m hello.core"));
        assert_eq!(configs["repl"].scope(), ScopeKind::Test);
        assert_eq!(configs["repl"].executable(), "clj");
    }

    #[test]
    fn test_named_configurations_skip_unconfigured() {
        let content = r#"
[[executions]]
id = "empty"
goals = ["clojure"]
[executions.configuration]

[[executions]]
id = "none"
goals = ["clojure"]
"#;
        let project = Project::parse(content, Path::new("/p/Cljgoal.toml")).unwrap();
        let configs = named_configurations(&project, "clojure", &GoalState::default()).unwrap();

        assert_eq!(configs.len(), 1);
        assert_eq!(configs["empty"], GoalState::default());
    }

    #[test]
    fn test_named_configuration_errors_name_execution() {
        let content = r#"
[[executions]]
id = "broken"
goals = ["clojure"]
[executions.configuration]
classpathScope = "EVERYTHING"
"#;
        let project = Project::parse(content, Path::new("/p/Cljgoal.toml")).unwrap();
        let err = named_configurations(&project, "clojure", &GoalState::default()).unwrap_err();

        assert_eq!(err.location(), "executions[broken].configuration.classpathScope");
    }
}
