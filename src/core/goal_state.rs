//! Resolved configuration of a single `clojure` goal execution.
//!
//! A [`GoalState`] is a value: it is built once from defaults and every update
//! goes through a consuming `with_*` method that hands back a new state.

use serde::Serialize;

use crate::core::scope::ScopeKind;

/// Configuration key for the free-form argument string.
pub const ARGS_KEY: &str = "args";

/// Configuration key for the executable.
pub const EXECUTABLE_KEY: &str = "executable";

/// Configuration key for the classpath scope.
pub const CLASSPATH_SCOPE_KEY: &str = "classpathScope";

/// Configuration key for the list of source paths.
pub const SOURCE_PATHS_KEY: &str = "sourcePaths";

/// Child name of each entry in [`SOURCE_PATHS_KEY`].
pub const SOURCE_PATH_CHILD_KEY: &str = "sourcePath";

/// Configuration key for the list of test paths.
pub const TEST_PATHS_KEY: &str = "testPaths";

/// Child name of each entry in [`TEST_PATHS_KEY`].
pub const TEST_PATH_CHILD_KEY: &str = "testPath";

/// The Clojure CLI entry point.
pub const DEFAULT_EXECUTABLE: &str = "clojure";

/// Conventional location of Clojure sources.
pub const DEFAULT_SOURCE_PATH: &str = "src/main/clojure";

/// Conventional location of Clojure tests.
pub const DEFAULT_TEST_PATH: &str = "src/test/clojure";

/// Immutable configuration of one goal execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalState {
    arguments: Option<String>,
    executable: String,
    scope: ScopeKind,
    source_paths: Vec<String>,
    test_paths: Vec<String>,
}

impl GoalState {
    /// Default state with a specific executable.
    ///
    /// An empty executable falls back to [`DEFAULT_EXECUTABLE`].
    pub fn defaults_with_executable(executable: impl Into<String>) -> Self {
        GoalState::default().with_executable(executable)
    }

    /// Get the argument string, if any.
    pub fn arguments(&self) -> Option<&str> {
        self.arguments.as_deref()
    }

    /// Get the executable name or path.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Get the classpath scope.
    pub fn scope(&self) -> ScopeKind {
        self.scope
    }

    /// Get the source paths in declared order.
    pub fn source_paths(&self) -> &[String] {
        &self.source_paths
    }

    /// Get the test paths in declared order.
    pub fn test_paths(&self) -> &[String] {
        &self.test_paths
    }

    /// Replace the arguments. Blank strings count as no arguments.
    pub fn with_arguments(mut self, arguments: Option<String>) -> Self {
        self.arguments = arguments.filter(|a| !a.trim().is_empty());
        self
    }

    /// Replace the executable. Empty strings keep the current executable.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        let executable = executable.into();
        if !executable.trim().is_empty() {
            self.executable = executable;
        }
        self
    }

    /// Replace the classpath scope.
    pub fn with_scope(mut self, scope: ScopeKind) -> Self {
        self.scope = scope;
        self
    }

    /// Replace the source paths.
    pub fn with_source_paths(mut self, source_paths: Vec<String>) -> Self {
        self.source_paths = source_paths;
        self
    }

    /// Replace the test paths.
    pub fn with_test_paths(mut self, test_paths: Vec<String>) -> Self {
        self.test_paths = test_paths;
        self
    }
}

impl Default for GoalState {
    fn default() -> Self {
        GoalState {
            arguments: None,
            executable: DEFAULT_EXECUTABLE.to_string(),
            scope: ScopeKind::Compile,
            source_paths: vec![DEFAULT_SOURCE_PATH.to_string()],
            test_paths: vec![DEFAULT_TEST_PATH.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = GoalState::default();
        assert_eq!(state.arguments(), None);
        assert_eq!(state.executable(), "clojure");
        assert_eq!(state.scope(), ScopeKind::Compile);
        assert_eq!(state.source_paths(), ["src/main/clojure"]);
        assert_eq!(state.test_paths(), ["src/test/clojure"]);
    }

    #[test]
    fn test_updates_leave_original_untouched() {
        let original = GoalState::default();
        let updated = original
            .clone()
            .with_scope(ScopeKind::Test)
            .with_arguments(Some("-m app.core".to_string()));

        assert_eq!(original, GoalState::default());
        assert_eq!(updated.scope(), ScopeKind::Test);
        assert_eq!(updated.arguments(), Some("-m app.core"));
        assert_eq!(updated.source_paths(), original.source_paths());
    }

    #[test]
    fn test_blank_arguments_are_none() {
        let state = GoalState::default().with_arguments(Some("   ".to_string()));
        assert_eq!(state.arguments(), None);
    }

    #[test]
    fn test_empty_executable_is_ignored() {
        let state = GoalState::defaults_with_executable("");
        assert_eq!(state.executable(), DEFAULT_EXECUTABLE);

        let state = GoalState::defaults_with_executable("/opt/clojure/bin/clj");
        assert_eq!(state.executable(), "/opt/clojure/bin/clj");
    }
}
