//! Test fixtures for common test scenarios.
//!
//! This module provides pre-built descriptors and helpers that write them to
//! disk.

use std::path::Path;

use crate::core::project::{Project, PROJECT_FILE_NAME};

/// A descriptor with three dependencies (the last test-scoped) and three
/// executions: `hello` and `repl` bind the `clojure` goal, `bare` binds only
/// `deps.edn` and carries no configuration.
pub const SAMPLE_PROJECT: &str = r#"
[project]
group = "com.example"
artifact = "hello"
version = "0.1.0"

[[dependencies]]
group = "org.clojure"
artifact = "clojure"
version = "1.10.1"

[[dependencies]]
group = "org.clojure"
artifact = "spec.alpha"
version = "0.2.176"
scope = "runtime"

[[dependencies]]
group = "lambdaisland"
artifact = "kaocha"
version = "1.0.0"
scope = "test"

[[executions]]
id = "hello"
goals = ["clojure"]

[executions.configuration]
args = "-m hello.core"
sourcePaths = ["src/main/clojure"]

[[executions]]
id = "repl"
goals = ["clojure", "deps.edn"]

[executions.configuration]
args = "-M:repl"
executable = "clj"
classpathScope = "TEST"

[[executions]]
id = "bare"
goals = ["deps.edn"]
"#;

/// Write a descriptor into `dir` and load it.
pub fn write_project(dir: &Path, content: &str) -> Project {
    let path = dir.join(PROJECT_FILE_NAME);
    std::fs::write(&path, content).expect("failed to write descriptor");
    Project::load(&path).expect("failed to load descriptor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_project() {
        let tmp = TempDir::new().unwrap();
        let project = write_project(tmp.path(), SAMPLE_PROJECT);
        assert_eq!(project.root(), tmp.path());
        assert_eq!(project.executions_of("deps.edn").count(), 2);
    }
}
