//! Declared and resolved dependencies.
//!
//! A [`DeclaredDependency`] is what the project descriptor asks for; a
//! [`ResolvedArtifact`] is the file a resolver found for it.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::scope::DependencyScope;

/// A dependency as declared in `Cljgoal.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
    /// Group identifier, e.g. `org.clojure`
    pub group: String,

    /// Artifact identifier, e.g. `clojure`
    pub artifact: String,

    /// Version string, used verbatim
    pub version: String,

    /// Dependency scope
    #[serde(default)]
    pub scope: DependencyScope,

    /// Local file standing in for the artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl DeclaredDependency {
    /// Create a compile-scoped dependency.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        DeclaredDependency {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            scope: DependencyScope::Compile,
            path: None,
        }
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    /// Point the dependency at a local file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The `group/artifact` symbol used by `deps.edn`.
    pub fn symbol(&self) -> String {
        if self.group.is_empty() {
            self.artifact.clone()
        } else {
            format!("{}/{}", self.group, self.artifact)
        }
    }

    /// The `group:artifact:version` coordinate used in messages.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl fmt::Display for DeclaredDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.coordinate(), self.scope)
    }
}

/// A dependency that was located on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedArtifact {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Absolute path of the resolved file
    pub file: PathBuf,
}

impl ResolvedArtifact {
    /// Create a resolved artifact for a declared dependency.
    pub fn for_dependency(dep: &DeclaredDependency, file: impl Into<PathBuf>) -> Self {
        ResolvedArtifact {
            group: dep.group.clone(),
            artifact: dep.artifact.clone(),
            version: dep.version.clone(),
            file: file.into(),
        }
    }

    /// Get the resolved file.
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Resolved artifacts, unique by file and kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedArtifacts {
    artifacts: Vec<ResolvedArtifact>,
    seen: HashSet<PathBuf>,
}

impl ResolvedArtifacts {
    /// Create an empty set.
    pub fn new() -> Self {
        ResolvedArtifacts::default()
    }

    /// Insert an artifact. Returns `false` if its file was already present.
    pub fn insert(&mut self, artifact: ResolvedArtifact) -> bool {
        if !self.seen.insert(artifact.file.clone()) {
            return false;
        }
        self.artifacts.push(artifact);
        true
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedArtifact> {
        self.artifacts.iter()
    }

    /// Iterate over the resolved files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.iter().map(|a| a.file.as_path())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl FromIterator<ResolvedArtifact> for ResolvedArtifacts {
    fn from_iter<I: IntoIterator<Item = ResolvedArtifact>>(iter: I) -> Self {
        let mut set = ResolvedArtifacts::new();
        for artifact in iter {
            set.insert(artifact);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_and_coordinate() {
        let dep = DeclaredDependency::new("org.clojure", "clojure", "1.10.1");
        assert_eq!(dep.symbol(), "org.clojure/clojure");
        assert_eq!(dep.coordinate(), "org.clojure:clojure:1.10.1");

        let bare = DeclaredDependency::new("", "eftest", "0.5.9");
        assert_eq!(bare.symbol(), "eftest");
    }

    #[test]
    fn test_resolved_artifacts_dedupe_by_file() {
        let a = DeclaredDependency::new("g", "a", "1");
        let b = DeclaredDependency::new("g", "b", "1");

        let set: ResolvedArtifacts = [
            ResolvedArtifact::for_dependency(&a, "/repo/a.jar"),
            ResolvedArtifact::for_dependency(&b, "/repo/b.jar"),
            ResolvedArtifact::for_dependency(&b, "/repo/a.jar"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        let files: Vec<&Path> = set.files().collect();
        assert_eq!(files, [Path::new("/repo/a.jar"), Path::new("/repo/b.jar")]);
        assert_eq!(set.iter().next().unwrap().artifact, "a");
    }

    #[test]
    fn test_declared_dependency_deserialize_defaults() {
        let dep: DeclaredDependency =
            toml::from_str("group = \"g\"\nartifact = \"a\"\nversion = \"1.0\"\n").unwrap();
        assert_eq!(dep.scope, DependencyScope::Compile);
        assert!(dep.path.is_none());

        let dep: DeclaredDependency = toml::from_str(
            "group = \"g\"\nartifact = \"a\"\nversion = \"1.0\"\nscope = \"test\"\n",
        )
        .unwrap();
        assert_eq!(dep.scope, DependencyScope::Test);
    }
}
