//! Maven-layout local repository.

use std::path::{Path, PathBuf};

use crate::core::dependency::{DeclaredDependency, ResolvedArtifact};
use crate::core::scope::ScopeFilter;
use crate::resolver::{ArtifactResolver, ResolveError};
use crate::util::fs::absolutize;

/// Resolves dependencies against an on-disk repository without fetching.
///
/// Only the declared dependencies are located; their own dependencies are not
/// followed.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
    project_root: PathBuf,
}

impl LocalRepository {
    /// Create a resolver over `root`. A relative `root` and relative `path`
    /// dependencies both resolve against `project_root`.
    pub fn new(root: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        LocalRepository {
            root: absolutize(&project_root, &root.into()),
            project_root,
        }
    }

    /// Get the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file a dependency lives at inside the repository.
    ///
    /// `<root>/<group as dirs>/<artifact>/<version>/<artifact>-<version>.jar`
    pub fn artifact_path(&self, dep: &DeclaredDependency) -> PathBuf {
        let mut path = self.root.clone();
        for segment in dep.group.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&dep.artifact);
        path.push(&dep.version);
        path.push(format!("{}-{}.jar", dep.artifact, dep.version));
        path
    }

    fn locate(&self, dep: &DeclaredDependency) -> Result<PathBuf, ResolveError> {
        if let Some(ref local) = dep.path {
            let file = absolutize(&self.project_root, local);
            return if file.exists() {
                Ok(file)
            } else {
                Err(ResolveError::MissingPath {
                    coordinate: dep.coordinate(),
                    path: file,
                })
            };
        }

        let file = self.artifact_path(dep);
        if file.is_file() {
            Ok(file)
        } else {
            Err(ResolveError::ArtifactNotFound {
                coordinate: dep.coordinate(),
                searched: file,
            })
        }
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(
        &self,
        dependencies: &[DeclaredDependency],
        filter: &ScopeFilter,
    ) -> Result<Vec<ResolvedArtifact>, ResolveError> {
        dependencies
            .iter()
            .filter(|dep| filter.includes(dep.scope))
            .map(|dep| {
                let file = self.locate(dep)?;
                Ok(ResolvedArtifact::for_dependency(dep, file))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scope::{DependencyScope, ScopeKind};
    use tempfile::TempDir;

    fn install(repo: &LocalRepository, dep: &DeclaredDependency) -> PathBuf {
        let path = repo.artifact_path(dep);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"PK").unwrap();
        path
    }

    #[test]
    fn test_artifact_path_layout() {
        let repo = LocalRepository::new("/m2", "/work/app");
        let dep = DeclaredDependency::new("org.clojure", "clojure", "1.10.1");
        assert_eq!(
            repo.artifact_path(&dep),
            PathBuf::from("/m2/org/clojure/clojure/1.10.1/clojure-1.10.1.jar")
        );
    }

    #[test]
    fn test_resolves_installed_artifacts_in_scope() {
        let tmp = TempDir::new().unwrap();
        let repo = LocalRepository::new(tmp.path().join("m2"), tmp.path());
        let clojure = DeclaredDependency::new("org.clojure", "clojure", "1.10.1");
        let kaocha =
            DeclaredDependency::new("lambdaisland", "kaocha", "1.0.0").with_scope(DependencyScope::Test);
        let jar = install(&repo, &clojure);

        // kaocha is not installed, but the compile filter never asks for it
        let artifacts = repo
            .resolve(&[clojure, kaocha], &ScopeFilter::for_kind(ScopeKind::Compile))
            .unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].file(), jar);
    }

    #[test]
    fn test_relative_root_resolves_against_project() {
        let tmp = TempDir::new().unwrap();
        let project_root = tmp.path().join("app");
        let repo = LocalRepository::new("m2", &project_root);
        assert_eq!(repo.root(), project_root.join("m2"));

        let dep = DeclaredDependency::new("g", "a", "1");
        let jar = install(&repo, &dep);
        assert_eq!(jar, project_root.join("m2/g/a/1/a-1.jar"));

        let artifacts = repo
            .resolve(&[dep], &ScopeFilter::for_kind(ScopeKind::Compile))
            .unwrap();
        assert!(artifacts[0].file().is_absolute());
        assert_eq!(artifacts[0].file(), jar);
    }

    #[test]
    fn test_missing_artifact() {
        let tmp = TempDir::new().unwrap();
        let repo = LocalRepository::new(tmp.path(), tmp.path());
        let dep = DeclaredDependency::new("org.clojure", "clojure", "1.10.1");

        let err = repo
            .resolve(&[dep], &ScopeFilter::for_kind(ScopeKind::Compile))
            .unwrap_err();
        assert!(matches!(err, ResolveError::ArtifactNotFound { ref coordinate, .. }
            if coordinate == "org.clojure:clojure:1.10.1"));
    }

    #[test]
    fn test_path_dependency_relative_to_project() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("lib")).unwrap();
        std::fs::write(tmp.path().join("lib/local.jar"), b"PK").unwrap();
        let repo = LocalRepository::new(tmp.path().join("m2"), tmp.path());
        let dep = DeclaredDependency::new("acme", "local", "0.0.1").with_path("lib/local.jar");

        let artifacts = repo
            .resolve(std::slice::from_ref(&dep), &ScopeFilter::for_kind(ScopeKind::Compile))
            .unwrap();
        assert_eq!(artifacts[0].file(), tmp.path().join("lib/local.jar"));

        let missing = dep.with_path("lib/gone.jar");
        let err = repo
            .resolve(&[missing], &ScopeFilter::for_kind(ScopeKind::Compile))
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingPath { .. }));
    }
}
