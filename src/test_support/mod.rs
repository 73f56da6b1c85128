//! Test utilities and mocks for cljgoal unit tests.
//!
//! This module provides a mock artifact resolver that records how it was
//! called, plus descriptor fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use cljgoal::test_support::{MockResolver, SAMPLE_PROJECT};
//!
//! #[test]
//! fn test_example() {
//!     let resolver = MockResolver::new();
//!     let resolved = resolve_dependencies(&resolver, ScopeKind::Test, &deps).unwrap();
//!     assert_eq!(resolver.calls(), [ScopeKind::Test]);
//! }
//! ```

pub mod fixtures;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::core::dependency::{DeclaredDependency, ResolvedArtifact};
use crate::core::scope::{ScopeFilter, ScopeKind};
use crate::resolver::{ArtifactResolver, ResolveError};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock artifact resolver.
///
/// Every dependency that passes the filter resolves to
/// `/m2/<group>/<artifact>-<version>.jar` unless an error was configured.
/// Calls are recorded by scope kind.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    error: Option<ResolveError>,
    calls: Arc<Mutex<Vec<ScopeKind>>>,
}

impl MockResolver {
    /// Create a resolver that always succeeds.
    pub fn new() -> Self {
        MockResolver::default()
    }

    /// Create a resolver that always fails with `error`.
    pub fn failing(error: ResolveError) -> Self {
        MockResolver {
            error: Some(error),
            ..MockResolver::default()
        }
    }

    /// Get the scope kinds the resolver was called with, in order.
    pub fn calls(&self) -> Vec<ScopeKind> {
        self.calls.lock().unwrap().clone()
    }

    /// The file a dependency resolves to.
    pub fn file_for(dep: &DeclaredDependency) -> PathBuf {
        PathBuf::from(format!(
            "/m2/{}/{}-{}.jar",
            dep.group, dep.artifact, dep.version
        ))
    }
}

impl ArtifactResolver for MockResolver {
    fn resolve(
        &self,
        dependencies: &[DeclaredDependency],
        filter: &ScopeFilter,
    ) -> Result<Vec<ResolvedArtifact>, ResolveError> {
        self.calls.lock().unwrap().push(filter.kind());

        if let Some(ref error) = self.error {
            return Err(error.clone());
        }

        Ok(dependencies
            .iter()
            .filter(|dep| filter.includes(dep.scope))
            .map(|dep| ResolvedArtifact::for_dependency(dep, Self::file_for(dep)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scope::DependencyScope;

    #[test]
    fn test_mock_resolver_filters_and_records() {
        let resolver = MockResolver::new();
        let deps = [
            DeclaredDependency::new("g", "a", "1"),
            DeclaredDependency::new("g", "t", "1").with_scope(DependencyScope::Test),
        ];

        let artifacts = resolver
            .resolve(&deps, &ScopeFilter::for_kind(ScopeKind::Compile))
            .unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].file(), PathBuf::from("/m2/g/a-1.jar"));
        assert_eq!(resolver.calls(), [ScopeKind::Compile]);
    }
}
