//! Dependency resolution.
//!
//! Resolution is scope-filtered and flat: the collaborator behind
//! [`ArtifactResolver`] maps each included declared dependency to a file, and
//! [`resolve_dependencies`] deduplicates the result by file path.

pub mod errors;
pub mod local;

pub use errors::{ResolutionFailure, ResolveError};
pub use local::LocalRepository;

use crate::core::dependency::{DeclaredDependency, ResolvedArtifact, ResolvedArtifacts};
use crate::core::scope::{ScopeFilter, ScopeKind};

/// Something that can turn declared dependencies into artifact files.
pub trait ArtifactResolver {
    /// Resolve every dependency whose scope passes `filter`.
    ///
    /// Dependencies the filter rejects must not appear in the result.
    fn resolve(
        &self,
        dependencies: &[DeclaredDependency],
        filter: &ScopeFilter,
    ) -> Result<Vec<ResolvedArtifact>, ResolveError>;
}

/// Resolve the dependencies a classpath scope includes.
///
/// `NONE` yields an empty set without consulting the resolver. The first
/// occurrence of each file wins.
pub fn resolve_dependencies(
    resolver: &dyn ArtifactResolver,
    scope: ScopeKind,
    dependencies: &[DeclaredDependency],
) -> Result<ResolvedArtifacts, ResolutionFailure> {
    let filter = ScopeFilter::for_kind(scope);
    if filter.is_empty() {
        tracing::debug!("Scope {} includes no dependencies", scope);
        return Ok(ResolvedArtifacts::new());
    }

    let artifacts = resolver
        .resolve(dependencies, &filter)
        .map_err(|cause| ResolutionFailure { scope, cause })?;

    let mut resolved = ResolvedArtifacts::new();
    for artifact in artifacts {
        let file = artifact.file().display().to_string();
        if resolved.insert(artifact) {
            tracing::debug!("Resolved {}", file);
        }
    }
    Ok(resolved)
}
