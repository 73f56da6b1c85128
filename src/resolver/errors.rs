//! Resolution error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::scope::ScopeKind;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error reported by an artifact resolver.
#[derive(Debug, Clone, Error, miette::Diagnostic)]
pub enum ResolveError {
    #[error("artifact not found: `{coordinate}`")]
    #[diagnostic(code(cljgoal::resolve::not_found))]
    ArtifactNotFound { coordinate: String, searched: PathBuf },

    #[error("path dependency `{coordinate}` does not exist: {}", .path.display())]
    #[diagnostic(code(cljgoal::resolve::missing_path))]
    MissingPath { coordinate: String, path: PathBuf },

    #[error("source error for `{source_name}`: {message}")]
    #[diagnostic(code(cljgoal::resolve::source))]
    SourceError { source_name: String, message: String },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::ArtifactNotFound {
                coordinate,
                searched,
            } => Diagnostic::error(format!("artifact not found: `{}`", coordinate))
                .with_context(format!("looked for {}", searched.display()))
                .with_suggestion(suggestions::CHECK_REPOSITORY),

            ResolveError::MissingPath { coordinate, path } => {
                Diagnostic::error(format!("path dependency `{}` does not exist", coordinate))
                    .with_location(path)
                    .with_suggestion(format!(
                        "Fix the `path` of `{}` in Cljgoal.toml",
                        coordinate
                    ))
            }

            ResolveError::SourceError {
                source_name,
                message,
            } => Diagnostic::error(format!("failed to resolve `{}`", source_name))
                .with_context(message.clone()),
        }
    }
}

/// Dependency resolution failed for a scope.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("could not resolve {scope} dependencies")]
#[diagnostic(code(cljgoal::resolve::failed))]
pub struct ResolutionFailure {
    pub scope: ScopeKind,
    #[source]
    pub cause: ResolveError,
}

impl ResolutionFailure {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let inner = self.cause.to_diagnostic();
        let mut diag = Diagnostic::error(self.to_string()).with_context(inner.message);
        if let Some(location) = inner.location {
            diag = diag.with_location(location);
        }
        for ctx in inner.context {
            diag = diag.with_context(ctx);
        }
        for suggestion in inner.suggestions {
            diag = diag.with_suggestion(suggestion);
        }
        diag
    }
}
