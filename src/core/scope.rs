//! Classpath scopes and the dependency scopes they include.
//!
//! A [`ScopeKind`] is what a goal asks for ("give me the test classpath"); a
//! [`DependencyScope`] is what a declared dependency is tagged with. The table in
//! [`effective_scopes`] connects the two and is the only place that decides which
//! dependencies reach a classpath.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The classpath a goal runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScopeKind {
    /// No dependencies at all.
    None,
    /// Compile- and runtime-scoped dependencies.
    #[default]
    Compile,
    /// Everything in `Compile` plus test-scoped dependencies, test paths and test output.
    Test,
}

impl ScopeKind {
    /// All scope kinds, narrowest first.
    pub const ALL: [ScopeKind; 3] = [ScopeKind::None, ScopeKind::Compile, ScopeKind::Test];

    /// Get the canonical label, as written in goal configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::None => "NONE",
            ScopeKind::Compile => "COMPILE",
            ScopeKind::Test => "TEST",
        }
    }

    /// Get the dependency scopes this kind includes.
    pub fn effective_scopes(&self) -> &'static [DependencyScope] {
        effective_scopes(*self)
    }

    /// Check if this kind puts test material on the classpath.
    pub fn includes_tests(&self) -> bool {
        matches!(self, ScopeKind::Test)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a scope label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scope `{0}`")]
pub struct UnknownScope(pub String);

impl FromStr for ScopeKind {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(ScopeKind::None),
            "COMPILE" => Ok(ScopeKind::Compile),
            "TEST" => Ok(ScopeKind::Test),
            _ => Err(UnknownScope(s.to_string())),
        }
    }
}

/// Scope label carried by a declared dependency.
///
/// Descriptor labels go through [`FromStr`], so they are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DependencyScope {
    #[default]
    #[serde(rename = "compile")]
    Compile,
    #[serde(rename = "compile+runtime")]
    CompilePlusRuntime,
    #[serde(rename = "provided")]
    Provided,
    #[serde(rename = "runtime")]
    Runtime,
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "system")]
    System,
    #[serde(rename = "import")]
    Import,
}

impl DependencyScope {
    /// Get the label as written in the project descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::Compile => "compile",
            DependencyScope::CompilePlusRuntime => "compile+runtime",
            DependencyScope::Provided => "provided",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Test => "test",
            DependencyScope::System => "system",
            DependencyScope::Import => "import",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compile" => Ok(DependencyScope::Compile),
            "compile+runtime" => Ok(DependencyScope::CompilePlusRuntime),
            "provided" => Ok(DependencyScope::Provided),
            "runtime" => Ok(DependencyScope::Runtime),
            "test" => Ok(DependencyScope::Test),
            "system" => Ok(DependencyScope::System),
            "import" => Ok(DependencyScope::Import),
            _ => Err(UnknownScope(s.to_string())),
        }
    }
}

impl TryFrom<String> for DependencyScope {
    type Error = UnknownScope;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

const NONE_SCOPES: &[DependencyScope] = &[];

const COMPILE_SCOPES: &[DependencyScope] = &[
    DependencyScope::Compile,
    DependencyScope::CompilePlusRuntime,
    DependencyScope::Provided,
    DependencyScope::Runtime,
];

const TEST_SCOPES: &[DependencyScope] = &[
    DependencyScope::Compile,
    DependencyScope::CompilePlusRuntime,
    DependencyScope::Provided,
    DependencyScope::Runtime,
    DependencyScope::Test,
];

/// Get the dependency scopes included by a classpath scope.
pub fn effective_scopes(kind: ScopeKind) -> &'static [DependencyScope] {
    match kind {
        ScopeKind::None => NONE_SCOPES,
        ScopeKind::Compile => COMPILE_SCOPES,
        ScopeKind::Test => TEST_SCOPES,
    }
}

/// Inclusion filter handed to artifact resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeFilter {
    kind: ScopeKind,
}

impl ScopeFilter {
    /// Create the filter for a classpath scope.
    pub fn for_kind(kind: ScopeKind) -> Self {
        ScopeFilter { kind }
    }

    /// The classpath scope this filter was built for.
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Check if a dependency scope passes the filter.
    pub fn includes(&self, scope: DependencyScope) -> bool {
        effective_scopes(self.kind).contains(&scope)
    }

    /// Check if nothing can pass the filter.
    pub fn is_empty(&self) -> bool {
        effective_scopes(self.kind).is_empty()
    }
}
