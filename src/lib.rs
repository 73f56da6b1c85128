//! cljgoal - Clojure CLI goals driven by a declarative project descriptor
//!
//! This crate provides the core library functionality for cljgoal: goal
//! configuration mapping, scoped dependency resolution, classpath assembly,
//! execution selection and `deps.edn` generation.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for cljgoal unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    config_node::ConfigNode, dependency::DeclaredDependency, goal_state::GoalState,
    project::Project, scope::ScopeKind,
};

pub use resolver::{ArtifactResolver, LocalRepository};
pub use util::context::GlobalContext;
