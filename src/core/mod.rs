//! Core data structures for cljgoal.
//!
//! This module contains the foundational value types:
//! - Classpath and dependency scopes
//! - Goal configuration state and configuration trees
//! - Declared and resolved dependencies
//! - The project descriptor

pub mod config_node;
pub mod dependency;
pub mod goal_state;
pub mod project;
pub mod scope;

pub use config_node::ConfigNode;
pub use dependency::{DeclaredDependency, ResolvedArtifact, ResolvedArtifacts};
pub use goal_state::GoalState;
pub use project::{find_project, BuildLayout, Execution, Project, ProjectError, PROJECT_FILE_NAME};
pub use scope::{effective_scopes, DependencyScope, ScopeFilter, ScopeKind};
