//! High-level operations.
//!
//! Configuration mapping, execution selection, classpath assembly, manifest
//! generation and the goal drivers built on them.

pub mod classpath;
pub mod configure;
pub mod goals;
pub mod manifest;
pub mod select;

pub use classpath::{assemble, PathStyle};
pub use configure::{named_configurations, parse, ConfigError, NamedConfigurations};
pub use goals::{
    deps_edn_goal, run_goal, test_goal, GoalOverrides, TestOptions, TestOutcome, CLOJURE_GOAL,
};
pub use manifest::{build_manifest, render_manifest, write_manifest};
pub use select::{select, SelectionError};
