//! Classpath assembly.

use std::path::Path;

use serde::Serialize;

use crate::core::dependency::ResolvedArtifacts;
use crate::core::goal_state::GoalState;
use crate::core::project::BuildLayout;
use crate::util::fs::{absolutize, relative_path};

/// How classpath entries are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Entries exactly as configured or resolved.
    #[default]
    Absolute,
    /// Entries relative to the project root.
    Relative,
}

/// Assemble the ordered classpath for a goal state.
///
/// Order: source paths, compiled output, then for `TEST` the test paths and
/// compiled test output, then resolved artifacts. Entries are never
/// deduplicated.
pub fn assemble(
    state: &GoalState,
    resolved: Option<&ResolvedArtifacts>,
    style: PathStyle,
    layout: &BuildLayout,
) -> Vec<String> {
    let mut entries: Vec<String> = state.source_paths().to_vec();
    entries.push(layout.output_directory().to_string());

    if state.scope().includes_tests() {
        entries.extend(state.test_paths().iter().cloned());
        entries.push(layout.test_output_directory().to_string());
    }

    if let Some(resolved) = resolved {
        entries.extend(resolved.files().map(|f| f.display().to_string()));
    }

    match style {
        PathStyle::Absolute => entries,
        PathStyle::Relative => entries
            .into_iter()
            .map(|entry| {
                let absolute = absolutize(layout.root(), Path::new(&entry));
                relative_path(layout.root(), &absolute).display().to_string()
            })
            .collect(),
    }
}
