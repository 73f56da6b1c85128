//! Execution selection.
//!
//! When one goal borrows another goal's configuration, exactly one of the
//! named configurations must be chosen.

use thiserror::Error;

use crate::core::goal_state::GoalState;
use crate::ops::configure::NamedConfigurations;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error choosing a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum SelectionError {
    #[error("no execution with id `{id}`")]
    #[diagnostic(code(cljgoal::select::not_found))]
    NotFound { id: String, available: Vec<String> },

    #[error("cannot choose between executions: {}", .candidates.join(", "))]
    #[diagnostic(code(cljgoal::select::ambiguous))]
    Ambiguous { candidates: Vec<String> },
}

impl SelectionError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SelectionError::NotFound { id, available } => {
                Diagnostic::error(self.to_string())
                    .with_candidates(available, "no executions are configured")
                    .with_suggestion(format!("Check the spelling of `{}`", id))
                    .with_suggestion(suggestions::LIST_EXECUTIONS)
            }
            SelectionError::Ambiguous { candidates } => Diagnostic::error(self.to_string())
                .with_context(format!("{} executions are configured", candidates.len()))
                .with_suggestion(format!(
                    "Name one explicitly, e.g. `--execution {}`",
                    candidates.first().map(String::as_str).unwrap_or_default()
                ))
                .with_suggestion("Or set `clojure-goal-execution-id` in the [test] section"),
        }
    }
}

/// Pick one configuration.
///
/// A requested id must exist. Without one, an empty map yields `defaults`, a
/// single entry is taken as is, and anything more is ambiguous.
pub fn select(
    configs: &NamedConfigurations,
    requested: Option<&str>,
    defaults: &GoalState,
) -> Result<GoalState, SelectionError> {
    if let Some(id) = requested {
        return configs
            .get(id)
            .cloned()
            .ok_or_else(|| SelectionError::NotFound {
                id: id.to_string(),
                available: configs.keys().cloned().collect(),
            });
    }

    let mut entries = configs.values();
    match (entries.next(), entries.next()) {
        (None, _) => Ok(defaults.clone()),
        (Some(only), None) => Ok(only.clone()),
        _ => Err(SelectionError::Ambiguous {
            candidates: configs.keys().cloned().collect(),
        }),
    }
}
