//! Goal drivers.
//!
//! Each driver composes configuration mapping, selection, resolution and
//! classpath assembly for one goal, then either runs the Clojure CLI or writes
//! a manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::goal_state::GoalState;
use crate::core::project::{Project, TestSection};
use crate::core::scope::ScopeKind;
use crate::ops::classpath::{assemble, PathStyle};
use crate::ops::configure::{named_configurations, NamedConfigurations};
use crate::ops::manifest::{build_manifest, render_manifest, write_manifest};
use crate::ops::select::select;
use crate::resolver::{resolve_dependencies, ArtifactResolver};
use crate::util::config::Config;
use crate::util::process::{run_with_classpath, GoalInvocation, SubprocessFailure};

/// Goal that runs the Clojure CLI.
pub const CLOJURE_GOAL: &str = "clojure";

/// Default goal state for a configuration.
pub fn default_state(config: &Config) -> GoalState {
    match config.goal.executable {
        Some(ref executable) => GoalState::defaults_with_executable(executable.as_str()),
        None => GoalState::default(),
    }
}

/// Command-line adjustments to a selected `clojure` configuration.
#[derive(Debug, Clone, Default)]
pub struct GoalOverrides {
    /// Execution id to select
    pub execution: Option<String>,
    pub args: Option<String>,
    pub executable: Option<String>,
    pub scope: Option<ScopeKind>,
}

impl GoalOverrides {
    fn apply(&self, mut state: GoalState) -> GoalState {
        if let Some(ref args) = self.args {
            state = state.with_arguments(Some(args.clone()));
        }
        if let Some(ref executable) = self.executable {
            state = state.with_executable(executable.as_str());
        }
        if let Some(scope) = self.scope {
            state = state.with_scope(scope);
        }
        state
    }
}

/// Collect the named configurations of the `clojure` goal.
pub fn clojure_configurations(
    project: &Project,
    defaults: &GoalState,
) -> Result<NamedConfigurations> {
    named_configurations(project, CLOJURE_GOAL, defaults).with_context(|| {
        format!(
            "invalid `{}` goal configuration in {}",
            CLOJURE_GOAL,
            project.path().display()
        )
    })
}

/// Select a `clojure` configuration and apply overrides.
pub fn selected_state(
    project: &Project,
    defaults: &GoalState,
    overrides: &GoalOverrides,
) -> Result<GoalState> {
    let configs = clojure_configurations(project, defaults)?;
    let state = select(&configs, overrides.execution.as_deref(), defaults)?;
    Ok(overrides.apply(state))
}

/// Assemble the classpath for a state, resolving dependencies when a resolver
/// is given.
pub fn goal_classpath(
    project: &Project,
    state: &GoalState,
    resolver: Option<&dyn ArtifactResolver>,
    style: PathStyle,
) -> Result<Vec<String>> {
    let resolved = match resolver {
        Some(resolver) => Some(resolve_dependencies(
            resolver,
            state.scope(),
            project.dependencies(),
        )?),
        None => None,
    };
    Ok(assemble(state, resolved.as_ref(), style, project.layout()))
}

fn launch(project: &Project, state: &GoalState, classpath: &[String]) -> Result<(), SubprocessFailure> {
    run_with_classpath(&GoalInvocation {
        executable: state.executable(),
        arguments: state.arguments(),
        classpath,
        working_dir: project.root(),
    })
}

/// Run the `clojure` goal.
pub fn run_goal(
    project: &Project,
    resolver: &dyn ArtifactResolver,
    defaults: &GoalState,
    overrides: &GoalOverrides,
) -> Result<()> {
    let state = selected_state(project, defaults, overrides)?;
    let classpath = goal_classpath(project, &state, Some(resolver), PathStyle::Absolute)?;

    tracing::info!(
        "Running `{}` with the {} classpath ({} entries)",
        state.executable(),
        state.scope(),
        classpath.len()
    );
    launch(project, &state, &classpath)?;
    Ok(())
}

/// Settings of one `clojure.test` run.
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    /// `clojure` execution whose configuration the tests borrow
    pub execution: Option<String>,
    /// Arguments replacing the borrowed configuration's
    pub args: Option<String>,
    pub skip: bool,
    pub test_failure_ignore: bool,
}

impl TestOptions {
    /// Options as declared in the `[test]` section.
    pub fn from_settings(settings: &TestSection) -> Self {
        TestOptions {
            execution: settings.clojure_goal_execution_id.clone(),
            args: settings.args.clone(),
            skip: settings.skip,
            test_failure_ignore: settings.test_failure_ignore,
        }
    }
}

/// How a `clojure.test` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Skipped,
    Passed,
    /// The run failed and `test_failure_ignore` was set
    FailureIgnored,
}

/// Run the `clojure.test` goal.
///
/// The selected configuration always runs with the `TEST` classpath.
pub fn test_goal(
    project: &Project,
    resolver: &dyn ArtifactResolver,
    defaults: &GoalState,
    options: &TestOptions,
) -> Result<TestOutcome> {
    if options.skip {
        tracing::info!("Tests are skipped");
        return Ok(TestOutcome::Skipped);
    }

    let configs = clojure_configurations(project, defaults)?;
    let mut state = select(&configs, options.execution.as_deref(), defaults)?
        .with_scope(ScopeKind::Test);
    if let Some(ref args) = options.args {
        state = state.with_arguments(Some(args.clone()));
    }

    let classpath = goal_classpath(project, &state, Some(resolver), PathStyle::Absolute)?;
    tracing::info!("Running tests with `{}`", state.executable());

    match launch(project, &state, &classpath) {
        Ok(()) => Ok(TestOutcome::Passed),
        Err(failure) if options.test_failure_ignore && failure.exit_code.is_some() => {
            tracing::warn!("{}; ignoring test failures", failure);
            Ok(TestOutcome::FailureIgnored)
        }
        Err(failure) => Err(failure.into()),
    }
}

/// Run the `deps.edn` goal, returning the path written.
pub fn deps_edn_goal(project: &Project, defaults: &GoalState, target: &Path) -> Result<PathBuf> {
    let configs = clojure_configurations(project, defaults)?;
    let manifest = build_manifest(&configs, project.dependencies(), project.layout());

    let path = write_manifest(target, &render_manifest(&manifest))
        .with_context(|| format!("failed to write manifest to {}", target.display()))?;
    tracing::info!("Wrote {} ({} aliases)", path.display(), configs.len());
    Ok(path)
}
