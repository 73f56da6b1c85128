//! `cljgoal classpath` command

use anyhow::Result;
use serde::Serialize;

use crate::cli::ClasspathArgs;
use crate::commands::Session;
use cljgoal::core::scope::ScopeKind;
use cljgoal::ops::classpath::PathStyle;
use cljgoal::ops::goals::{goal_classpath, selected_state, GoalOverrides};
use cljgoal::resolver::ArtifactResolver;

#[derive(Serialize)]
struct ClasspathReport<'a> {
    scope: ScopeKind,
    style: PathStyle,
    entries: &'a [String],
}

pub fn execute(args: ClasspathArgs) -> Result<()> {
    let session = Session::open()?;

    let overrides = GoalOverrides {
        execution: args.execution,
        scope: args.scope,
        ..GoalOverrides::default()
    };
    let state = selected_state(&session.project, &session.defaults, &overrides)?;

    let style = if args.relative {
        PathStyle::Relative
    } else {
        PathStyle::Absolute
    };

    let resolver = session.resolver();
    let resolver: Option<&dyn ArtifactResolver> = if args.no_deps {
        None
    } else {
        Some(&resolver)
    };

    let entries = goal_classpath(&session.project, &state, resolver, style)?;

    if args.json {
        let report = ClasspathReport {
            scope: state.scope(),
            style,
            entries: &entries,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &entries {
            println!("{}", entry);
        }
    }

    Ok(())
}
