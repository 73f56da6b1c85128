//! `cljgoal run` command

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::Session;
use cljgoal::ops::goals::{run_goal, GoalOverrides};

pub fn execute(args: RunArgs) -> Result<()> {
    let session = Session::open()?;
    let resolver = session.resolver();

    let overrides = GoalOverrides {
        execution: args.execution,
        args: args.args,
        executable: args.executable,
        scope: args.scope,
    };

    run_goal(&session.project, &resolver, &session.defaults, &overrides)
}
