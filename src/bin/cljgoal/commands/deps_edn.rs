//! `cljgoal deps-edn` command

use anyhow::Result;

use crate::cli::DepsEdnArgs;
use crate::commands::Session;
use cljgoal::ops::goals::deps_edn_goal;

pub fn execute(args: DepsEdnArgs) -> Result<()> {
    let session = Session::open()?;
    let target = args
        .output
        .unwrap_or_else(|| session.project.root().to_path_buf());

    deps_edn_goal(&session.project, &session.defaults, &target)?;

    Ok(())
}
