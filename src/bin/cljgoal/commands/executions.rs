//! `cljgoal executions` command

use anyhow::Result;

use crate::cli::ExecutionsArgs;
use crate::commands::Session;
use cljgoal::ops::goals::clojure_configurations;

pub fn execute(args: ExecutionsArgs) -> Result<()> {
    let session = Session::open()?;
    let configs = clojure_configurations(&session.project, &session.defaults)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&configs)?);
        return Ok(());
    }

    if configs.is_empty() {
        eprintln!("No `clojure` executions are configured");
        return Ok(());
    }

    for (id, state) in &configs {
        let line = format!(
            "{:<16} {:<8} {:<12} {}",
            id,
            state.scope(),
            state.executable(),
            state.arguments().unwrap_or("")
        );
        println!("{}", line.trim_end());
    }

    Ok(())
}
