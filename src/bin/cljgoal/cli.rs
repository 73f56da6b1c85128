//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use cljgoal::core::scope::ScopeKind;

/// cljgoal - Run Clojure CLI goals from a declarative project descriptor
#[derive(Parser)]
#[command(name = "cljgoal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Clojure CLI with a `clojure` execution's classpath
    Run(RunArgs),

    /// Run the test suite through a `clojure` execution
    Test(TestArgs),

    /// Write a deps.edn with one alias per `clojure` execution
    #[command(name = "deps-edn")]
    DepsEdn(DepsEdnArgs),

    /// Print the classpath of a `clojure` execution
    Classpath(ClasspathArgs),

    /// List the configured `clojure` executions
    Executions(ExecutionsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn parse_scope(s: &str) -> Result<ScopeKind, String> {
    s.parse::<ScopeKind>()
        .map_err(|e| format!("{} (expected NONE, COMPILE or TEST)", e))
}

#[derive(Args)]
pub struct RunArgs {
    /// Execution id to run (required when several are configured)
    #[arg(short, long)]
    pub execution: Option<String>,

    /// Argument string, replacing the configured `args`
    #[arg(short, long, allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Executable to run instead of the configured one
    #[arg(long)]
    pub executable: Option<String>,

    /// Classpath scope (NONE, COMPILE or TEST)
    #[arg(long, value_parser = parse_scope)]
    pub scope: Option<ScopeKind>,
}

#[derive(Args)]
pub struct TestArgs {
    /// Execution id whose configuration the tests use
    #[arg(short, long)]
    pub execution: Option<String>,

    /// Argument string for the test run
    #[arg(short, long, allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Skip running the tests
    #[arg(long)]
    pub skip: bool,

    /// Succeed even when the tests fail
    #[arg(long)]
    pub test_failure_ignore: bool,
}

#[derive(Args)]
pub struct DepsEdnArgs {
    /// Output file or directory (defaults to the project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ClasspathArgs {
    /// Execution id to inspect
    #[arg(short, long)]
    pub execution: Option<String>,

    /// Classpath scope (NONE, COMPILE or TEST)
    #[arg(long, value_parser = parse_scope)]
    pub scope: Option<ScopeKind>,

    /// Print entries relative to the project root
    #[arg(long)]
    pub relative: bool,

    /// Leave out resolved dependencies
    #[arg(long)]
    pub no_deps: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ExecutionsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
