//! cljgoal CLI - Clojure CLI goals for a declarative project

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use cljgoal::core::project::ProjectError;
use cljgoal::ops::{ConfigError, SelectionError};
use cljgoal::resolver::{ResolutionFailure, ResolveError};
use cljgoal::util::diagnostic::{emit, Diagnostic};
use cljgoal::util::process::SubprocessFailure;

/// Exit code for failures of cljgoal itself, kept apart from child exit codes.
const INTERNAL_ERROR_EXIT_CODE: i32 = 70;

/// Exit code when the goal process could not report one.
const SUBPROCESS_ERROR_EXIT_CODE: i32 = 1;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cljgoal=debug")
    } else {
        EnvFilter::new("cljgoal=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Test(args) => commands::test::execute(args),
        Commands::DepsEdn(args) => commands::deps_edn::execute(args),
        Commands::Classpath(args) => commands::classpath::execute(args),
        Commands::Executions(args) => commands::executions::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Find the first error in the chain that knows how to describe itself.
fn diagnostic(e: &anyhow::Error) -> Option<Diagnostic> {
    e.chain().find_map(|cause| {
        if let Some(err) = cause.downcast_ref::<ProjectError>() {
            Some(err.to_diagnostic())
        } else if let Some(err) = cause.downcast_ref::<ConfigError>() {
            Some(err.to_diagnostic())
        } else if let Some(err) = cause.downcast_ref::<SelectionError>() {
            Some(err.to_diagnostic())
        } else if let Some(err) = cause.downcast_ref::<ResolutionFailure>() {
            Some(err.to_diagnostic())
        } else if let Some(err) = cause.downcast_ref::<ResolveError>() {
            Some(err.to_diagnostic())
        } else {
            cause
                .downcast_ref::<SubprocessFailure>()
                .map(SubprocessFailure::to_diagnostic)
        }
    })
}

fn report(e: &anyhow::Error, color: bool) {
    match diagnostic(e) {
        Some(mut diag) => {
            let outer = e.to_string();
            if outer != diag.message {
                diag = diag.with_context(outer);
            }
            emit(&diag, color);
        }
        None => eprintln!("error: {:#}", e),
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<SubprocessFailure>())
        .map(|failure| failure.exit_code.unwrap_or(SUBPROCESS_ERROR_EXIT_CODE))
        .unwrap_or(INTERNAL_ERROR_EXIT_CODE)
}
