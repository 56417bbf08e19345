//! lockwalk CLI - walk NuGet-style lock files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lockwalk::ops::ClosureError;
use lockwalk::util::diagnostic::{DiagnosticSink, StderrSink};
use lockwalk::util::GlobalContext;
use lockwalk::ResolveError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("lockwalk=debug")
    } else {
        EnvFilter::new("lockwalk=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Deps(args) => commands::deps::execute(&ctx, args),
        Commands::Project(args) => commands::project::execute(&ctx, args),
        Commands::Lookup(args) => commands::lookup::execute(&ctx, args),
        Commands::Targets(args) => commands::targets::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print typed resolution errors as diagnostics, anything else as a chain.
fn report(e: &anyhow::Error, color: bool) {
    let sink = StderrSink { color };

    if let Some(err) = e.downcast_ref::<ClosureError>() {
        sink.emit(&err.to_diagnostic());
    } else if let Some(err) = e.downcast_ref::<ResolveError>() {
        sink.emit(&err.to_diagnostic());
    } else {
        eprintln!("error: {:#}", e);
    }
}
