//! Command implementations

pub mod completions;
pub mod deps;
pub mod lookup;
pub mod project;
pub mod targets;

use anyhow::{Context, Result};

use crate::cli::{ClosureArgs, LockFileArgs};
use lockwalk::core::{Library, LockFile, Target};
use lockwalk::ops::{approximate_matches, load_lock_file, select_target, ClosureOptions};
use lockwalk::util::diagnostic::{DiagnosticSink, StderrSink};
use lockwalk::util::{GlobalContext, OutputFormat};

/// Read the lock file named on the command line, or the default one.
pub fn load(ctx: &GlobalContext, args: &LockFileArgs) -> Result<LockFile> {
    let path = ctx.lock_file_path(args.lock_file.as_deref())?;
    tracing::debug!("reading {}", path.display());
    load_lock_file(&path)
}

/// Pick the target: the flag, then config, then the only one.
pub fn target<'a>(
    ctx: &GlobalContext,
    lock_file: &'a LockFile,
    args: &ClosureArgs,
) -> Result<&'a Target> {
    let name = args
        .target
        .as_deref()
        .or(ctx.config().resolve.target.as_deref());

    Ok(select_target(lock_file, name)?)
}

pub fn closure_options(ctx: &GlobalContext, args: &ClosureArgs) -> ClosureOptions {
    ClosureOptions {
        dedupe: args.dedupe || ctx.config().resolve.dedupe.unwrap_or(false),
    }
}

pub fn output_format(ctx: &GlobalContext, args: &ClosureArgs) -> OutputFormat {
    args.format.unwrap_or_else(|| ctx.config().output_format())
}

/// Warn about dependencies whose requested version is not in the lock file.
pub fn warn_approximate(ctx: &GlobalContext, lock_file: &LockFile, target: &Target) {
    let sink = StderrSink { color: ctx.color() };
    for found in approximate_matches(lock_file, target) {
        sink.emit(&found.to_diagnostic());
    }
}

pub fn print_libraries(libraries: &[&Library], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for library in libraries {
                println!("{}", library);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(libraries)
                .context("failed to serialize libraries")?;
            println!("{}", json);
        }
    }
    Ok(())
}
