//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use lockwalk::util::OutputFormat;

/// lockwalk - walk NuGet-style lock files to list transitive packages
#[derive(Parser)]
#[command(name = "lockwalk")]
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
    /// List everything a library transitively depends on
    Deps(DepsArgs),

    /// List every package the project needs for a target
    Project(ProjectArgs),

    /// Look up a single library by name and version range
    Lookup(LookupArgs),

    /// List the targets in the lock file
    Targets(TargetsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct LockFileArgs {
    /// Path to the lock file (defaults to obj/project.assets.json)
    #[arg(short, long, env = "LOCKWALK_LOCK_FILE")]
    pub lock_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ClosureArgs {
    /// Target to walk (defaults to config, or the only target)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Print each library once
    #[arg(long)]
    pub dedupe: bool,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Library to start from (exact name as listed in the target)
    pub library: String,

    #[command(flatten)]
    pub lock: LockFileArgs,

    #[command(flatten)]
    pub closure: ClosureArgs,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub lock: LockFileArgs,

    #[command(flatten)]
    pub closure: ClosureArgs,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Library name
    pub name: String,

    /// Version range, e.g. `1.9.0` or `[1.0, 2.0)`
    pub range: String,

    #[command(flatten)]
    pub lock: LockFileArgs,
}

#[derive(Args)]
pub struct TargetsArgs {
    #[command(flatten)]
    pub lock: LockFileArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
