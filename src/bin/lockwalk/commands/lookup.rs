//! `lockwalk lookup` command

use anyhow::{Context, Result};

use crate::cli::LookupArgs;
use lockwalk::resolver::LibraryResolver;
use lockwalk::util::GlobalContext;
use lockwalk::VersionRange;

pub fn execute(ctx: &GlobalContext, args: LookupArgs) -> Result<()> {
    let lock_file = super::load(ctx, &args.lock)?;

    let range: VersionRange = args
        .range
        .parse()
        .with_context(|| format!("invalid version range `{}`", args.range))?;

    let (library, strategy) =
        LibraryResolver::new(&lock_file).resolve_with_strategy(&args.name, &range)?;

    println!("{} ({})", library, strategy);
    if ctx.is_verbose() {
        if let Some(path) = library.path() {
            println!("  path: {}", path);
        }
        if let Some(sha512) = library.sha512() {
            println!("  sha512: {}", sha512);
        }
    }

    Ok(())
}
