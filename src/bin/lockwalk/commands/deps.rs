//! `lockwalk deps` command

use anyhow::Result;

use crate::cli::DepsArgs;
use lockwalk::ops::library_closure;
use lockwalk::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: DepsArgs) -> Result<()> {
    let lock_file = super::load(ctx, &args.lock)?;
    let target = super::target(ctx, &lock_file, &args.closure)?;

    super::warn_approximate(ctx, &lock_file, target);

    let options = super::closure_options(ctx, &args.closure);
    let libraries = library_closure(&lock_file, target, &args.library, options)?;

    tracing::debug!(
        "{} has {} transitive dependencies in {}",
        args.library,
        libraries.len(),
        target.name()
    );

    super::print_libraries(&libraries, super::output_format(ctx, &args.closure))
}
