//! `lockwalk project` command

use anyhow::Result;

use crate::cli::ProjectArgs;
use lockwalk::ops::project_closure;
use lockwalk::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: ProjectArgs) -> Result<()> {
    let lock_file = super::load(ctx, &args.lock)?;
    let target = super::target(ctx, &lock_file, &args.closure)?;

    super::warn_approximate(ctx, &lock_file, target);

    let options = super::closure_options(ctx, &args.closure);
    let libraries = project_closure(&lock_file, target, options)?;

    super::print_libraries(&libraries, super::output_format(ctx, &args.closure))
}
