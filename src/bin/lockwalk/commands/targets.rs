//! `lockwalk targets` command

use anyhow::Result;

use crate::cli::TargetsArgs;
use lockwalk::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: TargetsArgs) -> Result<()> {
    let lock_file = super::load(ctx, &args.lock)?;

    if lock_file.targets().is_empty() {
        println!("No targets");
        return Ok(());
    }

    for target in lock_file.targets() {
        println!("{} ({} libraries)", target.name(), target.libraries().len());
    }

    Ok(())
}
