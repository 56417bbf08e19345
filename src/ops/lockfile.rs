//! Lock file I/O operations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{LockFile, LOCK_FILE_FORMAT_VERSION};
use crate::resolver::encode::AssetsFile;

/// Lock file location relative to a project directory.
pub const LOCK_FILE_PATH: &str = "obj/project.assets.json";

/// Lock file name when it sits next to the caller.
pub const LOCK_FILE_NAME: &str = "project.assets.json";

/// Load a lock file from the given path.
pub fn load_lock_file(path: &Path) -> Result<LockFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read lock file: {}", path.display()))?;

    parse_lock_file(&content).with_context(|| format!("in {}", path.display()))
}

/// Parse lock file text, rejecting format versions this crate does not read.
pub fn parse_lock_file(content: &str) -> Result<LockFile> {
    let assets = AssetsFile::from_json(content)?;

    if !assets.is_compatible() {
        anyhow::bail!(
            "lock file version {} is not supported (expected version {})",
            assets.version,
            LOCK_FILE_FORMAT_VERSION
        );
    }

    let lock_file = assets.into_lock_file()?;
    tracing::debug!(
        "loaded lock file with {} libraries and {} targets",
        lock_file.libraries().len(),
        lock_file.targets().len()
    );
    Ok(lock_file)
}

/// Save a lock file as pretty-printed JSON.
pub fn save_lock_file(path: &Path, lock_file: &LockFile) -> Result<()> {
    let content = AssetsFile::from_lock_file(lock_file).to_json_pretty()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("failed to write lock file: {}", path.display()))?;

    Ok(())
}

/// Find the lock file for a project directory.
///
/// Looks for `obj/project.assets.json` first, then `project.assets.json`.
pub fn find_lock_file(dir: &Path) -> Option<PathBuf> {
    [dir.join(LOCK_FILE_PATH), dir.join(LOCK_FILE_NAME)]
        .into_iter()
        .find(|path| path.is_file())
}
