//! Implementation of `cmbuild clean`.

use std::path::Path;

use crate::util::fs::remove_dir_best_effort;

/// Remove a build directory. Returns whether anything was there to remove.
///
/// Never fails; a directory that cannot be removed is logged and left behind.
pub fn clean(build_dir: &Path) -> bool {
    let existed = build_dir.exists();
    remove_dir_best_effort(build_dir);

    if existed && build_dir.exists() {
        tracing::warn!("could not fully remove {}", build_dir.display());
    }
    existed
}
