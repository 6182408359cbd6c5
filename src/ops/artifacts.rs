//! Moving built libraries out of the build tree.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::{files_by_extension, move_files};

/// Move every file under `build_dir` ending in `extension` into `dest`.
///
/// Files already directly inside `dest` are left alone, so `dest` may live
/// inside the build tree.
pub fn collect_artifacts(build_dir: &Path, extension: &str, dest: &Path) -> Result<Vec<PathBuf>> {
    let files: Vec<_> = files_by_extension(build_dir, extension)
        .into_iter()
        .filter(|f| f.path.parent() != Some(dest))
        .collect();

    if files.is_empty() {
        tracing::info!(
            "no `*{}` artifacts found under {}",
            extension,
            build_dir.display()
        );
    }

    move_files(&files, dest)
}
