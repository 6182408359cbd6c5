//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Scoped change of the process working directory.
///
/// Entering records the current directory; dropping the guard changes back to
/// it, on every exit path of the enclosing scope. Guards nest LIFO.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct DirGuard {
    previous: PathBuf,
}

impl DirGuard {
    /// Record the current directory without changing it.
    pub fn push() -> Result<Self> {
        let previous = std::env::current_dir().context("failed to read current directory")?;
        Ok(DirGuard { previous })
    }

    /// Record the current directory, then change into `dir`.
    pub fn enter(dir: &Path) -> Result<Self> {
        let guard = DirGuard::push()?;
        change_dir(dir)?;
        Ok(guard)
    }

    /// The directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::warn!(
                "failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Change the process working directory.
pub fn change_dir(dir: &Path) -> Result<()> {
    std::env::set_current_dir(dir)
        .with_context(|| format!("failed to change directory to: {}", dir.display()))
}

/// Create a directory and its parents.
///
/// An existing directory is not an error. Any other failure is logged and
/// returned.
pub fn create_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        tracing::info!("Dir already exists: \"{}\"", dir.display());
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| {
        tracing::error!("Failed to create directory: \"{}\"", dir.display());
        anyhow::Error::new(e).context(format!("failed to create directory: {}", dir.display()))
    })
}

/// Create `dir` if needed and make it the working directory for the guard's
/// lifetime.
pub fn create_and_enter(dir: &Path) -> Result<DirGuard> {
    create_dir(dir)?;
    DirGuard::enter(dir)
}

/// Recursively copy a directory, merging into `dst` if it already exists.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Remove a directory tree, ignoring every failure (including absence).
pub fn remove_dir_best_effort(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir) {
        tracing::debug!("ignored failure removing {}: {}", dir.display(), e);
    }
}

/// A file located by [`files_by_extension`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// Bare file name.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// Move each file into `dest`, keeping its name.
///
/// The destination is created first. The first failure is logged and
/// returned; the remaining files are left where they are.
pub fn move_files(files: &[FileMatch], dest: &Path) -> Result<Vec<PathBuf>> {
    create_dir(dest)?;

    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        let target = dest.join(&file.name);
        if let Err(e) = move_file(&file.path, &target) {
            tracing::error!(
                "Failed to move file \"{}\" to \"{}\".",
                file.path.display(),
                target.display()
            );
            return Err(e);
        }
        moved.push(target);
    }
    Ok(moved)
}

/// Move a single file, falling back to copy + remove across devices.
fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    fs::copy(src, dst)
        .with_context(|| format!("failed to move {} to {}", src.display(), dst.display()))?;
    fs::remove_file(src)
        .with_context(|| format!("failed to remove {} after copy", src.display()))?;
    Ok(())
}

/// Copy a single file, creating the destination's parent directory.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir(parent)?;
        }
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Recursively find files whose name ends with `extension`.
///
/// CMake's intermediate `objects<extension>` archive is skipped. Results are
/// sorted by path.
pub fn files_by_extension(dir: &Path, extension: &str) -> Vec<FileMatch> {
    let excluded = format!("objects{}", extension);

    let mut matches: Vec<FileMatch> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if name.ends_with(extension) && name != excluded {
                Some(FileMatch {
                    name,
                    path: e.into_path(),
                })
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| a.path.cmp(&b.path));
    matches
}

/// Check whether a regular file exists at `path`.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}

/// Create a symlink, logging and swallowing any failure.
pub fn try_symlink(src: &Path, dst: &Path) -> bool {
    match symlink(src, dst) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "failed to create symlink {} -> {}: {}",
                dst.display(),
                src.display(),
                e
            );
            false
        }
    }
}
