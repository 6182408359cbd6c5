//! String-backed path value object.

use std::fmt;
use std::path::{Path, PathBuf};

/// A base path that can be joined and walked upward, producing new values.
///
/// Equality and rendering reduce to the underlying path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathBuilder {
    base_path: String,
}

impl PathBuilder {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        PathBuilder {
            base_path: base_path.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// Append a relative segment.
    pub fn join(&self, rel_path: impl AsRef<Path>) -> PathBuilder {
        PathBuilder::new(Path::new(&self.base_path).join(rel_path))
    }

    /// The directory containing this path, or an empty path at the root.
    pub fn parent(&self) -> PathBuilder {
        let parent = Path::new(&self.base_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        PathBuilder::new(parent)
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.base_path)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.base_path)
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_path)
    }
}

impl AsRef<Path> for PathBuilder {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl From<&str> for PathBuilder {
    fn from(s: &str) -> Self {
        PathBuilder::new(s)
    }
}

impl From<PathBuf> for PathBuilder {
    fn from(p: PathBuf) -> Self {
        PathBuilder::new(p)
    }
}
