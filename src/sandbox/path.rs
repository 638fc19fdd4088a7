/*!
 * Confined Path Handles
 * Canonical paths proven to lie inside a sandbox root
 */

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A resolved path inside a sandbox root
///
/// Only the resolver constructs these, after the canonical form has been
/// checked against the root. The root itself is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfinedPath {
    root: PathBuf,
    canonical: PathBuf,
}

impl ConfinedPath {
    /// Wrap a path already checked against `root`
    pub(super) fn new_unchecked(root: PathBuf, canonical: PathBuf) -> Self {
        debug_assert!(canonical.starts_with(&root));
        Self { root, canonical }
    }

    /// The absolute host path; never show this to a caller
    pub fn as_path(&self) -> &Path {
        &self.canonical
    }

    /// Sandbox root this path is confined to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if this path is the sandbox root itself
    pub fn is_root(&self) -> bool {
        self.canonical == self.root
    }

    /// Path relative to the sandbox root (empty for the root)
    pub fn relative(&self) -> &Path {
        self.canonical
            .strip_prefix(&self.root)
            .unwrap_or_else(|_| Path::new(""))
    }

    /// Containing directory, `None` for the sandbox root
    pub fn parent(&self) -> Option<ConfinedPath> {
        if self.is_root() {
            return None;
        }
        let parent = self.canonical.parent()?;
        Some(Self::new_unchecked(self.root.clone(), parent.to_path_buf()))
    }

    /// Child with a name already validated as a single plain component
    pub(super) fn child_unchecked(&self, name: &str) -> ConfinedPath {
        Self::new_unchecked(self.root.clone(), self.canonical.join(name))
    }

    /// Final component name, `None` for the sandbox root
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.canonical.file_name().and_then(|n| n.to_str())
    }
}

/// Renders the sandbox-relative form, rooted at `/`
impl fmt::Display for ConfinedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for component in self.relative().components() {
            if let Component::Normal(name) = component {
                write!(f, "/{}", name.to_string_lossy())?;
                wrote = true;
            }
        }
        if !wrote {
            write!(f, "/")?;
        }
        Ok(())
    }
}
