/*!
 * VFS Traits
 * Filesystem capability the sandbox operates through
 */

use std::path::{Path, PathBuf};

use super::types::*;

/// Virtual filesystem trait
///
/// Paths handed to a backend are absolute. Backends do no confinement of
/// their own; callers resolve paths through the sandbox resolver first.
/// Each method is a single step against the backend and is not atomic
/// with respect to other calls.
pub trait FileSystem: Send + Sync {
    /// List directory contents
    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>>;

    /// Create directory including missing ancestors; succeeds if it already exists
    fn create_dir(&self, path: &Path) -> VfsResult<()>;

    /// Remove directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> VfsResult<()>;

    /// Create an empty file if absent; an existing file is left untouched
    fn create(&self, path: &Path) -> VfsResult<()>;

    /// Delete a regular file
    fn delete(&self, path: &Path) -> VfsResult<()>;

    /// Rename an entry
    fn rename(&self, from: &Path, to: &Path) -> VfsResult<()>;

    /// Get metadata, following symbolic links
    fn metadata(&self, path: &Path) -> VfsResult<Metadata>;

    /// Get metadata of the entry itself, without following a final link
    fn symlink_metadata(&self, path: &Path) -> VfsResult<Metadata>;

    /// Check if file/directory exists (following links)
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Resolve an existing path to its canonical absolute form, following
    /// every symbolic link and `..` component
    fn canonicalize(&self, path: &Path) -> VfsResult<PathBuf>;

    /// Create symbolic link at `link` pointing to `target`
    fn symlink(&self, target: &Path, link: &Path) -> VfsResult<()>;

    /// Read entire file contents
    fn read(&self, path: &Path) -> VfsResult<Vec<u8>>;

    /// Get filesystem name/type
    fn name(&self) -> &str;
}
