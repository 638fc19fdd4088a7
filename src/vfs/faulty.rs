/*!
 * Failure Injection
 * MemFS wrapper whose metadata lookups and renames fail on demand
 */

use std::path::{Path, PathBuf};

use super::{Entry, FileSystem, MemFS, Metadata, VfsError, VfsResult};

/// MemFS that denies metadata on chosen paths and can fail every rename
pub(crate) struct FaultyFS {
    inner: MemFS,
    denied: Vec<PathBuf>,
    rename_error: Option<VfsError>,
}

impl FaultyFS {
    pub(crate) fn new(inner: MemFS) -> Self {
        Self {
            inner,
            denied: Vec::new(),
            rename_error: None,
        }
    }

    /// `metadata` and `symlink_metadata` on `path` return `PermissionDenied`
    pub(crate) fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.push(path.into());
        self
    }

    pub(crate) fn fail_renames(mut self, err: VfsError) -> Self {
        self.rename_error = Some(err);
        self
    }

    fn check(&self, path: &Path) -> VfsResult<()> {
        if self.denied.iter().any(|d| d == path) {
            return Err(VfsError::PermissionDenied(path.display().to_string()));
        }
        Ok(())
    }
}

impl FileSystem for FaultyFS {
    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        self.inner.list_dir(path)
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        self.inner.create_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> VfsResult<()> {
        self.inner.remove_dir_all(path)
    }

    fn create(&self, path: &Path) -> VfsResult<()> {
        self.inner.create(path)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        self.inner.delete(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> VfsResult<()> {
        match &self.rename_error {
            Some(err) => Err(err.clone()),
            None => self.inner.rename(from, to),
        }
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        self.check(path)?;
        self.inner.metadata(path)
    }

    fn symlink_metadata(&self, path: &Path) -> VfsResult<Metadata> {
        self.check(path)?;
        self.inner.symlink_metadata(path)
    }

    fn canonicalize(&self, path: &Path) -> VfsResult<PathBuf> {
        self.inner.canonicalize(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> VfsResult<()> {
        self.inner.symlink(target, link)
    }

    fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn name(&self) -> &str {
        "faulty"
    }
}
