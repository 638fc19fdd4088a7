/*!
 * Metadata Operations Implementation
 * FileSystem trait wiring for MemFS
 */

use std::path::{Path, PathBuf};

use super::super::traits::FileSystem;
use super::super::types::*;
use super::{MemFS, Walk};

impl MemFS {
    fn metadata_at(&self, path: &Path) -> VfsResult<Metadata> {
        self.nodes
            .get(path)
            .map(|n| n.value().metadata())
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))
    }
}

impl FileSystem for MemFS {
    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        self.list_dir_impl(path)
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        self.create_dir_impl(path)
    }

    fn remove_dir_all(&self, path: &Path) -> VfsResult<()> {
        self.remove_dir_all_impl(path)
    }

    fn create(&self, path: &Path) -> VfsResult<()> {
        self.create_impl(path)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        self.delete_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> VfsResult<()> {
        self.rename_impl(from, to)
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        let path = self.walk(path, Walk::Resolve)?;
        self.metadata_at(&path)
    }

    fn symlink_metadata(&self, path: &Path) -> VfsResult<Metadata> {
        let path = self.locate(path, false)?;
        self.metadata_at(&path)
    }

    fn canonicalize(&self, path: &Path) -> VfsResult<PathBuf> {
        self.canonicalize_impl(path)
    }

    fn symlink(&self, target: &Path, link: &Path) -> VfsResult<()> {
        self.symlink_impl(target, link)
    }

    fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        self.read_impl(path)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
