/*!
 * Directory Operations Implementation
 * FileSystem trait methods for directory management
 */

use std::path::{Path, PathBuf};

use super::super::types::*;
use super::node::{Node, Peek};
use super::{MemFS, Walk};

impl MemFS {
    pub(super) fn list_dir_impl(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        let dir = self.walk(path, Walk::Resolve)?;

        let children = match self.nodes.get(&dir).map(|n| n.value().clone()) {
            Some(Node::Directory { children, .. }) => children,
            Some(_) => return Err(VfsError::NotADirectory(dir.display().to_string())),
            None => return Err(VfsError::NotFound(dir.display().to_string())),
        };

        // Child type is reported without following links, as readdir does
        Ok(children
            .into_iter()
            .filter_map(|name| {
                let file_type = self.nodes.get(&dir.join(&name))?.file_type();
                Some(Entry::new(name, file_type))
            })
            .collect())
    }

    pub(super) fn create_dir_impl(&self, path: &Path) -> VfsResult<()> {
        let created = self.walk(path, Walk::CreateDirs)?;
        if self.peek(&created) == Some(Peek::Directory) {
            Ok(())
        } else {
            Err(VfsError::AlreadyExists(created.display().to_string()))
        }
    }

    pub(super) fn remove_dir_all_impl(&self, path: &Path) -> VfsResult<()> {
        let path = self.locate(path, false)?;
        if path == Path::new("/") {
            return Err(VfsError::InvalidPath(
                "cannot remove filesystem root".to_string(),
            ));
        }

        match self.peek(&path) {
            // The link itself goes, never what it points at
            Some(Peek::Symlink(_)) => {}
            Some(Peek::Directory) => {}
            Some(Peek::File) => return Err(VfsError::NotADirectory(path.display().to_string())),
            None => return Err(VfsError::NotFound(path.display().to_string())),
        }

        for doomed in self.subtree_keys(&path) {
            self.nodes.remove(&doomed);
        }

        let (parent, name) = Self::split(&path)?;
        self.remove_child(&parent, &name)
    }

    /// Every key at or below `root`, parents before children
    pub(super) fn subtree_keys(&self, root: &Path) -> Vec<PathBuf> {
        let mut keys: Vec<PathBuf> = self
            .nodes
            .iter()
            .filter(|entry| entry.key().starts_with(root))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort_by_key(|k| k.components().count());
        keys
    }
}
