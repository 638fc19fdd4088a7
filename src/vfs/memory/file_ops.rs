/*!
 * File Operations Implementation
 * FileSystem trait methods for files and renames
 */

use std::path::{Path, PathBuf};

use super::super::types::*;
use super::node::{Node, Peek};
use super::{MemFS, Walk};

impl MemFS {
    pub(super) fn read_impl(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let path = self.walk(path, Walk::Resolve)?;

        match self.nodes.get(&path).map(|n| n.value().clone()) {
            Some(Node::File { data, .. }) => Ok(data),
            Some(_) => Err(VfsError::IsADirectory(path.display().to_string())),
            None => Err(VfsError::NotFound(path.display().to_string())),
        }
    }

    pub(super) fn create_impl(&self, path: &Path) -> VfsResult<()> {
        let path = self.locate(path, true)?;

        match self.peek(&path) {
            Some(Peek::File) => Ok(()),
            Some(Peek::Directory) => Err(VfsError::IsADirectory(path.display().to_string())),
            Some(Peek::Symlink(_)) => Err(VfsError::NotFound(path.display().to_string())),
            None => {
                let (parent, name) = Self::split(&path)?;
                self.nodes.insert(path.clone(), Node::empty_file());
                self.add_child(&parent, &name)
            }
        }
    }

    pub(super) fn delete_impl(&self, path: &Path) -> VfsResult<()> {
        let path = self.locate(path, false)?;

        match self.peek(&path) {
            Some(Peek::File) | Some(Peek::Symlink(_)) => {
                self.nodes.remove(&path);
                let (parent, name) = Self::split(&path)?;
                self.remove_child(&parent, &name)
            }
            Some(Peek::Directory) => Err(VfsError::IsADirectory(path.display().to_string())),
            None => Err(VfsError::NotFound(path.display().to_string())),
        }
    }

    pub(super) fn rename_impl(&self, from: &Path, to: &Path) -> VfsResult<()> {
        let from = self.locate(from, false)?;
        let to = self.locate(to, false)?;

        let source = self
            .peek(&from)
            .ok_or_else(|| VfsError::NotFound(from.display().to_string()))?;
        if from == to {
            return Ok(());
        }
        if from == Path::new("/") || to.starts_with(&from) {
            return Err(VfsError::InvalidPath(format!(
                "cannot move {} into itself",
                from.display()
            )));
        }

        // Replacement rules follow rename(2)
        match (self.nodes.get(&to).map(|n| n.value().clone()), &source) {
            (None, _) => {}
            (Some(Node::Directory { children, .. }), Peek::Directory) => {
                if !children.is_empty() {
                    return Err(VfsError::DirectoryNotEmpty(to.display().to_string()));
                }
                self.nodes.remove(&to);
            }
            (Some(Node::Directory { .. }), _) => {
                return Err(VfsError::IsADirectory(to.display().to_string()));
            }
            (Some(_), Peek::Directory) => {
                return Err(VfsError::NotADirectory(to.display().to_string()));
            }
            (Some(_), _) => {
                self.nodes.remove(&to);
            }
        }

        for key in self.subtree_keys(&from) {
            if let Some((_, node)) = self.nodes.remove(&key) {
                let moved: PathBuf = match key.strip_prefix(&from) {
                    Ok(rest) if rest.as_os_str().is_empty() => to.clone(),
                    Ok(rest) => to.join(rest),
                    Err(_) => key.clone(),
                };
                self.nodes.insert(moved, node);
            }
        }

        let (from_parent, from_name) = Self::split(&from)?;
        self.remove_child(&from_parent, &from_name)?;
        let (to_parent, to_name) = Self::split(&to)?;
        self.add_child(&to_parent, &to_name)
    }
}
