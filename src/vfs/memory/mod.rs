/*!
 * In-Memory Filesystem Backend
 * Volatile filesystem used as a test double for the host disk
 */

mod dir_ops;
mod file_ops;
mod link_ops;
mod metadata_ops;
mod node;

use ahash::RandomState;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::types::*;
use crate::core::limits::MAX_SYMLINK_HOPS;
use node::{Node, Peek};

/// In-memory filesystem implementation
///
/// Nodes live in a flat table keyed by absolute path. Symbolic links are
/// real nodes and are followed the way the host kernel follows them, which
/// lets sandbox escape attempts through links be exercised without a disk.
#[derive(Debug, Clone)]
pub struct MemFS {
    pub(super) nodes: Arc<DashMap<PathBuf, Node, RandomState>>,
}

/// How `walk` treats a missing component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Walk {
    /// Fail with `NotFound`
    Resolve,
    /// Create it as a directory (`mkdir -p`)
    CreateDirs,
}

impl MemFS {
    /// Create new in-memory filesystem
    pub fn new() -> Self {
        let nodes = DashMap::with_hasher(RandomState::new());
        nodes.insert(PathBuf::from("/"), Node::empty_dir());

        Self {
            nodes: Arc::new(nodes),
        }
    }

    /// Make path absolute without touching `..` components
    pub(super) fn absolute(path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new("/").join(path)
        }
    }

    pub(super) fn peek(&self, path: &Path) -> Option<Peek> {
        self.nodes.get(path).map(|n| Peek::from(n.value()))
    }

    /// Add child to parent directory
    pub(super) fn add_child(&self, parent_path: &Path, child_name: &str) -> VfsResult<()> {
        match self.nodes.get_mut(parent_path) {
            Some(mut node) => match node.value_mut() {
                Node::Directory { children, .. } => {
                    children.insert(child_name.to_string());
                    Ok(())
                }
                _ => Err(VfsError::NotADirectory(parent_path.display().to_string())),
            },
            None => Err(VfsError::NotFound(parent_path.display().to_string())),
        }
    }

    /// Remove child from parent directory
    pub(super) fn remove_child(&self, parent_path: &Path, child_name: &str) -> VfsResult<()> {
        match self.nodes.get_mut(parent_path) {
            Some(mut node) => match node.value_mut() {
                Node::Directory { children, .. } => {
                    children.remove(child_name);
                    Ok(())
                }
                _ => Err(VfsError::NotADirectory(parent_path.display().to_string())),
            },
            None => Err(VfsError::NotFound(parent_path.display().to_string())),
        }
    }

    /// Split a located path into (parent, name)
    pub(super) fn split(path: &Path) -> VfsResult<(PathBuf, String)> {
        let parent = path
            .parent()
            .ok_or_else(|| VfsError::InvalidPath("path has no parent".to_string()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| VfsError::InvalidPath(format!("invalid path: {}", path.display())))?;
        Ok((parent.to_path_buf(), name.to_string()))
    }

    /// Walk a path component by component, following links and `..` the way
    /// the host kernel does
    ///
    /// Returns the canonical location of the final component.
    pub(super) fn walk(&self, path: &Path, mode: Walk) -> VfsResult<PathBuf> {
        let mut pending: VecDeque<String> = steps(&Self::absolute(path));
        let mut resolved = PathBuf::from("/");
        let mut hops = 0usize;

        while let Some(step) = pending.pop_front() {
            match step.as_str() {
                "." => {}
                ".." => {
                    resolved.pop();
                }
                name => {
                    let next = resolved.join(name);
                    match self.peek(&next) {
                        None if mode == Walk::CreateDirs => {
                            self.nodes.insert(next.clone(), Node::empty_dir());
                            self.add_child(&resolved, name)?;
                            resolved = next;
                        }
                        None => return Err(VfsError::NotFound(next.display().to_string())),
                        Some(Peek::Directory) => resolved = next,
                        Some(Peek::File) => {
                            if !pending.is_empty() {
                                return Err(VfsError::NotADirectory(next.display().to_string()));
                            }
                            if mode == Walk::CreateDirs {
                                return Err(VfsError::AlreadyExists(next.display().to_string()));
                            }
                            resolved = next;
                        }
                        Some(Peek::Symlink(target)) => {
                            hops += 1;
                            if hops > MAX_SYMLINK_HOPS {
                                return Err(VfsError::TooManyLinks(next.display().to_string()));
                            }
                            if target.is_absolute() {
                                resolved = PathBuf::from("/");
                            }
                            for step in steps(&target).into_iter().rev() {
                                pending.push_front(step);
                            }
                        }
                    }
                }
            }
        }

        Ok(resolved)
    }

    /// Locate the entry a path names, following links in every component but
    /// the last; the last is followed only when `follow` is set
    ///
    /// The entry itself does not need to exist, its parent does.
    pub(super) fn locate(&self, path: &Path, follow: bool) -> VfsResult<PathBuf> {
        let path = Self::absolute(path);
        let name = match path.file_name() {
            Some(name) => name.to_owned(),
            // Root or a trailing `..`
            None => return self.walk(&path, Walk::Resolve),
        };
        let parent = path.parent().unwrap_or_else(|| Path::new("/"));
        let parent = self.walk(parent, Walk::Resolve)?;
        if self.peek(&parent) != Some(Peek::Directory) {
            return Err(VfsError::NotADirectory(parent.display().to_string()));
        }

        let candidate = parent.join(name);
        if follow {
            if let Some(Peek::Symlink(_)) = self.peek(&candidate) {
                return self.walk(&candidate, Walk::Resolve);
            }
        }
        Ok(candidate)
    }
}

impl Default for MemFS {
    fn default() -> Self {
        Self::new()
    }
}

/// Path components as owned strings, root and prefixes dropped
fn steps(path: &Path) -> VecDeque<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir => Some(".".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect()
}
