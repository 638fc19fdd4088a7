/*!
 * Filesystem Node Types
 * Internal representation of files, directories and links
 */

use std::collections::HashSet;
use std::path::PathBuf;

use super::super::types::{FileType, Metadata};

/// In-memory filesystem node
///
/// Directories store child names only; a child's key in the node table is
/// always `parent.join(name)`, so moving a subtree only re-keys the table.
#[derive(Debug, Clone)]
pub(in crate::vfs) enum Node {
    File { data: Vec<u8> },
    Directory { children: HashSet<String> },
    Symlink { target: PathBuf },
}

impl Node {
    pub fn empty_dir() -> Self {
        Node::Directory {
            children: HashSet::new(),
        }
    }

    pub fn empty_file() -> Self {
        Node::File { data: Vec::new() }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Node::File { .. } => FileType::File,
            Node::Directory { .. } => FileType::Directory,
            Node::Symlink { .. } => FileType::Symlink,
        }
    }

    pub fn metadata(&self) -> Metadata {
        match self {
            Node::File { data } => Metadata {
                file_type: FileType::File,
                size: data.len() as u64,
            },
            Node::Directory { .. } => Metadata {
                file_type: FileType::Directory,
                size: 0,
            },
            Node::Symlink { target } => Metadata {
                file_type: FileType::Symlink,
                size: target.as_os_str().len() as u64,
            },
        }
    }
}

/// Snapshot of a node's shape, taken so no map guard is held while walking
#[derive(Debug, Clone, PartialEq, Eq)]
pub(in crate::vfs) enum Peek {
    File,
    Directory,
    Symlink(PathBuf),
}

impl From<&Node> for Peek {
    fn from(node: &Node) -> Self {
        match node {
            Node::File { .. } => Peek::File,
            Node::Directory { .. } => Peek::Directory,
            Node::Symlink { target, .. } => Peek::Symlink(target.clone()),
        }
    }
}
