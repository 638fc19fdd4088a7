/*!
 * Link Operations Implementation
 * Symbolic links and canonicalization
 */

use std::path::{Path, PathBuf};

use super::super::types::*;
use super::node::Node;
use super::{MemFS, Walk};

impl MemFS {
    pub(super) fn canonicalize_impl(&self, path: &Path) -> VfsResult<PathBuf> {
        self.walk(path, Walk::Resolve)
    }

    pub(super) fn symlink_impl(&self, target: &Path, link: &Path) -> VfsResult<()> {
        let link = self.locate(link, false)?;
        if self.nodes.contains_key(&link) {
            return Err(VfsError::AlreadyExists(link.display().to_string()));
        }

        let (parent, name) = Self::split(&link)?;
        self.nodes.insert(
            link.clone(),
            Node::Symlink {
                target: target.to_path_buf(),
            },
        );
        self.add_child(&parent, &name)
    }
}
