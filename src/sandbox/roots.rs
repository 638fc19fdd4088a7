/*!
 * Sandbox Roots
 * One lazily created directory per alias under a shared base path
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::segment::check_alias;
use crate::core::{FsError, FsResult};
use crate::vfs::{FileSystem, VfsResult};

/// The canonical root directory of one alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    alias: String,
    path: PathBuf,
}

impl SandboxRoot {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Canonical host path of the root
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Maps aliases to sandbox roots, creating them on first reference
#[derive(Clone)]
pub struct SandboxRoots {
    fs: Arc<dyn FileSystem>,
    base: PathBuf,
}

impl SandboxRoots {
    /// Create the base directory if needed and pin its canonical form
    pub fn new(fs: Arc<dyn FileSystem>, base: impl AsRef<Path>) -> VfsResult<Self> {
        let base = base.as_ref();
        fs.create_dir(base)?;
        let base = fs.canonicalize(base)?;
        info!(base = %base.display(), backend = fs.name(), "Sandbox base ready");
        Ok(Self { fs, base })
    }

    /// Canonical base path
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Root for `alias`, created with `mkdir -p` semantics
    pub fn root_for(&self, alias: &str) -> FsResult<SandboxRoot> {
        check_alias(alias)?;

        let dir = self.base.join(alias);
        self.fs
            .create_dir(&dir)
            .map_err(|e| FsError::from_vfs("sandbox root", e))?;
        let path = self
            .fs
            .canonicalize(&dir)
            .map_err(|e| FsError::from_vfs("sandbox root", e))?;

        // The alias directory itself could have been swapped for a link
        if !path.starts_with(&self.base) || path == self.base {
            return Err(FsError::traversal("alias resolves outside the base path"));
        }

        debug!(alias, "Sandbox root resolved");
        Ok(SandboxRoot {
            alias: alias.to_string(),
            path,
        })
    }
}
