/*!
 * Path Resolver
 * Confines untrusted segment sequences to a sandbox root
 *
 * Resolution walks the segments one at a time from the root, the way
 * realpath does:
 * 1. Validate every segment (separators, NUL, drive prefixes)
 * 2. Skip empty and `.` segments
 * 3. `..` steps back from wherever the walk actually is, so a link
 *    followed earlier is honored
 * 4. A name is canonicalized through the filesystem, following links;
 *    the result must still lie under the root
 * 5. Once a name does not exist, the rest is appended as plain names
 *
 * The walk never leaves the root, not even transiently.
 */

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;

use super::path::ConfinedPath;
use super::segment::{check_entry_name, check_segment};
use crate::core::limits::MAX_PATH_DEPTH;
use crate::core::{FsError, FsResult};
use crate::vfs::{FileSystem, VfsError};

/// A named entry inside a confined directory
///
/// `entry` is the directory entry itself (a link stays a link); `resolved`
/// is where it leads once links are followed. Both are confined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub entry: ConfinedPath,
    pub resolved: ConfinedPath,
}

/// Resolves caller paths against a sandbox root
#[derive(Clone)]
pub struct PathResolver {
    fs: Arc<dyn FileSystem>,
}

impl PathResolver {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Resolve `segments` below `root`
    ///
    /// `root` must already be canonical. An empty sequence names the root.
    pub fn resolve<S: AsRef<str>>(&self, root: &Path, segments: &[S]) -> FsResult<ConfinedPath> {
        if segments.len() > MAX_PATH_DEPTH {
            return Err(FsError::bad_request("Path too deep"));
        }
        for segment in segments {
            check_segment(segment.as_ref())?;
        }

        let mut walk = Walk::new(self.fs.as_ref(), root);
        for segment in segments {
            walk.step(OsStr::new(segment.as_ref()))?;
        }
        Ok(walk.finish())
    }

    /// Resolve a single entry name inside an already confined directory
    pub fn resolve_entry(&self, dir: &ConfinedPath, name: &str) -> FsResult<ResolvedEntry> {
        check_entry_name(name)?;
        let entry = dir.child_unchecked(name);

        // Re-walk from the root: `dir` may have been resolved before the
        // tree changed underneath it
        let mut walk = Walk::new(self.fs.as_ref(), dir.root());
        for component in entry.relative().components() {
            walk.step(component.as_os_str())?;
        }
        Ok(ResolvedEntry {
            entry,
            resolved: walk.finish(),
        })
    }
}

/// Component-by-component walk below a root
struct Walk<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    /// Deepest existing location reached, canonical and under `root`
    current: PathBuf,
    /// Names below `current` that do not exist
    missing: Vec<OsString>,
}

impl<'a> Walk<'a> {
    fn new(fs: &'a dyn FileSystem, root: &'a Path) -> Self {
        Self {
            fs,
            root,
            current: root.to_path_buf(),
            missing: Vec::new(),
        }
    }

    fn step(&mut self, name: &OsStr) -> FsResult<()> {
        if name.is_empty() || name == "." {
            return Ok(());
        }

        if name == ".." {
            if self.missing.pop().is_none() {
                if self.current == self.root {
                    return Err(FsError::traversal("path escapes the sandbox"));
                }
                self.current.pop();
            }
            return Ok(());
        }

        if !self.missing.is_empty() {
            self.missing.push(name.to_os_string());
            return Ok(());
        }

        let next = self.current.join(name);
        match self.fs.canonicalize(&next) {
            Ok(canonical) => {
                if !canonical.starts_with(self.root) {
                    trace!(?canonical, "canonical path left sandbox root");
                    return Err(FsError::traversal("path escapes the sandbox"));
                }
                self.current = canonical;
            }
            Err(e) if e.is_not_found() => {
                // A link whose target is missing would be followed by a
                // later create, to wherever it points
                if let Ok(md) = self.fs.symlink_metadata(&next) {
                    if md.is_symlink() {
                        return Err(FsError::traversal("unresolvable symbolic link"));
                    }
                }
                self.missing.push(name.to_os_string());
            }
            Err(VfsError::TooManyLinks(_)) => {
                return Err(FsError::bad_request("Too many levels of symbolic links"));
            }
            Err(e) => return Err(FsError::from_vfs("resolve", e)),
        }
        Ok(())
    }

    fn finish(self) -> ConfinedPath {
        let mut path = self.current;
        path.extend(self.missing);
        ConfinedPath::new_unchecked(self.root.to_path_buf(), path)
    }
}
