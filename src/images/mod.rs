/*!
 * Image Store
 * Flat, read-only image directory shared by every alias
 *
 * Image names are single plain names confined to the image directory
 * through the same resolver as alias sandboxes, so a link inside the
 * directory cannot expose files outside it.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{FsError, FsResult};
use crate::sandbox::{check_entry_name, PathResolver};
use crate::vfs::{FileSystem, VfsResult};

/// A served image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Read-only access to the image directory
#[derive(Clone)]
pub struct ImageStore {
    fs: Arc<dyn FileSystem>,
    resolver: PathResolver,
    root: PathBuf,
}

impl ImageStore {
    /// Open the image directory, creating it if needed
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> VfsResult<Self> {
        let dir = dir.as_ref();
        fs.create_dir(dir)?;
        let root = fs.canonicalize(dir)?;
        info!(dir = %root.display(), "Image directory ready");

        Ok(Self {
            resolver: PathResolver::new(fs.clone()),
            fs,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fetch a regular file directly under the image directory
    pub fn fetch(&self, name: &str) -> FsResult<Image> {
        if name.is_empty() {
            return Err(FsError::not_found("Image not found"));
        }
        let path = check_entry_name(name)
            .and_then(|()| self.resolver.resolve(&self.root, &[name]))
            .map_err(|e| {
                if e.is_traversal() {
                    warn!(error = %e, "Image name rejected");
                }
                e
            })?;

        match self.fs.metadata(path.as_path()) {
            Ok(md) if md.is_file() => {}
            Err(e) if !e.is_not_found() => return Err(FsError::from_vfs("image", e)),
            _ => {
                debug!(name, "Image not found");
                return Err(FsError::not_found("Image not found"));
            }
        }

        let bytes = self
            .fs
            .read(path.as_path())
            .map_err(|e| FsError::from_vfs("image", e))?;
        Ok(Image {
            name: name.to_string(),
            content_type: content_type(name),
            bytes,
        })
    }
}

/// MIME type from a file extension
pub fn content_type(name: &str) -> &'static str {
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return "application/octet-stream",
    };
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
