/*!
 * Local Filesystem Backend
 * Wraps std::fs for host filesystem access
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::traits::FileSystem;
use super::types::*;

/// Local filesystem implementation using std::fs
#[derive(Debug, Clone, Default)]
pub struct LocalFS;

impl LocalFS {
    pub fn new() -> Self {
        Self
    }

    fn io_error(e: std::io::Error, context: impl Into<String>) -> VfsError {
        VfsError::from_io(e, context)
    }
}

impl FileSystem for LocalFS {
    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        let entries = fs::read_dir(path)
            .map_err(|e| Self::io_error(e, format!("list_dir {}", path.display())))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| Self::io_error(e, format!("read dir entry in {}", path.display())))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(dir = %path.display(), "Listing a non-UTF-8 filename lossily");
                    raw.to_string_lossy().into_owned()
                }
            };
            let file_type = entry
                .file_type()
                .map_err(|e| Self::io_error(e, format!("get file type for {}", name)))?;

            result.push(Entry::new(name, file_type.into()));
        }

        Ok(result)
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        fs::create_dir_all(path)
            .map_err(|e| Self::io_error(e, format!("create_dir {}", path.display())))
    }

    fn remove_dir_all(&self, path: &Path) -> VfsResult<()> {
        fs::remove_dir_all(path)
            .map_err(|e| Self::io_error(e, format!("remove_dir_all {}", path.display())))
    }

    fn create(&self, path: &Path) -> VfsResult<()> {
        // No truncate: touching an existing file keeps its contents
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Self::io_error(e, format!("create {}", path.display())))?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        fs::remove_file(path).map_err(|e| Self::io_error(e, format!("delete {}", path.display())))
    }

    fn rename(&self, from: &Path, to: &Path) -> VfsResult<()> {
        fs::rename(from, to).map_err(|e| {
            Self::io_error(e, format!("rename {} to {}", from.display(), to.display()))
        })
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        fs::metadata(path)
            .map(Metadata::from)
            .map_err(|e| Self::io_error(e, format!("metadata {}", path.display())))
    }

    fn symlink_metadata(&self, path: &Path) -> VfsResult<Metadata> {
        fs::symlink_metadata(path)
            .map(Metadata::from)
            .map_err(|e| Self::io_error(e, format!("symlink_metadata {}", path.display())))
    }

    fn canonicalize(&self, path: &Path) -> VfsResult<PathBuf> {
        path.canonicalize()
            .map_err(|e| Self::io_error(e, format!("canonicalize {}", path.display())))
    }

    fn symlink(&self, target: &Path, link: &Path) -> VfsResult<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link).map_err(|e| {
                Self::io_error(
                    e,
                    format!("symlink {} to {}", link.display(), target.display()),
                )
            })
        }

        #[cfg(windows)]
        {
            if target.is_dir() {
                std::os::windows::fs::symlink_dir(target, link)
            } else {
                std::os::windows::fs::symlink_file(target, link)
            }
            .map_err(|e| {
                Self::io_error(
                    e,
                    format!("symlink {} to {}", link.display(), target.display()),
                )
            })
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = (target, link);
            Err(VfsError::NotSupported(
                "symlinks not supported on this platform".to_string(),
            ))
        }
    }

    fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        fs::read(path).map_err(|e| Self::io_error(e, format!("read {}", path.display())))
    }

    fn name(&self) -> &str {
        "local"
    }
}
