/*!
 * VFS Error Types
 * Structured errors for the filesystem capability layer
 */

use thiserror::Error;

/// VFS operation result
#[must_use = "VFS operations can fail and must be handled"]
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors
///
/// Context strings name the path as the backend saw it. They are meant for
/// logs; the operation layer decides what reaches a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Is a directory: {0}")]
    IsADirectory(String),

    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Too many levels of symbolic links: {0}")]
    TooManyLinks(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl VfsError {
    /// Convert a `std::io::Error` into the matching variant
    pub fn from_io(e: std::io::Error, context: impl Into<String>) -> Self {
        use std::io::ErrorKind;
        let context = context.into();
        match e.kind() {
            ErrorKind::NotFound => VfsError::NotFound(context),
            ErrorKind::PermissionDenied => VfsError::PermissionDenied(context),
            ErrorKind::AlreadyExists => VfsError::AlreadyExists(context),
            _ => match e.raw_os_error() {
                Some(code) if code == ENOTDIR => VfsError::NotADirectory(context),
                Some(code) if code == EISDIR => VfsError::IsADirectory(context),
                Some(code) if code == ENOTEMPTY => VfsError::DirectoryNotEmpty(context),
                Some(code) if code == ELOOP => VfsError::TooManyLinks(context),
                _ => VfsError::IoError(format!("{}: {}", context, e)),
            },
        }
    }

    /// True when the error means the path (or a component of it) is missing
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_) | VfsError::NotADirectory(_))
    }
}

// errno values for kinds std does not expose as stable ErrorKind variants
const ENOTDIR: i32 = 20;
const EISDIR: i32 = 21;
#[cfg(target_os = "linux")]
const ENOTEMPTY: i32 = 39;
#[cfg(target_os = "linux")]
const ELOOP: i32 = 40;
#[cfg(not(target_os = "linux"))]
const ENOTEMPTY: i32 = 66;
#[cfg(not(target_os = "linux"))]
const ELOOP: i32 = 62;
