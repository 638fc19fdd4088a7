/*!
 * VFS Metadata
 * The subset of file metadata the sandbox operations consult
 */

use super::file_type::FileType;

/// File metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub file_type: FileType,
    pub size: u64,
}

impl Metadata {
    /// Check if this is a directory
    #[inline(always)]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    /// Check if this is a regular file
    #[inline(always)]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }

    /// Check if this is a symbolic link
    ///
    /// Only ever true for metadata obtained without following links.
    #[inline(always)]
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self.file_type, FileType::Symlink)
    }
}

impl From<std::fs::Metadata> for Metadata {
    fn from(md: std::fs::Metadata) -> Self {
        Self {
            file_type: md.file_type().into(),
            size: md.len(),
        }
    }
}
