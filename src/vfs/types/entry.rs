/*!
 * VFS Directory Entry
 * One name read back from a directory listing
 */

use super::file_type::FileType;

/// Directory entry as a backend reports it
///
/// Names come from the backend, not from callers, so they are not
/// validated here; callers' names go through the sandbox segment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub file_type: FileType,
}

impl Entry {
    pub(crate) fn new(name: String, file_type: FileType) -> Self {
        Self { name, file_type }
    }
}
