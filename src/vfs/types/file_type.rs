/*!
 * VFS File Type Enum
 * Kind of object a sandbox entry refers to
 */

/// File type enumeration
///
/// Devices, fifos and sockets are all reported as `Other`; the sandbox
/// never creates them and only needs to tell them apart from regular files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    File,
    Directory,
    Symlink,
    Other,
}

impl From<std::fs::FileType> for FileType {
    fn from(ft: std::fs::FileType) -> Self {
        if ft.is_symlink() {
            FileType::Symlink
        } else if ft.is_dir() {
            FileType::Directory
        } else if ft.is_file() {
            FileType::File
        } else {
            FileType::Other
        }
    }
}
