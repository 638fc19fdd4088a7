/*!
 * Virtual File System Module
 * Pluggable filesystem capability behind the sandbox
 */

pub mod local;
pub mod memory;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod faulty;

// Re-exports
pub use local::LocalFS;
pub use memory::MemFS;
pub use traits::FileSystem;
pub use types::{Entry, FileType, Metadata, VfsError, VfsResult};
