/*!
 * Sandbox Filesystem Library
 * Per-alias confined filesystem operations served over HTTP
 */

pub mod api;
pub mod config;
pub mod core;
pub mod images;
pub mod monitoring;
pub mod ops;
pub mod sandbox;
pub mod vfs;

// Re-exports
pub use api::{Router, Server, ServerError, ShutdownHandle};
pub use config::{ConfigError, ServerConfig};
pub use crate::core::{ErrorBody, FsError, FsResult, StatusClass};
pub use images::{Image, ImageStore};
pub use monitoring::{generate_request_id, init_tracing};
pub use ops::{Dispatcher, FsRequest, Operation, OperationResult};
pub use sandbox::{AliasLocks, ConfinedPath, PathResolver, SandboxRoot, SandboxRoots};
pub use vfs::{FileSystem, LocalFS, MemFS, VfsError, VfsResult};
