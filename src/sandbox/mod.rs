/*!
 * Sandbox Module
 * Alias roots, path confinement and per-alias locking
 */

pub mod locks;
pub mod path;
pub mod resolver;
pub mod roots;
pub mod segment;

pub use locks::AliasLocks;
pub use path::ConfinedPath;
pub use resolver::{PathResolver, ResolvedEntry};
pub use roots::{SandboxRoot, SandboxRoots};
pub use segment::{check_alias, check_entry_name, check_segment};
