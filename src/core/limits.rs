/*!
 * System Limits and Constants
 *
 * Centralized location for request limits, path limits and defaults.
 * Security-critical constants are marked with [SECURITY].
 */

// =============================================================================
// PATH LIMITS
// =============================================================================

/// Maximum length of a single path segment, alias or entry name in bytes
/// [SECURITY] Matches NAME_MAX on Linux; longer names fail at the OS anyway
pub const MAX_SEGMENT_LEN: usize = 255;

/// Maximum number of segments in a request path
/// [SECURITY] Bounds resolver work per request
pub const MAX_PATH_DEPTH: usize = 64;

/// Maximum symbolic links followed while resolving one path
/// [SECURITY] Same bound the Linux kernel applies (ELOOP after 40)
pub const MAX_SYMLINK_HOPS: usize = 40;

// =============================================================================
// TRANSPORT LIMITS
// =============================================================================

/// Default maximum request body size (64KB)
/// A filesystem request is a handful of short strings
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Default number of threads draining the HTTP listener
pub const DEFAULT_HTTP_WORKERS: usize = 8;

/// Idle workers re-check for shutdown this often (milliseconds)
pub const WORKER_POLL_MS: u64 = 200;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default directory holding one sandbox per alias
pub const DEFAULT_BASE_PATH: &str = "/tmp/sandboxfs";

/// Default directory served by the image endpoint
pub const DEFAULT_IMAGE_DIR: &str = "/tmp/sandboxfs-images";

/// Default listen address (127.0.0.1:8000)
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8000);
