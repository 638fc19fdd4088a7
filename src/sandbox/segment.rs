/*!
 * Segment Validation
 * Rules for caller-supplied path segments, entry names and aliases
 */

use std::path::{Component, Path};

use crate::core::limits::MAX_SEGMENT_LEN;
use crate::core::{FsError, FsResult};

/// Validate one path segment
///
/// Empty, `.` and `..` segments are allowed here; whether `..` keeps the
/// path inside the sandbox is decided after normalization.
pub fn check_segment(segment: &str) -> FsResult<()> {
    if segment.len() > MAX_SEGMENT_LEN {
        return Err(FsError::bad_request("Path segment too long"));
    }
    if segment.contains('\0') {
        return Err(FsError::traversal("path segment contains a NUL byte"));
    }
    if segment.contains('/') || segment.contains('\\') {
        return Err(FsError::traversal("path segment contains a path separator"));
    }
    // Drive prefixes such as `C:` replace the whole path when joined on Windows
    if Path::new(segment)
        .components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return Err(FsError::traversal("path segment is an absolute path"));
    }
    Ok(())
}

/// Validate a single entry name (`filename`, `new_name`, image name)
///
/// Callers report a missing name themselves; an empty name here is still
/// rejected so the check can stand alone.
pub fn check_entry_name(name: &str) -> FsResult<()> {
    if name.is_empty() {
        return Err(FsError::bad_request("Name cannot be empty"));
    }
    check_segment(name)?;
    if name == "." || name == ".." {
        return Err(FsError::traversal("name cannot be a navigation component"));
    }
    Ok(())
}

/// Validate an alias; aliases become a directory name under the base path
pub fn check_alias(alias: &str) -> FsResult<()> {
    if alias.is_empty() {
        return Err(FsError::bad_request("Alias required"));
    }
    check_entry_name(alias).map_err(|e| match e {
        FsError::Traversal(_) => FsError::traversal("alias is not a plain name"),
        other => other,
    })
}
