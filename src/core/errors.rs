/*!
 * Error Types
 * Operation-level error taxonomy with thiserror and miette support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vfs::VfsError;

/// Result of a sandbox operation
pub type FsResult<T> = Result<T, FsError>;

/// Status class a transport maps onto its own codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    BadRequest,
    NotFound,
    Internal,
}

impl StatusClass {
    /// HTTP status code for this class
    #[inline]
    #[must_use]
    pub const fn http_code(self) -> u16 {
        match self {
            StatusClass::BadRequest => 400,
            StatusClass::NotFound => 404,
            StatusClass::Internal => 500,
        }
    }
}

/// Sandbox operation errors
///
/// Messages are shown to callers verbatim and never carry host paths; the
/// `OsFailure` cause is kept for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum FsError {
    #[error("Invalid path traversal: {0}")]
    #[diagnostic(
        code(sandbox::traversal),
        help("Paths must stay inside the alias sandbox; segments cannot contain separators or NUL.")
    )]
    Traversal(String),

    #[error("{0}")]
    #[diagnostic(code(request::bad_request))]
    BadRequest(String),

    #[error("{0}")]
    #[diagnostic(code(sandbox::not_found))]
    NotFound(String),

    #[error("Internal filesystem error")]
    #[diagnostic(
        code(sandbox::os_failure),
        help("The host filesystem rejected the operation. Check server logs.")
    )]
    OsFailure {
        operation: &'static str,
        cause: VfsError,
    },
}

impl FsError {
    #[inline]
    pub fn traversal(msg: impl Into<String>) -> Self {
        Self::Traversal(msg.into())
    }

    #[inline]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    #[inline]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    #[inline]
    pub fn os_failure(operation: &'static str, cause: VfsError) -> Self {
        Self::OsFailure { operation, cause }
    }

    /// Wrap a backend error raised while performing `operation`
    ///
    /// A path that vanished underneath the call (a concurrent delete, or a
    /// component that is not a directory) still reads as `NotFound`.
    pub fn from_vfs(operation: &'static str, cause: VfsError) -> Self {
        if cause.is_not_found() {
            Self::NotFound("Path not found".to_string())
        } else {
            Self::os_failure(operation, cause)
        }
    }

    /// Status class for the transport
    #[must_use]
    pub const fn status(&self) -> StatusClass {
        match self {
            FsError::Traversal(_) | FsError::BadRequest(_) => StatusClass::BadRequest,
            FsError::NotFound(_) => StatusClass::NotFound,
            FsError::OsFailure { .. } => StatusClass::Internal,
        }
    }

    /// Caller-facing detail string
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// True for sandbox escape attempts
    #[inline]
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        matches!(self, FsError::Traversal(_))
    }
}

/// Error body sent to callers: `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl From<&FsError> for ErrorBody {
    fn from(err: &FsError) -> Self {
        Self::new(err.detail())
    }
}
