/*!
 * Operation Wire Types
 * Request and result shapes exchanged with the transport
 */

use serde::{Deserialize, Serialize};

use super::operation::Operation;
use crate::core::FsResult;

/// Logical filesystem request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsRequest {
    pub alias: String,
    #[serde(default)]
    pub path: Vec<String>,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl FsRequest {
    /// Request with no optional arguments
    pub fn new(alias: impl Into<String>, path: &[&str], operation: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: path.iter().map(|s| s.to_string()).collect(),
            operation: operation.into(),
            new_name: None,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }

    /// Typed operation, rejecting unknown names and missing arguments
    pub fn operation(&self) -> FsResult<Operation> {
        Operation::parse(
            &self.operation,
            self.filename.as_deref(),
            self.new_name.as_deref(),
        )
    }
}

/// Successful operation result
///
/// Paths are sandbox-relative and rooted at `/`; `path` in listings echoes
/// the request segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationResult {
    Listing { path: Vec<String>, items: Vec<String> },
    FileCreated { created_file: String },
    FileDeleted { deleted_file: String },
    Created { created: String },
    Deleted { deleted: String },
    Renamed { renamed: String, to: String },
    Changed { path: Vec<String> },
}

impl OperationResult {
    /// Child names of a listing, `None` for other results
    pub fn items(&self) -> Option<&[String]> {
        match self {
            OperationResult::Listing { items, .. } => Some(items),
            _ => None,
        }
    }
}
