/*!
 * Operation Enum
 * The closed set of sandbox filesystem operations
 */

use std::fmt;

use crate::core::{FsError, FsResult};

/// A sandbox operation with its operation-specific arguments
///
/// Wire names are `ls`, `cd`, `mkdir`, `rmdir`, `newfile`, `deletefile`
/// and `rename`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Enumerate a directory's immediate children
    List,
    /// Validate that a directory exists
    ChangeDirectory,
    /// `mkdir -p`
    MakeDirectory,
    /// Recursively delete a directory
    RemoveDirectory,
    /// Create an empty file in the target directory if absent
    CreateFile { filename: String },
    /// Delete a regular file in the target directory
    DeleteFile { filename: String },
    /// Rename the target within its parent directory
    Rename { new_name: String },
}

impl Operation {
    /// Every wire name, in declaration order
    pub const NAMES: [&'static str; 7] = [
        "ls",
        "cd",
        "mkdir",
        "rmdir",
        "newfile",
        "deletefile",
        "rename",
    ];

    /// Build an operation from its wire name and optional arguments
    ///
    /// An empty argument counts as missing.
    pub fn parse(name: &str, filename: Option<&str>, new_name: Option<&str>) -> FsResult<Self> {
        let required = |value: Option<&str>, missing: &str| {
            value
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| FsError::bad_request(missing))
        };

        match name {
            "ls" => Ok(Operation::List),
            "cd" => Ok(Operation::ChangeDirectory),
            "mkdir" => Ok(Operation::MakeDirectory),
            "rmdir" => Ok(Operation::RemoveDirectory),
            "newfile" => Ok(Operation::CreateFile {
                filename: required(filename, "Filename required")?,
            }),
            "deletefile" => Ok(Operation::DeleteFile {
                filename: required(filename, "Filename required")?,
            }),
            "rename" => Ok(Operation::Rename {
                new_name: required(new_name, "New name required")?,
            }),
            other => Err(FsError::bad_request(format!("Unknown operation {}", other))),
        }
    }

    /// Wire name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::List => "ls",
            Operation::ChangeDirectory => "cd",
            Operation::MakeDirectory => "mkdir",
            Operation::RemoveDirectory => "rmdir",
            Operation::CreateFile { .. } => "newfile",
            Operation::DeleteFile { .. } => "deletefile",
            Operation::Rename { .. } => "rename",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
