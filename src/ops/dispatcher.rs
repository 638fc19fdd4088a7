/*!
 * Operation Dispatcher
 * Resolves the target of a request and applies one operation to it
 *
 * Every branch confines its paths through the resolver before touching
 * the filesystem, read-only listings included.
 */

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::operation::Operation;
use super::types::{FsRequest, OperationResult};
use crate::core::{FsError, FsResult};
use crate::monitoring::OperationSpan;
use crate::sandbox::{check_alias, check_entry_name, AliasLocks, ConfinedPath, PathResolver, SandboxRoots};
use crate::vfs::{FileSystem, VfsError};

/// Applies sandbox operations on behalf of aliases
#[derive(Clone)]
pub struct Dispatcher {
    fs: Arc<dyn FileSystem>,
    roots: SandboxRoots,
    resolver: PathResolver,
    locks: AliasLocks,
}

impl Dispatcher {
    pub fn new(fs: Arc<dyn FileSystem>, roots: SandboxRoots, locks: AliasLocks) -> Self {
        let resolver = PathResolver::new(fs.clone());
        Self {
            fs,
            roots,
            resolver,
            locks,
        }
    }

    pub fn roots(&self) -> &SandboxRoots {
        &self.roots
    }

    /// Handle a wire request
    pub fn handle(&self, request: &FsRequest) -> FsResult<OperationResult> {
        let operation = request.operation().map_err(|e| {
            debug!(alias = %request.alias, operation = %request.operation, error = %e, "Request rejected");
            e
        })?;
        self.execute(&request.alias, &request.path, &operation)
    }

    /// Run `operation` against `segments` inside the sandbox of `alias`
    pub fn execute<S: AsRef<str>>(
        &self,
        alias: &str,
        segments: &[S],
        operation: &Operation,
    ) -> FsResult<OperationResult> {
        let span = OperationSpan::new(alias, operation.name());
        let _entered = span.enter();

        let result = check_alias(alias).and_then(|()| {
            self.locks
                .with_alias(alias, || self.run(alias, segments, operation))
        });

        match &result {
            Ok(_) => span.record_success(),
            Err(err) => {
                span.record_error(&err.detail());
                match err {
                    FsError::Traversal(_) => warn!(
                        alias,
                        operation = operation.name(),
                        "Sandbox escape attempt rejected"
                    ),
                    FsError::OsFailure { operation: op, cause } => error!(
                        alias,
                        operation = *op,
                        cause = %cause,
                        "Filesystem operation failed"
                    ),
                    _ => debug!(alias, operation = operation.name(), error = %err, "Operation failed"),
                }
            }
        }
        result
    }

    fn run<S: AsRef<str>>(
        &self,
        alias: &str,
        segments: &[S],
        operation: &Operation,
    ) -> FsResult<OperationResult> {
        let root = self.roots.root_for(alias)?;
        let target = self.resolver.resolve(root.path(), segments)?;
        debug!(alias, operation = operation.name(), target = %target, "Dispatching");

        match operation {
            Operation::List => self.list(&target, segments),
            Operation::ChangeDirectory => {
                self.require_dir(&target, "cd")?;
                Ok(OperationResult::Changed {
                    path: echo(segments),
                })
            }
            Operation::MakeDirectory => {
                self.make_dirs(&target, "mkdir")?;
                Ok(OperationResult::Created {
                    created: target.to_string(),
                })
            }
            Operation::RemoveDirectory => {
                self.require_dir(&target, "rmdir")?;
                self.fs
                    .remove_dir_all(target.as_path())
                    .map_err(|e| FsError::from_vfs("rmdir", e))?;
                Ok(OperationResult::Deleted {
                    deleted: target.to_string(),
                })
            }
            Operation::CreateFile { filename } => self.create_file(&target, filename),
            Operation::DeleteFile { filename } => self.delete_file(&target, filename),
            Operation::Rename { new_name } => self.rename(&target, new_name),
        }
    }

    fn list<S: AsRef<str>>(&self, target: &ConfinedPath, segments: &[S]) -> FsResult<OperationResult> {
        self.require_dir(target, "ls")?;
        let mut items: Vec<String> = self
            .fs
            .list_dir(target.as_path())
            .map_err(|e| FsError::from_vfs("ls", e))?
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        items.sort_unstable();

        Ok(OperationResult::Listing {
            path: echo(segments),
            items,
        })
    }

    fn create_file(&self, dir: &ConfinedPath, filename: &str) -> FsResult<OperationResult> {
        // Reject the name before any directory is created for it
        check_entry_name(filename)?;
        self.make_dirs(dir, "newfile")?;

        let file = self.resolver.resolve_entry(dir, filename)?;
        match self.fs.metadata(file.resolved.as_path()) {
            Ok(md) if md.is_dir() => {
                return Err(FsError::bad_request("A directory with that name already exists"));
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(FsError::from_vfs("newfile", e)),
        }
        self.fs
            .create(file.resolved.as_path())
            .map_err(|e| FsError::from_vfs("newfile", e))?;

        Ok(OperationResult::FileCreated {
            created_file: file.entry.to_string(),
        })
    }

    fn delete_file(&self, dir: &ConfinedPath, filename: &str) -> FsResult<OperationResult> {
        let file = self.resolver.resolve_entry(dir, filename)?;
        match self.fs.metadata(file.resolved.as_path()) {
            Ok(md) if md.is_file() => {}
            Ok(_) => return Err(FsError::not_found("File not found")),
            Err(e) if e.is_not_found() => return Err(FsError::not_found("File not found")),
            Err(e) => return Err(FsError::from_vfs("deletefile", e)),
        }

        // A link is removed itself, never the file it points at
        self.fs
            .delete(file.entry.as_path())
            .map_err(|e| FsError::from_vfs("deletefile", e))?;

        Ok(OperationResult::FileDeleted {
            deleted_file: file.entry.to_string(),
        })
    }

    fn rename(&self, target: &ConfinedPath, new_name: &str) -> FsResult<OperationResult> {
        check_entry_name(new_name)?;
        let parent = target
            .parent()
            .ok_or_else(|| FsError::bad_request("Cannot rename the sandbox root"))?;
        let source_is_dir = match self.fs.symlink_metadata(target.as_path()) {
            Ok(md) => md.is_dir(),
            Err(e) if e.is_not_found() => return Err(FsError::not_found("Path not found")),
            Err(e) => return Err(FsError::from_vfs("rename", e)),
        };

        let destination = self.resolver.resolve_entry(&parent, new_name)?;
        match self.fs.symlink_metadata(destination.entry.as_path()) {
            Ok(md) if md.is_dir() && !source_is_dir => {
                return Err(FsError::bad_request("A directory with that name already exists"));
            }
            Ok(md) if !md.is_dir() && source_is_dir => {
                return Err(FsError::bad_request("A file with that name already exists"));
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(FsError::from_vfs("rename", e)),
        }

        // The target exists, so only a vanished path reads as not found
        self.fs
            .rename(target.as_path(), destination.entry.as_path())
            .map_err(|e| match e {
                VfsError::NotFound(_) => FsError::not_found("Path not found"),
                other => FsError::os_failure("rename", other),
            })?;

        Ok(OperationResult::Renamed {
            renamed: target.to_string(),
            to: destination.entry.to_string(),
        })
    }

    /// Directory must exist; a file or a missing path reads the same
    fn require_dir(&self, target: &ConfinedPath, operation: &'static str) -> FsResult<()> {
        match self.fs.metadata(target.as_path()) {
            Ok(md) if md.is_dir() => Ok(()),
            Ok(_) => Err(FsError::not_found("Directory not found")),
            Err(e) if e.is_not_found() => Err(FsError::not_found("Directory not found")),
            Err(e) => Err(FsError::from_vfs(operation, e)),
        }
    }

    fn make_dirs(&self, target: &ConfinedPath, operation: &'static str) -> FsResult<()> {
        self.fs.create_dir(target.as_path()).map_err(|e| match e {
            VfsError::AlreadyExists(_) | VfsError::NotADirectory(_) => {
                FsError::bad_request("A file with that name already exists")
            }
            other => FsError::from_vfs(operation, other),
        })
    }
}

fn echo<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    segments.iter().map(|s| s.as_ref().to_string()).collect()
}
