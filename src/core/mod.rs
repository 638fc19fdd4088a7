/*!
 * Core Module
 * Error taxonomy and system-wide limits
 */

pub mod errors;
pub mod limits;

pub use errors::{ErrorBody, FsError, FsResult, StatusClass};
