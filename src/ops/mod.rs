/*!
 * Operations Module
 * The closed operation set, its wire types and the dispatcher
 */

pub mod dispatcher;
pub mod operation;
pub mod types;

pub use dispatcher::Dispatcher;
pub use operation::Operation;
pub use types::{FsRequest, OperationResult};
