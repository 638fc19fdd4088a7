/*!
 * Monitoring Module
 * Structured logging setup and request correlation
 */

pub mod tracer;

pub use tracer::{generate_request_id, init_tracing, OperationSpan, RequestSpan};
