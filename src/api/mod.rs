/*!
 * API Module
 * HTTP transport for the filesystem and image endpoints
 *
 * Routes:
 * - `POST /fs`: one sandbox operation, JSON in and out
 * - `GET /images/{name}`: raw image bytes
 * - `GET /health`: liveness
 * - `OPTIONS *`: CORS preflight
 */

pub mod http;
pub mod routes;
pub mod server;

pub use http::{read_body, HttpError, HttpRequest, HttpResponse, CORS_HEADERS};
pub use routes::Router;
pub use server::{Server, ServerError, ShutdownHandle};
