/*!
 * HTTP Messages
 * Request and response values exchanged between tiny_http and the router
 *
 * tiny_http owns the wire: framing, keep-alive, chunked bodies and reason
 * phrases. The router only ever sees an `HttpRequest` with its body fully
 * read and returns an `HttpResponse`.
 */

use std::io::{Cursor, Read};

use serde::Serialize;
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response};
use tracing::warn;

use crate::core::ErrorBody;

/// Permissive CORS, sent on every response
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "*"),
    ("Access-Control-Max-Age", "600"),
];

/// Request body could not be read
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Unreadable request body: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

impl HttpError {
    pub fn status(&self) -> u16 {
        match self {
            HttpError::Io(_) => 400,
            HttpError::BodyTooLarge { .. } => 413,
        }
    }
}

/// A request with its body already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path component of the URL, query string removed
    pub path: String,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: Method, url: &str, body: Vec<u8>) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_string();
        Self { method, path, body }
    }
}

/// Read the body of `request`, refusing more than `limit` bytes
///
/// A declared length over the limit is rejected before anything is read.
pub fn read_body(request: &mut Request, limit: usize) -> Result<Vec<u8>, HttpError> {
    if request.body_length().map_or(false, |len| len > limit) {
        return Err(HttpError::BodyTooLarge { limit });
    }

    let mut body = Vec::new();
    request
        .as_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(HttpError::BodyTooLarge { limit });
    }
    Ok(body)
}

/// A response waiting to be handed to tiny_http
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Raw bytes with an explicit content type
    pub fn bytes(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", content_type.to_string())],
            body,
        }
    }

    /// JSON-serialized body
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::bytes(status, "application/json", body),
            Err(_) => Self::bytes(
                500,
                "application/json",
                br#"{"detail":"Internal server error"}"#.to_vec(),
            ),
        }
    }

    /// `{"detail": ...}` error body
    pub fn detail(status: u16, detail: &str) -> Self {
        Self::json(status, &ErrorBody::new(detail))
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Convert for tiny_http, appending the CORS headers
    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(self.status);

        let headers = self
            .headers
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .chain(CORS_HEADERS.iter().copied());
        for (name, value) in headers {
            match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => warn!(header = name, "Dropping header with a non-ASCII value"),
            }
        }

        response
    }
}
