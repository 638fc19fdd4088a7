/*!
 * Routes
 * Maps HTTP requests onto the dispatcher and the image store
 */

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use tiny_http::Method;

use super::http::{HttpRequest, HttpResponse};
use crate::core::{ErrorBody, FsError};
use crate::images::ImageStore;
use crate::ops::{Dispatcher, FsRequest};

const IMAGES_PREFIX: &str = "/images/";

/// Request router shared by every worker thread
#[derive(Clone)]
pub struct Router {
    dispatcher: Arc<Dispatcher>,
    images: Arc<ImageStore>,
}

impl Router {
    pub fn new(dispatcher: Arc<Dispatcher>, images: Arc<ImageStore>) -> Self {
        Self { dispatcher, images }
    }

    pub fn route(&self, request: &HttpRequest) -> HttpResponse {
        let path = request.path.as_str();
        match (&request.method, path) {
            (Method::Options, _) => HttpResponse::no_content(),
            (Method::Post, "/fs") => self.filesystem(&request.body),
            (Method::Get, "/health") => {
                HttpResponse::json(200, &serde_json::json!({ "status": "ok" }))
            }
            (Method::Get, _) if path.starts_with(IMAGES_PREFIX) => {
                self.image(&path[IMAGES_PREFIX.len()..])
            }
            (_, "/fs") => method_not_allowed("POST, OPTIONS"),
            (_, "/health") => method_not_allowed("GET, OPTIONS"),
            (_, _) if path.starts_with(IMAGES_PREFIX) => method_not_allowed("GET, OPTIONS"),
            _ => HttpResponse::detail(404, "Not Found"),
        }
    }

    fn filesystem(&self, body: &[u8]) -> HttpResponse {
        let request: FsRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => return HttpResponse::detail(400, &format!("Invalid request body: {}", e)),
        };

        match self.dispatcher.handle(&request) {
            Ok(result) => HttpResponse::json(200, &result),
            Err(err) => error_response(&err),
        }
    }

    fn image(&self, raw_name: &str) -> HttpResponse {
        let name = match percent_decode_str(raw_name).decode_utf8() {
            Ok(name) => name,
            Err(_) => return HttpResponse::detail(400, "Invalid image name"),
        };

        match self.images.fetch(&name) {
            Ok(image) => HttpResponse::bytes(200, image.content_type, image.bytes),
            Err(err) => error_response(&err),
        }
    }
}

fn error_response(err: &FsError) -> HttpResponse {
    HttpResponse::json(err.status().http_code(), &ErrorBody::from(err))
}

fn method_not_allowed(allow: &'static str) -> HttpResponse {
    HttpResponse::detail(405, "Method Not Allowed").with_header("Allow", allow)
}
