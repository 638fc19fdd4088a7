/*!
 * HTTP Server
 * tiny_http listener drained by a fixed pool of worker threads
 *
 * Each worker pulls one request at a time, reads its body under the size
 * limit, routes it and responds. Filesystem work is synchronous, so a
 * worker is busy for exactly one request.
 */

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use tiny_http::Request;
use tracing::{debug, error, info};

use super::http::{read_body, HttpRequest, HttpResponse};
use super::routes::Router;
use crate::core::limits::{DEFAULT_HTTP_WORKERS, DEFAULT_MAX_BODY_BYTES, WORKER_POLL_MS};
use crate::monitoring::RequestSpan;

/// Server startup failure
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("cannot bind {addr}: {message}")]
    Bind { addr: SocketAddr, message: String },

    #[error("cannot start worker thread: {0}")]
    Worker(#[from] std::io::Error),
}

/// Bound HTTP server
pub struct Server {
    http: Arc<tiny_http::Server>,
    router: Arc<Router>,
    max_body_bytes: usize,
    workers: usize,
    shutdown: Arc<AtomicBool>,
}

/// Stops a running server from another thread or task
#[derive(Clone)]
pub struct ShutdownHandle {
    http: Arc<tiny_http::Server>,
    shutdown: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Stop accepting requests; workers finish the request they hold
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.http.unblock();
    }
}

impl Server {
    /// Bind `addr`; port 0 picks a free port
    pub fn bind(addr: SocketAddr, router: Router) -> Result<Self, ServerError> {
        let http = tiny_http::Server::http(addr).map_err(|e| ServerError::Bind {
            addr,
            message: e.to_string(),
        })?;

        Ok(Self {
            http: Arc::new(http),
            router: Arc::new(router),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            workers: DEFAULT_HTTP_WORKERS,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Listening address, `None` for a non-IP listener
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            http: self.http.clone(),
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve on the worker pool until shut down, then join every worker
    pub fn run(self) -> Result<(), ServerError> {
        info!(addr = ?self.local_addr(), workers = self.workers, "HTTP server listening");

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            let worker = Worker {
                http: self.http.clone(),
                router: self.router.clone(),
                max_body_bytes: self.max_body_bytes,
                shutdown: self.shutdown.clone(),
            };
            let spawned = thread::Builder::new()
                .name(format!("sandboxfs-http-{}", id))
                .spawn(move || worker.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    self.shutdown_handle().shutdown();
                    join_all(handles);
                    return Err(ServerError::Worker(e));
                }
            }
        }

        join_all(handles);
        info!("HTTP server stopped");
        Ok(())
    }
}

fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            error!("HTTP worker panicked");
        }
    }
}

struct Worker {
    http: Arc<tiny_http::Server>,
    router: Arc<Router>,
    max_body_bytes: usize,
    shutdown: Arc<AtomicBool>,
}

impl Worker {
    fn run(self) {
        let poll = Duration::from_millis(WORKER_POLL_MS);

        while !self.shutdown.load(Ordering::Acquire) {
            match self.http.recv_timeout(poll) {
                Ok(Some(request)) => self.serve(request),
                Ok(None) => {}
                Err(e) => {
                    if !self.shutdown.load(Ordering::Acquire) {
                        debug!(error = %e, "Receive failed");
                    }
                }
            }
        }

        // Pass the wakeup on to the next idle worker
        self.http.unblock();
    }

    fn serve(&self, mut request: Request) {
        let method = request.method().clone();
        let span = RequestSpan::new(&method.to_string(), request.url());
        let _entered = span.enter();

        let response = match read_body(&mut request, self.max_body_bytes) {
            Ok(body) => self
                .router
                .route(&HttpRequest::new(method, request.url(), body)),
            Err(e) => {
                debug!(error = %e, "Rejecting request body");
                HttpResponse::detail(e.status(), &e.to_string())
            }
        };
        span.record_status(response.status);
        span.record_response_size(response.body.len());

        let response = response.with_header("X-Request-Id", span.request_id());
        if let Err(e) = request.respond(response.into_response()) {
            debug!(error = %e, "Client went away before the response was written");
        }
    }
}
