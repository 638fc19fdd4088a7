/*!
 * Structured Tracing
 * Subscriber setup and spans for sandbox operations and HTTP requests
 *
 * Environment variables:
 * - RUST_LOG: log filter (default: info)
 * - SANDBOXFS_TRACE_JSON: JSON output when `1` or `true`
 */

use std::time::Instant;

use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Slow-operation threshold for filesystem work
const SLOW_OPERATION_MS: u128 = 100;

/// Slow-request threshold for HTTP requests
const SLOW_REQUEST_MS: u128 = 250;

/// Install the global subscriber
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SANDBOXFS_TRACE_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Unique id for correlating one request across log lines
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span around one sandbox operation
///
/// Fields never carry host paths; only the alias and operation name.
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
    operation: &'static str,
}

impl OperationSpan {
    pub fn new(alias: &str, operation: &'static str) -> Self {
        let span = span!(
            Level::DEBUG,
            "fs_operation",
            alias = alias,
            operation = operation,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            operation,
        }
    }

    pub fn record_success(&self) {
        self.span.record("result", "success");
    }

    /// Record a caller-facing error detail
    pub fn record_error(&self, detail: &str) {
        self.span.record("error", detail);
        self.span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration.as_millis() > SLOW_OPERATION_MS {
            warn!(
                operation = self.operation,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow filesystem operation"
            );
        } else {
            debug!(operation = self.operation, "operation completed");
        }
    }
}

/// Span around one HTTP request, tagged with a fresh request id
pub struct RequestSpan {
    span: tracing::Span,
    start: Instant,
    request_id: String,
}

impl RequestSpan {
    pub fn new(method: &str, target: &str) -> Self {
        let request_id = generate_request_id();
        let span = span!(
            Level::INFO,
            "http_request",
            request_id = %request_id,
            method = method,
            target = target,
            status = tracing::field::Empty,
            response_size = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            request_id,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn record_status(&self, status: u16) {
        self.span.record("status", status);
    }

    pub fn record_response_size(&self, size: usize) {
        self.span.record("response_size", size as u64);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for RequestSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_millis() > SLOW_REQUEST_MS {
            warn!(
                request_id = %self.request_id,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow request"
            );
        } else {
            debug!(
                request_id = %self.request_id,
                duration_us = duration.as_micros() as u64,
                "request completed"
            );
        }
    }
}
