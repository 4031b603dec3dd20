//! Round-trip logging middleware.
//!
//! Each request runs inside a `bpm_request` span carrying the verb, the URL
//! path and, for task updates, the `action` query parameter (`assign`,
//! `finish`, `cancel`, ...). Header values are never logged: they carry the
//! session credentials.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that logs every round trip of the transport.
///
/// # Example
///
/// ```ignore
/// use bpmink::HyperClient;
/// use bpmink::middleware::LoggingLayer;
///
/// let transport = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// How much the logging middleware records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug events with query, header names, body sizes and content type.
    Debug,
    /// Info events with status and elapsed time only.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Log summaries at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log details at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let span = info_span!(
            "bpm_request",
            method = %request.method(),
            path = request.url().path(),
            action = task_action(&request).as_deref(),
        );
        let level = self.level;

        if level == LogLevel::Debug {
            let _entered = span.enter();
            let header_names: Vec<&str> = request.headers().keys().map(String::as_str).collect();
            debug!(
                query = request.url().query().unwrap_or_default(),
                headers = ?header_names,
                body_len = request.body().map_or(0, Bytes::len),
                "sending request"
            );
        }

        let started = Instant::now();
        let call = self.inner.call(request);
        Box::pin(
            async move {
                let result = call.await;
                log_outcome(&result, level, started);
                result
            }
            .instrument(span),
        )
    }
}

/// `action` query parameter of task updates such as `PUT task/{tkiid}?action=assign`.
fn task_action(request: &Request<Bytes>) -> Option<String> {
    request
        .url()
        .query_pairs()
        .find(|(name, _)| name == "action")
        .map(|(_, value)| value.into_owned())
}

fn log_outcome(result: &Result<Response<Bytes>>, level: LogLevel, started: Instant) {
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(response) if response.is_success() => {
            if level == LogLevel::Debug {
                debug!(
                    status = response.status(),
                    elapsed_ms,
                    body_len = response.body().len(),
                    content_type = response.content_type().unwrap_or_default(),
                    "response received"
                );
            } else {
                info!(status = response.status(), elapsed_ms, "response received");
            }
        }
        // The envelope may still carry a business error; the invoker reports it.
        Ok(response) => warn!(status = response.status(), elapsed_ms, "response with error status"),
        Err(err) => warn!(error = %err, elapsed_ms, "round trip failed"),
    }
}
