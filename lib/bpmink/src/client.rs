//! Hyper transport for the BPM REST API.
//!
//! [`HyperClient`] performs exactly one round trip per request: it neither
//! retries nor follows redirects, and any status code comes back as a
//! [`Response`]. Only failures to complete the exchange are errors.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{self, Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tower::util::BoxCloneSyncService;
use tower::{Layer, ServiceExt};
use tower_service::Service;

use crate::{Error, Request, Response, Result, config::ClientConfig, connector::https_connector};

#[cfg(feature = "middleware-logging")]
use crate::middleware::LoggingLayer;

/// The transport as layers see it: one [`Request`] in, one raw [`Response`] out.
pub type BoxedService = BoxCloneSyncService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by [`HyperClient`] as a tower [`Service`].
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

type Pool = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Innermost service: one exchange over the pooled hyper client.
#[derive(Clone)]
struct RoundTrip {
    pool: Pool,
    timeout: Duration,
    user_agent: Option<Arc<str>>,
}

impl RoundTrip {
    fn new(config: &ClientConfig) -> Self {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(config));

        Self {
            pool,
            timeout: config.timeout,
            user_agent: config.user_agent.as_deref().map(Arc::from),
        }
    }

    async fn send(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = to_hyper(request, self.user_agent.as_deref())?;

        // Reading the body counts against the timeout.
        let exchange = async {
            let response = self
                .pool
                .request(request)
                .await
                .map_err(|err| transport_error(&err))?;

            let status = response.status().as_u16();
            let headers = header_map(response.headers());
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|err| Error::connection(describe(&err)))?
                .to_bytes();

            Ok(Response::new(status, headers, body))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout)?
    }
}

impl Service<Request<Bytes>> for RoundTrip {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().send(request))
    }
}

/// Convert a transport request, adding `User-Agent` unless the caller set one.
fn to_hyper(request: Request<Bytes>, user_agent: Option<&str>) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();

    let mut builder = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str());

    let has_user_agent = headers
        .keys()
        .any(|name| name.eq_ignore_ascii_case(http::header::USER_AGENT.as_str()));
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(user_agent) = user_agent.filter(|_| !has_user_agent) {
        builder = builder.header(http::header::USER_AGENT, user_agent);
    }

    builder
        .body(body.map_or_else(Full::default, Full::new))
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Response headers; values that are not visible ASCII are skipped.
fn header_map(headers: &http::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

/// Classify a failed exchange by walking its causes.
fn transport_error(err: &legacy::Error) -> Error {
    let mut cause = err.source();
    while let Some(current) = cause {
        if current.is::<rustls::Error>() {
            return Error::tls(describe(err));
        }
        if let Some(io) = current.downcast_ref::<io::Error>() {
            if io.get_ref().is_some_and(|inner| inner.is::<rustls::Error>()) {
                return Error::tls(describe(err));
            }
            if io.kind() == io::ErrorKind::TimedOut {
                return Error::Timeout;
            }
        }
        cause = current.source();
    }
    Error::connection(describe(err))
}

/// Error message followed by its causes.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(current) = cause {
        message.push_str(": ");
        message.push_str(&current.to_string());
        cause = current.source();
    }
    message
}

/// HTTP(S) transport for [`BpmClient`](crate::BpmClient): pooled hyper-util
/// client, rustls with the webpki roots, optional tower layers.
///
/// Cloning is cheap and clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use bpmink::HyperClient;
/// use std::time::Duration;
///
/// let transport = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: BoxedService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Transport with the default configuration and no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Transport with the given configuration and no layers.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start building a transport.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl bpmink_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.service.clone().oneshot(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.service.call(request)
    }
}

type Wrap = Box<dyn FnOnce(BoxedService) -> BoxedService + Send + Sync>;

/// Builder for [`HyperClient`].
///
/// ```ignore
/// use bpmink::HyperClient;
/// use bpmink::middleware::LoggingLayer;
///
/// let transport = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfig,
    layers: Vec<Wrap>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the round-trip timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the TCP connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// Set how long idle connections are kept.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Wrap the transport in a tower layer.
    ///
    /// Layers wrap in order: the last added is the outermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send + 'static,
    {
        self.layers
            .push(Box::new(move |service| BoxedService::new(layer.layer(service))));
        self
    }

    /// Log every round trip at info level.
    #[cfg(feature = "middleware-logging")]
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log every round trip at debug level, with header names and body sizes.
    #[cfg(feature = "middleware-logging")]
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the transport.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let Self { config, layers } = self;
        let service = layers
            .into_iter()
            .fold(BoxedService::new(RoundTrip::new(&config)), |service, wrap| {
                wrap(service)
            });

        HyperClient { service, config }
    }
}
