//! The BPM client handle.
//!
//! [`BpmClient`] combines a transport with the root endpoint of the BPM REST
//! API and an optional [`Session`]. It is immutable once built and can be
//! cloned and shared across tasks; every call is one independent round trip.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::api::{ProcessAppsApi, TaskApi};
use crate::{ApiCall, Error, HttpClient, Request, Response, Result, RootResult, Session};

/// Client handle for a BPM REST endpoint.
///
/// # Example
///
/// ```ignore
/// use bpmink::{BpmClient, HyperClient, Session};
///
/// let client = BpmClient::builder(HyperClient::new())
///     .root_url("https://bpm.example.com:9443/rest/bpm/wle/v1")
///     .session(Session::basic_auth("tw_admin", "secret"))
///     .build()?;
///
/// let task = client.tasks().get_task("1234").await?;
/// if let Some(details) = task.data() {
///     println!("{} is {:?}", details.tkiid, details.status);
/// }
/// ```
#[derive(Debug)]
pub struct BpmClient<C> {
    transport: C,
    root: Url,
    session: Option<Arc<Session>>,
}

impl<C: Clone> Clone for BpmClient<C> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            root: self.root.clone(),
            session: self.session.clone(),
        }
    }
}

impl<C> BpmClient<C> {
    /// Create a client for the given root endpoint, without session.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or cannot carry paths.
    pub fn new(transport: C, root: impl AsRef<str>) -> Result<Self> {
        let root = Url::parse(root.as_ref())?;
        if root.cannot_be_a_base() {
            return Err(Error::invalid_argument("root", "must be a hierarchical URL"));
        }
        Ok(Self::with_url(transport, root))
    }

    /// Create a client with a pre-parsed root URL.
    #[must_use]
    pub fn with_url(transport: C, root: Url) -> Self {
        Self {
            transport,
            root,
            session: None,
        }
    }

    /// Start building a client around `transport`.
    #[must_use]
    pub fn builder(transport: C) -> BpmClientBuilder<C> {
        BpmClientBuilder {
            transport,
            root: None,
            session: None,
        }
    }

    /// Attach a session, replacing any previous one.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(Arc::new(session));
        self
    }

    /// Root endpoint all relative paths resolve against.
    #[must_use]
    pub fn root_url(&self) -> &Url {
        &self.root
    }

    /// Session headers attached to every call.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_deref()
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Task operations.
    #[must_use]
    pub const fn tasks(&self) -> TaskApi<'_, C> {
        TaskApi::new(self)
    }

    /// Process application operations.
    #[must_use]
    pub const fn process_apps(&self) -> ProcessAppsApi<'_, C> {
        ProcessAppsApi::new(self)
    }
}

impl<C: HttpClient> BpmClient<C> {
    /// Send a call and return the raw response, whatever its status.
    pub async fn send<T>(&self, call: ApiCall<T>) -> Result<Response<Bytes>> {
        let (request, _) = call.into_request(&self.root, self.session())?;
        self.execute(request).await
    }

    /// Send a call and decode the response envelope into `T`.
    ///
    /// A server-reported error is returned inside the [`RootResult`]; only
    /// argument, transport and decode failures are `Err`.
    pub async fn invoke<T: DeserializeOwned>(&self, call: ApiCall<T>) -> Result<RootResult<T>> {
        let (request, shape) = call.into_request(&self.root, self.session())?;
        let method = request.method();
        let path = request.url().path().to_string();

        let response = self.execute(request).await?;
        let result = shape.decode(&response)?;

        if let Some(error) = result.error() {
            warn!(
                %method,
                %path,
                status = result.http_status(),
                code = ?error.code().map(ToString::to_string),
                message = error.message().unwrap_or_default(),
                "BPM call reported an error"
            );
        }
        Ok(result)
    }

    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let method = request.method();
        debug!(%method, url = %request.url(), "sending BPM request");

        let response = self.transport.execute(request).await?;
        debug!(
            %method,
            status = response.status(),
            body_len = response.body().len(),
            "received BPM response"
        );
        Ok(response)
    }
}

/// Builder for [`BpmClient`].
#[derive(Debug)]
pub struct BpmClientBuilder<C> {
    transport: C,
    root: Option<String>,
    session: Option<Session>,
}

impl<C> BpmClientBuilder<C> {
    /// Root endpoint, e.g. `https://host:9443/rest/bpm/wle/v1`.
    #[must_use]
    pub fn root_url(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Session attached to every call.
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no root URL was given or it cannot be parsed.
    pub fn build(self) -> Result<BpmClient<C>> {
        let root = self
            .root
            .ok_or_else(|| Error::invalid_argument("root", "is required"))?;
        let client = BpmClient::new(self.transport, root)?;
        Ok(match self.session {
            Some(session) => client.with_session(session),
            None => client,
        })
    }
}
