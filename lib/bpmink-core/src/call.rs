//! Request descriptors.
//!
//! An [`ApiCall<T>`] describes one outbound call: verb, path relative to the
//! client root, query parameters, optional body, and the [`Shape`] of the
//! expected payload. It exists for the duration of a single invocation.
//!
//! # Example
//!
//! ```
//! use bpmink_core::{ApiCall, Method};
//!
//! #[derive(serde::Deserialize)]
//! struct TaskDetails { tkiid: String }
//!
//! let call = ApiCall::<TaskDetails>::put("task/1234")
//!     .query("action", "assign")
//!     .query_opt("toUser", None::<&str>);
//!
//! assert_eq!(call.method(), Method::Put);
//! assert_eq!(call.query_params(), &[("action".to_string(), "assign".to_string())]);
//! ```

use std::fmt::Display;

use bytes::Bytes;
use url::Url;

use crate::{ContentType, Method, Request, Result, Session, Shape};

/// Descriptor of one outbound call expecting a payload of type `T`.
#[derive(Debug)]
pub struct ApiCall<T> {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<(ContentType, Bytes)>,
    shape: Shape<T>,
}

impl<T> ApiCall<T> {
    /// Create a call with the given verb and relative path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            shape: Shape::new(),
        }
    }

    /// A `GET` call.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A `PUT` call.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// A `POST` call.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// A `DELETE` call.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: &str, value: impl Display) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    ///
    /// `None` leaves the request without the parameter: it is never sent as an
    /// empty value.
    #[must_use]
    pub fn query_opt(self, name: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Set a JSON body.
    pub fn json<B: serde::Serialize>(mut self, value: &B) -> Result<Self> {
        self.body = Some((ContentType::Json, crate::to_json(value)?));
        Ok(self)
    }

    /// Set a form URL-encoded body.
    pub fn form<B: serde::Serialize>(mut self, value: &B) -> Result<Self> {
        self.body = Some((ContentType::FormUrlEncoded, crate::to_form(value)?));
        Ok(self)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the client root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Serialized body and its content type.
    #[must_use]
    pub const fn body(&self) -> Option<&(ContentType, Bytes)> {
        self.body.as_ref()
    }

    /// Shape token of the expected payload.
    #[must_use]
    pub const fn shape(&self) -> Shape<T> {
        self.shape
    }

    /// Absolute URL of this call under `root`.
    ///
    /// The root is treated as a directory: `https://host/rest/bpm/wle/v1` and
    /// `https://host/rest/bpm/wle/v1/` both resolve `task/1` to
    /// `https://host/rest/bpm/wle/v1/task/1`.
    pub fn resolve(&self, root: &Url) -> Result<Url> {
        let mut base = root.clone();
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        Ok(base.join(self.path.trim_start_matches('/'))?)
    }

    /// Build the transport request, attaching the session headers.
    pub fn into_request(
        self,
        root: &Url,
        session: Option<&Session>,
    ) -> Result<(Request<Bytes>, Shape<T>)> {
        let url = self.resolve(root)?;
        let mut builder = Request::builder(self.method, url)
            .header("Accept", ContentType::Json.as_str())
            .query_pairs(&self.query);

        if let Some(session) = session {
            builder = builder.headers(session.headers());
        }
        if let Some((content_type, body)) = self.body {
            builder = builder.header("Content-Type", content_type.as_str()).body(body);
        }

        Ok((builder.build(), self.shape))
    }
}
