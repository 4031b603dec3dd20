//! Outgoing HTTP request, as handed to the transport.
//!
//! A [`Request`] always carries an absolute URL: relative paths are resolved
//! by [`ApiCall::into_request`](crate::ApiCall::into_request) before anything
//! reaches an [`HttpClient`](crate::HttpClient).
//!
//! # Example
//!
//! ```
//! use bpmink_core::{Method, Request};
//! use bytes::Bytes;
//!
//! let url = "https://bpm.example.com/rest/bpm/wle/v1/task/1234".parse().unwrap();
//! let request = Request::<Bytes>::builder(Method::Put, url)
//!     .header("Accept", "application/json")
//!     .query("action", "start")
//!     .build();
//! assert_eq!(request.url().query(), Some("action=start"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::Method;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends multiple query parameters to the URL.
    ///
    /// An empty iterator leaves the URL without a `?`.
    #[must_use]
    pub fn query_pairs<'a>(mut self, pairs: impl IntoIterator<Item = &'a (String, String)>) -> Self {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_some() {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_url() -> url::Url {
        url::Url::parse("https://bpm.example.com/rest/bpm/wle/v1/task/1234").expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::<Bytes>::builder(Method::Get, task_url())
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(
            request.url().as_str(),
            "https://bpm.example.com/rest/bpm/wle/v1/task/1234"
        );
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_query_pairs() {
        let pairs = vec![
            ("action".to_string(), "assign".to_string()),
            ("toUser".to_string(), "jane doe".to_string()),
        ];
        let request = Request::<Bytes>::builder(Method::Put, task_url())
            .query_pairs(&pairs)
            .build();

        assert_eq!(request.url().query(), Some("action=assign&toUser=jane+doe"));
    }

    #[test]
    fn request_builder_no_query_pairs_keeps_url_clean() {
        let pairs: Vec<(String, String)> = Vec::new();
        let request = Request::<Bytes>::builder(Method::Get, task_url())
            .query_pairs(&pairs)
            .build();

        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn request_builder_body_and_headers() {
        let body = crate::to_json(&serde_json::json!({ "approved": true })).expect("json");
        let request = Request::builder(Method::Post, task_url())
            .headers([("Content-Type".to_string(), "application/json".to_string())])
            .body(body)
            .build();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.body().map(|b| b.as_ref()),
            Some(br#"{"approved":true}"#.as_slice())
        );
    }
}
