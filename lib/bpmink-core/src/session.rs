//! Session context attached to every call.
//!
//! A [`Session`] is built once, before the client handle, and never changes
//! afterwards. The invoker copies its headers onto each outgoing request.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Authentication and cookie headers shared by all calls of a client.
///
/// # Example
///
/// ```
/// use bpmink_core::Session;
///
/// let session = Session::basic_auth("admin", "admin")
///     .with_cookie("LtpaToken2", "abc123");
///
/// let headers = session.headers();
/// assert!(headers.contains(&("Authorization".to_string(), "Basic YWRtaW46YWRtaW4=".to_string())));
/// assert!(headers.contains(&("Cookie".to_string(), "LtpaToken2=abc123".to_string())));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    authorization: Option<String>,
    cookies: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session authenticating with HTTP basic credentials.
    #[must_use]
    pub fn basic_auth(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        Self {
            authorization: Some(format!("Basic {}", STANDARD.encode(credentials))),
            ..Self::default()
        }
    }

    /// Session authenticating with a bearer token.
    #[must_use]
    pub fn bearer_auth(token: impl AsRef<str>) -> Self {
        Self {
            authorization: Some(format!("Bearer {}", token.as_ref())),
            ..Self::default()
        }
    }

    /// Add a cookie, e.g. an `LtpaToken2` obtained at login.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Add an arbitrary header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `true` if the session adds nothing to requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authorization.is_none() && self.cookies.is_empty() && self.headers.is_empty()
    }

    /// Headers to put on a request. Cookies are folded into one `Cookie` header.
    #[must_use]
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        if let Some(authorization) = &self.authorization {
            headers.push(("Authorization".to_string(), authorization.clone()));
        }
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            headers.push(("Cookie".to_string(), cookie));
        }
        headers
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cookie_names: Vec<&str> = self.cookies.iter().map(|(name, _)| name.as_str()).collect();
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("Session")
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("cookies", &cookie_names)
            .field("headers", &header_names)
            .finish()
    }
}
