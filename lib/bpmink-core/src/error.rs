//! Error types for bpmink.
//!
//! Errors fall into three classes:
//! - argument errors, raised by facades before any I/O ([`Error::InvalidArgument`])
//! - transport errors, when the HTTP round trip cannot complete
//! - decode errors, when a response cannot be read as an envelope
//!
//! Errors reported by the BPM server itself are not part of this type: they are
//! returned as [`ErrorInfo`](crate::ErrorInfo) inside a [`RootResult`](crate::RootResult).

use derive_more::{Display, Error, From};

/// Main error type for bpmink operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A mandatory call parameter was absent or invalid.
    #[display("invalid argument `{name}`: {reason}")]
    #[from(skip)]
    InvalidArgument {
        /// Parameter name, as documented on the facade operation.
        name: &'static str,
        /// Why the value was rejected.
        #[error(not(source))]
        reason: String,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The transport could not build the outgoing request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Non-2xx response whose body is not a BPM envelope.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "data.priority").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded or query string serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if a call parameter was rejected before any I/O.
    #[must_use]
    pub const fn is_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` if the HTTP round trip could not be completed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout | Self::InvalidRequest(_)
        )
    }

    /// Returns `true` if the response could not be read as an envelope.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::JsonDeserialization { .. } | Self::Http { .. })
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn error_display() {
        insta::assert_snapshot!(
            Error::invalid_argument("tkiid", "must not be empty"),
            @"invalid argument `tkiid`: must not be empty"
        );
        insta::assert_snapshot!(Error::Timeout, @"request timeout");
        insta::assert_snapshot!(
            Error::connection("connection refused"),
            @"connection error: connection refused"
        );
        insta::assert_snapshot!(
            Error::json_deserialization("data.priority", "unknown variant `Urgent`"),
            @"JSON deserialization error at 'data.priority': unknown variant `Urgent`"
        );
    }

    #[test]
    fn error_classes_are_disjoint() {
        let argument = Error::invalid_argument("tkiid", "must not be empty");
        check!(argument.is_argument());
        check!(!argument.is_transport());
        check!(!argument.is_decode());

        for transport in [
            Error::Timeout,
            Error::connection("refused"),
            Error::tls("bad certificate"),
            Error::invalid_request("bad header"),
        ] {
            check!(transport.is_transport());
            check!(!transport.is_argument());
            check!(!transport.is_decode());
        }

        let decode = Error::json_deserialization("", "expected value at line 1 column 1");
        check!(decode.is_decode());
        check!(!decode.is_transport());

        let http = Error::http_with_body(502, "Bad Gateway", bytes::Bytes::from("<html>"));
        check!(http.is_decode());
        check!(http.status() == Some(502));
        check!(http.body() == Some(&bytes::Bytes::from("<html>")));
    }

    #[test]
    fn error_is_timeout() {
        check!(Error::Timeout.is_timeout());
        check!(!Error::connection("failed").is_timeout());
        check!(Error::connection("failed").is_connection());
        check!(Error::Timeout.status().is_none());
        check!(Error::Timeout.body().is_none());
    }
}
