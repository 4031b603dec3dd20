//! The BPM response envelope.
//!
//! Every BPM REST response shares one container shape:
//!
//! ```json
//! { "status": "200", "data": { "tkiid": "1234" } }
//! { "status": "error", "Data": { "errorNumber": "CWTBG0019E", "errorMessage": "..." } }
//! ```
//!
//! [`RootResult`] is the decoded form of that container: the payload, the
//! server-reported error, or both.

use serde::Deserialize;

/// Decoded response envelope for a payload of type `T`.
///
/// A result is successful iff [`error`](Self::error) is absent. The payload may
/// still be present next to an error when the server returned partial data.
#[derive(Debug, Clone, PartialEq)]
pub struct RootResult<T> {
    http_status: u16,
    status: Option<String>,
    data: Option<T>,
    error: Option<ErrorInfo>,
}

impl<T> RootResult<T> {
    /// Assemble a result from its decoded parts.
    #[must_use]
    pub const fn new(
        http_status: u16,
        status: Option<String>,
        data: Option<T>,
        error: Option<ErrorInfo>,
    ) -> Self {
        Self {
            http_status,
            status,
            data,
            error,
        }
    }

    /// A "no content" result: neither payload nor error.
    #[must_use]
    pub const fn empty(http_status: u16) -> Self {
        Self::new(http_status, None, None, None)
    }

    /// HTTP status code of the response this result was decoded from.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.http_status
    }

    /// The envelope `status` field (`"200"`, `"error"`, ...), if sent.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The decoded payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The server-reported error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// No error section was reported. Looks at the envelope only, never at the
    /// HTTP status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The HTTP status was 2xx. Independent from [`is_success`](Self::is_success).
    #[must_use]
    pub const fn is_http_success(&self) -> bool {
        self.http_status >= 200 && self.http_status < 300
    }

    /// Both a payload and an error were decoded.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.data.is_some() && self.error.is_some()
    }

    /// Consume into the payload, dropping any error.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Consume into (payload, error).
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Option<ErrorInfo>) {
        (self.data, self.error)
    }

    /// Treat the server error as failure: `Err` when an error was reported,
    /// otherwise the (possibly absent) payload.
    pub fn into_result(self) -> Result<Option<T>, ErrorInfo> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }

    /// Transform the payload, keeping status and error.
    pub fn map<U, F>(self, f: F) -> RootResult<U>
    where
        F: FnOnce(T) -> U,
    {
        RootResult {
            http_status: self.http_status,
            status: self.status,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

/// Error code reported by the server: a message number such as `CWTBG0019E`,
/// or a plain number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// Numeric code.
    Number(i64),
    /// Textual code.
    Text(String),
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(code) => write!(f, "{code}"),
            Self::Text(code) => f.write_str(code),
        }
    }
}

/// Server-reported failure detail.
///
/// The server names the code `errorNumber` and the message `errorMessage`;
/// some endpoints use `code` and `message` instead, sometimes next to them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ErrorFields")]
pub struct ErrorInfo {
    code: Option<ErrorCode>,
    message: Option<String>,
    parameters: Option<Vec<serde_json::Value>>,
    exception_type: Option<String>,
    programmers_details: Option<String>,
    causes: Option<Vec<ErrorInfo>>,
}

/// Error section as sent on the wire.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorFields {
    #[serde(default)]
    error_number: Option<ErrorCode>,
    #[serde(default)]
    code: Option<ErrorCode>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_message_parameters: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    exception_type: Option<String>,
    #[serde(default)]
    programmers_details: Option<String>,
    #[serde(default)]
    causes: Option<Vec<ErrorInfo>>,
}

impl From<ErrorFields> for ErrorInfo {
    fn from(fields: ErrorFields) -> Self {
        Self {
            code: fields.error_number.or(fields.code),
            message: fields.error_message.or(fields.message),
            parameters: fields.error_message_parameters,
            exception_type: fields.exception_type,
            programmers_details: fields.programmers_details,
            causes: fields.causes,
        }
    }
}

impl ErrorInfo {
    /// Create an error from a code and a message.
    #[must_use]
    pub fn new(code: Option<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            parameters: None,
            exception_type: None,
            programmers_details: None,
            causes: None,
        }
    }

    /// Append a nested cause.
    #[must_use]
    pub fn with_cause(mut self, cause: Self) -> Self {
        self.causes.get_or_insert_with(Vec::new).push(cause);
        self
    }

    /// Error code (`errorNumber`).
    #[must_use]
    pub const fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// Human-readable message (`errorMessage`).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Values substituted into the message (`errorMessageParameters`).
    #[must_use]
    pub fn parameters(&self) -> &[serde_json::Value] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// Server-side exception class (`exceptionType`).
    #[must_use]
    pub fn exception_type(&self) -> Option<&str> {
        self.exception_type.as_deref()
    }

    /// Diagnostic details meant for developers (`programmersDetails`).
    #[must_use]
    pub fn programmers_details(&self) -> Option<&str> {
        self.programmers_details.as_deref()
    }

    /// Nested causes, outermost first.
    #[must_use]
    pub fn causes(&self) -> &[Self] {
        self.causes.as_deref().unwrap_or_default()
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("unspecified server error"),
        }
    }
}
