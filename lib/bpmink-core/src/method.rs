//! HTTP method types.

use derive_more::Display;

/// HTTP method used by the BPM REST API.
///
/// The server only ever needs four verbs: reads are `GET`, state transitions
/// on a task (`action=start`, `action=assign`, ...) are `PUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - act on an existing resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Returns `true` if the method does not modify server state.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn only_get_is_read_only() {
        assert!(Method::Get.is_read_only());
        assert!(!Method::Put.is_read_only());
        assert!(!Method::Post.is_read_only());
        assert!(!Method::Delete.is_read_only());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Put), http::Method::PUT);
        assert_eq!(http::Method::from(Method::Delete), http::Method::DELETE);
    }
}
